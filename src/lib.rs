pub mod cs;
pub mod math;

pub use cs::error::{Error, Result};
pub use cs::security;
