pub mod dft;

pub use dft::dft;
