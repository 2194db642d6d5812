pub mod md5;

// Re-export MD5 functionality
pub use md5::{
    md5_digest, md5_digest_batch, md5_hash, md5_hash_with, self_check, CompressionTransform,
    Md5State, PortableTransform, UnrolledTransform, MD5_BLOCK_SIZE, MD5_OUTPUT_SIZE,
};
