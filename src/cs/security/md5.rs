//! DISCLAIMER: This module is a reference implementation of the MD5 (legacy) hash
//! function in pure Rust. MD5 is broken for collision resistance; use it only for
//! integrity fingerprints and legacy protocol compatibility, never for anything
//! security-sensitive. If you need a secure hash, use a vetted, modern library
//! (e.g. SHA-2 or SHA-3 from RustCrypto).
//!
//! The module is split along the grain of the algorithm: a [`CompressionTransform`]
//! consumes one 64-byte block at a time, and the driver ([`md5_hash`] and friends)
//! handles block iteration, padding, and length encoding per RFC 1321. The trait
//! boundary lets an optimized transform ([`UnrolledTransform`]) stand in for the
//! portable one without touching the driver.

use rayon::prelude::*;

use crate::cs::error::{Error, Result};

/// The size of the MD5 digest in bytes (128 bits = 16 bytes).
pub const MD5_OUTPUT_SIZE: usize = 16;

/// The size of one MD5 input block in bytes (512 bits = 64 bytes).
pub const MD5_BLOCK_SIZE: usize = 64;

/// The size of the trailing message-length field in bytes.
const LENGTH_SIZE: usize = 8;

/// The sine table constants (K) in MD5 (32 bits).
/// K[i] = floor(2^32 * abs(sin(i+1))) for i=0..63
static K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee,
    0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be,
    0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa,
    0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed,
    0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c,
    0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05,
    0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039,
    0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1,
    0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// The amount of left rotation performed in each MD5 round, grouped by step.
static S: [u32; 64] = [
    // Round 1
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22,
    // Round 2
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20,
    // Round 3
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23,
    // Round 4
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// The 128-bit MD5 state: four 32-bit words (A, B, C, D) threaded across
/// block processing. A transform call updates all four words or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Md5State {
    /// State words A, B, C, D in order.
    pub words: [u32; 4],
}

impl Md5State {
    /// The initial values for (A, B, C, D) from the MD5 specification.
    pub const INIT: Md5State = Md5State {
        words: [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476],
    };

    /// All-zero state, used by the raw-throughput benchmark.
    pub const ZERO: Md5State = Md5State { words: [0; 4] };

    /// Serializes the state as the canonical 16-byte digest: each word
    /// rendered little-endian, word order A, B, C, D.
    pub fn to_bytes(&self) -> [u8; MD5_OUTPUT_SIZE] {
        let mut output = [0u8; MD5_OUTPUT_SIZE];
        for (chunk, word) in output.chunks_exact_mut(4).zip(self.words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        output
    }
}

/// One application of the MD5 compression function.
///
/// Implementations must be pure: the next state is a function of the given
/// state and block only, and two calls on identical inputs yield identical
/// results. The driver guarantees every block is exactly 64 bytes, so there
/// are no error conditions at this seam.
pub trait CompressionTransform {
    /// Folds one 64-byte block into `state`.
    fn compress(&self, state: &mut Md5State, block: &[u8; MD5_BLOCK_SIZE]);
}

/// Loads the block as 16 little-endian 32-bit words. The endianness here is
/// load-bearing: big-endian loads produce digests that match nothing.
fn load_words(block: &[u8; MD5_BLOCK_SIZE]) -> [u32; 16] {
    let mut w = [0u32; 16];
    for (word, chunk) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    w
}

/// Portable MD5 compression: a plain 64-iteration loop with the round
/// functions and message-word indices computed inline.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortableTransform;

impl CompressionTransform for PortableTransform {
    fn compress(&self, state: &mut Md5State, block: &[u8; MD5_BLOCK_SIZE]) {
        let w = load_words(block);
        let [mut a, mut b, mut c, mut d] = state.words;

        for i in 0..64 {
            let (f, g) = if i < 16 {
                // F function
                ((b & c) | ((!b) & d), i)
            } else if i < 32 {
                // G function
                ((b & d) | (c & (!d)), (5 * i + 1) % 16)
            } else if i < 48 {
                // H function
                (b ^ c ^ d, (3 * i + 5) % 16)
            } else {
                // I function
                (c ^ (b | (!d)), (7 * i) % 16)
            };

            let temp = a
                .wrapping_add(f)
                .wrapping_add(w[g])
                .wrapping_add(K[i])
                .rotate_left(S[i])
                .wrapping_add(b);

            a = d;
            d = c;
            c = b;
            b = temp;
        }

        // Add the working registers back into the incoming state, mod 2^32.
        state.words[0] = state.words[0].wrapping_add(a);
        state.words[1] = state.words[1].wrapping_add(b);
        state.words[2] = state.words[2].wrapping_add(c);
        state.words[3] = state.words[3].wrapping_add(d);
    }
}

/// Fully unrolled MD5 compression. Same contract as [`PortableTransform`],
/// bit for bit; unrolling removes the per-round branching and schedule
/// lookups, which is where the loop-based version spends its time. This
/// plays the role the original's hand-written assembly routine did, without
/// leaving portable Rust.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnrolledTransform;

impl CompressionTransform for UnrolledTransform {
    fn compress(&self, state: &mut Md5State, block: &[u8; MD5_BLOCK_SIZE]) {
        let w = load_words(block);
        let [mut a, mut b, mut c, mut d] = state.words;

        macro_rules! step {
            ($f:expr, $a:ident, $b:ident, $x:expr, $s:expr, $k:expr) => {
                $a = $b.wrapping_add(
                    $a.wrapping_add($f)
                        .wrapping_add($x)
                        .wrapping_add($k)
                        .rotate_left($s),
                );
            };
        }
        macro_rules! ff {
            ($a:ident, $b:ident, $c:ident, $d:ident, $x:expr, $s:expr, $k:expr) => {
                step!(($b & $c) | (!$b & $d), $a, $b, $x, $s, $k)
            };
        }
        macro_rules! gg {
            ($a:ident, $b:ident, $c:ident, $d:ident, $x:expr, $s:expr, $k:expr) => {
                step!(($b & $d) | ($c & !$d), $a, $b, $x, $s, $k)
            };
        }
        macro_rules! hh {
            ($a:ident, $b:ident, $c:ident, $d:ident, $x:expr, $s:expr, $k:expr) => {
                step!($b ^ $c ^ $d, $a, $b, $x, $s, $k)
            };
        }
        macro_rules! ii {
            ($a:ident, $b:ident, $c:ident, $d:ident, $x:expr, $s:expr, $k:expr) => {
                step!($c ^ ($b | !$d), $a, $b, $x, $s, $k)
            };
        }

        ff!(a, b, c, d, w[0], 7, K[0]);
        ff!(d, a, b, c, w[1], 12, K[1]);
        ff!(c, d, a, b, w[2], 17, K[2]);
        ff!(b, c, d, a, w[3], 22, K[3]);
        ff!(a, b, c, d, w[4], 7, K[4]);
        ff!(d, a, b, c, w[5], 12, K[5]);
        ff!(c, d, a, b, w[6], 17, K[6]);
        ff!(b, c, d, a, w[7], 22, K[7]);
        ff!(a, b, c, d, w[8], 7, K[8]);
        ff!(d, a, b, c, w[9], 12, K[9]);
        ff!(c, d, a, b, w[10], 17, K[10]);
        ff!(b, c, d, a, w[11], 22, K[11]);
        ff!(a, b, c, d, w[12], 7, K[12]);
        ff!(d, a, b, c, w[13], 12, K[13]);
        ff!(c, d, a, b, w[14], 17, K[14]);
        ff!(b, c, d, a, w[15], 22, K[15]);

        gg!(a, b, c, d, w[1], 5, K[16]);
        gg!(d, a, b, c, w[6], 9, K[17]);
        gg!(c, d, a, b, w[11], 14, K[18]);
        gg!(b, c, d, a, w[0], 20, K[19]);
        gg!(a, b, c, d, w[5], 5, K[20]);
        gg!(d, a, b, c, w[10], 9, K[21]);
        gg!(c, d, a, b, w[15], 14, K[22]);
        gg!(b, c, d, a, w[4], 20, K[23]);
        gg!(a, b, c, d, w[9], 5, K[24]);
        gg!(d, a, b, c, w[14], 9, K[25]);
        gg!(c, d, a, b, w[3], 14, K[26]);
        gg!(b, c, d, a, w[8], 20, K[27]);
        gg!(a, b, c, d, w[13], 5, K[28]);
        gg!(d, a, b, c, w[2], 9, K[29]);
        gg!(c, d, a, b, w[7], 14, K[30]);
        gg!(b, c, d, a, w[12], 20, K[31]);

        hh!(a, b, c, d, w[5], 4, K[32]);
        hh!(d, a, b, c, w[8], 11, K[33]);
        hh!(c, d, a, b, w[11], 16, K[34]);
        hh!(b, c, d, a, w[14], 23, K[35]);
        hh!(a, b, c, d, w[1], 4, K[36]);
        hh!(d, a, b, c, w[4], 11, K[37]);
        hh!(c, d, a, b, w[7], 16, K[38]);
        hh!(b, c, d, a, w[10], 23, K[39]);
        hh!(a, b, c, d, w[13], 4, K[40]);
        hh!(d, a, b, c, w[0], 11, K[41]);
        hh!(c, d, a, b, w[3], 16, K[42]);
        hh!(b, c, d, a, w[6], 23, K[43]);
        hh!(a, b, c, d, w[9], 4, K[44]);
        hh!(d, a, b, c, w[12], 11, K[45]);
        hh!(c, d, a, b, w[15], 16, K[46]);
        hh!(b, c, d, a, w[2], 23, K[47]);

        ii!(a, b, c, d, w[0], 6, K[48]);
        ii!(d, a, b, c, w[7], 10, K[49]);
        ii!(c, d, a, b, w[14], 15, K[50]);
        ii!(b, c, d, a, w[5], 21, K[51]);
        ii!(a, b, c, d, w[12], 6, K[52]);
        ii!(d, a, b, c, w[3], 10, K[53]);
        ii!(c, d, a, b, w[10], 15, K[54]);
        ii!(b, c, d, a, w[1], 21, K[55]);
        ii!(a, b, c, d, w[8], 6, K[56]);
        ii!(d, a, b, c, w[15], 10, K[57]);
        ii!(c, d, a, b, w[6], 15, K[58]);
        ii!(b, c, d, a, w[13], 21, K[59]);
        ii!(a, b, c, d, w[4], 6, K[60]);
        ii!(d, a, b, c, w[11], 10, K[61]);
        ii!(c, d, a, b, w[2], 15, K[62]);
        ii!(b, c, d, a, w[9], 21, K[63]);

        state.words[0] = state.words[0].wrapping_add(a);
        state.words[1] = state.words[1].wrapping_add(b);
        state.words[2] = state.words[2].wrapping_add(c);
        state.words[3] = state.words[3].wrapping_add(d);
    }
}

/// Hashes a whole message with the given compression transform, returning
/// the final state words.
///
/// Blocks are processed strictly in order, each folded into the state left
/// by the previous one. The final block (or two) carries the `0x80` marker,
/// zero padding, and the original message length in bits as a little-endian
/// 64-bit integer in the last 8 bytes.
pub fn md5_hash_with<T: CompressionTransform + ?Sized>(transform: &T, message: &[u8]) -> Md5State {
    let mut state = Md5State::INIT;

    let mut chunks = message.chunks_exact(MD5_BLOCK_SIZE);
    for chunk in &mut chunks {
        // chunks_exact yields exactly MD5_BLOCK_SIZE bytes
        let block: &[u8; MD5_BLOCK_SIZE] = chunk.try_into().unwrap();
        transform.compress(&mut state, block);
    }

    let rem = chunks.remainder();
    let mut block = [0u8; MD5_BLOCK_SIZE];
    block[..rem.len()].copy_from_slice(rem);
    block[rem.len()] = 0x80;
    let used = rem.len() + 1;

    // If the length field no longer fits after the marker byte, flush this
    // block and start a fresh all-zero one. A 55-byte remainder is the last
    // length that still fits in a single final block.
    if MD5_BLOCK_SIZE - used < LENGTH_SIZE {
        transform.compress(&mut state, &block);
        block = [0u8; MD5_BLOCK_SIZE];
    }

    let bit_len = (message.len() as u64).wrapping_mul(8);
    block[MD5_BLOCK_SIZE - LENGTH_SIZE..].copy_from_slice(&bit_len.to_le_bytes());
    transform.compress(&mut state, &block);

    state
}

/// Hashes a whole message with the portable transform, returning the final
/// state words.
pub fn md5_hash(message: &[u8]) -> Md5State {
    md5_hash_with(&PortableTransform, message)
}

/// Computes the MD5 digest of a message as the canonical 16 bytes.
pub fn md5_digest(message: &[u8]) -> [u8; MD5_OUTPUT_SIZE] {
    md5_hash(message).to_bytes()
}

/// Computes the MD5 digests of independent messages in parallel.
///
/// Each message gets its own private state and scratch block; the only
/// shared data is the read-only round-constant tables. Output order matches
/// input order and is identical to hashing the messages sequentially.
pub fn md5_digest_batch(messages: &[&[u8]]) -> Vec<[u8; MD5_OUTPUT_SIZE]> {
    messages.par_iter().map(|m| md5_digest(m)).collect()
}

/// Known-answer vector: expected state words, then the input message.
struct TestVector {
    answer: [u32; 4],
    message: &'static [u8],
}

// The MD5 standard serializes u32 words to/from bytes little-endian, so
// these word values correspond to the familiar hex digests.
static TEST_VECTORS: [TestVector; 7] = [
    TestVector {
        answer: [0xD98C1DD4, 0x04B2008F, 0x980980E9, 0x7E42F8EC],
        message: b"",
    },
    TestVector {
        answer: [0xB975C10C, 0xA8B6F1C0, 0xE299C331, 0x61267769],
        message: b"a",
    },
    TestVector {
        answer: [0x98500190, 0xB04FD23C, 0x7D3F96D6, 0x727FE128],
        message: b"abc",
    },
    TestVector {
        answer: [0x7D696BF9, 0x8D93B77C, 0x312F5A52, 0xD061F1AA],
        message: b"message digest",
    },
    TestVector {
        answer: [0xD7D3FCC3, 0x00E49261, 0x6C49FB7D, 0x3BE167CA],
        message: b"abcdefghijklmnopqrstuvwxyz",
    },
    TestVector {
        answer: [0x98AB74D1, 0xF5D977D2, 0x2C1C61A5, 0x9F9D419F],
        message: b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
    },
    TestVector {
        answer: [0xA2F4ED57, 0x55C9E32B, 0x2EDA49AC, 0x7AB60721],
        message: b"12345678901234567890123456789012345678901234567890123456789012345678901234567890",
    },
];

/// Validates the digest pipeline against the RFC 1321 known-answer vectors.
///
/// A failure signals an implementation defect (wrong constant, rotation,
/// endianness, or padding), not a runtime condition; callers should treat
/// it as fatal and refuse to trust this build's digest output.
pub fn self_check() -> Result<()> {
    for (index, vector) in TEST_VECTORS.iter().enumerate() {
        let state = md5_hash(vector.message);
        let expected = Md5State {
            words: vector.answer,
        };
        if state != expected {
            log::warn!(
                "MD5 self-check vector {} ({} bytes) mismatched",
                index,
                vector.message.len()
            );
            return Err(Error::SelfCheckFailed {
                index,
                expected: hex::encode(expected.to_bytes()),
                actual: hex::encode(state.to_bytes()),
            });
        }
    }
    log::debug!("MD5 self-check passed ({} vectors)", TEST_VECTORS.len());
    Ok(())
}
