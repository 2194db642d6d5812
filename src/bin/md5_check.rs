use std::process::ExitCode;
use std::time::Instant;

use refalgos::security::md5::{
    self_check, CompressionTransform, Md5State, UnrolledTransform, MD5_BLOCK_SIZE,
};

fn main() -> ExitCode {
    if let Err(err) = self_check() {
        eprintln!("Self-check failed: {err}");
        return ExitCode::FAILURE;
    }
    println!("Self-check passed");

    // Coarse raw-compression throughput, in the spirit of the classic
    // "hash a zeroed block N times" benchmark.
    let mut state = Md5State::ZERO;
    let block = [0u8; MD5_BLOCK_SIZE];
    const N: u64 = 10_000_000;
    let start = Instant::now();
    for _ in 0..N {
        UnrolledTransform.compress(&mut state, &block);
    }
    let elapsed = start.elapsed().as_secs_f64();
    println!(
        "Speed: {:.1} MB/s",
        (N * MD5_BLOCK_SIZE as u64) as f64 / elapsed / 1_000_000.0
    );

    // Keep the loop observable so it cannot be optimized away.
    if state == Md5State::ZERO {
        eprintln!("unexpected fixed point in compression loop");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
