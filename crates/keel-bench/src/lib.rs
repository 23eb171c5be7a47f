//! Benchmark profiles for the Keel allocator-support kernel.
//!
//! - [`reference_profile`]: the default stress run (10K requests, 1 MiB).
//! - [`heavy_profile`]: 10x the requests against a smaller buffer, so the
//!   fixture resets often.
//! - [`address_profile`]: deterministic cursor addresses for the
//!   alignment micro-benchmarks.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use keel_core::Xorshift32;
use keel_test_utils::StressConfig;

/// Reference stress profile: default config for `seed`.
pub fn reference_profile(seed: u32) -> StressConfig {
    StressConfig::new(seed)
}

/// Heavy stress profile: 100K requests up to 1 KiB against 256 KiB.
pub fn heavy_profile(seed: u32) -> StressConfig {
    StressConfig {
        iterations: 100_000,
        max_size: 1024,
        capacity: 256 * 1024,
        ..StressConfig::new(seed)
    }
}

/// `n` pseudo-random addresses, mostly unaligned, for alignment benches.
pub fn address_profile(seed: u32, n: usize) -> Vec<usize> {
    let mut rng = Xorshift32::new(seed);
    (0..n)
        .map(|_| ((rng.next_u32() as usize) << 4) | rng.bounded(16) as usize)
        .collect()
}
