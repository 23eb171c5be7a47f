//! Fixture allocators and stress harnesses for Keel development.
//!
//! The kernel crates ship primitives, not allocators. The fixtures here
//! are the smallest allocators that exercise those primitives the way
//! production code does:
//!
//! - [`HeaderedBump`]: header-prefixed linear allocator over a real buffer.
//! - [`SlotPool`]: generational slot pool that grows by relocation.
//! - [`StressPlan`] / [`run_stress`]: seeded request sequences replayed
//!   against a `HeaderedBump`.
//! - [`Tracked`]: an element type that counts its clones and drops.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod bump;
pub mod config;
pub mod error;
pub mod pool;
pub mod stress;
pub mod tracked;

pub use bump::{BlockHandle, BlockHeader, HeaderedBump};
pub use config::StressConfig;
pub use error::FixtureError;
pub use pool::{SlotHandle, SlotPool};
pub use stress::{run_stress, Request, StressPlan, StressReport};
pub use tracked::{TransferCounter, Tracked};

/// Route `log` output through the test harness's captured stdout.
///
/// Safe to call from every test; only the first call installs the logger.
/// Filter with `RUST_LOG` as usual.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
