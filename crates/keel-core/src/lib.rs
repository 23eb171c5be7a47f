//! Core primitives for the Keel allocator-support kernel.
//!
//! This is the leaf crate with zero internal dependencies. It holds the
//! pieces every custom allocator (linear, stack, pool, freelist) needs
//! before it touches memory:
//!
//! - [`align`]: forward-adjustment arithmetic, with and without room for an
//!   allocation header.
//! - [`handle`]: the packed 64-bit [`Handle`] allocators hand back to callers.
//! - [`rng`]: the caller-owned [`Xorshift32`] generator used by stress
//!   harnesses to replay allocation patterns.
//! - [`math`]: float helpers used alongside the generator.
//!
//! Addresses are plain `usize` values here. Nothing in this crate
//! dereferences memory; the typed transfer routines that do live in
//! `keel-transfer`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod align;
pub mod error;
pub mod handle;
pub mod math;
pub mod rng;

pub use align::{
    align_forward, forward_adjustment, forward_adjustment_with_header, is_aligned, round_up,
    Alignment,
};
pub use error::AlignError;
pub use handle::Handle;
pub use rng::Xorshift32;
