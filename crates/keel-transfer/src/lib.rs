//! Type-aware bulk element transfer for Keel allocators.
//!
//! Allocators and containers relocate or duplicate runs of elements when
//! they grow or compact. How that is done depends on the element type:
//! a `Copy` payload can be moved as raw bytes, anything else needs its
//! clone (and drop) logic run per element. The caller states which case
//! applies by picking a [`TransferStrategy`]:
//!
//! ```text
//! Strategy            copy                    relocate
//! ───────────────────────────────────────────────────────────────────
//! Trivial            one memcpy              one memcpy, no drop
//! ConstructDestruct  clone × count           (clone, drop src) × count
//! ```
//!
//! # Entry points
//!
//! - [`copy`] / [`relocate`]: `MaybeUninit` destination slices. Disjointness
//!   is guaranteed by the borrow checker.
//! - [`copy_to_vec`] / [`relocate_to_vec`]: duplicate or grow an owned
//!   buffer.
//! - [`raw::copy_raw`] / [`raw::relocate_raw`]: raw pointers for allocator
//!   internals. Non-overlap is checked by `debug_assert!` only.
//!
//! This is the only Keel crate that contains `unsafe` code. Every block
//! carries a `// SAFETY:` comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod raw;
pub mod slice;
pub mod strategy;

pub use raw::ranges_overlap;
pub use slice::{copy, copy_to_vec, relocate, relocate_to_vec};
pub use strategy::{ConstructDestruct, TransferKind, TransferStrategy, Trivial};
