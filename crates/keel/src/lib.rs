//! Keel: the primitives custom memory allocators are built on.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Keel sub-crates. For most users, adding `keel` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::mem::MaybeUninit;
//! use keel::prelude::*;
//!
//! // A bump cursor at 1000 wants a 16-aligned block behind an 8-byte header.
//! let adjustment = forward_adjustment_with_header(1000, 16, 8);
//! assert_eq!(adjustment, 8);
//!
//! // The allocator identifies the block by slot 0, generation 3.
//! enum BlockTag {}
//! let handle: Handle<BlockTag> = Handle::with_extra(0, 3);
//! assert_eq!(handle.packed(), 3 << 32);
//!
//! // On growth, relocate the old run with the strategy that fits its type.
//! let old = [1u32, 2, 3];
//! let mut grown = [MaybeUninit::<u32>::uninit(); 8];
//! let moved = copy::<Trivial, _>(&mut grown, &old, old.len());
//! assert_eq!(moved, &[1, 2, 3]);
//!
//! // Test harnesses draw reproducible sizes from a caller-owned generator.
//! let mut rng = Xorshift32::new(1);
//! assert_eq!(rng.next_u32(), 270_369);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`primitives`] | `keel-core` | Alignment engine, handles, PRNG, float helpers |
//! | [`transfer`] | `keel-transfer` | Trivial and construct/destruct element transfer |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Alignment arithmetic, handles and the PRNG (`keel-core`).
///
/// Most users only need the free adjustment functions, [`primitives::Handle`]
/// and [`primitives::Xorshift32`]; they are also in the [`prelude`].
pub use keel_core as primitives;

/// Typed bulk element transfer (`keel-transfer`).
///
/// Pick [`transfer::Trivial`] for `Copy` payloads and
/// [`transfer::ConstructDestruct`] for everything else.
pub use keel_transfer as transfer;

/// Common imports for typical Keel usage.
///
/// ```rust
/// use keel::prelude::*;
/// ```
pub mod prelude {
    // Alignment
    pub use keel_core::{
        align_forward, forward_adjustment, forward_adjustment_with_header, is_aligned, round_up,
        Alignment,
    };

    // Handles and generator
    pub use keel_core::{Handle, Xorshift32};

    // Errors
    pub use keel_core::AlignError;

    // Transfer
    pub use keel_transfer::{
        copy, copy_to_vec, relocate, relocate_to_vec, ConstructDestruct, TransferKind,
        TransferStrategy, Trivial,
    };
}
