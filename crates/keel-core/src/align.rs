//! Forward-alignment arithmetic for bump and header-prefixed allocators.
//!
//! Every function here works on addresses modelled as plain `usize`
//! values. An allocator asks for the adjustment at its cursor, advances
//! the cursor by it, and (for header-prefixed layouts) writes its header
//! into the bytes just before the aligned user block:
//!
//! ```text
//!  cursor                      cursor + adjustment
//!    │                                 │
//!    ▼                                 ▼
//!    ┌──────────── padding ───┬────────┬──────────────┐
//!    │        (unused)        │ header │  user block  │
//!    └────────────────────────┴────────┴──────────────┘
//!                              ◄──────►
//!                             header_size
//! ```
//!
//! Alignments must be powers of two. The raw functions check this with
//! `debug_assert!` only: they sit on the allocation fast path and a bad
//! alignment is a caller bug, not a runtime condition. Use [`Alignment`]
//! when the value comes from untrusted input.

use std::fmt;
use std::mem;

use crate::error::AlignError;

/// Bytes to add to `address` so that it becomes a multiple of `alignment`.
///
/// Returns 0 (not `alignment`) for an address that is already aligned, so
/// the result is always in `0..alignment`.
///
/// `alignment` must be a power of two.
///
/// ```
/// use keel_core::forward_adjustment;
///
/// assert_eq!(forward_adjustment(1000, 16), 8);
/// assert_eq!(forward_adjustment(1024, 16), 0);
/// ```
#[inline]
pub const fn forward_adjustment(address: usize, alignment: usize) -> usize {
    debug_assert!(
        alignment.is_power_of_two(),
        "alignment must be a power of two"
    );
    let adjustment = alignment - (address & (alignment - 1));
    if adjustment == alignment {
        0
    } else {
        adjustment
    }
}

/// Bytes to add to `address` so that it is aligned *and* at least
/// `header_size` bytes lie between `address` and the aligned result.
///
/// Alignment padding and header space are folded together: if the plain
/// adjustment already leaves room for the header, no further padding is
/// added. Otherwise the shortfall is rounded up to a whole number of
/// `alignment` steps, which keeps the result aligned.
///
/// With `header_size == 0` this is exactly [`forward_adjustment`].
///
/// ```
/// use keel_core::forward_adjustment_with_header;
///
/// // 1000 % 16 == 8: the 8 padding bytes already fit an 8-byte header.
/// assert_eq!(forward_adjustment_with_header(1000, 16, 8), 8);
/// // One more header byte costs a whole extra alignment step.
/// assert_eq!(forward_adjustment_with_header(1000, 16, 9), 24);
/// ```
#[inline]
pub const fn forward_adjustment_with_header(
    address: usize,
    alignment: usize,
    header_size: usize,
) -> usize {
    let mut adjustment = forward_adjustment(address, alignment);
    if adjustment < header_size {
        let shortfall = header_size - adjustment;
        adjustment += alignment * (shortfall / alignment);
        if shortfall & (alignment - 1) > 0 {
            adjustment += alignment;
        }
    }
    adjustment
}

/// `address` advanced to the next multiple of `alignment`.
#[inline]
pub const fn align_forward(address: usize, alignment: usize) -> usize {
    address + forward_adjustment(address, alignment)
}

/// Whether `address` is a multiple of `alignment`.
#[inline]
pub const fn is_aligned(address: usize, alignment: usize) -> bool {
    debug_assert!(
        alignment.is_power_of_two(),
        "alignment must be a power of two"
    );
    address & (alignment - 1) == 0
}

/// Round `value` up to the next multiple of `multiple`.
///
/// Unlike the alignment functions, `multiple` may be any non-zero value
/// (page granularities and record sizes are not always powers of two).
#[inline]
pub const fn round_up(value: usize, multiple: usize) -> usize {
    debug_assert!(multiple > 0, "round_up multiple must be non-zero");
    value.div_ceil(multiple) * multiple
}

/// A validated power-of-two alignment.
///
/// The free functions in this module trust their caller. `Alignment` is
/// the checked entry point for values read from configuration or test
/// plans; once constructed it can be used without further validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Alignment(usize);

impl Alignment {
    /// Byte alignment, the weakest possible requirement.
    pub const BYTE: Self = Self(1);

    /// Validate `value` as an alignment.
    pub const fn new(value: usize) -> Result<Self, AlignError> {
        if value == 0 {
            return Err(AlignError::Zero);
        }
        if !value.is_power_of_two() {
            return Err(AlignError::NotPowerOfTwo { value });
        }
        Ok(Self(value))
    }

    /// The alignment required by `T`.
    pub const fn of<T>() -> Self {
        Self(mem::align_of::<T>())
    }

    /// The alignment in bytes.
    pub const fn get(self) -> usize {
        self.0
    }

    /// See [`forward_adjustment`].
    pub const fn adjustment(self, address: usize) -> usize {
        forward_adjustment(address, self.0)
    }

    /// See [`forward_adjustment_with_header`].
    pub const fn adjustment_with_header(self, address: usize, header_size: usize) -> usize {
        forward_adjustment_with_header(address, self.0, header_size)
    }

    /// See [`align_forward`].
    pub const fn align(self, address: usize) -> usize {
        align_forward(address, self.0)
    }

    /// See [`is_aligned`].
    pub const fn is_aligned(self, address: usize) -> bool {
        is_aligned(address, self.0)
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::BYTE
    }
}

impl TryFrom<usize> for Alignment {
    type Error = AlignError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Alignment> for usize {
    fn from(a: Alignment) -> Self {
        a.0
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
