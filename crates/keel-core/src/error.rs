//! Error types for validated alignment input.
//!
//! The adjustment functions in [`crate::align`] never return errors: a bad
//! alignment there is a caller bug caught by `debug_assert!`. These errors
//! exist for the validated [`Alignment`](crate::Alignment) constructor, used
//! where alignments come from configuration rather than from type layouts.

use std::error::Error;
use std::fmt;

/// Errors from constructing an [`Alignment`](crate::Alignment).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlignError {
    /// An alignment of zero was requested.
    Zero,
    /// The requested alignment is not a power of two.
    NotPowerOfTwo {
        /// The rejected value.
        value: usize,
    },
}

impl fmt::Display for AlignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "alignment must be non-zero"),
            Self::NotPowerOfTwo { value } => {
                write!(f, "alignment {value} is not a power of two")
            }
        }
    }
}

impl Error for AlignError {}
