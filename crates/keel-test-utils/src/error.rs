//! Fixture-specific error types.

use std::error::Error;
use std::fmt;

use keel_core::AlignError;

/// Errors from the fixture allocators and the stress harness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FixtureError {
    /// The backing buffer cannot hold the request.
    OutOfSpace {
        /// Bytes the request needs, padding and header included.
        requested: usize,
        /// Bytes left after the cursor.
        remaining: usize,
    },
    /// The handle's generation does not match the slot's current one:
    /// the slot was released (and possibly reused) after the handle was
    /// issued.
    StaleHandle {
        /// Slot index encoded in the handle.
        index: u32,
        /// Generation encoded in the handle.
        handle_generation: u32,
        /// Generation the slot is at now.
        current_generation: u32,
    },
    /// The handle names a slot that was never issued.
    UnknownHandle {
        /// Slot index encoded in the handle.
        index: u32,
    },
    /// A configured alignment is unusable.
    InvalidAlignment(AlignError),
    /// A configuration value is out of range.
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfSpace {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "out of space: requested {requested} bytes, {remaining} bytes remaining"
                )
            }
            Self::StaleHandle {
                index,
                handle_generation,
                current_generation,
            } => {
                write!(
                    f,
                    "stale handle: slot {index} generation {handle_generation}, \
                     current {current_generation}"
                )
            }
            Self::UnknownHandle { index } => write!(f, "unknown handle: slot {index}"),
            Self::InvalidAlignment(err) => write!(f, "invalid alignment: {err}"),
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
        }
    }
}

impl Error for FixtureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidAlignment(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AlignError> for FixtureError {
    fn from(err: AlignError) -> Self {
        Self::InvalidAlignment(err)
    }
}
