//! Packed 64-bit resource handles.
//!
//! A [`Handle`] names a slot-addressed resource: a block in an arena, an
//! entry in a pool, a window in a window table. It is a pair of `u32`s,
//! `index` and `extra_index`, compared and hashed through one derived
//! `u64` key so copies and lookups stay a single machine word.
//!
//! Handles carry no ownership and do no validation. The allocator that
//! issued a handle owns the resource and decides what `extra_index` means;
//! the usual choice is a slot generation, so that a handle to a recycled
//! slot can be recognised as stale.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A tagged `(index, extra_index)` pair packed into a `u64` key.
///
/// `Tag` is a marker type that keeps handles for different resource kinds
/// apart at compile time. It is never instantiated and needs no trait
/// impls:
///
/// ```
/// use keel_core::Handle;
///
/// enum BlockTag {}
/// type BlockHandle = Handle<BlockTag>;
///
/// let a = BlockHandle::new(7);
/// let b = BlockHandle::with_extra(7, 0);
/// assert_eq!(a, b);
/// assert_ne!(a, BlockHandle::with_extra(7, 1));
/// ```
#[must_use]
pub struct Handle<Tag> {
    index: u32,
    extra_index: u32,
    _tag: PhantomData<fn() -> Tag>,
}

impl<Tag> Handle<Tag> {
    /// A handle for `index` with `extra_index` 0.
    pub const fn new(index: u32) -> Self {
        Self::with_extra(index, 0)
    }

    /// A handle for `index` carrying an auxiliary tag.
    pub const fn with_extra(index: u32, extra_index: u32) -> Self {
        Self {
            index,
            extra_index,
            _tag: PhantomData,
        }
    }

    /// Rebuild a handle from its packed key.
    pub const fn from_packed(packed: u64) -> Self {
        Self::with_extra(packed as u32, (packed >> 32) as u32)
    }

    /// The primary slot index.
    pub const fn index(self) -> u32 {
        self.index
    }

    /// The auxiliary tag, 0 unless the issuer set one.
    pub const fn extra_index(self) -> u32 {
        self.extra_index
    }

    /// The 64-bit comparison key: `index` in the low half, `extra_index`
    /// in the high half.
    pub const fn packed(self) -> u64 {
        ((self.extra_index as u64) << 32) | self.index as u64
    }
}

// Manual impls: derives would demand the same traits of `Tag`.

impl<Tag> Clone for Handle<Tag> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Tag> Copy for Handle<Tag> {}

impl<Tag> PartialEq for Handle<Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.packed() == other.packed()
    }
}

impl<Tag> Eq for Handle<Tag> {}

impl<Tag> Hash for Handle<Tag> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.packed().hash(state);
    }
}

impl<Tag> PartialOrd for Handle<Tag> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Tag> Ord for Handle<Tag> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.packed().cmp(&other.packed())
    }
}

impl<Tag> fmt::Debug for Handle<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("index", &self.index)
            .field("extra_index", &self.extra_index)
            .finish()
    }
}

impl<Tag> fmt::Display for Handle<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}:{})", self.index, self.extra_index)
    }
}

impl<Tag> From<Handle<Tag>> for u64 {
    fn from(h: Handle<Tag>) -> Self {
        h.packed()
    }
}

impl<Tag> From<u64> for Handle<Tag> {
    fn from(packed: u64) -> Self {
        Self::from_packed(packed)
    }
}
