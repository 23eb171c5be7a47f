//! Transfer strategies: how a run of elements is copied or relocated.
//!
//! The caller picks a strategy once, at the call site, from what it knows
//! about the element type:
//!
//! - [`Trivial`] for `Copy` types. Both operations are one flat byte copy.
//! - [`ConstructDestruct`] for `Clone` types. Each element is cloned into
//!   place; relocation then drops the source element before moving on.
//!
//! A `Copy` type may use either strategy; the result is the same, only
//! the cost differs.

use std::fmt;
use std::mem;
use std::ptr;

mod private {
    pub trait Sealed {}
}

/// Which kind of transfer a strategy performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransferKind {
    /// Flat byte copy, no per-element work.
    Trivial,
    /// Per-element clone, plus per-element drop of the source on relocate.
    ConstructDestruct,
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trivial => write!(f, "trivial"),
            Self::ConstructDestruct => write!(f, "construct-destruct"),
        }
    }
}

/// A way of transferring runs of `T`.
///
/// Sealed: the safe entry points in this crate rely on every
/// implementation fully initializing the destination run.
pub trait TransferStrategy<T>: private::Sealed {
    /// The kind of transfer this strategy performs.
    const KIND: TransferKind;

    /// Write `count` copies of `src[..count]` to `dst[..count]`.
    ///
    /// # Safety
    ///
    /// - `src` is valid for reads of `count` initialized elements.
    /// - `dst` is valid for writes of `count` elements.
    /// - The two ranges do not overlap.
    ///
    /// Any previous contents of `dst` are overwritten without being dropped.
    unsafe fn copy_run(dst: *mut T, src: *const T, count: usize);

    /// Move `src[..count]` to `dst[..count]`, leaving the source
    /// logically uninitialized.
    ///
    /// # Safety
    ///
    /// As [`copy_run`](TransferStrategy::copy_run), and additionally `src`
    /// is valid for writes: the caller must treat `src[..count]` as
    /// uninitialized afterwards and must not drop those elements again.
    unsafe fn relocate_run(dst: *mut T, src: *mut T, count: usize);
}

/// Flat byte copy for `Copy` element types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Trivial;

impl private::Sealed for Trivial {}

impl<T: Copy> TransferStrategy<T> for Trivial {
    const KIND: TransferKind = TransferKind::Trivial;

    #[inline]
    unsafe fn copy_run(dst: *mut T, src: *const T, count: usize) {
        // SAFETY: forwarded from the caller's contract.
        unsafe { ptr::copy_nonoverlapping(src, dst, count) }
    }

    #[inline]
    unsafe fn relocate_run(dst: *mut T, src: *mut T, count: usize) {
        // `Copy` types have no drop glue: there is no destruction step.
        // SAFETY: forwarded from the caller's contract.
        unsafe { ptr::copy_nonoverlapping(src.cast_const(), dst, count) }
    }
}

/// Per-element clone (and drop, on relocate) for `Clone` element types.
///
/// On `copy`, exactly `count` clones run, in ascending index order, and
/// the source is untouched. On `relocate`, element `i` is cloned into the
/// destination and the source element `i` is dropped before element
/// `i + 1` is visited.
///
/// If a clone panics, destination elements already written are leaked
/// rather than dropped. During `relocate`, source elements before the
/// panicking index have already been dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConstructDestruct;

impl private::Sealed for ConstructDestruct {}

impl<T: Clone> TransferStrategy<T> for ConstructDestruct {
    const KIND: TransferKind = TransferKind::ConstructDestruct;

    unsafe fn copy_run(dst: *mut T, src: *const T, count: usize) {
        for i in 0..count {
            // SAFETY: `i < count`; the caller guarantees both ranges are
            // valid for `count` elements and `src` is initialized.
            unsafe {
                let value = (*src.add(i)).clone();
                dst.add(i).write(value);
            }
        }
    }

    unsafe fn relocate_run(dst: *mut T, src: *mut T, count: usize) {
        for i in 0..count {
            // SAFETY: as in `copy_run`. Each source element is dropped
            // exactly once, right after its clone has been written, and
            // the caller treats the source as uninitialized afterwards.
            unsafe {
                let s = src.add(i);
                dst.add(i).write((*s).clone());
                if mem::needs_drop::<T>() {
                    ptr::drop_in_place(s);
                }
            }
        }
    }
}
