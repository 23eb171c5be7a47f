//! Slice-level transfer: the entry points allocators and containers use.
//!
//! Destinations are `MaybeUninit` slices, so nothing already in them is
//! dropped and a partially-filled destination is never double-dropped.
//! Borrowing rules make source and destination disjoint by construction.

use std::mem::MaybeUninit;
use std::slice;

use crate::strategy::TransferStrategy;

/// Copy `src[..count]` into `dst[..count]` and return the initialized
/// destination run.
///
/// With `count == 0` neither buffer is touched.
///
/// # Panics
///
/// Panics if `count` exceeds the length of either slice.
///
/// ```
/// use std::mem::MaybeUninit;
/// use keel_transfer::{copy, Trivial};
///
/// let src = [1u32, 2, 3];
/// let mut dst = [MaybeUninit::<u32>::uninit(); 4];
/// let out = copy::<Trivial, _>(&mut dst, &src, 3);
/// assert_eq!(out, &[1, 2, 3]);
/// ```
pub fn copy<'d, S, T>(dst: &'d mut [MaybeUninit<T>], src: &[T], count: usize) -> &'d mut [T]
where
    S: TransferStrategy<T>,
{
    let dst = &mut dst[..count];
    let src = &src[..count];
    let out = dst.as_mut_ptr().cast::<T>();
    // SAFETY: both runs hold `count` elements, `src` is initialized, and
    // the borrows guarantee they do not overlap. After `copy_run` every
    // element of `dst[..count]` is initialized.
    unsafe {
        S::copy_run(out, src.as_ptr(), count);
        slice::from_raw_parts_mut(out, count)
    }
}

/// Move `src[..count]` into `dst[..count]` and return the initialized
/// destination run.
///
/// With `count == 0` neither buffer is touched.
///
/// # Safety
///
/// `src[..count]` must be initialized. Afterwards it is uninitialized: the
/// caller must not read it or drop it again.
///
/// # Panics
///
/// Panics if `count` exceeds the length of either slice.
pub unsafe fn relocate<'d, S, T>(
    dst: &'d mut [MaybeUninit<T>],
    src: &mut [MaybeUninit<T>],
    count: usize,
) -> &'d mut [T]
where
    S: TransferStrategy<T>,
{
    let dst = &mut dst[..count];
    let src = &mut src[..count];
    let out = dst.as_mut_ptr().cast::<T>();
    // SAFETY: lengths checked above, initialization of `src` is the
    // caller's contract, and the borrows make the runs disjoint.
    unsafe {
        S::relocate_run(out, src.as_mut_ptr().cast::<T>(), count);
        slice::from_raw_parts_mut(out, count)
    }
}

/// Duplicate `src` into a new vector with room for at least `capacity`
/// elements.
pub fn copy_to_vec<S, T>(src: &[T], capacity: usize) -> Vec<T>
where
    S: TransferStrategy<T>,
{
    let mut out = Vec::with_capacity(capacity.max(src.len()));
    let len = src.len();
    copy::<S, T>(out.spare_capacity_mut(), src, len);
    // SAFETY: `copy` initialized the first `len` spare slots.
    unsafe { out.set_len(len) };
    out
}

/// Move every element of `src` into a new vector with room for at least
/// `capacity` elements, releasing `src`'s allocation.
///
/// This is the growth path of a hand-managed buffer: the old elements are
/// relocated (and, for [`ConstructDestruct`](crate::ConstructDestruct),
/// dropped one by one) rather than reallocated in place.
pub fn relocate_to_vec<S, T>(mut src: Vec<T>, capacity: usize) -> Vec<T>
where
    S: TransferStrategy<T>,
{
    let len = src.len();
    let mut out = Vec::with_capacity(capacity.max(len));
    // SAFETY: `src[..len]` is initialized. Its length is zeroed first so
    // that neither a panicking clone nor the final drop of `src` touches
    // elements `relocate_run` has consumed; only the allocation is freed.
    unsafe {
        src.set_len(0);
        S::relocate_run(out.as_mut_ptr(), src.as_mut_ptr(), len);
        out.set_len(len);
    }
    out
}
