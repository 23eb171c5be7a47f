//! Raw-pointer transfer entry points for allocator internals.
//!
//! These forward to a [`TransferStrategy`] after checking, in debug builds
//! only, that the two ranges are disjoint. Overlapping ranges are a caller
//! bug: a flat copy or a forward element walk over them corrupts data.

use std::mem;

use crate::strategy::TransferStrategy;

/// Whether `[a, a + count)` and `[b, b + count)` share any byte.
///
/// Empty runs and zero-sized element types never overlap.
pub fn ranges_overlap<T>(a: *const T, b: *const T, count: usize) -> bool {
    let size = mem::size_of::<T>();
    if count == 0 || size == 0 {
        return false;
    }
    let bytes = count.saturating_mul(size);
    let a = a as usize;
    let b = b as usize;
    a < b.saturating_add(bytes) && b < a.saturating_add(bytes)
}

/// Copy `count` elements from `src` to `dst` using strategy `S`.
///
/// # Safety
///
/// - `src` is valid for reads of `count` initialized elements.
/// - `dst` is valid for writes of `count` elements, and its previous
///   contents are not dropped.
/// - The ranges do not overlap (asserted in debug builds).
#[inline]
pub unsafe fn copy_raw<S, T>(dst: *mut T, src: *const T, count: usize)
where
    S: TransferStrategy<T>,
{
    debug_assert!(
        !ranges_overlap(dst.cast_const(), src, count),
        "copy_raw: source and destination overlap"
    );
    // SAFETY: forwarded from the caller's contract.
    unsafe { S::copy_run(dst, src, count) }
}

/// Relocate `count` elements from `src` to `dst` using strategy `S`.
///
/// # Safety
///
/// As [`copy_raw`]; additionally `src[..count]` is logically
/// uninitialized afterwards and must not be read or dropped again.
#[inline]
pub unsafe fn relocate_raw<S, T>(dst: *mut T, src: *mut T, count: usize)
where
    S: TransferStrategy<T>,
{
    debug_assert!(
        !ranges_overlap(dst.cast_const(), src.cast_const(), count),
        "relocate_raw: source and destination overlap"
    );
    // SAFETY: forwarded from the caller's contract.
    unsafe { S::relocate_run(dst, src, count) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{ConstructDestruct, Trivial};

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        let buf = [0u32; 8];
        let p = buf.as_ptr();
        // SAFETY: offsets stay within `buf`.
        let q = unsafe { p.add(4) };
        assert!(!ranges_overlap(p, q, 4));
        assert!(!ranges_overlap(q, p, 4));
    }

    #[test]
    fn shifted_ranges_overlap() {
        let buf = [0u32; 8];
        let p = buf.as_ptr();
        // SAFETY: offsets stay within `buf`.
        let q = unsafe { p.add(1) };
        assert!(ranges_overlap(p, q, 2));
        assert!(ranges_overlap(q, p, 2));
        assert!(ranges_overlap(p, p, 1));
    }

    #[test]
    fn empty_and_zero_sized_never_overlap() {
        let buf = [0u32; 4];
        assert!(!ranges_overlap(buf.as_ptr(), buf.as_ptr(), 0));
        let units = [(); 4];
        assert!(!ranges_overlap(units.as_ptr(), units.as_ptr(), 4));
    }

    #[test]
    fn copy_raw_trivial() {
        let src = [9u16, 8, 7];
        let mut dst = [0u16; 3];
        // SAFETY: distinct arrays of 3 elements each.
        unsafe { copy_raw::<Trivial, _>(dst.as_mut_ptr(), src.as_ptr(), 3) };
        assert_eq!(dst, [9, 8, 7]);
    }

    #[test]
    fn copy_raw_construct_destruct_leaves_source_intact() {
        let src = vec![String::from("a"), String::from("bc")];
        let mut dst = Vec::<String>::with_capacity(2);
        // SAFETY: `dst` has capacity 2 and is distinct from `src`.
        unsafe {
            copy_raw::<ConstructDestruct, _>(dst.as_mut_ptr(), src.as_ptr(), 2);
            dst.set_len(2);
        }
        assert_eq!(dst, src);
        assert_eq!(src[1], "bc");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "overlap")]
    fn overlapping_copy_asserts_in_debug() {
        let mut buf = [1u8, 2, 3, 4];
        let p = buf.as_mut_ptr();
        // SAFETY: the debug assertion fires before any memory is touched.
        unsafe { copy_raw::<Trivial, _>(p, p.add(1).cast_const(), 3) };
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "overlap")]
    fn overlapping_relocate_asserts_in_debug() {
        let mut buf = [1u8, 2, 3, 4];
        let p = buf.as_mut_ptr();
        // SAFETY: the debug assertion fires before any memory is touched.
        unsafe { relocate_raw::<Trivial, _>(p.add(1), p, 3) };
    }
}
