//! Generational slot pool fixture.
//!
//! [`SlotPool`] shows the handle policy Keel allocators follow: the slot
//! index goes in `index`, the slot's generation goes in `extra_index`,
//! and releasing a slot bumps its generation so old handles are rejected.
//! When the slot array is full it grows by relocating every slot into a
//! larger buffer with [`ConstructDestruct`].

use std::mem;

use keel_core::Handle;
use keel_transfer::{relocate_to_vec, ConstructDestruct};

use crate::error::FixtureError;

/// Marker for [`SlotHandle`].
pub enum SlotTag {}

/// Handle to a value in a [`SlotPool`].
pub type SlotHandle = Handle<SlotTag>;

#[derive(Clone, Debug)]
struct Slot<T> {
    value: Option<T>,
    generation: u32,
}

/// A fixed-growth pool of `T` addressed by generational handles.
///
/// Growth clones every slot into the new buffer and drops the old one, so
/// `T: Clone` is required and each growth costs one clone per live slot.
/// This is the [`ConstructDestruct`] relocation path under test.
pub struct SlotPool<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    len: usize,
    grow_count: usize,
}

impl<T: Clone> SlotPool<T> {
    /// Slot count of the first buffer when none was requested.
    pub const MIN_CAPACITY: usize = 4;

    /// Create a pool with room for `capacity` values before it first grows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.max(Self::MIN_CAPACITY)),
            free_list: Vec::new(),
            len: 0,
            grow_count: 0,
        }
    }

    /// Store `value` and return its handle.
    ///
    /// Released slots are reused before the pool grows.
    pub fn insert(&mut self, value: T) -> SlotHandle {
        self.len += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return SlotHandle::with_extra(index, slot.generation);
        }
        if self.slots.len() == self.slots.capacity() {
            self.grow();
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            value: Some(value),
            generation: 0,
        });
        SlotHandle::with_extra(index, 0)
    }

    /// The value behind `handle`.
    pub fn get(&self, handle: SlotHandle) -> Result<&T, FixtureError> {
        let slot = self.slot(handle)?;
        slot.value.as_ref().ok_or(FixtureError::UnknownHandle {
            index: handle.index(),
        })
    }

    /// The value behind `handle`, mutably.
    pub fn get_mut(&mut self, handle: SlotHandle) -> Result<&mut T, FixtureError> {
        self.slot(handle)?;
        self.slots[handle.index() as usize]
            .value
            .as_mut()
            .ok_or(FixtureError::UnknownHandle {
                index: handle.index(),
            })
    }

    /// Take the value out and release the slot. `handle` becomes stale.
    pub fn remove(&mut self, handle: SlotHandle) -> Result<T, FixtureError> {
        self.slot(handle)?;
        let slot = &mut self.slots[handle.index() as usize];
        let value = slot.value.take().ok_or(FixtureError::UnknownHandle {
            index: handle.index(),
        })?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index());
        self.len -= 1;
        log::trace!(
            "pool release: slot {} now generation {}",
            handle.index(),
            slot.generation
        );
        Ok(value)
    }

    /// Whether `handle` still names a live value.
    pub fn contains(&self, handle: SlotHandle) -> bool {
        self.get(handle).is_ok()
    }

    /// Live values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the pool holds no live values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slots the current buffer can hold.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// How many times the slot buffer has been relocated.
    pub fn grow_count(&self) -> usize {
        self.grow_count
    }

    fn slot(&self, handle: SlotHandle) -> Result<&Slot<T>, FixtureError> {
        let slot = self
            .slots
            .get(handle.index() as usize)
            .ok_or(FixtureError::UnknownHandle {
                index: handle.index(),
            })?;
        if slot.generation != handle.extra_index() {
            return Err(FixtureError::StaleHandle {
                index: handle.index(),
                handle_generation: handle.extra_index(),
                current_generation: slot.generation,
            });
        }
        Ok(slot)
    }

    fn grow(&mut self) {
        let new_capacity = (self.slots.capacity() * 2).max(Self::MIN_CAPACITY);
        log::debug!(
            "pool grow: {} -> {} slots",
            self.slots.capacity(),
            new_capacity
        );
        let old = mem::take(&mut self.slots);
        self.slots = relocate_to_vec::<ConstructDestruct, _>(old, new_capacity);
        self.grow_count += 1;
    }
}

impl<T: Clone> Default for SlotPool<T> {
    fn default() -> Self {
        Self::with_capacity(Self::MIN_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracked::TransferCounter;

    #[test]
    fn insert_and_get() {
        let mut pool = SlotPool::default();
        let a = pool.insert("alpha".to_string());
        let b = pool.insert("beta".to_string());
        assert_eq!(pool.get(a).unwrap(), "alpha");
        assert_eq!(pool.get(b).unwrap(), "beta");
        assert_eq!(pool.len(), 2);
        assert_eq!(a.extra_index(), 0);
    }

    #[test]
    fn removed_handle_is_stale() {
        let mut pool = SlotPool::default();
        let h = pool.insert(7u32);
        assert_eq!(pool.remove(h), Ok(7));
        assert!(pool.is_empty());
        assert_eq!(
            pool.get(h),
            Err(FixtureError::StaleHandle {
                index: 0,
                handle_generation: 0,
                current_generation: 1,
            })
        );
        assert!(pool.remove(h).is_err());
    }

    #[test]
    fn recycled_slot_gets_new_generation() {
        let mut pool = SlotPool::default();
        let old = pool.insert(1u32);
        pool.remove(old).unwrap();
        let new = pool.insert(2u32);
        assert_eq!(new.index(), old.index());
        assert_eq!(new.extra_index(), 1);
        assert_ne!(new, old);
        assert!(!pool.contains(old));
        assert_eq!(*pool.get(new).unwrap(), 2);
    }

    #[test]
    fn growth_relocates_values() {
        let mut pool = SlotPool::with_capacity(4);
        let handles: Vec<_> = (0..20).map(|i| pool.insert(format!("v{i}"))).collect();
        assert!(pool.grow_count() >= 2);
        assert!(pool.capacity() >= 20);
        for (i, h) in handles.iter().enumerate() {
            assert_eq!(pool.get(*h).unwrap(), &format!("v{i}"));
        }
    }

    #[test]
    fn growth_clones_and_drops_each_slot_once() {
        let counter = TransferCounter::new();
        let mut pool = SlotPool::with_capacity(4);
        let filled = pool.capacity();
        for v in 0..filled as u32 {
            pool.insert(counter.track(v));
        }
        assert_eq!(counter.clones(), 0);

        pool.insert(counter.track(99));
        assert_eq!(pool.grow_count(), 1);
        assert_eq!(counter.clones(), filled);
        assert_eq!(counter.drops(), filled);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut pool = SlotPool::default();
        let h = pool.insert(vec![1u8]);
        pool.get_mut(h).unwrap().push(2);
        assert_eq!(pool.get(h).unwrap(), &vec![1, 2]);
    }

    #[test]
    fn never_issued_index_is_unknown() {
        let pool: SlotPool<u8> = SlotPool::default();
        assert_eq!(
            pool.get(SlotHandle::new(9)),
            Err(FixtureError::UnknownHandle { index: 9 })
        );
    }
}
