//! Clone/drop counting element type for transfer tests.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Shared clone and drop counters.
#[derive(Clone, Default)]
pub struct TransferCounter {
    clones: Rc<Cell<usize>>,
    drops: Rc<Cell<usize>>,
}

impl TransferCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `value` in a [`Tracked`] reporting to this counter.
    pub fn track(&self, value: u32) -> Tracked {
        Tracked {
            value,
            counter: self.clone(),
        }
    }

    /// Clones observed so far.
    pub fn clones(&self) -> usize {
        self.clones.get()
    }

    /// Drops observed so far.
    pub fn drops(&self) -> usize {
        self.drops.get()
    }

    /// Zero both counters.
    pub fn reset(&self) {
        self.clones.set(0);
        self.drops.set(0);
    }
}

/// A non-trivial element: every clone and drop is counted.
///
/// Equality compares only the payload, so a relocated element equals the
/// original it was cloned from.
pub struct Tracked {
    value: u32,
    counter: TransferCounter,
}

impl Tracked {
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.counter.clones.set(self.counter.clones.get() + 1);
        Self {
            value: self.value,
            counter: self.counter.clone(),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counter.drops.set(self.counter.drops.get() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}
