//! Hand-rolled shared instance counter.

use std::cell::Cell;
use std::rc::Rc;

/// Counts how many clones of a value are alive.
///
/// Every clone shares one counter. [`RefCounted::is_last`] tells the owner
/// whether it is the final instance, which is the moment a wrapper should
/// release its driver resource.
///
/// The counter is a plain `Cell<usize>` behind an `Rc`, so `RefCounted` is
/// neither `Send` nor `Sync`. GL names are only meaningful on the thread that
/// owns the context, and the type system now enforces that.
#[derive(Debug)]
pub struct RefCounted {
    instances: Rc<Cell<usize>>,
}

impl RefCounted {
    pub fn new() -> Self {
        Self {
            instances: Rc::new(Cell::new(1)),
        }
    }

    /// Number of live instances sharing this counter.
    pub fn count(&self) -> usize {
        self.instances.get()
    }

    /// Returns true if this is the only live instance.
    pub fn is_last(&self) -> bool {
        self.instances.get() == 1
    }
}

impl Default for RefCounted {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RefCounted {
    fn clone(&self) -> Self {
        self.instances.set(self.instances.get() + 1);
        Self {
            instances: Rc::clone(&self.instances),
        }
    }
}

impl Drop for RefCounted {
    fn drop(&mut self) {
        self.instances.set(self.instances.get() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_counter_is_last() {
        let counter = RefCounted::new();
        assert_eq!(counter.count(), 1);
        assert!(counter.is_last());
    }

    #[test]
    fn clones_share_the_count() {
        let a = RefCounted::new();
        let b = a.clone();
        let c = b.clone();
        assert_eq!(a.count(), 3);
        assert!(!c.is_last());

        drop(b);
        assert_eq!(a.count(), 2);
        drop(a);
        assert!(c.is_last());
    }
}
