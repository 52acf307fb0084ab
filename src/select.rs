//! Timer-gated cyclic index
//!
//! A [`CyclicSelector`] points at one element of a collection it does not
//! own. Each tick the owner calls [`CyclicSelector::advance_if_due`]; when
//! the timer has come due the index moves on by one, wrapping to 0 after the
//! last element, and the timer is reset.
//!
//! The size is fixed at construction. If the collection grows or shrinks,
//! build a new selector.

use crate::time::{IntervalTimer, TimeSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclicSelector {
    current: usize,
    size: usize,
}

impl CyclicSelector {
    pub fn new(size: usize) -> Self {
        Self { current: 0, size }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Step once if `timer` is due, then reset it.
    ///
    /// Returns whether a due tick was consumed. An empty selector still
    /// consumes due ticks but its index stays at 0.
    pub fn advance_if_due<C: TimeSource>(&mut self, timer: &mut IntervalTimer<C>) -> bool {
        if !timer.is_time_up() {
            return false;
        }
        if self.size > 0 {
            self.current = (self.current + 1) % self.size;
            log::debug!("Selector advanced to {}/{}", self.current, self.size);
        }
        timer.reset();
        true
    }

    /// The selected element of `items`, if it is in range
    pub fn select<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        debug_assert_eq!(items.len(), self.size, "collection resized under selector");
        items.get(self.current)
    }
}
