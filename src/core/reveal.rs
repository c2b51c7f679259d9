//! One-shot scroll reveal bookkeeping

use std::collections::HashSet;
use std::hash::Hash;

/// Fraction of an element that must be visible before it is revealed
pub const REVEAL_THRESHOLD: f64 = 0.15;

/// Tracks elements still waiting to become visible
#[derive(Debug, Clone)]
pub struct RevealTracker<K> {
    pending: HashSet<K>,
}

impl<K: Eq + Hash> Default for RevealTracker<K> {
    fn default() -> Self {
        Self { pending: HashSet::new() }
    }
}

impl<K: Eq + Hash> RevealTracker<K> {
    pub fn new() -> Self { Self::default() }

    pub fn observe(&mut self, key: K) {
        self.pending.insert(key);
    }

    /// True exactly once per element: the first intersecting notification.
    /// The caller then adds the visible class and unobserves.
    pub fn on_intersection(&mut self, key: &K, intersecting: bool) -> bool {
        intersecting && self.pending.remove(key)
    }

    pub fn pending(&self) -> usize { self.pending.len() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_once() {
        let mut t = RevealTracker::new();
        t.observe(1u32);
        t.observe(2u32);
        assert!(!t.on_intersection(&1, false));
        assert!(t.on_intersection(&1, true));
        assert!(!t.on_intersection(&1, true));
        assert_eq!(t.pending(), 1);
    }

    #[test]
    fn unknown_elements_ignored() {
        let mut t: RevealTracker<u32> = RevealTracker::new();
        assert!(!t.on_intersection(&9, true));
    }
}
