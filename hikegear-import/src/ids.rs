//! Dense integer id allocation.
//!
//! Ids are handed out lowest-first from `[0, bound)`. The spaces are small
//! (1000 categories, 10000 items) and a batch is at most a few thousand rows,
//! so a linear scan is fine.

use std::collections::HashSet;

/// Return the lowest id in `[0, upper_bound)` not present in `used`.
///
/// Returns `None` when every id in the range is taken. The caller must record
/// the returned id before allocating again; see [`IdPool`].
pub fn allocate_id(used: &HashSet<u32>, upper_bound: u32) -> Option<u32> {
    (0..upper_bound).find(|id| !used.contains(id))
}

/// A used-id set bound to its id space.
#[derive(Debug, Clone)]
pub struct IdPool {
    used: HashSet<u32>,
    bound: u32,
    // Every id below `floor` is known to be taken.
    floor: u32,
}

impl IdPool {
    pub fn new(used: HashSet<u32>, bound: u32) -> Self {
        Self {
            used,
            bound,
            floor: 0,
        }
    }

    /// Allocate the lowest free id and mark it used.
    pub fn next(&mut self) -> Option<u32> {
        let id = (self.floor..self.bound).find(|id| !self.used.contains(id))?;
        self.used.insert(id);
        self.floor = id + 1;
        Some(id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.used.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_free_id_is_returned() {
        let used = HashSet::from([0, 1, 3]);
        assert_eq!(allocate_id(&used, 10), Some(2));
        assert_eq!(allocate_id(&HashSet::new(), 10), Some(0));
    }

    #[test]
    fn exhausted_space_reports_none() {
        let used: HashSet<u32> = (0..1000).collect();
        assert_eq!(allocate_id(&used, 1000), None);
    }

    #[test]
    fn ids_above_bound_do_not_count() {
        let used: HashSet<u32> = (0..5).chain([10, 11]).collect();
        assert_eq!(allocate_id(&used, 5), None);
        assert_eq!(allocate_id(&used, 6), Some(5));
    }

    #[test]
    fn zero_bound_never_allocates() {
        assert_eq!(allocate_id(&HashSet::new(), 0), None);
    }

    #[test]
    fn pool_fills_gaps_in_order() {
        let mut pool = IdPool::new(HashSet::from([1, 2, 4]), 6);
        assert_eq!(pool.next(), Some(0));
        assert_eq!(pool.next(), Some(3));
        assert_eq!(pool.next(), Some(5));
        assert_eq!(pool.next(), None);
        assert!(pool.contains(3));
        assert_eq!(pool.len(), 6);
    }

    #[test]
    fn pool_matches_repeated_allocate_id() {
        let seed = HashSet::from([0, 2, 5, 6, 9]);
        let mut used = seed.clone();
        let mut pool = IdPool::new(seed, 12);
        for _ in 0..8 {
            let expected = allocate_id(&used, 12);
            if let Some(id) = expected {
                used.insert(id);
            }
            assert_eq!(pool.next(), expected);
        }
    }
}
