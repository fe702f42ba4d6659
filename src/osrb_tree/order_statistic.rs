use core::ops::Index;

use super::OSRBTree;
use crate::Rank;
use crate::compare::Comparator;
use crate::policy::Removed;

impl<K, V, C> OSRBTree<K, V, C> {
    /// Returns the key whose chain covers position `rank` in sorted order.
    ///
    /// The rank is zero-based and counts values, so every rank inside one key's chain
    /// selects that same key. Returns `None` if `rank` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([("b", 1), ("a", 2), ("b", 3)]);
    /// assert_eq!(tree.select(0), Some(&"a"));
    /// assert_eq!(tree.select(1), Some(&"b"));
    /// assert_eq!(tree.select(2), Some(&"b"));
    /// assert_eq!(tree.select(3), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn select(&self, rank: usize) -> Option<&K> {
        self.raw.select(rank).map(|(h, _)| &self.raw.node(h).key)
    }

    /// Returns the key and the exact value at position `rank` in sorted order.
    ///
    /// Within one key, values are ranked newest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([("b", 1), ("a", 2), ("b", 3)]);
    /// assert_eq!(tree.get_by_rank(1), Some((&"b", &3)));
    /// assert_eq!(tree.get_by_rank(2), Some((&"b", &1)));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n + chain length)
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let (handle, offset) = self.raw.select(rank)?;
        let node = self.raw.node(handle);
        node.chain.nth(self.raw.cells(), offset).map(|value| (&node.key, value))
    }
}

impl<K, V, C: Comparator<K>> OSRBTree<K, V, C> {
    /// Returns how many values are stored under keys strictly less than `key`, or `None`
    /// if `key` is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree: OSRBTree<&str, ()> = ["5", "3", "8", "1", "9", "4", "6"].into_iter().map(|k| (k, ())).collect();
    /// assert_eq!(tree.rank_of(&"6"), Some(4));
    /// assert_eq!(tree.rank_of(&"7"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank_of(&self, key: &K) -> Option<usize> {
        self.raw.rank_of(key)
    }

    /// Removes the value at position `rank` in sorted order.
    ///
    /// The key goes with it if that was its last value, reported as [`Removed::Entry`].
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{OSRBTree, Removed};
    ///
    /// let mut tree = OSRBTree::from([("b", 1), ("a", 2), ("b", 3)]);
    /// assert_eq!(tree.remove_by_rank(2), Some(Removed::Value(1)));
    /// assert_eq!(tree.remove_by_rank(0), Some(Removed::Entry("a", Some(2))));
    /// assert_eq!(tree.remove_by_rank(1), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n + chain length)
    pub fn remove_by_rank(&mut self, rank: usize) -> Option<Removed<K, V>> {
        self.raw.remove_by_rank(rank)
    }
}

/// Indexes into the tree by rank, yielding the key.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTree, Rank};
///
/// let tree = OSRBTree::from([("a", 1), ("b", 2)]);
/// assert_eq!(tree[Rank(1)], "b");
/// ```
impl<K, V, C> Index<Rank> for OSRBTree<K, V, C> {
    type Output = K;

    fn index(&self, rank: Rank) -> &K {
        self.select(rank.0).expect("index out of bounds")
    }
}
