use super::OSRBTree;
use crate::compare::Natural;
use crate::raw::RawOSRBTree;

impl<K, V> OSRBTree<K, V> {
    /// Creates an empty tree with room for at least `capacity` values (and as many keys)
    /// before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree: OSRBTree<i32, i32> = OSRBTree::with_capacity(32);
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OSRBTree::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, V, C> OSRBTree<K, V, C> {
    /// Creates an empty tree ordered by `comparator`, with room for at least `capacity`
    /// values before reallocating.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        OSRBTree {
            raw: RawOSRBTree::with_capacity(capacity, comparator),
        }
    }

    /// Returns how many values the tree can hold without reallocating its value storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree: OSRBTree<i32, i32> = OSRBTree::with_capacity(32);
    /// assert!(tree.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
