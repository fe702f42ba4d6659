use super::OSRBTree;
use crate::compare::Comparator;
use crate::error::{Error, Violation};
use crate::policy::MergePolicy;

impl<K, V, C> OSRBTree<K, V, C> {
    /// Makes a structurally identical copy, cloning every key and value.
    ///
    /// Unlike [`Clone`], running out of memory is reported instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reserve`] if room for the copy could not be reserved. `self` is
    /// left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([(1, "a"), (2, "b"), (1, "c")]);
    /// let copy = tree.try_copy().unwrap();
    /// assert_eq!(copy, tree);
    /// assert!(copy.is_valid());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn try_copy(&self) -> Result<Self, Error>
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        self.try_deep_copy(|key| Ok(key.clone()), |value| Ok(value.clone()))
    }

    /// Makes a structurally identical copy, duplicating keys and values with the given
    /// fallible functions.
    ///
    /// The copy has the same shape, colors and subtree sizes as `self`.
    ///
    /// # Errors
    ///
    /// Returns the first error a duplicator reports, or [`Error::Reserve`] (converted into
    /// `E`) if room for the copy could not be reserved. Whatever was copied so far is
    /// dropped, and `self` is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTree};
    ///
    /// #[derive(Debug)]
    /// enum CopyError {
    ///     Tree(Error),
    ///     Empty,
    /// }
    ///
    /// impl From<Error> for CopyError {
    ///     fn from(error: Error) -> Self {
    ///         CopyError::Tree(error)
    ///     }
    /// }
    ///
    /// let tree = OSRBTree::from([(1, String::from("one")), (2, String::new())]);
    /// let copy = tree.try_deep_copy(
    ///     |key| Ok(*key),
    ///     |value: &String| if value.is_empty() { Err(CopyError::Empty) } else { Ok(value.to_uppercase()) },
    /// );
    /// assert!(matches!(copy, Err(CopyError::Empty)));
    /// ```
    pub fn try_deep_copy<E, FK, FV>(&self, dup_key: FK, dup_value: FV) -> Result<Self, E>
    where
        C: Clone,
        E: From<Error>,
        FK: FnMut(&K) -> Result<K, E>,
        FV: FnMut(&V) -> Result<V, E>,
    {
        Ok(OSRBTree {
            raw: self.raw.try_copy_with(dup_key, dup_value)?,
        })
    }

    /// Trims every key's chain down to its newest value, dropping the rest.
    ///
    /// Returns the number of values dropped. Running it again drops nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::from([(1, 'a'), (1, 'b'), (2, 'c')]);
    /// assert_eq!(tree.unique(), 1);
    /// assert_eq!(tree.get_all(&1).unwrap().collect::<Vec<_>>(), [&'b']);
    /// assert_eq!(tree.unique(), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn unique(&mut self) -> usize {
        self.raw.unique(|_, _| {})
    }

    /// Checks every structural invariant of the tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`Violation`] found while walking the keys in order.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    pub fn check(&self) -> Result<(), Violation>
    where
        C: Comparator<K>,
    {
        self.raw.check()
    }

    /// Returns `true` if [`check`](OSRBTree::check) finds nothing wrong.
    #[must_use]
    pub fn is_valid(&self) -> bool
    where
        C: Comparator<K>,
    {
        self.check().is_ok()
    }
}

impl<K, V, C: Comparator<K>> OSRBTree<K, V, C> {
    /// Moves every key and its values out of `other` and into `self`, leaving `other`
    /// empty.
    ///
    /// With [`MergePolicy::Repeat`], values for a key both trees hold go in front of the
    /// ones already in `self`. With [`MergePolicy::Unique`] they are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reserve`] if room for the incoming entries could not be reserved.
    /// Neither tree is changed in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{MergePolicy, OSRBTree};
    ///
    /// let mut a = OSRBTree::from([('a', 1), ('b', 1), ('c', 1)]);
    /// let mut b = OSRBTree::from([('a', 2), ('b', 2), ('c', 2), ('d', 2)]);
    /// a.merge(&mut b, MergePolicy::Repeat).unwrap();
    /// assert_eq!(a.len(), 7);
    /// assert_eq!(a.get(&'a'), Some(&2));
    /// assert!(b.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m log(n + m)) for `m` keys in `other`.
    pub fn merge<C2>(&mut self, other: &mut OSRBTree<K, V, C2>, policy: MergePolicy) -> Result<(), Error> {
        self.raw.merge(&mut other.raw, policy)
    }

    /// Trims every key's chain down to its newest value, moving the rest into `collector`
    /// under a clone of their key.
    ///
    /// Moved values keep their order and go in front of anything `collector` already holds
    /// for that key. Returns the number of values moved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reserve`] if room in `collector` could not be reserved. Neither tree
    /// is changed in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::from([(1, 'a'), (1, 'b'), (1, 'c'), (2, 'd')]);
    /// let mut extras = OSRBTree::new();
    /// assert_eq!(tree.unique_into(&mut extras), Ok(2));
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(extras.get_all(&1).unwrap().collect::<Vec<_>>(), [&'b', &'a']);
    /// ```
    pub fn unique_into<C2>(&mut self, collector: &mut OSRBTree<K, V, C2>) -> Result<usize, Error>
    where
        K: Clone,
        C2: Comparator<K>,
    {
        let (keys, values) = self.raw.duplicate_counts();
        collector.raw.try_reserve(keys, values)?;
        Ok(self.raw.unique(|key, extras| {
            collector.raw.put_chain(key.clone(), extras, MergePolicy::Repeat);
        }))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use crate::raw::Handle;
    use alloc::vec::Vec;

    #[test]
    fn unique_into_full_collector_changes_nothing() {
        let mut collector: OSRBTree<u32, u32> = (0..(Handle::MAX - 4) as u32).map(|k| (k, k)).collect();
        let mut tree: OSRBTree<u32, u32> = (0..10).flat_map(|k| [(k, 1), (k, 2)]).collect();
        let tree_before: Vec<(u32, Vec<u32>)> = tree.iter().map(|(k, values)| (*k, values.copied().collect())).collect();

        assert_eq!(
            tree.unique_into(&mut collector),
            Err(Error::Reserve { what: "nodes", additional: 10 })
        );
        assert_eq!(tree.len(), 20);
        assert_eq!(tree.key_count(), 10);
        assert_eq!(
            tree.iter().map(|(k, values)| (*k, values.copied().collect())).collect::<Vec<_>>(),
            tree_before
        );
        assert_eq!(collector.len(), Handle::MAX - 4);
        assert_eq!(collector.key_count(), Handle::MAX - 4);
        assert_eq!(tree.check(), Ok(()));
        assert_eq!(collector.check(), Ok(()));
    }

    #[test]
    fn unique_into_with_room_moves_tails() {
        let mut collector: OSRBTree<u32, u32> = OSRBTree::from([(3, 30)]);
        let mut tree: OSRBTree<u32, u32> = OSRBTree::from([(3, 1), (3, 2), (3, 3), (4, 4)]);
        assert_eq!(tree.unique_into(&mut collector), Ok(2));
        assert_eq!(tree.len(), 2);
        assert_eq!(collector.get_all(&3).map(|values| values.copied().collect::<Vec<_>>()), Some(alloc::vec![2, 1, 30]));
        assert!(tree.is_valid());
        assert!(collector.is_valid());
    }
}
