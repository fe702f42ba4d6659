//! How insertions and merges treat a key that is already present, and what they report.

/// Duplicate handling for [`OSRBTree::put`](crate::OSRBTree::put).
///
/// A key that is not yet in the tree always gets a new node, whatever the policy.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Policy {
    /// Push the value onto the front of the key's chain.
    #[default]
    Repeat,
    /// Leave the tree untouched and hand the key and value back.
    Unique,
    /// Pop the front value, hand it back to the caller, and push the new value.
    Replace,
    /// Pop the front value, drop it, and push the new value.
    DeepReplace,
}

/// Duplicate handling for [`OSRBTree::merge`](crate::OSRBTree::merge).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum MergePolicy {
    /// Put the incoming chain in front of the existing one.
    #[default]
    Repeat,
    /// Keep the existing chain and drop the incoming entry.
    Unique,
}

/// The outcome of [`OSRBTree::put`](crate::OSRBTree::put).
#[derive(Debug, Eq, PartialEq)]
#[must_use = "a rejected put hands its key and value back"]
pub enum Put<K, V> {
    /// The key was absent; a new node now holds it.
    Inserted,
    /// The value went onto the front of the existing chain.
    Chained,
    /// Nothing changed. The key was present and either the policy was [`Policy::Unique`]
    /// or there was no value to chain.
    Rejected {
        /// The key that was not stored.
        key: K,
        /// The value that was not stored.
        value: Option<V>,
    },
    /// The front of the chain was replaced. Holds the displaced value under
    /// [`Policy::Replace`]; `None` if the chain was empty or the policy dropped it.
    Replaced(Option<V>),
}

/// What a single-value removal took out of the tree.
#[derive(Debug, Eq, PartialEq)]
pub enum Removed<K, V> {
    /// A value was unlinked and its key still has others.
    Value(V),
    /// The key's last value (if it had any) was removed and the key left the tree with it.
    Entry(K, Option<V>),
}

impl<K, V> Removed<K, V> {
    /// The removed value, dropping the key if it came along.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::from([("k", 1), ("k", 2)]);
    /// let first = tree.remove_one(&"k").unwrap();
    /// assert!(!first.collapsed());
    /// assert_eq!(first.into_value(), Some(2));
    ///
    /// let last = tree.remove_one(&"k").unwrap();
    /// assert!(last.collapsed());
    /// assert_eq!(last.into_value(), Some(1));
    /// ```
    #[must_use]
    pub fn into_value(self) -> Option<V> {
        match self {
            Removed::Value(value) => Some(value),
            Removed::Entry(_, value) => value,
        }
    }

    /// Whether the key's node collapsed.
    #[must_use]
    pub fn collapsed(&self) -> bool {
        matches!(self, Removed::Entry(..))
    }
}
