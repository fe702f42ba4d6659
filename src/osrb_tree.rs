use core::fmt;
use core::iter::FusedIterator;

use alloc::vec::Vec;

use crate::compare::{Comparator, Natural};
use crate::policy::{Policy, Put, Removed};
use crate::raw::{Arena, Cell, Chain, Handle, Node, RawOSRBTree};

mod bulk;
mod capacity;
mod order_statistic;
mod traverse;

pub use crate::Rank;

/// An ordered index based on a [left-leaning red-black tree], where every key carries a
/// chain of values.
///
/// Keys are ordered by a [`Comparator`], which defaults to the key's [`Ord`]
/// implementation. Storing a value under a key that is already present pushes it onto the
/// front of that key's chain (unless a different [`Policy`] is asked for), so the most
/// recently stored value comes first. A key may also be present with an empty chain.
///
/// Every node records how many chain entries its subtree holds, which makes the
/// order-statistic queries ([`select`], [`rank_of`], [`get_by_rank`]) logarithmic. Ranks
/// count chain entries, not keys: a key with three values occupies three consecutive ranks.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative to
/// any other key changes while it is in the tree. The behavior resulting from such a logic
/// error is not specified, but will be encapsulated to the `OSRBTree` that observed it and
/// not result in undefined behavior. [`check`] reports which invariant broke.
///
/// # Examples
///
/// ```
/// use osrb_tree::OSRBTree;
///
/// let mut index = OSRBTree::new();
/// index.insert("apple", 3);
/// index.insert("pear", 1);
/// index.insert("apple", 5);
///
/// // Two values under one key, newest first.
/// let apples: Vec<_> = index.get_all(&"apple").unwrap().copied().collect();
/// assert_eq!(apples, [5, 3]);
///
/// // Ranks count values: both apples come before the pear.
/// assert_eq!(index.len(), 3);
/// assert_eq!(index.key_count(), 2);
/// assert_eq!(index.rank_of(&"pear"), Some(2));
/// assert_eq!(index.select(1), Some(&"apple"));
/// ```
///
/// [left-leaning red-black tree]: https://en.wikipedia.org/wiki/Left-leaning_red%E2%80%93black_tree
/// [`select`]: OSRBTree::select
/// [`rank_of`]: OSRBTree::rank_of
/// [`get_by_rank`]: OSRBTree::get_by_rank
/// [`check`]: OSRBTree::check
#[derive(Clone)]
pub struct OSRBTree<K, V, C = Natural> {
    raw: RawOSRBTree<K, V, C>,
}

/// An iterator over the values chained under one key, newest first.
///
/// This `struct` is created by [`OSRBTree::get_all`] and is the value half of the items
/// yielded by [`OSRBTree::iter`].
///
/// # Examples
///
/// ```
/// use osrb_tree::OSRBTree;
///
/// let mut tree = OSRBTree::new();
/// tree.insert('k', 1);
/// tree.insert('k', 2);
///
/// let mut values = tree.get_all(&'k').unwrap();
/// assert_eq!(values.len(), 2);
/// assert_eq!(values.next(), Some(&2));
/// assert_eq!(values.next(), Some(&1));
/// assert_eq!(values.next(), None);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, V> {
    cells: Option<&'a Arena<Cell<V>>>,
    next: Option<Handle>,
    remaining: usize,
}

/// An iterator over the keys of an `OSRBTree` and their chains, in key order.
///
/// This `struct` is created by the [`iter`] method on [`OSRBTree`]. Its length is the
/// number of keys, not values.
///
/// # Examples
///
/// ```
/// use osrb_tree::OSRBTree;
///
/// let tree = OSRBTree::from([(1, "a"), (2, "b"), (1, "c")]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.len(), 2);
///
/// let (key, values) = iter.next().unwrap();
/// assert_eq!((*key, values.len()), (1, 2));
/// let (key, _) = iter.next_back().unwrap();
/// assert_eq!(*key, 2);
/// assert!(iter.next().is_none());
/// ```
///
/// [`iter`]: OSRBTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    nodes: Option<&'a Arena<Node<K>>>,
    cells: Option<&'a Arena<Cell<V>>>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An iterator over the keys within an inclusive range and their chains.
///
/// This `struct` is created by the [`range`] method on [`OSRBTree`].
///
/// [`range`]: OSRBTree::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, K, V> {
    nodes: Option<&'a Arena<Node<K>>>,
    cells: Option<&'a Arena<Cell<V>>>,
    front: Option<Handle>,
    back: Option<Handle>,
}

/// An owning iterator over the keys of an `OSRBTree` and their values, in key order.
///
/// This `struct` is created by the [`into_iter`] method on [`OSRBTree`] (provided by the
/// [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, Vec<V>)>,
}

impl<K, V> OSRBTree<K, V> {
    /// Makes a new, empty `OSRBTree` ordered by the keys' [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// tree.insert(1, "a");
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        OSRBTree {
            raw: RawOSRBTree::new(Natural),
        }
    }
}

impl<K, V, C> OSRBTree<K, V, C> {
    /// Makes a new, empty `OSRBTree` ordered by `comparator`.
    ///
    /// The comparator is owned by the tree for its whole life; anything a closure captures
    /// is available to every comparison.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// tree.insert("ccc", 3);
    /// tree.insert("a", 1);
    /// tree.insert("bb", 2);
    /// tree.insert("zz", 4); // same length as "bb", so it joins that chain
    ///
    /// assert_eq!(tree.key_count(), 3);
    /// assert_eq!(tree.get(&"xy"), Some(&4));
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        OSRBTree {
            raw: RawOSRBTree::new(comparator),
        }
    }

    /// Returns the comparator ordering this tree.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns the number of values in the tree, counting every chain entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// tree.insert(5, ());
    /// tree.insert(5, ());
    /// tree.insert(5, ());
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.key_count(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns the number of distinct keys in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn key_count(&self) -> usize {
        self.raw.key_count()
    }

    /// Returns `true` if the tree holds no keys.
    ///
    /// A tree holding only key-only entries is not empty even though its [`len`] is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree: OSRBTree<i32, ()> = OSRBTree::new();
    /// assert!(tree.is_empty());
    /// let _ = tree.insert_key(1);
    /// assert!(!tree.is_empty());
    /// assert_eq!(tree.len(), 0);
    /// ```
    ///
    /// [`len`]: OSRBTree::len
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the tree, removing all keys and values.
    ///
    /// Keeps the allocated memory for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::from([(1, "a"), (2, "b")]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Gets an iterator over the keys of the tree and their chains, in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([(3, 'c'), (1, 'a'), (2, 'b'), (1, 'z')]);
    /// let flat: Vec<_> = tree.iter().flat_map(|(k, values)| values.map(move |v| (*k, *v))).collect();
    /// assert_eq!(flat, [(1, 'z'), (1, 'a'), (2, 'b'), (3, 'c')]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: Some(self.raw.nodes()),
            cells: Some(self.raw.cells()),
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.key_count(),
        }
    }

    /// Returns the smallest key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first_key(&self) -> Option<&K> {
        self.raw.first().map(|h| &self.raw.node(h).key)
    }

    /// Returns the largest key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last_key(&self) -> Option<&K> {
        self.raw.last().map(|h| &self.raw.node(h).key)
    }

    /// Removes the smallest key, returning it with its values, newest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::from([(2, 'b'), (1, 'a'), (1, 'x')]);
    /// assert_eq!(tree.pop_first(), Some((1, vec!['x', 'a'])));
    /// assert_eq!(tree.pop_first(), Some((2, vec!['b'])));
    /// assert_eq!(tree.pop_first(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_first(&mut self) -> Option<(K, Vec<V>)> {
        self.raw.pop_first()
    }

    /// Removes the largest key, returning it with its values, newest first.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<(K, Vec<V>)> {
        self.raw.pop_last()
    }

    fn entry_at(&self, handle: Handle) -> (&K, Values<'_, V>) {
        let node = self.raw.node(handle);
        (&node.key, Values::new(Some(self.raw.cells()), node.chain))
    }
}

impl<K, V, C: Comparator<K>> OSRBTree<K, V, C> {
    /// Pushes `value` onto the front of `key`'s chain, creating the key if needed.
    ///
    /// Returns `true` if the key was new. This is [`put`] with [`Policy::Repeat`].
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// assert!(tree.insert("g", "vg1"));
    /// assert!(!tree.insert("g", "vg2"));
    /// assert_eq!(tree.get(&"g"), Some(&"vg2"));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds `u32::MAX - 1` keys or values. Use [`merge`](OSRBTree::merge)
    /// for a fallible bulk insert.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// [`put`]: OSRBTree::put
    pub fn insert(&mut self, key: K, value: V) -> bool {
        matches!(self.raw.put(key, Some(value), Policy::Repeat), Put::Inserted)
    }

    /// Adds `key` with an empty chain if it is not already present.
    ///
    /// A present key is handed back untouched in [`Put::Rejected`].
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{OSRBTree, Put};
    ///
    /// let mut tree: OSRBTree<&str, u32> = OSRBTree::new();
    /// assert_eq!(tree.insert_key("k"), Put::Inserted);
    /// assert_eq!(tree.insert_key("k"), Put::Rejected { key: "k", value: None });
    /// assert_eq!(tree.chain_len(&"k"), Some(0));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds `u32::MAX - 1` keys. Use [`merge`](OSRBTree::merge)
    /// for a fallible bulk insert.
    pub fn insert_key(&mut self, key: K) -> Put<K, V> {
        self.raw.put(key, None, Policy::Repeat)
    }

    /// Stores `value` under `key`, resolving a present key as `policy` dictates.
    ///
    /// An absent key always gets a new entry holding just `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{OSRBTree, Policy, Put};
    ///
    /// let mut tree = OSRBTree::new();
    /// assert_eq!(tree.put(1, "a", Policy::Unique), Put::Inserted);
    /// assert_eq!(tree.put(1, "b", Policy::Unique), Put::Rejected { key: 1, value: Some("b") });
    /// assert_eq!(tree.put(1, "c", Policy::Repeat), Put::Chained);
    /// assert_eq!(tree.put(1, "d", Policy::Replace), Put::Replaced(Some("c")));
    /// assert_eq!(tree.put(1, "e", Policy::DeepReplace), Put::Replaced(None));
    ///
    /// let chain: Vec<_> = tree.get_all(&1).unwrap().copied().collect();
    /// assert_eq!(chain, ["e", "a"]);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds `u32::MAX - 1` keys or values. Use [`merge`](OSRBTree::merge)
    /// for a fallible bulk insert.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn put(&mut self, key: K, value: V, policy: Policy) -> Put<K, V> {
        self.raw.put(key, Some(value), policy)
    }

    /// Returns `true` if the tree contains `key`, with or without values.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.search(key).is_some()
    }

    /// Returns the newest value stored under `key`.
    ///
    /// Returns `None` if the key is absent or key-only.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let chain = self.raw.node(self.raw.search(key)?).chain;
        chain.nth(self.raw.cells(), 0)
    }

    /// Returns a mutable reference to the newest value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::from([(1, 10)]);
    /// if let Some(value) = tree.get_mut(&1) {
    ///     *value += 1;
    /// }
    /// assert_eq!(tree.get(&1), Some(&11));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.raw.search(key)?;
        self.raw.front_mut(handle)
    }

    /// Returns every value stored under `key`, newest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::new();
    /// for key in ["g", "k", "r"] {
    ///     tree.insert(key, format!("v{key}1"));
    ///     tree.insert(key, format!("v{key}2"));
    /// }
    /// let g: Vec<_> = tree.get_all(&"g").unwrap().collect();
    /// assert_eq!(g, ["vg2", "vg1"]);
    /// assert!(tree.get_all(&"x").is_none());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to find the key, then O(1) per value.
    pub fn get_all(&self, key: &K) -> Option<Values<'_, V>> {
        self.raw.search(key).map(|h| self.entry_at(h).1)
    }

    /// Returns the stored key equal to `key`, along with its chain.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, Values<'_, V>)> {
        self.raw.search(key).map(|h| self.entry_at(h))
    }

    /// Returns how many values are chained under `key`.
    #[must_use]
    pub fn chain_len(&self, key: &K) -> Option<usize> {
        self.raw.search(key).map(|h| self.raw.node(h).chain.len())
    }

    /// Removes the newest value stored under `key`.
    ///
    /// The key itself is removed together with its last value, or straight away if it had
    /// no values; that case is reported as [`Removed::Entry`] and hands the key back.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{OSRBTree, Removed};
    ///
    /// let mut tree = OSRBTree::from([("5", 'a'), ("5", 'b')]);
    /// assert_eq!(tree.remove_one(&"5"), Some(Removed::Value('b')));
    /// assert_eq!(tree.remove_one(&"5"), Some(Removed::Entry("5", Some('a'))));
    /// assert_eq!(tree.remove_one(&"5"), None);
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_one(&mut self, key: &K) -> Option<Removed<K, V>> {
        self.raw.remove_one(key)
    }

    /// Removes `key` and every value stored under it, returning them newest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let mut tree = OSRBTree::from([(1, 'a'), (1, 'b'), (2, 'c')]);
    /// assert_eq!(tree.remove_all(&1), Some((1, vec!['b', 'a'])));
    /// assert_eq!(tree.remove_all(&1), None);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n + values removed)
    pub fn remove_all(&mut self, key: &K) -> Option<(K, Vec<V>)> {
        self.raw.remove_all(key)
    }

    /// Returns the largest key not greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(tree.floor(&25), Some(&20));
    /// assert_eq!(tree.floor(&5), None);
    /// assert_eq!(tree.ceiling(&25), Some(&30));
    /// assert_eq!(tree.ceiling(&35), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn floor(&self, key: &K) -> Option<&K> {
        self.raw.floor(key).map(|h| &self.raw.node(h).key)
    }

    /// Returns the smallest key not less than `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn ceiling(&self, key: &K) -> Option<&K> {
        self.raw.ceiling(key).map(|h| &self.raw.node(h).key)
    }

    /// Gets an iterator over the keys in `[low, high]` and their chains, in key order.
    ///
    /// The bounds are swapped if `low` compares greater than `high`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree: OSRBTree<char, ()> = ('a'..='z').map(|c| (c, ())).collect();
    /// let forward: Vec<_> = tree.range(&'g', &'r').map(|(k, _)| *k).collect();
    /// let swapped: Vec<_> = tree.range(&'r', &'g').map(|(k, _)| *k).collect();
    /// assert_eq!(forward.len(), 12);
    /// assert_eq!(forward, swapped);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to find the bounds, then amortized O(1) per key.
    pub fn range(&self, low: &K, high: &K) -> Range<'_, K, V> {
        match self.raw.range_bounds(low, high) {
            Some((front, back)) => Range {
                nodes: Some(self.raw.nodes()),
                cells: Some(self.raw.cells()),
                front: Some(front),
                back: Some(back),
            },
            None => Range::default(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OSRBTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default> Default for OSRBTree<K, V, C> {
    fn default() -> Self {
        OSRBTree::with_comparator(C::default())
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for OSRBTree<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.key_count() == other.key_count()
            && self.iter().zip(other.iter()).all(|((ka, va), (kb, vb))| ka == kb && va.eq(vb))
    }
}

impl<K: Eq, V: Eq, C> Eq for OSRBTree<K, V, C> {}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for OSRBTree<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = OSRBTree::default();
        tree.extend(iter);
        tree
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for OSRBTree<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OSRBTree<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V, C> IntoIterator for &'a OSRBTree<K, V, C> {
    type Item = (&'a K, Values<'a, V>);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for OSRBTree<K, V, C> {
    type Item = (K, Vec<V>);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the keys of the tree and their values, in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTree;
    ///
    /// let tree = OSRBTree::from([(2, "b"), (1, "a"), (2, "c")]);
    /// let mut iter = tree.into_iter();
    /// assert_eq!(iter.next(), Some((1, vec!["a"])));
    /// assert_eq!(iter.next_back(), Some((2, vec!["c", "b"])));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(cells: Option<&'a Arena<Cell<V>>>, chain: Chain) -> Self {
        Values {
            cells,
            next: chain.head(),
            remaining: chain.len(),
        }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        if self.remaining == 0 {
            return None;
        }
        let cell = self.cells?.get(self.next?);
        self.next = cell.next();
        self.remaining -= 1;
        Some(cell.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<V> FusedIterator for Values<'_, V> {}

impl<V> Clone for Values<'_, V> {
    fn clone(&self) -> Self {
        Values {
            cells: self.cells,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<V> Default for Values<'_, V> {
    /// Creates an empty `osrb_tree::Values`.
    ///
    /// ```
    /// let values: osrb_tree::osrb_tree::Values<'_, u8> = Default::default();
    /// assert_eq!(values.len(), 0);
    /// ```
    fn default() -> Self {
        Values {
            cells: None,
            next: None,
            remaining: 0,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Values<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, Values<'a, V>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes?;
        let node = nodes.get(self.front?);
        self.remaining -= 1;
        self.front = self.front.and_then(|h| nodes.successor(h));
        Some((&node.key, Values::new(self.cells, node.chain)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes?;
        let node = nodes.get(self.back?);
        self.remaining -= 1;
        self.back = self.back.and_then(|h| nodes.predecessor(h));
        Some((&node.key, Values::new(self.cells, node.chain)))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            cells: self.cells,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K, V> Default for Iter<'_, K, V> {
    /// Creates an empty `osrb_tree::Iter`.
    ///
    /// ```
    /// let iter: osrb_tree::osrb_tree::Iter<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            nodes: None,
            cells: None,
            front: None,
            back: None,
            remaining: 0,
        }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, Values<'a, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes?;
        let handle = self.front?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = nodes.successor(handle);
        }
        let node = nodes.get(handle);
        Some((&node.key, Values::new(self.cells, node.chain)))
    }
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes?;
        let handle = self.back?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = nodes.predecessor(handle);
        }
        let node = nodes.get(handle);
        Some((&node.key, Values::new(self.cells, node.chain)))
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            nodes: self.nodes,
            cells: self.cells,
            front: self.front,
            back: self.back,
        }
    }
}

impl<K, V> Default for Range<'_, K, V> {
    fn default() -> Self {
        Range {
            nodes: None,
            cells: None,
            front: None,
            back: None,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, Vec<V>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    fn default() -> Self {
        IntoIter {
            inner: Vec::new().into_iter(),
        }
    }
}
