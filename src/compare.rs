use core::cmp::Ordering;

/// A total order over keys, fixed for the lifetime of a tree.
///
/// Any `Fn(&K, &K) -> Ordering` closure is a comparator, so whatever the closure captures
/// serves as the comparison context.
///
/// # Examples
///
/// ```
/// use osrb_tree::OSRBTree;
///
/// let mut tree = OSRBTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// tree.insert(1, "one");
/// tree.insert(3, "three");
/// tree.insert(2, "two");
///
/// let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
pub trait Comparator<K: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
