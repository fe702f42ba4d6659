/// A zero-based rank into the sorted sequence of values in a tree.
///
/// Ranks count chain entries, so every value chained under one key has its own rank.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTree, Rank};
///
/// let mut tree = OSRBTree::new();
/// tree.insert("a", 10);
/// tree.insert("a", 11);
/// tree.insert("b", 20);
///
/// assert_eq!(tree[Rank(1)], "a");
/// assert_eq!(tree[Rank(2)], "b");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
