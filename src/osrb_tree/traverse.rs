use super::{OSRBTree, Values};
use crate::traversal::{Direction, Order};

impl<K, V, C> OSRBTree<K, V, C> {
    /// Calls `f` with every key and its chain, in the given node `order`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{OSRBTree, Order};
    ///
    /// let tree: OSRBTree<i32, ()> = (1..=7).map(|k| (k, ())).collect();
    ///
    /// let mut levels = Vec::new();
    /// tree.traverse(Order::LevelOrder, |key, _| levels.push(*key));
    /// assert_eq!(levels[0], 4);
    ///
    /// let mut sorted = Vec::new();
    /// tree.traverse(Order::InOrder, |key, _| sorted.push(*key));
    /// assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn traverse<F>(&self, order: Order, mut f: F)
    where
        F: FnMut(&K, Values<'_, V>),
    {
        self.raw.visit(order, |h| {
            let (key, values) = self.entry_at(h);
            f(key, values);
        });
    }

    /// Calls `f` with every key and value, keys in `direction` order and each key's values
    /// newest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Direction, OSRBTree};
    ///
    /// let tree = OSRBTree::from([(1, 'a'), (2, 'b'), (1, 'c')]);
    /// let mut seen = String::new();
    /// tree.walk(Direction::Descending, |_, value| seen.push(*value));
    /// assert_eq!(seen, "bca");
    /// ```
    pub fn walk<F>(&self, direction: Direction, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        self.walk_until(direction, |key, value| {
            f(key, value);
            false
        });
    }

    /// Walks like [`walk`](OSRBTree::walk), stopping at and returning the first entry for
    /// which `predicate` holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Direction, OSRBTree};
    ///
    /// let tree = OSRBTree::from([(1, 10), (2, 25), (3, 30)]);
    /// assert_eq!(tree.walk_break_if_true(Direction::Ascending, |_, v| *v > 20), Some((&2, &25)));
    /// assert_eq!(tree.walk_break_if_true(Direction::Descending, |_, v| *v < 20), Some((&1, &10)));
    /// assert_eq!(tree.walk_break_if_true(Direction::Ascending, |_, v| *v > 99), None);
    /// ```
    pub fn walk_break_if_true<F>(&self, direction: Direction, mut predicate: F) -> Option<(&K, &V)>
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.walk_until(direction, |key, value| predicate(key, value))
    }

    /// Walks like [`walk`](OSRBTree::walk), stopping at and returning the first entry for
    /// which `predicate` fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Direction, OSRBTree};
    ///
    /// let tree = OSRBTree::from([(1, 10), (2, 25), (3, 30)]);
    /// assert_eq!(tree.walk_break_if_false(Direction::Ascending, |_, v| *v < 20), Some((&2, &25)));
    /// assert_eq!(tree.walk_break_if_false(Direction::Ascending, |_, v| *v > 0), None);
    /// ```
    pub fn walk_break_if_false<F>(&self, direction: Direction, mut predicate: F) -> Option<(&K, &V)>
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.walk_until(direction, |key, value| !predicate(key, value))
    }

    fn walk_until<F>(&self, direction: Direction, stop: F) -> Option<(&K, &V)>
    where
        F: FnMut(&K, &V) -> bool,
    {
        match direction {
            Direction::Ascending => find_entry(self.iter(), stop),
            Direction::Descending => find_entry(self.iter().rev(), stop),
        }
    }
}

fn find_entry<'a, K, V, I, F>(keys: I, mut stop: F) -> Option<(&'a K, &'a V)>
where
    I: Iterator<Item = (&'a K, Values<'a, V>)>,
    F: FnMut(&K, &V) -> bool,
{
    keys.flat_map(|(key, values)| values.map(move |value| (key, value)))
        .find(|&(key, value)| stop(key, value))
}
