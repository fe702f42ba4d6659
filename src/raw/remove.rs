use core::cmp::Ordering;
use core::mem;

use alloc::vec::Vec;

use super::chain::Chain;
use super::handle::Handle;
use super::raw_osrb_tree::RawOSRBTree;
use crate::compare::Comparator;
use crate::policy::Removed;

/// What a structural deletion is looking for.
///
/// A rank probe is relative to the subtree being descended, which rotations never change,
/// so it can steer the descent without borrowing a key out of the tree.
enum Probe<'a, K> {
    Key(&'a K),
    Rank(usize),
}

impl<K> Clone for Probe<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Probe<'_, K> {}

impl<K, V, C: Comparator<K>> RawOSRBTree<K, V, C> {
    fn probe(&self, probe: Probe<'_, K>, handle: Handle) -> Ordering {
        match probe {
            Probe::Key(key) => self.compare_at(key, handle),
            Probe::Rank(rank) => {
                let node = self.nodes.get(handle);
                let before = self.nodes.size_of(node.left);
                if rank < before {
                    Ordering::Less
                } else if rank < before + node.chain.len() {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
        }
    }

    /// Pops the front value of `key`'s chain, collapsing the node once nothing is left.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub(crate) fn remove_one(&mut self, key: &K) -> Option<Removed<K, V>> {
        let handle = self.search(key)?;
        let mut chain = self.nodes.get(handle).chain;
        if chain.len() > 1 {
            let value = chain.pop_front(&mut self.cells)?;
            self.nodes.get_mut(handle).chain = chain;
            self.shrink_path(handle, 1);
            return Some(Removed::Value(value));
        }

        let (key, mut chain) = self.delete(Probe::Key(key));
        let value = chain.pop_front(&mut self.cells);
        Some(Removed::Entry(key, value))
    }

    /// Removes `key`'s node, returning its values front to back.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    pub(crate) fn remove_all(&mut self, key: &K) -> Option<(K, Vec<V>)> {
        self.search(key)?;
        let (key, chain) = self.delete(Probe::Key(key));
        Some((key, chain.drain(&mut self.cells)))
    }

    /// Removes the chain entry at `rank`, collapsing its node if that empties the chain.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all, fields(rank)))]
    pub(crate) fn remove_by_rank(&mut self, rank: usize) -> Option<Removed<K, V>> {
        let (handle, offset) = self.select(rank)?;
        let mut chain = self.nodes.get(handle).chain;
        if chain.len() > 1 {
            let value = chain.pop_kth(&mut self.cells, offset)?;
            self.nodes.get_mut(handle).chain = chain;
            self.shrink_path(handle, 1);
            return Some(Removed::Value(value));
        }

        let (key, mut chain) = self.delete(Probe::Rank(rank));
        let value = chain.pop_front(&mut self.cells);
        Some(Removed::Entry(key, value))
    }

    /// Removes the node a present `probe` identifies.
    fn delete(&mut self, mut probe: Probe<'_, K>) -> (K, Chain) {
        self.redden_root();
        let mut current = self.root.expect("`delete()` - tree is empty!");

        loop {
            if self.probe(probe, current) == Ordering::Less {
                let left = self.nodes.get(current).left.expect("`delete()` - probe is not in the tree!");
                if !self.nodes.is_red(Some(left)) && !self.nodes.is_red(self.nodes.left_of(Some(left))) {
                    current = self.move_red_left(current);
                }
                current = self.nodes.get(current).left.expect("`delete()` - lost the left subtree!");
                continue;
            }

            if self.nodes.is_red(self.nodes.get(current).left) {
                current = self.rotate_right(current);
            }
            let node = self.nodes.get(current);
            if node.right.is_none() && self.probe(probe, current) == Ordering::Equal {
                return self.detach(current);
            }

            let right = node.right.expect("`delete()` - probe is not in the tree!");
            if !self.nodes.is_red(Some(right)) && !self.nodes.is_red(self.nodes.left_of(Some(right))) {
                current = self.move_red_right(current);
            }

            let right = self.nodes.get(current).right.expect("`delete()` - lost the right subtree!");
            match self.probe(probe, current) {
                Ordering::Equal => {
                    // The successor's key and chain move up before sizes are recomputed.
                    let min = self.descend_to_min(right);
                    let parent = self.unlink(min);
                    let (key, chain) = self.release(min);
                    let node = self.nodes.get_mut(current);
                    let key = mem::replace(&mut node.key, key);
                    let chain = mem::replace(&mut node.chain, chain);
                    self.unwind(parent);
                    return (key, chain);
                }
                _ => {
                    if let Probe::Rank(rank) = &mut probe {
                        let node = self.nodes.get(current);
                        *rank -= self.nodes.size_of(node.left) + node.chain.len();
                    }
                    current = right;
                }
            }
        }
    }
}

impl<K, V, C> RawOSRBTree<K, V, C> {
    /// Removes the smallest node.
    pub(crate) fn pop_first(&mut self) -> Option<(K, Vec<V>)> {
        let root = self.root?;
        self.redden_root();
        let min = self.descend_to_min(root);
        let (key, chain) = self.detach(min);
        Some((key, chain.drain(&mut self.cells)))
    }

    /// Removes the largest node.
    pub(crate) fn pop_last(&mut self) -> Option<(K, Vec<V>)> {
        let root = self.root?;
        self.redden_root();
        let max = self.descend_to_max(root);
        let (key, chain) = self.detach(max);
        Some((key, chain.drain(&mut self.cells)))
    }

    /// Walks to the minimum of the subtree at `h`, pushing red links down so the minimum
    /// ends up a red leaf (or the root).
    fn descend_to_min(&mut self, mut h: Handle) -> Handle {
        while let Some(left) = self.nodes.get(h).left {
            if !self.nodes.is_red(Some(left)) && !self.nodes.is_red(self.nodes.left_of(Some(left))) {
                h = self.move_red_left(h);
            }
            h = self.nodes.get(h).left.expect("`descend_to_min()` - lost the left subtree!");
        }
        h
    }

    fn descend_to_max(&mut self, mut h: Handle) -> Handle {
        loop {
            if self.nodes.is_red(self.nodes.get(h).left) {
                h = self.rotate_right(h);
            }
            let Some(right) = self.nodes.get(h).right else {
                return h;
            };
            if !self.nodes.is_red(Some(right)) && !self.nodes.is_red(self.nodes.left_of(Some(right))) {
                h = self.move_red_right(h);
            }
            h = self.nodes.get(h).right.expect("`descend_to_max()` - lost the right subtree!");
        }
    }

    /// Unlinks the leaf `h`, frees its slot and rebalances everything above it.
    fn detach(&mut self, h: Handle) -> (K, Chain) {
        let parent = self.unlink(h);
        let released = self.release(h);
        self.unwind(parent);
        released
    }

    /// Clears the link to the leaf `h`, returning its former parent.
    fn unlink(&mut self, h: Handle) -> Option<Handle> {
        let node = self.nodes.get(h);
        debug_assert!(node.left.is_none() && node.right.is_none(), "`unlink()` - node is not a leaf!");
        let parent = node.parent;
        match parent {
            None => self.root = None,
            Some(p) => {
                let parent = self.nodes.get_mut(p);
                if parent.left == Some(h) {
                    parent.left = None;
                } else {
                    parent.right = None;
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(slot = h.slot(), "node collapsed");

        parent
    }
}
