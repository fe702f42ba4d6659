use core::cmp::Ordering;

use super::handle::Handle;
use super::raw_osrb_tree::RawOSRBTree;
use crate::compare::Comparator;

impl<K, V, C> RawOSRBTree<K, V, C> {
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.nodes.leftmost(root))
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.nodes.rightmost(root))
    }

    /// Finds the node whose chain covers `rank`, along with the rank's offset into that
    /// chain. O(log n).
    pub(crate) fn select(&self, mut rank: usize) -> Option<(Handle, usize)> {
        if rank >= self.len() {
            return None;
        }

        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            let before = self.nodes.size_of(node.left);
            if rank < before {
                current = node.left;
            } else if rank - before < node.chain.len() {
                return Some((h, rank - before));
            } else {
                rank -= before + node.chain.len();
                current = node.right;
            }
        }
        None
    }
}

impl<K, V, C: Comparator<K>> RawOSRBTree<K, V, C> {
    /// Chain entries stored under keys strictly less than `key`, if `key` is present.
    pub(crate) fn rank_of(&self, key: &K) -> Option<usize> {
        let mut rank = 0;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            match self.comparator.compare(key, &node.key) {
                Ordering::Less => current = node.left,
                Ordering::Greater => {
                    rank += self.nodes.size_of(node.left) + node.chain.len();
                    current = node.right;
                }
                Ordering::Equal => return Some(rank + self.nodes.size_of(node.left)),
            }
        }
        None
    }

    /// The node with the largest key not greater than `key`.
    pub(crate) fn floor(&self, key: &K) -> Option<Handle> {
        let mut best = None;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            match self.comparator.compare(key, &node.key) {
                Ordering::Less => current = node.left,
                Ordering::Greater => {
                    best = Some(h);
                    current = node.right;
                }
                Ordering::Equal => return Some(h),
            }
        }
        best
    }

    /// The node with the smallest key not less than `key`.
    pub(crate) fn ceiling(&self, key: &K) -> Option<Handle> {
        let mut best = None;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            match self.comparator.compare(key, &node.key) {
                Ordering::Less => {
                    best = Some(h);
                    current = node.left;
                }
                Ordering::Greater => current = node.right,
                Ordering::Equal => return Some(h),
            }
        }
        best
    }

    /// The first and last nodes within `[low, high]`, with the bounds swapped if given
    /// backwards.
    pub(crate) fn range_bounds(&self, low: &K, high: &K) -> Option<(Handle, Handle)> {
        let (low, high) = match self.comparator.compare(low, high) {
            Ordering::Greater => (high, low),
            _ => (low, high),
        };
        let front = self.ceiling(low)?;
        let back = self.floor(high)?;
        match self.comparator.compare(&self.nodes.get(front).key, &self.nodes.get(back).key) {
            Ordering::Greater => None,
            _ => Some((front, back)),
        }
    }
}
