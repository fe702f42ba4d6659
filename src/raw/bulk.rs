use alloc::vec::Vec;

use smallvec::SmallVec;

use super::chain::Chain;
use super::handle::Handle;
use super::node::Node;
use super::raw_osrb_tree::{RawOSRBTree, Side, Slot};
use crate::compare::Comparator;
use crate::error::Error;
use crate::policy::MergePolicy;
use crate::traversal::Order;

impl<K, V, C> RawOSRBTree<K, V, C> {
    /// Duplicates the tree node for node, keeping every color and size, with the given
    /// key and value duplicators. On failure the partial copy is dropped and `self` is
    /// untouched.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all, fields(keys = self.key_count(), values = self.len()))
    )]
    pub(crate) fn try_copy_with<E, FK, FV>(&self, mut dup_key: FK, mut dup_value: FV) -> Result<Self, E>
    where
        C: Clone,
        E: From<Error>,
        FK: FnMut(&K) -> Result<K, E>,
        FV: FnMut(&V) -> Result<V, E>,
    {
        let mut copy = Self::new(self.comparator.clone());
        copy.try_reserve(self.key_count(), self.len())?;

        let Some(root) = self.root else {
            return Ok(copy);
        };

        // (source node, parent in the copy, side of that parent)
        let mut stack: SmallVec<[(Handle, Option<Handle>, Side); 32]> = SmallVec::new();
        stack.push((root, None, Side::Left));

        let mut values = Vec::new();
        while let Some((source, parent, side)) = stack.pop() {
            let node = self.nodes.get(source);

            values.clear();
            let mut cell = node.chain.head();
            while let Some(c) = cell {
                let cell_ref = self.cells.get(c);
                values.push(dup_value(cell_ref.value())?);
                cell = cell_ref.next();
            }

            let chain = Chain::from_values(&mut copy.cells, values.drain(..));
            let handle = copy.nodes.alloc(Node {
                key: dup_key(&node.key)?,
                chain,
                size: node.size,
                color: node.color,
                parent,
                left: None,
                right: None,
            });

            match (parent, side) {
                (None, _) => copy.root = Some(handle),
                (Some(p), Side::Left) => copy.nodes.get_mut(p).left = Some(handle),
                (Some(p), Side::Right) => copy.nodes.get_mut(p).right = Some(handle),
            }

            if let Some(right) = node.right {
                stack.push((right, Some(handle), Side::Right));
            }
            if let Some(left) = node.left {
                stack.push((left, Some(handle), Side::Left));
            }
        }

        Ok(copy)
    }

    /// Empties the tree, returning every key with its values in ascending key order.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, Vec<V>)> {
        let mut handles = Vec::with_capacity(self.key_count());
        self.visit(Order::InOrder, |h| handles.push(h));

        let entries = handles
            .into_iter()
            .map(|h| {
                let (key, chain) = self.release(h);
                (key, chain.drain(&mut self.cells))
            })
            .collect();
        self.clear();
        entries
    }

    /// Values that trimming every chain to its front entry would discard, and how many keys
    /// they belong to.
    pub(crate) fn duplicate_counts(&self) -> (usize, usize) {
        let mut keys = 0;
        let mut values = 0;
        self.visit(Order::InOrder, |h| {
            let len = self.nodes.get(h).chain.len();
            if len > 1 {
                keys += 1;
                values += len - 1;
            }
        });
        (keys, values)
    }

    /// Trims every chain to its front entry, handing each key's discarded values (front to
    /// back) to `discard`. Sizes are corrected in a single post-order pass. Returns the
    /// number of values discarded.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all, fields(values = self.len())))]
    pub(crate) fn unique(&mut self, mut discard: impl FnMut(&K, Vec<V>)) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut discarded = 0;
        let mut current = Some(self.nodes.deepest_first(root));
        while let Some(h) = current {
            let mut chain = self.nodes.get(h).chain;
            if chain.len() > 1 {
                let tail = chain.split_after_front(&mut self.cells);
                self.nodes.get_mut(h).chain = chain;
                let values = tail.drain(&mut self.cells);
                discarded += values.len();
                discard(&self.nodes.get(h).key, values);
            }
            self.update_size(h);
            current = self.nodes.post_order_next(h);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(discarded, "chains trimmed");

        discarded
    }
}

impl<K, V, C: Comparator<K>> RawOSRBTree<K, V, C> {
    /// Moves every entry of `other` into `self`. Capacity for the worst case is reserved
    /// first, so on failure neither tree has changed.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all, fields(?policy, keys = other.key_count(), values = other.len()))
    )]
    pub(crate) fn merge<C2>(&mut self, other: &mut RawOSRBTree<K, V, C2>, policy: MergePolicy) -> Result<(), Error> {
        self.try_reserve(other.key_count(), other.len())?;
        for (key, values) in other.drain_to_vec() {
            self.put_chain(key, values, policy);
        }
        Ok(())
    }

    /// Stores `values` under `key`. A present key takes them in front of its own chain
    /// under [`MergePolicy::Repeat`] and drops them under [`MergePolicy::Unique`].
    pub(crate) fn put_chain(&mut self, key: K, values: Vec<V>, policy: MergePolicy) {
        match self.locate(&key) {
            Slot::Vacant { parent, side } => {
                let chain = Chain::from_values(&mut self.cells, values);
                self.attach(key, chain, parent, side);
            }
            Slot::Occupied(handle) => match policy {
                MergePolicy::Repeat => {
                    let added = values.len();
                    let mut chain = self.nodes.get(handle).chain;
                    chain.extend_front(&mut self.cells, values);
                    self.nodes.get_mut(handle).chain = chain;
                    self.grow_path(handle, added);
                }
                MergePolicy::Unique => {}
            },
        }
    }
}
