use super::chain::Chain;
use super::handle::Handle;
use super::node::Node;
use super::raw_osrb_tree::{RawOSRBTree, Side, Slot};
use crate::compare::Comparator;
use crate::policy::{Policy, Put};

impl<K, V, C: Comparator<K>> RawOSRBTree<K, V, C> {
    /// Stores `value` under `key` as `policy` dictates.
    ///
    /// An absent key always gets a new node; with no value that node is key-only. A present
    /// key with no value to store is rejected.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all, fields(?policy)))]
    pub(crate) fn put(&mut self, key: K, value: Option<V>, policy: Policy) -> Put<K, V> {
        match self.locate(&key) {
            Slot::Vacant { parent, side } => {
                let chain = match value {
                    Some(value) => Chain::from_values(&mut self.cells, [value]),
                    None => Chain::EMPTY,
                };
                self.attach(key, chain, parent, side);
                Put::Inserted
            }
            Slot::Occupied(handle) => self.put_existing(handle, key, value, policy),
        }
    }

    fn put_existing(&mut self, handle: Handle, key: K, value: Option<V>, policy: Policy) -> Put<K, V> {
        let Some(value) = value else {
            return Put::Rejected { key, value: None };
        };

        let mut chain = self.nodes.get(handle).chain;
        let outcome = match policy {
            Policy::Unique => return Put::Rejected { key, value: Some(value) },
            Policy::Repeat => {
                chain.push_front(&mut self.cells, value);
                self.grow_path(handle, 1);
                Put::Chained
            }
            Policy::Replace | Policy::DeepReplace => {
                let displaced = chain.pop_front(&mut self.cells);
                chain.push_front(&mut self.cells, value);
                if displaced.is_none() {
                    self.grow_path(handle, 1);
                }
                match policy {
                    Policy::Replace => Put::Replaced(displaced),
                    _ => Put::Replaced(None),
                }
            }
        };
        self.nodes.get_mut(handle).chain = chain;
        outcome
    }

    /// Links a new red leaf under `parent` and restores balance above it.
    pub(super) fn attach(&mut self, key: K, chain: Chain, parent: Option<Handle>, side: Side) -> Handle {
        let handle = self.nodes.alloc(Node::leaf(key, chain, parent));
        match parent {
            None => self.root = Some(handle),
            Some(p) => {
                let node = self.nodes.get_mut(p);
                match side {
                    Side::Left => node.left = Some(handle),
                    Side::Right => node.right = Some(handle),
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(slot = handle.slot(), values = chain.len(), "node created");

        self.unwind(parent);
        handle
    }
}
