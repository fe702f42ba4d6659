use core::cmp::Ordering;

use super::arena::Arena;
use super::chain::{Cell, Chain};
use super::handle::Handle;
use super::node::Node;
use crate::compare::Comparator;
use crate::error::Error;

/// The left-leaning red-black engine backing `OSRBTree`.
///
/// Cloning copies both arenas slot for slot, so handles stay valid in the clone.
#[derive(Clone)]
pub(crate) struct RawOSRBTree<K, V, C> {
    /// Arena storing all tree nodes.
    pub(super) nodes: Arena<Node<K>>,
    /// Arena storing every chain cell (separate from nodes so chains can grow freely).
    pub(super) cells: Arena<Cell<V>>,
    /// Handle to the root node, if the tree has any keys.
    pub(super) root: Option<Handle>,
    pub(super) comparator: C,
}

/// Which child link of a parent an absent key would hang from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Side {
    Left,
    Right,
}

/// Where a key is, or where it would be attached.
pub(super) enum Slot {
    Occupied(Handle),
    Vacant { parent: Option<Handle>, side: Side },
}

impl<K, V, C> RawOSRBTree<K, V, C> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(comparator: C) -> Self {
        Self {
            nodes: Arena::new(),
            cells: Arena::new(),
            root: None,
            comparator,
        }
    }

    /// Creates a new tree with room for `capacity` values (and as many keys).
    pub(crate) fn with_capacity(capacity: usize, comparator: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            cells: Arena::with_capacity(capacity),
            root: None,
            comparator,
        }
    }

    /// Number of chain entries in the whole tree, read off the root.
    pub(crate) fn len(&self) -> usize {
        self.nodes.size_of(self.root)
    }

    /// Number of distinct keys (nodes).
    pub(crate) const fn key_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cells.capacity()
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.comparator
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.cells.clear();
        self.root = None;
    }

    pub(crate) const fn nodes(&self) -> &Arena<Node<K>> {
        &self.nodes
    }

    pub(crate) const fn cells(&self) -> &Arena<Cell<V>> {
        &self.cells
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K> {
        self.nodes.get(handle)
    }

    pub(crate) fn front_mut(&mut self, handle: Handle) -> Option<&mut V> {
        let chain = self.nodes.get(handle).chain;
        chain.front_mut(&mut self.cells)
    }

    /// Reserves room for `keys` more nodes and `values` more chain cells, all or nothing
    /// as far as the caller can observe.
    pub(crate) fn try_reserve(&mut self, keys: usize, values: usize) -> Result<(), Error> {
        self.nodes.try_reserve(keys).map_err(|_| reserve_failed("nodes", keys))?;
        self.cells.try_reserve(values).map_err(|_| reserve_failed("values", values))
    }

    /// Adds `by` to the size of `from` and of every ancestor.
    pub(super) fn grow_path(&mut self, from: Handle, by: usize) {
        let mut current = Some(from);
        while let Some(h) = current {
            let node = self.nodes.get_mut(h);
            node.size = node.size.grow(by);
            current = node.parent;
        }
    }

    /// Subtracts `by` from the size of `from` and of every ancestor.
    pub(super) fn shrink_path(&mut self, from: Handle, by: usize) {
        let mut current = Some(from);
        while let Some(h) = current {
            let node = self.nodes.get_mut(h);
            node.size = node.size.shrink(by);
            current = node.parent;
        }
    }

    /// Recomputes a node's size from its chain and its children.
    #[inline]
    pub(super) fn update_size(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let total = node.chain.len() + self.nodes.size_of(node.left) + self.nodes.size_of(node.right);
        self.nodes.get_mut(handle).size = super::size::Size::from_usize(total);
    }

    /// Takes a detached node out of the arena.
    pub(super) fn release(&mut self, handle: Handle) -> (K, Chain) {
        let node = self.nodes.take(handle);
        (node.key, node.chain)
    }
}

impl<K, V, C: Comparator<K>> RawOSRBTree<K, V, C> {
    #[inline]
    pub(super) fn compare_at(&self, key: &K, handle: Handle) -> Ordering {
        self.comparator.compare(key, &self.nodes.get(handle).key)
    }

    /// Finds the node holding `key`.
    pub(crate) fn search(&self, key: &K) -> Option<Handle> {
        match self.locate(key) {
            Slot::Occupied(handle) => Some(handle),
            Slot::Vacant { .. } => None,
        }
    }

    pub(super) fn locate(&self, key: &K) -> Slot {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(h) = current {
            let node = self.nodes.get(h);
            match self.comparator.compare(key, &node.key) {
                Ordering::Less => {
                    side = Side::Left;
                    current = node.left;
                }
                Ordering::Greater => {
                    side = Side::Right;
                    current = node.right;
                }
                Ordering::Equal => return Slot::Occupied(h),
            }
            parent = Some(h);
        }

        Slot::Vacant { parent, side }
    }
}

fn reserve_failed(what: &'static str, additional: usize) -> Error {
    #[cfg(feature = "tracing")]
    tracing::warn!(what, additional, "arena reservation failed");
    Error::Reserve { what, additional }
}
