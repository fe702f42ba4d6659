use super::arena::Arena;
use super::chain::Chain;
use super::handle::Handle;
use super::size::Size;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub(crate) const fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// A key, the chain of values recorded under it, and its place in the tree.
///
/// `left` and `right` own their subtrees: a slot is freed exactly when its node leaves
/// the tree. `parent` is a plain back-reference used for upward walks.
#[derive(Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) chain: Chain,
    /// Chain entries in this subtree, including `chain.len()` itself.
    pub(crate) size: Size,
    pub(crate) color: Color,
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
}

impl<K> Node<K> {
    /// A fresh red leaf, the only shape in which nodes enter the tree.
    pub(crate) fn leaf(key: K, chain: Chain, parent: Option<Handle>) -> Self {
        Self {
            key,
            size: Size::from_usize(chain.len()),
            chain,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

// Navigation only needs the node arena, so iterators can walk without the comparator.
impl<K> Arena<Node<K>> {
    #[inline]
    pub(crate) fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.get(h).is_red())
    }

    #[inline]
    pub(crate) fn size_of(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |h| self.get(h).size.get())
    }

    #[inline]
    pub(crate) fn left_of(&self, handle: Option<Handle>) -> Option<Handle> {
        handle.and_then(|h| self.get(h).left)
    }

    pub(crate) fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.get(handle).left {
            handle = left;
        }
        handle
    }

    pub(crate) fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.get(handle).right {
            handle = right;
        }
        handle
    }

    /// The in-order next node, found through the right subtree or the parent links.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.get(handle).right {
            return Some(self.leftmost(right));
        }
        let mut child = handle;
        let mut parent = self.get(handle).parent;
        while let Some(p) = parent {
            if self.get(p).left == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.get(p).parent;
        }
        None
    }

    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.get(handle).left {
            return Some(self.rightmost(left));
        }
        let mut child = handle;
        let mut parent = self.get(handle).parent;
        while let Some(p) = parent {
            if self.get(p).right == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.get(p).parent;
        }
        None
    }

    /// The first node of a post-order walk of the subtree under `handle`.
    pub(crate) fn deepest_first(&self, mut handle: Handle) -> Handle {
        loop {
            let node = self.get(handle);
            match (node.left, node.right) {
                (Some(next), _) | (None, Some(next)) => handle = next,
                (None, None) => return handle,
            }
        }
    }

    /// The node visited after `handle` in a post-order walk.
    pub(crate) fn post_order_next(&self, handle: Handle) -> Option<Handle> {
        let parent = self.get(handle).parent?;
        let node = self.get(parent);
        match node.right {
            Some(right) if node.left == Some(handle) => Some(self.deepest_first(right)),
            _ => Some(parent),
        }
    }
}
