//! Rotations and color flips. Every primitive keeps parent links, the grandparent's child
//! link (or the root) and subtree sizes consistent, so callers can rotate mid-descent.

use super::handle::Handle;
use super::node::Color;
use super::raw_osrb_tree::RawOSRBTree;

impl<K, V, C> RawOSRBTree<K, V, C> {
    /// Points whatever referenced `old` (its parent's child link, or the root) at `new`.
    fn relink(&mut self, parent: Option<Handle>, old: Handle, new: Handle) {
        match parent {
            None => self.root = Some(new),
            Some(p) => {
                let node = self.nodes.get_mut(p);
                if node.left == Some(old) {
                    node.left = Some(new);
                } else {
                    debug_assert_eq!(node.right, Some(old), "`relink()` - parent does not own child!");
                    node.right = Some(new);
                }
            }
        }
        self.nodes.get_mut(new).parent = parent;
    }

    /// Promotes `h`'s right child. Returns the new subtree root.
    pub(super) fn rotate_left(&mut self, h: Handle) -> Handle {
        let x = self.nodes.get(h).right.expect("`rotate_left()` - node has no right child!");
        let parent = self.nodes.get(h).parent;

        let inner = self.nodes.get(x).left;
        self.nodes.get_mut(h).right = inner;
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).parent = Some(h);
        }

        self.relink(parent, h, x);
        self.nodes.get_mut(x).left = Some(h);
        self.nodes.get_mut(h).parent = Some(x);

        let color = self.nodes.get(h).color;
        self.nodes.get_mut(x).color = color;
        self.nodes.get_mut(h).color = Color::Red;
        self.update_size(h);
        self.update_size(x);
        x
    }

    /// Promotes `h`'s left child. Returns the new subtree root.
    pub(super) fn rotate_right(&mut self, h: Handle) -> Handle {
        let x = self.nodes.get(h).left.expect("`rotate_right()` - node has no left child!");
        let parent = self.nodes.get(h).parent;

        let inner = self.nodes.get(x).right;
        self.nodes.get_mut(h).left = inner;
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).parent = Some(h);
        }

        self.relink(parent, h, x);
        self.nodes.get_mut(x).right = Some(h);
        self.nodes.get_mut(h).parent = Some(x);

        let color = self.nodes.get(h).color;
        self.nodes.get_mut(x).color = color;
        self.nodes.get_mut(h).color = Color::Red;
        self.update_size(h);
        self.update_size(x);
        x
    }

    pub(super) fn flip_colors(&mut self, h: Handle) {
        let node = self.nodes.get_mut(h);
        node.color = node.color.flipped();
        let (left, right) = (node.left, node.right);
        for child in [left, right].into_iter().flatten() {
            let child = self.nodes.get_mut(child);
            child.color = child.color.flipped();
        }
    }

    /// Makes `h.left` or one of its children red, assuming `h` is red and both `h.left`
    /// and `h.left.left` are black.
    pub(super) fn move_red_left(&mut self, h: Handle) -> Handle {
        self.flip_colors(h);
        let right = self.nodes.get(h).right;
        if self.nodes.is_red(self.nodes.left_of(right)) {
            if let Some(right) = right {
                self.rotate_right(right);
            }
            let h = self.rotate_left(h);
            self.flip_colors(h);
            return h;
        }
        h
    }

    /// Makes `h.right` or one of its children red, assuming `h` is red and both `h.right`
    /// and `h.right.left` are black.
    pub(super) fn move_red_right(&mut self, h: Handle) -> Handle {
        self.flip_colors(h);
        let left = self.nodes.get(h).left;
        if self.nodes.is_red(self.nodes.left_of(left)) {
            let h = self.rotate_right(h);
            self.flip_colors(h);
            return h;
        }
        h
    }

    /// Restores the left-leaning shape at `h` and recomputes its size.
    pub(super) fn rebalance(&mut self, mut h: Handle) -> Handle {
        if self.nodes.is_red(self.nodes.get(h).right) {
            h = self.rotate_left(h);
        }
        let left = self.nodes.get(h).left;
        if self.nodes.is_red(left) && self.nodes.is_red(self.nodes.left_of(left)) {
            h = self.rotate_right(h);
        }
        let node = self.nodes.get(h);
        if self.nodes.is_red(node.left) && self.nodes.is_red(node.right) {
            self.flip_colors(h);
        }
        self.update_size(h);
        h
    }

    /// Rebalances every node from `from` up to the root, then blackens the root.
    pub(super) fn unwind(&mut self, from: Option<Handle>) {
        let mut current = from;
        while let Some(h) = current {
            let h = self.rebalance(h);
            current = self.nodes.get(h).parent;
        }
        self.blacken_root();
    }

    pub(super) fn blacken_root(&mut self) {
        if let Some(root) = self.root {
            let node = self.nodes.get_mut(root);
            if node.is_red() {
                node.color = Color::Black;
                #[cfg(feature = "tracing")]
                tracing::trace!(slot = root.slot(), "root recolored black");
            }
        }
    }

    /// Reddens the root ahead of a top-down deletion when neither child is red.
    pub(super) fn redden_root(&mut self) {
        if let Some(root) = self.root {
            let node = self.nodes.get(root);
            if !self.nodes.is_red(node.left) && !self.nodes.is_red(node.right) {
                self.nodes.get_mut(root).color = Color::Red;
            }
        }
    }
}
