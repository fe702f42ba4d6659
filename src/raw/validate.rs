use core::cmp::Ordering;

use super::handle::Handle;
use super::raw_osrb_tree::RawOSRBTree;
use crate::compare::Comparator;
use crate::error::Violation;

impl<K, V, C: Comparator<K>> RawOSRBTree<K, V, C> {
    /// Verifies every structural invariant in one in-order pass, reporting the first breach.
    pub(crate) fn check(&self) -> Result<(), Violation> {
        let Some(root) = self.root else {
            return Ok(());
        };
        if self.nodes.get(root).is_red() {
            return Err(Violation::RedRoot);
        }

        let mut black_height = None;
        let mut previous: Option<Handle> = None;
        let mut current = Some(self.nodes.leftmost(root));
        let mut position = 0;

        while let Some(h) = current {
            let node = self.nodes.get(h);

            if let Some(p) = previous
                && self.comparator.compare(&self.nodes.get(p).key, &node.key) != Ordering::Less
            {
                return Err(Violation::OutOfOrder { position });
            }
            if !self.parent_link_holds(h, root) {
                return Err(Violation::BrokenParent { position });
            }
            if node.is_red() && (self.nodes.is_red(node.left) || self.nodes.is_red(node.right)) {
                return Err(Violation::RedRed { position });
            }
            if self.nodes.is_red(node.right) {
                return Err(Violation::RightLeaningRed { position });
            }

            let recorded = node.chain.len();
            let linked = self.linked_cells(node.chain.head(), recorded);
            if linked != recorded {
                return Err(Violation::ChainLength { position, recorded, linked });
            }

            let expected = recorded + self.nodes.size_of(node.left) + self.nodes.size_of(node.right);
            let stored = node.size.get();
            if stored != expected {
                return Err(Violation::SizeMismatch { position, stored, expected });
            }

            if node.left.is_none() || node.right.is_none() {
                let found = self.blacks_to_root(h);
                match black_height {
                    None => black_height = Some(found),
                    Some(expected) if expected != found => {
                        return Err(Violation::BlackHeight { position, expected, found });
                    }
                    Some(_) => {}
                }
            }

            previous = Some(h);
            current = self.nodes.successor(h);
            position += 1;
        }

        Ok(())
    }

    fn parent_link_holds(&self, h: Handle, root: Handle) -> bool {
        match self.nodes.get(h).parent {
            None => h == root,
            Some(p) => {
                let parent = self.nodes.get(p);
                h != root && (parent.left == Some(h) || parent.right == Some(h))
            }
        }
    }

    /// Counts linked cells, giving up one past `recorded` so a cycle cannot hang the check.
    fn linked_cells(&self, head: Option<Handle>, recorded: usize) -> usize {
        let mut linked = 0;
        let mut current = head;
        while let Some(cell) = current {
            linked += 1;
            if linked > recorded {
                break;
            }
            current = self.cells.get(cell).next();
        }
        linked
    }

    fn blacks_to_root(&self, h: Handle) -> usize {
        let mut blacks = 0;
        let mut current = Some(h);
        while let Some(c) = current {
            let node = self.nodes.get(c);
            if !node.is_red() {
                blacks += 1;
            }
            current = node.parent;
        }
        blacks
    }
}
