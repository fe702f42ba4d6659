use alloc::collections::VecDeque;

use smallvec::SmallVec;

use super::handle::Handle;
use super::raw_osrb_tree::RawOSRBTree;
use crate::traversal::Order;

/// Pending subtrees for a pre-order walk. A balanced tree of any addressable size stays
/// well within the inline capacity.
type Stack = SmallVec<[Handle; 32]>;

impl<K, V, C> RawOSRBTree<K, V, C> {
    /// Calls `visit` with every node handle in `order`.
    pub(crate) fn visit(&self, order: Order, mut visit: impl FnMut(Handle)) {
        let Some(root) = self.root else {
            return;
        };

        match order {
            Order::PreOrder => {
                let mut stack = Stack::new();
                stack.push(root);
                while let Some(h) = stack.pop() {
                    visit(h);
                    let node = self.nodes.get(h);
                    stack.extend(node.right);
                    stack.extend(node.left);
                }
            }
            Order::InOrder => {
                let mut current = Some(self.nodes.leftmost(root));
                while let Some(h) = current {
                    visit(h);
                    current = self.nodes.successor(h);
                }
            }
            Order::PostOrder => {
                let mut current = Some(self.nodes.deepest_first(root));
                while let Some(h) = current {
                    visit(h);
                    current = self.nodes.post_order_next(h);
                }
            }
            Order::LevelOrder => {
                let mut queue = VecDeque::with_capacity(self.key_count().min(64));
                queue.push_back(root);
                while let Some(h) = queue.pop_front() {
                    visit(h);
                    let node = self.nodes.get(h);
                    queue.extend(node.left);
                    queue.extend(node.right);
                }
            }
        }
    }
}
