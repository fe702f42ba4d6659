use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::Handle;
use super::size::Size;

/// One link of a value chain.
#[derive(Clone)]
pub(crate) struct Cell<V> {
    value: V,
    next: Option<Handle>,
}

impl<V> Cell<V> {
    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    #[inline]
    pub(crate) fn next(&self) -> Option<Handle> {
        self.next
    }
}

/// The values recorded under one key: a singly linked list of cells, newest first.
///
/// A chain only names its cells; they live in the tree's cell arena, which every mutating
/// operation takes explicitly. The owning node's subtree size must be adjusted by the same
/// delta as `len` whenever a chain changes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Chain {
    head: Option<Handle>,
    len: Size,
}

impl Chain {
    pub(crate) const EMPTY: Self = Self {
        head: None,
        len: Size::ZERO,
    };

    #[inline]
    pub(crate) const fn len(self) -> usize {
        self.len.get()
    }

    #[inline]
    pub(crate) const fn head(self) -> Option<Handle> {
        self.head
    }

    /// Builds a chain whose front-to-back order matches `values`.
    pub(crate) fn from_values<V, I>(cells: &mut Arena<Cell<V>>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut chain = Self::EMPTY;
        chain.extend_front(cells, values);
        chain
    }

    pub(crate) fn push_front<V>(&mut self, cells: &mut Arena<Cell<V>>, value: V) {
        self.head = Some(cells.alloc(Cell { value, next: self.head }));
        self.len = self.len.grow(1);
    }

    /// Prepends `values`, keeping their order: the first item becomes the new front.
    pub(crate) fn extend_front<V, I>(&mut self, cells: &mut Arena<Cell<V>>, values: I)
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: DoubleEndedIterator,
    {
        for value in values.into_iter().rev() {
            self.push_front(cells, value);
        }
    }

    pub(crate) fn pop_front<V>(&mut self, cells: &mut Arena<Cell<V>>) -> Option<V> {
        let head = self.head?;
        let cell = cells.take(head);
        self.head = cell.next;
        self.len = self.len.shrink(1);
        Some(cell.value)
    }

    /// Unlinks the `k`th entry (0 = front). O(k).
    pub(crate) fn pop_kth<V>(&mut self, cells: &mut Arena<Cell<V>>, k: usize) -> Option<V> {
        if k == 0 {
            return self.pop_front(cells);
        }
        let before = self.nth_handle(cells, k - 1)?;
        let target = cells.get(before).next?;
        let cell = cells.take(target);
        cells.get_mut(before).next = cell.next;
        self.len = self.len.shrink(1);
        Some(cell.value)
    }

    /// Detaches everything behind the front entry and returns it as its own chain.
    pub(crate) fn split_after_front<V>(&mut self, cells: &mut Arena<Cell<V>>) -> Self {
        let Some(head) = self.head else {
            return Self::EMPTY;
        };
        let tail = Self {
            head: cells.get_mut(head).next.take(),
            len: self.len.shrink(1),
        };
        self.len = Size::ONE;
        tail
    }

    /// Frees every cell, returning the values front to back.
    pub(crate) fn drain<V>(mut self, cells: &mut Arena<Cell<V>>) -> Vec<V> {
        let mut values = Vec::with_capacity(self.len());
        while let Some(value) = self.pop_front(cells) {
            values.push(value);
        }
        values
    }

    pub(crate) fn nth<V>(self, cells: &Arena<Cell<V>>, k: usize) -> Option<&V> {
        self.nth_handle(cells, k).map(|h| cells.get(h).value())
    }

    pub(crate) fn front_mut<V>(self, cells: &mut Arena<Cell<V>>) -> Option<&mut V> {
        self.head.map(|h| cells.get_mut(h).value_mut())
    }

    fn nth_handle<V>(self, cells: &Arena<Cell<V>>, k: usize) -> Option<Handle> {
        let mut current = self.head;
        for _ in 0..k {
            current = cells.get(current?).next;
        }
        current
    }
}
