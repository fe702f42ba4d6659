use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes and chain cells.
///
/// Freed handles go on a free list and are handed out again before the slot vector grows,
/// so a handle is only ever reused after the element it named has left the tree.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

/// The arena could not make room for the requested number of elements.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ReserveFailed;

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    /// Makes sure the next `additional` calls to [`Arena::alloc`] neither reallocate nor
    /// run out of handles.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), ReserveFailed> {
        let fresh = additional.saturating_sub(self.free.len());
        if self.slots.len().saturating_add(fresh) > Handle::MAX {
            return Err(ReserveFailed);
        }
        self.slots.try_reserve(fresh).map_err(|_| ReserveFailed)
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.slot()] = Some(element);
            return handle;
        }
        // Strict less-than keeps the element count within `Size::MAX`.
        assert!(
            self.slots.len() < Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX
        );
        self.slots.push(Some(element));
        Handle::new(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.slot()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.slot()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.slot()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
