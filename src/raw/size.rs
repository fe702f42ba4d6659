use super::handle::Handle;

/// A count of chain entries (a node's own chain, or a whole subtree).
///
/// Every entry occupies one cell slot, so no count can exceed the number of addressable
/// slots and the handle niche packing is reused.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ZERO: Self = Self::from_usize(0);
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::new(size))
    }

    #[inline]
    pub(crate) const fn get(self) -> usize {
        self.0.slot()
    }

    #[inline]
    #[must_use]
    pub(crate) const fn grow(self, by: usize) -> Self {
        Self::from_usize(self.get() + by)
    }

    #[inline]
    #[must_use]
    pub(crate) const fn shrink(self, by: usize) -> Self {
        assert!(by <= self.get(), "`Size::shrink()` - shrinking below zero!");
        Self::from_usize(self.get() - by)
    }
}
