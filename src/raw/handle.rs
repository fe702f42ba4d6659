use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of an occupied slot in an [`Arena`](super::arena::Arena).
///
/// Slots are stored off by one inside a `NonZero`, so every `Option<Handle>` link in the
/// tree (parent, children, chain successor) is exactly as wide as the handle itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Largest slot index a handle can address.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn new(slot: usize) -> Self {
        assert!(slot <= Self::MAX, "`Handle::new()` - `slot` exceeds `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        match NonZero::new((slot + 1) as RawHandle) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
