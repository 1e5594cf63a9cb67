use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Stable address of a node inside the tree's arena.
///
/// `parent`, `next` and child links are all stored as handles, so reparenting during a split is a
/// plain value update and `Option<Handle>` costs no more than the handle itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // Slot `n` is stored as `n + 1`; the bound above keeps it within `RawHandle`.
        #[allow(clippy::cast_possible_truncation)]
        let shifted = (index + 1) as RawHandle;
        match NonZero::new(shifted) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    /// Arena slot this handle addresses.
    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
