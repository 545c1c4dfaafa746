use std::fmt;
use std::rc::Rc;

/// A strong type for the identity of one compound allocation.
///
/// Two compound values have the same id iff they are the same `Rc` allocation. Ids are only
/// meaningful while the graph they were taken from is alive, i.e. within one walk.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompoundId(usize);

impl CompoundId {
    /// Takes the identity of an `Rc` allocation.
    pub(crate) fn of<T: ?Sized>(rc: &Rc<T>) -> Self {
        Self(Rc::as_ptr(rc).cast::<()>() as usize)
    }

    /// Returns the raw address value.
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for CompoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompoundId({:#x})", self.0)
    }
}

impl fmt::Display for CompoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}
