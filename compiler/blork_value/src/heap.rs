//! Shared, identity-bearing container cells.
//!
//! `Heap<T>` is the only way container values are allocated. The constructor
//! is crate-private, so callers go through the factory methods on `Value`.

use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A shared, interior-mutable container cell.
///
/// Clones share the allocation; [`Heap::id`] identifies it. Two cells with
/// equal contents are still distinct values.
pub struct Heap<T>(Arc<RwLock<T>>);

impl<T> Heap<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Arc::new(RwLock::new(value)))
    }

    /// Shared access to the contents.
    ///
    /// Guards must not be held across a recursive walk; clone out what is
    /// needed and drop the guard first.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }

    /// Exclusive access to the contents.
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write()
    }

    /// Address of the shared allocation.
    #[inline]
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Clone> Heap<T> {
    /// Clone of the current contents, taken under a short read lock.
    #[inline]
    pub fn snapshot(&self) -> T {
        self.0.read().clone()
    }
}

impl<T> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Heap({:#x})", self.id())
    }
}
