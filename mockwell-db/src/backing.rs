//! The test-owned collection behind every adapter.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// A shared, ordered, mutable sequence of entities.
///
/// Cloning a `Backing` clones the handle, not the data: the test keeps one
/// handle for assertions and hands another to a [`MockSet`](crate::MockSet),
/// and both observe the same sequence.
///
/// # Example
///
/// ```
/// use mockwell_db::Backing;
///
/// let data = Backing::from(vec![1, 2]);
/// let view = data.clone();
/// data.push(3);
///
/// assert_eq!(view.snapshot(), vec![1, 2, 3]);
/// assert!(data.ptr_eq(&view));
/// ```
pub struct Backing<T> {
    items: Arc<RwLock<Vec<T>>>,
}

impl<T> Backing<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Wrap an existing vector.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Check whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Append an entry directly, bypassing any adapter.
    pub fn push(&self, item: T) {
        self.items.write().push(item);
    }

    /// Run `f` with shared access to the current contents.
    ///
    /// Do not call back into an adapter over the same collection from `f`.
    pub fn with_read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.items.read())
    }

    /// Run `f` with exclusive access to the current contents.
    ///
    /// Do not call back into an adapter over the same collection from `f`.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        f(&mut self.items.write())
    }

    /// Check whether two handles share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl<T: Clone> Backing<T> {
    /// Copy of the current contents, in order.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.read().clone()
    }
}

impl<T: PartialEq> Backing<T> {
    /// Check whether an entry equal to `item` is present.
    pub fn contains(&self, item: &T) -> bool {
        self.items.read().contains(item)
    }

    /// Number of entries equal to `item`.
    pub fn occurrences(&self, item: &T) -> usize {
        self.items.read().iter().filter(|e| *e == item).count()
    }
}

impl<T> Clone for Backing<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for Backing<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Backing<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T> FromIterator<T> for Backing<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for Backing<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Backing").field(&*self.items.read()).finish()
    }
}
