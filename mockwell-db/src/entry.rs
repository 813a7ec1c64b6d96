//! Entities and the entries returned when they are tracked.

use crate::backing::Backing;
use std::fmt;

/// Bound for values a [`MockSet`](crate::MockSet) can hold.
///
/// Equality is identity: removal and tracking checks compare with `==`.
pub trait Entity: Clone + PartialEq + Send + Sync + 'static {}

impl<T> Entity for T where T: Clone + PartialEq + Send + Sync + 'static {}

/// Token for an entity that was added or attached.
///
/// Keeps the value as it was when tracked plus a handle to the backing
/// collection, so a test can check later whether it is still there.
#[derive(Clone)]
pub struct EntityEntry<T> {
    entity: T,
    backing: Backing<T>,
}

impl<T: Entity> EntityEntry<T> {
    pub(crate) fn new(entity: T, backing: Backing<T>) -> Self {
        Self { entity, backing }
    }

    /// The tracked value.
    pub fn entity(&self) -> &T {
        &self.entity
    }

    /// Consume the entry, returning the tracked value.
    pub fn into_entity(self) -> T {
        self.entity
    }

    /// Whether an equal value is still in the backing collection.
    pub fn is_tracked(&self) -> bool {
        self.backing.contains(&self.entity)
    }

    /// The stored value equal to the tracked one, if it is still present.
    pub fn reload(&self) -> Option<T> {
        self.backing
            .with_read(|items| items.iter().find(|e| **e == self.entity).cloned())
    }

    /// Position of the first equal value in the backing collection.
    pub fn position(&self) -> Option<usize> {
        self.backing
            .with_read(|items| items.iter().position(|e| *e == self.entity))
    }
}

impl<T: fmt::Debug> fmt::Debug for EntityEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityEntry")
            .field("entity", &self.entity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_backing_membership() {
        let data = Backing::from(vec!["a", "b"]);
        let entry = EntityEntry::new("b", data.clone());

        assert!(entry.is_tracked());
        assert_eq!(entry.position(), Some(1));
        assert_eq!(entry.reload(), Some("b"));

        data.with_write(|items| items.retain(|v| *v != "b"));
        assert!(!entry.is_tracked());
        assert_eq!(entry.position(), None);
        assert_eq!(entry.reload(), None);
        assert_eq!(entry.into_entity(), "b");
    }
}
