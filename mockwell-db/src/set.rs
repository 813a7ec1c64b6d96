//! The data-set double.

use crate::backing::Backing;
use crate::config::{CollectionConfig, RemovalPolicy};
use crate::cursor::AsyncCursor;
use crate::entry::{Entity, EntityEntry};
use crate::error::{CollectionError, LookupError};
use crate::key::KeyValue;
use crate::query::Query;
use crate::source::{AsyncEnumerable, QuerySource};
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Caller-supplied point lookup.
pub type LookupFn<T> = Arc<dyn Fn(&[KeyValue]) -> Result<Option<T>, LookupError> + Send + Sync>;

/// A queryable, mutable data set backed by a test-owned [`Backing`].
///
/// Reads go through [`QuerySource`] / [`AsyncEnumerable`]; writes go
/// straight to the backing collection before the call returns. Async
/// variants have the same effect as their sync counterparts and resolve
/// without suspending.
///
/// # Example
///
/// ```
/// use mockwell_db::prelude::*;
///
/// let data = Backing::from(vec![10, 20]);
/// let set = MockSet::new(data.clone());
///
/// set.add(30);
/// set.remove(&10).unwrap();
///
/// assert_eq!(data.snapshot(), vec![20, 30]);
/// assert_eq!(set.order_by_desc(|v| *v).first(), Some(30));
/// ```
pub struct MockSet<T> {
    backing: Backing<T>,
    lookup: Option<LookupFn<T>>,
    config: CollectionConfig,
}

impl<T: Entity> MockSet<T> {
    /// Wrap `backing` with default configuration and no lookup function.
    pub fn new(backing: Backing<T>) -> Self {
        Self::with_config(backing, CollectionConfig::default())
    }

    /// Wrap `backing` with the given configuration.
    pub fn with_config(backing: Backing<T>, config: CollectionConfig) -> Self {
        Self {
            backing,
            lookup: None,
            config,
        }
    }

    /// Use `lookup` to answer [`find`](Self::find).
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&[KeyValue]) -> Result<Option<T>, LookupError> + Send + Sync + 'static,
    {
        self.lookup = Some(Arc::new(lookup));
        self
    }

    /// Answer [`find`](Self::find) with the first entity whose key equals
    /// the single requested key.
    ///
    /// The lookup reads the backing collection at call time and fails with
    /// [`LookupError::Arity`] unless exactly one key is supplied.
    pub fn with_key<K, F>(self, key: F) -> Self
    where
        K: Into<KeyValue>,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        let backing = self.backing.clone();
        self.with_lookup(move |keys| {
            let [wanted] = keys else {
                return Err(LookupError::Arity {
                    expected: 1,
                    actual: keys.len(),
                });
            };
            Ok(backing.with_read(|items| {
                items
                    .iter()
                    .find(|e| {
                        let candidate: KeyValue = key(e).into();
                        candidate == *wanted
                    })
                    .cloned()
            }))
        })
    }

    /// The backing collection.
    pub fn backing(&self) -> &Backing<T> {
        &self.backing
    }

    /// The active configuration.
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Number of entities currently stored.
    pub fn len(&self) -> usize {
        self.backing.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.backing.is_empty()
    }

    /// Every stored entity, in stored order.
    pub fn to_vec(&self) -> Vec<T> {
        self.backing.snapshot()
    }

    /// Evaluate the whole set and iterate.
    pub fn iter(&self) -> std::vec::IntoIter<T> {
        self.to_vec().into_iter()
    }

    /// Point lookup by key tuple.
    ///
    /// Without a lookup function this is always `Ok(None)`. Errors from the
    /// lookup function are returned as raised.
    pub fn find(&self, keys: &[KeyValue]) -> Result<Option<T>, LookupError> {
        match &self.lookup {
            Some(lookup) => lookup(keys),
            None => Ok(None),
        }
    }

    /// Async counterpart of [`find`](Self::find).
    pub async fn find_async(
        &self,
        keys: &[KeyValue],
        _cancel: Option<&CancellationToken>,
    ) -> Result<Option<T>, LookupError> {
        self.find(keys)
    }

    /// Append `entity` and return its entry.
    pub fn add(&self, entity: T) -> EntityEntry<T> {
        self.backing.push(entity.clone());
        tracing::debug!(count = 1, "Added entity");
        EntityEntry::new(entity, self.backing.clone())
    }

    /// Async counterpart of [`add`](Self::add).
    pub async fn add_async(
        &self,
        entity: T,
        _cancel: Option<&CancellationToken>,
    ) -> EntityEntry<T> {
        self.add(entity)
    }

    /// Append every entity, preserving order. Returns how many were added.
    pub fn add_range<I>(&self, entities: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let entities: Vec<T> = entities.into_iter().collect();
        let count = entities.len();
        self.backing.with_write(|items| items.extend(entities));
        tracing::debug!(count, "Added entities");
        count
    }

    /// Async counterpart of [`add_range`](Self::add_range).
    pub async fn add_range_async<I>(
        &self,
        entities: I,
        _cancel: Option<&CancellationToken>,
    ) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        self.add_range(entities)
    }

    /// Start tracking `entity`. Identical in effect to [`add`](Self::add).
    pub fn attach(&self, entity: T) -> EntityEntry<T> {
        self.add(entity)
    }

    /// Async counterpart of [`attach`](Self::attach).
    pub async fn attach_async(
        &self,
        entity: T,
        _cancel: Option<&CancellationToken>,
    ) -> EntityEntry<T> {
        self.add(entity)
    }

    /// Track every entity. Identical in effect to [`add_range`](Self::add_range).
    pub fn attach_range<I>(&self, entities: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        self.add_range(entities)
    }

    /// Remove the first entity equal to `entity`.
    ///
    /// Returns whether anything was removed. An absent entity is ignored
    /// unless the set is configured with [`RemovalPolicy::Strict`].
    pub fn remove(&self, entity: &T) -> Result<bool, CollectionError> {
        self.remove_range(std::iter::once(entity)).map(|n| n == 1)
    }

    /// Remove the first entity equal to each target, in order.
    ///
    /// Under [`RemovalPolicy::Strict`] the call is all-or-nothing: if any
    /// target has no remaining match, nothing is removed.
    pub fn remove_range<'a, I>(&self, entities: I) -> Result<usize, CollectionError>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let targets: Vec<&T> = entities.into_iter().collect();
        let strict = self.config.removal == RemovalPolicy::Strict;

        let outcome = self.backing.with_write(|items| {
            let mut remaining = items.clone();
            let mut removed = 0;
            for target in &targets {
                if let Some(pos) = remaining.iter().position(|e| e == *target) {
                    remaining.remove(pos);
                    removed += 1;
                }
            }

            let missing = targets.len() - removed;
            if strict && missing > 0 {
                return Err(CollectionError::EntityNotFound {
                    missing,
                    requested: targets.len(),
                });
            }

            *items = remaining;
            Ok(removed)
        });

        match &outcome {
            Ok(removed) => tracing::debug!(count = removed, "Removed entities"),
            Err(e) => tracing::warn!(error = %e, "Strict removal rejected"),
        }
        outcome
    }

    /// Remove every entity present at call time. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let removed = self.backing.with_write(|items| items.drain(..).count());
        tracing::debug!(count = removed, "Cleared entities");
        removed
    }
}

impl<T: Entity> QuerySource for MockSet<T> {
    type Item = T;

    fn query(&self) -> Query<T> {
        Query::from_backing(self.backing.clone())
    }
}

impl<T: Entity> AsyncEnumerable<T> for MockSet<T> {
    fn async_cursor(&self, cancel: Option<&CancellationToken>) -> AsyncCursor<T> {
        self.query().async_cursor(cancel)
    }
}

impl<T: Entity> IntoIterator for &MockSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Clone for MockSet<T> {
    fn clone(&self) -> Self {
        Self {
            backing: self.backing.clone(),
            lookup: self.lookup.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T> fmt::Debug for MockSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockSet")
            .field("len", &self.backing.len())
            .field("has_lookup", &self.lookup.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl<T: Entity> From<Backing<T>> for MockSet<T> {
    fn from(backing: Backing<T>) -> Self {
        Self::new(backing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Blog {
        id: i32,
        name: &'static str,
    }

    fn blog(id: i32, name: &'static str) -> Blog {
        Blog { id, name }
    }

    fn blogs() -> Backing<Blog> {
        Backing::from(vec![blog(1, "one"), blog(2, "two"), blog(3, "three")])
    }

    #[test]
    fn find_without_lookup_is_none() {
        let set = MockSet::new(blogs());
        assert_eq!(set.find(&[1.into()]).unwrap(), None);
        assert_eq!(set.find(&[]).unwrap(), None);
    }

    #[test]
    fn find_with_key_selector() {
        let set = MockSet::new(blogs()).with_key(|b: &Blog| b.id);
        assert_eq!(set.find(&[1.into()]).unwrap().map(|b| b.name), Some("one"));
        assert_eq!(set.find(&[9.into()]).unwrap(), None);
    }

    #[test]
    fn key_selector_rejects_wrong_arity() {
        let set = MockSet::new(blogs()).with_key(|b: &Blog| b.id);
        let err = set.find(&[1.into(), 2.into()]).unwrap_err();
        assert!(matches!(
            err,
            LookupError::Arity {
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn lookup_errors_propagate() {
        let data = blogs();
        let set = MockSet::new(data.clone()).with_lookup(move |keys| {
            let id = keys[0].as_i64()?;
            let found = data.with_read(|items| {
                items.iter().find(|b| i64::from(b.id) == id).cloned()
            });
            Ok(found)
        });

        let err = set.find(&["one".into()]).unwrap_err();
        assert!(matches!(err, LookupError::KeyType { .. }));
        assert_eq!(set.find(&[2.into()]).unwrap().map(|b| b.id), Some(2));
    }

    #[test]
    fn key_lookup_sees_later_adds() {
        let set = MockSet::new(blogs()).with_key(|b: &Blog| b.id);
        set.add(blog(4, "four"));
        assert!(set.find(&[4.into()]).unwrap().is_some());
    }

    #[test]
    fn add_and_attach_write_through() {
        let data = blogs();
        let set = MockSet::new(data.clone());

        let entry = set.add(blog(4, "four"));
        set.attach(blog(5, "five"));

        assert_eq!(data.len(), 5);
        assert!(entry.is_tracked());
        assert_eq!(entry.entity().id, 4);
        assert_eq!(entry.position(), Some(3));
    }

    #[test]
    fn add_range_preserves_order() {
        let data = Backing::new();
        let set = MockSet::new(data.clone());
        assert_eq!(set.add_range(vec![3, 1, 2]), 3);
        assert_eq!(set.attach_range([9]), 1);
        assert_eq!(data.snapshot(), vec![3, 1, 2, 9]);
    }

    #[test]
    fn remove_first_match_only() {
        let data = Backing::from(vec![1, 2, 1, 3]);
        let set = MockSet::new(data.clone());

        assert!(set.remove(&1).unwrap());
        assert_eq!(data.snapshot(), vec![2, 1, 3]);
    }

    #[test]
    fn remove_absent_is_silent_by_default() {
        let data = Backing::from(vec![1, 2]);
        let set = MockSet::new(data.clone());

        assert!(!set.remove(&7).unwrap());
        assert_eq!(set.remove_range(&[2, 7]).unwrap(), 1);
        assert_eq!(data.snapshot(), vec![1]);
    }

    #[test]
    fn strict_removal_is_all_or_nothing() {
        let data = Backing::from(vec![1, 2, 3]);
        let set = MockSet::with_config(data.clone(), CollectionConfig::new().strict());

        let err = set.remove_range(&[1, 2, 2]).unwrap_err();
        assert_eq!(
            err,
            CollectionError::EntityNotFound {
                missing: 1,
                requested: 3
            }
        );
        assert_eq!(data.snapshot(), vec![1, 2, 3]);

        assert!(set.remove(&9).is_err());
        assert_eq!(set.remove_range(&[3, 1]).unwrap(), 2);
        assert_eq!(data.snapshot(), vec![2]);
    }

    #[test]
    fn clear_then_add() {
        let data = blogs();
        let set = MockSet::new(data.clone());

        assert_eq!(set.clear(), 3);
        assert!(data.is_empty());

        set.add(blog(7, "seven"));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn enumeration_reflects_mutations() {
        let set = MockSet::new(blogs());
        let before = set.to_vec();
        assert_eq!(before, set.to_vec());

        let added = blog(8, "eight");
        set.add(added.clone());
        assert!(set.iter().any(|b| b == added));

        set.remove(&added).unwrap();
        assert!(!set.iter().any(|b| b == added));
        assert_eq!(set.to_vec(), before);
    }

    #[test]
    fn clones_share_backing_and_lookup() {
        let set = MockSet::new(blogs()).with_key(|b: &Blog| b.id);
        let other = set.clone();
        other.add(blog(4, "four"));

        assert_eq!(set.len(), 4);
        assert!(set.find(&[4.into()]).unwrap().is_some());
        assert!(set.backing().ptr_eq(other.backing()));
    }

    #[tokio::test]
    async fn async_mutations_complete_before_resolving() {
        let data = Backing::new();
        let set = MockSet::new(data.clone());
        let token = CancellationToken::new();
        token.cancel();

        set.add_async(1, Some(&token)).await;
        set.add_range_async(vec![2, 3], None).await;
        set.attach_async(4, None).await;

        assert_eq!(data.snapshot(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn find_async_matches_find() {
        let set = MockSet::new(blogs()).with_key(|b: &Blog| b.id);
        let found = set
            .find_async(&[3.into()], Some(&CancellationToken::new()))
            .await
            .unwrap();
        assert_eq!(found.map(|b| b.name), Some("three"));
    }
}
