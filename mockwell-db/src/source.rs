//! Capability traits shared by sets and queries.
//!
//! Code under test should accept `impl QuerySource<Item = T>` (and, where it
//! enumerates asynchronously, `impl AsyncEnumerable<T>`) rather than a
//! concrete [`MockSet`](crate::MockSet), so the same code runs against the
//! double and the real data set.

use crate::cursor::AsyncCursor;
use crate::descriptor::QueryStep;
use crate::query::Query;
use std::cmp::Ordering;
use tokio_util::sync::CancellationToken;

/// Something a deferred query can be composed over.
///
/// Only [`query`](Self::query) is required; every composition method builds
/// on it and returns a new [`Query`] without touching `self`.
pub trait QuerySource {
    /// Row type.
    type Item: Clone + Send + Sync + 'static;

    /// A query over every row of this source.
    fn query(&self) -> Query<Self::Item>;

    /// Keep rows for which `predicate` holds.
    fn filter<P>(&self, predicate: P) -> Query<Self::Item>
    where
        P: Fn(&Self::Item) -> bool + Send + Sync + 'static,
    {
        self.query().compose(QueryStep::filter(predicate))
    }

    /// Sort ascending by `key`.
    fn order_by<K, F>(&self, key: F) -> Query<Self::Item>
    where
        K: Ord,
        F: Fn(&Self::Item) -> K + Send + Sync + 'static,
    {
        self.query().compose(QueryStep::order_by(key, false))
    }

    /// Sort descending by `key`.
    fn order_by_desc<K, F>(&self, key: F) -> Query<Self::Item>
    where
        K: Ord,
        F: Fn(&Self::Item) -> K + Send + Sync + 'static,
    {
        self.query().compose(QueryStep::order_by(key, true))
    }

    /// Sort ascending with an explicit comparator.
    fn order_by_with<C>(&self, compare: C) -> Query<Self::Item>
    where
        C: Fn(&Self::Item, &Self::Item) -> Ordering + Send + Sync + 'static,
    {
        self.query()
            .compose(QueryStep::order_by_with(compare, false))
    }

    /// Secondary ascending key. Same as [`order_by`](Self::order_by): every
    /// ordering key after the first only breaks ties.
    fn then_by<K, F>(&self, key: F) -> Query<Self::Item>
    where
        K: Ord,
        F: Fn(&Self::Item) -> K + Send + Sync + 'static,
    {
        self.order_by(key)
    }

    /// Secondary descending key.
    fn then_by_desc<K, F>(&self, key: F) -> Query<Self::Item>
    where
        K: Ord,
        F: Fn(&Self::Item) -> K + Send + Sync + 'static,
    {
        self.order_by_desc(key)
    }

    /// Include a related navigation path. Accepted and ignored in memory.
    fn include(&self, path: impl Into<String>) -> Query<Self::Item> {
        self.query().compose(QueryStep::include(path))
    }

    /// Project rows to another type.
    fn select<U, F>(&self, f: F) -> Query<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(&Self::Item) -> U + Send + Sync + 'static,
    {
        self.query().project(f)
    }
}

/// Something that can be enumerated asynchronously.
pub trait AsyncEnumerable<T> {
    /// Materialize the current rows behind a cursor.
    ///
    /// `cancel` is accepted for parity with real async data sources; no
    /// step ever waits, so it has nothing to interrupt.
    fn async_cursor(&self, cancel: Option<&CancellationToken>) -> AsyncCursor<T>;
}
