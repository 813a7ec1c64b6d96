//! Deferred queries over a backing collection.
//!
//! A [`Query`] is a source plus a list of [`QueryStep`]s. Nothing is read
//! until the query is enumerated; every enumeration reads the source again,
//! so a query composed before a mutation sees the mutation.
//!
//! Evaluation applies filters in order, then sorts the survivors once with a
//! composite comparator built from every ordering step (first key dominant,
//! later keys breaking ties). Sorting is stable and filters preserve relative
//! order, so this is equivalent to applying each step where it was composed.

use crate::backing::Backing;
use crate::cursor::AsyncCursor;
use crate::descriptor::{Comparator, QueryOp, QueryStep};
use crate::source::{AsyncEnumerable, QuerySource};
use futures::StreamExt;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

type Upstream<T> = Arc<dyn Fn() -> Vec<T> + Send + Sync>;

enum Source<T> {
    /// Rows come straight from the backing collection.
    Backing(Backing<T>),
    /// Rows come from evaluating an upstream query and projecting each row.
    Project {
        upstream: Upstream<T>,
        lineage: Vec<QueryOp>,
    },
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Backing(b) => Self::Backing(b.clone()),
            Self::Project { upstream, lineage } => Self::Project {
                upstream: Arc::clone(upstream),
                lineage: lineage.clone(),
            },
        }
    }
}

/// A composable, lazily evaluated query.
///
/// Composition (via [`QuerySource`]) returns a new handle; the original is
/// untouched and both share the same backing collection.
pub struct Query<T> {
    source: Source<T>,
    steps: Vec<QueryStep<T>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            steps: self.steps.clone(),
        }
    }
}

impl<T> Query<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// A query returning every row of `backing`, in stored order.
    pub fn from_backing(backing: Backing<T>) -> Self {
        Self {
            source: Source::Backing(backing),
            steps: Vec::new(),
        }
    }

    /// Return a new query with `step` appended.
    pub fn compose(&self, step: QueryStep<T>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self {
            source: self.source.clone(),
            steps,
        }
    }

    /// Project each row through `f`. Later steps apply to the projected rows.
    pub fn project<U, F>(&self, f: F) -> Query<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        let mut lineage = self.describe();
        lineage.push(QueryOp::Project);

        let upstream = self.clone();
        Query {
            source: Source::Project {
                upstream: Arc::new(move || upstream.evaluate().iter().map(&f).collect()),
                lineage,
            },
            steps: Vec::new(),
        }
    }

    /// Every step composed so far, projections included, in order.
    pub fn describe(&self) -> Vec<QueryOp> {
        let mut ops = match &self.source {
            Source::Backing(_) => Vec::new(),
            Source::Project { lineage, .. } => lineage.clone(),
        };
        ops.extend(self.steps.iter().map(QueryStep::op));
        ops
    }

    /// The backing collection this query ultimately reads, if it has not
    /// been projected.
    pub fn backing(&self) -> Option<&Backing<T>> {
        match &self.source {
            Source::Backing(b) => Some(b),
            Source::Project { .. } => None,
        }
    }

    fn evaluate(&self) -> Vec<T> {
        let mut rows = match &self.source {
            Source::Backing(b) => b.snapshot(),
            Source::Project { upstream, .. } => upstream(),
        };

        let mut keys: Vec<(&Comparator<T>, bool)> = Vec::new();
        for step in &self.steps {
            match step {
                QueryStep::Filter(predicate) => rows.retain(|row| predicate(row)),
                QueryStep::OrderBy {
                    compare,
                    descending,
                } => keys.push((compare, *descending)),
                QueryStep::Include(_) => {}
            }
        }

        if !keys.is_empty() {
            rows.sort_by(|a, b| {
                keys.iter()
                    .map(|(compare, descending)| {
                        let ord = compare(a, b);
                        if *descending { ord.reverse() } else { ord }
                    })
                    .find(|ord| *ord != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }

        tracing::trace!(
            rows = rows.len(),
            steps = self.steps.len(),
            "Evaluated query"
        );
        rows
    }

    /// Evaluate and iterate.
    pub fn iter(&self) -> std::vec::IntoIter<T> {
        self.evaluate().into_iter()
    }

    /// Evaluate into a vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.evaluate()
    }

    /// Number of rows the query currently yields.
    pub fn count(&self) -> usize {
        self.evaluate().len()
    }

    /// First row, if any.
    pub fn first(&self) -> Option<T> {
        self.evaluate().into_iter().next()
    }

    /// Whether any row satisfies `predicate`.
    pub fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.evaluate().iter().any(predicate)
    }

    /// Async counterpart of [`to_vec`](Self::to_vec).
    pub async fn to_vec_async(&self) -> Vec<T> {
        self.async_cursor(None).collect().await
    }

    /// Async counterpart of [`count`](Self::count).
    pub async fn count_async(&self) -> usize {
        self.async_cursor(None).count().await
    }

    /// Async counterpart of [`first`](Self::first).
    pub async fn first_async(&self) -> Option<T> {
        let mut cursor = self.async_cursor(None);
        if cursor.move_next().await {
            cursor.take_current()
        } else {
            None
        }
    }

    /// Run `f` on every row, asynchronously.
    pub async fn for_each_async(&self, mut f: impl FnMut(T)) {
        let mut cursor = self.async_cursor(None);
        while cursor.move_next().await {
            if let Some(row) = cursor.take_current() {
                f(row);
            }
        }
    }
}

impl<T> QuerySource for Query<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Item = T;

    fn query(&self) -> Query<T> {
        self.clone()
    }
}

impl<T> AsyncEnumerable<T> for Query<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn async_cursor(&self, _cancel: Option<&CancellationToken>) -> AsyncCursor<T> {
        AsyncCursor::new(self.evaluate())
    }
}

impl<T> IntoIterator for &Query<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Query<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> fmt::Debug for Query<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("ops", &self.describe())
            .finish()
    }
}
