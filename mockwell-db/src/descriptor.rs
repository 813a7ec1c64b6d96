//! Query descriptors: the steps a [`Query`](crate::Query) is built from.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Shared row predicate.
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Shared row comparator.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// One pending query operation.
///
/// Steps are immutable; composing a query clones the `Arc`s, never the
/// closures.
pub enum QueryStep<T> {
    /// Keep rows for which the predicate holds.
    Filter(Predicate<T>),
    /// Sort by a comparator. Later ordering steps break ties left by earlier ones.
    OrderBy {
        /// Ascending comparator.
        compare: Comparator<T>,
        /// Reverse the comparator.
        descending: bool,
    },
    /// Load a related navigation path. The in-memory adapter has no entity
    /// graph, so this is recorded but never evaluated.
    Include(String),
}

impl<T> QueryStep<T> {
    /// Build a filter step.
    pub fn filter<P>(predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::Filter(Arc::new(predicate))
    }

    /// Build an ordering step from a key selector.
    pub fn order_by<K, F>(key: F, descending: bool) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self::order_by_with(move |a, b| key(a).cmp(&key(b)), descending)
    }

    /// Build an ordering step from a comparator.
    pub fn order_by_with<C>(compare: C, descending: bool) -> Self
    where
        C: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self::OrderBy {
            compare: Arc::new(compare),
            descending,
        }
    }

    /// Build an include step.
    pub fn include(path: impl Into<String>) -> Self {
        Self::Include(path.into())
    }

    /// Plain-data description of this step.
    pub fn op(&self) -> QueryOp {
        match self {
            Self::Filter(_) => QueryOp::Filter,
            Self::OrderBy { descending, .. } => QueryOp::OrderBy {
                descending: *descending,
            },
            Self::Include(path) => QueryOp::Include { path: path.clone() },
        }
    }
}

impl<T> Clone for QueryStep<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Filter(p) => Self::Filter(Arc::clone(p)),
            Self::OrderBy {
                compare,
                descending,
            } => Self::OrderBy {
                compare: Arc::clone(compare),
                descending: *descending,
            },
            Self::Include(path) => Self::Include(path.clone()),
        }
    }
}

impl<T> fmt::Debug for QueryStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.op(), f)
    }
}

/// Inspectable tag for a query step, including projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum QueryOp {
    /// A filter predicate.
    Filter,
    /// An ordering key.
    OrderBy {
        /// Whether the key sorts descending.
        descending: bool,
    },
    /// An include path.
    Include {
        /// The navigation path.
        path: String,
    },
    /// A projection to another row type.
    Project,
}
