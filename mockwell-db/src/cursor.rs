//! Asynchronous enumeration over already-materialized rows.

use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// An async enumerator that never suspends.
///
/// Rows are materialized when the cursor is created; each `move_next`
/// resolves immediately. The cursor is also a [`Stream`], so the usual
/// `StreamExt` combinators work on it.
///
/// # Example
///
/// ```
/// use mockwell_db::prelude::*;
///
/// # futures::executor::block_on(async {
/// let set = MockSet::new(Backing::from(vec![1, 2, 3]));
/// let mut cursor = set.async_cursor(None);
///
/// let mut seen = Vec::new();
/// while cursor.move_next().await {
///     seen.push(*cursor.current().unwrap());
/// }
/// assert_eq!(seen, vec![1, 2, 3]);
/// # });
/// ```
pub struct AsyncCursor<T> {
    rows: std::vec::IntoIter<T>,
    current: Option<T>,
}

impl<T> AsyncCursor<T> {
    pub(crate) fn new(rows: Vec<T>) -> Self {
        Self {
            rows: rows.into_iter(),
            current: None,
        }
    }

    /// Advance to the next row. Returns `false` once the rows are exhausted.
    pub async fn move_next(&mut self) -> bool {
        self.current = self.rows.next();
        self.current.is_some()
    }

    /// The row the last successful `move_next` advanced to.
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Take ownership of the current row.
    pub fn take_current(&mut self) -> Option<T> {
        self.current.take()
    }

    /// Rows not yet visited.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

// No field is ever pinned.
impl<T> Unpin for AsyncCursor<T> {}

impl<T> Stream for AsyncCursor<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<T>> {
        Poll::Ready(self.get_mut().rows.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.rows.len();
        (n, Some(n))
    }
}
