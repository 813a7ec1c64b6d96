//! In-memory stand-in for a remote-backed, queryable data set.
//!
//! Application code that reads through a deferred query abstraction and
//! writes through add/remove/attach calls can be pointed at a [`MockSet`]
//! instead of a real database. The set wraps a [`Backing`] collection owned
//! by the test; every mutation lands in that collection, and every query is
//! evaluated against its contents at the moment it is enumerated.
//!
//! # Key Components
//!
//! - **Backing**: the shared, test-owned `Vec` every adapter reads and writes
//! - **Query**: a chain of [`QueryStep`]s (filter, order, include, project)
//!   evaluated lazily
//! - **MockSet**: the data-set surface (find, add, attach, remove, clear) in
//!   sync and async shapes
//! - **AsyncCursor**: an async enumerator that never actually suspends
//!
//! # Example
//!
//! ```
//! use mockwell_db::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Blog {
//!     id: i64,
//!     title: String,
//! }
//!
//! let data = Backing::from(vec![
//!     Blog { id: 1, title: "rust".into() },
//!     Blog { id: 2, title: "sql".into() },
//! ]);
//! let blogs = MockSet::new(data.clone()).with_key(|b: &Blog| b.id);
//!
//! blogs.add(Blog { id: 3, title: "http".into() });
//!
//! let ids: Vec<i64> = blogs
//!     .filter(|b| b.id > 1)
//!     .order_by_desc(|b| b.id)
//!     .select(|b| b.id)
//!     .to_vec();
//! assert_eq!(ids, vec![3, 2]);
//! assert_eq!(blogs.find(&[1.into()]).unwrap().map(|b| b.title), Some("rust".to_string()));
//! assert_eq!(data.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backing;
pub mod config;
pub mod cursor;
pub mod descriptor;
pub mod entry;
pub mod error;
pub mod key;
pub mod prelude;
pub mod query;
pub mod set;
pub mod source;

pub use backing::Backing;
pub use config::{CollectionConfig, RemovalPolicy};
pub use cursor::AsyncCursor;
pub use descriptor::{QueryOp, QueryStep};
pub use entry::{Entity, EntityEntry};
pub use error::{CollectionError, LookupError};
pub use key::KeyValue;
pub use query::Query;
pub use set::{LookupFn, MockSet};
pub use source::{AsyncEnumerable, QuerySource};

pub use tokio_util::sync::CancellationToken;
