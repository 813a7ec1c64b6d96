//! Convenient re-exports for tests.
//!
//! ```
//! use mockwell_db::prelude::*;
//! ```

pub use crate::backing::Backing;
pub use crate::config::{CollectionConfig, RemovalPolicy};
pub use crate::cursor::AsyncCursor;
pub use crate::entry::{Entity, EntityEntry};
pub use crate::error::{CollectionError, LookupError};
pub use crate::key::KeyValue;
pub use crate::query::Query;
pub use crate::set::MockSet;
pub use crate::source::{AsyncEnumerable, QuerySource};
pub use tokio_util::sync::CancellationToken;
