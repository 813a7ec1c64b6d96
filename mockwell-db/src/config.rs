//! Adapter configuration.

use serde::{Deserialize, Serialize};

/// What happens when removal targets an entity that is not present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Absent targets are ignored.
    #[default]
    Permissive,
    /// Absent targets fail the whole call and nothing is removed.
    Strict,
}

/// Configuration for a [`MockSet`](crate::MockSet).
///
/// # Example
///
/// ```
/// use mockwell_db::{CollectionConfig, RemovalPolicy};
///
/// let config = CollectionConfig::default();
/// assert_eq!(config.removal, RemovalPolicy::Permissive);
///
/// let strict = CollectionConfig::new().strict();
/// assert_eq!(strict.removal, RemovalPolicy::Strict);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Removal policy for `remove` and `remove_range`.
    #[serde(default)]
    pub removal: RemovalPolicy,
}

impl CollectionConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject removal of entities that are not present.
    pub fn strict(mut self) -> Self {
        self.removal = RemovalPolicy::Strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CollectionConfig::default();
        assert_eq!(config.removal, RemovalPolicy::Permissive);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: CollectionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.removal, RemovalPolicy::Permissive);

        let config: CollectionConfig = serde_json::from_str(r#"{"removal":"strict"}"#).unwrap();
        assert_eq!(config.removal, RemovalPolicy::Strict);
    }
}
