//! Point-lookup key values.

use crate::error::LookupError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One component of a lookup key tuple.
///
/// Integer variants compare numerically across signedness, so an `i32`
/// lookup key finds an entity keyed by `u64`.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum KeyValue {
    /// Signed integer key.
    Int(i64),
    /// Unsigned integer key too large for `Int`.
    UInt(u64),
    /// Boolean key.
    Bool(bool),
    /// UUID key.
    Uuid(Uuid),
    /// Text key.
    Text(String),
}

impl KeyValue {
    /// Name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Bool(_) => "bool",
            Self::Uuid(_) => "uuid",
            Self::Text(_) => "text",
        }
    }

    /// Read as a signed integer.
    pub fn as_i64(&self) -> Result<i64, LookupError> {
        match *self {
            Self::Int(v) => Ok(v),
            Self::UInt(v) => i64::try_from(v).map_err(|_| self.mismatch("i64")),
            _ => Err(self.mismatch("integer")),
        }
    }

    /// Read as an unsigned integer.
    pub fn as_u64(&self) -> Result<u64, LookupError> {
        match *self {
            Self::UInt(v) => Ok(v),
            Self::Int(v) => u64::try_from(v).map_err(|_| self.mismatch("u64")),
            _ => Err(self.mismatch("integer")),
        }
    }

    /// Read as text.
    pub fn as_str(&self) -> Result<&str, LookupError> {
        match self {
            Self::Text(v) => Ok(v),
            _ => Err(self.mismatch("text")),
        }
    }

    /// Read as a bool.
    pub fn as_bool(&self) -> Result<bool, LookupError> {
        match *self {
            Self::Bool(v) => Ok(v),
            _ => Err(self.mismatch("bool")),
        }
    }

    /// Read as a UUID.
    pub fn as_uuid(&self) -> Result<Uuid, LookupError> {
        match *self {
            Self::Uuid(v) => Ok(v),
            _ => Err(self.mismatch("uuid")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> LookupError {
        LookupError::KeyType {
            expected,
            actual: self.type_name(),
        }
    }
}

impl PartialEq for KeyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Int(a), Self::UInt(b)) | (Self::UInt(b), Self::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Uuid(a), Self::Uuid(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Uuid(v) => write!(f, "{}", v),
            Self::Text(v) => write!(f, "{:?}", v),
        }
    }
}

macro_rules! int_key {
    ($($t:ty),*) => {
        $(impl From<$t> for KeyValue {
            fn from(v: $t) -> Self {
                Self::Int(i64::from(v))
            }
        })*
    };
}

int_key!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for KeyValue {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Self::UInt(v), Self::Int)
    }
}

impl From<usize> for KeyValue {
    fn from(v: usize) -> Self {
        Self::from(v as u64)
    }
}

impl From<bool> for KeyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Uuid> for KeyValue {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<&str> for KeyValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for KeyValue {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}
