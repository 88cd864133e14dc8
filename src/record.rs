//! Record identity shared by every resource.
//!
//! DESIGN
//! ======
//! The backend owns record schemas, so rows travel as loose JSON maps.
//! Ids come back as UUID strings for most tables and as integers for a few
//! (`ledger`, `cal`), so `RecordId` keeps the textual form and compares on it.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One backend row: field name to JSON value.
pub type Record = Map<String, Value>;

/// Identifier of a record, kept in its canonical text form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read the id out of a JSON value. Strings and numbers are accepted.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// Read the `id` field of a record.
    #[must_use]
    pub fn of(record: &Record) -> Option<Self> {
        record.get("id").and_then(Self::from_value)
    }

    /// JSON form for filter values: integers stay numeric.
    #[must_use]
    pub fn to_value(&self) -> Value {
        self.0
            .parse::<i64>()
            .map_or_else(|_| Value::String(self.0.clone()), Value::from)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<uuid::Uuid> for RecordId {
    fn from(value: uuid::Uuid) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).ok_or_else(|| serde::de::Error::custom("expected string or numeric id"))
    }
}

/// Typed rows that expose their backend id.
pub trait HasId {
    fn record_id(&self) -> RecordId;
}

impl HasId for Record {
    fn record_id(&self) -> RecordId {
        RecordId::of(self).unwrap_or_else(|| RecordId::new(""))
    }
}
