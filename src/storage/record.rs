//! Record definition.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arbitrary nested key/value document attached to a record.
pub type Metadata = Map<String, Value>;

/// A named configuration document. `name` is the unique key within a store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub metadata: Metadata,
}

impl Record {
    pub fn new(name: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            name: name.into(),
            metadata,
        }
    }

    /// Builds a record from a JSON value. Anything other than an object
    /// yields empty metadata.
    pub fn from_json(name: impl Into<String>, metadata: Value) -> Self {
        let metadata = match metadata {
            Value::Object(map) => map,
            _ => Metadata::new(),
        };
        Self::new(name, metadata)
    }
}

/// Overlay applied by a patch. Absent metadata leaves the target untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl PartialRecord {
    pub fn new(name: impl Into<String>, metadata: Option<Metadata>) -> Self {
        Self {
            name: name.into(),
            metadata,
        }
    }
}

impl From<Record> for PartialRecord {
    fn from(record: Record) -> Self {
        Self {
            name: record.name,
            metadata: Some(record.metadata),
        }
    }
}
