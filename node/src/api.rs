// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use confstore_kernel::{Metadata, PartialRecord, Record};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

/// Body of POST/PUT/PATCH `/configs`. Both fields are optional on the wire;
/// each method enforces its own presence rules.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ConfigPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl ConfigPayload {
    pub fn from_slice(body: &[u8]) -> Result<Self, ApiError> {
        serde_json::from_slice(body)
            .map_err(|_| ApiError::InvalidInput("Unable to unmarshal json".to_string()))
    }

    /// POST: name and metadata are both required.
    pub fn into_new_record(self) -> Result<Record, ApiError> {
        match (self.name, self.metadata) {
            (Some(name), Some(metadata)) if !name.is_empty() => Ok(Record::new(name, metadata)),
            _ => Err(ApiError::InvalidInput(
                "Config name or metadata not specified".to_string(),
            )),
        }
    }

    /// PUT/PATCH: metadata is required; a body name, if given, must match the path.
    /// The path name is always the one used.
    pub fn into_update(self, path_name: &str) -> Result<Record, ApiError> {
        let metadata = self.metadata.ok_or_else(|| {
            ApiError::InvalidInput("Config metadata not specified".to_string())
        })?;
        if let Some(name) = self.name.as_deref() {
            if !name.is_empty() && name != path_name {
                return Err(ApiError::InvalidInput(
                    "URI name and config name are different".to_string(),
                ));
            }
        }
        Ok(Record::new(path_name, metadata))
    }

    pub fn into_patch(self, path_name: &str) -> Result<PartialRecord, ApiError> {
        self.into_update(path_name).map(PartialRecord::from)
    }
}

/// A single `key=value` search expression taken from the raw query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub key: String,
    pub value: String,
}

impl SearchQuery {
    /// Accepts exactly one `=`. Key and value are taken as sent.
    pub fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        let wrong = || ApiError::InvalidInput("Wrong query string".to_string());
        let raw = raw.ok_or_else(wrong)?;

        let mut parts = raw.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => Ok(Self {
                key: key.to_string(),
                value: value.to_string(),
            }),
            _ => Err(wrong()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}
