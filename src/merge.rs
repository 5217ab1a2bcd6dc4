// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Override deep merge.
//!
//! - Objects: merged key by key, recursively
//! - Arrays: replaced (overlay wins entirely)
//! - Scalars and null: overlay wins
//!
//! Keys missing from the overlay are never touched.

use serde_json::Value;

use crate::storage::record::{Metadata, PartialRecord, Record};

/// Merges `overlay` into `base` in place.
pub fn merge_value(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => merge_map(base_map, overlay_map),
        (slot, overlay) => *slot = overlay,
    }
}

/// Merges every key of `overlay` into `base` in place.
pub fn merge_map(base: &mut Metadata, overlay: Metadata) {
    for (key, overlay_value) in overlay {
        match base.get_mut(&key) {
            Some(base_value) => merge_value(base_value, overlay_value),
            None => {
                base.insert(key, overlay_value);
            }
        }
    }
}

/// Value-returning form of [`merge_value`].
pub fn deep_merge(mut base: Value, overlay: Value) -> Value {
    merge_value(&mut base, overlay);
    base
}

/// Applies a patch overlay onto a stored record.
///
/// The overlay name is expected to match `base.name`; an empty overlay name
/// keeps the base name.
pub fn merge_record(base: &mut Record, overlay: PartialRecord) {
    if !overlay.name.is_empty() {
        base.name = overlay.name;
    }
    if let Some(metadata) = overlay.metadata {
        merge_map(&mut base.metadata, metadata);
    }
}
