//! Record Pool.

use rustc_hash::FxHashMap;

use crate::error::{StoreError, StoreResult};
use crate::storage::record::Record;

/// Ordered collection of records with a name index.
///
/// Records live in a dense vector in insertion order; `slots` maps each name
/// to its position. Removal swaps the last record into the freed slot, so
/// order is only stable until the first delete.
#[derive(Debug, Default)]
pub struct RecordPool {
    records: Vec<Record>,
    slots: FxHashMap<String, usize>,
}

impl RecordPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.slots.get(name).map(|&idx| &self.records[idx])
    }

    /// Mutable access for in-place updates. Callers must not change `name`.
    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Record> {
        match self.slots.get(name) {
            Some(&idx) => self.records.get_mut(idx),
            None => None,
        }
    }

    /// Appends a record. Fails if the name is taken.
    pub fn push(&mut self, record: Record) -> StoreResult<()> {
        if self.slots.contains_key(&record.name) {
            return Err(StoreError::AlreadyExists(record.name));
        }
        self.slots.insert(record.name.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Overwrites the record stored under `record.name`, returning the old one.
    pub fn replace(&mut self, record: Record) -> StoreResult<Record> {
        match self.slots.get(&record.name) {
            Some(&idx) => Ok(std::mem::replace(&mut self.records[idx], record)),
            None => Err(StoreError::NotFound(record.name)),
        }
    }

    /// Removes the named record, moving the last record into its slot.
    pub fn swap_remove(&mut self, name: &str) -> Option<Record> {
        let idx = self.slots.remove(name)?;
        let removed = self.records.swap_remove(idx);
        if let Some(moved) = self.records.get(idx) {
            if let Some(slot) = self.slots.get_mut(moved.name.as_str()) {
                *slot = idx;
            }
        }
        Some(removed)
    }
}
