// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Config Store.
//!
//! `ConfigStore` is a plain owned value: reads take `&self`, writes take
//! `&mut self`. It carries no lock of its own. Shared owners wrap it in a
//! reader/writer lock, so `list`/`get`/`query` may run concurrently while
//! `insert`/`replace`/`delete`/`patch` are exclusive. A patch merges in place
//! under that exclusive borrow, so no reader sees a half-merged record.

use crate::error::{StoreError, StoreResult};
use crate::fixtures;
use crate::merge::merge_record;
use crate::query::Filter;
use crate::storage::pool::RecordPool;
use crate::storage::record::{PartialRecord, Record};

#[derive(Debug, Default)]
pub struct ConfigStore {
    pool: RecordPool,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the example records.
    pub fn seeded() -> StoreResult<Self> {
        Self::from_records(fixtures::example_records())
    }

    /// Builds a store from records, rejecting duplicate names.
    pub fn from_records<I>(records: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    // --- Read APIs ---

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pool.contains(name)
    }

    pub fn list(&self) -> &[Record] {
        self.pool.as_slice()
    }

    pub fn get(&self, name: &str) -> StoreResult<&Record> {
        self.pool
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Records whose value at `path` renders equal to `target`, in store order.
    pub fn query(&self, path: &str, target: &str) -> Vec<Record> {
        Filter::new(path, target).apply(self.pool.as_slice())
    }

    // --- Write APIs ---

    pub fn insert(&mut self, record: Record) -> StoreResult<()> {
        self.pool.push(record)
    }

    /// Wholesale replacement; no field of the old record survives.
    pub fn replace(&mut self, record: Record) -> StoreResult<()> {
        self.pool.replace(record).map(|_| ())
    }

    /// Removes the named record if present. Never fails.
    pub fn delete(&mut self, name: &str) {
        self.pool.swap_remove(name);
    }

    /// Deep-merges `partial` onto the record named `partial.name`.
    pub fn patch(&mut self, partial: PartialRecord) -> StoreResult<&Record> {
        let target = match self.pool.get_mut(&partial.name) {
            Some(record) => record,
            None => return Err(StoreError::NotFound(partial.name)),
        };
        merge_record(target, partial);
        Ok(target)
    }
}
