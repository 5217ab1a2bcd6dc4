// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! confstore-kernel: in-memory named configuration records with deep-merge
//! patches and path equality queries.

pub mod config;
pub mod error;
pub mod storage;
pub mod merge;
pub mod query;
pub mod store;
pub mod fixtures;

pub use error::{StoreError, StoreResult};
pub use storage::record::{Metadata, PartialRecord, Record};
pub use store::ConfigStore;
