// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parcel registry contract and its backends.
//!
//! The registry exclusively owns the durable parcel representation. Three
//! backends satisfy the same contract and are selected by
//! [`crate::config::StorageBackend`]; the lifecycle engine never knows which
//! one it is talking to. Concurrency discipline lives in the caller: the
//! registry itself takes no cross-operation locks.

pub mod jsonfile;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::core::errors::StorageError;
use crate::core::models::{Parcel, ParcelId};

/// Durable store of parcel records.
///
/// "Not found" is `Ok(None)` or an empty vec, never an error. Uniqueness of
/// tracking codes is established by the identifier generator before insert;
/// a backend with a uniqueness constraint surfaces a violation as
/// [`StorageError`] rather than enforcing its own scheme.
#[async_trait]
pub trait ParcelRegistry: Send + Sync {
    /// Persists a new record.
    async fn insert(&self, parcel: &Parcel) -> Result<(), StorageError>;

    /// Point lookup by internal id.
    async fn get_by_id(&self, id: &ParcelId) -> Result<Option<Parcel>, StorageError>;

    /// Point lookup by tracking code.
    async fn get_by_tracking_id(&self, tracking_id: &str) -> Result<Option<Parcel>, StorageError>;

    /// All parcels created by `sender_id`, in insertion order.
    async fn list_by_sender(&self, sender_id: &str) -> Result<Vec<Parcel>, StorageError>;

    /// Every parcel, in a consistent order.
    async fn list_all(&self) -> Result<Vec<Parcel>, StorageError>;

    /// Replaces the stored record matching `parcel.id`. Fails with
    /// [`StorageError::MissingRecord`] when no such record exists.
    async fn update(&self, parcel: &Parcel) -> Result<(), StorageError>;
}

/// Opens the registry selected by `config.storage_backend`. The caller (the
/// composition root) owns the returned handle; nothing here is process-wide.
pub fn open_registry(config: &Config) -> Result<Arc<dyn ParcelRegistry>, StorageError> {
    match config.storage_backend {
        StorageBackend::Memory => Ok(Arc::new(memory::MemoryRegistry::new())),
        StorageBackend::JsonFile => Ok(Arc::new(jsonfile::JsonFileRegistry::open(
            &config.parcels_file,
        )?)),
        StorageBackend::Sqlite => Ok(Arc::new(sqlite::SqliteRegistry::open(&config.sqlite_path)?)),
    }
}
