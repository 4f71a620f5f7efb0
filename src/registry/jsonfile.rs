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

//! Flat-file JSON registry backend.
//!
//! The whole registry is one pretty-printed JSON array. Every operation
//! re-reads the file, which keeps the backend trivially correct at the
//! expense of throughput; an in-process mutex plus an fs2 advisory lock on
//! a sibling `.lock` file serialize writers within and across processes.
//! Writes go through a temp file and rename so a crash never leaves a
//! half-written registry behind.

use fs2::FileExt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::core::errors::StorageError;
use crate::core::models::{Parcel, ParcelId};

use super::ParcelRegistry;
use async_trait::async_trait;

pub struct JsonFileRegistry {
    path: PathBuf,
    lock_path: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileRegistry {
    /// Opens the registry at `path`, creating an empty one if absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !path.exists() {
            fs::write(&path, "[]")?;
        }
        let mut lock_path = path.clone().into_os_string();
        lock_path.push(".lock");
        Ok(Self {
            path,
            lock_path: PathBuf::from(lock_path),
            guard: Mutex::new(()),
        })
    }

    fn acquire_file_lock(&self) -> Result<File, StorageError> {
        let lockfile = File::create(&self.lock_path)?;
        lockfile.lock_exclusive()?;
        Ok(lockfile)
    }

    fn load(&self) -> Result<Vec<Parcel>, StorageError> {
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn store(&self, parcels: &[Parcel]) -> Result<(), StorageError> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, serde_json::to_string_pretty(parcels)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl ParcelRegistry for JsonFileRegistry {
    async fn insert(&self, parcel: &Parcel) -> Result<(), StorageError> {
        let _guard = self.guard.lock().await;
        let _file_lock = self.acquire_file_lock()?;
        let mut parcels = self.load()?;
        parcels.push(parcel.clone());
        self.store(&parcels)
    }

    async fn get_by_id(&self, id: &ParcelId) -> Result<Option<Parcel>, StorageError> {
        let _guard = self.guard.lock().await;
        Ok(self.load()?.into_iter().find(|p| p.id == *id))
    }

    async fn get_by_tracking_id(&self, tracking_id: &str) -> Result<Option<Parcel>, StorageError> {
        let _guard = self.guard.lock().await;
        Ok(self
            .load()?
            .into_iter()
            .find(|p| p.tracking_id.as_str() == tracking_id))
    }

    async fn list_by_sender(&self, sender_id: &str) -> Result<Vec<Parcel>, StorageError> {
        let _guard = self.guard.lock().await;
        Ok(self
            .load()?
            .into_iter()
            .filter(|p| p.sender_id == sender_id)
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Parcel>, StorageError> {
        let _guard = self.guard.lock().await;
        self.load()
    }

    async fn update(&self, parcel: &Parcel) -> Result<(), StorageError> {
        let _guard = self.guard.lock().await;
        let _file_lock = self.acquire_file_lock()?;
        let mut parcels = self.load()?;
        match parcels.iter_mut().find(|p| p.id == parcel.id) {
            Some(slot) => {
                *slot = parcel.clone();
                self.store(&parcels)
            }
            None => Err(StorageError::MissingRecord(parcel.id.to_string())),
        }
    }
}
