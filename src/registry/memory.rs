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

//! In-memory registry backend.
//!
//! Insertion-ordered, no durability. Used by tests and as the default
//! engine wiring when no store is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::errors::StorageError;
use crate::core::models::{Parcel, ParcelId};

use super::ParcelRegistry;

#[derive(Default)]
pub struct MemoryRegistry {
    parcels: RwLock<Vec<Parcel>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParcelRegistry for MemoryRegistry {
    async fn insert(&self, parcel: &Parcel) -> Result<(), StorageError> {
        self.parcels.write().await.push(parcel.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &ParcelId) -> Result<Option<Parcel>, StorageError> {
        Ok(self
            .parcels
            .read()
            .await
            .iter()
            .find(|p| p.id == *id)
            .cloned())
    }

    async fn get_by_tracking_id(&self, tracking_id: &str) -> Result<Option<Parcel>, StorageError> {
        Ok(self
            .parcels
            .read()
            .await
            .iter()
            .find(|p| p.tracking_id.as_str() == tracking_id)
            .cloned())
    }

    async fn list_by_sender(&self, sender_id: &str) -> Result<Vec<Parcel>, StorageError> {
        Ok(self
            .parcels
            .read()
            .await
            .iter()
            .filter(|p| p.sender_id == sender_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Parcel>, StorageError> {
        Ok(self.parcels.read().await.clone())
    }

    async fn update(&self, parcel: &Parcel) -> Result<(), StorageError> {
        let mut parcels = self.parcels.write().await;
        match parcels.iter_mut().find(|p| p.id == parcel.id) {
            Some(slot) => {
                *slot = parcel.clone();
                Ok(())
            }
            None => Err(StorageError::MissingRecord(parcel.id.to_string())),
        }
    }
}
