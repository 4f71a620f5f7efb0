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

//! Parcel Lifecycle.
//!
//! The behavioral core of parceltrack. It owns creation, status transitions,
//! OTP issuance, and OTP verification, orchestrating registry reads/writes
//! and pushing notices through the notification gateway on the two
//! qualifying transitions. It knows nothing about HTTP or email transports.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::errors::ParcelError;
use crate::core::ident::IdentifierGenerator;
use crate::core::models::{Contact, Parcel, ParcelDraft, ParcelStatus};
use crate::core::traits::{NotificationGateway, UserDirectory};
use crate::registry::ParcelRegistry;
use crate::utils::{qr, time};

/// Per-key async locks serializing status updates on the same tracking id.
///
/// The read-then-write in `update_status` would otherwise race: two
/// concurrent transitions could each mint an OTP with only the last write
/// surviving, after both codes were already disclosed.
struct KeyedLocks {
    inner: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    fn new() -> Self {
        Self {
            inner: StdMutex::new(HashMap::new()),
        }
    }

    fn acquire(&self, key: &str) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        // Entries nobody holds anymore are dead weight; evict them so the
        // map stays bounded by the number of in-flight updates.
        map.retain(|_, lock| Arc::strong_count(lock) > 1);
        map.entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

pub struct ParcelLifecycle {
    pub config: Arc<Config>,
    registry: Arc<dyn ParcelRegistry>,
    directory: Arc<dyn UserDirectory>,
    gateway: Arc<dyn NotificationGateway>,
    idgen: IdentifierGenerator,
    locks: KeyedLocks,
}

impl ParcelLifecycle {
    /// Builds the engine from explicitly constructed collaborators. The
    /// composition root owns the registry's open/close lifecycle.
    pub fn new(
        config: Arc<Config>,
        registry: Arc<dyn ParcelRegistry>,
        directory: Arc<dyn UserDirectory>,
        gateway: Arc<dyn NotificationGateway>,
    ) -> Self {
        Self {
            config,
            registry,
            directory,
            gateway,
            idgen: IdentifierGenerator::new(),
            locks: KeyedLocks::new(),
        }
    }

    /// Validates the draft, persists a new parcel, and sends the creation
    /// notice to the resolved sender. An unresolvable sender or failed
    /// notice is logged and never fails the creation.
    pub async fn create(&self, draft: ParcelDraft) -> Result<Parcel, ParcelError> {
        let mut invalid = Vec::new();
        if draft.sender_id.trim().is_empty() {
            invalid.push("senderId".to_string());
        }
        if draft.recipient_name.trim().is_empty() {
            invalid.push("recipientName".to_string());
        }
        if draft.destination_address.trim().is_empty() {
            invalid.push("destinationAddress".to_string());
        }
        if !(draft.weight > 0.0) {
            invalid.push("weight".to_string());
        }
        if draft.description.trim().is_empty() {
            invalid.push("description".to_string());
        }
        if !invalid.is_empty() {
            return Err(ParcelError::Validation { fields: invalid });
        }

        let tracking_id = self.idgen.new_tracking_id();
        let qr_code_path = qr::reference_path(&self.config.qr_code_dir, &tracking_id);
        if let Err(e) = qr::touch_placeholder(&qr_code_path) {
            warn!(
                tracking_id = %tracking_id,
                "failed to touch QR placeholder: {}", e
            );
        }

        let now = time::now();
        let parcel = Parcel {
            id: self.idgen.new_id(),
            tracking_id,
            sender_id: draft.sender_id,
            recipient_name: draft.recipient_name,
            destination_address: draft.destination_address,
            weight: draft.weight,
            description: draft.description,
            status: ParcelStatus::Created,
            qr_code_path: qr_code_path.to_string_lossy().into_owned(),
            delivery_otp: None,
            otp_generated_at: None,
            created_at: now,
            updated_at: now,
        };

        self.registry.insert(&parcel).await?;
        info!(
            tracking_id = %parcel.tracking_id,
            sender_id = %parcel.sender_id,
            "parcel created"
        );

        match self.resolve_sender(&parcel.sender_id).await {
            Some(contact) => {
                if let Err(e) = self.gateway.notify_created(&contact, &parcel).await {
                    warn!(tracking_id = %parcel.tracking_id, "creation notice failed: {}", e);
                }
            }
            None => {
                warn!(
                    tracking_id = %parcel.tracking_id,
                    sender_id = %parcel.sender_id,
                    "sender not resolvable, skipping creation notice"
                );
            }
        }

        Ok(parcel)
    }

    /// Point lookup by tracking code. Absence is `Ok(None)`.
    pub async fn get_by_tracking_id(
        &self,
        tracking_id: &str,
    ) -> Result<Option<Parcel>, ParcelError> {
        Ok(self.registry.get_by_tracking_id(tracking_id).await?)
    }

    /// All parcels created by `sender_id`, in insertion order.
    pub async fn list_by_sender(&self, sender_id: &str) -> Result<Vec<Parcel>, ParcelError> {
        Ok(self.registry.list_by_sender(sender_id).await?)
    }

    /// Every parcel in the registry.
    pub async fn list_all(&self) -> Result<Vec<Parcel>, ParcelError> {
        Ok(self.registry.list_all().await?)
    }

    /// Applies `new_status` to the parcel with `tracking_id`.
    ///
    /// Transitioning to Out for Delivery always mints a fresh OTP, replacing
    /// any prior one, and sends the delivery-OTP notice. Updates on the same
    /// tracking id are serialized through a per-key lock so concurrent
    /// transitions cannot leave a disclosed-but-overwritten code behind.
    ///
    /// Returns `Ok(None)` when no parcel carries `tracking_id`, including
    /// the case where the record vanished between lookup and write.
    pub async fn update_status(
        &self,
        tracking_id: &str,
        new_status: ParcelStatus,
    ) -> Result<Option<Parcel>, ParcelError> {
        let lock = self.locks.acquire(tracking_id);
        let _guard = lock.lock().await;

        let Some(mut parcel) = self.registry.get_by_tracking_id(tracking_id).await? else {
            return Ok(None);
        };

        let now = time::now();
        if new_status == ParcelStatus::OutForDelivery {
            let code = self.idgen.mint_delivery_otp();
            parcel.delivery_otp = Some(code.clone());
            parcel.otp_generated_at = Some(now);
            info!(tracking_id = %parcel.tracking_id, "delivery OTP minted");

            match self.resolve_sender(&parcel.sender_id).await {
                Some(contact) => {
                    if let Err(e) = self
                        .gateway
                        .notify_out_for_delivery(&contact, &parcel, &code)
                        .await
                    {
                        warn!(
                            tracking_id = %parcel.tracking_id,
                            "delivery OTP notice failed: {}", e
                        );
                    }
                }
                None => {
                    warn!(
                        tracking_id = %parcel.tracking_id,
                        sender_id = %parcel.sender_id,
                        "sender not resolvable, OTP stored but notice skipped"
                    );
                }
            }
        }

        parcel.status = new_status;
        parcel.updated_at = now;

        match self.registry.update(&parcel).await {
            Ok(()) => {
                info!(
                    tracking_id = %parcel.tracking_id,
                    status = %parcel.status,
                    "parcel status updated"
                );
                Ok(Some(parcel))
            }
            Err(crate::core::errors::StorageError::MissingRecord(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Checks `code` against the stored delivery OTP.
    ///
    /// True iff the parcel exists, its status is exactly Out for Delivery,
    /// and `code` is non-empty and string-equal to the stored OTP. No
    /// normalization, no expiry check, no state mutation. Verification is
    /// advisory: marking the parcel Delivered is a separate `update_status`
    /// call the engine does not gate on a prior successful check.
    pub async fn verify_delivery_otp(&self, tracking_id: &str, code: &str) -> bool {
        let parcel = match self.registry.get_by_tracking_id(tracking_id).await {
            Ok(Some(parcel)) => parcel,
            Ok(None) => return false,
            Err(e) => {
                warn!(tracking_id, "OTP verification read failed: {}", e);
                return false;
            }
        };

        parcel.status == ParcelStatus::OutForDelivery
            && !code.is_empty()
            && parcel.delivery_otp.as_deref() == Some(code)
    }

    async fn resolve_sender(&self, sender_id: &str) -> Option<Contact> {
        self.directory.get_by_id(sender_id).await
    }
}
