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

//! Log-backed notification gateway.
//!
//! Composes the same subjects a mail transport would send and emits them as
//! structured events under `target: "notify"`. Real email delivery lives
//! outside this crate behind the same [`NotificationGateway`] seam.

use async_trait::async_trait;
use tracing::info;

use crate::core::errors::NotifyError;
use crate::core::models::{Contact, Parcel};
use crate::core::traits::NotificationGateway;

/// Subject line of the creation notice.
pub fn creation_subject(parcel: &Parcel) -> String {
    format!("Parcel Created: {}", parcel.tracking_id)
}

/// Subject line of the delivery-OTP notice.
pub fn delivery_otp_subject(parcel: &Parcel) -> String {
    format!("Delivery OTP for Parcel: {}", parcel.tracking_id)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogGateway;

impl LogGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationGateway for LogGateway {
    async fn notify_created(&self, contact: &Contact, parcel: &Parcel) -> Result<(), NotifyError> {
        info!(
            target: "notify",
            recipient = %contact.email,
            recipient_name = %contact.name,
            subject = %creation_subject(parcel),
            tracking_id = %parcel.tracking_id,
            parcel_recipient = %parcel.recipient_name,
            destination = %parcel.destination_address,
            weight = parcel.weight,
            status = %parcel.status,
            "parcel creation notice"
        );
        Ok(())
    }

    async fn notify_out_for_delivery(
        &self,
        contact: &Contact,
        parcel: &Parcel,
        otp: &str,
    ) -> Result<(), NotifyError> {
        info!(
            target: "notify",
            recipient = %contact.email,
            recipient_name = %contact.name,
            subject = %delivery_otp_subject(parcel),
            tracking_id = %parcel.tracking_id,
            otp = %otp,
            "delivery OTP notice"
        );
        Ok(())
    }
}
