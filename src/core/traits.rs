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

//! External collaborator traits.
//!
//! The lifecycle engine only ever talks to user accounts and outbound
//! notification channels through these seams; concrete transports (SMTP,
//! a user database) are wired in at the composition root.

use async_trait::async_trait;

use crate::core::errors::NotifyError;
use crate::core::models::{Contact, Parcel};

/// Resolves a sender identifier to a notifiable contact.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the contact for `sender_id`, or `None` when the sender is
    /// unknown. Absence is a normal outcome, not an error.
    async fn get_by_id(&self, sender_id: &str) -> Option<Contact>;
}

/// Delivers parcel notices to a resolved contact.
///
/// Failures are non-fatal to the parcel operation that triggered them.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Creation notice: tracking id, recipient, destination, weight, status.
    async fn notify_created(&self, contact: &Contact, parcel: &Parcel) -> Result<(), NotifyError>;

    /// Delivery-OTP notice carrying the freshly minted code.
    async fn notify_out_for_delivery(
        &self,
        contact: &Contact,
        parcel: &Parcel,
        otp: &str,
    ) -> Result<(), NotifyError>;
}
