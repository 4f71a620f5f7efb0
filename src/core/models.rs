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

//! Domain models for the parcel engine.
//!
//! Pure data structures: the parcel record, its creation draft, identifier
//! newtypes, and the open status type. No I/O side effects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::core::constants::status;

/// Newtype wrapper around Uuid for type-safe internal parcel identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParcelId(Uuid);

impl ParcelId {
    /// Create a ParcelId from an existing Uuid.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying Uuid.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for ParcelId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(ParcelId)
    }
}

impl From<ParcelId> for String {
    fn from(id: ParcelId) -> Self {
        id.0.to_string()
    }
}

impl TryFrom<String> for ParcelId {
    type Error = uuid::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Uuid::parse_str(&s).map(ParcelId)
    }
}

impl std::fmt::Display for ParcelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-facing tracking code, distinct from the internal [`ParcelId`].
///
/// Format: `TRK-` followed by 8 characters from `[A-Z0-9]`. The type does not
/// reject other strings on deserialization; unknown handles simply fail to
/// resolve at lookup time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingId(String);

impl TrackingId {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<TrackingId> for String {
    fn from(id: TrackingId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TrackingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parcel status: an open string set with three recognized tags.
///
/// Any string is a legal status; only the literal values in
/// [`crate::core::constants::status`] carry engine behavior. Conversion from
/// a string canonicalizes the recognized literals so equality against the
/// named variants is reliable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParcelStatus {
    /// Initial status assigned at creation.
    Created,
    /// The transition that mints a delivery OTP.
    OutForDelivery,
    /// Final handover status.
    Delivered,
    /// Any other caller-supplied status string.
    Other(String),
}

impl ParcelStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => status::CREATED,
            Self::OutForDelivery => status::OUT_FOR_DELIVERY,
            Self::Delivered => status::DELIVERED,
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for ParcelStatus {
    fn from(s: &str) -> Self {
        match s {
            status::CREATED => Self::Created,
            status::OUT_FOR_DELIVERY => Self::OutForDelivery,
            status::DELIVERED => Self::Delivered,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ParcelStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ParcelStatus> for String {
    fn from(status: ParcelStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fully materialized, authoritative parcel record.
///
/// The registry exclusively owns the durable representation; field names in
/// the serialized form match the persisted record layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    /// Internal identifier, assigned once at creation.
    pub id: ParcelId,
    /// Caller-visible handle, immutable after creation.
    pub tracking_id: TrackingId,
    /// External user on whose behalf the parcel was created.
    pub sender_id: String,
    /// Name of the person receiving the parcel.
    pub recipient_name: String,
    /// Delivery address.
    pub destination_address: String,
    /// Weight in kilograms, strictly positive.
    pub weight: f64,
    /// Free-text contents description.
    pub description: String,
    /// Current status; every mutation bumps `updated_at`.
    pub status: ParcelStatus,
    /// Reference path of the QR code image (`{trackingId}.png` under the
    /// configured directory); no image bytes are produced by this crate.
    pub qr_code_path: String,
    /// Current delivery OTP, replaced on every transition to Out for Delivery.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub delivery_otp: Option<String>,
    /// When the current OTP was minted. Recorded alongside the OTP but never
    /// checked against a time window.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub otp_generated_at: Option<DateTime<Utc>>,
    /// Creation time, immutable.
    pub created_at: DateTime<Utc>,
    /// Last status-change time.
    pub updated_at: DateTime<Utc>,
}

/// Creation input used to build a new [`Parcel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelDraft {
    pub sender_id: String,
    pub recipient_name: String,
    pub destination_address: String,
    pub weight: f64,
    pub description: String,
}

/// Notifiable contact resolved from a sender identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_canonicalizes_recognized_literals() {
        assert_eq!(ParcelStatus::from("Created"), ParcelStatus::Created);
        assert_eq!(
            ParcelStatus::from("Out for Delivery"),
            ParcelStatus::OutForDelivery
        );
        assert_eq!(ParcelStatus::from("Delivered"), ParcelStatus::Delivered);
    }

    #[test]
    fn status_preserves_unrecognized_strings() {
        let status = ParcelStatus::from("In Transit - Hub 7");
        assert_eq!(status, ParcelStatus::Other("In Transit - Hub 7".into()));
        assert_eq!(status.as_str(), "In Transit - Hub 7");
    }

    #[test]
    fn status_comparison_is_case_sensitive() {
        // "out for delivery" is NOT the distinguished transition.
        let status = ParcelStatus::from("out for delivery");
        assert_ne!(status, ParcelStatus::OutForDelivery);
    }

    #[test]
    fn status_round_trips_through_serde() {
        let json = serde_json::to_string(&ParcelStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"Out for Delivery\"");
        let back: ParcelStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ParcelStatus::OutForDelivery);
    }

    #[test]
    fn parcel_id_round_trips_through_string() {
        let id = ParcelId::new(Uuid::new_v4());
        let s: String = id.into();
        let back = ParcelId::try_from(s).unwrap();
        assert_eq!(back, id);
    }
}
