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

//! parceltrack constants - single source of truth for literal values.
//!
//! Downstream logic keys off exact string equality against the status
//! literals, so they live here rather than scattered across modules.

/// Distinguished parcel status strings.
///
/// The status set is open: any string is a legal status. Only these three
/// literals carry behavior.
pub mod status {
    /// Initial status assigned at creation.
    pub const CREATED: &str = "Created";
    /// Triggers OTP minting and the delivery-OTP notice.
    pub const OUT_FOR_DELIVERY: &str = "Out for Delivery";
    /// Reached at verified handover (advisory; not enforced by the engine).
    pub const DELIVERED: &str = "Delivered";
}

/// Tracking-code format.
pub mod tracking {
    /// Caller-visible prefix of every tracking code.
    pub const PREFIX: &str = "TRK-";
    /// Number of random characters after the prefix.
    pub const SUFFIX_LENGTH: usize = 8;
    /// Alphabet the random suffix is drawn from.
    pub const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
}

/// Delivery one-time-code format.
pub mod otp {
    /// Smallest valid OTP value (inclusive).
    pub const MIN: u32 = 100_000;
    /// Largest valid OTP value (inclusive).
    pub const MAX: u32 = 999_999;
    /// Digit count of a rendered OTP.
    pub const LENGTH: usize = 6;
}

/// Configuration environment variables.
pub mod config {
    pub const ENV_STORAGE_BACKEND: &str = "PARCELTRACK_STORAGE_BACKEND";
    pub const ENV_PARCELS_FILE: &str = "PARCELTRACK_PARCELS_FILE";
    pub const ENV_SQLITE_PATH: &str = "PARCELTRACK_SQLITE_PATH";
    pub const ENV_QR_CODE_DIR: &str = "PARCELTRACK_QR_CODE_DIR";
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

    /// Default flat-file registry location.
    pub const DEFAULT_PARCELS_FILE: &str = "parcels.json";
    /// Default SQLite registry location.
    pub const DEFAULT_SQLITE_PATH: &str = "parcels.db";
    /// Default directory for QR reference paths.
    pub const DEFAULT_QR_CODE_DIR: &str = "qrcodes";
}
