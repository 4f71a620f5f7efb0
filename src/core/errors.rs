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

// Domain error types. "Not found" is an absence outcome (Option/empty vec),
// never a variant here.

use thiserror::Error;

/// Registry-level failures: the store is unavailable or rejected a write.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing store cannot be reached or is in an unusable state.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// `update` found no record with the given id.
    #[error("no stored record with id {0}")]
    MissingRecord(String),

    /// I/O failure in a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record (de)serialization failure in the flat-file store.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// SQLite failure in the relational store.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Notification gateway failure. Always non-fatal to the parcel operation
/// that triggered it: callers log and continue.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notification gateway failure: {0}")]
    Gateway(String),
}

/// Errors surfaced by parcel lifecycle operations.
#[derive(Error, Debug)]
pub enum ParcelError {
    /// Creation input rejected; names every missing or invalid field.
    #[error("validation failed for field(s): {}", fields.join(", "))]
    Validation { fields: Vec<String> },

    /// The registry failed; the record may not exist durably.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ParcelError {
    /// Get user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ParcelError::Validation { fields } => {
                format!("Invalid or missing field(s): {}", fields.join(", "))
            }
            ParcelError::Storage(_) => "Service unavailable".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_fields() {
        let err = ParcelError::Validation {
            fields: vec!["weight".into(), "description".into()],
        };
        assert!(err.to_string().contains("weight"));
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn storage_user_message_hides_internals() {
        let err = ParcelError::Storage(StorageError::Unavailable(
            "/var/data/parcels.db is locked".into(),
        ));
        assert_eq!(err.user_message(), "Service unavailable");
    }
}
