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

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::core::constants::config as keys;

/// Which store backs the parcel registry. The lifecycle engine is agnostic;
/// every backend satisfies the same [`crate::registry::ParcelRegistry`]
/// contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub enum StorageBackend {
    Memory,
    JsonFile,
    Sqlite,
}

impl StorageBackend {
    pub fn parse_safe(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => StorageBackend::Memory,
            "json" | "jsonfile" | "file" => StorageBackend::JsonFile,
            "sqlite" | "sql" => StorageBackend::Sqlite,
            _ => StorageBackend::JsonFile,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage_backend: StorageBackend,
    pub parcels_file: PathBuf,
    pub sqlite_path: PathBuf,
    pub qr_code_dir: PathBuf,
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            storage_backend: StorageBackend::parse_safe(
                &env::var(keys::ENV_STORAGE_BACKEND).unwrap_or_else(|_| "json".to_string()),
            ),
            parcels_file: env::var(keys::ENV_PARCELS_FILE)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(keys::DEFAULT_PARCELS_FILE)),
            sqlite_path: env::var(keys::ENV_SQLITE_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(keys::DEFAULT_SQLITE_PATH)),
            qr_code_dir: env::var(keys::ENV_QR_CODE_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(keys::DEFAULT_QR_CODE_DIR)),
            log_level: env::var(keys::ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string()),
            log_format: env::var(keys::ENV_LOG_FORMAT).unwrap_or_else(|_| "text".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::Memory,
            parcels_file: PathBuf::from(keys::DEFAULT_PARCELS_FILE),
            sqlite_path: PathBuf::from(keys::DEFAULT_SQLITE_PATH),
            qr_code_dir: PathBuf::from(keys::DEFAULT_QR_CODE_DIR),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}
