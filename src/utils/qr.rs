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

//! QR code reference paths.
//!
//! The engine only assigns where a QR image for a tracking code would live;
//! it never renders image bytes. A placeholder file is touched so the path
//! resolves, which is all downstream viewers need.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::core::models::TrackingId;

/// Deterministic reference path: `{dir}/{trackingId}.png`.
pub fn reference_path(dir: &Path, tracking_id: &TrackingId) -> PathBuf {
    dir.join(format!("{tracking_id}.png"))
}

/// Creates an empty placeholder at `path` (and its parent directory) if one
/// does not already exist.
pub fn touch_placeholder(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        File::create(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_follows_tracking_scheme() {
        let path = reference_path(Path::new("qrcodes"), &TrackingId::new("TRK-AB12CD34"));
        assert_eq!(path, PathBuf::from("qrcodes/TRK-AB12CD34.png"));
    }

    #[test]
    fn touch_creates_missing_placeholder_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = reference_path(dir.path(), &TrackingId::new("TRK-TEST0001"));
        touch_placeholder(&path).unwrap();
        assert!(path.exists());
        // Second touch is a no-op.
        touch_placeholder(&path).unwrap();
    }
}
