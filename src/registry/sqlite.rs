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

//! SQLite registry backend.
//!
//! One `parcels` table, insertion order carried by a monotonic `seq` rowid.
//! Timestamps are stored as RFC 3339 text. The UNIQUE constraints on `id`
//! and `tracking_id` surface caller-side uniqueness bugs as storage errors;
//! the registry does not attempt its own uniqueness scheme.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use crate::core::errors::StorageError;
use crate::core::models::{Parcel, ParcelId, TrackingId};

use super::ParcelRegistry;
use async_trait::async_trait;

const SELECT_COLUMNS: &str = "id, tracking_id, sender_id, recipient_name, destination_address, \
     weight, description, status, qr_code_path, delivery_otp, otp_generated_at, \
     created_at, updated_at";

pub struct SqliteRegistry {
    conn: Mutex<Connection>,
}

impl SqliteRegistry {
    /// Opens or creates a SQLite-backed registry at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory SQLite registry.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock_conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Column values as SQLite hands them back, before domain parsing.
struct RawRow {
    id: String,
    tracking_id: String,
    sender_id: String,
    recipient_name: String,
    destination_address: String,
    weight: f64,
    description: String,
    status: String,
    qr_code_path: String,
    delivery_otp: Option<String>,
    otp_generated_at: Option<String>,
    created_at: String,
    updated_at: String,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: row.get(0)?,
        tracking_id: row.get(1)?,
        sender_id: row.get(2)?,
        recipient_name: row.get(3)?,
        destination_address: row.get(4)?,
        weight: row.get(5)?,
        description: row.get(6)?,
        status: row.get(7)?,
        qr_code_path: row.get(8)?,
        delivery_otp: row.get(9)?,
        otp_generated_at: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Unavailable(format!("corrupt timestamp {raw:?}: {e}")))
}

fn into_parcel(raw: RawRow) -> Result<Parcel, StorageError> {
    let otp_generated_at = raw
        .otp_generated_at
        .as_deref()
        .map(parse_timestamp)
        .transpose()?;
    Ok(Parcel {
        id: ParcelId::from_str(&raw.id)
            .map_err(|e| StorageError::Unavailable(format!("corrupt parcel id: {e}")))?,
        tracking_id: TrackingId::new(raw.tracking_id),
        sender_id: raw.sender_id,
        recipient_name: raw.recipient_name,
        destination_address: raw.destination_address,
        weight: raw.weight,
        description: raw.description,
        status: raw.status.into(),
        qr_code_path: raw.qr_code_path,
        delivery_otp: raw.delivery_otp,
        otp_generated_at,
        created_at: parse_timestamp(&raw.created_at)?,
        updated_at: parse_timestamp(&raw.updated_at)?,
    })
}

#[async_trait]
impl ParcelRegistry for SqliteRegistry {
    async fn insert(&self, parcel: &Parcel) -> Result<(), StorageError> {
        let conn = self.lock_conn();
        conn.execute(
            "INSERT INTO parcels(id, tracking_id, sender_id, recipient_name, \
             destination_address, weight, description, status, qr_code_path, \
             delivery_otp, otp_generated_at, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                parcel.id.to_string(),
                parcel.tracking_id.as_str(),
                parcel.sender_id,
                parcel.recipient_name,
                parcel.destination_address,
                parcel.weight,
                parcel.description,
                parcel.status.as_str(),
                parcel.qr_code_path,
                parcel.delivery_otp,
                parcel.otp_generated_at.map(|t| t.to_rfc3339()),
                parcel.created_at.to_rfc3339(),
                parcel.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    async fn get_by_id(&self, id: &ParcelId) -> Result<Option<Parcel>, StorageError> {
        let raw = {
            let conn = self.lock_conn();
            conn.query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM parcels WHERE id = ?1"),
                params![id.to_string()],
                read_row,
            )
            .optional()?
        };
        raw.map(into_parcel).transpose()
    }

    async fn get_by_tracking_id(&self, tracking_id: &str) -> Result<Option<Parcel>, StorageError> {
        let raw = {
            let conn = self.lock_conn();
            conn.query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM parcels WHERE tracking_id = ?1"),
                params![tracking_id],
                read_row,
            )
            .optional()?
        };
        raw.map(into_parcel).transpose()
    }

    async fn list_by_sender(&self, sender_id: &str) -> Result<Vec<Parcel>, StorageError> {
        let rows = {
            let conn = self.lock_conn();
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM parcels WHERE sender_id = ?1 ORDER BY seq ASC"
            ))?;
            let rows = stmt.query_map(params![sender_id], read_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };
        rows.into_iter().map(into_parcel).collect()
    }

    async fn list_all(&self) -> Result<Vec<Parcel>, StorageError> {
        let rows = {
            let conn = self.lock_conn();
            let mut stmt =
                conn.prepare(&format!("SELECT {SELECT_COLUMNS} FROM parcels ORDER BY seq ASC"))?;
            let rows = stmt.query_map([], read_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };
        rows.into_iter().map(into_parcel).collect()
    }

    async fn update(&self, parcel: &Parcel) -> Result<(), StorageError> {
        let changed = {
            let conn = self.lock_conn();
            conn.execute(
                "UPDATE parcels SET tracking_id = ?2, sender_id = ?3, recipient_name = ?4, \
                 destination_address = ?5, weight = ?6, description = ?7, status = ?8, \
                 qr_code_path = ?9, delivery_otp = ?10, otp_generated_at = ?11, \
                 created_at = ?12, updated_at = ?13 WHERE id = ?1",
                params![
                    parcel.id.to_string(),
                    parcel.tracking_id.as_str(),
                    parcel.sender_id,
                    parcel.recipient_name,
                    parcel.destination_address,
                    parcel.weight,
                    parcel.description,
                    parcel.status.as_str(),
                    parcel.qr_code_path,
                    parcel.delivery_otp,
                    parcel.otp_generated_at.map(|t| t.to_rfc3339()),
                    parcel.created_at.to_rfc3339(),
                    parcel.updated_at.to_rfc3339(),
                ],
            )?
        };
        if changed == 0 {
            return Err(StorageError::MissingRecord(parcel.id.to_string()));
        }
        Ok(())
    }
}
