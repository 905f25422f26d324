//! Key/value settings

use crate::errors::{from_rusqlite, Result};
use crate::store::LocalStore;
use gametalk_core::model::now_millis;
use rusqlite::{params, OptionalExtension};

impl LocalStore {
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_conn("get_setting", |conn| {
            conn.query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(from_rusqlite)
        })
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn("set_setting", |conn| {
            conn.execute(
                "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, value, now_millis()],
            )
            .map_err(from_rusqlite)?;
            Ok(())
        })
    }

    /// Returns whether the key existed
    pub fn remove_setting(&self, key: &str) -> Result<bool> {
        self.with_conn("remove_setting", |conn| {
            conn.execute("DELETE FROM settings WHERE key = ?1", [key])
                .map(|n| n > 0)
                .map_err(from_rusqlite)
        })
    }
}
