//! SQLite-backed schedule store.
//!
//! One row per card identity, keyed by the hex digest of the question line.
//! Every write is a single statement, so a crash mid-command never leaves a
//! record half-updated. A single interactive process owns the database at a
//! time; no locking beyond sqlite's own is needed.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use super::models::ScheduleRecord;
use crate::cards::CardId;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt schedule row: {0}")]
    BadRecord(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Persistent mapping from card identity to due date and interval index.
pub struct ScheduleStore {
    conn: Connection,
}

impl ScheduleStore {
    /// Open (or create) the store at the given path, creating parent
    /// directories as needed.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(db_path)?)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS schedule (
                card_id TEXT PRIMARY KEY,
                due_date TEXT NOT NULL,
                interval_index INTEGER NOT NULL
            );
            "#,
        )?;
        Ok(Self { conn })
    }

    /// Look up the schedule record for a card. `None` means never seen.
    pub fn get(&self, id: &CardId) -> Result<Option<ScheduleRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT due_date, interval_index FROM schedule WHERE card_id = ?1",
                params![id.to_hex()],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((due, index)) => {
                let due_date = NaiveDate::parse_from_str(&due, DATE_FORMAT)
                    .map_err(|e| StoreError::BadRecord(format!("due_date '{}': {}", due, e)))?;
                Ok(Some(ScheduleRecord {
                    card_id: *id,
                    due_date,
                    interval_index: index as usize,
                }))
            }
        }
    }

    /// Insert or replace a card's record in a single atomic statement.
    pub fn upsert(&self, record: &ScheduleRecord) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO schedule (card_id, due_date, interval_index) VALUES (?1, ?2, ?3)",
            params![
                record.card_id.to_hex(),
                record.due_date.format(DATE_FORMAT).to_string(),
                record.interval_index as i64,
            ],
        )?;
        Ok(())
    }

    /// Delete a card's record, restoring it to "never seen". Returns whether
    /// a row existed.
    pub fn delete(&self, id: &CardId) -> Result<bool> {
        let n = self.conn.execute(
            "DELETE FROM schedule WHERE card_id = ?1",
            params![id.to_hex()],
        )?;
        Ok(n > 0)
    }

    /// All card identities currently in the store.
    pub fn card_ids(&self) -> Result<Vec<CardId>> {
        let mut stmt = self.conn.prepare("SELECT card_id FROM schedule")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut ids = Vec::new();
        for row in rows {
            let digest = row?;
            let id = CardId::from_hex(&digest)
                .ok_or_else(|| StoreError::BadRecord(format!("card_id '{}'", digest)))?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Whether the card should be shown on `today`. No record counts as due.
    pub fn is_due(&self, id: &CardId, today: NaiveDate) -> Result<bool> {
        Ok(super::algorithm::is_due(self.get(id)?.as_ref(), today))
    }

    /// Drop every record whose identity is not in `live`. Returns the number
    /// of orphans removed.
    pub fn prune_orphans(&self, live: &HashSet<CardId>) -> Result<usize> {
        let mut removed = 0;
        for id in self.card_ids()? {
            if !live.contains(&id) && self.delete(&id)? {
                removed += 1;
            }
        }
        if removed > 0 {
            log::info!("Pruned {} orphaned schedule record(s)", removed);
        }
        Ok(removed)
    }
}
