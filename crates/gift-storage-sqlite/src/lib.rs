//! gift-storage-sqlite
//!
//! Relational snapshot store for the gift table. Every save drops and recreates
//! the table so the stored rows always mirror the ledger exactly.

use std::{path::Path, str::FromStr};

use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use gift_core::{CoreError, GiftStore};
use gift_domain::{GiftRecord, STORE_TABLE};

/// [`GiftStore`] backed by a single SQLite database file.
pub struct SqliteGiftStore {
    conn: Connection,
    location: String,
}

impl SqliteGiftStore {
    /// Opens (or creates) the database at `path`.
    ///
    /// # Errors
    /// Returns [`CoreError::Persistence`] when the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path).map_err(|err| {
            persistence(format!("failed to open database at {}: {err}", path.display()))
        })?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")
            .map_err(|err| persistence(format!("failed to configure database: {err}")))?;
        tracing::debug!(path = %path.display(), "gift store opened");
        Ok(Self {
            conn,
            location: path.display().to_string(),
        })
    }

    pub fn open_in_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|err| persistence(format!("failed to open in-memory database: {err}")))?;
        Ok(Self {
            conn,
            location: ":memory:".to_string(),
        })
    }

    /// Whether the gift table has ever been written.
    pub fn has_table(&self) -> Result<bool, CoreError> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![STORE_TABLE],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| persistence(format!("failed to inspect schema: {err}")))?;
        Ok(found.is_some())
    }
}

impl GiftStore for SqliteGiftStore {
    fn replace_all(&mut self, records: &[GiftRecord]) -> Result<(), CoreError> {
        let tx = self
            .conn
            .transaction()
            .map_err(|err| persistence(format!("failed to start transaction: {err}")))?;

        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {STORE_TABLE};
             CREATE TABLE {STORE_TABLE} (
                recipient TEXT NOT NULL,
                gift TEXT NOT NULL,
                budget TEXT NOT NULL,
                cost TEXT,
                purchased INTEGER NOT NULL,
                link TEXT
             );"
        ))
        .map_err(|err| persistence(format!("failed to recreate {STORE_TABLE}: {err}")))?;

        {
            let mut insert = tx
                .prepare(&format!(
                    "INSERT INTO {STORE_TABLE} (recipient, gift, budget, cost, purchased, link)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
                ))
                .map_err(|err| persistence(format!("failed to prepare insert: {err}")))?;
            for record in records {
                insert
                    .execute(params![
                        record.recipient,
                        record.gift,
                        record.budget.to_string(),
                        record.cost.map(|cost| cost.to_string()),
                        record.purchased,
                        record.link,
                    ])
                    .map_err(|err| persistence(format!("failed to insert row: {err}")))?;
            }
        }

        tx.commit()
            .map_err(|err| persistence(format!("failed to commit {STORE_TABLE}: {err}")))?;
        tracing::debug!(rows = records.len(), table = STORE_TABLE, "table replaced");
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<GiftRecord>, CoreError> {
        if !self.has_table()? {
            return Ok(Vec::new());
        }
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT recipient, gift, budget, cost, purchased, link
                 FROM {STORE_TABLE} ORDER BY rowid"
            ))
            .map_err(|err| persistence(format!("failed to prepare query: {err}")))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StoredRow {
                    recipient: row.get(0)?,
                    gift: row.get(1)?,
                    budget: row.get(2)?,
                    cost: row.get(3)?,
                    purchased: row.get(4)?,
                    link: row.get(5)?,
                })
            })
            .map_err(|err| persistence(format!("failed to read {STORE_TABLE}: {err}")))?;

        let mut records = Vec::new();
        for row in rows {
            let row = row.map_err(|err| persistence(format!("failed to read row: {err}")))?;
            records.push(row.into_record()?);
        }
        Ok(records)
    }

    fn location(&self) -> String {
        self.location.clone()
    }
}

struct StoredRow {
    recipient: String,
    gift: String,
    budget: String,
    cost: Option<String>,
    purchased: bool,
    link: Option<String>,
}

impl StoredRow {
    fn into_record(self) -> Result<GiftRecord, CoreError> {
        let cost = match self.cost {
            Some(raw) => Some(parse_decimal(&raw)?),
            None => None,
        };
        Ok(GiftRecord {
            recipient: self.recipient,
            gift: self.gift,
            budget: parse_decimal(&self.budget)?,
            cost,
            purchased: self.purchased,
            link: self.link,
        })
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal, CoreError> {
    Decimal::from_str(raw).map_err(|err| persistence(format!("stored amount `{raw}`: {err}")))
}

fn persistence(message: String) -> CoreError {
    CoreError::Persistence(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_loads_empty() {
        let store = SqliteGiftStore::open_in_memory().expect("open");
        assert!(!store.has_table().expect("inspect"));
        assert!(store.load_all().expect("load").is_empty());
    }

    #[test]
    fn corrupt_amount_is_persistence_error() {
        let mut store = SqliteGiftStore::open_in_memory().expect("open");
        store.replace_all(&[]).expect("create");
        store
            .conn
            .execute(
                &format!(
                    "INSERT INTO {STORE_TABLE} (recipient, gift, budget, cost, purchased, link)
                     VALUES ('Alice', 'Book', 'lots', NULL, 0, NULL)"
                ),
                [],
            )
            .expect("insert");
        assert!(matches!(
            store.load_all(),
            Err(CoreError::Persistence(_))
        ));
    }
}
