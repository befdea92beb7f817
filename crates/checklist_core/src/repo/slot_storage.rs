//! Local key-value slot storage.
//!
//! # Responsibility
//! - Read and overwrite one named slot holding an opaque text payload.
//! - Provide a SQLite-backed implementation and a process-local one.
//!
//! # Invariants
//! - A write replaces the whole slot value; there is no partial state.
//! - Reading a slot that was never written yields `None`, not an error.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport failure of a slot storage backend.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Slot keys must be non-blank.
    InvalidKey,
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey => write!(f, "slot key must not be blank"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Statement(value))
    }
}

/// Named-slot storage contract consumed by the item store.
pub trait SlotStorage {
    fn read_slot(&self, key: &str) -> StorageResult<Option<String>>;
    fn write_slot(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// SQLite-backed slots stored in the `kv_slots` table.
///
/// Several instances may borrow the same connection; they observe each
/// other's writes immediately.
pub struct SqliteSlotStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStorage<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SlotStorage for SqliteSlotStorage<'_> {
    fn read_slot(&self, key: &str) -> StorageResult<Option<String>> {
        let key = checked_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> StorageResult<()> {
        let key = checked_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_slots (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local slots for headless hosts and tests.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read_slot(&self, key: &str) -> StorageResult<Option<String>> {
        let key = checked_key(key)?;
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write_slot(&self, key: &str, value: &str) -> StorageResult<()> {
        let key = checked_key(key)?;
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn checked_key(key: &str) -> StorageResult<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(StorageError::InvalidKey);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::{MemorySlotStorage, SlotStorage, SqliteSlotStorage, StorageError};
    use crate::db::open_db_in_memory;

    #[test]
    fn sqlite_slot_overwrites_previous_value() {
        let conn = open_db_in_memory().unwrap();
        let storage = SqliteSlotStorage::new(&conn);

        assert_eq!(storage.read_slot("todos").unwrap(), None);
        storage.write_slot("todos", "[1]").unwrap();
        storage.write_slot("todos", "[2]").unwrap();
        assert_eq!(storage.read_slot("todos").unwrap().as_deref(), Some("[2]"));

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn memory_slot_clones_share_state() {
        let first = MemorySlotStorage::new();
        let second = first.clone();

        first.write_slot("todos", "[]").unwrap();
        assert_eq!(second.read_slot("todos").unwrap().as_deref(), Some("[]"));
        assert_eq!(second.read_slot("other").unwrap(), None);
    }

    #[test]
    fn blank_keys_are_rejected() {
        let storage = MemorySlotStorage::new();
        let err = storage.write_slot("  ", "x").unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey));
    }
}
