use chrono::{DateTime, Utc};
use rusqlite::{Result as SqlResult, Row, params};
use std::path::Path;
use uuid::Uuid;

use super::database::Database;
use super::error::{StoreError, StoreResult};
use crate::common::{Message, NewMessage};

/// Append-only message table backing the HTTP API
pub struct MessageStore {
    db: Database,
}

/// Column values as stored, before timestamp conversion
struct MessageRow {
    id: String,
    content: String,
    sender: String,
    created_at: i64,
}

impl MessageRow {
    fn from_row(row: &Row<'_>) -> SqlResult<Self> {
        Ok(Self {
            id: row.get(0)?,
            content: row.get(1)?,
            sender: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    fn into_message(self) -> StoreResult<Message> {
        let created_at = DateTime::from_timestamp_millis(self.created_at)
            .ok_or(StoreError::InvalidTimestamp(self.created_at))?;
        Ok(Message {
            id: self.id,
            content: self.content,
            sender: self.sender,
            created_at,
        })
    }
}

impl MessageStore {
    /// Open (or create) the store at `path`
    pub fn with_path<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let db = Database::new(path)?;
        let store = Self { db };
        store.init_schema()?;
        Ok(store)
    }

    #[cfg(test)]
    pub fn in_memory() -> StoreResult<Self> {
        let store = Self {
            db: Database::in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> SqlResult<()> {
        let conn = self.db.connection();
        // `seq` keeps insertion order for rows sharing a timestamp
        conn.execute(
            "CREATE TABLE IF NOT EXISTS messages (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                content TEXT NOT NULL,
                sender TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_messages_created_at ON messages(created_at, seq)",
            [],
        )?;

        Ok(())
    }

    /// Persist a new message with a fresh id and the current time
    pub fn create_message(&self, new_message: &NewMessage) -> StoreResult<Message> {
        self.create_message_at(new_message, Utc::now())
    }

    /// Persist a new message stamped with `now`, truncated to milliseconds
    pub fn create_message_at(
        &self,
        new_message: &NewMessage,
        now: DateTime<Utc>,
    ) -> StoreResult<Message> {
        let millis = now.timestamp_millis();
        let created_at =
            DateTime::from_timestamp_millis(millis).ok_or(StoreError::InvalidTimestamp(millis))?;
        let message = Message {
            id: Uuid::new_v4().to_string(),
            content: new_message.content.clone(),
            sender: new_message.sender.clone(),
            created_at,
        };

        self.db.connection().execute(
            "INSERT INTO messages (id, content, sender, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![message.id, message.content, message.sender, millis],
        )?;

        Ok(message)
    }

    /// All messages, oldest first
    pub fn list_messages(&self) -> StoreResult<Vec<Message>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            "SELECT id, content, sender, created_at
             FROM messages
             ORDER BY created_at ASC, seq ASC",
        )?;

        let rows = stmt
            .query_map([], MessageRow::from_row)?
            .collect::<SqlResult<Vec<_>>>()?;

        rows.into_iter().map(MessageRow::into_message).collect()
    }

    /// Get message count
    pub fn count(&self) -> StoreResult<usize> {
        let conn = self.db.connection();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    #[cfg(test)]
    pub(crate) fn database(&self) -> &Database {
        &self.db
    }
}
