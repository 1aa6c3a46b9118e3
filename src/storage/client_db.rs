use rusqlite::{OptionalExtension, Result as SqlResult, params};
use std::path::Path;

use super::database::Database;
use crate::common::SessionIdentity;

/// Key under which the device's display name is stored
pub const USERNAME_KEY: &str = "username";

/// Per-device key/value store for client state
pub struct ClientDatabase {
    db: Database,
}

impl ClientDatabase {
    /// Initialize client database at custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> SqlResult<Self> {
        let db = Database::new(path)?;
        let client_db = Self { db };
        client_db.init_schema()?;
        Ok(client_db)
    }

    #[cfg(test)]
    pub fn in_memory() -> SqlResult<Self> {
        let client_db = Self {
            db: Database::in_memory()?,
        };
        client_db.init_schema()?;
        Ok(client_db)
    }

    fn init_schema(&self) -> SqlResult<()> {
        self.db.connection().execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            )",
            [],
        )?;
        Ok(())
    }

    pub fn get_setting(&self, key: &str) -> SqlResult<Option<String>> {
        self.db
            .connection()
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
    }

    pub fn set_setting(&self, key: &str, value: &str) -> SqlResult<()> {
        self.db.connection().execute(
            "INSERT OR REPLACE INTO settings (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now'))",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove_setting(&self, key: &str) -> SqlResult<()> {
        self.db
            .connection()
            .execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ========== Identity ==========

    pub fn load_identity(&self) -> SqlResult<Option<SessionIdentity>> {
        Ok(self
            .get_setting(USERNAME_KEY)?
            .map(|name| SessionIdentity::from_input(&name)))
    }

    pub fn save_identity(&self, identity: &SessionIdentity) -> SqlResult<()> {
        self.set_setting(USERNAME_KEY, identity.as_str())
    }

    pub fn clear_identity(&self) -> SqlResult<()> {
        self.remove_setting(USERNAME_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_absent_until_saved() {
        let db = ClientDatabase::in_memory().unwrap();
        assert_eq!(db.load_identity().unwrap(), None);

        db.save_identity(&SessionIdentity::from_input("carol")).unwrap();
        assert_eq!(
            db.load_identity().unwrap(),
            Some(SessionIdentity::from_input("carol"))
        );
    }

    #[test]
    fn saving_again_replaces_the_name() {
        let db = ClientDatabase::in_memory().unwrap();
        db.save_identity(&SessionIdentity::from_input("first")).unwrap();
        db.save_identity(&SessionIdentity::anonymous()).unwrap();

        assert_eq!(db.get_setting(USERNAME_KEY).unwrap().as_deref(), Some("Anonymous"));
    }

    #[test]
    fn clearing_forgets_identity() {
        let db = ClientDatabase::in_memory().unwrap();
        db.save_identity(&SessionIdentity::from_input("dave")).unwrap();
        db.clear_identity().unwrap();
        assert_eq!(db.load_identity().unwrap(), None);
    }
}
