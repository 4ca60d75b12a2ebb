pub mod migrations;
pub mod models;
pub mod queries;

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

use healthtranslate_types::models::EncryptedMessage;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Private in-memory database, used by tests and throwaway runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&conn)
    }
}

/// Keyed document store holding one encrypted history per owner.
///
/// `upsert_one` replaces the whole sequence in a single statement; readers
/// never observe a half-written record.
pub trait ChatStore: Send + Sync {
    fn find_one(&self, user_email: &str) -> Result<Option<Vec<EncryptedMessage>>>;

    fn upsert_one(&self, user_email: &str, messages: &[EncryptedMessage]) -> Result<()>;
}

impl ChatStore for Database {
    fn find_one(&self, user_email: &str) -> Result<Option<Vec<EncryptedMessage>>> {
        self.get_chat_history(user_email)
    }

    fn upsert_one(&self, user_email: &str, messages: &[EncryptedMessage]) -> Result<()> {
        self.upsert_chat_history(user_email, messages)
    }
}
