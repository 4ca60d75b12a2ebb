use crate::Database;
use crate::models::ChatHistoryRow;
use anyhow::{Context, Result};
use healthtranslate_types::models::EncryptedMessage;
use rusqlite::Connection;
use tracing::debug;

impl Database {
    // -- Chat history --

    pub fn get_chat_history(&self, user_email: &str) -> Result<Option<Vec<EncryptedMessage>>> {
        let Some(row) = self.with_conn(|conn| query_chat_history(conn, user_email))? else {
            return Ok(None);
        };

        let messages: Vec<EncryptedMessage> = serde_json::from_str(&row.messages)
            .with_context(|| format!("Corrupt chat history for {}", row.user_email))?;
        debug!(
            "Loaded {} stored messages for {} (updated {})",
            messages.len(),
            row.user_email,
            row.updated_at
        );
        Ok(Some(messages))
    }

    /// Insert the record if absent, otherwise overwrite its messages.
    pub fn upsert_chat_history(&self, user_email: &str, messages: &[EncryptedMessage]) -> Result<()> {
        let encoded = serde_json::to_string(messages)?;

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO chat_history (user_email, messages) VALUES (?1, ?2)
                 ON CONFLICT(user_email) DO UPDATE
                 SET messages = excluded.messages, updated_at = datetime('now')",
                (user_email, &encoded),
            )?;
            Ok(())
        })
    }
}

fn query_chat_history(conn: &Connection, user_email: &str) -> Result<Option<ChatHistoryRow>> {
    let mut stmt = conn.prepare(
        "SELECT user_email, messages, updated_at FROM chat_history WHERE user_email = ?1",
    )?;

    let row = stmt
        .query_row([user_email], |row| {
            Ok(ChatHistoryRow {
                user_email: row.get(0)?,
                messages: row.get(1)?,
                updated_at: row.get(2)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
