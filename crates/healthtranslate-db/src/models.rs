//! Database row types: these map directly to SQLite rows.
//! Distinct from healthtranslate-types models to keep the DB layer independent.

/// `messages` is a JSON array of `{"encrypted_message": "<blob>"}` objects.
pub struct ChatHistoryRow {
    pub user_email: String,
    pub messages: String,
    pub updated_at: String,
}
