use serde::{Deserialize, Serialize};

/// A login-capable account. `password_hash` is a PHC-format Argon2id string.
#[derive(Debug, Clone)]
pub struct Account {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// One stored chat message. The server only keeps the sealed blob, never
/// the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedMessage {
    pub encrypted_message: String,
}

