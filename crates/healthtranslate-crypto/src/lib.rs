//! HealthTranslate Crypto Library
//!
//! Chat history is sealed at rest with a single process-wide AES-256-GCM
//! key. Each message is encrypted independently and carries its own nonce,
//! so a stored blob can be decrypted without any side data.

pub mod encrypt;
pub mod keys;

pub use encrypt::{CipherError, MessageCipher};
