use aes_gcm::aead::OsRng;
use aes_gcm::aead::rand_core::RngCore;
use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};

use crate::encrypt::CipherError;

/// Generate a random 256-bit key for AES-256-GCM.
pub fn generate_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}

/// Encode a key to URL-safe base64 for `.env` files.
pub fn key_to_base64(key: &[u8; 32]) -> String {
    URL_SAFE.encode(key)
}

/// Decode a base64 key. Both alphabets are accepted, padded or not.
pub fn key_from_base64(encoded: &str) -> Result<[u8; 32], CipherError> {
    let encoded = encoded.trim();
    let bytes = [URL_SAFE, URL_SAFE_NO_PAD, STANDARD, STANDARD_NO_PAD]
        .iter()
        .find_map(|engine| engine.decode(encoded).ok())
        .ok_or(CipherError::InvalidKey)?;

    bytes.try_into().map_err(|_| CipherError::InvalidKey)
}
