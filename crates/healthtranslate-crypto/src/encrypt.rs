use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit, OsRng, rand_core::RngCore},
};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use serde_json::Value;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    #[error("encryption key must be 32 bytes of base64")]
    InvalidKey,
    #[error("encryption failed")]
    Encryption,
    /// Bad encoding, truncated blob, failed tag check or wrong key.
    #[error("decryption failed")]
    Decryption,
    /// The blob authenticated but its plaintext is not valid JSON.
    #[error("decrypted payload is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Seals chat messages with AES-256-GCM.
///
/// Blob layout is `base64url(nonce || ciphertext || tag)` without padding.
/// Plaintext is the compact JSON form of the message and is only ever read
/// back through `serde_json`.
#[derive(Clone)]
pub struct MessageCipher {
    cipher: Aes256Gcm,
}

impl MessageCipher {
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key)),
        }
    }

    pub fn from_base64(encoded: &str) -> Result<Self, CipherError> {
        let key = crate::keys::key_from_base64(encoded)?;
        Ok(Self::new(&key))
    }

    pub fn encrypt(&self, message: &Value) -> Result<String, CipherError> {
        // serde_json's default map is ordered, so this is canonical.
        let plaintext = serde_json::to_vec(message).map_err(|_| CipherError::Encryption)?;
        let sealed = self.seal(&plaintext)?;
        Ok(B64.encode(sealed))
    }

    pub fn decrypt(&self, blob: &str) -> Result<Value, CipherError> {
        let sealed = B64.decode(blob).map_err(|_| CipherError::Decryption)?;
        let plaintext = self.open(&sealed)?;
        serde_json::from_slice(&plaintext).map_err(CipherError::Malformed)
    }

    fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| CipherError::Encryption)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    fn open(&self, sealed: &[u8]) -> Result<Vec<u8>, CipherError> {
        if sealed.len() < NONCE_LEN + TAG_LEN {
            return Err(CipherError::Decryption);
        }
        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);

        self.cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CipherError::Decryption)
    }
}

impl std::fmt::Debug for MessageCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageCipher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate_key;
    use serde_json::json;

    fn cipher() -> MessageCipher {
        MessageCipher::new(&generate_key())
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let cipher = cipher();
        let message = json!({
            "role": "user",
            "text": "¿Dónde está el hospital?",
            "meta": { "lang": "es", "turn": 3, "flags": [true, null, 1.5] }
        });

        let blob = cipher.encrypt(&message).unwrap();
        assert!(!blob.contains("hospital"));
        assert_eq!(cipher.decrypt(&blob).unwrap(), message);
    }

    #[test]
    fn scalar_values_roundtrip() {
        let cipher = cipher();
        for value in [json!(null), json!("plain"), json!(42), json!([])] {
            let blob = cipher.encrypt(&value).unwrap();
            assert_eq!(cipher.decrypt(&blob).unwrap(), value);
        }
    }

    #[test]
    fn nonce_is_fresh_per_message() {
        let cipher = cipher();
        let message = json!({"text": "same"});
        assert_ne!(cipher.encrypt(&message).unwrap(), cipher.encrypt(&message).unwrap());
    }

    #[test]
    fn wrong_key_fails() {
        let blob = cipher().encrypt(&json!({"text": "Secret message"})).unwrap();
        assert!(matches!(cipher().decrypt(&blob), Err(CipherError::Decryption)));
    }

    #[test]
    fn any_flipped_byte_is_rejected() {
        let cipher = cipher();
        let blob = cipher.encrypt(&json!({"role": "user", "text": "hi"})).unwrap();
        let sealed = B64.decode(&blob).unwrap();

        for i in 0..sealed.len() {
            let mut tampered = sealed.clone();
            tampered[i] ^= 0x01;
            let result = cipher.decrypt(&B64.encode(&tampered));
            assert!(
                matches!(result, Err(CipherError::Decryption)),
                "byte {} flip was not detected",
                i
            );
        }
    }

    #[test]
    fn any_flipped_blob_character_is_rejected() {
        let cipher = cipher();
        let blob = cipher.encrypt(&json!({"text": "hi"})).unwrap();

        for i in 0..blob.len() {
            let mut tampered = blob.clone().into_bytes();
            tampered[i] ^= 0x01;
            let tampered = String::from_utf8(tampered).unwrap();
            assert!(cipher.decrypt(&tampered).is_err(), "char {} flip was not detected", i);
        }
    }

    #[test]
    fn truncated_blob_fails() {
        let cipher = cipher();
        assert!(matches!(cipher.decrypt(""), Err(CipherError::Decryption)));
        assert!(matches!(cipher.decrypt(&B64.encode([0u8; 20])), Err(CipherError::Decryption)));
    }

    #[test]
    fn non_json_plaintext_is_malformed() {
        let cipher = cipher();
        let sealed = cipher.seal(b"{'role': 'user'}").unwrap();
        let result = cipher.decrypt(&B64.encode(sealed));
        assert!(matches!(result, Err(CipherError::Malformed(_))));
    }
}
