use std::sync::Arc;

use serde_json::Value;

use healthtranslate_crypto::MessageCipher;
use healthtranslate_db::ChatStore;
use healthtranslate_types::models::EncryptedMessage;

use crate::error::ApiResult;

/// Encrypted per-owner chat history on top of a `ChatStore`.
///
/// Both operations are blocking; call them from `spawn_blocking`.
#[derive(Clone)]
pub struct ChatRepository {
    store: Arc<dyn ChatStore>,
    cipher: MessageCipher,
}

impl ChatRepository {
    pub fn new(store: Arc<dyn ChatStore>, cipher: MessageCipher) -> Self {
        Self { store, cipher }
    }

    /// Replace the owner's whole history. Every message is sealed before
    /// anything is written, so a cipher failure leaves the old record intact.
    pub fn save(&self, owner_email: &str, messages: &[Value]) -> ApiResult<()> {
        let sealed = messages
            .iter()
            .map(|message| -> ApiResult<EncryptedMessage> {
                Ok(EncryptedMessage {
                    encrypted_message: self.cipher.encrypt(message)?,
                })
            })
            .collect::<ApiResult<Vec<_>>>()?;

        self.store.upsert_one(owner_email, &sealed)?;
        Ok(())
    }

    /// Empty when nothing was ever saved. Fails as a whole if any single
    /// message does not decrypt.
    pub fn load(&self, owner_email: &str) -> ApiResult<Vec<Value>> {
        let Some(sealed) = self.store.find_one(owner_email)? else {
            return Ok(Vec::new());
        };

        let messages = sealed
            .iter()
            .map(|message| self.cipher.decrypt(&message.encrypted_message))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(messages)
    }
}
