use serde::{Deserialize, Serialize};
use serde_json::Value;

// -- JWT Claims --

/// JWT claims shared by the token service and the bearer middleware.
/// `sub` carries the account email, `username` the display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub iat: usize,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Login form. `username` holds the account email.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(token: String) -> Self {
        Self {
            token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Identity recovered from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    pub email: String,
}

// -- Chat history --

/// Message bodies are caller-defined; the gateway stores them opaquely.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatHistory {
    pub messages: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

// -- Translation --

#[derive(Debug, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub translated_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ProviderRequest {
    pub text: String,
    pub lang: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub response: String,
}

// -- Text to speech --

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    pub lang: String,
}

/// `lang` is a Web Speech API locale such as `en-US`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TtsResponse {
    pub text: String,
    pub lang: String,
}

#[derive(Debug, Deserialize)]
pub struct TtsQuery {
    #[serde(default = "default_tts_lang")]
    pub lang: String,
}

fn default_tts_lang() -> String {
    "en".to_string()
}

// -- Misc --

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
