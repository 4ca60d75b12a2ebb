use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;

use healthtranslate_crypto::CipherError;
use healthtranslate_types::api::ErrorBody;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // -- Auth --
    #[error("Incorrect email or password")]
    Unauthorized,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Email already registered")]
    AlreadyRegistered,
    #[error("Invalid email address")]
    InvalidEmail,

    // -- Request shape --
    #[error("{0}")]
    Validation(String),
    /// An extractor refused the request; keeps the extractor's status.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    // -- Chat history --
    #[error("Failed to decrypt chat history")]
    Decryption(#[source] CipherError),

    // -- Upstream AI provider --
    #[error("{0} not configured")]
    NotConfigured(&'static str),
    #[error("{0}")]
    Upstream(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::AlreadyRegistered | Self::InvalidEmail | Self::UnsupportedLanguage(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Rejected { status, .. } => *status,
            Self::Decryption(_)
            | Self::NotConfigured(_)
            | Self::Upstream(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CipherError> for ApiError {
    fn from(err: CipherError) -> Self {
        match err {
            CipherError::Decryption | CipherError::Malformed(_) => Self::Decryption(err),
            other => Self::Internal(other.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        error!("spawn_blocking join error: {}", err);
        Self::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            Self::Internal(e) => {
                error!("Internal error: {:#}", e);
                "Internal server error".to_string()
            }
            Self::Decryption(e) => {
                error!("Chat history decryption failed: {}", e);
                self.to_string()
            }
            _ => self.to_string(),
        };

        let mut response = (status, Json(ErrorBody { detail })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cipher_errors_map_to_decryption() {
        let err: ApiError = CipherError::Decryption.into();
        assert!(matches!(err, ApiError::Decryption(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: ApiError = CipherError::Encryption.into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn unauthorized_carries_challenge() {
        let response = ApiError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }

    #[test]
    fn client_errors() {
        assert_eq!(ApiError::AlreadyRegistered.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::UnsupportedLanguage("de".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Validation("too long".into()).status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
