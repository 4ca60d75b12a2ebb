use std::sync::Arc;

use axum::{Extension, Json, extract::State, response::IntoResponse};
use tracing::info;

use healthtranslate_types::api::{CurrentUser, LoginRequest, RegisterRequest, TokenResponse};

use crate::accounts::CredentialStore;
use crate::chat::ChatRepository;
use crate::error::ApiResult;
use crate::extract::AppJson;
use crate::together::TogetherClient;
use crate::token::TokenService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub tokens: TokenService,
    pub credentials: CredentialStore,
    pub chats: ChatRepository,
    /// `None` when no Together AI key is configured.
    pub together: Option<TogetherClient>,
}

/// POST /register: vet the email and hand back a token. No account is stored.
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .credentials
        .register(&req.email, &req.password, req.username.as_deref())?;

    let token = state.tokens.issue(&user.email, &user.username)?;
    info!("Issued registration token for {}", user.email);

    Ok(Json(TokenResponse::bearer(token)))
}

/// POST /login: `username` carries the email.
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    // Argon2 is CPU-bound.
    let credentials = state.credentials.clone();
    let user = tokio::task::spawn_blocking(move || {
        credentials.authenticate(&req.username, &req.password)
    })
    .await??;

    let token = state.tokens.issue(&user.email, &user.username)?;
    info!("{} logged in", user.email);

    Ok(Json(TokenResponse::bearer(token)))
}

/// GET /me
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<CurrentUser> {
    Json(user)
}
