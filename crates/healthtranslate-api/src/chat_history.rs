use axum::{Extension, Json, extract::State, response::IntoResponse};
use tracing::info;

use healthtranslate_types::api::{ChatHistory, CurrentUser, StatusResponse};

use crate::auth::AppState;
use crate::error::ApiResult;
use crate::extract::AppJson;

/// POST /chat-history: replace the caller's stored history.
pub async fn save_chat_history(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(chat): AppJson<ChatHistory>,
) -> ApiResult<impl IntoResponse> {
    let count = chat.messages.len();

    // Run blocking encryption + DB upsert off the async runtime
    let chats = state.chats.clone();
    let email = user.email.clone();
    tokio::task::spawn_blocking(move || chats.save(&email, &chat.messages)).await??;

    info!("Saved {} chat messages for {}", count, user.email);
    Ok(Json(StatusResponse {
        status: "Chat history saved".to_string(),
    }))
}

/// GET /chat-history
pub async fn get_chat_history(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<impl IntoResponse> {
    let chats = state.chats.clone();
    let email = user.email;
    let messages = tokio::task::spawn_blocking(move || chats.load(&email)).await??;

    Ok(Json(ChatHistory { messages }))
}
