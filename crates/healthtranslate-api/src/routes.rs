use axum::{
    Json, Router, middleware,
    routing::{get, post},
};

use healthtranslate_types::api::MessageResponse;

use crate::auth::{self, AppState};
use crate::chat_history;
use crate::middleware::require_auth;
use crate::translation;
use crate::tts;

/// All gateway routes. CORS and tracing layers are added by the server.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/translate", post(translation::translate))
        .route("/provider-response", post(translation::provider_response))
        .route("/text-to-speech", post(tts::text_to_speech))
        .route("/text-to-speech/test", get(tts::test_connection))
        .route("/text-to-speech/{text}", get(tts::text_to_speech_get))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/me", get(auth::me))
        .route(
            "/chat-history",
            get(chat_history::get_chat_history).post(chat_history::save_chat_history),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new().merge(public_routes).merge(protected_routes)
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Healthcare Translator API is running".to_string(),
    })
}
