use axum::Json;
use tracing::{debug, info};

use healthtranslate_types::api::{TtsQuery, TtsRequest, TtsResponse};

use crate::error::{ApiError, ApiResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::languages::speech_locale;

/// Longest text accepted for browser speech synthesis, in characters.
pub const MAX_TEXT_CHARS: usize = 5000;

/// Check text and language for browser-side synthesis and resolve the
/// Web Speech locale. No audio is produced here.
pub fn prepare(req: TtsRequest) -> ApiResult<TtsResponse> {
    let chars = req.text.chars().count();
    if chars == 0 {
        return Err(ApiError::Validation("text must not be empty".to_string()));
    }
    if chars > MAX_TEXT_CHARS {
        return Err(ApiError::Validation(format!(
            "text must be at most {} characters",
            MAX_TEXT_CHARS
        )));
    }

    let locale = speech_locale(&req.lang).ok_or_else(|| {
        ApiError::Validation(format!("Unsupported language: {}", req.lang))
    })?;

    let preview: String = req.text.chars().take(50).collect();
    debug!("TTS request - text: {}..., language: {}", preview, req.lang);

    Ok(TtsResponse {
        text: req.text,
        lang: locale.to_string(),
    })
}

/// POST /text-to-speech
pub async fn text_to_speech(AppJson(req): AppJson<TtsRequest>) -> ApiResult<Json<TtsResponse>> {
    prepare(req).map(Json)
}

/// GET /text-to-speech/{text}?lang=en
pub async fn text_to_speech_get(
    AppPath(text): AppPath<String>,
    AppQuery(query): AppQuery<TtsQuery>,
) -> ApiResult<Json<TtsResponse>> {
    prepare(TtsRequest {
        text,
        lang: query.lang,
    })
    .map(Json)
}

/// GET /text-to-speech/test
pub async fn test_connection() -> Json<TtsResponse> {
    info!("TTS connectivity check");
    Json(TtsResponse {
        text: "Test successful".to_string(),
        lang: "en-US".to_string(),
    })
}
