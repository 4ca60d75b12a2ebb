use axum::{Json, extract::State, response::IntoResponse};
use tracing::{debug, warn};

use healthtranslate_types::api::{
    ProviderRequest, ProviderResponse, TranslationRequest, TranslationResponse,
};

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::extract::AppJson;
use crate::languages::Language;
use crate::together::{self, TogetherClient};

fn client(state: &AppState) -> ApiResult<&TogetherClient> {
    state
        .together
        .as_ref()
        .ok_or(ApiError::NotConfigured("Together AI API key"))
}

/// POST /translate
pub async fn translate(
    State(state): State<AppState>,
    AppJson(req): AppJson<TranslationRequest>,
) -> ApiResult<impl IntoResponse> {
    let client = client(&state)?;

    let target = Language::from_code(&req.target_lang).ok_or_else(|| {
        warn!("Unsupported target language {}", req.target_lang);
        ApiError::UnsupportedLanguage(req.target_lang.clone())
    })?;
    let source = Language::from_code_or_english(&req.source_lang);

    debug!("Translating {} -> {}", source.name(), target.name());
    let translated_text = client
        .complete(&together::translation_prompt(&req.text, source, target))
        .await?;

    Ok(Json(TranslationResponse { translated_text }))
}

/// POST /provider-response: answer a patient query as a clinician would.
pub async fn provider_response(
    State(state): State<AppState>,
    AppJson(req): AppJson<ProviderRequest>,
) -> ApiResult<impl IntoResponse> {
    let client = client(&state)?;
    let lang = Language::from_code_or_english(&req.lang);

    debug!("Provider response requested in {}", lang.name());
    let response = client
        .complete(&together::provider_prompt(&req.text, lang))
        .await?;

    Ok(Json(ProviderResponse { response }))
}
