use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{ApiError, ApiResult};
use crate::languages::Language;

pub const DEFAULT_BASE_URL: &str = "https://api.together.xyz";

const MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";
const MAX_TOKENS: u32 = 1500;
const TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    text: String,
}

/// Client for the Together AI completions API. Single attempt per call.
#[derive(Clone)]
pub struct TogetherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TogetherClient {
    pub fn new(api_key: String, base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Run one instruction through the model and return the trimmed text.
    pub async fn complete(&self, instruction: &str) -> ApiResult<String> {
        let body = CompletionRequest {
            model: MODEL,
            prompt: format!("<s>[INST] {} [/INST]", instruction),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!("Sending completion request ({} chars)", body.prompt.len());
        let response = self
            .http
            .post(format!("{}/v1/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!("Together AI request failed: {}", e);
                ApiError::Upstream(e.to_string())
            })?;

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            error!("Together AI returned an unreadable body: {}", e);
            ApiError::Upstream("Invalid response format from Together AI".to_string())
        })?;

        first_choice(parsed)
    }
}

fn first_choice(response: CompletionResponse) -> ApiResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.text.trim().to_string())
        .ok_or_else(|| {
            error!("Together AI response had no choices");
            ApiError::Upstream("Invalid response format from Together AI".to_string())
        })
}

pub fn translation_prompt(text: &str, source: Language, target: Language) -> String {
    format!(
        "Translate the following text from {} to {}, ensuring the translation is complete and accurate: '{}'",
        source.name(),
        target.name(),
        text
    )
}

pub fn provider_prompt(text: &str, lang: Language) -> String {
    format!(
        "You are Dr. Martinez, a healthcare expert. Provide a professional, complete response in {} \
         to the following patient query. Ensure the response is complete, and includes all relevant \
         medical advice: '{}'",
        lang.name(),
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ApiResult<String> {
        first_choice(serde_json::from_str(body).unwrap())
    }

    #[test]
    fn first_choice_is_trimmed() {
        let text = parse(r#"{"choices":[{"text":"  Hola, ¿cómo está?\n"},{"text":"other"}]}"#).unwrap();
        assert_eq!(text, "Hola, ¿cómo está?");
    }

    #[test]
    fn missing_or_empty_choices_is_upstream_error() {
        assert!(matches!(parse(r#"{"choices":[]}"#), Err(ApiError::Upstream(_))));
        assert!(matches!(parse(r#"{"id":"cmpl-1"}"#), Err(ApiError::Upstream(_))));
    }

    #[test]
    fn prompts_name_languages() {
        let prompt = translation_prompt("I feel dizzy", Language::English, Language::Urdu);
        assert_eq!(
            prompt,
            "Translate the following text from English to Urdu, ensuring the translation is complete and accurate: 'I feel dizzy'"
        );

        let prompt = provider_prompt("headache", Language::French);
        assert!(prompt.starts_with("You are Dr. Martinez, a healthcare expert."));
        assert!(prompt.contains("complete response in French to the following patient query."));
        assert!(prompt.ends_with("includes all relevant medical advice: 'headache'"));
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = TogetherClient::new("key".into(), "http://localhost:9999/").unwrap();
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
