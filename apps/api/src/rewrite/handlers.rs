//! Axum route handlers for the generate endpoint.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ApiError;
use crate::rewrite::generator::{analyze, rewrite};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Inbound body for POST /generate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub base_text: String,
    #[serde(default)]
    pub target_length: Option<i64>,
    #[serde(default)]
    pub target_emotion: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
    #[serde(default)]
    pub analysis_only: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub text: String,
    pub emotion: String,
    pub language: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate
///
/// Rewrites `baseText` toward `targetLength` characters, or — with
/// `analysisOnly` — classifies it without rewriting. The body is read raw so
/// malformed JSON maps to this endpoint's own 400 shape instead of the
/// extractor's default rejection.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, ApiError> {
    let request: GenerateRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::InvalidJson)?;

    let base_text = request.base_text;
    if base_text.trim().is_empty() {
        return Err(ApiError::MissingBaseText);
    }

    let target_length = effective_target_length(request.target_length, &base_text);

    let outcome = if request.analysis_only {
        info!("analysis request: {} chars", base_text.chars().count());
        analyze(state.llm.as_ref(), &base_text).await
    } else {
        info!(
            "rewrite request: {} chars toward {target_length}",
            base_text.chars().count()
        );
        rewrite(
            state.llm.as_ref(),
            &base_text,
            target_length,
            request.target_emotion.as_deref(),
            request.target_language.as_deref(),
        )
        .await
        .map_err(|e| ApiError::Upstream {
            status: e.upstream_status(),
            detail: e.to_string(),
            base_text: base_text.clone(),
        })?
    };

    Ok(Json(GenerateResponse {
        text: outcome.text,
        emotion: outcome.emotion,
        language: outcome.language,
    }))
}

/// OPTIONS /generate — CORS preflight, no body. The CORS headers themselves
/// are attached by the router middleware.
pub async fn handle_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Effective target: the requested length when ≥ 1, else the base text's
/// character count (itself clamped to ≥ 1).
fn effective_target_length(requested: Option<i64>, base_text: &str) -> usize {
    match requested {
        Some(n) if n >= 1 => n as usize,
        _ => base_text.chars().count().max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_target_uses_requested_length() {
        assert_eq!(effective_target_length(Some(42), "hello"), 42);
    }

    #[test]
    fn test_effective_target_defaults_to_base_text_length() {
        assert_eq!(effective_target_length(None, "hello"), 5);
        assert_eq!(effective_target_length(Some(0), "hello"), 5);
        assert_eq!(effective_target_length(Some(-3), "hello"), 5);
    }

    #[test]
    fn test_effective_target_counts_chars_not_bytes() {
        assert_eq!(effective_target_length(None, "héllo"), 5);
    }

    #[test]
    fn test_request_fields_are_camel_case() {
        let request: GenerateRequest = serde_json::from_str(
            r#"{
                "baseText": "hello",
                "targetLength": 12,
                "targetEmotion": "Joy",
                "targetLanguage": "French",
                "analysisOnly": true
            }"#,
        )
        .unwrap();

        assert_eq!(request.base_text, "hello");
        assert_eq!(request.target_length, Some(12));
        assert_eq!(request.target_emotion.as_deref(), Some("Joy"));
        assert_eq!(request.target_language.as_deref(), Some("French"));
        assert!(request.analysis_only);
    }

    #[test]
    fn test_request_optional_fields_default() {
        let request: GenerateRequest = serde_json::from_str(r#"{"baseText": "hi"}"#).unwrap();
        assert_eq!(request.target_length, None);
        assert_eq!(request.target_emotion, None);
        assert_eq!(request.target_language, None);
        assert!(!request.analysis_only);
    }
}
