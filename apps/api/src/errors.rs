use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Request-level error type for the generate endpoint.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, ApiError>`.
///
/// Wire shapes are fixed: validation failures answer
/// `{"text": "", "error": <code>}` with 400; upstream failures echo the
/// caller's base text alongside the upstream detail.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid JSON payload")]
    InvalidJson,

    #[error("baseText is missing or empty")]
    MissingBaseText,

    #[error("upstream generation failure: {detail}")]
    Upstream {
        /// HTTP status reported by the generation API, when it answered at all.
        status: Option<u16>,
        detail: String,
        base_text: String,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidJson => {
                error_response(StatusCode::BAD_REQUEST, "", "invalid_json_payload")
            }
            ApiError::MissingBaseText => {
                error_response(StatusCode::BAD_REQUEST, "", "missing_base_text")
            }
            ApiError::Upstream {
                status,
                detail,
                base_text,
            } => {
                tracing::error!("upstream generation failure: {detail}");
                let status = status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                error_response(status, &base_text, &detail)
            }
        }
    }
}

fn error_response(status: StatusCode, text: &str, error: &str) -> Response {
    (status, Json(json!({ "text": text, "error": error }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_400() {
        assert_eq!(
            ApiError::InvalidJson.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MissingBaseText.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_upstream_error_echoes_upstream_status() {
        let response = ApiError::Upstream {
            status: Some(429),
            detail: "quota exceeded".to_string(),
            base_text: "hello".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_upstream_error_without_status_maps_to_502() {
        let response = ApiError::Upstream {
            status: None,
            detail: "connection refused".to_string(),
            base_text: "hello".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
