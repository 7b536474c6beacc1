pub mod health;

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};

use crate::rewrite::handlers;
use crate::state::AppState;

/// The four CORS headers every response carries, preflight included.
const CORS_HEADERS: [(&str, &str); 4] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-headers", "Content-Type"),
    ("access-control-allow-methods", "POST, OPTIONS"),
    ("access-control-max-age", "86400"),
];

async fn attach_cors_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    response
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/generate",
            post(handlers::handle_generate).options(handlers::handle_preflight),
        )
        .layer(middleware::from_fn(attach_cors_headers))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::build_router;
    use crate::llm_client::{LlmError, TextGenerator};
    use crate::state::AppState;
    use async_trait::async_trait;
    use axum::body::{self, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    /// Replays a scripted list of replies and records every prompt it saw.
    struct ScriptedGenerator {
        replies: Mutex<Vec<Result<String, LlmError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(replies: Vec<Result<String, LlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let mut replies = self.replies.lock().unwrap();
            assert!(!replies.is_empty(), "generator called more often than scripted");
            replies.remove(0)
        }
    }

    fn test_router(llm: Arc<ScriptedGenerator>) -> Router {
        build_router(AppState { llm })
    }

    fn post_generate(json: &str) -> Request<Body> {
        Request::post("/generate")
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analysis_only_round_trip() {
        let llm = Arc::new(ScriptedGenerator::new(vec![
            Ok("Joy".to_string()),
            Ok("English".to_string()),
        ]));
        let router = test_router(llm.clone());

        let response = router
            .oneshot(post_generate(
                r#"{"baseText": "hello", "targetLength": 5, "analysisOnly": true}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload["text"], "hello");
        assert_eq!(payload["emotion"], "Joy");
        assert_eq!(payload["language"], "English");

        // Both classifiers saw the unmodified base text.
        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts.iter().all(|p| p.contains("hello")));
    }

    #[tokio::test]
    async fn test_rewrite_round_trip() {
        let llm = Arc::new(ScriptedGenerator::new(vec![
            Ok("ten chars!".to_string()),
            Ok("Calm".to_string()),
            Ok("English".to_string()),
        ]));

        let response = test_router(llm)
            .oneshot(post_generate(r#"{"baseText": "hello", "targetLength": 10}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload["text"], "ten chars!");
        assert_eq!(payload["emotion"], "Calm");
        assert_eq!(payload["language"], "English");
    }

    #[tokio::test]
    async fn test_missing_base_text_rejected() {
        for body in [r#"{}"#, r#"{"baseText": "   "}"#] {
            let llm = Arc::new(ScriptedGenerator::new(vec![]));
            let response = test_router(llm).oneshot(post_generate(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let payload = body_json(response).await;
            assert_eq!(payload["text"], "");
            assert_eq!(payload["error"], "missing_base_text");
        }
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let llm = Arc::new(ScriptedGenerator::new(vec![]));
        let response = test_router(llm)
            .oneshot(post_generate("this is not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = body_json(response).await;
        assert_eq!(payload["text"], "");
        assert_eq!(payload["error"], "invalid_json_payload");
    }

    #[tokio::test]
    async fn test_upstream_failure_echoes_status_and_base_text() {
        let llm = Arc::new(ScriptedGenerator::new(vec![Err(LlmError::Api {
            status: 500,
            message: "internal error".to_string(),
        })]));

        let response = test_router(llm)
            .oneshot(post_generate(r#"{"baseText": "hello", "targetLength": 10}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload = body_json(response).await;
        assert_eq!(payload["text"], "hello");
        assert!(payload["error"].as_str().unwrap().contains("internal error"));
    }

    #[tokio::test]
    async fn test_preflight_is_204_with_cors_headers() {
        let llm = Arc::new(ScriptedGenerator::new(vec![]));
        let response = test_router(llm)
            .oneshot(
                Request::options("/generate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
        assert_eq!(headers["access-control-max-age"], "86400");

        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_error_responses_carry_cors_headers() {
        let llm = Arc::new(ScriptedGenerator::new(vec![]));
        let response = test_router(llm)
            .oneshot(post_generate("not json"))
            .await
            .unwrap();

        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(response.headers()["access-control-max-age"], "86400");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let llm = Arc::new(ScriptedGenerator::new(vec![]));
        let response = test_router(llm)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload["status"], "ok");
    }
}
