use std::sync::Arc;

use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum
/// extractors. Holds only immutable, process-wide values — there is no
/// cross-request mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Generation backend. Production: `GeminiClient`; tests swap in a
    /// scripted implementation.
    pub llm: Arc<dyn TextGenerator>,
}
