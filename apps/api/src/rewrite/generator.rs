//! Rewrite orchestration — the bounded length-correction loop.
//!
//! Flow: build prompt (with feedback from the prior attempt's measured
//! length) → generate → trim → check tolerance. Stops on the first
//! in-tolerance result; after the last attempt the most recent text is kept
//! as-is. The final text is then classified for emotion and language.

use tracing::{debug, info};

use crate::llm_client::{LlmError, TextGenerator};
use crate::rewrite::classify::{classify_emotion, classify_language};
use crate::rewrite::prompts::build_rewrite_prompt;
use crate::rewrite::within_tolerance;

/// Max generation rounds before the last attempt is kept regardless of length.
pub const MAX_REWRITE_ATTEMPTS: usize = 4;

/// Composed result for one rewrite or analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub text: String,
    pub emotion: String,
    pub language: String,
}

/// Rewrites `base_text` toward `target_length` characters, then classifies
/// the final text.
///
/// A length miss triggers another attempt with corrective feedback; a
/// transport failure from any generation call does not — it propagates as a
/// request-level failure. Classifier failures resolve to sentinels and never
/// propagate.
pub async fn rewrite(
    llm: &dyn TextGenerator,
    base_text: &str,
    target_length: usize,
    target_emotion: Option<&str>,
    target_language: Option<&str>,
) -> Result<RewriteOutcome, LlmError> {
    let target = target_length.max(1);

    let mut previous_length: Option<usize> = None;
    let mut text = String::new();

    for attempt in 1..=MAX_REWRITE_ATTEMPTS {
        let prompt = build_rewrite_prompt(
            base_text,
            target,
            previous_length,
            target_emotion,
            target_language,
        );

        text = llm.generate(&prompt).await?.trim().to_string();
        let length = text.chars().count();
        debug!("rewrite attempt {attempt}: {length} chars (target {target})");

        if within_tolerance(length, target) {
            break;
        }
        previous_length = Some(length);
    }

    let emotion = classify_emotion(llm, &text).await;
    let language = classify_language(llm, &text).await;

    info!(
        "rewrite finished: {} chars (target {target}), emotion={emotion}, language={language}",
        text.chars().count()
    );

    Ok(RewriteOutcome {
        text,
        emotion,
        language,
    })
}

/// Classification-only path for analysis mode. The text passes through
/// untouched; only emotion and language are computed.
pub async fn analyze(llm: &dyn TextGenerator, text: &str) -> RewriteOutcome {
    RewriteOutcome {
        text: text.to_string(),
        emotion: classify_emotion(llm, text).await,
        language: classify_language(llm, text).await,
    }
}
