//! Emotion and language classification over the generation backend.
//!
//! Classifier failures never fail a request: a transport error or an answer
//! that matches nothing in the vocabulary resolves to the fallback sentinel.

use tracing::warn;

use crate::llm_client::TextGenerator;
use crate::rewrite::prompts::{build_emotion_prompt, build_language_prompt};
use crate::vocab::{match_emotion, match_language, EMOTION_FALLBACK, LANGUAGE_FALLBACK};

/// Dominant emotion of `text`, or `"Neutral"` when the model answer matches
/// nothing in the vocabulary or the call fails.
pub async fn classify_emotion(llm: &dyn TextGenerator, text: &str) -> String {
    match llm.generate(&build_emotion_prompt(text)).await {
        Ok(answer) => match_emotion(&answer).unwrap_or(EMOTION_FALLBACK).to_string(),
        Err(e) => {
            warn!("emotion classification failed, using fallback: {e}");
            EMOTION_FALLBACK.to_string()
        }
    }
}

/// Language of `text`, or `"Unknown"` when the model answer matches nothing
/// in the vocabulary or the call fails.
pub async fn classify_language(llm: &dyn TextGenerator, text: &str) -> String {
    match llm.generate(&build_language_prompt(text)).await {
        Ok(answer) => match_language(&answer)
            .unwrap_or(LANGUAGE_FALLBACK)
            .to_string(),
        Err(e) => {
            warn!("language classification failed, using fallback: {e}");
            LANGUAGE_FALLBACK.to_string()
        }
    }
}
