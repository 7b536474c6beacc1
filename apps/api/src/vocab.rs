//! Fixed emotion and language vocabularies, plus the normalizer that maps
//! free-text model answers onto canonical names.
//!
//! The lists are closed enumerations: a classifier answer either resolves to
//! one of these names or to the fallback sentinel. Raw model text never
//! leaves this module.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Returned when no emotion in the vocabulary matches the model answer.
pub const EMOTION_FALLBACK: &str = "Neutral";

/// Returned when no language in the vocabulary matches the model answer.
pub const LANGUAGE_FALLBACK: &str = "Unknown";

/// Canonical emotion names, in prompt order.
pub const EMOTIONS: [&str; 23] = [
    "Joy",
    "Sadness",
    "Anger",
    "Fear",
    "Surprise",
    "Disgust",
    "Trust",
    "Anticipation",
    "Love",
    "Hope",
    "Pride",
    "Gratitude",
    "Relief",
    "Amusement",
    "Excitement",
    "Calm",
    "Envy",
    "Guilt",
    "Shame",
    "Loneliness",
    "Nostalgia",
    "Frustration",
    "Confusion",
];

/// Canonical language names, in prompt order.
pub const LANGUAGES: [&str; 23] = [
    "English",
    "Spanish",
    "French",
    "German",
    "Italian",
    "Portuguese",
    "Dutch",
    "Swedish",
    "Polish",
    "Russian",
    "Ukrainian",
    "Turkish",
    "Arabic",
    "Hebrew",
    "Hindi",
    "Bengali",
    "Japanese",
    "Korean",
    "Vietnamese",
    "Thai",
    "Indonesian",
    "Chinese (Simplified)",
    "Chinese (Traditional)",
];

static EMOTION_LOOKUP: OnceLock<HashMap<String, &'static str>> = OnceLock::new();
static LANGUAGE_LOOKUP: OnceLock<HashMap<String, &'static str>> = OnceLock::new();

fn build_lookup(vocab: &'static [&'static str]) -> HashMap<String, &'static str> {
    vocab.iter().map(|name| (name.to_lowercase(), *name)).collect()
}

fn emotion_lookup() -> &'static HashMap<String, &'static str> {
    EMOTION_LOOKUP.get_or_init(|| build_lookup(&EMOTIONS))
}

fn language_lookup() -> &'static HashMap<String, &'static str> {
    LANGUAGE_LOOKUP.get_or_init(|| build_lookup(&LANGUAGES))
}

/// Resolves a raw model answer to a canonical emotion name.
pub fn match_emotion(raw: &str) -> Option<&'static str> {
    match_vocabulary(raw, emotion_lookup(), false)
}

/// Resolves a raw model answer to a canonical language name.
/// Parentheses count as token characters so script variants survive the scan.
pub fn match_language(raw: &str) -> Option<&'static str> {
    match_vocabulary(raw, language_lookup(), true)
}

/// Case-insensitive vocabulary match.
///
/// Tries the full trimmed answer first. On a miss, scans tokens (runs of
/// alphabetic characters, plus `(`/`)` when `allow_parens`) and returns the
/// first token that is itself a vocabulary name. `None` means the caller
/// should use its fallback sentinel.
fn match_vocabulary(
    raw: &str,
    lookup: &'static HashMap<String, &'static str>,
    allow_parens: bool,
) -> Option<&'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lowered = trimmed.to_lowercase();
    if let Some(name) = lookup.get(&lowered) {
        return Some(name);
    }

    lowered
        .split(|c: char| !(c.is_alphabetic() || (allow_parens && (c == '(' || c == ')'))))
        .filter(|token| !token.is_empty())
        .find_map(|token| lookup.get(token).copied())
}
