//! Prompt construction for the rewrite and classification calls.
//! All builders are pure and deterministic; the model never sees anything
//! that is not assembled here.

use crate::rewrite::{tolerance_window, within_tolerance};
use crate::vocab::{EMOTIONS, LANGUAGES};

/// Hard rules appended to every rewrite prompt.
const REWRITE_RULES: &str = "\
Preserve the original register and emotional intensity. \
Do not pad with filler words or repeated phrases to reach the length. \
Do not use emoji. \
Return ONLY the rewritten text, with no preamble, quotes, or explanation.";

/// Renders the rewrite instruction for one attempt.
///
/// `previous_length` is the measured length of the prior attempt; when it
/// falls outside the tolerance window a corrective clause is appended that
/// names the window and biases the model toward the longer side.
pub fn build_rewrite_prompt(
    base_text: &str,
    target_length: usize,
    previous_length: Option<usize>,
    target_emotion: Option<&str>,
    target_language: Option<&str>,
) -> String {
    let target = target_length.max(1);

    let mut prompt = format!(
        "Rewrite the following text so that it is approximately {target} characters long, \
         counting every character including spaces and punctuation.\n{REWRITE_RULES}"
    );

    if let Some(emotion) = target_emotion {
        prompt.push_str(&format!(
            "\nAmplify the emotion \"{emotion}\" in the rewritten text while keeping the meaning intact."
        ));
    }

    if let Some(language) = target_language {
        prompt.push_str(&format!("\nWrite the rewritten text in {language}."));
    }

    if let Some(previous) = previous_length {
        if !within_tolerance(previous, target) {
            let (lo, hi) = tolerance_window(target);
            prompt.push_str(&format!(
                "\nYour previous version was {previous} characters, which missed the target. \
                 Produce a version between {lo} and {hi} characters; when in doubt, \
                 err on the longer side rather than the shorter."
            ));
        }
    }

    prompt.push_str(&format!("\n\nTEXT:\n{base_text}"));
    prompt
}

/// Forced-choice emotion classification prompt listing the full vocabulary.
pub fn build_emotion_prompt(text: &str) -> String {
    format!(
        "Classify the dominant emotion of the following text.\n\
         Answer with exactly one of: {}.\n\
         Respond with the single emotion name and nothing else.\n\n\
         TEXT:\n{text}",
        EMOTIONS.join(", ")
    )
}

/// Forced-choice language classification prompt listing the full vocabulary.
pub fn build_language_prompt(text: &str) -> String {
    format!(
        "Identify the language the following text is written in.\n\
         Answer with exactly one of: {}.\n\
         Respond with the single language name and nothing else.\n\n\
         TEXT:\n{text}",
        LANGUAGES.join(", ")
    )
}
