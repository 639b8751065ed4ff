use std::sync::LazyLock;

use regex::Regex;

static SENTENCE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]").expect("valid sentence-start pattern"));

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?\-–]$").expect("valid sentence-end pattern"));

/// True when `text` reads as the start of a new sentence (leading capital).
///
/// Both merge and repair treat a failed check as evidence that a turn
/// boundary fell mid-sentence. Deliberately a standalone predicate so a
/// locale-aware detector can replace it without touching the stages.
pub fn starts_new_sentence(text: &str) -> bool {
    SENTENCE_START.is_match(text)
}

/// True when `text` ends with terminal punctuation (`.`, `!`, `?`, `-`, `–`).
pub fn ends_sentence(text: &str) -> bool {
    SENTENCE_END.is_match(text)
}
