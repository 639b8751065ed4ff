use serde::{Deserialize, Serialize};

/// Atomic transcript unit: one sentence with millisecond timestamps.
///
/// Timestamps are signed because offset correction can pass through
/// negative intermediate values before settling on the reference time base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// The sentence text - never changed by the pipeline, only regrouped
    pub text: String,
    /// Start timestamp in milliseconds
    pub start_ms: i64,
    /// End timestamp in milliseconds
    pub end_ms: i64,
}

impl Sentence {
    pub fn new(text: impl Into<String>, start_ms: i64, end_ms: i64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            end_ms,
        }
    }

    /// Duration of this sentence in milliseconds
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// A monologue is a contiguous run of sentences attributed to one speaker.
///
/// Emptiness is a valid transient state while turns are being merged;
/// empty monologues are filtered out at the end of each merge pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monologue {
    /// Opaque speaker identifier from the reference source
    pub speaker_id: String,
    /// Free-text topic label, absent for speaker-assigned turns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Identifies the source recording
    pub call_id: u64,
    /// Sentences in non-decreasing start order
    pub sentences: Vec<Sentence>,
}

impl Monologue {
    pub fn new(
        speaker_id: impl Into<String>,
        topic: Option<String>,
        call_id: u64,
        sentences: Vec<Sentence>,
    ) -> Self {
        Self {
            speaker_id: speaker_id.into(),
            topic,
            call_id,
            sentences,
        }
    }

    /// Start time in milliseconds, from the first sentence
    pub fn start_ms(&self) -> Option<i64> {
        self.sentences.first().map(|s| s.start_ms)
    }

    /// End time in milliseconds, from the last sentence
    pub fn end_ms(&self) -> Option<i64> {
        self.sentences.last().map(|s| s.end_ms)
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Duration of this monologue in milliseconds, 0 when empty
    pub fn duration_ms(&self) -> i64 {
        match (self.start_ms(), self.end_ms()) {
            (Some(start), Some(end)) => end - start,
            _ => 0,
        }
    }

    /// Display form: sentence texts joined with spaces
    pub fn text(&self) -> String {
        let texts: Vec<&str> = self.sentences.iter().map(|s| s.text.as_str()).collect();
        texts.join(" ")
    }
}

/// Exact concatenation of all sentence text across `turns`, in order.
///
/// This is the quantity every transformation stage must preserve: merging
/// and boundary repair regroup sentences but never touch their text.
pub fn concat_text(turns: &[Monologue]) -> String {
    turns
        .iter()
        .flat_map(|turn| turn.sentences.iter())
        .map(|s| s.text.as_str())
        .collect()
}
