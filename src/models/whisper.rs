use serde::{Deserialize, Serialize};

/// Candidate transcript as produced by Whisper-style tooling
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WhisperTranscript {
    pub segments: Vec<WhisperSegment>,
    #[serde(default)]
    pub language: Option<String>,
}

/// A recognized segment with floating-point second timestamps and no
/// speaker label
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WhisperSegment {
    pub text: String,
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whisper_transcript() {
        let json = r#"{
            "language": "en",
            "segments": [
                {"text": "Hi", "start": 0.0, "end": 0.5},
                {"text": "there", "start": 0.5, "end": 1.0}
            ]
        }"#;

        let transcript: WhisperTranscript = serde_json::from_str(json).unwrap();

        assert_eq!(transcript.language.as_deref(), Some("en"));
        assert_eq!(transcript.segments.len(), 2);
        assert_eq!(transcript.segments[0].text, "Hi");
        assert_eq!(transcript.segments[1].start, 0.5);
    }
}
