use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{
    CallTranscript, Monologue, Sentence, TranscriptResponse, WhisperSegment, WhisperTranscript,
};

/// Parse a reference transcript file (Gong `/calls/transcript` JSON)
pub fn parse_reference_file(path: &Path) -> Result<Vec<Monologue>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_reference_json(&content)
}

/// Parse Gong transcript JSON; the payload's first call is used
pub fn parse_reference_json(json: &str) -> Result<Vec<Monologue>> {
    let response: TranscriptResponse =
        serde_json::from_str(json).context("Failed to parse Gong transcript JSON")?;
    let call = response
        .call_transcripts
        .first()
        .context("Transcript payload contains no calls")?;
    monologues_from_call(call)
}

/// Flatten one call's wire transcript into core monologues
pub fn monologues_from_call(call: &CallTranscript) -> Result<Vec<Monologue>> {
    let call_id: u64 = call
        .call_id
        .parse()
        .with_context(|| format!("Invalid call id: {}", call.call_id))?;

    Ok(call
        .transcript
        .iter()
        .map(|turn| Monologue {
            speaker_id: turn.speaker_id.clone(),
            topic: turn.topic.clone(),
            call_id,
            sentences: turn
                .sentences
                .iter()
                .map(|s| Sentence::new(s.text.clone(), s.start, s.end))
                .collect(),
        })
        .collect())
}

/// Parse a candidate transcript file (Whisper JSON with segments)
pub fn parse_candidate_file(path: &Path) -> Result<Vec<WhisperSegment>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_candidate_json(&content)
}

/// Parse Whisper JSON into candidate segments
pub fn parse_candidate_json(json: &str) -> Result<Vec<WhisperSegment>> {
    let transcript: WhisperTranscript =
        serde_json::from_str(json).context("Failed to parse Whisper JSON")?;
    Ok(transcript.segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_JSON: &str = r#"{
        "callTranscripts": [{
            "callId": "314159",
            "transcript": [
                {
                    "speakerId": "spk_1",
                    "topic": "Intro",
                    "sentences": [
                        {"start": 200, "end": 1500, "text": "Hello there."},
                        {"start": 1600, "end": 2400, "text": "How are you?"}
                    ]
                },
                {
                    "speakerId": "spk_2",
                    "topic": null,
                    "sentences": [
                        {"start": 2500, "end": 3200, "text": "Doing well."}
                    ]
                }
            ]
        }]
    }"#;

    #[test]
    fn test_parse_reference_json() {
        let turns = parse_reference_json(REFERENCE_JSON).unwrap();

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].call_id, 314159);
        assert_eq!(turns[0].speaker_id, "spk_1");
        assert_eq!(turns[0].topic.as_deref(), Some("Intro"));
        assert_eq!(turns[0].sentence_count(), 2);
        assert_eq!(turns[0].start_ms(), Some(200));
        assert_eq!(turns[1].topic, None);
        assert_eq!(turns[1].end_ms(), Some(3200));
    }

    #[test]
    fn test_parse_reference_rejects_empty_payload() {
        let result = parse_reference_json(r#"{"callTranscripts": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_reference_rejects_bad_call_id() {
        let json = r#"{
            "callTranscripts": [{
                "callId": "not-a-number",
                "transcript": []
            }]
        }"#;
        assert!(parse_reference_json(json).is_err());
    }

    #[test]
    fn test_parse_candidate_json() {
        let json = r#"{
            "segments": [
                {"text": "Hi", "start": 0.0, "end": 0.5},
                {"text": "there", "start": 0.5, "end": 1.0}
            ]
        }"#;

        let segments = parse_candidate_json(json).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "Hi");
        assert_eq!(segments[1].end, 1.0);
    }
}
