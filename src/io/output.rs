use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::Monologue;

/// Machine-readable output format
#[derive(Debug, Clone, Serialize)]
pub struct MachineTranscript {
    /// Source recording id
    pub call_id: u64,
    /// Speaker ids present in the transcript
    pub speakers: Vec<String>,
    /// Corrected turns in order
    pub turns: Vec<MachineTurn>,
    /// Metadata about the processing
    pub metadata: AlignmentMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct MachineTurn {
    /// Generated identifier for this turn (UUID)
    pub turn_id: String,
    pub speaker_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_name: Option<String>,
    pub start_ms: i64,
    pub end_ms: i64,
    pub sentences: Vec<MachineSentence>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MachineSentence {
    pub text: String,
    pub start_ms: i64,
    pub end_ms: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlignmentMetadata {
    pub reference_turns: usize,
    pub merged_turns: usize,
    pub candidate_segments: usize,
    pub output_turns: usize,
    pub merge_passes: usize,
    pub repairs_applied: usize,
    pub duration_ms: i64,
}

impl MachineTranscript {
    /// Build from corrected turns, resolving display names when available
    pub fn from_monologues(
        turns: &[Monologue],
        metadata: AlignmentMetadata,
        speaker_names: Option<&HashMap<String, String>>,
    ) -> Self {
        let call_id = turns.first().map(|t| t.call_id).unwrap_or(0);

        let mut speakers: Vec<String> = turns.iter().map(|t| t.speaker_id.clone()).collect();
        speakers.sort();
        speakers.dedup();

        let turns: Vec<MachineTurn> = turns
            .iter()
            .map(|t| MachineTurn {
                turn_id: uuid::Uuid::new_v4().to_string(),
                speaker_id: t.speaker_id.clone(),
                speaker_name: speaker_names.and_then(|names| names.get(&t.speaker_id).cloned()),
                start_ms: t.start_ms().unwrap_or(0),
                end_ms: t.end_ms().unwrap_or(0),
                sentences: t
                    .sentences
                    .iter()
                    .map(|s| MachineSentence {
                        text: s.text.clone(),
                        start_ms: s.start_ms,
                        end_ms: s.end_ms,
                    })
                    .collect(),
            })
            .collect();

        Self {
            call_id,
            speakers,
            turns,
            metadata,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable transcript format
pub struct HumanTranscript<'a> {
    turns: &'a [Monologue],
    speaker_names: Option<&'a HashMap<String, String>>,
}

impl<'a> HumanTranscript<'a> {
    pub fn new(turns: &'a [Monologue]) -> Self {
        Self {
            turns,
            speaker_names: None,
        }
    }

    pub fn with_speaker_names(
        turns: &'a [Monologue],
        speaker_names: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            turns,
            speaker_names: Some(speaker_names),
        }
    }

    /// Format the transcript as human-readable text
    pub fn format(&self) -> String {
        let mut output = String::new();

        for turn in self.turns {
            let start_time = format_timestamp(turn.start_ms().unwrap_or(0));
            let speaker = self
                .speaker_names
                .and_then(|names| names.get(&turn.speaker_id))
                .cloned()
                .unwrap_or_else(|| format!("Speaker {}", turn.speaker_id));
            output.push_str(&format!("[{}] {}:\n", start_time, speaker));

            let wrapped = wrap_text(&turn.text(), 80);
            output.push_str(&wrapped);
            output.push_str("\n\n");
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Format milliseconds as MM:SS.mmm; negative values clamp to zero
fn format_timestamp(ms: i64) -> String {
    let ms = ms.max(0);
    let seconds = ms / 1000;
    let millis = ms % 1000;
    let minutes = seconds / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}.{:03}", minutes, secs, millis)
}

/// Wrap text at approximately the given width
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        if line_len + word.len() + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word.len();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentence;

    fn sample_turns() -> Vec<Monologue> {
        vec![
            Monologue::new(
                "spk_1",
                None,
                99,
                vec![Sentence::new("Hello there.", 0, 1200)],
            ),
            Monologue::new(
                "spk_2",
                None,
                99,
                vec![Sentence::new("Hi.", 1500, 2000)],
            ),
        ]
    }

    fn sample_metadata() -> AlignmentMetadata {
        AlignmentMetadata {
            reference_turns: 4,
            merged_turns: 2,
            candidate_segments: 2,
            output_turns: 2,
            merge_passes: 2,
            repairs_applied: 0,
            duration_ms: 2000,
        }
    }

    #[test]
    fn test_machine_transcript_from_monologues() {
        let turns = sample_turns();
        let machine = MachineTranscript::from_monologues(&turns, sample_metadata(), None);

        assert_eq!(machine.call_id, 99);
        assert_eq!(machine.speakers, vec!["spk_1", "spk_2"]);
        assert_eq!(machine.turns.len(), 2);
        assert_eq!(machine.turns[0].start_ms, 0);
        assert_eq!(machine.turns[0].speaker_name, None);
        assert_ne!(machine.turns[0].turn_id, machine.turns[1].turn_id);
    }

    #[test]
    fn test_machine_transcript_resolves_names() {
        let turns = sample_turns();
        let names = HashMap::from([("spk_1".to_string(), "Dana Reyes".to_string())]);
        let machine = MachineTranscript::from_monologues(&turns, sample_metadata(), Some(&names));

        assert_eq!(machine.turns[0].speaker_name.as_deref(), Some("Dana Reyes"));
        assert_eq!(machine.turns[1].speaker_name, None);
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let turns = sample_turns();
        let machine = MachineTranscript::from_monologues(&turns, sample_metadata(), None);
        machine.write_json(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["call_id"], 99);
        assert_eq!(value["turns"][0]["sentences"][0]["text"], "Hello there.");
    }

    #[test]
    fn test_human_format() {
        let turns = sample_turns();
        let names = HashMap::from([("spk_1".to_string(), "Dana Reyes".to_string())]);
        let human = HumanTranscript::with_speaker_names(&turns, &names);
        let text = human.format();

        assert!(text.contains("[00:00.000] Dana Reyes:\nHello there."));
        assert!(text.contains("[00:01.500] Speaker spk_2:\nHi."));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "00:00.000");
        assert_eq!(format_timestamp(1500), "00:01.500");
        assert_eq!(format_timestamp(65_000), "01:05.000");
        assert_eq!(format_timestamp(-300), "00:00.000");
    }

    #[test]
    fn test_wrap_text() {
        let text = "This is a test of the text wrapping function that should wrap at 20 chars";
        let wrapped = wrap_text(text, 20);
        for line in wrapped.lines() {
            assert!(line.len() <= 25); // Allow some slack for long words
        }
    }
}
