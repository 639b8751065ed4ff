use std::mem;

use tracing::debug;

use crate::error::AlignError;
use crate::models::{Monologue, Sentence};

/// Result of Stage 2 speaker assignment
#[derive(Debug)]
pub struct AssignResult {
    /// Candidate sentences regrouped into speaker-labeled turns
    pub turns: Vec<Monologue>,
    /// True when candidate sentences ran past the last reference turn
    pub reference_exhausted: bool,
}

/// Execute Stage 2: bucket candidate sentences into reference speaker turns.
///
/// A cursor walks the reference turns once. Each candidate sentence that
/// starts at or after the current reference turn's end closes the
/// accumulating output turn (labeled with the current reference speaker)
/// and advances the cursor. When the reference runs out, every remaining
/// sentence attaches to the last known speaker - that is degradation, not
/// an error.
///
/// Reference turns must be non-empty; empty ones left over from merging
/// are skipped here rather than rejected.
pub fn assign_speakers(
    sentences: &[Sentence],
    reference: &[Monologue],
) -> Result<AssignResult, AlignError> {
    let reference: Vec<&Monologue> = reference.iter().filter(|turn| !turn.is_empty()).collect();
    if reference.is_empty() {
        return Err(AlignError::EmptyReference);
    }

    let mut turns = Vec::new();
    let mut accumulated: Vec<Sentence> = Vec::new();
    let mut cursor = 0usize;
    let mut reference_exhausted = false;

    for sentence in sentences {
        let past_current = reference[cursor]
            .end_ms()
            .is_some_and(|end| sentence.start_ms >= end);

        if past_current {
            if cursor + 1 < reference.len() {
                turns.push(labeled_turn(mem::take(&mut accumulated), reference[cursor]));
                cursor += 1;
            } else {
                reference_exhausted = true;
            }
        }

        accumulated.push(sentence.clone());
    }

    if !accumulated.is_empty() {
        turns.push(labeled_turn(accumulated, reference[cursor]));
    }

    if reference_exhausted {
        debug!(
            "Reference turns exhausted; trailing sentences attributed to speaker {}",
            reference[cursor].speaker_id
        );
    }

    Ok(AssignResult {
        turns,
        reference_exhausted,
    })
}

fn labeled_turn(sentences: Vec<Sentence>, reference: &Monologue) -> Monologue {
    Monologue {
        speaker_id: reference.speaker_id.clone(),
        topic: None,
        call_id: reference.call_id,
        sentences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::concat_text;

    fn reference_turn(speaker: &str, start_ms: i64, end_ms: i64) -> Monologue {
        Monologue::new(
            speaker,
            Some("Intro".to_string()),
            7,
            vec![Sentence::new("reference text.", start_ms, end_ms)],
        )
    }

    #[test]
    fn test_sentences_bucket_into_reference_windows() {
        let reference = vec![
            reference_turn("a", 0, 2000),
            reference_turn("b", 2000, 4000),
        ];
        let sentences = vec![
            Sentence::new("First.", 0, 900),
            Sentence::new("Second.", 1000, 1900),
            Sentence::new("Third.", 2100, 2900),
        ];

        let result = assign_speakers(&sentences, &reference).unwrap();

        assert_eq!(result.turns.len(), 2);
        assert_eq!(result.turns[0].speaker_id, "a");
        assert_eq!(result.turns[0].sentence_count(), 2);
        assert_eq!(result.turns[1].speaker_id, "b");
        assert_eq!(result.turns[1].sentence_count(), 1);
        assert!(!result.reference_exhausted);
    }

    #[test]
    fn test_assigned_turns_drop_topic_and_keep_call_id() {
        let reference = vec![reference_turn("a", 0, 2000)];
        let sentences = vec![Sentence::new("Hello.", 0, 500)];

        let result = assign_speakers(&sentences, &reference).unwrap();

        assert_eq!(result.turns[0].topic, None);
        assert_eq!(result.turns[0].call_id, 7);
    }

    #[test]
    fn test_exhausted_reference_attaches_to_last_speaker() {
        let reference = vec![
            reference_turn("a", 0, 1000),
            reference_turn("b", 1000, 2000),
        ];
        let sentences = vec![
            Sentence::new("One.", 0, 500),
            Sentence::new("Two.", 1100, 1500),
            Sentence::new("Three.", 2500, 3000),
            Sentence::new("Four.", 3100, 3600),
        ];

        let result = assign_speakers(&sentences, &reference).unwrap();

        assert!(result.reference_exhausted);
        assert_eq!(result.turns.len(), 2);
        assert_eq!(result.turns[1].speaker_id, "b");
        // everything past the last reference turn stays with speaker b
        assert_eq!(result.turns[1].sentence_count(), 3);
    }

    #[test]
    fn test_every_sentence_lands_in_exactly_one_turn() {
        let reference = vec![
            reference_turn("a", 0, 1500),
            reference_turn("b", 1500, 2500),
            reference_turn("a", 2500, 5000),
        ];
        let sentences: Vec<Sentence> = (0..10)
            .map(|i| Sentence::new(format!("s{i}."), i * 600, i * 600 + 500))
            .collect();

        let result = assign_speakers(&sentences, &reference).unwrap();

        let total: usize = result.turns.iter().map(|t| t.sentence_count()).sum();
        assert_eq!(total, sentences.len());

        let expected: String = sentences.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(concat_text(&result.turns), expected);

        // turn order follows sentence order
        let starts: Vec<i64> = result.turns.iter().filter_map(|t| t.start_ms()).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn test_empty_reference_is_an_error() {
        let sentences = vec![Sentence::new("Hello.", 0, 500)];

        assert!(matches!(
            assign_speakers(&sentences, &[]),
            Err(AlignError::EmptyReference)
        ));

        // all-empty turns are no better
        let hollow = vec![Monologue::new("a", None, 7, vec![])];
        assert!(matches!(
            assign_speakers(&sentences, &hollow),
            Err(AlignError::EmptyReference)
        ));
    }

    #[test]
    fn test_empty_candidate_yields_empty_output() {
        let reference = vec![reference_turn("a", 0, 1000)];
        let result = assign_speakers(&[], &reference).unwrap();

        assert!(result.turns.is_empty());
    }
}
