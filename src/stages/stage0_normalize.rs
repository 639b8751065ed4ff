use tracing::debug;

use crate::error::AlignError;
use crate::models::{Monologue, Sentence, WhisperSegment};

/// Result of Stage 0 timestamp normalization
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeResult {
    /// Candidate sentences rebased onto the reference time base
    pub sentences: Vec<Sentence>,
    /// Offset subtracted from every candidate timestamp
    pub delta_ms: i64,
}

/// Perform Stage 0: rebase candidate timestamps onto the reference.
///
/// Candidate segments carry floating-point second timestamps; the reference
/// is already in integer milliseconds. Each segment is converted to
/// milliseconds, then the whole sequence is shifted so the first candidate
/// sentence starts exactly where the first reference turn starts.
///
/// This is a single-offset alignment; clock drift and scale mismatch are
/// not corrected. Both sequences must be non-empty.
pub fn normalize(
    segments: &[WhisperSegment],
    reference: &[Monologue],
) -> Result<NormalizeResult, AlignError> {
    if segments.is_empty() {
        return Err(AlignError::EmptyCandidate);
    }

    let reference_start = reference
        .first()
        .and_then(|turn| turn.start_ms())
        .ok_or(AlignError::EmptyReference)?;

    let mut sentences: Vec<Sentence> = segments.iter().map(to_milliseconds).collect();

    let delta_ms = sentences[0].start_ms - reference_start;
    for sentence in &mut sentences {
        sentence.start_ms -= delta_ms;
        sentence.end_ms -= delta_ms;
    }

    debug!(
        "Normalized {} segments with offset {}ms",
        sentences.len(),
        delta_ms
    );

    Ok(NormalizeResult { sentences, delta_ms })
}

/// Convert one candidate segment to integer milliseconds
fn to_milliseconds(segment: &WhisperSegment) -> Sentence {
    Sentence {
        text: segment.text.clone(),
        start_ms: (segment.start * 1000.0).round() as i64,
        end_ms: (segment.end * 1000.0).round() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_starting_at(start_ms: i64) -> Vec<Monologue> {
        vec![Monologue::new(
            "spk_1",
            None,
            7,
            vec![Sentence::new("Hello.", start_ms, start_ms + 1500)],
        )]
    }

    fn segment(text: &str, start: f64, end: f64) -> WhisperSegment {
        WhisperSegment {
            text: text.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn test_normalize_shifts_onto_reference() {
        let segments = vec![segment("Hi", 0.0, 0.5), segment("there", 0.5, 1.0)];
        let reference = reference_starting_at(200);

        let result = normalize(&segments, &reference).unwrap();

        assert_eq!(result.delta_ms, -200);
        assert_eq!(result.sentences[0].start_ms, 200);
        assert_eq!(result.sentences[0].end_ms, 700);
        assert_eq!(result.sentences[1].start_ms, 700);
        assert_eq!(result.sentences[1].end_ms, 1200);
    }

    #[test]
    fn test_first_sentence_matches_reference_start() {
        let segments = vec![segment("Well", 12.34, 13.1), segment("yes", 13.2, 13.9)];
        let reference = reference_starting_at(9000);

        let result = normalize(&segments, &reference).unwrap();

        assert_eq!(result.sentences[0].start_ms, 9000);
        // relative spacing is preserved
        assert_eq!(
            result.sentences[1].start_ms - result.sentences[0].start_ms,
            13200 - 12340
        );
    }

    #[test]
    fn test_rounds_to_nearest_millisecond() {
        let segments = vec![segment("Hm", 0.0, 0.0004)];
        let reference = reference_starting_at(0);

        let result = normalize(&segments, &reference).unwrap();

        assert_eq!(result.sentences[0].end_ms, 0);
    }

    #[test]
    fn test_empty_candidate_is_an_error() {
        let reference = reference_starting_at(0);
        assert_eq!(normalize(&[], &reference), Err(AlignError::EmptyCandidate));
    }

    #[test]
    fn test_empty_reference_is_an_error() {
        let segments = vec![segment("Hi", 0.0, 0.5)];
        assert_eq!(normalize(&segments, &[]), Err(AlignError::EmptyReference));

        // a first turn with no sentences is just as unusable
        let hollow = vec![Monologue::new("spk_1", None, 7, vec![])];
        assert_eq!(
            normalize(&segments, &hollow),
            Err(AlignError::EmptyReference)
        );
    }
}
