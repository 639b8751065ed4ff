use tracing::debug;

use crate::error::AlignError;
use crate::heuristics::{ends_sentence, starts_new_sentence};
use crate::models::{concat_text, Monologue, Sentence};

/// Result of Stage 3 boundary repair
#[derive(Debug)]
pub struct RepairResult {
    pub turns: Vec<Monologue>,
    /// Number of adjacent pairs where sentences were relocated
    pub repairs_applied: usize,
}

/// A candidate split point found by scanning one side of a turn boundary
#[derive(Debug, Clone, Copy)]
struct SplitPoint {
    /// Sentence index within the scanned turn where the split falls
    index: usize,
    /// Pause between the sentence-complete group and the fragment, in ms
    delta_ms: i64,
    /// How many sentences the split would relocate
    moved: usize,
}

/// Execute Stage 3: pull mis-split sentences back across turn boundaries.
///
/// The coarse windows used during speaker assignment can cut a sentence
/// group in half. For each adjacent pair whose boundary looks mid-sentence
/// (next turn not starting with a capital, or this turn not ending in
/// terminal punctuation), both sides are scanned for the nearest clean
/// split point and the sentences between the boundary and the winning
/// split move to the other side.
///
/// The winner is the side with the longer pause at its split point:
/// pauses between one speaker's own sentences run shorter than the pause
/// at a real speaker change. A split that would relocate a single sentence
/// never wins the comparison against one that found a real pause, but
/// remains usable when it is the only split found; when both sides offer
/// one, the back split is taken.
///
/// One pairwise pass, not iterated to convergence. Text content is
/// preserved and checked.
pub fn repair_boundaries(turns: &[Monologue]) -> Result<RepairResult, AlignError> {
    let original_text = concat_text(turns);
    let mut turns = turns.to_vec();
    let mut repairs_applied = 0;

    for i in 0..turns.len().saturating_sub(1) {
        if turns[i].is_empty() || turns[i + 1].is_empty() {
            continue;
        }

        let boundary_clean = starts_new_sentence(&turns[i + 1].sentences[0].text)
            && ends_sentence(&turns[i].sentences[turns[i].sentences.len() - 1].text);
        if boundary_clean {
            continue;
        }

        let back = scan_back(&turns[i]);
        let front = scan_front(&turns[i + 1]);
        let delta_back = effective_delta(back);
        let delta_front = effective_delta(front);

        match (front, back) {
            (Some(front), _) if delta_front > delta_back => {
                // The real boundary is inside the next turn: its head
                // belongs to this speaker.
                let moved: Vec<Sentence> = turns[i + 1].sentences.drain(..front.index).collect();
                debug!(
                    "Repair at pair {}: pulled {} sentences back (gap {}ms)",
                    i,
                    moved.len(),
                    front.delta_ms
                );
                turns[i].sentences.extend(moved);
                repairs_applied += 1;
            }
            (_, Some(back)) => {
                // The real boundary is inside this turn: its tail belongs
                // to the next speaker.
                let tail: Vec<Sentence> = turns[i].sentences.drain(back.index..).collect();
                debug!(
                    "Repair at pair {}: pushed {} sentences forward (gap {}ms)",
                    i,
                    tail.len(),
                    back.delta_ms
                );
                turns[i + 1].sentences.splice(0..0, tail);
                repairs_applied += 1;
            }
            _ => {}
        }
    }

    let repaired_text = concat_text(&turns);
    if repaired_text != original_text {
        return Err(AlignError::ContentMismatch {
            stage: "repair",
            expected: original_text.len(),
            actual: repaired_text.len(),
        });
    }

    Ok(RepairResult {
        turns,
        repairs_applied,
    })
}

/// Scan a turn backward for the last complete sentence group.
///
/// Walks from the end tracking the most recently seen capital-starting
/// sentence; the first sentence that ends with terminal punctuation while
/// one is tracked marks the split. Everything after it would move forward.
fn scan_back(turn: &Monologue) -> Option<SplitPoint> {
    let mut capital_start: Option<i64> = None;

    for (i, sentence) in turn.sentences.iter().enumerate().rev() {
        if let Some(capital) = capital_start {
            if ends_sentence(&sentence.text) {
                let index = i + 1;
                return Some(SplitPoint {
                    index,
                    delta_ms: capital - sentence.end_ms,
                    moved: turn.sentences.len() - index,
                });
            }
        }
        if starts_new_sentence(&sentence.text) {
            capital_start = Some(sentence.start_ms);
        }
    }

    None
}

/// Scan a turn forward for the first clean sentence start.
///
/// Walks from the start tracking the most recently seen punctuation-ending
/// sentence; the first capital-starting sentence while one is tracked marks
/// the split. Everything before it would move back.
fn scan_front(turn: &Monologue) -> Option<SplitPoint> {
    let mut group_end: Option<i64> = None;

    for (i, sentence) in turn.sentences.iter().enumerate() {
        if let Some(end) = group_end {
            if starts_new_sentence(&sentence.text) {
                return Some(SplitPoint {
                    index: i,
                    delta_ms: sentence.start_ms - end,
                    moved: i,
                });
            }
        }
        if ends_sentence(&sentence.text) {
            group_end = Some(sentence.end_ms);
        }
    }

    None
}

/// Delta used in the front-vs-back comparison.
///
/// A split that moves exactly one sentence is demoted below every real
/// pause measurement and above "nothing found", so it is chosen only when
/// the other side has no split at all.
fn effective_delta(scan: Option<SplitPoint>) -> i64 {
    match scan {
        Some(split) if split.moved == 1 => i64::MIN + 1,
        Some(split) => split.delta_ms,
        None => i64::MIN,
    }
}
