use std::mem;

use tracing::debug;

use crate::error::AlignError;
use crate::heuristics::{ends_sentence, starts_new_sentence};
use crate::models::{concat_text, Monologue};

/// Configuration for Stage 1 turn merging
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Upper bound on merge passes; a pass that changes nothing stops early
    pub max_passes: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self { max_passes: 3 }
    }
}

/// Result of Stage 1 turn merging
#[derive(Debug)]
pub struct MergeResult {
    /// Merged turns, none of them empty
    pub turns: Vec<Monologue>,
    /// Number of passes actually run
    pub passes_run: usize,
    /// How many input turns were folded into a neighbor
    pub turns_merged: usize,
}

/// Execute Stage 1: collapse spurious speaker-turn fragmentation.
///
/// Two rules are applied in a single left-to-right pass over the turns:
///
/// 1. **Sandwich rule**: for consecutive turns A, B, C where A and C share
///    a speaker, B's speaker differs, and B reads as a mid-sentence
///    fragment (no leading capital, no terminal punctuation), B is a
///    misattributed interjection - A, B, and C fold into one turn under
///    A's speaker.
/// 2. **Same-speaker rule**: consecutive turns with the same speaker fold
///    into one.
///
/// Passes repeat until stable so chains such as A,B,A,B,A converge, bounded
/// by `max_passes`. The concatenated sentence text of the output must equal
/// that of the input; a mismatch aborts with `ContentMismatch`.
pub fn merge_turns(
    turns: &[Monologue],
    config: &MergeConfig,
) -> Result<MergeResult, AlignError> {
    if turns.len() < 2 {
        return Ok(MergeResult {
            turns: turns.to_vec(),
            passes_run: 0,
            turns_merged: 0,
        });
    }

    let original_text = concat_text(turns);
    let mut current = turns.to_vec();
    let mut passes_run = 0;

    for pass in 0..config.max_passes {
        let before = current.len();
        current = merge_pass(current);
        passes_run += 1;
        debug!(
            "Merge pass {}: {} turns -> {} turns",
            pass + 1,
            before,
            current.len()
        );
        if current.len() == before {
            break;
        }
    }

    let merged_text = concat_text(&current);
    if merged_text != original_text {
        return Err(AlignError::ContentMismatch {
            stage: "merge",
            expected: original_text.len(),
            actual: merged_text.len(),
        });
    }

    Ok(MergeResult {
        turns_merged: turns.len() - current.len(),
        turns: current,
        passes_run,
    })
}

/// One left-to-right pass; empties absorbed turns, then drops them.
fn merge_pass(mut turns: Vec<Monologue>) -> Vec<Monologue> {
    if turns.len() < 2 {
        return turns;
    }

    for i in 0..turns.len() - 1 {
        if i > 0 && is_sandwiched_fragment(&turns, i) {
            // Fold A and C into B's slot, attributed to the surrounding speaker
            let speaker_id = turns[i - 1].speaker_id.clone();
            let topic = turns[i - 1].topic.clone();
            let before = mem::take(&mut turns[i - 1].sentences);
            let middle = mem::take(&mut turns[i].sentences);
            let after = mem::take(&mut turns[i + 1].sentences);

            let mut sentences = before;
            sentences.extend(middle);
            sentences.extend(after);
            turns[i].sentences = sentences;
            turns[i].speaker_id = speaker_id;
            turns[i].topic = topic;
        }

        if turns[i].speaker_id == turns[i + 1].speaker_id {
            let trailing = mem::take(&mut turns[i + 1].sentences);
            turns[i].sentences.extend(trailing);
        }
    }

    turns.retain(|turn| !turn.is_empty());
    turns
}

/// Does turn `i` look like a short interjection wrongly split out of the
/// surrounding speaker's turn?
fn is_sandwiched_fragment(turns: &[Monologue], i: usize) -> bool {
    let (prev, mid, next) = (&turns[i - 1], &turns[i], &turns[i + 1]);

    if prev.is_empty() || mid.is_empty() {
        return false;
    }
    if prev.speaker_id != next.speaker_id || prev.speaker_id == mid.speaker_id {
        return false;
    }

    let first = &mid.sentences[0];
    let last = &mid.sentences[mid.sentences.len() - 1];
    !starts_new_sentence(&first.text) && !ends_sentence(&last.text)
}
