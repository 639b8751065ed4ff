use thiserror::Error;

/// Errors surfaced by the core alignment pipeline.
///
/// Exhausted reference turns during speaker assignment and failed scans in
/// boundary repair are deliberately not errors; both degrade gracefully.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignError {
    /// The reference transcript had no usable turns where one was required.
    #[error("reference transcript contains no turns with sentences")]
    EmptyReference,

    /// The candidate transcript had no segments where at least one was required.
    #[error("candidate transcript contains no segments")]
    EmptyCandidate,

    /// A stage altered the concatenated sentence text it was given.
    ///
    /// Sentence text may only be regrouped across turns, never created,
    /// duplicated, or dropped. A mismatch is an internal defect.
    #[error("sentence text was altered during {stage}: {expected} bytes in, {actual} bytes out")]
    ContentMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },
}
