pub mod error;
pub mod gong;
pub mod heuristics;
pub mod io;
pub mod models;
pub mod stages;

pub use error::AlignError;
pub use gong::{GongClient, GongConfig, SpeakerDirectory};
pub use heuristics::{ends_sentence, starts_new_sentence};
pub use io::{
    monologues_from_call, parse_candidate_file, parse_candidate_json, parse_reference_file,
    parse_reference_json, AlignmentMetadata, HumanTranscript, MachineTranscript,
};
pub use models::{concat_text, Monologue, Sentence, WhisperSegment, WhisperTranscript};
pub use stages::{
    assign_speakers, merge_turns, normalize, render, repair_boundaries, AssignResult, MergeConfig,
    MergeResult, NormalizeResult, RenderConfig, RenderResult, RepairResult,
};
