use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::io::{AlignmentMetadata, HumanTranscript, MachineTranscript};
use crate::models::Monologue;

/// Configuration for Stage 4 rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Whether to generate machine-readable output
    pub generate_machine: bool,
    /// Whether to generate human-readable output
    pub generate_human: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            generate_machine: true,
            generate_human: true,
        }
    }
}

/// Result of Stage 4 rendering
#[derive(Debug)]
pub struct RenderResult {
    /// Path to machine transcript (if generated)
    pub machine_path: Option<std::path::PathBuf>,
    /// Path to human transcript (if generated)
    pub human_path: Option<std::path::PathBuf>,
}

/// Execute Stage 4: write the corrected transcript.
///
/// Produces two output views:
/// 1. Machine transcript: JSON with turns, sentence timestamps, and
///    alignment metadata
/// 2. Human transcript: formatted text with speaker labels and turns
pub fn render(
    turns: &[Monologue],
    metadata: AlignmentMetadata,
    machine_output: Option<&Path>,
    human_output: Option<&Path>,
    speaker_names: Option<&HashMap<String, String>>,
    config: &RenderConfig,
) -> Result<RenderResult> {
    let mut result = RenderResult {
        machine_path: None,
        human_path: None,
    };

    if config.generate_machine {
        if let Some(path) = machine_output {
            info!("Writing machine transcript to {:?}", path);
            let machine = MachineTranscript::from_monologues(turns, metadata, speaker_names);
            machine.write_json(path)?;
            result.machine_path = Some(path.to_path_buf());
        }
    }

    if config.generate_human {
        if let Some(path) = human_output {
            info!("Writing human transcript to {:?}", path);
            let human = match speaker_names {
                Some(names) => HumanTranscript::with_speaker_names(turns, names),
                None => HumanTranscript::new(turns),
            };
            human.write_file(path)?;
            result.human_path = Some(path.to_path_buf());
        }
    }

    Ok(result)
}
