use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use antiphon::{
    assign_speakers, ends_sentence, merge_turns, monologues_from_call, normalize,
    parse_candidate_file, parse_reference_file, render, repair_boundaries, starts_new_sentence,
    AlignmentMetadata, GongClient, GongConfig, MergeConfig, Monologue, RenderConfig,
    SpeakerDirectory, WhisperSegment,
};

#[derive(Parser)]
#[command(name = "antiphon")]
#[command(author, version, about = "Call transcript alignment and speaker attribution pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Align a candidate transcript onto a reference transcript from local files
    Align {
        /// Reference transcript file (Gong transcript JSON)
        #[arg(short, long)]
        reference: PathBuf,

        /// Candidate transcript file (Whisper JSON with segments)
        #[arg(short, long)]
        candidate: PathBuf,

        /// Output file for the machine-readable transcript (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for the human-readable transcript (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Maximum merge passes over the reference turns
        #[arg(long, default_value = "3")]
        merge_passes: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Fetch the reference transcript from the Gong API, then align
    Fetch {
        /// Gong call id
        #[arg(long)]
        call_id: u64,

        /// Candidate transcript file (Whisper JSON with segments)
        #[arg(short, long)]
        candidate: PathBuf,

        /// Output file for the machine-readable transcript (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for the human-readable transcript (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Maximum merge passes over the reference turns
        #[arg(long, default_value = "3")]
        merge_passes: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze a reference transcript's fragmentation without making changes
    Analyze {
        /// Reference transcript file (Gong transcript JSON)
        #[arg(short, long)]
        reference: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Align {
            reference,
            candidate,
            output,
            human_readable,
            merge_passes,
            verbose,
        } => {
            setup_logging(verbose);
            let reference_turns =
                parse_reference_file(&reference).context("Failed to parse reference transcript")?;
            let segments =
                parse_candidate_file(&candidate).context("Failed to parse candidate transcript")?;
            align_transcripts(
                reference_turns,
                segments,
                merge_passes,
                &output,
                human_readable.as_deref(),
                None,
            )
        }
        Commands::Fetch {
            call_id,
            candidate,
            output,
            human_readable,
            merge_passes,
            verbose,
        } => {
            setup_logging(verbose);
            fetch_and_align(
                call_id,
                candidate,
                output,
                human_readable,
                merge_passes,
            )
            .await
        }
        Commands::Analyze { reference, verbose } => {
            setup_logging(verbose);
            analyze_transcript(reference)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// Run the full pipeline over already-parsed inputs and write the outputs
fn align_transcripts(
    reference: Vec<Monologue>,
    segments: Vec<WhisperSegment>,
    merge_passes: usize,
    output: &std::path::Path,
    human_readable: Option<&std::path::Path>,
    speaker_names: Option<HashMap<String, String>>,
) -> Result<()> {
    info!(
        "Loaded {} reference turns, {} candidate segments",
        reference.len(),
        segments.len()
    );

    let merge_config = MergeConfig {
        max_passes: merge_passes,
    };
    let merged = merge_turns(&reference, &merge_config)?;
    info!(
        "Merge: {} turns -> {} turns in {} passes",
        reference.len(),
        merged.turns.len(),
        merged.passes_run
    );

    let normalized = normalize(&segments, &merged.turns)?;
    info!(
        "Normalize: offset of {}ms removed from {} segments",
        normalized.delta_ms,
        normalized.sentences.len()
    );

    let assigned = assign_speakers(&normalized.sentences, &merged.turns)?;
    if assigned.reference_exhausted {
        warn!("Candidate ran past the last reference turn; trailing sentences use the final speaker");
    }
    info!("Assign: {} speaker-labeled turns", assigned.turns.len());

    let repaired = repair_boundaries(&assigned.turns)?;
    info!("Repair: {} boundary repairs applied", repaired.repairs_applied);

    let duration_ms = match (
        repaired.turns.first().and_then(|t| t.start_ms()),
        repaired.turns.last().and_then(|t| t.end_ms()),
    ) {
        (Some(start), Some(end)) => end - start,
        _ => 0,
    };

    let metadata = AlignmentMetadata {
        reference_turns: reference.len(),
        merged_turns: merged.turns.len(),
        candidate_segments: segments.len(),
        output_turns: repaired.turns.len(),
        merge_passes: merged.passes_run,
        repairs_applied: repaired.repairs_applied,
        duration_ms,
    };

    let result = render(
        &repaired.turns,
        metadata,
        Some(output),
        human_readable,
        speaker_names.as_ref(),
        &RenderConfig::default(),
    )?;

    if let Some(machine_path) = result.machine_path {
        info!("Output written to {:?}", machine_path);
    }
    if let Some(human_path) = result.human_path {
        info!("Human-readable output written to {:?}", human_path);
    }

    Ok(())
}

async fn fetch_and_align(
    call_id: u64,
    candidate: PathBuf,
    output: PathBuf,
    human_readable: Option<PathBuf>,
    merge_passes: usize,
) -> Result<()> {
    let api_config = GongConfig::from_env()?;
    let client = GongClient::new(api_config);

    info!("Fetching call {} from Gong", call_id);
    let calls = client.fetch_calls(&[call_id]).await?;
    if let Some(call) = calls.calls.first() {
        let title = call.meta_data.title.as_deref().unwrap_or("(untitled)");
        match &call.meta_data.started {
            Some(started) => info!(
                "Call: {} (started {})",
                title,
                started.format("%Y-%m-%d %H:%M UTC")
            ),
            None => info!("Call: {}", title),
        }
    }

    let directory = SpeakerDirectory::from_calls(&calls);
    info!("Resolved {} speaker names", directory.len());

    let transcripts = client.fetch_transcripts(&[call_id]).await?;
    let call = transcripts
        .call_transcripts
        .first()
        .context("Gong returned no transcript for this call")?;
    let reference = monologues_from_call(call)?;

    let segments =
        parse_candidate_file(&candidate).context("Failed to parse candidate transcript")?;

    let speaker_names = directory.for_call(call_id);
    let speaker_names = (!speaker_names.is_empty()).then_some(speaker_names);

    align_transcripts(
        reference,
        segments,
        merge_passes,
        &output,
        human_readable.as_deref(),
        speaker_names,
    )
}

fn analyze_transcript(reference: PathBuf) -> Result<()> {
    let turns =
        parse_reference_file(&reference).context("Failed to parse reference transcript")?;

    let sentence_count: usize = turns.iter().map(|t| t.sentence_count()).sum();
    let mut speakers: Vec<&str> = turns.iter().map(|t| t.speaker_id.as_str()).collect();
    speakers.sort();
    speakers.dedup();

    let duration_ms = match (
        turns.first().and_then(|t| t.start_ms()),
        turns.last().and_then(|t| t.end_ms()),
    ) {
        (Some(start), Some(end)) => end - start,
        _ => 0,
    };

    println!("Transcript Analysis");
    println!("==================");
    println!("Total turns: {}", turns.len());
    println!("Total sentences: {}", sentence_count);
    println!("Speakers: {}", speakers.len());
    println!("Duration: {:.1}s", duration_ms as f64 / 1000.0);
    println!();

    // Fragmentation indicators: what the merge stage would act on
    let same_speaker_pairs = turns
        .windows(2)
        .filter(|pair| pair[0].speaker_id == pair[1].speaker_id)
        .count();

    let sandwich_candidates = turns
        .windows(3)
        .filter(|triple| {
            let (a, b, c) = (&triple[0], &triple[1], &triple[2]);
            !b.is_empty()
                && a.speaker_id == c.speaker_id
                && a.speaker_id != b.speaker_id
                && !starts_new_sentence(&b.sentences[0].text)
                && !ends_sentence(&b.sentences[b.sentences.len() - 1].text)
        })
        .count();

    println!("Fragmentation");
    println!("-------------");
    println!("Adjacent same-speaker pairs: {}", same_speaker_pairs);
    println!("Sandwiched fragments: {}", sandwich_candidates);

    let merged = merge_turns(&turns, &MergeConfig::default())?;
    println!(
        "After merging: {} turns ({} folded, {} passes)",
        merged.turns.len(),
        merged.turns_merged,
        merged.passes_run
    );
    println!();

    println!("Speaker Statistics");
    println!("------------------");
    for speaker in &speakers {
        let speaker_turns: Vec<&Monologue> = turns
            .iter()
            .filter(|t| t.speaker_id == *speaker)
            .collect();
        let sentences: usize = speaker_turns.iter().map(|t| t.sentence_count()).sum();
        let speech_ms: i64 = speaker_turns.iter().map(|t| t.duration_ms()).sum();

        println!(
            "Speaker {}: {} turns, {} sentences, {:.1}s of speech",
            speaker,
            speaker_turns.len(),
            sentences,
            speech_ms as f64 / 1000.0
        );
    }

    Ok(())
}
