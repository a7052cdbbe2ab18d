use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use qasrl_frames::{check_records, collect_frames};
use qasrl_protocol::{QuestionAnswer, RecordArchive};
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(author, version, about = "Validates QA-SRL records and compiles them to an rkyv archive")]
struct Cli {
    /// JSON array of question-answer records
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Report producer inconsistencies (never fatal)
    #[arg(long)]
    check: bool,

    /// Group records into verb frames and log a summary; records lacking
    /// question slots are skipped
    #[arg(long)]
    frames: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("qasrl_compiler=info".parse()?),
        )
        .init();

    run(&Cli::parse())
}

fn run(cli: &Cli) -> Result<()> {
    info!("Reading records from {:?}", cli.input);
    let input_data = fs::read_to_string(&cli.input)
        .with_context(|| format!("Cannot read {:?}", cli.input))?;

    let records = load_records(&input_data)?;
    info!("Loaded {} records", records.len());

    if cli.check {
        let findings = check_records(&records);
        if findings.is_empty() {
            info!("No consistency issues found");
        } else {
            warn!("{} consistency issues found", findings.len());
        }
    }

    if cli.frames {
        // Records without a full slot decomposition are valid but cannot form roles
        let (slotted, skipped): (Vec<&QuestionAnswer>, Vec<&QuestionAnswer>) =
            records.iter().partition(|r| r.to_question().is_ok());
        if !skipped.is_empty() {
            warn!(
                "Skipping {} records without complete question slots",
                skipped.len()
            );
        }

        let frames = collect_frames(slotted)?;
        for frame in &frames {
            for role in &frame.roles {
                debug!("{}:{} {}", frame.qasrl_id, frame.verb_idx, role);
            }
        }
        let roles: usize = frames.iter().map(|f| f.roles.len()).sum();
        info!("Grouped into {} verb frames with {} roles", frames.len(), roles);
    }

    let archive = RecordArchive::new(records);
    let bytes = rkyv::to_bytes::<_, 1024>(&archive)
        .map_err(|e| anyhow!("rkyv serialization failed: {:?}", e))?;

    fs::write(&cli.output, &bytes)
        .with_context(|| format!("Cannot write {:?}", cli.output))?;

    info!("Archive of {} bytes written to {:?}", bytes.len(), cli.output);
    Ok(())
}

/// Parses the JSON input and checks every record's `answer_range`.
fn load_records(json: &str) -> Result<Vec<QuestionAnswer>> {
    let records: Vec<QuestionAnswer> =
        serde_json::from_str(json).context("Input is not a JSON array of QA-SRL records")?;

    for (idx, record) in records.iter().enumerate() {
        record.arguments().with_context(|| {
            format!(
                "record {} ({} / '{}') has an invalid answer_range",
                idx, record.qasrl_id, record.question
            )
        })?;
    }

    Ok(records)
}
