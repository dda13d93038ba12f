//! Encode/decode commands - convert a single file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use dotdash_core::{Converter, Direction, DocumentFormat};

use super::{load_config, persist, PolicyArg};

/// Arguments for the encode and decode commands.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (.txt, .csv, .docx or .pdf)
    #[arg(required = true)]
    input: PathBuf,

    /// Output directory (default: from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the result instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Print the result and its metadata as JSON instead of writing a file
    #[arg(long, conflicts_with = "stdout")]
    json: bool,

    /// How to treat characters or symbols missing from the Morse table
    #[arg(short, long, value_enum)]
    policy: Option<PolicyArg>,
}

pub async fn run(
    args: ProcessArgs,
    direction: Direction,
    config_path: Option<&str>,
) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = load_config(config_path)?;

    // Reject unknown formats before touching the file contents
    let format = DocumentFormat::from_path(&args.input)?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Converting {} ({}, {})", args.input.display(), format, direction);

    let mut converter = Converter::from_config(&config);
    if let Some(policy) = args.policy {
        converter = converter.with_policy(policy.into());
    }

    let data = fs::read(&args.input)?;
    let result = converter.convert(&data, format, direction)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if args.stdout {
        println!("{}", result.text);
    } else {
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| config.output.directory.clone());
        let path = persist(&output_dir, &result.filename, &result)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            path.display()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
