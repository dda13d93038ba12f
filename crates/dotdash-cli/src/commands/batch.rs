//! Batch conversion command for multiple files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use dotdash_core::{ConversionResult, Converter, Direction, DocumentFormat};

use super::{load_config, persist, PolicyArg};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Conversion direction
    #[arg(short, long, value_enum, default_value = "encode")]
    direction: DirectionArg,

    /// Output directory (default: from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Name outputs after their inputs instead of the conversion time
    #[arg(long)]
    keep_names: bool,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// How to treat characters or symbols missing from the Morse table
    #[arg(short, long, value_enum)]
    policy: Option<PolicyArg>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum DirectionArg {
    /// Text to Morse
    Encode,
    /// Morse to text
    Decode,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Encode => Direction::Encode,
            DirectionArg::Decode => Direction::Decode,
        }
    }
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    output: Option<PathBuf>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = load_config(config_path)?;
    let direction: Direction = args.direction.into();

    // Expand glob pattern, keeping only supported formats
    let files: Vec<(PathBuf, DocumentFormat)> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter_map(|p| match DocumentFormat::from_path(&p) {
            Ok(format) => Some((p, format)),
            Err(_) => {
                debug!("Skipping unsupported file {}", p.display());
                None
            }
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());

    let mut converter = Converter::from_config(&config);
    if let Some(policy) = args.policy {
        converter = converter.with_policy(policy.into());
    }
    let converter = Arc::new(converter);

    // Set up progress bar
    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Conversions run on the blocking pool, at most `jobs` at a time
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut handles = Vec::with_capacity(files.len());
    for (path, format) in files {
        let permit = semaphore.clone().acquire_owned().await?;
        let converter = Arc::clone(&converter);
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let result = convert_single_file(&path, format, direction, &converter);
            (path, result, file_start.elapsed().as_millis() as u64)
        }));
    }

    // Write outputs in input order
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let (path, result, processing_time_ms) = handle.await?;

        let written = result.and_then(|conversion| {
            let filename = if args.keep_names {
                output_name(&path, direction)
            } else {
                conversion.filename.clone()
            };
            persist(&output_dir, &filename, &conversion)
        });

        match written {
            Ok(output) => {
                debug!("Wrote output to {}", output.display());
                results.push(ProcessResult {
                    path,
                    output: Some(output),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        output: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.output.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    // Generate summary if requested
    if args.summary {
        fs::create_dir_all(&output_dir)?;
        let summary_path = output_dir.join("summary.csv");
        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn convert_single_file(
    path: &Path,
    format: DocumentFormat,
    direction: Direction,
    converter: &Converter,
) -> anyhow::Result<ConversionResult> {
    let data = fs::read(path)?;
    Ok(converter.convert(&data, format, direction)?)
}

/// `<input stem><direction suffix>`, e.g. `report_morse.txt`.
fn output_name(path: &Path, direction: Direction) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    format!("{}{}", stem, direction.suffix())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["file", "status", "output", "error", "processing_time_ms"])?;

    for result in results {
        let status = if result.error.is_some() { "error" } else { "ok" };
        let output = result
            .output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        wtr.write_record([
            result.path.display().to_string(),
            status.to_string(),
            output,
            result.error.clone().unwrap_or_default(),
            result.processing_time_ms.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_name() {
        assert_eq!(
            output_name(Path::new("in/report.pdf"), Direction::Encode),
            "report_morse.txt"
        );
        assert_eq!(
            output_name(Path::new("notes.txt"), Direction::Decode),
            "notes_decoded.txt"
        );
    }

    #[test]
    fn test_write_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let results = vec![
            ProcessResult {
                path: PathBuf::from("a.txt"),
                output: Some(PathBuf::from("out/a_morse.txt")),
                error: None,
                processing_time_ms: 3,
            },
            ProcessResult {
                path: PathBuf::from("b.pdf"),
                output: None,
                error: Some("no text, only images".to_string()),
                processing_time_ms: 7,
            },
        ];

        write_summary(&path, &results).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "file,status,output,error,processing_time_ms");
        assert_eq!(lines[1], "a.txt,ok,out/a_morse.txt,,3");
        assert_eq!(lines[2], "b.pdf,error,,\"no text, only images\",7");
    }
}
