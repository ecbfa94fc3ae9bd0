//! Rename command - derive new file names for multiple documents.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use denpyo_core::models::config::DenpyoConfig;
use denpyo_core::models::session::DocumentSession;
use denpyo_core::ExtractionEngine;

use super::extract::{format_csv, ExtractOutput};
use super::{build_engine, is_supported, load_config, read_document_text};

/// Arguments for the rename command.
#[derive(Args)]
pub struct RenameArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Copy each document into this directory under its new name.
    /// Without it nothing is written.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Own company name, never reported as the counterparty
    #[arg(long, env = "MY_COMPANY_NAME")]
    self_company: Option<String>,

    /// Overwrite existing files in the output directory
    #[arg(long)]
    force: bool,

    /// Print the result table as CSV
    #[arg(long)]
    csv: bool,

    /// Keep going when a file fails to extract or copy
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct RenameResult {
    path: PathBuf,
    output: Option<ExtractOutput>,
    error: Option<String>,
}

pub async fn run(args: RenameArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let engine = build_engine(&config, args.self_company.as_deref());
    let mut results = Vec::with_capacity(files.len());
    let mut written = HashSet::new();

    for path in files {
        let outcome = process_single_file(&path, &engine, &config).and_then(|output| {
            if let Some(ref output_dir) = args.output_dir {
                copy_to_output(&path, &output_dir.join(&output.file_name), args.force, &mut written)?;
            }
            Ok(output)
        });

        match outcome {
            Ok(output) => {
                results.push(RenameResult {
                    path: path.clone(),
                    output: Some(output),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = format!("{:#}", e);
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(RenameResult {
                        path: path.clone(),
                        output: None,
                        error: Some(error_msg),
                    });
                } else {
                    pb.finish_and_clear();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let successful: Vec<&ExtractOutput> = results.iter().filter_map(|r| r.output.as_ref()).collect();
    let failed: Vec<&RenameResult> = results.iter().filter(|r| r.error.is_some()).collect();

    if args.csv {
        print!("{}", format_csv(successful.iter().copied())?);
    } else {
        for output in &successful {
            println!("{} -> {}", output.source, output.file_name);
        }
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );
    if args.output_dir.is_none() {
        eprintln!("   dry run, pass --output-dir to copy the files");
    }

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Copy `source` to `target`.
///
/// An existing target is kept unless `force` is set, and a target written
/// earlier in the same run is never overwritten.
fn copy_to_output(
    source: &Path,
    target: &Path,
    force: bool,
    written: &mut HashSet<PathBuf>,
) -> anyhow::Result<()> {
    if written.contains(target) {
        anyhow::bail!("{} was already written by another document", target.display());
    }
    if target.exists() && !force {
        anyhow::bail!("{} already exists, use --force to overwrite", target.display());
    }

    fs::copy(source, target)
        .with_context(|| format!("failed to copy to {}", target.display()))?;
    debug!("Copied {} to {}", source.display(), target.display());

    written.insert(target.to_path_buf());
    Ok(())
}

fn process_single_file(
    path: &Path,
    engine: &ExtractionEngine,
    config: &DenpyoConfig,
) -> anyhow::Result<ExtractOutput> {
    let text = read_document_text(path, &config.pdf)?;
    let result = engine.parse(&text);

    let source = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    let session = DocumentSession::new(source.clone(), result.record);
    Ok(ExtractOutput {
        file_name: session.file_name(&config.output.default_extension),
        record: session.effective(),
        source,
    })
}
