mod commands;
mod logging;
mod progress;
mod prompt;
mod report;

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands, TargetArgs};
use dotenv::dotenv;
use media_pruner_core::config::non_overlapping_directories;
use media_pruner_core::scanner::discover_directories;
use media_pruner_core::{apply_plan, AppConfig, Error, PruneEngine};
use progress::CliReporter;
use report::RunTotals;
use tracing::{error, info, warn};

fn main() -> Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match media_pruner_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Clean(target)) => {
            if let Err(err) = run(&config, &target, false) {
                error!("Error: {:#}", err);
                process::exit(1);
            }
        }
        Some(Commands::Plan(target)) => {
            if let Err(err) = run(&config, &target, true) {
                error!("Error: {:#}", err);
                process::exit(1);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

/// Flag, then config, then ask.
fn resolve_keep_count(flag: Option<usize>, config: &AppConfig) -> Result<usize> {
    let keep = match flag.or(config.versions_to_keep) {
        Some(n) => n,
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            prompt::prompt_versions_to_keep(&mut stdin.lock(), &mut stdout.lock())
                .context("reading number of versions to keep")?
        }
    };
    if keep == 0 {
        bail!(Error::InvalidKeepCount(keep));
    }
    Ok(keep)
}

/// Drop nested roots and check that each one is a directory.
fn resolve_roots(directories: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let as_strings = directories
        .iter()
        .map(|d| d.to_string_lossy().into_owned())
        .collect();

    let mut roots = Vec::new();
    for dir in non_overlapping_directories(as_strings) {
        let path = PathBuf::from(dir);
        if !path.is_dir() {
            bail!("Directory not found: {}", path.display());
        }
        roots.push(path);
    }
    Ok(roots)
}

/// Directories to process under each root. A root that cannot be listed is
/// reported and left out.
fn units_of_work(roots: &[PathBuf], config: &AppConfig) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    for root in roots {
        if !config.process_subdirectories {
            dirs.push(root.clone());
            continue;
        }
        match discover_directories(root) {
            Ok(found) => dirs.extend(found),
            Err(err) => {
                warn!("Skipping {}: {}", root.display(), err);
                report::print_unreadable_directory(root, &err);
            }
        }
    }
    dirs
}

fn run(config: &AppConfig, target: &TargetArgs, preview: bool) -> Result<()> {
    let roots = resolve_roots(&target.directories)?;
    let keep_count = resolve_keep_count(target.versions, config)?;
    let dirs = units_of_work(&roots, config);

    let engine = PruneEngine::new(config);
    let reporter = CliReporter::new();
    let mut totals = RunTotals::default();

    report::print_found_directories(dirs.len());

    for (i, dir) in dirs.iter().enumerate() {
        report::print_directory_header(i + 1, dirs.len(), dir);

        match process_directory(&engine, &reporter, dir, keep_count, preview)? {
            DirectoryResult::Stop => break,
            DirectoryResult::Deleted { files, bytes } => totals.add(files, bytes),
            DirectoryResult::Nothing => continue,
        }

        if i + 1 < dirs.len() && !preview {
            let stdin = io::stdin();
            let stdout = io::stdout();
            if !prompt::prompt_continue(&mut stdin.lock(), &mut stdout.lock())? {
                println!("\n{}", "Operation stopped by user".yellow());
                break;
            }
        }
    }

    if !preview {
        report::print_final_summary(&totals);
    }
    info!(
        "Run finished: {} files deleted, {} bytes freed",
        totals.files_deleted, totals.bytes_freed
    );
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum DirectoryResult {
    /// No deletions happened here; move on without asking.
    Nothing,
    Deleted { files: usize, bytes: u64 },
    Stop,
}

fn process_directory(
    engine: &PruneEngine,
    reporter: &CliReporter,
    dir: &Path,
    keep_count: usize,
    preview: bool,
) -> Result<DirectoryResult> {
    let summary = match engine.scan_directory(dir, keep_count, reporter) {
        Ok(summary) => summary,
        Err(Error::MixedVersionFamilies { base_name, files }) => {
            report::print_mixed_families(&base_name, &files);
            warn!("Skipping {}: mixed version types", dir.display());
            return Ok(DirectoryResult::Nothing);
        }
        Err(Error::Io(err)) => {
            warn!("Skipping {}: {}", dir.display(), err);
            report::print_unreadable_directory(dir, &err);
            return Ok(DirectoryResult::Nothing);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("scanning {}", dir.display()));
        }
    };

    report::print_plan(&summary, keep_count);

    if !summary.has_deletions() {
        println!("\n{}", "No files to delete in this directory".yellow());
        return Ok(DirectoryResult::Nothing);
    }
    if preview {
        return Ok(DirectoryResult::Nothing);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let confirmed = prompt::confirm_deletion(
        &mut stdin.lock(),
        &mut stdout.lock(),
        summary.total_files_to_delete,
    )?;
    if !confirmed {
        println!("\n{}", "Operation cancelled".yellow());
        return Ok(DirectoryResult::Stop);
    }

    let outcome = apply_plan(&summary.plans, reporter);
    report::print_deletion_result(
        outcome.deleted_count,
        outcome.bytes_freed,
        outcome.failures.len(),
        keep_count,
    );

    Ok(DirectoryResult::Deleted {
        files: outcome.deleted_count,
        bytes: outcome.bytes_freed,
    })
}
