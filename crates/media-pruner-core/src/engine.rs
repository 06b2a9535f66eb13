use crate::analysis::{self, DeletionOutcome};
use crate::config::AppConfig;
use crate::error::Error;
use crate::model::{FileEntry, ListingEntry, RetentionPlan, SkippedFile};
use crate::progress::ProgressReporter;
use crate::scanner;
use glob::Pattern;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct PruneEngine {
    patterns: Vec<Pattern>,
}

/// Everything a driver needs to show and confirm a directory's plan.
#[derive(Debug, Default)]
pub struct PlanSummary {
    pub plans: BTreeMap<String, RetentionPlan>,
    pub unversioned: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
    pub total_files_to_delete: usize,
    pub total_bytes_to_delete: u64,
}

impl PlanSummary {
    pub fn has_deletions(&self) -> bool {
        self.total_files_to_delete > 0
    }
}

impl PruneEngine {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            patterns: scanner::compile_patterns(&config.file_patterns),
        }
    }

    /// List `dir` and plan it.
    pub fn scan_directory(
        &self,
        dir: &Path,
        keep_count: usize,
        reporter: &dyn ProgressReporter,
    ) -> Result<PlanSummary, Error> {
        info!("Scanning directory: {}", dir.display());
        let listing = scanner::list_media_files(dir, &self.patterns)?;
        compute_retention_plan(&listing, keep_count, reporter)
    }
}

/// Group a listing, plan every group, and total up what would be deleted.
/// Reads file sizes but changes nothing on disk.
pub fn compute_retention_plan(
    listing: &[ListingEntry],
    keep_count: usize,
    reporter: &dyn ProgressReporter,
) -> Result<PlanSummary, Error> {
    compute_retention_plan_with(listing, keep_count, reporter, |entry| entry.size_bytes())
}

/// [`compute_retention_plan`] with a caller-supplied size lookup.
pub fn compute_retention_plan_with<F>(
    listing: &[ListingEntry],
    keep_count: usize,
    reporter: &dyn ProgressReporter,
    size_of: F,
) -> Result<PlanSummary, Error>
where
    F: Fn(&FileEntry) -> io::Result<u64>,
{
    if keep_count == 0 {
        return Err(Error::InvalidKeepCount(keep_count));
    }

    let grouping = analysis::group(listing)?;
    for skipped in &grouping.skipped {
        reporter.on_file_skipped(&skipped.path, &skipped.reason);
    }

    let mut summary = PlanSummary {
        unversioned: grouping.unversioned,
        skipped: grouping.skipped,
        ..PlanSummary::default()
    };

    for (key, group) in &grouping.groups {
        let plan = analysis::plan(group, keep_count)?;

        for file in &plan.delete {
            let size = size_of(file).unwrap_or_else(|err| {
                warn!("Could not read size of {}: {}", file.path.display(), err);
                0
            });
            summary.total_bytes_to_delete += size;
            summary.total_files_to_delete += 1;
        }

        reporter.on_plan_ready(&plan);
        summary.plans.insert(key.clone(), plan);
    }

    info!(
        "{} asset groups, {} files to delete, {} bytes reclaimable",
        summary.plans.len(),
        summary.total_files_to_delete,
        summary.total_bytes_to_delete
    );

    Ok(summary)
}

/// Delete everything on the delete side of `plans`.
pub fn apply_plan(
    plans: &BTreeMap<String, RetentionPlan>,
    reporter: &dyn ProgressReporter,
) -> DeletionOutcome {
    analysis::apply_plan(plans, reporter)
}
