use crate::error::Error;
use crate::model::RetentionPlan;
use std::io;
use std::path::Path;

/// Trait for reporting planning and deletion progress.
///
/// The CLI implements it with colored output and indicatif bars.
/// All methods have default no-op implementations.
pub trait ProgressReporter {
    fn on_file_skipped(&self, _path: &Path, _reason: &Error) {}
    fn on_plan_ready(&self, _plan: &RetentionPlan) {}
    fn on_delete_start(&self, _total_files: usize) {}
    fn on_file_deleted(&self, _path: &Path, _bytes: u64) {}
    fn on_delete_failed(&self, _path: &Path, _err: &io::Error) {}
    fn on_delete_complete(&self, _deleted: usize, _bytes_freed: u64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
