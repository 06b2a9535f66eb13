use crate::model::RetentionPlan;
use crate::progress::ProgressReporter;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug)]
pub struct DeletionFailure {
    pub path: PathBuf,
    pub kind: io::ErrorKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct DeletionOutcome {
    pub deleted_count: usize,
    pub bytes_freed: u64,
    pub failures: Vec<DeletionFailure>,
}

/// Remove every file on the delete side of `plans`.
///
/// Each file is removed on its own. A failure is recorded and the batch
/// moves on; nothing already removed is restored. The caller is expected to
/// have obtained confirmation first.
pub fn apply_plan(
    plans: &BTreeMap<String, RetentionPlan>,
    reporter: &dyn ProgressReporter,
) -> DeletionOutcome {
    let total: usize = plans.values().map(|p| p.delete.len()).sum();
    reporter.on_delete_start(total);

    let mut outcome = DeletionOutcome::default();

    for plan in plans.values() {
        for file in &plan.delete {
            // Size is read right before removal; it may differ from what the plan reported.
            let result = file
                .size_bytes()
                .and_then(|size| fs::remove_file(&file.path).map(|_| size));

            match result {
                Ok(size) => {
                    debug!("Deleted: {} ({} bytes)", file.path.display(), size);
                    outcome.deleted_count += 1;
                    outcome.bytes_freed += size;
                    reporter.on_file_deleted(&file.path, size);
                }
                Err(err) => {
                    debug!("Failed to remove '{}': {}", file.path.display(), err);
                    reporter.on_delete_failed(&file.path, &err);
                    outcome.failures.push(DeletionFailure {
                        path: file.path.clone(),
                        kind: err.kind(),
                        message: err.to_string(),
                    });
                }
            }
        }
    }

    info!(
        "Deletion finished: {} succeeded, {} failed",
        outcome.deleted_count,
        outcome.failures.len()
    );
    reporter.on_delete_complete(outcome.deleted_count, outcome.bytes_freed);

    outcome
}
