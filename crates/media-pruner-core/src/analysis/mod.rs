pub mod deletion;
pub mod grouping;
pub mod retention_plan;

pub use deletion::{apply_plan, DeletionFailure, DeletionOutcome};
pub use grouping::{check_families, group, Grouping};
pub use retention_plan::plan;
