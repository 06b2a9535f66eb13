pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod naming;
pub mod progress;
pub mod scanner;

pub use config::AppConfig;
pub use engine::{apply_plan, compute_retention_plan, PlanSummary, PruneEngine};
pub use error::Error;
pub use model::{AssetGroup, FileEntry, ListingEntry, RetentionPlan, SkippedFile};
pub use naming::{VersionFamily, VersionToken};
pub use progress::{ProgressReporter, SilentReporter};
