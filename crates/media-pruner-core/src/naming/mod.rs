pub mod filename;
pub mod version;

pub use filename::{parse, ParsedFilename, RawVersion};
pub use version::{VersionFamily, VersionToken};
