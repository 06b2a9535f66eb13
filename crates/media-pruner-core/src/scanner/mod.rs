pub mod walk;

pub use walk::{compile_patterns, discover_directories, list_media_files};
