use crate::error::Error;
use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Versions of each asset to keep. When unset the CLI asks.
    pub versions_to_keep: Option<usize>,
    /// Glob patterns (file names only) of the media files to consider.
    pub file_patterns: Vec<String>,
    /// Treat each immediate subdirectory of a root as its own unit of work.
    pub process_subdirectories: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            versions_to_keep: None,
            file_patterns: vec!["*.mov".to_string(), "*.png".to_string()],
            process_subdirectories: true,
        }
    }
}

/// Defaults, then an optional `Config.*` file, then `MEDIA_PRUNER_*` env vars.
pub fn load_configuration() -> Result<AppConfig, Error> {
    let defaults = AppConfig::default();
    let builder = Config::builder()
        .set_default("file_patterns", defaults.file_patterns)?
        .set_default("process_subdirectories", defaults.process_subdirectories)?
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(
            Environment::with_prefix("MEDIA_PRUNER")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("file_patterns"),
        )
        .build()?;
    Ok(builder.try_deserialize::<AppConfig>()?)
}

/// Remove directories that are subdirectories of other directories in the list.
pub fn non_overlapping_directories(dirs: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();

    for dir in dirs {
        let dir_path = Path::new(&dir);
        if result.iter().any(|kept| dir_path.starts_with(Path::new(kept))) {
            continue;
        }
        result.retain(|kept| !Path::new(kept).starts_with(dir_path));
        result.push(dir);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.versions_to_keep, None);
        assert_eq!(config.file_patterns, vec!["*.mov", "*.png"]);
        assert!(config.process_subdirectories);
    }

    #[test]
    fn test_bad_env_value_is_a_config_error() {
        env::set_var("MEDIA_PRUNER_VERSIONS_TO_KEEP", "lots");
        let result = load_configuration();
        env::remove_var("MEDIA_PRUNER_VERSIONS_TO_KEEP");

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_non_overlapping_no_overlap() {
        let dirs = vec![
            "/projects/show_a".to_string(),
            "/projects/show_b".to_string(),
            "/archive".to_string(),
        ];
        let result = non_overlapping_directories(dirs);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_non_overlapping_with_subdirectory() {
        let dirs = vec![
            "/projects/show_a/renders".to_string(),
            "/projects/show_a".to_string(),
            "/projects/show_a/plates".to_string(),
            "/archive".to_string(),
        ];
        let result = non_overlapping_directories(dirs);
        assert_eq!(
            result,
            vec!["/projects/show_a".to_string(), "/archive".to_string()]
        );
    }
}
