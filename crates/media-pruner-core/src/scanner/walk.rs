use crate::model::ListingEntry;
use glob::{MatchOptions, Pattern};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compile glob patterns, dropping (and logging) any that do not parse.
pub fn compile_patterns(globs: &[String]) -> Vec<Pattern> {
    globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect()
}

/// List regular files directly inside `dir` whose name matches any pattern,
/// sorted by file name. Symlinks and subdirectories are not followed.
pub fn list_media_files(dir: &Path, patterns: &[Pattern]) -> io::Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // The root itself failing is fatal, a single bad entry is not.
                if err.depth() == 0 {
                    return Err(err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("directory walk failed")));
                }
                warn!("Skipping unreadable entry in {}: {}", dir.display(), err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if patterns
            .iter()
            .any(|pattern| pattern.matches_with(&file_name, MATCH_OPTIONS))
        {
            entries.push(ListingEntry::new(entry.into_path(), file_name));
        }
    }

    debug!("{} media files in {}", entries.len(), dir.display());
    Ok(entries)
}

/// Directories to process under `root`: its immediate subdirectories, or
/// `root` itself when it has none.
pub fn discover_directories(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if err.depth() == 0 {
                    return Err(err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("directory walk failed")));
                }
                warn!("Skipping unreadable entry in {}: {}", root.display(), err);
                continue;
            }
        };
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    if dirs.is_empty() {
        dirs.push(root.to_path_buf());
    }
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_list_media_files_filters_and_sorts() {
        let tmp = tempdir().unwrap();
        for name in ["b_v2.mov", "a_v1.mov", "logo.png", "notes.txt", "shot.MOV"] {
            fs::write(tmp.path().join(name), "x").unwrap();
        }
        fs::create_dir(tmp.path().join("nested.mov")).unwrap();

        let patterns = compile_patterns(&["*.mov".to_string(), "*.png".to_string()]);
        let names: Vec<String> = list_media_files(tmp.path(), &patterns)
            .unwrap()
            .into_iter()
            .map(|e| e.file_name)
            .collect();

        assert_eq!(names, vec!["a_v1.mov", "b_v2.mov", "logo.png"]);
    }

    #[test]
    fn test_invalid_pattern_is_dropped() {
        let patterns = compile_patterns(&["[".to_string(), "*.mov".to_string()]);
        assert_eq!(patterns.len(), 1);
    }

    #[test]
    fn test_discover_directories() {
        let tmp = tempdir().unwrap();
        assert_eq!(
            discover_directories(tmp.path()).unwrap(),
            vec![tmp.path().to_path_buf()]
        );

        fs::create_dir(tmp.path().join("shots")).unwrap();
        fs::create_dir(tmp.path().join("renders")).unwrap();
        fs::write(tmp.path().join("loose.mov"), "x").unwrap();
        assert_eq!(
            discover_directories(tmp.path()).unwrap(),
            vec![tmp.path().join("renders"), tmp.path().join("shots")]
        );
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let tmp = tempdir().unwrap();
        assert!(list_media_files(&tmp.path().join("gone"), &[]).is_err());
    }
}
