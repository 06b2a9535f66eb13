use crate::error::Error;
use crate::naming::{VersionFamily, VersionToken};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One row of a directory listing: where the file lives and the name to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub path: PathBuf,
    pub file_name: String,
}

impl ListingEntry {
    pub fn new(path: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file_name: file_name.into(),
        }
    }

    /// Build an entry from a path, taking the file name from its last component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = file_name_lossy(&path);
        Self { path, file_name }
    }
}

/// A versioned file. Unversioned files never become entries; they are
/// carried around as bare paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub base_name: String,
    pub extension: String,
    pub version: VersionToken,
}

impl FileEntry {
    pub fn file_name(&self) -> String {
        file_name_lossy(&self.path)
    }

    /// Current size on disk. Not cached: every call hits the filesystem.
    pub fn size_bytes(&self) -> io::Result<u64> {
        fs::symlink_metadata(&self.path).map(|m| m.len())
    }
}

/// All versions of one logical asset, keyed by base name.
#[derive(Debug, Clone)]
pub struct AssetGroup {
    base_name: String,
    family: VersionFamily,
    members: Vec<FileEntry>,
}

impl AssetGroup {
    /// The first member fixes the group's family.
    pub fn new(base_name: impl Into<String>, first: FileEntry) -> Self {
        Self {
            base_name: base_name.into(),
            family: first.version.family(),
            members: vec![first],
        }
    }

    pub fn push(&mut self, entry: FileEntry) {
        self.members.push(entry);
    }

    /// Every member must share the family of the first one.
    pub fn check_single_family(&self) -> Result<(), Error> {
        if self.is_mixed() {
            return Err(Error::MixedVersionFamilies {
                base_name: self.base_name.clone(),
                files: self.members.iter().map(|m| m.path.clone()).collect(),
            });
        }
        Ok(())
    }

    pub fn is_mixed(&self) -> bool {
        self.members
            .iter()
            .any(|m| m.version.family() != self.family)
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn family(&self) -> VersionFamily {
        self.family
    }

    pub fn members(&self) -> &[FileEntry] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Keep/delete partition for one asset group, both lists newest first.
#[derive(Debug, Clone)]
pub struct RetentionPlan {
    pub base_name: String,
    pub keep: Vec<FileEntry>,
    pub delete: Vec<FileEntry>,
}

impl RetentionPlan {
    pub fn has_deletions(&self) -> bool {
        !self.delete.is_empty()
    }
}

/// A file left out of planning because its version suffix did not classify.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: Error,
}

impl SkippedFile {
    pub fn file_name(&self) -> String {
        file_name_lossy(&self.path)
    }
}

pub(crate) fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default()
}
