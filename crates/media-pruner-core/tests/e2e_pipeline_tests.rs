use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use media_pruner_core::scanner::discover_directories;
use media_pruner_core::{
    apply_plan, AppConfig, Error, ProgressReporter, PruneEngine, RetentionPlan, SilentReporter,
};

/// Create a directory of versioned media.
/// Layout:
///   shots/
///     shot_v20240101.mov      (100 bytes)
///     shot_v20240201.mov      (200 bytes)
///     shot_v20240301.mov      (300 bytes)
///     shot_v20240301a.mov     (400 bytes)
///     render_v3.png           (30 bytes)
///     render_v10.png          (10 bytes)
///     logo.png                (unversioned)
///     notes.txt               (not media)
fn create_shots(root: &Path) -> PathBuf {
    let shots = root.join("shots");
    fs::create_dir_all(&shots).unwrap();
    let files: [(&str, usize); 8] = [
        ("shot_v20240101.mov", 100),
        ("shot_v20240201.mov", 200),
        ("shot_v20240301.mov", 300),
        ("shot_v20240301a.mov", 400),
        ("render_v3.png", 30),
        ("render_v10.png", 10),
        ("logo.png", 50),
        ("notes.txt", 5),
    ];
    for (name, size) in files {
        fs::write(shots.join(name), vec![0u8; size]).unwrap();
    }
    shots
}

#[derive(Default)]
struct RecordingReporter {
    deleted: RefCell<Vec<PathBuf>>,
    failed: RefCell<Vec<(PathBuf, io::ErrorKind)>>,
    skipped: RefCell<Vec<PathBuf>>,
    plans: RefCell<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn on_file_skipped(&self, path: &Path, _reason: &Error) {
        self.skipped.borrow_mut().push(path.to_path_buf());
    }

    fn on_plan_ready(&self, plan: &RetentionPlan) {
        self.plans.borrow_mut().push(plan.base_name.clone());
    }

    fn on_file_deleted(&self, path: &Path, _bytes: u64) {
        self.deleted.borrow_mut().push(path.to_path_buf());
    }

    fn on_delete_failed(&self, path: &Path, err: &io::Error) {
        self.failed.borrow_mut().push((path.to_path_buf(), err.kind()));
    }
}

#[test]
fn test_scan_plan_and_delete() {
    let tmp = tempdir().unwrap();
    let shots = create_shots(tmp.path());

    let engine = PruneEngine::new(&AppConfig::default());
    let reporter = RecordingReporter::default();
    let summary = engine.scan_directory(&shots, 2, &reporter).unwrap();

    assert_eq!(*reporter.plans.borrow(), vec!["render", "shot_"]);
    assert_eq!(summary.unversioned, vec![shots.join("logo.png")]);
    assert_eq!(summary.total_files_to_delete, 2);
    assert_eq!(summary.total_bytes_to_delete, 300);
    assert!(!summary.plans["render"].has_deletions());

    let outcome = apply_plan(&summary.plans, &reporter);
    assert_eq!(outcome.deleted_count, 2);
    assert_eq!(outcome.bytes_freed, 300);
    assert!(outcome.failures.is_empty());
    assert_eq!(reporter.deleted.borrow().len(), 2);

    assert!(!shots.join("shot_v20240101.mov").exists());
    assert!(!shots.join("shot_v20240201.mov").exists());
    for kept in [
        "shot_v20240301.mov",
        "shot_v20240301a.mov",
        "render_v3.png",
        "render_v10.png",
        "logo.png",
        "notes.txt",
    ] {
        assert!(shots.join(kept).exists(), "{kept} should survive");
    }
}

#[test]
fn test_vanished_file_is_reported_and_batch_continues() {
    let tmp = tempdir().unwrap();
    let shots = create_shots(tmp.path());

    let engine = PruneEngine::new(&AppConfig::default());
    let summary = engine.scan_directory(&shots, 1, &SilentReporter).unwrap();
    assert_eq!(summary.total_files_to_delete, 4);

    // Something else removes a planned file between planning and deletion.
    fs::remove_file(shots.join("shot_v20240201.mov")).unwrap();

    let reporter = RecordingReporter::default();
    let outcome = apply_plan(&summary.plans, &reporter);

    assert_eq!(outcome.deleted_count, 3);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].path, shots.join("shot_v20240201.mov"));
    assert_eq!(outcome.failures[0].kind, io::ErrorKind::NotFound);
    assert_eq!(reporter.failed.borrow().len(), 1);
    // render_v3 (30) + shot_v20240301 (300) + shot_v20240101 (100)
    assert_eq!(outcome.bytes_freed, 430);
    assert!(shots.join("render_v10.png").exists());
    assert!(shots.join("shot_v20240301a.mov").exists());
}

#[test]
fn test_mixed_directory_is_rejected_without_touching_files() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("mixed");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("a_v20240101.mov"), "x").unwrap();
    fs::write(dir.join("a_v2.mov"), "x").unwrap();
    fs::write(dir.join("b_v1.mov"), "x").unwrap();
    fs::write(dir.join("b_v2.mov"), "x").unwrap();

    let engine = PruneEngine::new(&AppConfig::default());
    let err = engine.scan_directory(&dir, 1, &SilentReporter).unwrap_err();
    assert!(matches!(err, Error::MixedVersionFamilies { ref base_name, .. } if base_name == "a"));
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 4);
}

#[test]
fn test_invalid_dates_are_skipped_with_a_report() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("bad");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("plate_v20240231.mov"), "x").unwrap();
    fs::write(dir.join("plate_v20240228.mov"), "x").unwrap();

    let engine = PruneEngine::new(&AppConfig::default());
    let reporter = RecordingReporter::default();
    let summary = engine.scan_directory(&dir, 1, &reporter).unwrap();

    assert_eq!(*reporter.skipped.borrow(), vec![dir.join("plate_v20240231.mov")]);
    assert_eq!(summary.plans["plate_"].keep.len(), 1);
    assert!(!summary.has_deletions());
}

#[test]
fn test_custom_patterns_from_config() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("exr");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("comp_v1.exr"), "x").unwrap();
    fs::write(dir.join("comp_v2.exr"), "x").unwrap();
    fs::write(dir.join("comp_v1.mov"), "x").unwrap();

    let config = AppConfig {
        file_patterns: vec!["*.exr".to_string()],
        ..AppConfig::default()
    };
    let summary = PruneEngine::new(&config)
        .scan_directory(&dir, 1, &SilentReporter)
        .unwrap();

    assert_eq!(summary.plans["comp"].keep.len(), 1);
    assert_eq!(summary.plans["comp"].delete[0].file_name(), "comp_v1.exr");
}

#[test]
fn test_each_subdirectory_is_planned_independently() {
    let tmp = tempdir().unwrap();
    create_shots(tmp.path());
    let other = tmp.path().join("other");
    fs::create_dir_all(&other).unwrap();
    fs::write(other.join("a_v20240101.mov"), "x").unwrap();
    fs::write(other.join("a_v2.mov"), "x").unwrap();

    let engine = PruneEngine::new(&AppConfig::default());
    let dirs = discover_directories(tmp.path()).unwrap();
    assert_eq!(dirs, vec![tmp.path().join("other"), tmp.path().join("shots")]);

    // The mixed directory fails on its own; the next one still plans.
    assert!(engine.scan_directory(&dirs[0], 1, &SilentReporter).is_err());
    let summary = engine.scan_directory(&dirs[1], 1, &SilentReporter).unwrap();
    assert_eq!(summary.total_files_to_delete, 4);
}
