use crate::report::format_version_date;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use media_pruner_core::{Error, ProgressReporter};
use std::cell::RefCell;
use std::io;
use std::path::Path;

/// CLI progress reporter: warnings for skipped files and a progress bar
/// while deleting.
#[derive(Default)]
pub struct CliReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn println(&self, line: String) {
        match self.bar.borrow().as_ref() {
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl ProgressReporter for CliReporter {
    fn on_file_skipped(&self, path: &Path, reason: &Error) {
        self.println(format!(
            "{}",
            format!("Warning: Skipping file {} - {}", display_name(path), reason).yellow()
        ));
    }

    fn on_delete_start(&self, total_files: usize) {
        println!("\nDeleting files...");
        let pb = ProgressBar::new(total_files as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Deleting [{bar:30.cyan/dim}] {pos}/{len} files",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("━╸─")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        if let Some(old) = self.bar.borrow_mut().replace(pb) {
            old.finish_and_clear();
        }
    }

    fn on_file_deleted(&self, path: &Path, _bytes: u64) {
        self.println(format!(
            "  - Deleting: {}",
            format_version_date(&display_name(path))
        ));
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.inc(1);
        }
    }

    fn on_delete_failed(&self, path: &Path, err: &io::Error) {
        self.println(format!(
            "{}",
            format!("  - Failed to delete {}: {}", display_name(path), err).red()
        ));
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.inc(1);
        }
    }

    fn on_delete_complete(&self, _deleted: usize, _bytes_freed: u64) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}
