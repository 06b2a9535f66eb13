use colored::*;
use indicatif::HumanBytes;
use media_pruner_core::{FileEntry, PlanSummary};
use std::path::{Path, PathBuf};

const RULE_WIDTH: usize = 80;

/// Totals carried across every directory of one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunTotals {
    pub files_deleted: usize,
    pub bytes_freed: u64,
}

impl RunTotals {
    pub fn add(&mut self, files: usize, bytes: u64) {
        self.files_deleted += files;
        self.bytes_freed += bytes;
    }
}

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Spread every 8-digit date run out as `YYYY MM DD` so versions read easily:
/// `shot_v20250304.mov` becomes `shot_v2025 03 04.mov`.
pub fn format_version_date(name: &str) -> String {
    let bytes = name.as_bytes();
    let mut out = String::with_capacity(name.len() + 4);
    let mut i = 0;
    let mut copied_to = 0;

    while i < bytes.len() {
        if i + 8 <= bytes.len() && bytes[i..i + 8].iter().all(u8::is_ascii_digit) {
            out.push_str(&name[copied_to..i]);
            out.push_str(&name[i..i + 4]);
            out.push(' ');
            out.push_str(&name[i + 4..i + 6]);
            out.push(' ');
            out.push_str(&name[i + 6..i + 8]);
            i += 8;
            copied_to = i;
        } else {
            i += 1;
        }
    }
    out.push_str(&name[copied_to..]);
    out
}

pub fn print_found_directories(count: usize) {
    println!(
        "\n{}",
        format!(
            "Found {} {} to process",
            count,
            if count > 1 { "subdirectories" } else { "directory" }
        )
        .bold()
    );
    println!("{}", rule());
}

pub fn print_directory_header(index: usize, total: usize, dir: &Path) {
    println!(
        "\n{}",
        format!("Processing directory {} of {}", index, total).bold()
    );
    println!("{}", format!("Scanning directory: {}", dir.display()).bold());
}

fn size_label(file: &FileEntry) -> String {
    match file.size_bytes() {
        Ok(size) => HumanBytes(size).to_string(),
        Err(_) => "size unknown".to_string(),
    }
}

pub fn print_plan(summary: &PlanSummary, keep_count: usize) {
    println!(
        "{}",
        format!(
            "Will keep the {} most recent version(s) of each file",
            keep_count
        )
        .cyan()
    );
    if !summary.unversioned.is_empty() {
        println!(
            "{}",
            format!(
                "Found {} unversioned files (these will always be kept)",
                summary.unversioned.len()
            )
            .yellow()
        );
    }
    println!("{}", rule());

    for (base_name, plan) in &summary.plans {
        println!("\n{}", format!("Base name: {}", base_name).bold());

        println!("{}", "Will keep:".green());
        for file in &plan.keep {
            println!("  - {}", file.file_name());
        }

        if plan.has_deletions() {
            println!("\n{}", "Will delete:".red());
            for file in &plan.delete {
                println!("  - {} ({})", file.file_name(), size_label(file));
            }
        } else {
            println!("\n{}", "No files to delete for this base name".yellow());
        }
        println!("{}", "-".repeat(RULE_WIDTH));
    }

    println!("\n{}", rule());
    println!(
        "{}",
        format!("Total files to delete: {}", summary.total_files_to_delete).bold()
    );
    println!(
        "{}",
        format!(
            "Total space to save: {}",
            HumanBytes(summary.total_bytes_to_delete)
        )
        .bold()
    );
    println!("{}", rule());
}

pub fn print_mixed_families(base_name: &str, files: &[PathBuf]) {
    println!(
        "\n{}",
        format!("Error: Mixed version types found for {}:", base_name).red()
    );
    println!("This file set contains both date-based versions (vYYYYMMDD) and numeric versions (_vN)");
    println!("Please resolve this manually before running again");
    println!("Files:");
    for file in files {
        let name = file
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("  - {}", name);
    }
}

pub fn print_unreadable_directory(dir: &Path, err: &std::io::Error) {
    println!(
        "\n{}",
        format!("Error: Could not read {}: {}", dir.display(), err).red()
    );
    println!("Skipping this directory");
}

pub fn print_deletion_result(deleted: usize, bytes: u64, failures: usize, keep_count: usize) {
    println!("\n{}", rule());
    if failures == 0 {
        println!("\nDeletion completed successfully!");
    } else {
        println!(
            "\n{}",
            format!("Deletion finished with {} failure(s)", failures).red()
        );
    }
    println!("Successfully deleted {} files", deleted);
    println!("Keeping {} version(s) of each file", keep_count);
    println!("Total space saved: {}", HumanBytes(bytes));
}

pub fn print_final_summary(totals: &RunTotals) {
    println!("\n{}", rule());
    println!("\n{}", "Final Summary:".bold());
    println!(
        "{}",
        format!(
            "Total files deleted across all directories: {}",
            totals.files_deleted
        )
        .bold()
    );
    println!(
        "{}",
        format!(
            "Total space saved across all directories: {}",
            HumanBytes(totals.bytes_freed)
        )
        .bold()
    );
    println!("{}", rule());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_version_date() {
        assert_eq!(format_version_date("shot_v20250304.mov"), "shot_v2025 03 04.mov");
        assert_eq!(
            format_version_date("shot_v202503041530a.mov"),
            "shot_v2025 03 041530a.mov"
        );
        assert_eq!(format_version_date("render_v10.mov"), "render_v10.mov");
        assert_eq!(
            format_version_date("2024010120240202"),
            "2024 01 012024 02 02"
        );
        assert_eq!(format_version_date(""), "");
    }

    #[test]
    fn test_run_totals_accumulate() {
        let mut totals = RunTotals::default();
        totals.add(2, 300);
        totals.add(1, 5);
        assert_eq!(
            totals,
            RunTotals {
                files_deleted: 3,
                bytes_freed: 305
            }
        );
    }
}
