//! Cleanup of generated report and screenshot artifacts.
//!
//! All functions take the directories as arguments so tests can point
//! them at scratch space.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::Result;
use colored::Colorize;

pub const DEFAULT_KEEP_REPORTS: usize = 5;
const SCREENSHOT_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// Delete both directories wholesale and recreate them empty.
pub fn cleanup_all(reports: &Path, screenshots: &Path) -> Result<()> {
    for dir in [reports, screenshots] {
        if dir.exists() {
            std::fs::remove_dir_all(dir)?;
        }
        std::fs::create_dir_all(dir)?;
    }
    println!("{} Cleared all reports and screenshots", "🧹".green());
    Ok(())
}

/// Keep the newest `keep` timestamped reports and drop screenshots older
/// than an hour. Both directories are created when missing. Only files
/// named test-report-*.html count against the report budget, so
/// latest-report.html survives.
pub fn cleanup_old(reports: &Path, screenshots: &Path, keep: usize) -> Result<()> {
    std::fs::create_dir_all(reports)?;
    std::fs::create_dir_all(screenshots)?;

    let mut report_files: Vec<(PathBuf, SystemTime)> = Vec::new();
    for entry in std::fs::read_dir(reports)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("test-report-") && name.ends_with(".html") {
            let modified = entry.metadata()?.modified()?;
            report_files.push((entry.path(), modified));
        }
    }
    report_files.sort_by(|a, b| b.1.cmp(&a.1));

    let mut removed_reports = 0usize;
    for (path, _) in report_files.iter().skip(keep) {
        std::fs::remove_file(path)?;
        removed_reports += 1;
    }

    let cutoff = SystemTime::now() - SCREENSHOT_MAX_AGE;
    let mut removed_screenshots = 0usize;
    for entry in std::fs::read_dir(screenshots)? {
        let entry = entry?;
        if entry.path().extension().and_then(|e| e.to_str()) != Some("png") {
            continue;
        }
        if entry.metadata()?.modified()? < cutoff {
            std::fs::remove_file(entry.path())?;
            removed_screenshots += 1;
        }
    }

    println!(
        "{} Removed {} old reports and {} stale screenshots",
        "🧹".green(),
        removed_reports,
        removed_screenshots
    );
    Ok(())
}

/// Delete every generated report file (.html and .json).
pub fn cleanup_reports(reports: &Path) -> Result<()> {
    let removed = remove_by_extension(reports, &["html", "json"])?;
    println!("{} Removed {} report files", "🧹".green(), removed);
    Ok(())
}

/// Delete every captured screenshot (.png and .jpg).
pub fn cleanup_screenshots(screenshots: &Path) -> Result<()> {
    let removed = remove_by_extension(screenshots, &["png", "jpg"])?;
    println!("{} Removed {} screenshots", "🧹".green(), removed);
    Ok(())
}

fn remove_by_extension(dir: &Path, extensions: &[&str]) -> Result<usize> {
    let mut removed = 0usize;
    if !dir.exists() {
        return Ok(0);
    }
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.contains(&e))
            .unwrap_or(false);
        if matches && path.is_file() {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let reports = dir.path().join("reports");
        let screenshots = dir.path().join("screenshots");
        std::fs::create_dir_all(&reports).unwrap();
        std::fs::create_dir_all(&screenshots).unwrap();
        (dir, reports, screenshots)
    }

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_cleanup_all_recreates_empty_dirs() {
        let (_dir, reports, screenshots) = scratch();
        std::fs::write(reports.join("latest-report.html"), "x").unwrap();
        std::fs::write(screenshots.join("home.png"), "x").unwrap();

        cleanup_all(&reports, &screenshots).unwrap();

        assert!(reports.exists());
        assert!(screenshots.exists());
        assert!(names(&reports).is_empty());
        assert!(names(&screenshots).is_empty());
    }

    #[test]
    fn test_cleanup_old_keeps_newest_reports() {
        let (_dir, reports, screenshots) = scratch();
        for i in 0..5 {
            std::fs::write(reports.join(format!("test-report-{i}.html")), "x").unwrap();
            std::thread::sleep(Duration::from_millis(20));
        }
        std::fs::write(reports.join("latest-report.html"), "x").unwrap();

        cleanup_old(&reports, &screenshots, 3).unwrap();

        assert_eq!(
            names(&reports),
            vec![
                "latest-report.html".to_string(),
                "test-report-2.html".to_string(),
                "test-report-3.html".to_string(),
                "test-report-4.html".to_string(),
            ]
        );
    }

    #[test]
    fn test_cleanup_old_drops_stale_screenshots() {
        let (_dir, reports, screenshots) = scratch();
        let stale = screenshots.join("stale.png");
        let fresh = screenshots.join("fresh.png");
        std::fs::write(&stale, "x").unwrap();
        std::fs::write(&fresh, "x").unwrap();

        let two_hours_ago = SystemTime::now() - Duration::from_secs(2 * 60 * 60);
        let file = std::fs::OpenOptions::new().write(true).open(&stale).unwrap();
        file.set_modified(two_hours_ago).unwrap();

        cleanup_old(&reports, &screenshots, DEFAULT_KEEP_REPORTS).unwrap();

        assert_eq!(names(&screenshots), vec!["fresh.png".to_string()]);
    }

    #[test]
    fn test_cleanup_old_creates_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let reports = dir.path().join("reports");
        let screenshots = dir.path().join("screenshots");

        cleanup_old(&reports, &screenshots, DEFAULT_KEEP_REPORTS).unwrap();

        assert!(reports.exists());
        assert!(screenshots.exists());
    }

    #[test]
    fn test_cleanup_reports_only_touches_report_extensions() {
        let (_dir, reports, _screenshots) = scratch();
        std::fs::write(reports.join("latest-report.html"), "x").unwrap();
        std::fs::write(reports.join("cucumber_report.json"), "x").unwrap();
        std::fs::write(reports.join("notes.txt"), "x").unwrap();

        cleanup_reports(&reports).unwrap();

        assert_eq!(names(&reports), vec!["notes.txt".to_string()]);
    }

    #[test]
    fn test_cleanup_screenshots_only_touches_images() {
        let (_dir, _reports, screenshots) = scratch();
        std::fs::write(screenshots.join("home.png"), "x").unwrap();
        std::fs::write(screenshots.join("form.jpg"), "x").unwrap();
        std::fs::write(screenshots.join("index.html"), "x").unwrap();

        cleanup_screenshots(&screenshots).unwrap();

        assert_eq!(names(&screenshots), vec!["index.html".to_string()]);
    }
}
