pub mod html;
pub mod stats;
pub mod types;

use std::path::Path;

use anyhow::{Context, Result};

const DEFAULT_REPORT_DIR: &str = "reports";

/// Generate a report from a cucumber JSON results file.
pub async fn generate_report(
    results_path: &Path,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let features = load_results(results_path)?;

    match format {
        "html" => {
            let dir = output.unwrap_or_else(|| Path::new(DEFAULT_REPORT_DIR));
            html::generate(&features, dir).await?;
            Ok(())
        }
        "json" => {
            let summary = serde_json::to_string_pretty(&stats::suite_stats(&features))?;
            if let Some(path) = output {
                std::fs::write(path, summary)?;
                println!("JSON summary saved to: {}", path.display());
            } else {
                println!("{summary}");
            }
            Ok(())
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}

/// Generate the simplified backup report with the raw results embedded.
pub async fn generate_backup_report(results_path: &Path, output: Option<&Path>) -> Result<()> {
    let raw = std::fs::read_to_string(results_path)
        .with_context(|| format!("No results file found at {}", results_path.display()))?;
    let features: Vec<types::Feature> = serde_json::from_str(&raw)
        .with_context(|| format!("Could not parse {}", results_path.display()))?;
    html::generate_backup(&features, &raw, output).await?;
    Ok(())
}

fn load_results(results_path: &Path) -> Result<Vec<types::Feature>> {
    let raw = std::fs::read_to_string(results_path)
        .with_context(|| format!("No results file found at {}", results_path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Could not parse {}", results_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "name": "Forms",
            "elements": [
                {
                    "name": "Register",
                    "steps": [ { "name": "I click submit", "result": { "status": "passed", "duration": 5000000 } } ]
                }
            ]
        }
    ]"#;

    #[tokio::test]
    async fn test_generate_html_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("cucumber_report.json");
        std::fs::write(&results, SAMPLE).unwrap();
        let out = dir.path().join("reports");
        generate_report(&results, "html", Some(&out)).await.unwrap();
        assert!(out.join("latest-report.html").exists());
    }

    #[tokio::test]
    async fn test_generate_json_summary() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("cucumber_report.json");
        std::fs::write(&results, SAMPLE).unwrap();
        let out = dir.path().join("summary.json");
        generate_report(&results, "json", Some(&out)).await.unwrap();
        let summary: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(summary["totalScenarios"], 1);
        assert_eq!(summary["passRate"], 100);
        assert_eq!(summary["duration"], 5);
    }

    #[tokio::test]
    async fn test_missing_results_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("cucumber_report.json");
        let err = generate_backup_report(&missing, None).await.unwrap_err();
        assert!(err.to_string().contains("No results file found"));
    }

    #[tokio::test]
    async fn test_unknown_format_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("cucumber_report.json");
        std::fs::write(&results, SAMPLE).unwrap();
        let err = generate_report(&results, "pdf", None).await.unwrap_err();
        assert!(err.to_string().contains("Unknown format"));
    }
}
