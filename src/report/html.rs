//! HTML report rendering.
//!
//! Two renderings share the same stats: the styled report written after a
//! run, saved both under a timestamped name and as latest-report.html,
//! and a plain backup rendering that embeds the raw results for when the
//! styled pipeline is unavailable.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::stats::{feature_stats, suite_stats, ScenarioOutcome};
use super::types::Feature;

/// Write the styled report into `output_dir`. Returns the timestamped path.
pub async fn generate(features: &[Feature], output_dir: &Path) -> Result<PathBuf> {
    let html = render_report(features);
    std::fs::create_dir_all(output_dir)?;

    let stamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ");
    let report_path = output_dir.join(format!("test-report-{stamp}.html"));
    std::fs::write(&report_path, &html)?;

    let latest_path = output_dir.join("latest-report.html");
    std::fs::write(&latest_path, &html)?;

    println!("HTML report saved to: {}", report_path.display());
    println!("Latest report updated: {}", latest_path.display());
    Ok(report_path)
}

/// Write the backup rendering with the raw results embedded.
pub async fn generate_backup(
    features: &[Feature],
    raw: &str,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let html = render_backup(features, raw);
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("simple_report.html"));
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, html)?;
    println!("Backup report saved to: {}", path.display());
    Ok(path)
}

fn render_report(features: &[Feature]) -> String {
    let stats = suite_stats(features);

    let mut rows = String::new();
    for feature in features {
        let row = feature_stats(feature);
        let (status_text, status_class) = outcome_badge(row.status());
        rows.push_str(&format!(
            r#"
                <tr class="{status_class}">
                    <td>{}</td>
                    <td>{}</td>
                    <td>{}</td>
                    <td>{}</td>
                    <td>{}</td>
                    <td><span class="status-badge {status_class}">{status_text}</span></td>
                </tr>"#,
            html_escape(&row.name),
            row.scenarios,
            row.passed,
            row.failed,
            row.skipped,
            status_class = status_class,
            status_text = status_text
        ));
    }

    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let year = chrono::Local::now().format("%Y");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Test Automation Report</title>
    <style>
        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}

        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #f5f7fa;
            color: #333;
            padding: 20px;
        }}

        .container {{
            max-width: 1100px;
            margin: 0 auto;
            background: white;
            border-radius: 10px;
            box-shadow: 0 4px 20px rgba(0, 0, 0, 0.08);
            overflow: hidden;
        }}

        .header {{
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            padding: 30px;
            text-align: center;
        }}

        .header h1 {{
            font-size: 2rem;
            margin-bottom: 8px;
        }}

        .header p {{
            opacity: 0.85;
        }}

        .stats {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
            gap: 16px;
            padding: 30px;
        }}

        .stat-card {{
            background: #f8f9fa;
            border-radius: 8px;
            padding: 20px;
            text-align: center;
            border-left: 4px solid #6c757d;
        }}

        .stat-card.passed {{ border-left-color: #28a745; }}
        .stat-card.failed {{ border-left-color: #dc3545; }}
        .stat-card.skipped {{ border-left-color: #ffc107; }}

        .stat-number {{
            font-size: 1.8rem;
            font-weight: 700;
        }}

        .stat-label {{
            color: #6c757d;
            font-size: 0.85rem;
            text-transform: uppercase;
            letter-spacing: 0.05em;
        }}

        .progress-section {{
            padding: 0 30px 10px;
        }}

        .progress-label {{
            display: flex;
            justify-content: space-between;
            font-weight: 600;
            margin-bottom: 8px;
        }}

        .progress-bar {{
            background: #e9ecef;
            border-radius: 10px;
            height: 20px;
            overflow: hidden;
        }}

        .progress-fill {{
            background: linear-gradient(90deg, #28a745, #20c997);
            height: 100%;
            border-radius: 10px;
            width: {pass_rate}%;
        }}

        .features {{
            padding: 30px;
        }}

        .features h2 {{
            margin-bottom: 16px;
        }}

        table {{
            width: 100%;
            border-collapse: collapse;
        }}

        th {{
            background: #343a40;
            color: white;
            padding: 12px;
            text-align: left;
        }}

        td {{
            padding: 12px;
            border-bottom: 1px solid #dee2e6;
        }}

        tr.passed {{ background-color: #d4edda; }}
        tr.failed {{ background-color: #f8d7da; }}
        tr.skipped {{ background-color: #fff3cd; }}

        .status-badge {{
            padding: 4px 12px;
            border-radius: 12px;
            color: white;
            font-size: 0.8rem;
            font-weight: 600;
        }}

        .status-badge.passed {{ background-color: #28a745; }}
        .status-badge.failed {{ background-color: #dc3545; }}
        .status-badge.skipped {{ background-color: #ffc107; color: #333; }}

        .footer {{
            text-align: center;
            padding: 20px;
            color: #6c757d;
            border-top: 1px solid #dee2e6;
            font-size: 0.85rem;
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>🧪 Test Automation Report</h1>
            <p>Generated on {generated}</p>
        </div>

        <div class="stats">
            <div class="stat-card">
                <div class="stat-number">{total_features}</div>
                <div class="stat-label">Features</div>
            </div>
            <div class="stat-card">
                <div class="stat-number">{total_scenarios}</div>
                <div class="stat-label">Scenarios</div>
            </div>
            <div class="stat-card passed">
                <div class="stat-number">{passed}</div>
                <div class="stat-label">Passed</div>
            </div>
            <div class="stat-card failed">
                <div class="stat-number">{failed}</div>
                <div class="stat-label">Failed</div>
            </div>
            <div class="stat-card skipped">
                <div class="stat-number">{skipped}</div>
                <div class="stat-label">Skipped</div>
            </div>
            <div class="stat-card">
                <div class="stat-number">{duration}ms</div>
                <div class="stat-label">Duration</div>
            </div>
        </div>

        <div class="progress-section">
            <div class="progress-label">
                <span>Success Rate: {pass_rate}%</span>
            </div>
            <div class="progress-bar">
                <div class="progress-fill"></div>
            </div>
        </div>

        <div class="features">
            <h2>📋 Feature Results</h2>
            <table>
                <thead>
                    <tr>
                        <th>Feature Name</th>
                        <th>Scenarios</th>
                        <th>Passed</th>
                        <th>Failed</th>
                        <th>Skipped</th>
                        <th>Status</th>
                    </tr>
                </thead>
                <tbody>{rows}
                </tbody>
            </table>
        </div>

        <div class="footer">Generated by Test Automation Framework &bull; {year}</div>
    </div>
</body>
</html>"#,
        pass_rate = stats.pass_rate,
        generated = generated,
        total_features = stats.total_features,
        total_scenarios = stats.total_scenarios,
        passed = stats.passed,
        failed = stats.failed,
        skipped = stats.skipped,
        duration = stats.duration,
        rows = rows,
        year = year
    )
}

fn render_backup(features: &[Feature], raw: &str) -> String {
    let stats = suite_stats(features);
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Test Report (Simple Backup)</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #f5f7fa;
            color: #333;
            padding: 20px;
        }}

        .container {{
            max-width: 900px;
            margin: 0 auto;
        }}

        .notice {{
            background: #fff3cd;
            border: 1px solid #ffc107;
            border-radius: 6px;
            padding: 12px 16px;
            margin-bottom: 20px;
        }}

        .stats {{
            display: flex;
            gap: 12px;
            flex-wrap: wrap;
            margin-bottom: 20px;
        }}

        .stat-box {{
            background: white;
            border: 1px solid #dee2e6;
            border-radius: 6px;
            padding: 12px 20px;
            text-align: center;
        }}

        .stat-box .value {{
            font-size: 1.4rem;
            font-weight: 700;
        }}

        pre {{
            background: #212529;
            color: #e9ecef;
            border-radius: 6px;
            padding: 16px;
            overflow-x: auto;
            font-size: 0.8rem;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1>🧪 Test Report (Simple Backup)</h1>
        <p>Generated on {generated}</p>
        <div class="notice">⚠️ This is the simplified backup rendering of the raw results.</div>
        <div class="stats">
            <div class="stat-box"><div class="value">{total_features}</div>Features</div>
            <div class="stat-box"><div class="value">{total_scenarios}</div>Scenarios</div>
            <div class="stat-box"><div class="value">{passed}</div>Passed</div>
            <div class="stat-box"><div class="value">{failed}</div>Failed</div>
            <div class="stat-box"><div class="value">{skipped}</div>Skipped</div>
        </div>
        <h2>Raw Results</h2>
        <pre>{raw}</pre>
    </div>
</body>
</html>"#,
        generated = generated,
        total_features = stats.total_features,
        total_scenarios = stats.total_scenarios,
        passed = stats.passed,
        failed = stats.failed,
        skipped = stats.skipped,
        raw = html_escape(raw)
    )
}

fn outcome_badge(outcome: ScenarioOutcome) -> (&'static str, &'static str) {
    match outcome {
        ScenarioOutcome::Passed => ("Passed", "passed"),
        ScenarioOutcome::Failed => ("Failed", "failed"),
        ScenarioOutcome::Skipped => ("Skipped", "skipped"),
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
