use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use wisp_tester::config::TestConfig;
use wisp_tester::{report, tooling};

#[derive(Parser)]
#[command(name = "wisp-tester")]
#[command(author = "Wisp Team")]
#[command(version = "0.2.1")]
#[command(about = "AI-assisted BDD browser test harness", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a report from cucumber results
    Report {
        /// Path to the cucumber results JSON
        #[arg(short, long, default_value = "reports/cucumber_report.json")]
        results: PathBuf,

        /// Output format (json, html)
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a minimal fallback report when the styled one cannot be built
    Backup {
        /// Path to the cucumber results JSON
        #[arg(short, long, default_value = "reports/cucumber_report.json")]
        results: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove report and screenshot artifacts
    Cleanup {
        #[command(subcommand)]
        command: Option<CleanupCommands>,
    },

    /// Check that the environment is configured for a test run
    Validate,
}

#[derive(Subcommand)]
enum CleanupCommands {
    /// Remove every report and screenshot
    All,

    /// Keep the newest reports and drop screenshots older than an hour
    Old {
        /// Number of timestamped reports to keep
        #[arg(default_value_t = tooling::cleanup::DEFAULT_KEEP_REPORTS)]
        keep: usize,
    },

    /// Remove report files only
    Reports,

    /// Remove screenshot files only
    Screenshots,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TestConfig::default();
    let default_level = if config.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            results,
            format,
            output,
        } => {
            println!(
                "{} Generating {} report from: {}",
                "📊".to_string().blue(),
                format.cyan(),
                results.display()
            );
            report::generate_report(&results, &format, output.as_deref()).await?;
        }

        Commands::Backup { results, output } => {
            println!(
                "{} Generating backup report from: {}",
                "📊".to_string().blue(),
                results.display()
            );
            report::generate_backup_report(&results, output.as_deref()).await?;
        }

        Commands::Cleanup { command } => {
            let reports = Path::new("reports");
            let screenshots = Path::new("screenshots");

            match command {
                Some(CleanupCommands::All) => {
                    tooling::cleanup::cleanup_all(reports, screenshots)?;
                }
                Some(CleanupCommands::Old { keep }) => {
                    tooling::cleanup::cleanup_old(reports, screenshots, keep)?;
                }
                Some(CleanupCommands::Reports) => {
                    tooling::cleanup::cleanup_reports(reports)?;
                }
                Some(CleanupCommands::Screenshots) => {
                    tooling::cleanup::cleanup_screenshots(screenshots)?;
                }
                None => {
                    println!("Usage: wisp-tester cleanup <COMMAND>");
                    println!();
                    println!("Commands:");
                    println!("  all          Remove every report and screenshot");
                    println!("  old [KEEP]   Keep the KEEP newest reports, drop stale screenshots");
                    println!("  reports      Remove report files only");
                    println!("  screenshots  Remove screenshot files only");
                }
            }
        }

        Commands::Validate => {
            let has_errors = tooling::env_check::validate(&config);
            if has_errors {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
