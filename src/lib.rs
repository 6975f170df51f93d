pub mod agent;
pub mod client;
pub mod config;
pub mod error;
pub mod pages;
pub mod report;
pub mod tooling;

// Re-export common items
pub use client::AutomationClient;
pub use config::TestConfig;
pub use error::HarnessError;
pub use report::generate_report;
