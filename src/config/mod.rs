//! Test run configuration sourced from the environment.

pub mod providers;

/// Harness configuration, read once at process start.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// AI provider name (resolved through the provider catalog)
    pub provider: String,

    /// Browser mode: `chrome` (default, visible) or `headless`
    pub browser: String,

    /// Base URL of the application under test
    pub base_url: String,

    /// Raise agent verbosity (prompt/directive logging)
    pub debug: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        let debug = std::env::var("DEBUG")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            provider: std::env::var("AI_PROVIDER").unwrap_or_else(|_| "groq".to_string()),
            browser: std::env::var("BROWSER").unwrap_or_else(|_| "chrome".to_string()),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "https://demoqa.com/".to_string()),
            debug,
        }
    }
}

impl TestConfig {
    pub fn headless(&self) -> bool {
        self.browser.eq_ignore_ascii_case("headless")
    }
}
