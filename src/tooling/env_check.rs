//! Environment preflight for the BDD suites.

use colored::Colorize;

use crate::config::TestConfig;

/// Print the environment checklist. Returns true when a required value
/// is missing so the CLI can exit nonzero.
pub fn validate(config: &TestConfig) -> bool {
    println!("🔍 Validating environment configuration...\n");

    let mut has_errors = false;

    println!("{} AI_PROVIDER: {}", "✅".green(), config.provider);
    match config.provider.to_lowercase().as_str() {
        "groq" => has_errors |= check_key("GROQ_API_KEY"),
        "openai" => has_errors |= check_key("OPENAI_API_KEY"),
        "anthropic" => has_errors |= check_key("ANTHROPIC_API_KEY"),
        other => {
            println!("{} Unknown AI_PROVIDER: {}", "⚠️".yellow(), other);
            println!("   Supported providers: groq, openai, anthropic");
            has_errors = true;
        }
    }

    if config.headless() {
        println!("{} BROWSER: headless", "✅".green());
    } else {
        println!("{} BROWSER: {} (headed)", "✅".green(), config.browser);
    }
    println!("{} BASE_URL: {}", "✅".green(), config.base_url);
    if config.debug {
        println!("{} DEBUG logging enabled", "ℹ️".blue());
    }

    println!("\n{}", "=".repeat(50));
    if has_errors {
        println!("{} Environment validation failed", "❌".red());
    } else {
        println!("{} Environment is ready", "✅".green());
    }
    println!("{}", "=".repeat(50));

    has_errors
}

fn check_key(var: &str) -> bool {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => {
            println!("{} {} is set", "✅".green(), var);
            false
        }
        _ => {
            println!("{} {} is missing", "❌".red(), var);
            true
        }
    }
}
