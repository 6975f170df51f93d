//! Page objects for the demoqa.com practice site.
//!
//! Each page wraps the shared [`AutomationClient`](crate::client::AutomationClient)
//! and exposes flow-level methods whose natural-language instructions are
//! the contract with the planner. Shared helpers cover the waits and the
//! relative-date vocabulary the suites use.

pub mod home;
pub mod practice_form;
pub mod text_box;

use std::time::Duration;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;

use crate::client::AutomationClient;

pub use home::HomePage;
pub use practice_form::PracticeFormPage;
pub use text_box::TextBoxPage;

pub(crate) const PAGE_SETTLE: Duration = Duration::from_secs(3);
pub(crate) const FIELD_DELAY: Duration = Duration::from_millis(500);
pub(crate) const FORM_FIELD_DELAY: Duration = Duration::from_millis(800);
pub(crate) const VERIFY_WAIT: Duration = Duration::from_secs(3);

/// Ask the agent to wait until a described element is visible.
pub async fn wait_for_element(client: &AutomationClient, description: &str) -> Result<()> {
    client
        .run_action(&format!("Wait for \"{description}\" to be visible"))
        .await
}

pub async fn verify_element_visible(client: &AutomationClient, description: &str) -> Result<()> {
    client
        .run_action(&format!("Verify that \"{description}\" is visible"))
        .await
}

pub async fn verify_element_not_visible(client: &AutomationClient, description: &str) -> Result<()> {
    client
        .run_action(&format!("Verify that \"{description}\" is not visible"))
        .await
}

pub async fn verify_text_present(client: &AutomationClient, text: &str) -> Result<()> {
    client
        .run_action(&format!(
            "Verify that the text \"{text}\" is present on the page"
        ))
        .await
}

/// ISO date (YYYY-MM-DD) the given number of years before today.
/// Feb 29 rolls forward to Mar 1 in a non-leap target year.
pub fn date_years_ago(years: i32) -> String {
    let today = Local::now().date_naive();
    let target_year = today.year() - years;
    let date = today
        .with_year(target_year)
        .or_else(|| NaiveDate::from_ymd_opt(target_year, 3, 1))
        .unwrap_or(today);
    date.format("%Y-%m-%d").to_string()
}

/// Turn "N years ago from today" into a concrete ISO date. Any other
/// value passes through unchanged.
pub(crate) fn resolve_relative_date(value: &str) -> String {
    if !value.contains("years ago from today") {
        return value.to_string();
    }
    let years = Regex::new(r"(\d+)\s+years ago")
        .ok()
        .and_then(|re| {
            re.captures(value)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse::<i32>().ok())
        });
    match years {
        Some(years) => date_years_ago(years),
        None => value.to_string(),
    }
}

/// Split a comma-separated cell into trimmed, non-empty entries.
pub(crate) fn split_values(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|v| !v.is_empty())
}
