//! AI-driven browser automation session.
//!
//! The session couples a live Playwright page with an LLM action planner:
//! `act` turns a natural-language instruction into one concrete directive
//! and executes it against the page. The client wrapper owns sessions
//! through the [`AutomationSession`] trait and recreates them through a
//! [`SessionFactory`] when a page context dies mid-run.

pub mod browser;
pub mod planner;
pub mod session;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::providers::ProviderCredentials;
use crate::config::TestConfig;

pub use browser::BrowserSession;
pub use planner::ActionPlanner;
pub use session::{AgentSession, AgentSessionFactory};

/// A single concrete UI action chosen by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Directive {
    /// Click the element matched by the selector
    Click { selector: String },
    /// Replace the matched field's value
    Fill { selector: String, value: String },
    /// Choose an option in a combo or autocomplete widget
    Select { selector: String, value: String },
    /// Check a checkbox or radio input (clicks it)
    Check { selector: String },
    /// Press a keyboard key on the focused element
    Press { key: String },
    /// Assert that a selector matches or a text fragment is on the page
    Verify {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selector: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
}

/// A live connection to a controlled browser with an AI action executor.
#[async_trait]
pub trait AutomationSession: Send + Sync {
    /// Navigate the page to a URL and wait for the DOM to be ready
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Interpret a natural-language instruction and perform it
    async fn act(&self, instruction: &str) -> Result<()>;

    /// Execute a concrete directive without planner involvement
    async fn perform(&self, directive: &Directive) -> Result<()>;

    /// Resize the page viewport
    async fn set_viewport(&self, width: u32, height: u32) -> Result<()>;

    /// Full-page PNG capture
    async fn screenshot_bytes(&self) -> Result<Vec<u8>>;

    /// Whether the session's page has been torn down
    fn is_closed(&self) -> bool;

    /// Tear the session down. The session is unusable afterwards.
    async fn shutdown(&self) -> Result<()>;
}

/// Builds automation sessions for the client wrapper.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn create(
        &self,
        config: &TestConfig,
        credentials: &ProviderCredentials,
    ) -> Result<Box<dyn AutomationSession>>;
}
