//! Session assembly: a live browser paired with an LLM planner.

use anyhow::Result;
use async_trait::async_trait;
use colored::Colorize;
use log::debug;

use crate::agent::{ActionPlanner, AutomationSession, BrowserSession, Directive, SessionFactory};
use crate::config::providers::ProviderCredentials;
use crate::config::TestConfig;

pub struct AgentSession {
    browser: BrowserSession,
    planner: ActionPlanner,
}

impl AgentSession {
    pub fn new(browser: BrowserSession, planner: ActionPlanner) -> Self {
        Self { browser, planner }
    }
}

#[async_trait]
impl AutomationSession for AgentSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.browser.navigate(url).await
    }

    async fn act(&self, instruction: &str) -> Result<()> {
        let outline = self.browser.outline().await?;
        let directive = self.planner.plan(instruction, &outline).await?;
        debug!("directive for '{}': {:?}", instruction, directive);
        self.browser.perform(&directive).await
    }

    async fn perform(&self, directive: &Directive) -> Result<()> {
        self.browser.perform(directive).await
    }

    async fn set_viewport(&self, width: u32, height: u32) -> Result<()> {
        self.browser.set_viewport(width, height).await
    }

    async fn screenshot_bytes(&self) -> Result<Vec<u8>> {
        self.browser.screenshot_bytes().await
    }

    fn is_closed(&self) -> bool {
        self.browser.is_closed()
    }

    async fn shutdown(&self) -> Result<()> {
        self.browser.shutdown().await
    }
}

/// Builds real sessions: launches chromium and wires up the provider.
pub struct AgentSessionFactory;

#[async_trait]
impl SessionFactory for AgentSessionFactory {
    async fn create(
        &self,
        config: &TestConfig,
        credentials: &ProviderCredentials,
    ) -> Result<Box<dyn AutomationSession>> {
        println!(
            "{} Launching {} browser with {} planner...",
            "🚀".blue(),
            if config.headless() {
                "headless"
            } else {
                "headed"
            },
            credentials.provider
        );
        let browser = BrowserSession::launch(config.headless()).await?;
        let planner = ActionPlanner::new(credentials.clone());
        Ok(Box::new(AgentSession::new(browser, planner)))
    }
}
