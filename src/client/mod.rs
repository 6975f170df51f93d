//! Shared automation client.
//!
//! The client owns one automation session at a time and carries the
//! suite-facing behavior: lazy initialization that fails before a browser
//! launches when credentials are missing, navigation with retries that
//! rebuilds the session when the page context died, AI actions raced
//! against a timeout with a debug screenshot on failure, and deterministic
//! selector fallbacks for when the planner cannot land an action.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use log::{debug, warn};
use regex::Regex;

use crate::agent::{AgentSessionFactory, AutomationSession, Directive, SessionFactory};
use crate::config::providers;
use crate::config::TestConfig;
use crate::error::HarnessError;

pub const DEFAULT_OPEN_RETRIES: u32 = 2;
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(30);
const FALLBACK_PRIMARY_TIMEOUT: Duration = Duration::from_secs(20);
const FALLBACK_DIRECT_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_BACKOFF: Duration = Duration::from_secs(3);
const NAV_SETTLE: Duration = Duration::from_secs(2);
const VIEWPORT_WIDTH: u32 = 1920;
const VIEWPORT_HEIGHT: u32 = 1080;

/// Deterministic recovery action for [`AutomationClient::run_action_with_fallback`].
#[derive(Debug, Clone)]
pub struct Fallback {
    pub selector: String,
    pub action: FallbackAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackAction {
    Click,
    Fill,
}

pub struct AutomationClient {
    config: TestConfig,
    factory: Box<dyn SessionFactory>,
    session: Option<Box<dyn AutomationSession>>,
    initialized: bool,
}

impl AutomationClient {
    pub fn new(config: TestConfig) -> Self {
        Self::with_factory(config, Box::new(AgentSessionFactory))
    }

    /// Build a client over a custom session factory. Tests inject scripted
    /// sessions through this.
    pub fn with_factory(config: TestConfig, factory: Box<dyn SessionFactory>) -> Self {
        Self {
            config,
            factory,
            session: None,
            initialized: false,
        }
    }

    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    /// Create the session. Calling again while initialized is a no-op.
    /// Credentials are resolved up front so a missing API key fails
    /// before any browser launches.
    pub async fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            println!("{} Client already initialized", "ℹ️".blue());
            return Ok(());
        }

        let credentials = providers::resolve(&self.config.provider)?;
        println!(
            "{} Initializing automation client ({} / {})...",
            "🔄".cyan(),
            credentials.provider,
            credentials.model
        );

        let created = async {
            let session = self.factory.create(&self.config, &credentials).await?;
            session.set_viewport(VIEWPORT_WIDTH, VIEWPORT_HEIGHT).await?;
            Ok::<_, anyhow::Error>(session)
        }
        .await;

        match created {
            Ok(session) => {
                self.session = Some(session);
                self.initialized = true;
                println!("{} Automation client initialized", "✅".green());
                Ok(())
            }
            Err(e) => {
                self.session = None;
                self.initialized = false;
                Err(e.context("Failed to initialize automation client"))
            }
        }
    }

    /// Navigate with the default retry budget.
    pub async fn open(&mut self, url: &str) -> Result<()> {
        self.open_with_retries(url, DEFAULT_OPEN_RETRIES).await
    }

    /// Navigate, retrying on failure. When the failure says the page
    /// context died, the session is rebuilt before the next attempt.
    /// The last attempt's error is surfaced when all attempts fail.
    pub async fn open_with_retries(&mut self, url: &str, retries: u32) -> Result<()> {
        if !self.initialized {
            return Err(HarnessError::NotInitialized.into());
        }

        let attempts = retries + 1;
        let mut last_error: Option<anyhow::Error> = None;

        for attempt in 1..=attempts {
            match self.try_open(url, attempt, attempts).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    println!(
                        "{} Navigation attempt {}/{} failed: {}",
                        "⚠️".yellow(),
                        attempt,
                        attempts,
                        e
                    );
                    let needs_reinit = is_closed_error(&e);
                    last_error = Some(e);
                    if attempt < attempts {
                        tokio::time::sleep(RETRY_BACKOFF).await;
                        if needs_reinit {
                            println!(
                                "{} Page context lost, rebuilding session...",
                                "🔄".cyan()
                            );
                            if let Err(reinit_err) = self.reinitialize().await {
                                warn!("reinitialize failed: {reinit_err:#}");
                            }
                        }
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Failed to open {url}")))
    }

    async fn try_open(&self, url: &str, attempt: u32, attempts: u32) -> Result<()> {
        let session = match self.session.as_deref() {
            Some(session) if !session.is_closed() => session,
            _ => bail!("Page context is closed, need to reinitialize"),
        };

        println!(
            "{} Opening {} (attempt {}/{})",
            "🌐".blue(),
            url,
            attempt,
            attempts
        );
        session.navigate(url).await?;
        self.maximize().await;
        tokio::time::sleep(NAV_SETTLE).await;
        Ok(())
    }

    /// Run one natural-language action with the default timeout.
    pub async fn run_action(&self, instruction: &str) -> Result<()> {
        self.run_action_with_timeout(instruction, DEFAULT_ACTION_TIMEOUT)
            .await
    }

    /// Run one natural-language action, racing it against a timeout. On
    /// any failure a best-effort debug screenshot is captured before the
    /// error is surfaced.
    pub async fn run_action_with_timeout(
        &self,
        instruction: &str,
        timeout: Duration,
    ) -> Result<()> {
        let session = self.session()?;
        if session.is_closed() {
            bail!("Page context is closed, need to reinitialize");
        }

        println!("{} AI Action: {}", "🤖".cyan(), instruction);

        let result = match tokio::time::timeout(timeout, session.act(instruction)).await {
            Ok(inner) => inner,
            Err(_) => Err(HarnessError::ActionTimeout {
                instruction: instruction.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            }
            .into()),
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                self.capture_failure_screenshot().await;
                Err(e)
            }
        }
    }

    /// Run an AI action with a shortened timeout; when it fails, fall back
    /// to a direct selector action. A fill fallback recovers its value
    /// from the first double-quoted fragment of the instruction. When the
    /// fallback fails too, the original error is surfaced.
    pub async fn run_action_with_fallback(
        &self,
        instruction: &str,
        fallback: Option<&Fallback>,
    ) -> Result<()> {
        let primary = match self
            .run_action_with_timeout(instruction, FALLBACK_PRIMARY_TIMEOUT)
            .await
        {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        let fallback = match fallback {
            Some(f) => f,
            None => return Err(primary),
        };

        println!(
            "{} AI action failed, trying fallback selector '{}'",
            "🛟".yellow(),
            fallback.selector
        );
        let directive = match fallback.action {
            FallbackAction::Click => Directive::Click {
                selector: fallback.selector.clone(),
            },
            FallbackAction::Fill => Directive::Fill {
                selector: fallback.selector.clone(),
                value: quoted_fragment(instruction).unwrap_or_default(),
            },
        };

        let rescued = match tokio::time::timeout(FALLBACK_DIRECT_TIMEOUT, self.perform(&directive))
            .await
        {
            Ok(inner) => inner,
            Err(_) => Err(anyhow::anyhow!("Fallback action timed out")),
        };

        match rescued {
            Ok(()) => {
                println!("{} Fallback action succeeded", "✅".green());
                Ok(())
            }
            Err(fallback_err) => {
                warn!("fallback failed too: {fallback_err:#}");
                Err(primary)
            }
        }
    }

    /// Execute a concrete directive, skipping the planner.
    pub async fn perform(&self, directive: &Directive) -> Result<()> {
        self.session()?.perform(directive).await
    }

    /// Capture a full-page screenshot under screenshots/ with a
    /// timestamped name. Returns the path written.
    pub async fn screenshot(&self, name: &str) -> Result<PathBuf> {
        let bytes = self.session()?.screenshot_bytes().await?;
        let stamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ");
        let dir = PathBuf::from("screenshots");
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{name}-{stamp}.png"));
        std::fs::write(&path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} Screenshot saved: {}", "📸".blue(), path.display());
        Ok(path)
    }

    /// Raw full-page PNG bytes, for callers that route the image elsewhere.
    pub async fn screenshot_bytes(&self) -> Result<Vec<u8>> {
        self.session()?.screenshot_bytes().await
    }

    /// Best-effort window maximize. Failures are logged and swallowed.
    pub async fn maximize(&self) {
        if let Ok(session) = self.session() {
            if let Err(e) = session.set_viewport(VIEWPORT_WIDTH, VIEWPORT_HEIGHT).await {
                warn!("could not maximize browser: {e:#}");
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.initialized && self.session.is_some()
    }

    /// Tear down the session. State is cleared even when shutdown fails.
    pub async fn close(&mut self) {
        if let Some(session) = self.session.take() {
            println!("{} Closing automation client...", "🔒".blue());
            if let Err(e) = session.shutdown().await {
                warn!("error while closing session: {e:#}");
            }
        }
        self.initialized = false;
    }

    /// Drop the session reference without shutting it down.
    pub fn clear(&mut self) {
        self.session = None;
        self.initialized = false;
    }

    /// Discard the current session and build a fresh one.
    pub async fn reinitialize(&mut self) -> Result<()> {
        println!("{} Reinitializing automation client...", "🔄".cyan());
        self.clear();
        self.initialize().await
    }

    fn session(&self) -> Result<&dyn AutomationSession> {
        match self.session.as_deref() {
            Some(session) if self.initialized => Ok(session),
            _ => Err(HarnessError::NotInitialized.into()),
        }
    }

    async fn capture_failure_screenshot(&self) {
        let session = match self.session() {
            Ok(session) => session,
            Err(_) => return,
        };
        match session.screenshot_bytes().await {
            Ok(bytes) => {
                let path = PathBuf::from(format!(
                    "debug-failed-action-{}.png",
                    chrono::Utc::now().timestamp_millis()
                ));
                match std::fs::write(&path, &bytes) {
                    Ok(()) => println!(
                        "{} Saved debug screenshot: {}",
                        "📸".yellow(),
                        path.display()
                    ),
                    Err(e) => debug!("could not save debug screenshot: {e}"),
                }
            }
            Err(e) => debug!("could not capture debug screenshot: {e:#}"),
        }
    }
}

impl fmt::Debug for AutomationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutomationClient")
            .field("provider", &self.config.provider)
            .field("initialized", &self.initialized)
            .field("has_session", &self.session.is_some())
            .finish()
    }
}

/// Whether an error chain indicates the page context died.
pub fn is_closed_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        let msg = cause.to_string();
        msg.contains("closed") || msg.contains("Target page")
    })
}

/// First double-quoted fragment of an instruction.
fn quoted_fragment(instruction: &str) -> Option<String> {
    let re = Regex::new(r#""([^"]+)""#).ok()?;
    re.captures(instruction)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
