//! Playwright-backed browser session.
//!
//! Owns the chromium process, context and page for one test run. The page
//! sits behind a tokio mutex so directive execution is serialized even
//! when the session is shared.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use playwright::api::{Browser, BrowserContext, Page, ScreenshotType, Viewport};
use playwright::Playwright;
use tokio::sync::Mutex;

use crate::agent::Directive;

const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);
const VERIFY_SELECTOR_TIMEOUT_MS: f64 = 5_000.0;
const SELECT_SETTLE: Duration = Duration::from_millis(300);

const BROWSER_ARGS: &[&str] = &[
    "--start-fullscreen",
    "--start-maximized",
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-web-security",
    "--allow-running-insecure-content",
];

/// Collects a compact outline of the visible interactive elements, one
/// element per line, capped so the planner prompt stays small.
const OUTLINE_JS: &str = r##"() => {
    const rows = [];
    const visible = (el) => {
        const style = window.getComputedStyle(el);
        if (style.display === 'none' || style.visibility === 'hidden') return false;
        const rect = el.getBoundingClientRect();
        return rect.width > 0 && rect.height > 0;
    };
    const labelFor = (el) => {
        if (el.labels && el.labels.length > 0) return el.labels[0].innerText.trim();
        return (el.getAttribute('aria-label') || '').trim();
    };
    const candidates = document.querySelectorAll(
        'a, button, input, textarea, select, label, [role], [onclick]'
    );
    for (const el of candidates) {
        if (rows.length >= 120) break;
        if (!visible(el)) continue;
        let sel = el.tagName.toLowerCase();
        if (el.id) {
            sel += '#' + el.id;
        } else if (el.getAttribute('name')) {
            sel += '[name="' + el.getAttribute('name') + '"]';
        } else if (el.getAttribute('placeholder')) {
            sel += '[placeholder="' + el.getAttribute('placeholder') + '"]';
        }
        const kind = el.getAttribute('type') || el.getAttribute('role') || '';
        const label = labelFor(el);
        const text = (el.innerText || el.value || '')
            .trim()
            .replace(/\s+/g, ' ')
            .slice(0, 60);
        let row = sel;
        if (kind) row += ' (' + kind + ')';
        if (label) row += ' label: ' + label;
        if (text) row += ' text: ' + text;
        rows.push(row);
    }
    return rows.join('\n');
}"##;

/// One launched chromium instance with a single active page. The driver
/// handles are kept alive here; dropping them closes the browser.
pub struct BrowserSession {
    #[allow(dead_code)]
    playwright: Arc<Playwright>,
    #[allow(dead_code)]
    browser: Arc<Browser>,
    #[allow(dead_code)]
    context: Arc<BrowserContext>,
    page: Arc<Mutex<Page>>,
    closed: AtomicBool,
}

impl BrowserSession {
    /// Launch chromium and open a fresh context and page.
    pub async fn launch(headless: bool) -> Result<Self> {
        let playwright = Playwright::initialize()
            .await
            .context("Failed to initialize Playwright")?;

        let chromium = playwright.chromium();
        let mut launcher = chromium.launcher().headless(headless);

        let executable = std::env::var("PLAYWRIGHT_CHROMIUM_EXECUTABLE_PATH")
            .ok()
            .map(PathBuf::from);
        if let Some(ref path) = executable {
            println!("{} Using browser from env: {}", "🌐".blue(), path.display());
            launcher = launcher.executable(path);
        }

        let args: Vec<String> = BROWSER_ARGS.iter().map(|s| s.to_string()).collect();
        launcher = launcher.args(&args);

        let browser = launcher
            .launch()
            .await
            .context("Failed to launch chromium")?;
        let context = browser.context_builder().build().await?;
        let page = context.new_page().await?;

        Ok(Self {
            playwright: Arc::new(playwright),
            browser: Arc::new(browser),
            context: Arc::new(context),
            page: Arc::new(Mutex::new(page)),
            closed: AtomicBool::new(false),
        })
    }

    /// Navigate to a URL and wait for the DOM to be ready.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        let page = self.page.lock().await;
        match tokio::time::timeout(NAVIGATION_TIMEOUT, page.goto_builder(url).goto()).await {
            Ok(result) => {
                result.with_context(|| format!("Failed to navigate to {url}"))?;
            }
            Err(_) => bail!(
                "Navigation to {} timed out after {}s",
                url,
                NAVIGATION_TIMEOUT.as_secs()
            ),
        }
        page.bring_to_front().await.ok();
        Ok(())
    }

    /// Summarize the page's interactive elements for the planner.
    pub async fn outline(&self) -> Result<String> {
        let page = self.page.lock().await;
        let outline: String = page.evaluate(OUTLINE_JS, ()).await?;
        Ok(outline)
    }

    /// Execute one concrete directive against the page.
    pub async fn perform(&self, directive: &Directive) -> Result<()> {
        let page = self.page.lock().await;
        match directive {
            Directive::Click { selector } => {
                page.click_builder(selector)
                    .click()
                    .await
                    .with_context(|| format!("Failed to click '{selector}'"))?;
            }
            Directive::Fill { selector, value } => match page.query_selector(selector).await? {
                Some(el) => {
                    el.fill_builder(value)
                        .fill()
                        .await
                        .with_context(|| format!("Failed to fill '{selector}'"))?;
                }
                None => bail!("No element matched selector '{}'", selector),
            },
            Directive::Select { selector, value } => {
                // Combo widgets open on click and filter as you type
                page.click_builder(selector)
                    .click()
                    .await
                    .with_context(|| format!("Failed to open '{selector}'"))?;
                page.keyboard.input_text(value).await?;
                tokio::time::sleep(SELECT_SETTLE).await;
                page.keyboard.down("Enter").await?;
                page.keyboard.up("Enter").await?;
            }
            Directive::Check { selector } => {
                page.click_builder(selector)
                    .click()
                    .await
                    .with_context(|| format!("Failed to check '{selector}'"))?;
            }
            Directive::Press { key } => {
                page.keyboard.down(key).await?;
                page.keyboard.up(key).await?;
            }
            Directive::Verify { selector, text } => {
                if selector.is_none() && text.is_none() {
                    bail!("Verify directive carried neither selector nor text");
                }
                if let Some(sel) = selector {
                    let found = page
                        .wait_for_selector_builder(sel)
                        .timeout(VERIFY_SELECTOR_TIMEOUT_MS)
                        .wait_for_selector()
                        .await
                        .is_ok();
                    if !found {
                        bail!("Expected element '{}' did not appear", sel);
                    }
                }
                if let Some(expected) = text {
                    let html = page.content().await?;
                    if !html.contains(expected.as_str()) {
                        bail!("Expected text '{}' not found on page", expected);
                    }
                }
            }
        }
        Ok(())
    }

    /// Resize the page viewport.
    pub async fn set_viewport(&self, width: u32, height: u32) -> Result<()> {
        let page = self.page.lock().await;
        page.set_viewport_size(Viewport {
            width: width as i32,
            height: height as i32,
        })
        .await?;
        Ok(())
    }

    /// Full-page PNG capture as raw bytes.
    pub async fn screenshot_bytes(&self) -> Result<Vec<u8>> {
        let page = self.page.lock().await;
        let bytes = page
            .screenshot_builder()
            .r#type(ScreenshotType::Png)
            .screenshot()
            .await?;
        Ok(bytes)
    }

    /// Park the page and mark the session closed. The chromium process
    /// itself goes away when the session is dropped.
    pub async fn shutdown(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        let page = self.page.lock().await;
        page.goto_builder("about:blank").goto().await.ok();
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
