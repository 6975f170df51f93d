//! The Elements > Text Box form.

use anyhow::Result;
use colored::Colorize;
use tokio::time::sleep;

use crate::client::AutomationClient;
use crate::pages::{FIELD_DELAY, PAGE_SETTLE, VERIFY_WAIT};

pub struct TextBoxPage<'a> {
    client: &'a mut AutomationClient,
}

impl<'a> TextBoxPage<'a> {
    pub fn new(client: &'a mut AutomationClient) -> Self {
        Self { client }
    }

    /// Reach the Text Box form from the left navigation panel.
    pub async fn open_from_side_panel(&mut self) -> Result<()> {
        self.client
            .run_action("Click on \"Text Box\" in the left panel")
            .await?;
        sleep(PAGE_SETTLE).await;
        Ok(())
    }

    /// Fill one labeled field. Empty values are skipped with a warning.
    pub async fn fill_field(&mut self, field: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            println!(
                "{} Skipping empty value for field '{}'",
                "⚠️".yellow(),
                field
            );
            return Ok(());
        }
        self.client
            .run_action(&format!("Fill the \"{field}\" field with \"{value}\""))
            .await?;
        sleep(FIELD_DELAY).await;
        Ok(())
    }

    pub async fn submit(&mut self) -> Result<()> {
        self.client.run_action("Click the Submit button").await?;
        sleep(PAGE_SETTLE).await;
        Ok(())
    }

    /// Check that the submitted output block is shown. The output only
    /// renders when at least one field was filled, so a miss is logged
    /// and swallowed.
    pub async fn verify_submitted_output(&mut self) {
        sleep(VERIFY_WAIT).await;
        if let Err(e) = self
            .client
            .run_action("Verify that the submitted form information is displayed on the page")
            .await
        {
            println!(
                "{} Could not verify submitted output: {}",
                "⚠️".yellow(),
                e
            );
        }
    }

    pub async fn verify_loaded(&mut self) -> Result<()> {
        self.client
            .run_action(
                "Verify that the Text Box form with Full Name, Email, Current Address, and Permanent Address fields is visible",
            )
            .await
    }
}
