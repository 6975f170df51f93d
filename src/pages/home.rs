//! The demoqa landing page with its category cards.

use anyhow::Result;
use tokio::time::sleep;

use crate::client::AutomationClient;
use crate::pages::PAGE_SETTLE;

pub struct HomePage<'a> {
    client: &'a mut AutomationClient,
}

impl<'a> HomePage<'a> {
    pub fn new(client: &'a mut AutomationClient) -> Self {
        Self { client }
    }

    /// Open the site root and let the landing page settle.
    pub async fn open(&mut self) -> Result<()> {
        let url = self.client.config().base_url.clone();
        self.client.open(&url).await?;
        sleep(PAGE_SETTLE).await;
        Ok(())
    }

    pub async fn click_elements_card(&mut self) -> Result<()> {
        self.client
            .run_action("Click on \"Elements\" card or button on the homepage")
            .await?;
        sleep(PAGE_SETTLE).await;
        Ok(())
    }

    pub async fn click_forms_card(&mut self) -> Result<()> {
        self.client
            .run_action("Click on \"Forms\" card or button on the homepage")
            .await?;
        sleep(PAGE_SETTLE).await;
        Ok(())
    }

    pub async fn verify_loaded(&mut self) -> Result<()> {
        self.client
            .run_action(
                "Verify that the DemoQA homepage with various category cards (Elements, Forms, etc.) is visible",
            )
            .await
    }
}
