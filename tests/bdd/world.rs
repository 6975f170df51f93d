use anyhow::{bail, Result};
use cucumber::World;

use wisp_tester::client::AutomationClient;
use wisp_tester::config::TestConfig;

/// Per-scenario state shared across step definitions. The client is created
/// lazily by the first navigation step and torn down after every scenario.
#[derive(Debug, Default, World)]
pub struct TestWorld {
    pub config: TestConfig,
    pub client: Option<AutomationClient>,
}

impl TestWorld {
    /// Returns the automation client, launching and initializing it on first use.
    pub async fn client_or_init(&mut self) -> Result<&mut AutomationClient> {
        if self.client.is_none() {
            println!("Creating new automation client...");
            let mut client = AutomationClient::new(self.config.clone());
            client.initialize().await?;
            self.client = Some(client);
        }
        Ok(self.client.as_mut().expect("client was just stored"))
    }

    /// Returns the client created by an earlier navigation step.
    pub fn client(&mut self) -> Result<&mut AutomationClient> {
        match self.client {
            Some(ref mut client) => Ok(client),
            None => bail!("Client not initialized. Navigate to a page first."),
        }
    }
}

/// After-scenario hook: closes the browser session and clears the slot no
/// matter how the scenario ended.
pub async fn teardown(world: Option<&mut TestWorld>) {
    let world = match world {
        Some(world) => world,
        None => return,
    };

    println!("🧹 Cleaning up browser client...");
    match world.client.as_mut() {
        Some(client) => {
            client.close().await;
            println!("✅ Browser client closed");
        }
        None => println!("No client to clean up"),
    }
    world.client = None;
}
