use std::time::Duration;

use cucumber::{given, when};

use crate::world::TestWorld;

const CLICK_TIMEOUT: Duration = Duration::from_secs(20);
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(15);

#[given(expr = "I navigate to {string}")]
async fn navigate_to(world: &mut TestWorld, url: String) {
    println!("🌐 Navigating to: {}", url);

    let client = world
        .client_or_init()
        .await
        .expect("could not initialize the automation client");
    client.open(&url).await.expect("could not open the page");

    println!("✅ Navigation completed");
}

#[when(expr = "I click on {string}")]
async fn click_on(world: &mut TestWorld, element: String) {
    println!("🖱️ Clicking on: {}", element);

    let client = world.client().expect("no active client");
    let instruction = format!(
        "Find and click on the clickable element that contains the text \"{}\". Look for buttons, links, or clickable areas with this text.",
        element
    );
    client
        .run_action_with_timeout(&instruction, CLICK_TIMEOUT)
        .await
        .expect("click action failed");
    tokio::time::sleep(Duration::from_secs(1)).await;

    println!("✅ Clicked on: {}", element);
}

#[when(expr = "I click on {string} in the left panel")]
async fn click_in_left_panel(world: &mut TestWorld, element: String) {
    println!("🖱️ Clicking on \"{}\" in the left panel", element);

    let client = world.client().expect("no active client");
    let instruction = format!(
        "In the left sidebar or left navigation panel, find and click on \"{}\". This should be a menu item or navigation link.",
        element
    );
    client
        .run_action_with_timeout(&instruction, CLICK_TIMEOUT)
        .await
        .expect("left panel click failed");
    tokio::time::sleep(Duration::from_secs(1)).await;

    println!("✅ Clicked on: {} in left panel", element);
}

#[when("I click submit")]
async fn click_submit(world: &mut TestWorld) {
    println!("🖱️ Clicking submit button");

    let client = world.client().expect("no active client");
    client
        .run_action_with_timeout(
            "Find and click the Submit button on the form. Look for a button with text \"Submit\" or similar submit action.",
            SUBMIT_TIMEOUT,
        )
        .await
        .expect("submit click failed");
    tokio::time::sleep(Duration::from_secs(2)).await;

    println!("✅ Submit button clicked");
}
