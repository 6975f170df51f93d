use std::time::Duration;

use cucumber::gherkin::Step;
use cucumber::{then, when};
use regex::Regex;

use wisp_tester::pages;

use crate::world::TestWorld;

const FIELD_TIMEOUT: Duration = Duration::from_secs(15);

#[when("I fill in the student registration form with:")]
async fn fill_registration_form(world: &mut TestWorld, step: &Step) {
    println!("📝 Filling in student registration form...");

    let years_ago = Regex::new(r"(\d+)\s+years ago").expect("valid years-ago pattern");
    let client = world.client().expect("no active client");

    if let Some(table) = step.table.as_ref() {
        for row in &table.rows {
            let (field, value) = match row.as_slice() {
                [field, value, ..] => (field.as_str(), value.as_str()),
                _ => continue,
            };

            let mut resolved = value.to_string();
            if field == "Date of Birth" && value.contains("years ago from today") {
                if let Some(years) = years_ago
                    .captures(value)
                    .and_then(|caps| caps[1].parse::<i32>().ok())
                {
                    resolved = pages::date_years_ago(years);
                    println!("  Processing date: {} -> {}", value, resolved);
                }
            }

            println!("  Filling {}: {}", field, resolved);

            let instruction = match field {
                "Gender" => format!(
                    "Find and select the gender option \"{}\". Look for radio buttons or dropdown with gender options.",
                    resolved
                ),
                "Date of Birth" => format!(
                    "Find the date of birth field and enter the date \"{}\". This might be a date picker or text input field.",
                    resolved
                ),
                "Subjects" => format!(
                    "Find the subjects field and enter or select \"{}\". This might be a multi-select dropdown or autocomplete field.",
                    resolved
                ),
                "Hobbies" => format!(
                    "Find and select the hobby checkboxes for \"{}\". Look for checkbox options related to hobbies.",
                    resolved
                ),
                "State" => format!("Find the state/region dropdown and select \"{}\".", resolved),
                "City" => format!("Find the city dropdown and select \"{}\".", resolved),
                _ => format!(
                    "Find the input field labeled \"{}\" and enter the text \"{}\". Look for text input, textarea, or form field with this label.",
                    field, resolved
                ),
            };

            client
                .run_action_with_timeout(&instruction, FIELD_TIMEOUT)
                .await
                .expect("form fill failed");
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }

    println!("✅ Student registration form filled successfully");
}

#[then("I should see the registration confirmation")]
async fn see_registration_confirmation(world: &mut TestWorld) {
    println!("🔍 Verifying registration confirmation...");

    let client = world.client().expect("no active client");
    tokio::time::sleep(Duration::from_secs(4)).await;
    client
        .run_action_with_timeout(
            "Look for a registration confirmation modal, popup, or message that shows the submitted student information. This might be a success message or summary of entered data.",
            FIELD_TIMEOUT,
        )
        .await
        .expect("could not verify the registration confirmation");

    println!("✅ Registration confirmation verification completed");
}
