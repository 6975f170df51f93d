//! The Forms > Practice Form student registration page.

use anyhow::Result;
use colored::Colorize;
use tokio::time::sleep;

use crate::client::AutomationClient;
use crate::pages::{resolve_relative_date, split_values, FORM_FIELD_DELAY, PAGE_SETTLE, VERIFY_WAIT};

pub struct PracticeFormPage<'a> {
    client: &'a mut AutomationClient,
}

impl<'a> PracticeFormPage<'a> {
    pub fn new(client: &'a mut AutomationClient) -> Self {
        Self { client }
    }

    /// Reach the Practice Form from the left navigation panel.
    pub async fn open_from_side_panel(&mut self) -> Result<()> {
        self.client
            .run_action("Click on \"Practice Form\" in the left panel")
            .await?;
        sleep(PAGE_SETTLE).await;
        Ok(())
    }

    /// Fill the registration form from (field, value) rows. A value of
    /// "N years ago from today" becomes a concrete ISO date first.
    pub async fn fill_form(&mut self, rows: &[(String, String)]) -> Result<()> {
        for (field, value) in rows {
            let value = resolve_relative_date(value);
            self.fill_field(field, &value).await?;
        }
        Ok(())
    }

    /// One field of the registration form. Subjects and Hobbies take
    /// comma-separated values and get one action per entry.
    pub async fn fill_field(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "Gender" => {
                self.run_step(&format!("Select \"{value}\" gender option"))
                    .await?;
            }
            "Date of Birth" => {
                self.run_step(&format!("Set date of birth to \"{value}\""))
                    .await?;
            }
            "Subjects" => {
                for subject in split_values(value) {
                    self.run_step(&format!("Add \"{subject}\" to subjects"))
                        .await?;
                }
            }
            "Hobbies" => {
                for hobby in split_values(value) {
                    self.run_step(&format!("Select \"{hobby}\" hobby")).await?;
                }
            }
            "State" => {
                self.run_step(&format!("Select \"{value}\" from State dropdown"))
                    .await?;
            }
            "City" => {
                self.run_step(&format!("Select \"{value}\" from City dropdown"))
                    .await?;
            }
            _ => {
                self.run_step(&format!("Fill the \"{field}\" field with \"{value}\""))
                    .await?;
            }
        }
        Ok(())
    }

    pub async fn submit(&mut self) -> Result<()> {
        self.client.run_action("Click the Submit button").await?;
        sleep(PAGE_SETTLE).await;
        Ok(())
    }

    /// Check for the confirmation modal. A miss is logged and swallowed.
    pub async fn verify_confirmation(&mut self) {
        sleep(VERIFY_WAIT).await;
        if let Err(e) = self
            .client
            .run_action("Verify that the form submission confirmation is displayed")
            .await
        {
            println!(
                "{} Could not verify form confirmation: {}",
                "⚠️".yellow(),
                e
            );
        }
    }

    pub async fn verify_loaded(&mut self) -> Result<()> {
        self.client
            .run_action(
                "Verify that the Student Registration Form with First Name, Last Name, Email fields is visible",
            )
            .await
    }

    async fn run_step(&mut self, instruction: &str) -> Result<()> {
        self.client.run_action(instruction).await?;
        sleep(FORM_FIELD_DELAY).await;
        Ok(())
    }
}
