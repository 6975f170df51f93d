//! LLM action planning.
//!
//! Turns one natural-language instruction plus a page outline into exactly
//! one [`Directive`]. Speaks the OpenAI-compatible chat completions format
//! (groq, openai, azure) and the Anthropic messages format; the remaining
//! catalog providers are selectable but rejected here.

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::agent::Directive;
use crate::config::providers::{Provider, ProviderCredentials};
use crate::error::HarnessError;

const MAX_COMPLETION_TOKENS: u32 = 200;
const ANTHROPIC_VERSION: &str = "2023-06-01";

const SYSTEM_PROMPT: &str = "\
You are the action planner inside a browser test agent. You receive a test \
instruction and an outline of the interactive elements currently on the \
page. Choose the single next action and answer with exactly one JSON \
object, nothing else.

Actions:
  {\"action\":\"click\",\"selector\":\"<css>\"}
  {\"action\":\"fill\",\"selector\":\"<css>\",\"value\":\"<text>\"}
  {\"action\":\"select\",\"selector\":\"<css>\",\"value\":\"<text>\"}
  {\"action\":\"check\",\"selector\":\"<css>\"}
  {\"action\":\"press\",\"key\":\"<key name>\"}
  {\"action\":\"verify\",\"selector\":\"<css>\"}
  {\"action\":\"verify\",\"text\":\"<page text fragment>\"}

Prefer id selectors when the outline shows one. Use \"select\" for \
dropdowns and autocomplete widgets. Use \"verify\" only when the \
instruction asks to check, verify, or look for something.";

/// Plans directives by calling the configured provider.
pub struct ActionPlanner {
    credentials: ProviderCredentials,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    #[serde(default)]
    text: Option<String>,
}

impl ActionPlanner {
    pub fn new(credentials: ProviderCredentials) -> Self {
        Self {
            credentials,
            client: reqwest::Client::new(),
        }
    }

    /// Ask the model for the next action.
    pub async fn plan(&self, instruction: &str, outline: &str) -> Result<Directive> {
        let user = format!("Instruction: {instruction}\n\nInteractive elements:\n{outline}");

        let raw = match self.credentials.provider {
            Provider::Groq | Provider::OpenAi | Provider::Azure => {
                self.complete_chat(&user).await?
            }
            Provider::Anthropic => self.complete_anthropic(&user).await?,
            other => {
                return Err(HarnessError::UnsupportedProvider {
                    provider: other.name().to_string(),
                }
                .into())
            }
        };

        debug!(
            "planner reply from {}: {}",
            self.credentials.provider,
            snippet(&raw)
        );
        parse_directive(&raw, self.credentials.provider.name())
    }

    async fn complete_chat(&self, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.credentials.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.0,
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        let response = self
            .client
            .post(self.endpoint()?)
            .header(
                "Authorization",
                format!("Bearer {}", self.credentials.api_key),
            )
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(HarnessError::ApiError {
                provider: self.credentials.provider.name().to_string(),
                status,
                message,
            }
            .into());
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                HarnessError::ParseError {
                    provider: self.credentials.provider.name().to_string(),
                    message: "response contained no choices".to_string(),
                }
                .into()
            })
    }

    async fn complete_anthropic(&self, user: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: &self.credentials.model,
            max_tokens: MAX_COMPLETION_TOKENS,
            temperature: 0.0,
            system: SYSTEM_PROMPT,
            messages: vec![ChatMessage {
                role: "user",
                content: user,
            }],
        };

        let response = self
            .client
            .post(self.endpoint()?)
            .header("x-api-key", &self.credentials.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(HarnessError::ApiError {
                provider: self.credentials.provider.name().to_string(),
                status,
                message,
            }
            .into());
        }

        let body: AnthropicResponse = response.json().await?;
        body.content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| {
                HarnessError::ParseError {
                    provider: self.credentials.provider.name().to_string(),
                    message: "response contained no text blocks".to_string(),
                }
                .into()
            })
    }

    fn endpoint(&self) -> Result<&str> {
        self.credentials.endpoint.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "no completion endpoint configured for provider '{}'",
                self.credentials.provider
            )
        })
    }
}

/// Parse a model reply into a directive, tolerating fences and prose
/// around the JSON object.
pub fn parse_directive(raw: &str, provider: &str) -> Result<Directive> {
    serde_json::from_str(extract_json(raw)).map_err(|e| {
        HarnessError::ParseError {
            provider: provider.to_string(),
            message: format!("{} in reply: {}", e, snippet(raw)),
        }
        .into()
    })
}

fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

fn snippet(raw: &str) -> String {
    const MAX_CHARS: usize = 160;
    let flat = raw.trim().replace('\n', " ");
    if flat.chars().count() > MAX_CHARS {
        let cut: String = flat.chars().take(MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let directive =
            parse_directive(r#"{"action": "click", "selector": "#submit"}"#, "groq").unwrap();
        assert_eq!(
            directive,
            Directive::Click {
                selector: "#submit".to_string()
            }
        );
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "```json\n{\"action\": \"fill\", \"selector\": \"#userName\", \"value\": \"Jane\"}\n```";
        let directive = parse_directive(raw, "groq").unwrap();
        assert_eq!(
            directive,
            Directive::Fill {
                selector: "#userName".to_string(),
                value: "Jane".to_string()
            }
        );
    }

    #[test]
    fn test_parse_json_wrapped_in_prose() {
        let raw = "Sure, the next action is: {\"action\": \"press\", \"key\": \"Enter\"} which submits the form.";
        let directive = parse_directive(raw, "openai").unwrap();
        assert_eq!(
            directive,
            Directive::Press {
                key: "Enter".to_string()
            }
        );
    }

    #[test]
    fn test_parse_garbage_reports_provider() {
        let err = parse_directive("I cannot help with that.", "anthropic").unwrap_err();
        match err.downcast_ref::<HarnessError>() {
            Some(HarnessError::ParseError { provider, .. }) => assert_eq!(provider, "anthropic"),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_snippet_truncates_long_replies() {
        let long = "x".repeat(500);
        let s = snippet(&long);
        assert!(s.chars().count() <= 163);
        assert!(s.ends_with("..."));
    }
}
