//! AI provider catalog and credential resolution.
//!
//! Maps a configured provider name to its model, API key variable, and
//! endpoint. Name lookup is total: unknown names fall back to the default
//! provider with a warning. A missing API key for the selected provider is
//! fatal and surfaces as [`HarnessError::MissingApiKey`].

use anyhow::Result;
use log::warn;
use std::fmt;

use crate::error::HarnessError;

pub const DEFAULT_PROVIDER: Provider = Provider::Groq;

/// Supported AI providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Groq,
    OpenAi,
    Anthropic,
    Aws,
    Azure,
    Google,
}

/// Static metadata for one provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderProfile {
    /// Model identifier sent with every request
    pub model: &'static str,
    /// Environment variable holding the API key
    pub key_var: &'static str,
    /// Fixed completion endpoint, if the provider has one
    pub endpoint: Option<&'static str>,
    /// Environment variable holding the endpoint, for providers without a
    /// fixed one
    pub endpoint_var: Option<&'static str>,
}

/// Credentials resolved from the environment, ready for the planner.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub provider: Provider,
    pub model: String,
    pub api_key: String,
    pub endpoint: Option<String>,
}

impl Provider {
    /// Parse a provider name. Unknown names fall back to the default
    /// provider so that lookup never fails.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "groq" => Provider::Groq,
            "openai" => Provider::OpenAi,
            "anthropic" => Provider::Anthropic,
            "aws" => Provider::Aws,
            "azure" => Provider::Azure,
            "google" => Provider::Google,
            other => {
                warn!(
                    "unknown AI provider '{}', falling back to '{}'",
                    other, DEFAULT_PROVIDER
                );
                DEFAULT_PROVIDER
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Groq => "groq",
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Aws => "aws",
            Provider::Azure => "azure",
            Provider::Google => "google",
        }
    }

    pub fn profile(&self) -> ProviderProfile {
        match self {
            Provider::Groq => ProviderProfile {
                model: "llama-3.1-8b-instant",
                key_var: "GROQ_API_KEY",
                endpoint: Some("https://api.groq.com/openai/v1/chat/completions"),
                endpoint_var: None,
            },
            Provider::OpenAi => ProviderProfile {
                model: "gpt-4",
                key_var: "OPENAI_API_KEY",
                endpoint: Some("https://api.openai.com/v1/chat/completions"),
                endpoint_var: None,
            },
            Provider::Anthropic => ProviderProfile {
                model: "claude-3-sonnet-20240229",
                key_var: "ANTHROPIC_API_KEY",
                endpoint: Some("https://api.anthropic.com/v1/messages"),
                endpoint_var: None,
            },
            Provider::Aws => ProviderProfile {
                model: "anthropic.claude-3-sonnet-20240229-v1:0",
                key_var: "AWS_ACCESS_KEY_ID",
                endpoint: None,
                endpoint_var: None,
            },
            Provider::Azure => ProviderProfile {
                model: "gpt-4",
                key_var: "AZURE_OPENAI_API_KEY",
                endpoint: None,
                endpoint_var: Some("AZURE_OPENAI_ENDPOINT"),
            },
            Provider::Google => ProviderProfile {
                model: "gemini-pro",
                key_var: "GOOGLE_GENAI_API_KEY",
                endpoint: None,
                endpoint_var: None,
            },
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve the named provider's credentials from the environment.
pub fn resolve(name: &str) -> Result<ProviderCredentials> {
    let provider = Provider::from_name(name);
    let profile = provider.profile();

    let api_key = std::env::var(profile.key_var)
        .ok()
        .filter(|key| !key.trim().is_empty());

    let api_key = match api_key {
        Some(key) => key,
        None => {
            return Err(HarnessError::MissingApiKey {
                provider: provider.name().to_string(),
                key_var: profile.key_var.to_string(),
            }
            .into())
        }
    };

    let endpoint = profile
        .endpoint
        .map(str::to_string)
        .or_else(|| profile.endpoint_var.and_then(|var| std::env::var(var).ok()));

    Ok(ProviderCredentials {
        provider,
        model: profile.model.to_string(),
        api_key,
        endpoint,
    })
}
