//! API key acquisition
//!
//! The key is obtained once, before the first remote call, and never taken
//! from the command line.

use std::fmt;

use anyhow::{Context, Result};

/// Environment variable checked before prompting
pub const API_KEY_ENV: &str = "CATALOG_API_KEY";

/// Static credential sent with every request
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Trimmed key; empty keys are rejected
    pub fn new(key: impl AsRef<str>) -> Result<Self> {
        let key = key.as_ref().trim();
        if key.is_empty() {
            anyhow::bail!("API key cannot be empty");
        }
        Ok(Self(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Source of the API key
pub trait CredentialProvider {
    /// `Ok(None)` means this provider has no key to offer
    fn api_key(&self) -> Result<Option<ApiKey>>;

    /// Key or an error when none is offered
    fn resolve(&self) -> Result<ApiKey> {
        self.api_key()?.context("No API key available")
    }
}

/// Reads the key from `CATALOG_API_KEY` (a `.env` file is loaded at startup)
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl CredentialProvider for EnvCredentialProvider {
    fn api_key(&self) -> Result<Option<ApiKey>> {
        match std::env::var(API_KEY_ENV) {
            Ok(value) if !value.trim().is_empty() => {
                log::debug!("Using API key from {}", API_KEY_ENV);
                ApiKey::new(value).map(Some)
            }
            _ => Ok(None),
        }
    }
}

/// Asks on the terminal without echoing input
#[derive(Debug)]
pub struct PromptCredentialProvider {
    prompt: String,
}

impl PromptCredentialProvider {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl Default for PromptCredentialProvider {
    fn default() -> Self {
        Self::new("Enter x-api-key: ")
    }
}

impl CredentialProvider for PromptCredentialProvider {
    fn api_key(&self) -> Result<Option<ApiKey>> {
        let input = rpassword::prompt_password(&self.prompt).context("Could not read API key")?;
        ApiKey::new(input).map(Some)
    }
}

/// Fixed key
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider(pub ApiKey);

#[cfg(test)]
impl CredentialProvider for StaticCredentialProvider {
    fn api_key(&self) -> Result<Option<ApiKey>> {
        Ok(Some(self.0.clone()))
    }
}

/// Tries each provider in order and takes the first key offered
pub struct ChainedCredentialProvider {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl ChainedCredentialProvider {
    pub fn new(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self { providers }
    }

    /// Environment first, then an interactive prompt
    pub fn interactive() -> Self {
        Self::new(vec![
            Box::new(EnvCredentialProvider),
            Box::new(PromptCredentialProvider::default()),
        ])
    }
}

impl CredentialProvider for ChainedCredentialProvider {
    fn api_key(&self) -> Result<Option<ApiKey>> {
        for provider in &self.providers {
            if let Some(key) = provider.api_key()? {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }
}
