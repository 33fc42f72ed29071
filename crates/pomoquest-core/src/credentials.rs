//! API key lookup for the text-generation service.
//!
//! Order: `provider.api_key` in the config file, then `GEMINI_API_KEY`, then
//! the OS keyring (when `provider.keyring` is on). Blank values count as
//! absent.

use crate::config::ProviderConfig;
use crate::error::CoreError;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const API_KEY_ENTRY: &str = "gemini_api_key";

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    const SERVICE: &str = "pomoquest";

    pub fn get(key: &str) -> Result<Option<String>, keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)
    }

    pub fn delete(key: &str) -> Result<(), keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Where a resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Config,
    Environment,
    Keyring,
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            KeySource::Config => "config file",
            KeySource::Environment => API_KEY_ENV,
            KeySource::Keyring => "OS keyring",
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Find the API key and report where it came from.
pub fn locate_api_key(cfg: &ProviderConfig) -> Option<(String, KeySource)> {
    if let Some(key) = non_blank(cfg.api_key.clone()) {
        return Some((key, KeySource::Config));
    }
    if let Some(key) = non_blank(std::env::var(API_KEY_ENV).ok()) {
        return Some((key, KeySource::Environment));
    }
    if !cfg.keyring {
        return None;
    }
    match keyring_store::get(API_KEY_ENTRY) {
        Ok(stored) => non_blank(stored).map(|key| (key, KeySource::Keyring)),
        Err(e) => {
            tracing::debug!(error = %e, "keyring lookup failed");
            None
        }
    }
}

pub fn resolve_api_key(cfg: &ProviderConfig) -> Option<String> {
    locate_api_key(cfg).map(|(key, _)| key)
}

/// Store `key` in the OS keyring.
pub fn store_api_key(key: &str) -> Result<(), CoreError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(crate::error::ValidationError::Empty { field: "api key" }.into());
    }
    keyring_store::set(API_KEY_ENTRY, key)?;
    Ok(())
}

pub fn clear_api_key() -> Result<(), CoreError> {
    keyring_store::delete(API_KEY_ENTRY)?;
    Ok(())
}
