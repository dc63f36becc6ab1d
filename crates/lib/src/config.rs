//! Provider configuration.
//!
//! Hosts hand over a [`ProviderConfig`] built from whatever the user wrote.
//! [`ProviderConfig::resolve`] turns it into a [`ResolvedConfig`]: the master
//! API key comes from the configuration or, if unset there, from
//! `FLAGSMITH_MASTER_API_KEY`, and the base URL falls back to the public
//! Flagsmith API.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{DEFAULT_BASE_API_URL, MASTER_API_KEY_ENV};
use crate::field::Field;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  /// The key depends on a value that is not known until apply.
  #[error("cannot use unknown value for master_api_key")]
  UnknownApiKey,

  /// Neither the configuration nor the environment supplied a key.
  #[error("master_api_key cannot be an empty string; set it or FLAGSMITH_MASTER_API_KEY")]
  MissingApiKey,
}

/// Configuration as supplied by the user.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
  pub master_api_key: Field<String>,
  pub base_api_url: Field<String>,
}

impl fmt::Debug for ProviderConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let key = match &self.master_api_key {
      Field::Known(_) => "<redacted>",
      Field::Absent => "<absent>",
      Field::Unknown => "<unknown>",
    };
    f.debug_struct("ProviderConfig")
      .field("master_api_key", &key)
      .field("base_api_url", &self.base_api_url)
      .finish()
  }
}

/// Configuration ready to build a client from.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
  pub master_api_key: String,
  pub base_api_url: String,
}

impl fmt::Debug for ResolvedConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ResolvedConfig")
      .field("master_api_key", &"<redacted>")
      .field("base_api_url", &self.base_api_url)
      .finish()
  }
}

impl ProviderConfig {
  pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
    let master_api_key = match &self.master_api_key {
      Field::Unknown => return Err(ConfigError::UnknownApiKey),
      Field::Known(key) => key.clone(),
      Field::Absent => {
        debug!(var = MASTER_API_KEY_ENV, "master_api_key not configured, reading environment");
        std::env::var(MASTER_API_KEY_ENV).unwrap_or_default()
      }
    };

    if master_api_key.is_empty() {
      return Err(ConfigError::MissingApiKey);
    }

    let base_api_url = match &self.base_api_url {
      Field::Known(url) if !url.is_empty() => url.clone(),
      _ => DEFAULT_BASE_API_URL.to_string(),
    };

    Ok(ResolvedConfig {
      master_api_key,
      base_api_url,
    })
  }
}
