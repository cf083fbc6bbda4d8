use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid pubkey for {field}: {value}")]
    InvalidPubkey { field: &'static str, value: String },
}

/// Deployment parameters, typically read from a JSON file. The week length is
/// always [`EPOCH_DURATION`] and cannot be configured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarvestConfig {
    /// Base58 address of the initial admin.
    pub admin: String,
    /// Base58 address that holds pooled tokens.
    pub vault: String,
    /// Base58 address of the reward token.
    pub token: String,
}

impl HarvestConfig {
    pub fn new(admin: &Account, vault: &Account, token: &Pubkey) -> Self {
        Self {
            admin: admin.to_string(),
            vault: vault.to_string(),
            token: token.to_string(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.admin()?;
        self.vault()?;
        self.token()?;
        Ok(())
    }

    pub fn admin(&self) -> Result<Account, ConfigError> {
        parse_pubkey("admin", &self.admin)
    }

    pub fn vault(&self) -> Result<Account, ConfigError> {
        parse_pubkey("vault", &self.vault)
    }

    pub fn token(&self) -> Result<Pubkey, ConfigError> {
        parse_pubkey("token", &self.token)
    }
}

fn parse_pubkey(field: &'static str, value: &str) -> Result<Pubkey, ConfigError> {
    Pubkey::from_str(value).map_err(|_| ConfigError::InvalidPubkey {
        field,
        value: value.to_string(),
    })
}
