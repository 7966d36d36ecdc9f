//! Engine settings: collaborator endpoints, cache lifetimes and scan limits

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::{EngineError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub token_list_url: String,
    /// CoinGecko-compatible API root, without a trailing slash
    pub price_api_url: String,
    pub symbol_cache_ttl_secs: u64,
    pub token_list_ttl_secs: u64,
    pub price_ttl_secs: u64,
    pub http_timeout_secs: u64,
    pub history_max_signatures: usize,
    pub history_batch_size: usize,
    pub profile_signature_limit: usize,
    /// Campaign export to read instead of the built-in list
    pub rules_file: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            token_list_url: "https://token.jup.ag/strict".to_string(),
            price_api_url: "https://api.coingecko.com/api/v3".to_string(),
            symbol_cache_ttl_secs: 60 * 60 * 12,
            token_list_ttl_secs: 60 * 30,
            price_ttl_secs: 60 * 5,
            http_timeout_secs: 10,
            history_max_signatures: 100,
            history_batch_size: 20,
            profile_signature_limit: 100,
            rules_file: None,
        }
    }
}

impl EngineConfig {
    /// Defaults overlaid with any `AIRDROP_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("AIRDROP_TOKEN_LIST_URL") {
            config.token_list_url = url;
        }
        if let Some(url) = lookup("AIRDROP_PRICE_API_URL") {
            config.price_api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(path) = lookup("AIRDROP_RULES_FILE") {
            config.rules_file = Some(PathBuf::from(path));
        }

        overlay(&lookup, "AIRDROP_SYMBOL_CACHE_TTL_SECS", &mut config.symbol_cache_ttl_secs)?;
        overlay(&lookup, "AIRDROP_TOKEN_LIST_TTL_SECS", &mut config.token_list_ttl_secs)?;
        overlay(&lookup, "AIRDROP_PRICE_TTL_SECS", &mut config.price_ttl_secs)?;
        overlay(&lookup, "AIRDROP_HTTP_TIMEOUT_SECS", &mut config.http_timeout_secs)?;
        overlay(&lookup, "AIRDROP_HISTORY_MAX_SIGNATURES", &mut config.history_max_signatures)?;
        overlay(&lookup, "AIRDROP_HISTORY_BATCH_SIZE", &mut config.history_batch_size)?;
        overlay(&lookup, "AIRDROP_PROFILE_SIGNATURE_LIMIT", &mut config.profile_signature_limit)?;

        if config.history_batch_size == 0 {
            return Err(EngineError::Config(
                "AIRDROP_HISTORY_BATCH_SIZE must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn symbol_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.symbol_cache_ttl_secs)
    }

    pub fn token_list_ttl(&self) -> Duration {
        Duration::from_secs(self.token_list_ttl_secs)
    }

    pub fn price_ttl(&self) -> Duration {
        Duration::from_secs(self.price_ttl_secs)
    }

    /// Shared HTTP client for every outbound collaborator
    pub fn http_client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .timeout(Duration::from_secs(self.http_timeout_secs))
            .build()?)
    }
}

fn overlay<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    target: &mut T,
) -> Result<()> {
    if let Some(raw) = lookup(key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|_| EngineError::Config(format!("{} is not a valid number: {:?}", key, raw)))?;
    }
    Ok(())
}
