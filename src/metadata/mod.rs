//! Token metadata and USD price resolution
//!
//! Both lookups are total: a failed request degrades to a fallback symbol or
//! a missing price, never an error.

mod price;
mod token;

pub use price::CoinGeckoPriceResolver;
pub use token::{parse_metadata_account, sanitize_symbol, TokenMetadataResolver};

use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    pub mint: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
}

impl TokenMetadata {
    pub fn unknown(mint: &str) -> Self {
        Self {
            mint: mint.to_string(),
            symbol: UNKNOWN_SYMBOL.to_string(),
            name: None,
            logo_uri: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.symbol == UNKNOWN_SYMBOL
    }
}

#[async_trait]
pub trait TokenMetadataLookup: Send + Sync {
    async fn resolve(&self, mint: &str) -> TokenMetadata;

    /// Resolve each distinct mint once, concurrently
    async fn resolve_many(&self, mints: &[String]) -> HashMap<String, TokenMetadata> {
        let unique: HashSet<&str> = mints.iter().map(String::as_str).collect();
        join_all(unique.into_iter().map(|mint| self.resolve(mint)))
            .await
            .into_iter()
            .map(|meta| (meta.mint.clone(), meta))
            .collect()
    }
}

#[async_trait]
pub trait PriceLookup: Send + Sync {
    /// USD price per mint. Mints without a known price are absent.
    async fn usd_prices(&self, mints: &[String]) -> HashMap<String, f64>;
}
