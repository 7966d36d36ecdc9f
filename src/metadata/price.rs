use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use super::PriceLookup;
use crate::chain::NATIVE_MINT;
use crate::config::EngineConfig;
use crate::utils::{Result, TtlCache};

const SOL_KEY: &str = "solana";

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: Option<f64>,
}

/// USD prices from a CoinGecko-compatible API, cached per mint
pub struct CoinGeckoPriceResolver {
    client: Client,
    base_url: String,
    cache: TtlCache<String, f64>,
}

impl CoinGeckoPriceResolver {
    pub fn new(client: Client, config: &EngineConfig) -> Self {
        Self {
            client,
            base_url: config.price_api_url.trim_end_matches('/').to_string(),
            cache: TtlCache::new(config.price_ttl()),
        }
    }

    /// Spot SOL price, `None` when the API is unavailable
    pub async fn sol_price_usd(&self) -> Option<f64> {
        let key = SOL_KEY.to_string();
        if let Some(price) = self.cache.get(&key) {
            return Some(price);
        }

        match self.fetch_sol_price().await {
            Ok(Some(price)) => {
                self.cache.insert(key, price);
                Some(price)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("SOL price unavailable: {}", e);
                None
            }
        }
    }

    async fn fetch_sol_price(&self) -> Result<Option<f64>> {
        let url = format!("{}/simple/price", self.base_url);
        let quotes: HashMap<String, UsdQuote> = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .query(&[("ids", SOL_KEY), ("vs_currencies", "usd")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(quotes.get(SOL_KEY).and_then(|quote| quote.usd))
    }

    /// One request for every mint missing from the cache. The API keys
    /// its response by lower-cased contract address.
    async fn fetch_token_prices(&self, mints: &[&str]) -> Result<HashMap<String, f64>> {
        let url = format!("{}/simple/token_price/solana", self.base_url);
        let addresses = mints.join(",");

        tracing::debug!("Fetching USD prices for {} mints", mints.len());

        let quotes: HashMap<String, UsdQuote> = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .query(&[("contract_addresses", addresses.as_str()), ("vs_currencies", "usd")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(mints
            .iter()
            .filter_map(|mint| {
                let usd = quotes.get(&mint.to_lowercase())?.usd?;
                Some((mint.to_string(), usd))
            })
            .collect())
    }
}

#[async_trait]
impl PriceLookup for CoinGeckoPriceResolver {
    async fn usd_prices(&self, mints: &[String]) -> HashMap<String, f64> {
        let unique: HashSet<&str> = mints
            .iter()
            .map(String::as_str)
            .filter(|mint| !mint.is_empty())
            .collect();

        let mut prices = HashMap::new();
        let mut misses = Vec::new();

        for mint in unique.iter().copied().filter(|mint| *mint != NATIVE_MINT) {
            match self.cache.get(&format!("mint:{}", mint)) {
                Some(price) => {
                    prices.insert(mint.to_string(), price);
                }
                None => misses.push(mint),
            }
        }

        if !misses.is_empty() {
            match self.fetch_token_prices(&misses).await {
                Ok(fetched) => {
                    for (mint, price) in fetched {
                        self.cache.insert(format!("mint:{}", mint), price);
                        prices.insert(mint, price);
                    }
                }
                // Keep whatever the cache already produced
                Err(e) => tracing::warn!("Token price lookup failed: {}", e),
            }
        }

        if unique.contains(NATIVE_MINT) {
            if let Some(sol) = self.sol_price_usd().await {
                prices.insert(NATIVE_MINT.to_string(), sol);
            }
        }

        prices
    }
}
