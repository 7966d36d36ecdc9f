use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::{TokenMetadata, TokenMetadataLookup};
use crate::chain::{ChainDataSource, NATIVE_MINT};
use crate::config::EngineConfig;
use crate::utils::{Result, TtlCache};

static SYMBOL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9$_.-]{1,12}$").expect("symbol pattern is valid")
});

/// Key, update authority and mint precede the name field
const METADATA_NAME_OFFSET: usize = 1 + 32 + 32;
const METADATA_MIN_LEN: usize = 70;

const TOKEN_LIST_KEY: &str = "token-list";

type TokenList = Arc<HashMap<String, TokenMetadata>>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedToken {
    address: String,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "logoURI")]
    logo_uri: Option<String>,
}

/// Strip NUL padding, reject anything that is not a short ASCII ticker
pub fn sanitize_symbol(raw: &str) -> Option<String> {
    let clean = raw.replace('\0', "");
    let clean = clean.trim();
    SYMBOL_PATTERN
        .is_match(clean)
        .then(|| clean.to_uppercase())
}

fn read_borsh_string(data: &[u8], offset: usize) -> Option<(Option<String>, usize)> {
    let len_bytes: [u8; 4] = data.get(offset..offset + 4)?.try_into().ok()?;
    let start = offset + 4;
    let end = start.checked_add(u32::from_le_bytes(len_bytes) as usize)?;
    let raw = data.get(start..end)?;

    let text = String::from_utf8_lossy(raw).replace('\0', "");
    let text = text.trim();
    Some(((!text.is_empty()).then(|| text.to_string()), end))
}

/// Decode name and symbol from a Metaplex token-metadata account.
/// Returns `None` when the account is too short or the symbol is unusable.
pub fn parse_metadata_account(mint: &str, data: &[u8]) -> Option<TokenMetadata> {
    if data.len() < METADATA_MIN_LEN {
        return None;
    }

    let (name, next) = read_borsh_string(data, METADATA_NAME_OFFSET)?;
    let (symbol, _) = read_borsh_string(data, next)?;
    let symbol = sanitize_symbol(&symbol?)?;

    Some(TokenMetadata {
        mint: mint.to_string(),
        symbol,
        name,
        logo_uri: None,
    })
}

/// Symbol resolution: token list, then on-chain metadata, then `UNKNOWN`.
/// Every outcome, including the fallback, is cached per mint.
pub struct TokenMetadataResolver {
    client: Client,
    chain: Option<Arc<dyn ChainDataSource>>,
    token_list_url: String,
    symbols: TtlCache<String, TokenMetadata>,
    token_list: TtlCache<&'static str, TokenList>,
}

impl TokenMetadataResolver {
    pub fn new(client: Client, config: &EngineConfig) -> Self {
        Self {
            client,
            chain: None,
            token_list_url: config.token_list_url.clone(),
            symbols: TtlCache::new(config.symbol_cache_ttl()),
            token_list: TtlCache::new(config.token_list_ttl()),
        }
    }

    /// Enable the on-chain metadata fallback
    pub fn with_chain(mut self, chain: Arc<dyn ChainDataSource>) -> Self {
        self.chain = Some(chain);
        self
    }

    async fn token_list(&self) -> TokenList {
        if let Some(list) = self.token_list.get(&TOKEN_LIST_KEY) {
            return list;
        }

        // A failed fetch caches an empty list so the next lookups fall
        // through to chain metadata instead of hammering the list endpoint.
        let list = match self.fetch_token_list().await {
            Ok(list) => {
                tracing::info!("Loaded {} tokens from list", list.len());
                list
            }
            Err(e) => {
                tracing::warn!("Token list unavailable: {}", e);
                HashMap::new()
            }
        };

        let list = Arc::new(list);
        self.token_list.insert(TOKEN_LIST_KEY, Arc::clone(&list));
        list
    }

    async fn fetch_token_list(&self) -> Result<HashMap<String, TokenMetadata>> {
        let response = self
            .client
            .get(&self.token_list_url)
            .header("accept", "application/json")
            .send()
            .await?
            .error_for_status()?;

        let tokens: Vec<ListedToken> = response.json().await?;

        Ok(tokens
            .into_iter()
            .filter(|token| !token.address.is_empty())
            .filter_map(|token| {
                let symbol = sanitize_symbol(token.symbol.as_deref()?)?;
                Some((
                    token.address.clone(),
                    TokenMetadata {
                        mint: token.address,
                        symbol,
                        name: token.name,
                        logo_uri: token.logo_uri,
                    },
                ))
            })
            .collect())
    }

    async fn resolve_on_chain(&self, mint: &str) -> Option<TokenMetadata> {
        let chain = self.chain.as_ref()?;
        match chain.metadata_account(mint).await {
            Ok(Some(data)) => parse_metadata_account(mint, &data),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Metadata account lookup failed for {}: {}", mint, e);
                None
            }
        }
    }
}

#[async_trait]
impl TokenMetadataLookup for TokenMetadataResolver {
    async fn resolve(&self, mint: &str) -> TokenMetadata {
        if mint == NATIVE_MINT {
            return TokenMetadata {
                mint: mint.to_string(),
                symbol: "SOL".to_string(),
                name: Some("Solana".to_string()),
                logo_uri: None,
            };
        }

        let key = mint.to_string();
        if let Some(cached) = self.symbols.get(&key) {
            tracing::debug!("Symbol cache hit for {}", mint);
            return cached;
        }

        let resolved = match self.token_list().await.get(mint) {
            Some(listed) => listed.clone(),
            None => match self.resolve_on_chain(mint).await {
                Some(on_chain) => on_chain,
                None => TokenMetadata::unknown(mint),
            },
        };

        self.symbols.insert(key, resolved.clone());
        resolved
    }
}
