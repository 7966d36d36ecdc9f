//! In-memory chain source backed by a captured wallet snapshot

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::types::{ParsedTransaction, SignatureInfo, TokenAccount};
use super::ChainDataSource;
use crate::utils::{EngineError, Result};

/// Everything the engine needs about one wallet, captured ahead of time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSnapshot {
    pub address: String,
    #[serde(default)]
    pub balance_lamports: u64,
    #[serde(default)]
    pub token_accounts: Vec<TokenAccount>,
    /// Newest first
    #[serde(default)]
    pub signatures: Vec<SignatureInfo>,
    #[serde(default)]
    pub transactions: HashMap<String, ParsedTransaction>,
    #[serde(default)]
    pub metadata_accounts: HashMap<String, Vec<u8>>,
}

pub struct FixtureChain {
    snapshot: WalletSnapshot,
}

impl FixtureChain {
    pub fn new(snapshot: WalletSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let snapshot: WalletSnapshot = serde_json::from_str(&raw)?;
        tracing::debug!(
            "Loaded snapshot for {} ({} signatures)",
            snapshot.address,
            snapshot.signatures.len()
        );
        Ok(Self::new(snapshot))
    }

    pub fn address(&self) -> &str {
        &self.snapshot.address
    }

    fn ensure_wallet(&self, address: &str) -> Result<()> {
        if address == self.snapshot.address {
            Ok(())
        } else {
            Err(EngineError::ChainData(format!(
                "snapshot holds {}, not {}",
                self.snapshot.address, address
            )))
        }
    }
}

#[async_trait]
impl ChainDataSource for FixtureChain {
    async fn signatures_for_address(&self, address: &str, limit: usize) -> Result<Vec<SignatureInfo>> {
        self.ensure_wallet(address)?;
        Ok(self.snapshot.signatures.iter().take(limit).cloned().collect())
    }

    async fn parsed_transactions(&self, signatures: &[String]) -> Result<Vec<Option<ParsedTransaction>>> {
        Ok(signatures
            .iter()
            .map(|sig| self.snapshot.transactions.get(sig).cloned())
            .collect())
    }

    async fn balance_lamports(&self, address: &str) -> Result<u64> {
        self.ensure_wallet(address)?;
        Ok(self.snapshot.balance_lamports)
    }

    async fn token_accounts_by_owner(&self, address: &str) -> Result<Vec<TokenAccount>> {
        self.ensure_wallet(address)?;
        Ok(self.snapshot.token_accounts.clone())
    }

    async fn metadata_account(&self, mint: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.snapshot.metadata_accounts.get(mint).cloned())
    }
}
