//! Past-airdrop detection over a wallet's transaction history

mod classifier;

pub use classifier::{extract_inbound_transfers, merge_events};

use std::sync::Arc;

use crate::chain::ChainDataSource;
use crate::config::EngineConfig;
use crate::metadata::{PriceLookup, TokenMetadataLookup, UNKNOWN_SYMBOL};
use crate::models::{HistoryReport, PastAirdrop, TransferEvent};
use crate::utils::Result;

pub struct HistoryScanner {
    chain: Arc<dyn ChainDataSource>,
    metadata: Arc<dyn TokenMetadataLookup>,
    prices: Arc<dyn PriceLookup>,
    max_signatures: usize,
    batch_size: usize,
}

impl HistoryScanner {
    pub fn new(
        chain: Arc<dyn ChainDataSource>,
        metadata: Arc<dyn TokenMetadataLookup>,
        prices: Arc<dyn PriceLookup>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            chain,
            metadata,
            prices,
            max_signatures: config.history_max_signatures,
            batch_size: config.history_batch_size.max(1),
        }
    }

    /// Scan the most recent signatures of `wallet` for inbound transfers.
    ///
    /// Only the initial signature listing can fail the scan. A batch whose
    /// transactions cannot be fetched is logged and skipped, and enrichment
    /// failures leave the symbol `UNKNOWN` and the USD value empty.
    pub async fn scan(&self, wallet: &str) -> Result<HistoryReport> {
        let signatures = self
            .chain
            .signatures_for_address(wallet, self.max_signatures)
            .await?;

        tracing::info!("🔎 Scanning {} signatures for {}", signatures.len(), wallet);

        let mut events: Vec<TransferEvent> = Vec::new();

        // Sequential batches keep the chain source within its rate limits
        for (index, batch) in signatures.chunks(self.batch_size).enumerate() {
            let ids: Vec<String> = batch.iter().map(|s| s.signature.clone()).collect();

            let transactions = match self.chain.parsed_transactions(&ids).await {
                Ok(transactions) => transactions,
                Err(e) => {
                    tracing::warn!("Skipping batch {} for {}: {}", index, wallet, e);
                    continue;
                }
            };

            for (info, tx) in batch.iter().zip(transactions) {
                let Some(tx) = tx else { continue };
                events.extend(extract_inbound_transfers(
                    &tx,
                    wallet,
                    &info.signature,
                    info.block_time,
                ));
            }
        }

        let events = merge_events(events);
        if events.is_empty() {
            return Ok(HistoryReport::new(wallet, Vec::new()));
        }

        let mints: Vec<String> = events.iter().map(|e| e.mint.clone()).collect();
        let (symbols, prices) = tokio::join!(
            self.metadata.resolve_many(&mints),
            self.prices.usd_prices(&mints)
        );

        let past_airdrops: Vec<PastAirdrop> = events
            .into_iter()
            .map(|event| {
                let symbol = symbols
                    .get(&event.mint)
                    .map(|meta| meta.symbol.clone())
                    .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string());
                let price = prices.get(&event.mint).copied();
                PastAirdrop::from_event(event, symbol, price)
            })
            .collect();

        let report = HistoryReport::new(wallet, past_airdrops);
        tracing::info!(
            "✅ {} transfers found, {} likely airdrops",
            report.past_airdrops.len(),
            report.total_likely
        );
        Ok(report)
    }
}
