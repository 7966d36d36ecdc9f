use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::scoring::transfer::LIKELY_AIRDROP_THRESHOLD;

/// One inbound value movement into a wallet, before enrichment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferEvent {
    pub signature: String,
    /// Block time in unix seconds, 0 when the ledger did not report one
    pub timestamp: i64,
    pub mint: String,
    /// Raw integer amount in base units
    pub amount: u64,
    pub decimals: u8,
    pub ui_amount: f64,
    /// `None` when no sender could be resolved, which is itself a signal
    pub sender_address: Option<String>,
    /// 0.0-1.0
    pub confidence: f64,
    pub reasons: Vec<String>,
}

impl TransferEvent {
    pub fn is_likely_airdrop(&self) -> bool {
        self.confidence >= LIKELY_AIRDROP_THRESHOLD
    }

    pub fn dedupe_key(&self) -> (&str, &str) {
        (self.signature.as_str(), self.mint.as_str())
    }
}

/// A transfer event enriched with symbol and price, as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastAirdrop {
    pub signature: String,
    pub date: String,
    pub timestamp: i64,
    pub mint: String,
    pub mint_short: String,
    pub symbol: String,
    pub amount: u64,
    pub decimals: u8,
    pub ui_amount: f64,
    pub sender_address: Option<String>,
    pub is_likely_airdrop: bool,
    pub reason: String,
    pub reasons: Vec<String>,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd_value: Option<f64>,
}

impl PastAirdrop {
    pub fn from_event(event: TransferEvent, symbol: String, usd_price: Option<f64>) -> Self {
        let usd_value = usd_price.map(|price| round_cents(event.ui_amount * price));

        Self {
            date: format_date(event.timestamp),
            mint_short: shorten_mint(&event.mint),
            symbol,
            is_likely_airdrop: event.is_likely_airdrop(),
            reason: event.reasons.join(" | "),
            usd_value,
            signature: event.signature,
            timestamp: event.timestamp,
            mint: event.mint,
            amount: event.amount,
            decimals: event.decimals,
            ui_amount: event.ui_amount,
            sender_address: event.sender_address,
            reasons: event.reasons,
            confidence: event.confidence,
        }
    }
}

/// Summary of a history scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryReport {
    pub wallet_address: String,
    pub past_airdrops: Vec<PastAirdrop>,
    /// Count of events at or above the likely-airdrop threshold
    pub total_likely: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_usd_value: Option<f64>,
}

impl HistoryReport {
    pub fn new(wallet_address: impl Into<String>, past_airdrops: Vec<PastAirdrop>) -> Self {
        let total_likely = past_airdrops.iter().filter(|p| p.is_likely_airdrop).count();
        let total: f64 = past_airdrops
            .iter()
            .filter(|p| p.is_likely_airdrop)
            .filter_map(|p| p.usd_value)
            .sum();

        Self {
            wallet_address: wallet_address.into(),
            past_airdrops,
            total_likely,
            total_usd_value: (total > 0.0).then(|| round_cents(total)),
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn format_date(timestamp: i64) -> String {
    if timestamp <= 0 {
        return "Unknown".to_string();
    }
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn shorten_mint(mint: &str) -> String {
    let chars: Vec<char> = mint.chars().collect();
    if chars.len() <= 10 {
        return mint.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
