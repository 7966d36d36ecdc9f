use serde::{Deserialize, Serialize};

pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenHolding {
    pub mint: String,
    pub symbol: String,
    pub ui_amount: f64,
    pub decimals: u8,
}

/// Snapshot of a wallet's on-chain attributes, rebuilt on every check
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletProfile {
    pub address: String,
    pub sol_balance: f64,
    #[serde(default)]
    pub token_symbols: Vec<String>,
    #[serde(default)]
    pub token_mints: Vec<String>,
    #[serde(default)]
    pub token_balances: Vec<TokenHolding>,
    #[serde(default)]
    pub token_accounts_count: usize,
    #[serde(default)]
    pub nft_approx_count: usize,
    #[serde(default)]
    pub recent_transaction_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_age_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active_days: Option<u32>,
}

impl WalletProfile {
    /// Assemble a profile from raw chain records.
    ///
    /// `block_times` are the block times of the recent signatures, newest
    /// first, as the ledger returns them. `now` is a unix timestamp.
    pub fn from_snapshot(
        address: impl Into<String>,
        lamports: u64,
        holdings: Vec<TokenHolding>,
        block_times: &[Option<i64>],
        now: i64,
    ) -> Self {
        let mut token_symbols: Vec<String> = Vec::new();
        let mut token_mints: Vec<String> = Vec::new();
        for holding in &holdings {
            if !token_symbols.contains(&holding.symbol) {
                token_symbols.push(holding.symbol.clone());
            }
            if !token_mints.contains(&holding.mint) {
                token_mints.push(holding.mint.clone());
            }
        }

        let nft_approx_count = holdings.iter().filter(|h| h.ui_amount == 1.0).count();

        let days_since = |ts: i64| -> u32 { ((now - ts).max(0) / SECONDS_PER_DAY) as u32 };
        let last_active_days = block_times.first().copied().flatten().map(days_since);
        let account_age_days = block_times.last().copied().flatten().map(days_since);

        Self {
            address: address.into(),
            sol_balance: lamports as f64 / LAMPORTS_PER_SOL,
            token_symbols,
            token_mints,
            token_accounts_count: holdings.len(),
            nft_approx_count,
            token_balances: holdings,
            recent_transaction_count: block_times.len(),
            account_age_days,
            last_active_days,
        }
    }

    /// Case-insensitive symbol membership
    pub fn holds_any_symbol(&self, symbols: &[String]) -> bool {
        symbols.iter().any(|wanted| {
            self.token_symbols
                .iter()
                .any(|held| held.eq_ignore_ascii_case(wanted))
        })
    }
}
