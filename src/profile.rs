//! Wallet profile construction from a chain-data source

use crate::chain::ChainDataSource;
use crate::metadata::TokenMetadataLookup;
use crate::models::{TokenHolding, WalletProfile};
use crate::utils::Result;

/// Fetch balance, token accounts and recent signatures concurrently and
/// fold them into a [`WalletProfile`]. `now` is a unix timestamp.
///
/// Symbols the metadata lookup cannot name fall back to the first four
/// characters of the mint, upper-cased.
pub async fn build_wallet_profile(
    chain: &dyn ChainDataSource,
    metadata: &dyn TokenMetadataLookup,
    address: &str,
    signature_limit: usize,
    now: i64,
) -> Result<WalletProfile> {
    let (lamports, accounts, signatures) = tokio::try_join!(
        chain.balance_lamports(address),
        chain.token_accounts_by_owner(address),
        chain.signatures_for_address(address, signature_limit),
    )?;

    let mints: Vec<String> = accounts.iter().map(|a| a.mint.clone()).collect();
    let symbols = metadata.resolve_many(&mints).await;

    let holdings: Vec<TokenHolding> = accounts
        .into_iter()
        .map(|account| {
            let symbol = symbols
                .get(&account.mint)
                .filter(|meta| !meta.is_unknown())
                .map(|meta| meta.symbol.clone())
                .unwrap_or_else(|| mint_prefix(&account.mint));

            TokenHolding {
                symbol,
                ui_amount: account.ui_token_amount.ui(),
                decimals: account.ui_token_amount.decimals,
                mint: account.mint,
            }
        })
        .collect();

    let block_times: Vec<Option<i64>> = signatures.iter().map(|s| s.block_time).collect();

    tracing::debug!(
        "Profile for {}: {} token accounts, {} recent signatures",
        address,
        holdings.len(),
        block_times.len()
    );

    Ok(WalletProfile::from_snapshot(address, lamports, holdings, &block_times, now))
}

fn mint_prefix(mint: &str) -> String {
    mint.chars().take(4).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{FixtureChain, SignatureInfo, TokenAccount, UiTokenAmount, WalletSnapshot};
    use crate::metadata::TokenMetadata;
    use async_trait::async_trait;

    const WALLET: &str = "Wallet1111111111111111111111111111111111111";
    const DAY: i64 = 86_400;

    struct KnownJup;

    #[async_trait]
    impl TokenMetadataLookup for KnownJup {
        async fn resolve(&self, mint: &str) -> TokenMetadata {
            if mint == "JUPmint" {
                TokenMetadata {
                    mint: mint.to_string(),
                    symbol: "JUP".to_string(),
                    name: None,
                    logo_uri: None,
                }
            } else {
                TokenMetadata::unknown(mint)
            }
        }
    }

    fn account(mint: &str, ui: f64) -> TokenAccount {
        TokenAccount {
            mint: mint.to_string(),
            ui_token_amount: UiTokenAmount {
                ui_amount: Some(ui),
                decimals: 6,
                amount: None,
            },
        }
    }

    #[tokio::test]
    async fn test_builds_profile_from_chain() {
        let now = 1_700_000_000;
        let chain = FixtureChain::new(WalletSnapshot {
            address: WALLET.into(),
            balance_lamports: 4_250_000_000,
            token_accounts: vec![account("JUPmint", 120.0), account("nftmint1", 1.0)],
            signatures: vec![
                SignatureInfo {
                    signature: "newest".into(),
                    block_time: Some(now - 2 * DAY),
                    err: None,
                },
                SignatureInfo {
                    signature: "oldest".into(),
                    block_time: Some(now - 400 * DAY),
                    err: None,
                },
            ],
            ..Default::default()
        });

        let profile = build_wallet_profile(&chain, &KnownJup, WALLET, 100, now).await.unwrap();

        assert_eq!(profile.sol_balance, 4.25);
        assert_eq!(profile.token_symbols, vec!["JUP", "NFTM"]);
        assert_eq!(profile.token_accounts_count, 2);
        assert_eq!(profile.nft_approx_count, 1);
        assert_eq!(profile.recent_transaction_count, 2);
        assert_eq!(profile.last_active_days, Some(2));
        assert_eq!(profile.account_age_days, Some(400));
    }

    #[tokio::test]
    async fn test_chain_failure_propagates() {
        let chain = FixtureChain::new(WalletSnapshot::default());
        assert!(build_wallet_profile(&chain, &KnownJup, WALLET, 100, 0).await.is_err());
    }
}
