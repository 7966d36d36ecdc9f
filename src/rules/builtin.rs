use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;

use super::RuleStore;
use crate::models::{
    AirdropRule, AirdropTimeline, Category, LifecycleStatus, RiskLevel, RuleChecks,
    VerificationMethod,
};
use crate::utils::Result;

fn date(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
}

fn tokens(symbols: &[&str]) -> Option<Vec<String>> {
    Some(symbols.iter().map(|s| s.to_string()).collect())
}

/// Curated campaigns shipped with the engine
static BUILTIN_RULES: Lazy<Vec<AirdropRule>> = Lazy::new(|| {
    let mut rules = vec![
        AirdropRule {
            category: Category::Defi,
            status: LifecycleStatus::Active,
            verification_method: VerificationMethod::ManualVerified,
            verified: true,
            estimated_value: Some("$200 - $2,000".to_string()),
            description: Some("Annual Jupuary distribution to active Jupiter swappers and voters.".to_string()),
            tags: vec!["dex".to_string(), "aggregator".to_string()],
            timeline: Some(AirdropTimeline {
                announced_at: date(2024, 11, 1),
                snapshot_at: date(2024, 11, 2),
                claim_opens_at: date(2025, 1, 22),
                claim_ends_at: None,
            }),
            checks: RuleChecks {
                min_sol_balance: Some(0.5),
                min_recent_transactions: Some(20),
                requires_any_tokens: tokens(&["JUP", "USDC"]),
                max_last_active_days: Some(90),
                ..Default::default()
            },
            ..AirdropRule::new(
                "jupiter-jupuary",
                "Jupiter Exchange",
                "https://jup.ag/airdrop",
                "https://x.com/JupiterExchange",
            )
            .with_trusted_domains(&["jup.ag"])
        },
        AirdropRule {
            category: Category::Defi,
            status: LifecycleStatus::SnapshotTaken,
            risk_level: RiskLevel::Medium,
            estimated_value: Some("$100 - $1,500".to_string()),
            tags: vec!["perps".to_string()],
            checks: RuleChecks {
                min_sol_balance: Some(1.0),
                min_token_accounts: Some(5),
                min_recent_transactions: Some(30),
                ..Default::default()
            },
            ..AirdropRule::new(
                "drift-rewards",
                "Drift Protocol",
                "https://www.drift.trade/airdrop",
                "https://www.drift.trade",
            )
            .with_trusted_domains(&["drift.trade"])
        },
        AirdropRule {
            category: Category::Defi,
            status: LifecycleStatus::Active,
            verification_method: VerificationMethod::ManualVerified,
            verified: true,
            tags: vec!["lending".to_string(), "points".to_string()],
            checks: RuleChecks {
                min_sol_balance: Some(0.25),
                requires_any_tokens: tokens(&["KMNO", "USDC", "JITOSOL"]),
                ..Default::default()
            },
            ..AirdropRule::new(
                "kamino-season",
                "Kamino Finance",
                "https://app.kamino.finance/season",
                "https://x.com/KaminoFinance",
            )
            .with_trusted_domains(&["kamino.finance"])
        },
        AirdropRule {
            category: Category::Nft,
            status: LifecycleStatus::Upcoming,
            risk_level: RiskLevel::Medium,
            tags: vec!["marketplace".to_string()],
            checks: RuleChecks {
                min_nft_count: Some(3),
                min_recent_transactions: Some(10),
                ..Default::default()
            },
            ..AirdropRule::new(
                "magic-eden-rewards",
                "Magic Eden Rewards",
                "https://magiceden.io/rewards",
                "https://x.com/MagicEden",
            )
            .with_trusted_domains(&["magiceden.io"])
        },
        AirdropRule {
            category: Category::Nft,
            status: LifecycleStatus::Ended,
            risk_level: RiskLevel::Medium,
            tags: vec!["marketplace".to_string()],
            checks: RuleChecks {
                min_nft_count: Some(5),
                max_last_active_days: Some(60),
                ..Default::default()
            },
            ..AirdropRule::new(
                "tensor-season",
                "Tensor NFT",
                "https://www.tensor.trade/claim",
                "https://x.com/tensor_hq",
            )
            .with_trusted_domains(&["tensor.trade"])
        },
        AirdropRule {
            category: Category::Defi,
            status: LifecycleStatus::Active,
            tags: vec!["amm".to_string(), "liquidity".to_string()],
            checks: RuleChecks {
                min_token_accounts: Some(3),
                requires_any_tokens: tokens(&["RAY"]),
                ..Default::default()
            },
            ..AirdropRule::new(
                "raydium-lp-rewards",
                "Raydium LP Rewards",
                "https://raydium.io/rewards",
                "https://raydium.io",
            )
            .with_trusted_domains(&["raydium.io"])
        },
        AirdropRule {
            category: Category::Infrastructure,
            status: LifecycleStatus::Ended,
            verification_method: VerificationMethod::DistributorProgram,
            description: Some("Retroactive distribution to oracle consumers and stakers.".to_string()),
            tags: vec!["oracle".to_string()],
            checks: RuleChecks {
                min_recent_transactions: Some(5),
                max_last_active_days: Some(180),
                ..Default::default()
            },
            ..AirdropRule::new(
                "pyth-retro",
                "Pyth Network",
                "https://airdrop.pyth.network",
                "https://pyth.network",
            )
            .with_trusted_domains(&["pyth.network"])
        },
    ];

    rules.sort_by(|a, b| a.project.cmp(&b.project));
    rules
});

pub fn builtin_rules() -> &'static [AirdropRule] {
    &BUILTIN_RULES
}

/// In-memory rule list; the built-in campaigns by default
pub struct StaticRuleStore {
    rules: Vec<AirdropRule>,
}

impl StaticRuleStore {
    pub fn new(rules: Vec<AirdropRule>) -> Self {
        Self { rules }
    }
}

impl Default for StaticRuleStore {
    fn default() -> Self {
        Self::new(builtin_rules().to_vec())
    }
}

#[async_trait]
impl RuleStore for StaticRuleStore {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn active_rules(&self) -> Result<Vec<AirdropRule>> {
        Ok(self.rules.clone())
    }
}
