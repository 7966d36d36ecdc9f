use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    #[default]
    Solana,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Defi,
    Nft,
    Infrastructure,
    Consumer,
}

/// Where a campaign is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    Upcoming,
    Active,
    SnapshotTaken,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// How eligibility for a campaign can be verified.
///
/// Unrecognized tags deserialize to `Unverified` so a bad admin entry can
/// never unlock a stronger provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    ClaimApi,
    DistributorProgram,
    ManualVerified,
    #[default]
    #[serde(other)]
    Unverified,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirdropTimeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announced_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_opens_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_ends_at: Option<DateTime<Utc>>,
}

/// Attribute thresholds used when no live provider is consulted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleChecks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_sol_balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_token_accounts: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_recent_transactions: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_any_tokens: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_nft_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_last_active_days: Option<u32>,
}

/// A curated token-distribution campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirdropRule {
    pub id: String,
    pub project: String,
    #[serde(default)]
    pub network: Network,
    pub category: Category,
    pub status: LifecycleStatus,
    pub official_claim_url: String,
    pub source_url: String,
    #[serde(default)]
    pub trusted_domains: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<AirdropTimeline>,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub verification_method: VerificationMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_api_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor_program_id: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub checks: RuleChecks,
}

impl AirdropRule {
    /// Minimal rule with no checks and no provider
    pub fn new(
        id: impl Into<String>,
        project: impl Into<String>,
        official_claim_url: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            project: project.into(),
            network: Network::Solana,
            category: Category::Defi,
            status: LifecycleStatus::Active,
            official_claim_url: official_claim_url.into(),
            source_url: source_url.into(),
            trusted_domains: Vec::new(),
            timeline: None,
            risk_level: RiskLevel::Low,
            verification_method: VerificationMethod::Unverified,
            claim_api_endpoint: None,
            distributor_program_id: None,
            verified: false,
            estimated_value: None,
            description: None,
            tags: Vec::new(),
            checks: RuleChecks::default(),
        }
    }

    pub fn with_trusted_domains(mut self, domains: &[&str]) -> Self {
        self.trusted_domains = domains.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_checks(mut self, checks: RuleChecks) -> Self {
        self.checks = checks;
        self
    }

    pub fn with_claim_api(mut self, endpoint: impl Into<String>) -> Self {
        self.verification_method = VerificationMethod::ClaimApi;
        self.claim_api_endpoint = Some(endpoint.into());
        self
    }
}
