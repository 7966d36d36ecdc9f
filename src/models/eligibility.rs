use super::rule::{
    AirdropRule, AirdropTimeline, Category, LifecycleStatus, Network, RiskLevel, VerificationMethod,
};
use super::safety::ClaimSafety;
use serde::{Deserialize, Serialize};

/// Four-way status shown to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    Likely,
    NotEligible,
    Unknown,
}

/// Three-way status a provider may report. Providers never say "likely".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    Eligible,
    NotEligible,
    Unknown,
}

impl From<ProviderStatus> for EligibilityStatus {
    fn from(status: ProviderStatus) -> Self {
        match status {
            ProviderStatus::Eligible => EligibilityStatus::Eligible,
            ProviderStatus::NotEligible => EligibilityStatus::NotEligible,
            ProviderStatus::Unknown => EligibilityStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimableAmount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mint: Option<String>,
    pub symbol: String,
    pub ui_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd_value: Option<f64>,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEligibilityResult {
    pub status: ProviderStatus,
    /// 0-100
    pub confidence: u8,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimable: Option<Vec<ClaimableAmount>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<serde_json::Value>,
}

impl ProviderEligibilityResult {
    pub fn new(status: ProviderStatus, confidence: u8, reason: impl Into<String>) -> Self {
        Self {
            status,
            confidence: confidence.min(100),
            reason: reason.into(),
            claimable: None,
            proof: None,
        }
    }

    /// Fail-safe answer used whenever nothing can be verified
    pub fn unknown(confidence: u8, reason: impl Into<String>) -> Self {
        Self::new(ProviderStatus::Unknown, confidence, reason)
    }

    pub fn with_claimable(mut self, claimable: Vec<ClaimableAmount>) -> Self {
        self.claimable = Some(claimable);
        self
    }

    pub fn with_proof(mut self, proof: serde_json::Value) -> Self {
        self.proof = Some(proof);
        self
    }

    /// Sum of claimable USD values, `None` unless strictly positive
    pub fn verified_usd_total(&self) -> Option<f64> {
        let total: f64 = self
            .claimable
            .iter()
            .flatten()
            .filter_map(|amount| amount.usd_value)
            .sum();

        (total > 0.0).then_some(total)
    }
}

/// Conditions that were and were not satisfied for a campaign
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchProof {
    pub met: Vec<String>,
    pub unmet: Vec<String>,
}

/// One campaign's verdict for one wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirdropEvaluation {
    pub id: String,
    pub project: String,
    pub status: EligibilityStatus,
    pub confidence: u8,
    pub reason: String,
    pub network: Network,
    pub category: Category,
    pub airdrop_status: LifecycleStatus,
    pub official_claim_url: String,
    pub source_url: String,
    pub risk_level: RiskLevel,
    pub verification_method: VerificationMethod,
    pub verified: bool,
    pub claim_action_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimable_amounts: Option<Vec<ClaimableAmount>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_usd_total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<AirdropTimeline>,
    pub proof: MatchProof,
    pub claim_safety: ClaimSafety,
}

impl AirdropEvaluation {
    /// Merge a campaign's metadata with its outcome
    pub fn from_rule(
        rule: &AirdropRule,
        status: EligibilityStatus,
        confidence: u8,
        reason: impl Into<String>,
        proof: MatchProof,
        claim_safety: ClaimSafety,
        claim_action_enabled: bool,
    ) -> Self {
        Self {
            id: rule.id.clone(),
            project: rule.project.clone(),
            status,
            confidence,
            reason: reason.into(),
            network: rule.network,
            category: rule.category,
            airdrop_status: rule.status,
            official_claim_url: rule.official_claim_url.clone(),
            source_url: rule.source_url.clone(),
            risk_level: rule.risk_level,
            verification_method: rule.verification_method,
            verified: rule.verified,
            claim_action_enabled,
            claimable_amounts: None,
            verified_usd_total: None,
            estimated_value: rule.estimated_value.clone(),
            description: rule.description.clone(),
            tags: rule.tags.clone(),
            timeline: rule.timeline.clone(),
            proof,
            claim_safety,
        }
    }
}
