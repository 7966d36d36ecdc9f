use futures::future::join_all;
use reqwest::Client;

use crate::core::EligibilityProvider;
use crate::models::{
    AirdropEvaluation, AirdropRule, ClaimSafety, EligibilityStatus, LifecycleStatus, MatchProof,
    SafetyGrade, WalletProfile,
};
use crate::providers::build_provider;
use crate::scoring::attribute::{ELIGIBLE_RATIO, LIKELY_RATIO};
use crate::verification::{evaluate_claim_safety, is_trusted_claim_domain};

/// Result of checking one rule's attribute thresholds against a profile
#[derive(Debug, Clone, PartialEq)]
pub struct RuleCheckOutcome {
    pub status: EligibilityStatus,
    pub confidence: u8,
    pub reason: String,
    pub proof: MatchProof,
}

#[derive(Default)]
struct CheckTally {
    passed: usize,
    total: usize,
    proof: MatchProof,
}

impl CheckTally {
    fn record(&mut self, passed: bool, met_label: String, unmet_label: String) {
        self.total += 1;
        if passed {
            self.passed += 1;
            self.proof.met.push(met_label);
        } else {
            self.proof.unmet.push(unmet_label);
        }
    }
}

/// Evaluate a rule's configured checks against a wallet profile
pub fn check_rule(rule: &AirdropRule, profile: &WalletProfile) -> RuleCheckOutcome {
    let checks = &rule.checks;
    let mut tally = CheckTally::default();

    if let Some(min) = checks.min_sol_balance {
        tally.record(
            profile.sol_balance >= min,
            format!("SOL >= {}", min),
            format!("SOL below {}", min),
        );
    }

    if let Some(min) = checks.min_token_accounts {
        tally.record(
            profile.token_accounts_count >= min,
            format!("Token accounts >= {}", min),
            format!("Token accounts below {}", min),
        );
    }

    if let Some(min) = checks.min_recent_transactions {
        tally.record(
            profile.recent_transaction_count >= min,
            format!("Recent tx >= {}", min),
            format!("Recent tx below {}", min),
        );
    }

    if let Some(min) = checks.min_nft_count {
        tally.record(
            profile.nft_approx_count >= min,
            format!("NFT count >= {}", min),
            format!("NFT count below {}", min),
        );
    }

    if let Some(tokens) = checks.requires_any_tokens.as_ref().filter(|t| !t.is_empty()) {
        let list = tokens.join(", ");
        tally.record(
            profile.holds_any_symbol(tokens),
            format!("Has one token in [{}]", list),
            format!("Missing tokens: [{}]", list),
        );
    }

    if let Some(max) = checks.max_last_active_days {
        // Unknown activity counts as a miss
        tally.record(
            profile.last_active_days.is_some_and(|days| days <= max),
            format!("Active within {} days", max),
            format!("Not active within {} days", max),
        );
    }

    if tally.total == 0 {
        return RuleCheckOutcome {
            status: EligibilityStatus::Unknown,
            confidence: 0,
            reason: "No applicable checks".to_string(),
            proof: tally.proof,
        };
    }

    let ratio = tally.passed as f64 / tally.total as f64;
    let status = if ratio >= ELIGIBLE_RATIO {
        EligibilityStatus::Eligible
    } else if ratio >= LIKELY_RATIO {
        EligibilityStatus::Likely
    } else {
        EligibilityStatus::NotEligible
    };

    RuleCheckOutcome {
        status,
        confidence: (ratio * 100.0).round() as u8,
        reason: format!(
            "{} checks passed, {} missed",
            tally.proof.met.len(),
            tally.proof.unmet.len()
        ),
        proof: tally.proof,
    }
}

/// A claim button may only be offered for an eligible wallet on a trusted,
/// open, non-risky destination.
pub fn claim_action_enabled(
    status: EligibilityStatus,
    claim_domain_trusted: bool,
    lifecycle: LifecycleStatus,
    safety: &ClaimSafety,
) -> bool {
    status == EligibilityStatus::Eligible
        && claim_domain_trusted
        && lifecycle != LifecycleStatus::Upcoming
        && safety.grade != SafetyGrade::Risky
}

fn sort_by_confidence(evaluations: &mut [AirdropEvaluation]) {
    // Stable: ties keep input order
    evaluations.sort_by(|a, b| b.confidence.cmp(&a.confidence));
}

/// Evaluates a wallet against every campaign
#[derive(Clone)]
pub struct AirdropEvaluator {
    client: Client,
}

impl AirdropEvaluator {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Attribute-rule mode: no live queries, only the profile snapshot
    pub fn evaluate_profile(
        &self,
        profile: &WalletProfile,
        rules: &[AirdropRule],
    ) -> Vec<AirdropEvaluation> {
        let mut evaluations: Vec<AirdropEvaluation> = rules
            .iter()
            .map(|rule| {
                let outcome = check_rule(rule, profile);
                let claim_safety = evaluate_claim_safety(rule);
                let trusted = is_trusted_claim_domain(&rule.official_claim_url, rule.trusted_domains.as_slice());
                let enabled = claim_action_enabled(outcome.status, trusted, rule.status, &claim_safety);

                AirdropEvaluation::from_rule(
                    rule,
                    outcome.status,
                    outcome.confidence,
                    outcome.reason,
                    outcome.proof,
                    claim_safety,
                    enabled,
                )
            })
            .collect();

        sort_by_confidence(&mut evaluations);
        tracing::info!(
            "Evaluated {} campaigns for {} from profile",
            evaluations.len(),
            profile.address
        );
        evaluations
    }

    /// Provider-backed mode: every campaign is checked concurrently and
    /// merged once all have settled
    pub async fn evaluate_live(&self, wallet: &str, rules: &[AirdropRule]) -> Vec<AirdropEvaluation> {
        let checks = rules.iter().map(|rule| self.evaluate_with_provider(wallet, rule));
        let mut evaluations = join_all(checks).await;

        sort_by_confidence(&mut evaluations);
        tracing::info!(
            "Evaluated {} campaigns for {} via providers",
            evaluations.len(),
            wallet
        );
        evaluations
    }

    async fn evaluate_with_provider(&self, wallet: &str, rule: &AirdropRule) -> AirdropEvaluation {
        let trusted = is_trusted_claim_domain(&rule.official_claim_url, rule.trusted_domains.as_slice());
        let provider = build_provider(&self.client, rule, trusted);
        let result = provider.check_eligibility(wallet).await;

        tracing::debug!(
            "Provider '{}' for {}: {:?} ({})",
            provider.name(),
            rule.id,
            result.status,
            result.confidence
        );

        let status = EligibilityStatus::from(result.status);
        let claim_safety = evaluate_claim_safety(rule);
        let enabled = claim_action_enabled(status, trusted, rule.status, &claim_safety);

        let mut proof = MatchProof::default();
        if trusted {
            proof.met.push("Claim domain is trusted".to_string());
        } else {
            proof.unmet.push("Claim domain is not trusted".to_string());
        }
        match status {
            EligibilityStatus::Eligible => proof.met.push(result.reason.clone()),
            EligibilityStatus::NotEligible => proof.unmet.push(result.reason.clone()),
            _ => {}
        }

        let verified_usd_total = result.verified_usd_total();
        let mut evaluation = AirdropEvaluation::from_rule(
            rule,
            status,
            result.confidence,
            result.reason,
            proof,
            claim_safety,
            enabled,
        );
        evaluation.claimable_amounts = result.claimable;
        evaluation.verified_usd_total = verified_usd_total;
        evaluation
    }
}

impl Default for AirdropEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleChecks;

    fn profile() -> WalletProfile {
        WalletProfile {
            address: "Wallet1".into(),
            sol_balance: 4.25,
            token_symbols: vec!["JUP".into()],
            token_accounts_count: 3,
            nft_approx_count: 0,
            recent_transaction_count: 72,
            last_active_days: Some(4),
            ..Default::default()
        }
    }

    fn rule_with(checks: RuleChecks) -> AirdropRule {
        AirdropRule::new("r", "Project", "https://jup.ag/claim", "https://jup.ag")
            .with_trusted_domains(&["jup.ag"])
            .with_checks(checks)
    }

    #[test]
    fn test_no_checks_is_unknown() {
        let outcome = check_rule(&rule_with(RuleChecks::default()), &profile());
        assert_eq!(outcome.status, EligibilityStatus::Unknown);
        assert_eq!(outcome.confidence, 0);
    }

    #[test]
    fn test_empty_token_list_is_not_a_check() {
        let outcome = check_rule(
            &rule_with(RuleChecks {
                requires_any_tokens: Some(vec![]),
                ..Default::default()
            }),
            &profile(),
        );
        assert_eq!(outcome.status, EligibilityStatus::Unknown);
    }

    #[test]
    fn test_all_checks_pass() {
        let outcome = check_rule(
            &rule_with(RuleChecks {
                min_sol_balance: Some(1.0),
                min_recent_transactions: Some(10),
                ..Default::default()
            }),
            &profile(),
        );
        assert_eq!(outcome.status, EligibilityStatus::Eligible);
        assert_eq!(outcome.confidence, 100);
        assert_eq!(outcome.proof.met.len(), 2);
        assert!(outcome.proof.unmet.is_empty());
    }

    #[test]
    fn test_ratio_bands() {
        // 2 of 3 -> 0.67 -> likely
        let likely = check_rule(
            &rule_with(RuleChecks {
                min_sol_balance: Some(1.0),
                requires_any_tokens: Some(vec!["JUP".into()]),
                min_nft_count: Some(5),
                ..Default::default()
            }),
            &profile(),
        );
        assert_eq!(likely.status, EligibilityStatus::Likely);
        assert_eq!(likely.confidence, 67);

        // 1 of 3 -> 0.33 -> not eligible
        let missed = check_rule(
            &rule_with(RuleChecks {
                min_sol_balance: Some(10.0),
                min_token_accounts: Some(10),
                max_last_active_days: Some(30),
                ..Default::default()
            }),
            &profile(),
        );
        assert_eq!(missed.status, EligibilityStatus::NotEligible);
        assert_eq!(missed.confidence, 33);
        assert_eq!(missed.proof.unmet.len(), 2);
    }

    #[test]
    fn test_unknown_activity_fails_recency_check() {
        let mut p = profile();
        p.last_active_days = None;
        let outcome = check_rule(
            &rule_with(RuleChecks {
                max_last_active_days: Some(30),
                ..Default::default()
            }),
            &p,
        );
        assert_eq!(outcome.status, EligibilityStatus::NotEligible);
        assert_eq!(outcome.proof.unmet, vec!["Not active within 30 days"]);
    }

    #[test]
    fn test_claim_action_requires_every_condition() {
        let safe = ClaimSafety {
            grade: SafetyGrade::Safe,
            reasons: vec![],
            hostname: "jup.ag".into(),
        };
        let risky = ClaimSafety {
            grade: SafetyGrade::Risky,
            ..safe.clone()
        };

        assert!(claim_action_enabled(EligibilityStatus::Eligible, true, LifecycleStatus::Active, &safe));
        assert!(!claim_action_enabled(EligibilityStatus::Likely, true, LifecycleStatus::Active, &safe));
        assert!(!claim_action_enabled(EligibilityStatus::Eligible, false, LifecycleStatus::Active, &safe));
        assert!(!claim_action_enabled(EligibilityStatus::Eligible, true, LifecycleStatus::Upcoming, &safe));
        assert!(!claim_action_enabled(EligibilityStatus::Eligible, true, LifecycleStatus::Active, &risky));
    }

    #[test]
    fn test_profile_mode_sorts_stably_by_confidence() {
        let evaluator = AirdropEvaluator::new();
        let mut unknown_a = rule_with(RuleChecks::default());
        unknown_a.id = "a".into();
        let mut eligible = rule_with(RuleChecks {
            min_sol_balance: Some(1.0),
            ..Default::default()
        });
        eligible.id = "b".into();
        let mut unknown_c = rule_with(RuleChecks::default());
        unknown_c.id = "c".into();

        let results = evaluator.evaluate_profile(&profile(), &[unknown_a, eligible, unknown_c]);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids, vec!["b", "a", "c"]);
        assert!(results[0].claim_action_enabled);
    }
}
