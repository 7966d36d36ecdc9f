//! Claim-URL safety grading

use url::Url;

use super::domains::{is_announcement_only_host, matches_trusted_host, normalize_host};
use crate::models::{AirdropRule, ClaimSafety, RiskLevel, SafetyGrade};
use crate::scoring::safety::*;

/// Grade a campaign's claim destination.
///
/// Deterministic and total: a malformed URL grades risky instead of failing.
pub fn evaluate_claim_safety(rule: &AirdropRule) -> ClaimSafety {
    let claim_url = match Url::parse(&rule.official_claim_url) {
        Ok(url) => url,
        Err(_) => {
            return ClaimSafety {
                grade: SafetyGrade::Risky,
                reasons: vec!["Invalid claim URL format".to_string()],
                hostname: "invalid-url".to_string(),
            };
        }
    };

    let hostname = normalize_host(claim_url.host_str().unwrap_or_default());
    let mut reasons = Vec::new();
    let mut score = 0;

    let source_host = Url::parse(&rule.source_url)
        .ok()
        .and_then(|url| url.host_str().map(normalize_host))
        .filter(|host| !host.is_empty() && !is_announcement_only_host(host));

    let mut trusted: Vec<String> = rule.trusted_domains.clone();
    trusted.push(hostname.clone());
    trusted.extend(source_host);

    if claim_url.scheme() == "https" {
        score += HTTPS_BONUS;
        reasons.push("HTTPS enabled".to_string());
    } else {
        score += NON_HTTPS_PENALTY;
        reasons.push("Non-HTTPS claim URL".to_string());
    }

    if rule.official_claim_url.contains('@') {
        score += AT_SIGN_PENALTY;
        reasons.push("URL contains @ symbol".to_string());
    }

    if hostname.contains("xn--") {
        score += PUNYCODE_PENALTY;
        reasons.push("Punycode domain detected".to_string());
    }

    if matches_trusted_host(&hostname, trusted.as_slice()) {
        score += TRUSTED_HOST_BONUS;
        reasons.push("Domain matches trusted host list".to_string());
    } else {
        score += UNTRUSTED_HOST_PENALTY;
        reasons.push("Domain does not match trusted host list".to_string());
    }

    if rule.risk_level == RiskLevel::High {
        score += HIGH_RISK_PENALTY;
        reasons.push("Project marked high risk".to_string());
    }

    let grade = SafetyGrade::from_score(score);
    tracing::debug!("Claim safety for {}: {:?} (score {})", rule.id, grade, score);

    ClaimSafety {
        grade,
        reasons,
        hostname,
    }
}
