use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::core::EligibilityProvider;
use crate::models::{AirdropRule, ClaimableAmount, ProviderEligibilityResult, ProviderStatus};
use crate::scoring::provider::*;

/// Shape returned by a project's official claim API
#[derive(Debug, Deserialize)]
struct ClaimApiResponse {
    #[serde(default)]
    eligible: Option<bool>,
    #[serde(default)]
    claimable: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    reason: Option<String>,
}

/// Queries a campaign's official claim API with the wallet address
pub struct ClaimApiProvider {
    client: Client,
    rule_id: String,
    endpoint: Option<String>,
    claim_domain_trusted: bool,
}

impl ClaimApiProvider {
    /// `claim_domain_trusted` is computed by the caller and taken as given
    pub fn new(client: Client, rule: &AirdropRule, claim_domain_trusted: bool) -> Self {
        Self {
            client,
            rule_id: rule.id.clone(),
            endpoint: rule.claim_api_endpoint.clone().filter(|e| !e.trim().is_empty()),
            claim_domain_trusted,
        }
    }

    fn request_url(endpoint: &str, wallet: &str) -> Option<Url> {
        let mut url = Url::parse(endpoint).ok()?;
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "wallet")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("wallet", wallet);
        Some(url)
    }

    fn parse_payload(payload: ClaimApiResponse) -> ProviderEligibilityResult {
        let claimable: Vec<ClaimableAmount> = payload
            .claimable
            .unwrap_or_default()
            .iter()
            .filter_map(parse_claimable)
            .collect();

        let reason = payload.reason.filter(|r| !r.trim().is_empty());

        if payload.eligible.unwrap_or(false) {
            ProviderEligibilityResult::new(
                ProviderStatus::Eligible,
                CLAIM_API_ELIGIBLE,
                reason.unwrap_or_else(|| "Eligibility verified by official project claim API.".to_string()),
            )
            .with_claimable(claimable)
        } else {
            ProviderEligibilityResult::new(
                ProviderStatus::NotEligible,
                CLAIM_API_NOT_ELIGIBLE,
                reason.unwrap_or_else(|| "Official claim API reports wallet is not eligible.".to_string()),
            )
            .with_claimable(claimable)
        }
    }
}

/// Keep only entries with a positive numeric amount and a symbol
fn parse_claimable(item: &serde_json::Value) -> Option<ClaimableAmount> {
    let amount = item.get("amount")?.as_f64().filter(|a| *a > 0.0)?;
    let symbol = item
        .get("symbol")?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())?;

    Some(ClaimableAmount {
        mint: item.get("mint").and_then(|m| m.as_str()).map(String::from),
        symbol: symbol.to_string(),
        ui_amount: amount,
        usd_value: item.get("usd").and_then(|u| u.as_f64()),
        verified: true,
    })
}

#[async_trait]
impl EligibilityProvider for ClaimApiProvider {
    fn name(&self) -> &'static str {
        "claim-api"
    }

    async fn check_eligibility(&self, wallet: &str) -> ProviderEligibilityResult {
        let endpoint = match &self.endpoint {
            Some(endpoint) => endpoint,
            None => {
                return ProviderEligibilityResult::unknown(
                    UNVERIFIABLE,
                    "Claim API endpoint not configured.",
                );
            }
        };

        if !self.claim_domain_trusted {
            return ProviderEligibilityResult::unknown(
                UNVERIFIABLE,
                "Claim URL domain is not trusted for this project.",
            );
        }

        let url = match Self::request_url(endpoint, wallet) {
            Some(url) => url,
            None => {
                tracing::warn!("Claim API endpoint for {} is not a valid URL", self.rule_id);
                return ProviderEligibilityResult::unknown(
                    CLAIM_API_UNREACHABLE,
                    "Unable to reach claim API endpoint.",
                );
            }
        };

        tracing::debug!("Querying claim API for {}: {}", self.rule_id, url.path());

        let response = match self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Claim API for {} unreachable: {}", self.rule_id, e);
                return ProviderEligibilityResult::unknown(
                    CLAIM_API_UNREACHABLE,
                    "Unable to reach claim API endpoint.",
                );
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Claim API for {} returned {}", self.rule_id, status);
            return ProviderEligibilityResult::unknown(
                CLAIM_API_HTTP_ERROR,
                format!("Claim API error ({}).", status.as_u16()),
            );
        }

        match response.json::<ClaimApiResponse>().await {
            Ok(payload) => Self::parse_payload(payload).with_proof(serde_json::json!({
                "source": "claim_api",
                "httpStatus": status.as_u16(),
            })),
            Err(e) => {
                tracing::warn!("Claim API for {} sent an unreadable payload: {}", self.rule_id, e);
                ProviderEligibilityResult::unknown(
                    CLAIM_API_UNREACHABLE,
                    "Claim API returned an unreadable payload.",
                )
            }
        }
    }
}
