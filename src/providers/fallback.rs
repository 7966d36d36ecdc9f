use async_trait::async_trait;

use crate::core::EligibilityProvider;
use crate::models::ProviderEligibilityResult;
use crate::scoring::provider::UNVERIFIABLE;

/// Campaign a human flagged as verified, with no automatic check attached.
///
/// Never reports more than it can justify.
pub struct ManualVerifiedProvider;

#[async_trait]
impl EligibilityProvider for ManualVerifiedProvider {
    fn name(&self) -> &'static str {
        "manual-verified"
    }

    async fn check_eligibility(&self, _wallet: &str) -> ProviderEligibilityResult {
        ProviderEligibilityResult::unknown(
            UNVERIFIABLE,
            "Manual verified project configured, but no machine-verifiable method attached yet.",
        )
    }
}

/// Default for unverified or unrecognized verification methods
pub struct UnsupportedProvider;

#[async_trait]
impl EligibilityProvider for UnsupportedProvider {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    async fn check_eligibility(&self, _wallet: &str) -> ProviderEligibilityResult {
        ProviderEligibilityResult::unknown(
            UNVERIFIABLE,
            "No verified provider for this project yet. Marked unknown intentionally.",
        )
    }
}
