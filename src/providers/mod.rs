//! Eligibility providers, one per verification method

mod claim_api;
mod fallback;

pub use claim_api::ClaimApiProvider;
pub use fallback::{ManualVerifiedProvider, UnsupportedProvider};

use async_trait::async_trait;
use reqwest::Client;

use crate::core::EligibilityProvider;
use crate::models::{AirdropRule, ProviderEligibilityResult, VerificationMethod};

/// Tagged union over the supported verification mechanisms
pub enum Provider {
    ClaimApi(ClaimApiProvider),
    ManualVerified(ManualVerifiedProvider),
    Unsupported(UnsupportedProvider),
}

/// Select the provider for a rule's verification method.
///
/// `claim_domain_trusted` must be computed by the caller; providers do not
/// re-derive it. Anything without a dedicated provider gets `Unsupported`.
pub fn build_provider(client: &Client, rule: &AirdropRule, claim_domain_trusted: bool) -> Provider {
    match rule.verification_method {
        VerificationMethod::ClaimApi => {
            Provider::ClaimApi(ClaimApiProvider::new(client.clone(), rule, claim_domain_trusted))
        }
        VerificationMethod::ManualVerified => Provider::ManualVerified(ManualVerifiedProvider),
        VerificationMethod::DistributorProgram | VerificationMethod::Unverified => {
            Provider::Unsupported(UnsupportedProvider)
        }
    }
}

#[async_trait]
impl EligibilityProvider for Provider {
    fn name(&self) -> &'static str {
        match self {
            Provider::ClaimApi(p) => p.name(),
            Provider::ManualVerified(p) => p.name(),
            Provider::Unsupported(p) => p.name(),
        }
    }

    async fn check_eligibility(&self, wallet: &str) -> ProviderEligibilityResult {
        match self {
            Provider::ClaimApi(p) => p.check_eligibility(wallet).await,
            Provider::ManualVerified(p) => p.check_eligibility(wallet).await,
            Provider::Unsupported(p) => p.check_eligibility(wallet).await,
        }
    }
}
