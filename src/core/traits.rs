use async_trait::async_trait;
use crate::models::ProviderEligibilityResult;

/// Core abstraction: anything that can answer "is this wallet eligible"
/// for one campaign.
///
/// Implementations are total. Transport failures and missing configuration
/// come back as an `Unknown` result, never as an error.
#[async_trait]
pub trait EligibilityProvider: Send + Sync {
    /// Unique identifier for this provider kind
    fn name(&self) -> &'static str;
    
    /// Check a wallet address against the campaign this provider was built for
    async fn check_eligibility(&self, wallet: &str) -> ProviderEligibilityResult;
}
