pub mod rule;
pub mod wallet;
pub mod eligibility;
pub mod safety;
pub mod transfer;

pub use rule::{
    AirdropRule, AirdropTimeline, Category, LifecycleStatus, Network, RiskLevel, RuleChecks,
    VerificationMethod,
};
pub use wallet::{TokenHolding, WalletProfile, LAMPORTS_PER_SOL};
pub use eligibility::{
    AirdropEvaluation, ClaimableAmount, EligibilityStatus, MatchProof, ProviderEligibilityResult,
    ProviderStatus,
};
pub use safety::{ClaimSafety, SafetyGrade};
pub use transfer::{HistoryReport, PastAirdrop, TransferEvent};
