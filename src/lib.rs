pub mod chain;
pub mod config;
pub mod core;
pub mod history;
pub mod metadata;
pub mod models;
pub mod profile;
pub mod providers;
pub mod rules;
pub mod scoring;
pub mod utils;
pub mod verification;

pub use config::EngineConfig;
pub use core::{AirdropEvaluator, EligibilityProvider};
pub use history::HistoryScanner;
pub use models::{
    AirdropEvaluation, AirdropRule, ClaimSafety, EligibilityStatus, HistoryReport, PastAirdrop,
    ProviderEligibilityResult, SafetyGrade, WalletProfile,
};
pub use profile::build_wallet_profile;
pub use utils::{EngineError, Result};
