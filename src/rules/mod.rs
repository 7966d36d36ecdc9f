//! Campaign-rule sources
//!
//! The engine only reads rules. Curation happens elsewhere and reaches us
//! either as an exported JSON file or through the built-in list.

mod builtin;
mod file;

pub use builtin::{builtin_rules, StaticRuleStore};
pub use file::JsonFileRuleStore;

use async_trait::async_trait;

use crate::models::AirdropRule;
use crate::utils::Result;

#[async_trait]
pub trait RuleStore: Send + Sync {
    fn name(&self) -> &'static str;

    /// Active campaigns, ordered by project name
    async fn active_rules(&self) -> Result<Vec<AirdropRule>>;
}

/// Rules from `store`, or the built-in list when the store is unreachable
/// or holds nothing.
pub async fn load_rules(store: &dyn RuleStore) -> Vec<AirdropRule> {
    match store.active_rules().await {
        Ok(rules) if !rules.is_empty() => {
            tracing::debug!("Loaded {} rules from {}", rules.len(), store.name());
            rules
        }
        Ok(_) => {
            tracing::warn!("Rule store '{}' is empty, using built-in rules", store.name());
            builtin_rules().to_vec()
        }
        Err(e) => {
            tracing::warn!("Rule store '{}' failed: {}, using built-in rules", store.name(), e);
            builtin_rules().to_vec()
        }
    }
}
