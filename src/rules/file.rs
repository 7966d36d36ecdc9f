use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

use super::RuleStore;
use crate::models::AirdropRule;
use crate::utils::{EngineError, Result};

/// One row of the admin export; inactive rows are kept in the file but
/// never evaluated.
#[derive(Debug, Deserialize)]
struct StoredRule {
    #[serde(flatten)]
    rule: AirdropRule,
    #[serde(default = "default_active", rename = "isActive")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Rules read from a JSON array exported by the admin tooling
pub struct JsonFileRuleStore {
    path: PathBuf,
}

impl JsonFileRuleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RuleStore for JsonFileRuleStore {
    fn name(&self) -> &'static str {
        "json-file"
    }

    async fn active_rules(&self) -> Result<Vec<AirdropRule>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            EngineError::RuleStore(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        // A bad row is skipped on its own; only a broken array fails the load
        let rows: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
        let mut rules = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            match serde_json::from_value::<StoredRule>(row) {
                Ok(stored) if stored.is_active => rules.push(stored.rule),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Skipping rule row {} in {}: {}", index, self.path.display(), e);
                }
            }
        }

        rules.sort_by(|a, b| a.project.cmp(&b.project));
        Ok(rules)
    }
}
