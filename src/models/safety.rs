use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyGrade {
    Risky,
    Caution,
    Safe,
}

impl SafetyGrade {
    pub fn from_score(score: i32) -> Self {
        use crate::scoring::safety::{CAUTION_SCORE, SAFE_SCORE};

        if score >= SAFE_SCORE {
            SafetyGrade::Safe
        } else if score >= CAUTION_SCORE {
            SafetyGrade::Caution
        } else {
            SafetyGrade::Risky
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SafetyGrade::Safe => "🟢",
            SafetyGrade::Caution => "🟡",
            SafetyGrade::Risky => "🔴",
        }
    }
}

/// Safety verdict for a campaign's claim destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSafety {
    pub grade: SafetyGrade,
    /// Contributing factors in evaluation order
    pub reasons: Vec<String>,
    pub hostname: String,
}
