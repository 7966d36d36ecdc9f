//! Calibration constants for every heuristic in the engine.
//!
//! These values have no derivation beyond observed behaviour of the
//! campaigns they were tuned against. Retune here, never inline.

/// Attribute-rule evaluation
pub mod attribute {
    /// Pass ratio at or above which a wallet is reported eligible
    pub const ELIGIBLE_RATIO: f64 = 0.8;
    /// Pass ratio at or above which a wallet is reported likely
    pub const LIKELY_RATIO: f64 = 0.5;
}

/// Claim-URL safety grading
pub mod safety {
    pub const HTTPS_BONUS: i32 = 2;
    pub const NON_HTTPS_PENALTY: i32 = -3;
    pub const AT_SIGN_PENALTY: i32 = -3;
    pub const PUNYCODE_PENALTY: i32 = -2;
    pub const TRUSTED_HOST_BONUS: i32 = 2;
    pub const UNTRUSTED_HOST_PENALTY: i32 = -2;
    pub const HIGH_RISK_PENALTY: i32 = -1;

    /// Minimum score graded safe; scores in [0, SAFE_SCORE) are caution
    pub const SAFE_SCORE: i32 = 3;
    pub const CAUTION_SCORE: i32 = 0;
}

/// Eligibility provider confidences (0-100)
pub mod provider {
    pub const CLAIM_API_ELIGIBLE: u8 = 95;
    pub const CLAIM_API_NOT_ELIGIBLE: u8 = 90;
    pub const CLAIM_API_HTTP_ERROR: u8 = 15;
    pub const CLAIM_API_UNREACHABLE: u8 = 10;
    pub const UNVERIFIABLE: u8 = 0;
}

/// Historical transfer classification (0.0-1.0)
pub mod transfer {
    pub const BASE_CONFIDENCE: f64 = 0.4;
    pub const UNKNOWN_SENDER_BONUS: f64 = 0.2;
    pub const EXTERNAL_SENDER_BONUS: f64 = 0.15;
    pub const LARGE_AMOUNT_BONUS: f64 = 0.15;
    pub const MULTI_INSTRUCTION_BONUS: f64 = 0.10;
    pub const MAX_CONFIDENCE: f64 = 1.0;

    /// Received amount (human units) above which a transfer counts as large
    pub const LARGE_AMOUNT_THRESHOLD: f64 = 100.0;
    /// Instruction count above which a transaction looks programmatic
    pub const MULTI_INSTRUCTION_THRESHOLD: usize = 3;

    /// Single cut-off separating likely airdrops from ordinary transfers
    pub const LIKELY_AIRDROP_THRESHOLD: f64 = 0.6;

    /// Native SOL increases below this are fee-refund noise
    pub const NATIVE_MIN_SOL: f64 = 0.01;
    /// Native increases at or above this reach the likely-airdrop threshold
    pub const NATIVE_AIRDROP_SOL: f64 = 0.05;
    /// Native increases at or above this are labelled distributions
    pub const NATIVE_DISTRIBUTION_SOL: f64 = 0.1;
    pub const NATIVE_AIRDROP_BONUS: f64 = 0.2;
    pub const NATIVE_DISTRIBUTION_BONUS: f64 = 0.1;
}

/// Round a 0.0-1.0 confidence to two decimals so threshold checks are exact
pub fn round_confidence(value: f64) -> f64 {
    (value.clamp(0.0, transfer::MAX_CONFIDENCE) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_weights_line_up_with_threshold() {
        let at_floor = round_confidence(transfer::BASE_CONFIDENCE + transfer::NATIVE_AIRDROP_BONUS);
        assert!(at_floor >= transfer::LIKELY_AIRDROP_THRESHOLD);
        assert!(transfer::BASE_CONFIDENCE < transfer::LIKELY_AIRDROP_THRESHOLD);
    }

    #[test]
    fn test_round_confidence() {
        assert_eq!(round_confidence(0.4 + 0.15), 0.55);
        assert_eq!(round_confidence(0.4 + 0.2 + 0.15 + 0.15 + 0.1), 1.0);
        assert_eq!(round_confidence(1.3), 1.0);
    }
}
