pub mod traits;
pub mod evaluator;

pub use traits::EligibilityProvider;
pub use evaluator::{AirdropEvaluator, RuleCheckOutcome, check_rule, claim_action_enabled};
