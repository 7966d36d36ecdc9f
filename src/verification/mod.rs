//! Claim-destination verification
//!
//! Decides whether a campaign's claim URL points at a host the campaign
//! authorizes, and grades how safe that destination looks overall.

mod domains;
mod safety;

pub use domains::{
    ANNOUNCEMENT_ONLY_HOSTS, is_announcement_only_host, is_trusted_claim_domain,
    matches_trusted_host, normalize_host,
};
pub use safety::evaluate_claim_safety;
