//! Result of the `run_topup` update call.

use candid::CandidType;
use serde::Deserialize;

/// Candid `variant { ok; err : text }`.
#[derive(CandidType, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum TopUpResult {
    /// The canister checked the balance and submitted its top-up proposal.
    #[serde(rename = "ok")]
    Ok,
    /// The canister refused or failed, with a human-readable reason.
    #[serde(rename = "err")]
    Err(String),
}
