//! Shared models for the monitoring canister's replies.
//!
//! Contains the fixed-point balance formatting, the next-check timestamp and
//! the candid result type of the top-up call.

pub mod amount;
pub mod schedule;
pub mod topup;

pub use amount::format_balance;
pub use schedule::NextCheck;
pub use topup::TopUpResult;

/// Shown instead of a value that has not been fetched.
pub const PLACEHOLDER: &str = "…";

/// Values displayed by the front-end, fetched together by one refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Last recorded balance in e8s, `None` if the canister has none yet.
    pub balance_e8s: Option<u64>,
    /// When the canister will next evaluate the balance.
    pub next_check: NextCheck,
}
