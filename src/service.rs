//! The monitoring canister's call surface.

use async_trait::async_trait;

use crate::Result;
use crate::models::TopUpResult;

/// Remote calls offered by the balance-monitoring canister.
///
/// Implementations forward each call verbatim and perform no validation of
/// their own. [`Session`](crate::session::Session) is the real one; tests
/// substitute scripted fakes.
#[async_trait]
pub trait MonitorService: Send + Sync {
    /// Last recorded balance in e8s, if the canister has recorded one.
    async fn last_balance_e8s(&self) -> Result<Option<u64>>;

    /// Next automatic check, nanoseconds since the Unix epoch.
    async fn next_check_utc_ns(&self) -> Result<u64>;

    /// Runs the balance check and, if needed, submits a top-up.
    async fn run_topup(&self) -> Result<TopUpResult>;
}
