//! Session client for the monitoring canister.
//!
//! [`connect`] builds an [`Agent`] for the configured replica and, against a
//! local replica, fetches its root key before handing the session out. A
//! [`Session`] never exists in a half-trusted state: if the root key cannot
//! be fetched, `connect` fails.

use std::sync::Arc;

use async_trait::async_trait;
use candid::{Decode, Encode, Principal};
use ic_agent::{Agent, Identity};
use tracing::{debug, info};

use crate::config::ServiceConfig;
use crate::models::TopUpResult;
use crate::service::MonitorService;
use crate::{MonitorError, Result};

const LAST_BALANCE_METHOD: &str = "last_balance_e8s";
const NEXT_CHECK_METHOD: &str = "next_check_utc_ns";
const RUN_TOPUP_METHOD: &str = "run_topup";

/// Connection handle bound to one canister.
pub struct Session {
    agent: Agent,
    canister_id: Principal,
}

/// Connects to the canister described by `config`.
///
/// Calls are anonymous unless an `identity` is supplied.
///
/// # Errors
///
/// Returns [`MonitorError::Agent`] if the agent cannot be built and
/// [`MonitorError::Bootstrap`] if the root key fetch fails.
pub async fn connect(
    config: &ServiceConfig,
    identity: Option<Arc<dyn Identity>>,
) -> Result<Session> {
    let mut builder = Agent::builder().with_url(config.host.clone());
    if let Some(identity) = identity {
        builder = builder.with_arc_identity(identity);
    }
    let agent = builder.build()?;

    if config.environment.fetches_root_key() {
        agent
            .fetch_root_key()
            .await
            .map_err(MonitorError::Bootstrap)?;
        info!(host = %config.host, "fetched replica root key");
    }

    info!(
        canister = %config.canister_id,
        network = config.environment.label(),
        "session ready"
    );
    Ok(Session {
        agent,
        canister_id: config.canister_id,
    })
}

impl Session {
    pub fn canister_id(&self) -> Principal {
        self.canister_id
    }

    async fn query(&self, method: &str) -> Result<Vec<u8>> {
        debug!(method, "query");
        let reply = self
            .agent
            .query(&self.canister_id, method)
            .with_arg(Encode!()?)
            .call()
            .await?;
        Ok(reply)
    }

    async fn update(&self, method: &str) -> Result<Vec<u8>> {
        debug!(method, "update");
        let reply = self
            .agent
            .update(&self.canister_id, method)
            .with_arg(Encode!()?)
            .call_and_wait()
            .await?;
        Ok(reply)
    }
}

#[async_trait]
impl MonitorService for Session {
    async fn last_balance_e8s(&self) -> Result<Option<u64>> {
        let reply = self.query(LAST_BALANCE_METHOD).await?;
        Ok(Decode!(&reply, Option<u64>)?)
    }

    async fn next_check_utc_ns(&self) -> Result<u64> {
        let reply = self.query(NEXT_CHECK_METHOD).await?;
        Ok(Decode!(&reply, u64)?)
    }

    async fn run_topup(&self) -> Result<TopUpResult> {
        let reply = self.update(RUN_TOPUP_METHOD).await?;
        Ok(Decode!(&reply, TopUpResult)?)
    }
}
