//! Shared test utilities: a scripted stand-in for the monitoring canister.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use topup_monitor::models::TopUpResult;
use topup_monitor::service::MonitorService;
use topup_monitor::{MonitorError, Result};

/// What the fake's `run_topup` does when called.
#[derive(Clone, Debug)]
pub enum TopUpScript {
    Reply(TopUpResult),
    TransportError(String),
    Panic,
}

/// In-memory canister whose replies can be changed between calls.
pub struct FakeService {
    balance: Mutex<std::result::Result<Option<u64>, String>>,
    next_check: Mutex<std::result::Result<u64, String>>,
    topup: Mutex<TopUpScript>,
    pub balance_calls: AtomicUsize,
    pub next_check_calls: AtomicUsize,
    pub topup_calls: AtomicUsize,
}

impl FakeService {
    pub fn new(balance_e8s: Option<u64>, next_check_ns: u64) -> Self {
        Self {
            balance: Mutex::new(Ok(balance_e8s)),
            next_check: Mutex::new(Ok(next_check_ns)),
            topup: Mutex::new(TopUpScript::Reply(TopUpResult::Ok)),
            balance_calls: AtomicUsize::new(0),
            next_check_calls: AtomicUsize::new(0),
            topup_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_balance(&self, reply: std::result::Result<Option<u64>, &str>) {
        *self.balance.lock().unwrap() = reply.map_err(String::from);
    }

    pub fn set_next_check(&self, reply: std::result::Result<u64, &str>) {
        *self.next_check.lock().unwrap() = reply.map_err(String::from);
    }

    pub fn set_topup(&self, script: TopUpScript) {
        *self.topup.lock().unwrap() = script;
    }

    /// Number of refreshes attempted so far; every refresh reads the balance once.
    pub fn refreshes(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn topups(&self) -> usize {
        self.topup_calls.load(Ordering::SeqCst)
    }
}

fn remote_error(message: &str) -> MonitorError {
    MonitorError::Candid(candid::Error::msg(message))
}

#[async_trait]
impl MonitorService for FakeService {
    async fn last_balance_e8s(&self) -> Result<Option<u64>> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.balance.lock().unwrap().clone();
        reply.map_err(|e| remote_error(&e))
    }

    async fn next_check_utc_ns(&self) -> Result<u64> {
        self.next_check_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.next_check.lock().unwrap().clone();
        reply.map_err(|e| remote_error(&e))
    }

    async fn run_topup(&self) -> Result<TopUpResult> {
        self.topup_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.topup.lock().unwrap().clone();
        match script {
            TopUpScript::Reply(result) => Ok(result),
            TopUpScript::TransportError(e) => Err(remote_error(&e)),
            TopUpScript::Panic => panic!("replica went away mid-call"),
        }
    }
}
