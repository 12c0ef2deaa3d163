//! View controller for the monitoring front-end.
//!
//! [`ViewController`] owns the displayed state and is the only thing that
//! talks to the [`MonitorService`]. It runs as a single task fed by
//! [`Command`]s and publishes every state change to the UI as a
//! [`Message`], so the terminal stays responsive while a call is in flight.
//!
//! The controller moves through three phases:
//!
//! ```text
//! Loading --initial refresh ok--> Ready --run check--> Busy --refresh done--> Ready
//! ```
//!
//! A check always ends with exactly one refresh, however the call itself
//! went, and the controller only leaves `Busy` after that refresh settles.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::models::{NextCheck, PLACEHOLDER, Snapshot, TopUpResult, format_balance};
use crate::service::MonitorService;
use crate::tui::Message;
use crate::{MonitorError, Result};

/// Lifecycle phase of the view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been fetched successfully yet.
    #[default]
    Loading,
    /// Showing the last fetched values.
    Ready,
    /// A check is in flight.
    Busy,
}

/// Everything the UI needs to draw the monitor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub phase: Phase,
    /// Last fetched balance; `None` until fetched or when the canister has none.
    pub balance_e8s: Option<u64>,
    /// Last fetched next-check time.
    pub next_check: Option<NextCheck>,
}

impl ViewState {
    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Busy
    }

    pub fn balance_label(&self) -> String {
        format_balance(self.balance_e8s)
    }

    pub fn next_check_label(&self) -> String {
        self.next_check
            .and_then(NextCheck::display)
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    fn apply(&mut self, snapshot: Snapshot) {
        self.balance_e8s = snapshot.balance_e8s;
        self.next_check = Some(snapshot.next_check);
    }
}

/// How a triggered check ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The canister accepted the check and submitted its proposal.
    Submitted,
    /// The canister answered with an `err` result.
    Rejected(String),
    /// The call itself failed before producing a result.
    Failed(String),
}

impl CheckOutcome {
    /// Text presented to the user.
    pub fn message(&self) -> String {
        match self {
            CheckOutcome::Submitted => "Top-up proposal submitted".to_string(),
            CheckOutcome::Rejected(reason) => format!("Error: {reason}"),
            CheckOutcome::Failed(reason) => format!("Check failed: {reason}"),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CheckOutcome::Submitted)
    }
}

impl From<TopUpResult> for CheckOutcome {
    fn from(result: TopUpResult) -> Self {
        match result {
            TopUpResult::Ok => CheckOutcome::Submitted,
            TopUpResult::Err(reason) => CheckOutcome::Rejected(reason),
        }
    }
}

/// Requests sent from the UI to the controller task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Re-fetch balance and next-check time.
    Refresh,
    /// Run the check and top-up now.
    RunCheck,
}

/// Fetches both displayed values concurrently.
///
/// Either both reads succeed or the whole refresh fails.
pub async fn fetch_snapshot<S>(service: &S) -> Result<Snapshot>
where
    S: MonitorService + ?Sized,
{
    let (balance_e8s, next_check_ns) =
        tokio::try_join!(service.last_balance_e8s(), service.next_check_utc_ns())?;
    Ok(Snapshot {
        balance_e8s,
        next_check: NextCheck::from_nanos(next_check_ns),
    })
}

/// Owns the view state and drives the service.
pub struct ViewController<S: ?Sized> {
    service: Option<Arc<S>>,
    state: ViewState,
    tx: mpsc::UnboundedSender<Message>,
}

impl<S> ViewController<S>
where
    S: MonitorService + ?Sized,
{
    /// Creates a controller in the `Loading` phase with no session.
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            service: None,
            state: ViewState::default(),
            tx,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Binds the session handle. The phase is left untouched.
    pub fn attach(&mut self, service: Arc<S>) {
        self.service = Some(service);
    }

    /// Re-fetches balance and next-check time.
    ///
    /// On success both values are replaced and a `Loading` view becomes
    /// `Ready`. On failure the displayed values are left exactly as they
    /// were and the failure is reported to the UI.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::NotConnected`] without a session, otherwise
    /// whatever error the first failing read produced.
    pub async fn refresh(&mut self) -> Result<()> {
        let Some(service) = self.service.clone() else {
            return Err(MonitorError::NotConnected);
        };

        match fetch_snapshot(service.as_ref()).await {
            Ok(snapshot) => {
                debug!(?snapshot, "refreshed");
                self.state.apply(snapshot);
                if self.state.phase == Phase::Loading {
                    self.state.phase = Phase::Ready;
                }
                self.publish();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "refresh failed, keeping displayed values");
                self.send(Message::RefreshFailed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Runs the check and top-up.
    ///
    /// Returns `None` without doing anything when there is no session or a
    /// check is already in flight. Otherwise the view is `Busy` until the
    /// call has finished and the follow-up refresh has settled, after which
    /// it is `Ready` whatever either of them returned.
    pub async fn run_check(&mut self) -> Option<CheckOutcome> {
        let service = match &self.service {
            Some(service) if !self.state.is_busy() => service.clone(),
            _ => {
                debug!(state = ?self.state, "run check ignored");
                return None;
            }
        };

        self.state.phase = Phase::Busy;
        self.publish();

        let outcome = invoke_run_topup(service.as_ref()).await;
        info!(?outcome, "check finished");
        self.send(Message::Outcome(outcome.clone()));

        self.finish_check().await;
        Some(outcome)
    }

    /// Finalization shared by every way a check can end.
    async fn finish_check(&mut self) {
        // Failures are already reported by `refresh`.
        let _ = self.refresh().await;
        self.state.phase = Phase::Ready;
        self.publish();
    }

    /// Drives the controller: connects, performs the initial refresh and
    /// then serves commands until the command channel closes.
    ///
    /// If `connect` fails the view stays in `Loading` for good and the
    /// controller stops.
    ///
    /// Every command that arrives while a check runs is dropped once it
    /// finishes, a manual `Refresh` included. The check's own follow-up
    /// refresh already covers it.
    pub async fn run<F>(mut self, connect: F, mut commands: mpsc::UnboundedReceiver<Command>)
    where
        F: Future<Output = Result<Arc<S>>>,
    {
        self.publish();

        match connect.await {
            Ok(service) => {
                self.attach(service);
                self.send(Message::Connected);
                let _ = self.refresh().await;
            }
            Err(e) => {
                error!(error = %e, "failed to connect");
                self.send(Message::ConnectFailed(e.to_string()));
                return;
            }
        }

        while let Some(command) = commands.recv().await {
            match command {
                Command::Refresh => {
                    let _ = self.refresh().await;
                }
                Command::RunCheck => {
                    if self.run_check().await.is_some() {
                        discard_queued(&mut commands);
                    }
                }
            }
        }
        debug!("command channel closed, controller stopping");
    }

    fn publish(&self) {
        self.send(Message::View(self.state.clone()));
    }

    fn send(&self, message: Message) {
        // The UI may already be gone during shutdown.
        let _ = self.tx.send(message);
    }
}

/// Calls `run_topup`, folding transport errors and panics into the outcome.
async fn invoke_run_topup<S>(service: &S) -> CheckOutcome
where
    S: MonitorService + ?Sized,
{
    match AssertUnwindSafe(service.run_topup()).catch_unwind().await {
        Ok(Ok(result)) => CheckOutcome::from(result),
        Ok(Err(e)) => CheckOutcome::Failed(e.to_string()),
        Err(_) => CheckOutcome::Failed("run_topup call panicked".to_string()),
    }
}

/// Drops commands that piled up while a check was running.
fn discard_queued(commands: &mut mpsc::UnboundedReceiver<Command>) {
    while let Ok(command) = commands.try_recv() {
        debug!(?command, "discarding command queued during check");
    }
}
