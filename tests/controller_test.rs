//! View controller behaviour against a scripted canister.

mod common;

use std::sync::Arc;

use tokio::sync::mpsc;
use topup_monitor::MonitorError;
use topup_monitor::controller::{CheckOutcome, Command, Phase, ViewController, ViewState};
use topup_monitor::models::{NextCheck, TopUpResult};
use topup_monitor::tui::Message;

use common::{FakeService, TopUpScript};

const BALANCE: u64 = 250_000_000;
const NEXT_CHECK_NS: u64 = 1_700_000_100_000_000_000;

fn connected(
    service: &Arc<FakeService>,
) -> (
    ViewController<FakeService>,
    mpsc::UnboundedReceiver<Message>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut controller = ViewController::new(tx);
    controller.attach(service.clone());
    (controller, rx)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Message>) -> Vec<Message> {
    let mut messages = Vec::new();
    while let Ok(message) = rx.try_recv() {
        messages.push(message);
    }
    messages
}

fn published_phases(messages: &[Message]) -> Vec<Phase> {
    messages
        .iter()
        .filter_map(|m| match m {
            Message::View(view) => Some(view.phase),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn initial_refresh_moves_loading_to_ready() {
    let service = Arc::new(FakeService::new(Some(BALANCE), NEXT_CHECK_NS));
    let (mut controller, _rx) = connected(&service);
    assert_eq!(controller.state().phase, Phase::Loading);

    controller.refresh().await.unwrap();

    let state = controller.state();
    assert_eq!(state.phase, Phase::Ready);
    assert_eq!(state.balance_label(), "2.5 ICP");
    assert_eq!(state.next_check, Some(NextCheck::from_nanos(NEXT_CHECK_NS)));
    assert_eq!(state.next_check_label(), "Tue, 14 Nov 2023 22:15:00 GMT");
}

#[tokio::test]
async fn failed_initial_refresh_stays_loading() {
    let service = Arc::new(FakeService::new(Some(BALANCE), NEXT_CHECK_NS));
    service.set_balance(Err("canister stopped"));
    let (mut controller, mut rx) = connected(&service);

    assert!(controller.refresh().await.is_err());
    assert_eq!(controller.state().phase, Phase::Loading);
    assert!(
        drain(&mut rx)
            .iter()
            .any(|m| matches!(m, Message::RefreshFailed(e) if e.contains("canister stopped")))
    );
}

#[tokio::test]
async fn failed_refresh_keeps_displayed_values() {
    let service = Arc::new(FakeService::new(Some(BALANCE), NEXT_CHECK_NS));
    let (mut controller, _rx) = connected(&service);
    controller.refresh().await.unwrap();
    let before: ViewState = controller.state().clone();

    // Balance would change, but the paired read fails.
    service.set_balance(Ok(Some(1)));
    service.set_next_check(Err("timeout"));
    assert!(controller.refresh().await.is_err());

    assert_eq!(controller.state(), &before);
}

#[tokio::test]
async fn absent_balance_replaces_previous_value() {
    let service = Arc::new(FakeService::new(Some(BALANCE), NEXT_CHECK_NS));
    let (mut controller, _rx) = connected(&service);
    controller.refresh().await.unwrap();

    service.set_balance(Ok(None));
    controller.refresh().await.unwrap();

    assert_eq!(controller.state().balance_e8s, None);
    assert_eq!(controller.state().balance_label(), "…");
}

#[tokio::test]
async fn rejected_check_is_reported_then_refreshed() {
    let service = Arc::new(FakeService::new(Some(BALANCE), NEXT_CHECK_NS));
    let (mut controller, mut rx) = connected(&service);
    controller.refresh().await.unwrap();
    drain(&mut rx);

    service.set_topup(TopUpScript::Reply(TopUpResult::Err(
        "insufficient funds".into(),
    )));
    service.set_balance(Ok(Some(100_000_000)));
    let refreshes = service.refreshes();

    let outcome = controller.run_check().await;

    assert_eq!(
        outcome,
        Some(CheckOutcome::Rejected("insufficient funds".into()))
    );
    assert_eq!(service.refreshes(), refreshes + 1);
    assert!(!controller.state().is_busy());
    assert_eq!(controller.state().phase, Phase::Ready);
    assert_eq!(controller.state().balance_label(), "1 ICP");

    let messages = drain(&mut rx);
    assert_eq!(
        published_phases(&messages),
        vec![Phase::Busy, Phase::Busy, Phase::Ready]
    );
    let outcome_at = messages
        .iter()
        .position(|m| matches!(m, Message::Outcome(_)))
        .unwrap();
    let refreshed_at = messages
        .iter()
        .position(|m| matches!(m, Message::View(v) if v.balance_e8s == Some(100_000_000)))
        .unwrap();
    assert!(outcome_at < refreshed_at);
}

#[tokio::test]
async fn submitted_check_is_acknowledged() {
    let service = Arc::new(FakeService::new(Some(BALANCE), NEXT_CHECK_NS));
    let (mut controller, _rx) = connected(&service);

    let outcome = controller.run_check().await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.message(), "Top-up proposal submitted");
    assert_eq!(service.refreshes(), 1);
}

#[tokio::test]
async fn transport_error_still_refreshes_and_clears_busy() {
    let service = Arc::new(FakeService::new(Some(BALANCE), NEXT_CHECK_NS));
    service.set_topup(TopUpScript::TransportError("connection reset".into()));
    let (mut controller, _rx) = connected(&service);

    let outcome = controller.run_check().await.unwrap();

    assert!(matches!(outcome, CheckOutcome::Failed(ref e) if e.contains("connection reset")));
    assert_eq!(service.refreshes(), 1);
    assert_eq!(controller.state().phase, Phase::Ready);
}

#[tokio::test]
async fn panicking_call_still_refreshes_and_clears_busy() {
    let service = Arc::new(FakeService::new(Some(BALANCE), NEXT_CHECK_NS));
    service.set_topup(TopUpScript::Panic);
    let (mut controller, _rx) = connected(&service);

    let outcome = controller.run_check().await.unwrap();

    assert!(matches!(outcome, CheckOutcome::Failed(_)));
    assert_eq!(service.refreshes(), 1);
    assert!(!controller.state().is_busy());
}

#[tokio::test]
async fn busy_clears_even_when_follow_up_refresh_fails() {
    let service = Arc::new(FakeService::new(Some(BALANCE), NEXT_CHECK_NS));
    service.set_next_check(Err("timeout"));
    let (mut controller, mut rx) = connected(&service);

    controller.run_check().await.unwrap();

    assert_eq!(service.refreshes(), 1);
    assert_eq!(controller.state().phase, Phase::Ready);
    assert_eq!(controller.state().balance_e8s, None);
    assert!(
        drain(&mut rx)
            .iter()
            .any(|m| matches!(m, Message::RefreshFailed(_)))
    );
}

#[tokio::test]
async fn repeated_triggers_run_one_check() {
    let service = Arc::new(FakeService::new(Some(BALANCE), NEXT_CHECK_NS));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    for _ in 0..3 {
        cmd_tx.send(Command::RunCheck).unwrap();
    }
    drop(cmd_tx);

    let session = service.clone();
    ViewController::new(tx)
        .run(async move { Ok(session) }, cmd_rx)
        .await;

    assert_eq!(service.topups(), 1);
    // Initial refresh plus the one after the check.
    assert_eq!(service.refreshes(), 2);
    let messages = drain(&mut rx);
    assert_eq!(
        messages
            .iter()
            .filter(|m| matches!(m, Message::Outcome(_)))
            .count(),
        1
    );
}

#[tokio::test]
async fn refresh_queued_during_check_is_covered_by_its_follow_up() {
    let service = Arc::new(FakeService::new(Some(BALANCE), NEXT_CHECK_NS));
    let (tx, _rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    cmd_tx.send(Command::RunCheck).unwrap();
    cmd_tx.send(Command::Refresh).unwrap();
    cmd_tx.send(Command::Refresh).unwrap();
    drop(cmd_tx);

    let session = service.clone();
    ViewController::new(tx)
        .run(async move { Ok(session) }, cmd_rx)
        .await;

    assert_eq!(service.topups(), 1);
    // Initial refresh plus the check's own; the queued ones are dropped.
    assert_eq!(service.refreshes(), 2);
}

#[tokio::test]
async fn refresh_commands_are_served() {
    let service = Arc::new(FakeService::new(Some(BALANCE), NEXT_CHECK_NS));
    let (tx, _rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    cmd_tx.send(Command::Refresh).unwrap();
    cmd_tx.send(Command::Refresh).unwrap();
    drop(cmd_tx);

    let session = service.clone();
    ViewController::new(tx)
        .run(async move { Ok(session) }, cmd_rx)
        .await;

    assert_eq!(service.refreshes(), 3);
    assert_eq!(service.topups(), 0);
}

#[tokio::test]
async fn failed_connect_stays_loading_and_issues_no_calls() {
    let service = Arc::new(FakeService::new(Some(BALANCE), NEXT_CHECK_NS));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    cmd_tx.send(Command::RunCheck).unwrap();

    ViewController::<FakeService>::new(tx)
        .run(
            async { Err(MonitorError::Config("no replica".into())) },
            cmd_rx,
        )
        .await;

    assert_eq!(service.refreshes(), 0);
    assert_eq!(service.topups(), 0);
    let messages = drain(&mut rx);
    assert_eq!(published_phases(&messages), vec![Phase::Loading]);
    assert!(
        messages
            .iter()
            .any(|m| matches!(m, Message::ConnectFailed(e) if e.contains("no replica")))
    );
}

/// Walks the full page scenario: load, reject, re-fetch.
#[tokio::test]
async fn insufficient_funds_scenario() {
    let service = Arc::new(FakeService::new(Some(BALANCE), NEXT_CHECK_NS));
    service.set_topup(TopUpScript::Reply(TopUpResult::Err(
        "insufficient funds".into(),
    )));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    cmd_tx.send(Command::RunCheck).unwrap();
    drop(cmd_tx);

    let mut app = topup_monitor::tui::App::new(topup_monitor::config::Environment::Development);
    let session = service.clone();
    ViewController::new(tx)
        .run(async move { Ok(session) }, cmd_rx)
        .await;
    for message in drain(&mut rx) {
        topup_monitor::tui::event::update(&mut app, message);
    }

    assert_eq!(app.view.balance_label(), "2.5 ICP");
    assert_eq!(app.view.next_check_label(), "Tue, 14 Nov 2023 22:15:00 GMT");
    assert_eq!(
        app.notice.as_ref().map(CheckOutcome::message).as_deref(),
        Some("Error: insufficient funds")
    );
    assert!(!app.view.is_busy());
    assert!(app.can_run_check());
    assert_eq!(service.refreshes(), 2);
}
