//! Terminal front-end for a scheduled ICP balance-monitoring and top-up
//! canister.
//!
//! Shows the canister's last recorded balance and its next scheduled check,
//! and offers one action that asks the canister to run the check right away.
//! All scheduling and top-up decisions stay in the canister; this crate only
//! connects, calls and displays.

pub mod config;
pub mod controller;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod models;
pub mod service;
pub mod session;
pub mod tui;

pub use error::{MonitorError, Result};
