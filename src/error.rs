//! Crate-level error types.
//!
//! [`MonitorError`] unifies every error source (configuration, agent
//! transport, candid decoding, terminal I/O) behind a single enum so callers
//! can match on the variant they care about while still using the `?`
//! operator for easy propagation.

use ic_agent::AgentError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// The service configuration could not be resolved.
    #[error("configuration error: {0}")]
    Config(String),

    /// The root key could not be fetched from the local replica.
    #[error("trust bootstrap failed: {0}")]
    Bootstrap(#[source] AgentError),

    /// A remote call to the canister failed.
    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    /// Candid encoding or decoding failed.
    #[error("candid error: {0}")]
    Candid(#[from] candid::Error),

    /// The stored caller identity could not be loaded.
    #[error("identity error: {0}")]
    Identity(String),

    /// A remote call was issued before a session existed.
    #[error("not connected")]
    NotConnected,

    /// Terminal setup, teardown or drawing failed.
    #[error("i/o error: {0}")]
    Io(String),
}
