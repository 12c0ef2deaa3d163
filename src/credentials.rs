//! Caller identity stored in the system keychain.
//!
//! The canister is called anonymously unless a PEM-encoded Ed25519 key has
//! been saved under the `identity_pem` entry of the `topup-monitor` keychain
//! service (for example the output of `dfx identity export <name>`).

use std::sync::Arc;

use ic_agent::Identity;
use ic_agent::identity::BasicIdentity;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::{MonitorError, Result};

/// Keychain service name used for all stored credentials.
const SERVICE: &str = "topup-monitor";

/// Keychain entry holding the identity PEM.
const IDENTITY_ENTRY: &str = "identity_pem";

/// Loads the PEM from the keychain, returning `None` if not set.
fn load_pem() -> Option<Zeroizing<String>> {
    let entry = keyring::Entry::new(SERVICE, IDENTITY_ENTRY).ok()?;
    match entry.get_password() {
        Ok(pem) => Some(Zeroizing::new(pem)),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            warn!(entry = IDENTITY_ENTRY, error = %e, "failed to read keychain entry");
            None
        }
    }
}

/// Parses a PEM-encoded Ed25519 private key into an agent identity.
///
/// # Errors
///
/// Returns [`MonitorError::Identity`] if the PEM cannot be parsed.
pub fn identity_from_pem(pem: &str) -> Result<Arc<dyn Identity>> {
    let identity = BasicIdentity::from_pem(pem.as_bytes())
        .map_err(|e| MonitorError::Identity(format!("invalid identity PEM: {e}")))?;
    Ok(Arc::new(identity))
}

/// Returns the stored caller identity, or `None` to call anonymously.
///
/// # Errors
///
/// Returns [`MonitorError::Identity`] if an entry exists but does not parse.
pub fn load_identity() -> Result<Option<Arc<dyn Identity>>> {
    let Some(pem) = load_pem() else {
        debug!("no stored identity, calling anonymously");
        return Ok(None);
    };
    identity_from_pem(&pem).map(Some)
}
