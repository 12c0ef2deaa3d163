//! Application configuration resolved once at startup.
//!
//! The target [`Environment`] follows the build profile: debug builds talk to
//! a local replica, release builds talk to mainnet. Each environment carries
//! its own replica host, its own default canister id and whether the agent
//! must fetch the replica's root key before its first call.
//!
//! An optional `INITIALIZER_CANISTER_ID` overrides the default canister id.

use candid::Principal;

/// Environment variable that overrides the canister id.
pub const CANISTER_ID_VAR: &str = "INITIALIZER_CANISTER_ID";

/// First canister id handed out by a fresh local replica.
const LOCAL_CANISTER_ID: &str = "rrkah-fqaaa-aaaaa-aaaaq-cai";

/// Mainnet canister id, baked in when building a release.
const IC_CANISTER_ID: Option<&str> = option_env!("INITIALIZER_CANISTER_ID_IC");

const LOCAL_HOST: &str = "http://127.0.0.1:4943";
const IC_HOST: &str = "https://icp-api.io";

/// Deployment target of this build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    /// Local replica started by `dfx start`.
    Development,
    /// Internet Computer mainnet.
    Production,
}

impl Environment {
    /// Returns the environment selected by the build profile.
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    /// Replica URL the agent connects to.
    pub fn host(self) -> &'static str {
        match self {
            Environment::Development => LOCAL_HOST,
            Environment::Production => IC_HOST,
        }
    }

    /// Whether the root key has to be fetched before the first call.
    ///
    /// Mainnet's root key ships with the agent; a local replica generates
    /// its own on startup.
    pub fn fetches_root_key(self) -> bool {
        matches!(self, Environment::Development)
    }

    fn default_canister_id(self) -> Option<&'static str> {
        match self {
            Environment::Development => Some(LOCAL_CANISTER_ID),
            Environment::Production => IC_CANISTER_ID,
        }
    }

    /// Short network label for display.
    pub fn label(self) -> &'static str {
        match self {
            Environment::Development => "local",
            Environment::Production => "ic",
        }
    }
}

/// Top-level application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub service: ServiceConfig,
}

/// Where and how to reach the monitoring canister.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub environment: Environment,
    pub host: String,
    pub canister_id: Principal,
}

/// Loads the configuration for the environment this binary was built for.
///
/// # Errors
///
/// See [`resolve_config`].
pub fn fetch_config() -> crate::Result<AppConfig> {
    resolve_config(Environment::from_build())
}

/// Resolves the configuration for `environment`.
///
/// The canister id comes from `INITIALIZER_CANISTER_ID` when set and
/// non-empty, otherwise from the environment's default.
///
/// # Errors
///
/// Returns [`MonitorError::Config`](crate::MonitorError::Config) if no
/// canister id is available or it is not valid principal text.
pub fn resolve_config(environment: Environment) -> crate::Result<AppConfig> {
    let raw_id = non_empty_var(CANISTER_ID_VAR)
        .or_else(|| environment.default_canister_id().map(String::from))
        .ok_or_else(|| {
            crate::MonitorError::Config(format!(
                "no canister id for the {} network; set {CANISTER_ID_VAR}",
                environment.label()
            ))
        })?;

    let canister_id = Principal::from_text(&raw_id).map_err(|e| {
        crate::MonitorError::Config(format!("invalid canister id {raw_id:?}: {e}"))
    })?;

    Ok(AppConfig {
        service: ServiceConfig {
            environment,
            host: environment.host().to_string(),
            canister_id,
        },
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
