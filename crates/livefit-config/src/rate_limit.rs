//! Rate limiting for the account endpoints.
//!
//! Signup and login are the only unauthenticated endpoints that do real work
//! per request (bcrypt), so they get a per-IP token bucket.
//!
//! # Configuration
//!
//! - `RATE_LIMIT_ENABLED`: `false` turns the limiter off (default: true)
//! - `RATE_LIMIT_SIGNUP_PER_SECOND`: Token replenishment interval for signup, in seconds (default: 10)
//! - `RATE_LIMIT_SIGNUP_BURST_SIZE`: Burst size for signup (default: 5)
//! - `RATE_LIMIT_LOGIN_PER_SECOND`: Token replenishment interval for login, in seconds (default: 2)
//! - `RATE_LIMIT_LOGIN_BURST_SIZE`: Burst size for login (default: 10)
//!
//! # Example
//!
//! ```ignore
//! let config = RateLimitConfig::from_env();
//! let login = config.login_governor_config()?;
//! let router = Router::new()
//!     .route("/login", post(login_handler))
//!     .layer(GovernorLayer::new(Arc::new(login)));
//! ```

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

use crate::{ConfigError, parsed_or};

pub type IpGovernorConfig =
    GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub signup_per_second: u64,
    pub signup_burst_size: u32,
    pub login_per_second: u64,
    pub login_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            signup_per_second: 10,
            signup_burst_size: 5,
            login_per_second: 2,
            login_burst_size: 10,
        }
    }
}

impl RateLimitConfig {
    /// Falls back to the defaults for unset or unparsable variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: parsed_or("RATE_LIMIT_ENABLED", defaults.enabled),
            signup_per_second: parsed_or("RATE_LIMIT_SIGNUP_PER_SECOND", defaults.signup_per_second),
            signup_burst_size: parsed_or("RATE_LIMIT_SIGNUP_BURST_SIZE", defaults.signup_burst_size),
            login_per_second: parsed_or("RATE_LIMIT_LOGIN_PER_SECOND", defaults.login_per_second),
            login_burst_size: parsed_or("RATE_LIMIT_LOGIN_BURST_SIZE", defaults.login_burst_size),
        }
    }

    /// Limiter off, for tests that drive the router without a peer address.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn signup_governor_config(&self) -> Result<IpGovernorConfig, ConfigError> {
        build(
            "RATE_LIMIT_SIGNUP_*",
            self.signup_per_second,
            self.signup_burst_size,
        )
    }

    pub fn login_governor_config(&self) -> Result<IpGovernorConfig, ConfigError> {
        build(
            "RATE_LIMIT_LOGIN_*",
            self.login_per_second,
            self.login_burst_size,
        )
    }
}

fn build(name: &'static str, per_second: u64, burst_size: u32) -> Result<IpGovernorConfig, ConfigError> {
    GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst_size)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| ConfigError::Invalid {
            name,
            value: format!("per_second={per_second}, burst_size={burst_size}"),
        })
}
