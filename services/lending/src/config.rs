use std::time::Duration;

use serde::Deserialize;

use shelf_core::config::Config;
use shelf_core::tracing::LogFormat;

use crate::domain::types::DeferredWrite;

/// Lending service configuration loaded from `LENDING_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LendingConfig {
    /// Delay before a returned book is back on the shelf, in milliseconds
    /// (default 3000). Env var: `LENDING_RETURN_DELAY_MS`.
    #[serde(default = "default_return_delay_ms")]
    pub return_delay_ms: u64,
    /// `blind` (default) or `guarded`. Env var: `LENDING_DEFERRED_WRITE`.
    #[serde(default)]
    pub deferred_write: DeferredWrite,
    /// `json` (default) or `pretty`. Env var: `LENDING_LOG_FORMAT`.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_return_delay_ms() -> u64 {
    3000
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            return_delay_ms: default_return_delay_ms(),
            deferred_write: DeferredWrite::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config for LendingConfig {
    const ENV_PREFIX: &'static str = "LENDING_";
}

impl LendingConfig {
    pub fn return_delay(&self) -> Duration {
        Duration::from_millis(self.return_delay_ms)
    }

    /// Install the stdout subscriber in the configured [`LogFormat`].
    pub fn init_tracing(&self) {
        shelf_core::tracing::init_tracing(self.log_format);
    }
}
