// src/logging.rs

//! Diagnostics go to STDERR; the per-branch report owns STDOUT.
//!
//! The filter comes from `--log-level` when given, otherwise from the
//! `MULTIBUILD_LOG` environment variable, which takes full `EnvFilter`
//! directives such as `multibuild=debug,reqwest=warn`. Without either, the
//! filter is [`DEFAULT_DIRECTIVES`].
//!
//! Branch tasks run inside a `branch` span (see the orchestrator), so every
//! line they emit carries a `branch{branch=f40}:` prefix and interleaved
//! output from parallel tasks stays attributable.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "MULTIBUILD_LOG";

/// Used when neither the flag nor the environment selects a filter.
pub const DEFAULT_DIRECTIVES: &str = "info,hyper=warn,reqwest=warn";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(cli_level, env_value.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))?;

    if cli_level.is_none() {
        if let Some(raw) = env_value.as_deref().filter(|v| !v.trim().is_empty()) {
            if EnvFilter::try_new(raw).is_err() {
                tracing::warn!(value = raw, "ignoring unparsable {LOG_ENV_VAR}");
            }
        }
    }

    Ok(())
}

/// Pick the filter: explicit flag, then `env_value`, then the default.
///
/// An unparsable `env_value` falls back to the default.
pub fn build_filter(cli_level: Option<LogLevel>, env_value: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level_directive(level));
    }

    env_value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

fn level_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
