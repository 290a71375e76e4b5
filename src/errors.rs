// src/errors.rs

//! Crate-wide error types.
//!
//! [`MultibuildError`] covers pre-flight failures that abort a whole run
//! before any branch task starts. [`BranchError`] is the terminal failure of
//! a single branch task; it is logged and reported but never leaves the
//! orchestrator.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MultibuildError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("there are neither branch arguments nor branches in config")]
    EmptyBranchSet,

    #[error("empty branch name")]
    EmptyBranchName,

    #[error("there are mixed branch names: {branches:?}")]
    MixedDistribution { branches: Vec<String> },

    #[error("missing remote automation credential: {0}")]
    MissingCredentials(&'static str),

    #[error("task id is not valid: {0}")]
    InvalidTaskId(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why a single branch task stopped early.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BranchError {
    #[error("checkout failed with exit code {exit_code}")]
    CheckoutFailed { exit_code: i32 },

    #[error("local verrel is not available")]
    MissingVerrel,

    #[error("remote build query failed: {0}")]
    RemoteQueryFailed(String),

    #[error("remote nvr '{remote}' does not match local verrel '{local}'")]
    RemoteRecordMismatch { local: String, remote: String },

    #[error("build_id wasn't found for '{0}'")]
    MissingBuildId(String),

    #[error("no platform mapping for branch '{0}'")]
    UnrecognizedPlatform(String),

    #[error("remote automation job did not start")]
    JobNotStarted,

    #[error("command exited with code {exit_code}")]
    CommandFailed { exit_code: i32 },

    #[error("task aborted: {0}")]
    Aborted(String),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, MultibuildError>;
