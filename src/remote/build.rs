// src/remote/build.rs

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::{Context, bail};
use serde::Deserialize;
use tracing::debug;

use crate::exec::CommandRunner;

/// Runner label of build lookups; they are not tied to one branch.
const GET_BUILD_LABEL: &str = "get_build";

/// Build metadata as returned by `getBuild`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildRecord {
    #[serde(default)]
    pub build_id: Option<u64>,
    #[serde(default)]
    pub nvr: String,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub state: Option<i64>,
}

pub type BuildFuture<'a> =
    Pin<Box<dyn Future<Output = anyhow::Result<Option<BuildRecord>>> + Send + 'a>>;

/// Lookup of build records by nvr.
///
/// `Ok(None)` means the build system does not know the nvr.
pub trait RemoteBuildClient: Send + Sync {
    fn get_build<'a>(&'a self, nvr: &'a str) -> BuildFuture<'a>;
}

/// Queries the build system through its command-line client
/// (`koji call --json getBuild <nvr>`).
///
/// One instance is created per run and shared by every branch task.
pub struct CliBuildClient {
    service: String,
    runner: Arc<dyn CommandRunner>,
}

impl CliBuildClient {
    pub fn new(service: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            service: service.into(),
            runner,
        }
    }
}

impl RemoteBuildClient for CliBuildClient {
    fn get_build<'a>(&'a self, nvr: &'a str) -> BuildFuture<'a> {
        Box::pin(async move {
            debug!(service = %self.service, nvr, "getting build data from the build system");
            let command = format!("{} call --json getBuild {}", self.service, nvr);
            let output = self.runner.run(GET_BUILD_LABEL, &command, None).await;

            if !output.success() {
                bail!(
                    "{} getBuild exited with code {}: {}",
                    self.service,
                    output.exit_code,
                    output.stderr.trim()
                );
            }

            let record: Option<BuildRecord> = serde_json::from_str(output.stdout.trim())
                .with_context(|| format!("decoding getBuild response for '{nvr}'"))?;
            Ok(record)
        })
    }
}
