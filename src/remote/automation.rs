// src/remote/automation.rs

use std::future::Future;
use std::pin::Pin;

use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::{AnsibleCredentials, Secret};
use crate::errors::MultibuildError;

pub type LaunchFuture<'a> = Pin<Box<dyn Future<Output = Option<u64>> + Send + 'a>>;

/// Job-launching service used to regenerate compose repos.
pub trait RemoteAutomationClient: Send + Sync {
    /// Launch the regeneration job for `platform` and `nvr`.
    ///
    /// Failures are logged by the implementation and reported as `None`.
    fn launch_job<'a>(&'a self, platform: &'a str, nvr: &'a str) -> LaunchFuture<'a>;

    /// Human-facing URL of a launched job.
    fn job_url(&self, job_id: u64) -> String;
}

#[derive(Debug, Serialize)]
struct LaunchRequest<'a> {
    extra_vars: ExtraVars<'a>,
}

#[derive(Debug, Serialize)]
struct ExtraVars<'a> {
    platform: &'a str,
    new_package_nvr: &'a str,
}

#[derive(Debug, Deserialize)]
struct LaunchResponse {
    #[serde(default)]
    id: Option<u64>,
}

/// Ansible Tower / AWX client.
pub struct AnsibleClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: AnsibleCredentials,
    job_template: String,
}

impl AnsibleClient {
    pub fn new(
        credentials: AnsibleCredentials,
        job_template: impl Into<String>,
    ) -> crate::errors::Result<Self> {
        let base_url = Url::parse(&credentials.url).map_err(|e| {
            MultibuildError::ConfigError(format!("invalid ansible url '{}': {e}", credentials.url))
        })?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("multibuild/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            http,
            base_url,
            credentials,
            job_template: job_template.into(),
        })
    }

    async fn launch(&self, platform: &str, nvr: &str) -> Result<Option<u64>> {
        let url = self
            .base_url
            .join(&format!("/api/v2/job_templates/{}/launch/", self.job_template))
            .context("composing job launch url")?;

        let body = LaunchRequest {
            extra_vars: ExtraVars {
                platform,
                new_package_nvr: nvr,
            },
        };

        let request = self.http.post(url).json(&body);
        let request = match &self.credentials.secret {
            Secret::Token(token) => request.bearer_auth(token),
            Secret::Password(password) => {
                request.basic_auth(&self.credentials.username, Some(password))
            }
        };

        let response = request
            .send()
            .await
            .context("sending ansible launch request")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!(%status, response = %text, "ansible error response");
            return Err(anyhow!("ansible responded with {status}"));
        }

        let result: LaunchResponse = response
            .json()
            .await
            .context("parsing ansible launch response")?;

        Ok(result.id)
    }
}

impl RemoteAutomationClient for AnsibleClient {
    fn launch_job<'a>(&'a self, platform: &'a str, nvr: &'a str) -> LaunchFuture<'a> {
        Box::pin(async move {
            info!(platform, nvr, template = %self.job_template, "launching ansible job");
            match self.launch(platform, nvr).await {
                Ok(Some(id)) => Some(id),
                Ok(None) => {
                    error!(platform, nvr, "job ID wasn't found / job didn't start");
                    None
                }
                Err(err) => {
                    error!(platform, nvr, error = %err, "ansible job launch failed");
                    None
                }
            }
        })
    }

    fn job_url(&self, job_id: u64) -> String {
        format!(
            "{}/#/jobs/playbook/{job_id}/output",
            self.base_url.as_str().trim_end_matches('/')
        )
    }
}
