#![allow(dead_code)]

use std::sync::Arc;

use multibuild::distro::Distribution;
use multibuild::exec::CommandRunner;
use multibuild::remote::{RemoteAutomationClient, RemoteBuildClient};
use multibuild::sink::ResultSink;
use multibuild::task::TaskContext;

use crate::fakes::{FakeBuildClient, FakeRunner};

pub const TEST_URL_TEMPLATE: &str = "https://koji.test/buildinfo?buildID=%d";

/// Builder for `TaskContext` to simplify test setup.
///
/// Defaults: a [`FakeRunner`] that succeeds silently, an empty
/// [`FakeBuildClient`], no automation client, Fedora tooling.
pub struct ContextBuilder {
    runner: Arc<dyn CommandRunner>,
    builds: Arc<dyn RemoteBuildClient>,
    automation: Option<Arc<dyn RemoteAutomationClient>>,
    sink: Arc<ResultSink>,
    distribution: Distribution,
    nvr_format: Option<String>,
    url_template: String,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self {
            runner: Arc::new(FakeRunner::new()),
            builds: Arc::new(FakeBuildClient::new()),
            automation: None,
            sink: Arc::new(ResultSink::new()),
            distribution: Distribution::Fedora,
            nvr_format: None,
            url_template: TEST_URL_TEMPLATE.to_string(),
        }
    }

    pub fn runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn builds(mut self, builds: Arc<dyn RemoteBuildClient>) -> Self {
        self.builds = builds;
        self
    }

    pub fn automation(mut self, automation: Arc<dyn RemoteAutomationClient>) -> Self {
        self.automation = Some(automation);
        self
    }

    pub fn sink(mut self, sink: Arc<ResultSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn nvr_format(mut self, format: &str) -> Self {
        self.nvr_format = Some(format.to_string());
        self
    }

    pub fn url_template(mut self, template: &str) -> Self {
        self.url_template = template.to_string();
        self
    }

    pub fn build(self) -> Arc<TaskContext> {
        Arc::new(TaskContext {
            runner: self.runner,
            builds: self.builds,
            automation: self.automation,
            sink: self.sink,
            distribution: self.distribution,
            nvr_format: self.nvr_format,
            url_template: self.url_template,
        })
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
