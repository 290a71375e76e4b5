use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use multibuild::exec::{CommandOutput, CommandRunner, RunFuture, ShellRunner};
use multibuild::remote::{
    BuildFuture, BuildRecord, LaunchFuture, RemoteAutomationClient, RemoteBuildClient,
};

/// A fake command runner that:
/// - records every command it is asked to run, in order
/// - answers with the first scripted response whose prefix matches
/// - otherwise succeeds with empty output, or runs the command for real
///   when built with [`FakeRunner::passthrough`].
#[derive(Default)]
pub struct FakeRunner {
    responses: Vec<(String, CommandOutput)>,
    fallback: Option<ShellRunner>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unscripted commands are executed by a real [`ShellRunner`].
    pub fn passthrough() -> Self {
        Self {
            fallback: Some(ShellRunner::new()),
            ..Self::default()
        }
    }

    pub fn respond(mut self, prefix: &str, output: CommandOutput) -> Self {
        self.responses.push((prefix.to_string(), output));
        self
    }

    pub fn stdout(self, prefix: &str, stdout: &str) -> Self {
        self.respond(
            prefix,
            CommandOutput {
                stdout: stdout.to_string(),
                ..CommandOutput::default()
            },
        )
    }

    pub fn fail(self, prefix: &str, exit_code: i32, stderr: &str) -> Self {
        self.respond(
            prefix,
            CommandOutput {
                stdout: String::new(),
                stderr: stderr.to_string(),
                exit_code,
            },
        )
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(
        &'a self,
        label: &'a str,
        command: &'a str,
        pipe: Option<&'a str>,
    ) -> RunFuture<'a> {
        let recorded = match pipe {
            Some(p) => format!("{command} | {p}"),
            None => command.to_string(),
        };
        self.calls.lock().unwrap().push(recorded);

        let scripted = self
            .responses
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone());

        Box::pin(async move {
            match (scripted, &self.fallback) {
                (Some(output), _) => output,
                (None, Some(shell)) => shell.run(label, command, pipe).await,
                (None, None) => CommandOutput::default(),
            }
        })
    }
}

/// What the fake build system answers for one nvr.
#[derive(Debug, Clone)]
pub enum BuildAnswer {
    Found(BuildRecord),
    Fail(String),
}

/// A fake build system keyed by nvr; unknown nvrs are "not found".
#[derive(Default)]
pub struct FakeBuildClient {
    answers: HashMap<String, BuildAnswer>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl FakeBuildClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer a query for `queried` with a record carrying `nvr` and `build_id`.
    pub fn with_build(mut self, queried: &str, nvr: &str, build_id: Option<u64>) -> Self {
        self.answers.insert(
            queried.to_string(),
            BuildAnswer::Found(record(nvr, build_id)),
        );
        self
    }

    pub fn failing(mut self, queried: &str, message: &str) -> Self {
        self.answers
            .insert(queried.to_string(), BuildAnswer::Fail(message.to_string()));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl RemoteBuildClient for FakeBuildClient {
    fn get_build<'a>(&'a self, nvr: &'a str) -> BuildFuture<'a> {
        self.queries.lock().unwrap().push(nvr.to_string());
        let answer = self.answers.get(nvr).cloned();
        Box::pin(async move {
            match answer {
                Some(BuildAnswer::Found(record)) => Ok(Some(record)),
                Some(BuildAnswer::Fail(message)) => Err(anyhow::anyhow!(message)),
                None => Ok(None),
            }
        })
    }
}

pub fn record(nvr: &str, build_id: Option<u64>) -> BuildRecord {
    BuildRecord {
        build_id,
        nvr: nvr.to_string(),
        owner_name: None,
        state: None,
    }
}

/// A fake automation service returning a fixed job id (or none).
pub struct FakeAutomationClient {
    job_id: Option<u64>,
    launches: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeAutomationClient {
    pub fn new(job_id: Option<u64>) -> Self {
        Self {
            job_id,
            launches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// `(platform, nvr)` pairs in launch order.
    pub fn launches(&self) -> Vec<(String, String)> {
        self.launches.lock().unwrap().clone()
    }
}

impl RemoteAutomationClient for FakeAutomationClient {
    fn launch_job<'a>(&'a self, platform: &'a str, nvr: &'a str) -> LaunchFuture<'a> {
        self.launches
            .lock()
            .unwrap()
            .push((platform.to_string(), nvr.to_string()));
        let job_id = self.job_id;
        Box::pin(async move { job_id })
    }

    fn job_url(&self, job_id: u64) -> String {
        format!("https://tower.test/#/jobs/playbook/{job_id}/output")
    }
}
