// src/task/mode.rs

/// What a branch task does after a successful checkout.
///
/// Selected once per run and shared by every task in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Run an arbitrary shell command (build, scratch-build, custom).
    Standard(String),
    /// Tag the remote build matching the local verrel.
    Tag,
    /// Collect build links into the shared summary buckets.
    Summary,
    /// Block until the build-root repo contains the local build.
    WaitRepo,
    /// Launch the remote compose repo regeneration job.
    RegenRemoteRepo,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Standard(_) => "standard",
            Mode::Tag => "tag",
            Mode::Summary => "summary",
            Mode::WaitRepo => "wait-repo",
            Mode::RegenRemoteRepo => "regen-remote-repo",
        }
    }
}
