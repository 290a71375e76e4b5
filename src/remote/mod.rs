// src/remote/mod.rs

//! Clients for the remote services a branch task talks to.
//!
//! - [`build`]: the build system holding authoritative build records.
//! - [`automation`]: the job service that regenerates compose repos.

pub mod automation;
pub mod build;

pub use automation::{AnsibleClient, LaunchFuture, RemoteAutomationClient};
pub use build::{BuildFuture, BuildRecord, CliBuildClient, RemoteBuildClient};
