// src/config/mod.rs

//! Configuration loading for multibuild.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load and layer config files from disk (`loader.rs`).
//! - Validate value formats (`validate.rs`).
//! - Collect remote automation credentials (`credentials.rs`).

pub mod credentials;
pub mod loader;
pub mod model;
pub mod validate;

pub use credentials::{AnsibleCredentials, Secret};
pub use loader::{load_and_validate, load_from_path, load_layered};
pub use model::{
    AnsibleSection, BranchesSection, ConfigFile, NvrSection, RawConfigFile, RunSection,
    ServiceSection,
};
