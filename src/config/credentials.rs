// src/config/credentials.rs

//! Remote automation credentials, collected once per run.

use std::fmt;

use tracing::info;

use crate::config::model::AnsibleSection;
use crate::errors::{MultibuildError, Result};

/// How requests to the automation service authenticate.
#[derive(Clone, PartialEq, Eq)]
pub enum Secret {
    Token(String),
    Password(String),
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Secret::Token(t) => write!(f, "Token({})", mask(t)),
            Secret::Password(p) => write!(f, "Password({})", mask(p)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsibleCredentials {
    pub url: String,
    pub username: String,
    pub secret: Secret,
}

impl AnsibleCredentials {
    /// Collect credentials from the `[ansible]` section, falling back to
    /// `MULTIBUILD_ANSIBLE_*` environment variables.
    pub fn from_config(section: &AnsibleSection) -> Result<Self> {
        Self::collect(section, |key| std::env::var(key).ok())
    }

    /// Same as [`AnsibleCredentials::from_config`] with an injectable
    /// environment lookup.
    pub fn collect<F>(section: &AnsibleSection, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |configured: &Option<String>, var: &str| {
            configured
                .clone()
                .or_else(|| env(var))
                .filter(|v| !v.trim().is_empty())
        };

        let url = pick(&section.url, "MULTIBUILD_ANSIBLE_URL")
            .ok_or(MultibuildError::MissingCredentials("ansible url"))?;
        info!(%url, "using ansible url");

        let username = pick(&section.username, "MULTIBUILD_ANSIBLE_USERNAME")
            .ok_or(MultibuildError::MissingCredentials("ansible username"))?;
        info!(%username, "using ansible username");

        let secret = match pick(&section.token, "MULTIBUILD_ANSIBLE_TOKEN") {
            Some(token) => {
                info!(token = %mask(&token), "using ansible token");
                Secret::Token(token)
            }
            None => pick(&section.password, "MULTIBUILD_ANSIBLE_PASSWORD")
                .map(Secret::Password)
                .ok_or(MultibuildError::MissingCredentials(
                    "ansible token or password",
                ))?,
        };

        Ok(Self {
            url,
            username,
            secret,
        })
    }
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}
