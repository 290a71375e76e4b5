// src/config/model.rs

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

/// Build-info URL used when a service has no template configured.
pub const DEFAULT_BUILD_INFO_URL_TEMPLATE: &str =
    "https://brewweb.engineering.redhat.com/brew/buildinfo?buildID=%d";

/// Build-info URL for the Fedora koji instance.
pub const KOJI_BUILD_INFO_URL_TEMPLATE: &str =
    "https://koji.fedoraproject.org/koji/buildinfo?buildID=%d";

/// Built-in build-info URL template for a remote service.
pub fn default_build_info_url_template(service: &str) -> &'static str {
    match service {
        "koji" => KOJI_BUILD_INFO_URL_TEMPLATE,
        _ => DEFAULT_BUILD_INFO_URL_TEMPLATE,
    }
}

/// Default ansible job template launched by repo regeneration.
pub const DEFAULT_JOB_TEMPLATE: &str = "rcm-tools-compose-ss++Compose";

/// Default delay between two task starts, in seconds.
pub const DEFAULT_STAGGER_SECS: u64 = 3;

/// Configuration as read from one TOML file, before validation.
///
/// Every value is optional so that a project-local file can be layered over
/// the user config key by key (see [`RawConfigFile::layered_over`]).
///
/// ```toml
/// [branches]
/// active_branches = "f40, f41"
///
/// [nvr]
/// format = "mypkg-1.0-1.{branch}"
///
/// [koji]
/// build_info_url_template = "https://koji.fedoraproject.org/koji/buildinfo?buildID=%d"
///
/// [ansible]
/// url = "https://tower.example.com"
/// username = "me"
/// token = "..."
///
/// [run]
/// stagger_secs = 3
/// max_parallel = 0
/// ```
///
/// Tables that are not one of the known sections are remote-service sections
/// keyed by the service name (`koji`, `brew`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub branches: BranchesSection,

    #[serde(default)]
    pub nvr: NvrSection,

    #[serde(default)]
    pub ansible: AnsibleSection,

    #[serde(default)]
    pub run: RunSection,

    #[serde(flatten)]
    pub services: BTreeMap<String, ServiceSection>,
}

/// Validated configuration used by the rest of the application.
///
/// Construct via `ConfigFile::try_from(raw)` (see `validate.rs`).
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub branches: BranchesSection,
    pub nvr: NvrSection,
    pub ansible: AnsibleSection,
    pub run: RunSection,
    pub services: BTreeMap<String, ServiceSection>,
}

/// `[branches]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchesSection {
    /// Comma-separated fallback branch list.
    #[serde(default)]
    pub active_branches: Option<String>,
}

/// `[nvr]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NvrSection {
    /// Fixed verrel used instead of asking the packaging tool.
    /// `{branch}` is replaced by the branch name.
    #[serde(default)]
    pub format: Option<String>,
}

/// `[ansible]` section: remote automation endpoint and credentials.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnsibleSection {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub job_template: Option<String>,
}

/// `[run]` section: orchestration knobs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunSection {
    /// Seconds between two task starts.
    #[serde(default)]
    pub stagger_secs: Option<u64>,

    /// Upper bound on concurrently running tasks; `0` means unbounded.
    #[serde(default)]
    pub max_parallel: Option<usize>,
}

/// `[<service>]` section, e.g. `[koji]` or `[brew]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceSection {
    #[serde(default)]
    pub build_info_url_template: Option<String>,
}

impl RawConfigFile {
    /// Layer `self` over `base`: every value set in `self` wins.
    pub fn layered_over(self, base: RawConfigFile) -> RawConfigFile {
        let mut services = base.services;
        for (name, section) in self.services {
            let merged = match services.remove(&name) {
                Some(old) => ServiceSection {
                    build_info_url_template: section
                        .build_info_url_template
                        .or(old.build_info_url_template),
                },
                None => section,
            };
            services.insert(name, merged);
        }

        RawConfigFile {
            branches: BranchesSection {
                active_branches: self
                    .branches
                    .active_branches
                    .or(base.branches.active_branches),
            },
            nvr: NvrSection {
                format: self.nvr.format.or(base.nvr.format),
            },
            ansible: AnsibleSection {
                url: self.ansible.url.or(base.ansible.url),
                username: self.ansible.username.or(base.ansible.username),
                password: self.ansible.password.or(base.ansible.password),
                token: self.ansible.token.or(base.ansible.token),
                job_template: self.ansible.job_template.or(base.ansible.job_template),
            },
            run: RunSection {
                stagger_secs: self.run.stagger_secs.or(base.run.stagger_secs),
                max_parallel: self.run.max_parallel.or(base.run.max_parallel),
            },
            services,
        }
    }
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            branches: raw.branches,
            nvr: raw.nvr,
            ansible: raw.ansible,
            run: raw.run,
            services: raw.services,
        }
    }

    /// Branches from `branches.active_branches`, trimmed, empties dropped.
    pub fn active_branches(&self) -> Vec<String> {
        self.branches
            .active_branches
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|b| !b.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn nvr_format(&self) -> Option<&str> {
        self.nvr.format.as_deref()
    }

    /// Configured build-info URL template of a remote service.
    pub fn build_info_url_template(&self, service: &str) -> Option<&str> {
        self.services
            .get(service)
            .and_then(|s| s.build_info_url_template.as_deref())
    }

    pub fn stagger(&self) -> Duration {
        Duration::from_secs(self.run.stagger_secs.unwrap_or(DEFAULT_STAGGER_SECS))
    }

    /// `None` when the run is unbounded.
    pub fn max_parallel(&self) -> Option<usize> {
        self.run.max_parallel.filter(|n| *n > 0)
    }

    pub fn job_template(&self) -> &str {
        self.ansible
            .job_template
            .as_deref()
            .unwrap_or(DEFAULT_JOB_TEMPLATE)
    }
}
