// src/distro/mod.rs

//! Branch classification.
//!
//! A branch name is mapped to a [`Distribution`] by an ordered rule table;
//! the first matching rule wins, so the table order is significant.
//! [`platform`] holds the second, independent table used by remote repo
//! regeneration.

pub mod platform;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::errors::{MultibuildError, Result};

pub use platform::ansible_platform;

/// Known distribution families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Distribution {
    Rhel,
    Fedora,
}

/// Distribution used for branches no rule recognises.
pub const DEFAULT_DISTRIBUTION: Distribution = Distribution::Rhel;

/// Local packaging tool and remote build service of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolset {
    /// e.g. `fedpkg`; provides `verrel`, `build`, `scratch-build`.
    pub local_tool: &'static str,
    /// e.g. `koji`; provides `call getBuild`, `tag-build`, `wait-repo`.
    pub remote_service: &'static str,
}

impl Distribution {
    pub fn toolset(self) -> Toolset {
        match self {
            Distribution::Rhel => Toolset {
                local_tool: "rhpkg",
                remote_service: "brew",
            },
            Distribution::Fedora => Toolset {
                local_tool: "fedpkg",
                remote_service: "koji",
            },
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Rhel => f.write_str("RHEL"),
            Distribution::Fedora => f.write_str("Fedora"),
        }
    }
}

/// Built-in rules. Do not reorder: the first match wins.
const BRANCH_PATTERNS: &[(&str, Distribution)] = &[
    (r"^f\d\d$", Distribution::Fedora),                // f39 f40
    (r"^epel\d$", Distribution::Fedora),               // epel9
    (r"^epel\d-playground$", Distribution::Fedora),    // epel8-playground
    (r"^el\d$", Distribution::Fedora),                 // el6
    (r"^(?:master|main|rawhide)", Distribution::Fedora),
    (r"^eng-rhel-\d$", Distribution::Rhel),            // eng-rhel-7
    (r"^eng-fedora-\d\d$", Distribution::Rhel),        // eng-fedora-30
];

static BUILTIN_RULES: LazyLock<Vec<(Regex, Distribution)>> = LazyLock::new(|| {
    BRANCH_PATTERNS
        .iter()
        .map(|(pattern, dist)| {
            (
                Regex::new(pattern).expect("built-in branch pattern is valid"),
                *dist,
            )
        })
        .collect()
});

/// Maps branch names to distributions with an ordered rule table.
#[derive(Debug, Clone)]
pub struct DistributionResolver {
    rules: Vec<(Regex, Distribution)>,
    default: Distribution,
}

impl Default for DistributionResolver {
    fn default() -> Self {
        Self {
            rules: BUILTIN_RULES.clone(),
            default: DEFAULT_DISTRIBUTION,
        }
    }
}

impl DistributionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with a custom table, tried in the given order.
    pub fn with_rules(
        rules: &[(&str, Distribution)],
        default: Distribution,
    ) -> std::result::Result<Self, regex::Error> {
        let rules = rules
            .iter()
            .map(|(pattern, dist)| Regex::new(pattern).map(|re| (re, *dist)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { rules, default })
    }

    /// Classify one branch. Unknown names fall back to the default
    /// distribution with a warning.
    pub fn classify(&self, branch: &str) -> Result<Distribution> {
        if branch.is_empty() {
            return Err(MultibuildError::EmptyBranchName);
        }

        if let Some((_, dist)) = self.rules.iter().find(|(re, _)| re.is_match(branch)) {
            return Ok(*dist);
        }

        warn!(
            branch,
            default = %self.default,
            "distribution wasn't recognized from branch; using default"
        );
        Ok(self.default)
    }

    /// Classify a whole set. All members must resolve to the same
    /// distribution.
    pub fn classify_set<S: AsRef<str>>(&self, branches: &[S]) -> Result<Distribution> {
        if branches.is_empty() {
            return Err(MultibuildError::EmptyBranchSet);
        }

        let distros = branches
            .iter()
            .map(|b| self.classify(b.as_ref()))
            .collect::<Result<BTreeSet<_>>>()?;

        let mut iter = distros.into_iter();
        match (iter.next(), iter.next()) {
            (Some(dist), None) => Ok(dist),
            _ => Err(MultibuildError::MixedDistribution {
                branches: branches.iter().map(|b| b.as_ref().to_string()).collect(),
            }),
        }
    }
}
