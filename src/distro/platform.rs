// src/distro/platform.rs

//! Branch → deployment platform mapping for remote repo regeneration.

use std::sync::LazyLock;

use regex::Regex;

/// First match wins.
const PLATFORM_PATTERNS: &[(&str, &str)] = &[
    (r"^eng-rhel-(\d+)", "rhel-${1}"),
    (r"^eng-fedora-(\d\d)", "fedora-${1}"),
];

static PLATFORM_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    PLATFORM_PATTERNS
        .iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("built-in platform pattern is valid"),
                *replacement,
            )
        })
        .collect()
});

/// Platform identifier for `branch`, e.g. `eng-rhel-8` → `rhel-8`.
///
/// Only the matched prefix is rewritten; anything after it is kept.
pub fn ansible_platform(branch: &str) -> Option<String> {
    PLATFORM_RULES
        .iter()
        .find(|(re, _)| re.is_match(branch))
        .map(|(re, replacement)| re.replacen(branch, 1, *replacement).into_owned())
}
