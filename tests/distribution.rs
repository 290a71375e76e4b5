// tests/distribution.rs

use proptest::prelude::*;

use multibuild::distro::{DEFAULT_DISTRIBUTION, Distribution, DistributionResolver, ansible_platform};
use multibuild::errors::MultibuildError;

#[test]
fn builtin_table_classifies_known_branches() {
    let resolver = DistributionResolver::new();
    let cases = [
        ("f40", Distribution::Fedora),
        ("epel9", Distribution::Fedora),
        ("epel8-playground", Distribution::Fedora),
        ("el6", Distribution::Fedora),
        ("rawhide", Distribution::Fedora),
        ("main", Distribution::Fedora),
        ("eng-rhel-7", Distribution::Rhel),
        ("eng-fedora-30", Distribution::Rhel),
    ];
    for (branch, expected) in cases {
        assert_eq!(resolver.classify(branch).unwrap(), expected, "branch {branch}");
    }
}

#[test]
fn unknown_branch_falls_back_to_default() {
    let resolver = DistributionResolver::new();
    assert_eq!(resolver.classify("feature/foo").unwrap(), DEFAULT_DISTRIBUTION);
    // Patterns are anchored at the start.
    assert_eq!(resolver.classify("xf40").unwrap(), DEFAULT_DISTRIBUTION);
}

#[test]
fn toolsets_match_distributions() {
    assert_eq!(Distribution::Fedora.toolset().local_tool, "fedpkg");
    assert_eq!(Distribution::Fedora.toolset().remote_service, "koji");
    assert_eq!(Distribution::Rhel.toolset().local_tool, "rhpkg");
    assert_eq!(Distribution::Rhel.toolset().remote_service, "brew");
}

#[test]
fn empty_branch_name_is_rejected() {
    let resolver = DistributionResolver::new();
    assert!(matches!(resolver.classify(""), Err(MultibuildError::EmptyBranchName)));
}

#[test]
fn empty_set_is_rejected() {
    let resolver = DistributionResolver::new();
    let empty: [&str; 0] = [];
    assert!(matches!(resolver.classify_set(&empty), Err(MultibuildError::EmptyBranchSet)));
}

#[test]
fn mixed_set_error_lists_exactly_the_input() {
    let resolver = DistributionResolver::new();
    let branches = ["f40", "eng-rhel-8", "f41"];
    match resolver.classify_set(&branches) {
        Err(MultibuildError::MixedDistribution { branches: listed }) => {
            assert_eq!(listed, vec!["f40", "eng-rhel-8", "f41"]);
        }
        other => panic!("expected MixedDistribution, got {other:?}"),
    }
}

#[test]
fn first_matching_rule_wins() {
    let fedora_first = DistributionResolver::with_rules(
        &[(r"^eng-", Distribution::Fedora), (r"^eng-rhel-\d$", Distribution::Rhel)],
        Distribution::Rhel,
    )
    .unwrap();
    assert_eq!(fedora_first.classify("eng-rhel-8").unwrap(), Distribution::Fedora);

    let rhel_first = DistributionResolver::with_rules(
        &[(r"^eng-rhel-\d$", Distribution::Rhel), (r"^eng-", Distribution::Fedora)],
        Distribution::Fedora,
    )
    .unwrap();
    assert_eq!(rhel_first.classify("eng-rhel-8").unwrap(), Distribution::Rhel);
}

#[test]
fn platform_mapping() {
    assert_eq!(ansible_platform("eng-rhel-8").as_deref(), Some("rhel-8"));
    assert_eq!(ansible_platform("eng-rhel-10").as_deref(), Some("rhel-10"));
    assert_eq!(ansible_platform("eng-fedora-39").as_deref(), Some("fedora-39"));
    assert_eq!(ansible_platform("f40"), None);
}

fn branch_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (10u8..99).prop_map(|n| format!("f{n}")),
        (0u8..9).prop_map(|n| format!("epel{n}")),
        (0u8..9).prop_map(|n| format!("eng-rhel-{n}")),
        (10u8..99).prop_map(|n| format!("eng-fedora-{n}")),
        "[a-z]{1,8}",
    ]
}

proptest! {
    #[test]
    fn homogeneous_set_classifies_like_any_member(
        branches in proptest::collection::vec(branch_strategy(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let resolver = DistributionResolver::new();
        let member = pick.get(&branches);
        let member_dist = resolver.classify(member).unwrap();
        let homogeneous: Vec<String> = branches
            .iter()
            .filter(|b| resolver.classify(b).unwrap() == member_dist)
            .cloned()
            .collect();

        prop_assert_eq!(resolver.classify_set(&homogeneous).unwrap(), member_dist);
    }

    #[test]
    fn mixed_set_always_fails(
        fedora in (10u8..99).prop_map(|n| format!("f{n}")),
        rhel in (0u8..9).prop_map(|n| format!("eng-rhel-{n}")),
    ) {
        let resolver = DistributionResolver::new();
        let set = vec![fedora, rhel];
        let is_mixed = matches!(
            resolver.classify_set(&set),
            Err(MultibuildError::MixedDistribution { ref branches }) if *branches == set
        );
        prop_assert!(is_mixed);
    }
}
