// tests/cli.rs

use clap::Parser;

use multibuild::cli::{Action, CliArgs};
use multibuild::distro::Distribution;
use multibuild::orchestrator::ReportStyle;
use multibuild::task::Mode;
use multibuild::mode_for_action;

#[test]
fn parses_branches_and_action() {
    let args = CliArgs::try_parse_from(["multibuild", "-t", "f40", "f41"]).unwrap();
    assert_eq!(args.branches, vec!["f40", "f41"]);
    assert_eq!(args.action(), Action::Tag);
}

#[test]
fn execute_takes_a_command() {
    let args = CliArgs::try_parse_from(["multibuild", "-e", "git log -1", "f40"]).unwrap();
    assert_eq!(args.action(), Action::Execute("git log -1".into()));
}

#[test]
fn gather_logs_takes_a_numeric_task_id() {
    let args = CliArgs::try_parse_from(["multibuild", "-l", "1234"]).unwrap();
    assert_eq!(args.action(), Action::GatherLogs(1234));
    assert!(CliArgs::try_parse_from(["multibuild", "-l", "abc"]).is_err());
}

#[test]
fn an_action_is_required() {
    assert!(CliArgs::try_parse_from(["multibuild", "f40"]).is_err());
}

#[test]
fn actions_are_mutually_exclusive() {
    assert!(CliArgs::try_parse_from(["multibuild", "-t", "-b", "f40"]).is_err());
}

#[test]
fn config_flag_is_accepted() {
    let args = CliArgs::try_parse_from(["multibuild", "-c", "/tmp/x.toml", "-p"]).unwrap();
    assert_eq!(args.config.as_deref(), Some(std::path::Path::new("/tmp/x.toml")));
    assert_eq!(args.action(), Action::Summary);
}

#[test]
fn actions_map_to_modes() {
    let fedora = Distribution::Fedora.toolset();

    assert_eq!(
        mode_for_action(&Action::Build, fedora),
        Some((Mode::Standard("fedpkg build".into()), ReportStyle::Plain))
    );
    assert_eq!(
        mode_for_action(&Action::ScratchBuild, Distribution::Rhel.toolset()),
        Some((Mode::Standard("rhpkg scratch-build --srpm".into()), ReportStyle::Plain))
    );
    assert_eq!(
        mode_for_action(&Action::Jira, fedora),
        Some((Mode::Summary, ReportStyle::Ticket))
    );
    assert_eq!(
        mode_for_action(&Action::RegenRepo, fedora),
        Some((Mode::RegenRemoteRepo, ReportStyle::Plain))
    );
    assert_eq!(mode_for_action(&Action::GatherLogs(1), fedora), None);
}
