// src/orchestrator/report.rs

use std::io::{self, Write};

use console::style;

use crate::sink::{BUILDS_BUCKET, ResultSink, SUMMARY_BUCKET, TAGS_BUCKET};

/// How the summary buckets are printed after the per-branch blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportStyle {
    /// Plain list of build links.
    #[default]
    Plain,
    /// Ticket text asking for the builds to be added to the compose.
    Ticket,
}

/// Write one block per branch (errors, then output), followed by the summary
/// if any branch contributed to it.
///
/// Summary entries appear in the order the tasks produced them.
pub fn render_report<W: Write, S: AsRef<str>>(
    out: &mut W,
    sink: &ResultSink,
    branches: &[S],
    report_style: ReportStyle,
) -> io::Result<()> {
    for branch in branches {
        let branch = branch.as_ref();
        writeln!(out, "========== {branch} ==========")?;
        let errors = sink.errors(branch).concat();
        let output = sink.output(branch).concat();
        writeln!(out, "{}", style(format!("err: {errors}")).dim())?;
        writeln!(out, "{}", style(format!("out: {output}")).dim())?;
    }

    let summary = sink.output(SUMMARY_BUCKET);
    if summary.is_empty() {
        return Ok(());
    }

    match report_style {
        ReportStyle::Plain => {
            writeln!(out, "Available builds summary:")?;
            writeln!(out, "{}", summary.join("\n"))?;
        }
        ReportStyle::Ticket => {
            let builds = sink.output(BUILDS_BUCKET);
            let tags = sink.output(TAGS_BUCKET);
            writeln!(out, "JIRA template:")?;
            writeln!(out, "{}", ticket_template(&builds, &summary, &tags))?;
        }
    }

    Ok(())
}

/// Fixed ticket text with a bullet list of builds, the raw links, and the
/// comma-joined tag list.
pub fn ticket_template(builds: &[String], links: &[String], tags: &[String]) -> String {
    let builds = builds
        .iter()
        .map(|b| format!("* {b}"))
        .collect::<Vec<_>>()
        .join("\n");
    let links = links.join("\n");
    let tags = tags.join(", ");

    format!(
        "\
Project: RCM
Component: RCM Tools
Issue Type: Task
Title: Rerun compose with new RHEL and Fedora packages
The ticket description:
Please include these packages into the compose:

{builds}

Links:
{links}

The packages are already tagged in respective *{tags}* tags.
"
    )
}
