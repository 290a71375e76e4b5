// tests/report.rs

use multibuild::orchestrator::{ReportStyle, render_report, ticket_template};
use multibuild::sink::{BUILDS_BUCKET, ResultSink, Stream, SUMMARY_BUCKET, TAGS_BUCKET};

fn summarised_sink() -> ResultSink {
    let sink = ResultSink::new();
    for (branch, verrel, id) in [("f40", "pkg-1.0-1.fc40", 111), ("f41", "pkg-1.0-1.fc41", 222)] {
        sink.append_row(
            Stream::Output,
            &[
                (SUMMARY_BUCKET, format!("[{verrel}|https://koji.test/b?id={id}]")),
                (BUILDS_BUCKET, verrel.to_string()),
                (TAGS_BUCKET, branch.to_string()),
            ],
        );
    }
    sink
}

fn render(sink: &ResultSink, style: ReportStyle) -> String {
    let mut out = Vec::new();
    render_report(&mut out, sink, &["f40", "f41"], style).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn plain_summary_lists_links() {
    let text = render(&summarised_sink(), ReportStyle::Plain);

    assert!(text.contains("Available builds summary:\n[pkg-1.0-1.fc40|https://koji.test/b?id=111]\n[pkg-1.0-1.fc41|https://koji.test/b?id=222]"));
    assert!(!text.contains("JIRA template:"));
}

#[test]
fn ticket_style_fills_template() {
    let text = render(&summarised_sink(), ReportStyle::Ticket);

    assert!(text.contains("JIRA template:"));
    assert!(text.contains("* pkg-1.0-1.fc40\n* pkg-1.0-1.fc41"));
    assert!(text.contains("Links:\n[pkg-1.0-1.fc40|https://koji.test/b?id=111]"));
    assert!(text.contains("respective *f40, f41* tags."));
}

#[test]
fn no_summary_section_without_summary_entries() {
    let sink = ResultSink::new();
    sink.append_output("f40", "hello\n");

    let text = render(&sink, ReportStyle::Ticket);

    assert!(text.contains("========== f40 =========="));
    assert!(text.contains("========== f41 =========="));
    assert!(!text.contains("JIRA template:"));
}

#[test]
fn ticket_template_layout() {
    let text = ticket_template(
        &["a-1-1".to_string()],
        &["[a-1-1|u]".to_string()],
        &["f40".to_string()],
    );
    assert!(text.starts_with("Project: RCM\nComponent: RCM Tools\n"));
    assert!(text.contains("Please include these packages into the compose:\n\n* a-1-1\n\nLinks:\n[a-1-1|u]\n"));
}
