// tests/result_sink.rs

use std::collections::HashMap;
use std::sync::Arc;

use multibuild::sink::{BUILDS_BUCKET, ResultSink, Stream, TAGS_BUCKET};

#[test]
fn unknown_bucket_reads_as_empty() {
    let sink = ResultSink::new();
    assert!(sink.output("nope").is_empty());
    assert!(sink.errors("nope").is_empty());
}

#[test]
fn output_and_error_streams_are_separate() {
    let sink = ResultSink::new();
    sink.append_output("f40", "out line\n");
    sink.append_error("f40", "err line\n");

    assert_eq!(sink.read(Stream::Output, "f40"), vec!["out line\n".to_string()]);
    assert_eq!(sink.read(Stream::Error, "f40"), vec!["err line\n".to_string()]);
}

#[test]
fn concurrent_appenders_to_one_bucket_lose_nothing() {
    const WRITERS: usize = 50;
    const LINES: usize = 50;

    let sink = Arc::new(ResultSink::new());
    let handles: Vec<_> = (0..WRITERS)
        .map(|w| {
            let sink = Arc::clone(&sink);
            std::thread::spawn(move || {
                for l in 0..LINES {
                    sink.append_output("shared", format!("writer-{w}-line-{l}"));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let lines = sink.output("shared");
    assert_eq!(lines.len(), WRITERS * LINES);

    // Each writer's lines are intact and in its own append order.
    let mut next_expected: HashMap<usize, usize> = HashMap::new();
    for line in &lines {
        let parts: Vec<&str> = line.split('-').collect();
        assert_eq!(parts.len(), 4, "corrupted line: {line}");
        let writer: usize = parts[1].parse().unwrap();
        let idx: usize = parts[3].parse().unwrap();
        let expected = next_expected.entry(writer).or_insert(0);
        assert_eq!(idx, *expected, "writer {writer} lines reordered");
        *expected += 1;
    }
    assert!(next_expected.values().all(|n| *n == LINES));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_tokio_tasks_on_distinct_buckets() {
    let sink = Arc::new(ResultSink::new());
    let mut handles = Vec::new();
    for b in 0..20 {
        let sink = Arc::clone(&sink);
        handles.push(tokio::spawn(async move {
            for l in 0..50 {
                sink.append_error(&format!("branch-{b}"), format!("{l}"));
                tokio::task::yield_now().await;
            }
        }));
    }
    for h in handles {
        h.await.unwrap();
    }

    for b in 0..20 {
        let expected: Vec<String> = (0..50).map(|l| l.to_string()).collect();
        assert_eq!(sink.errors(&format!("branch-{b}")), expected);
    }
}

#[test]
fn append_row_keeps_parallel_buckets_aligned() {
    let sink = Arc::new(ResultSink::new());
    let handles: Vec<_> = (0..30)
        .map(|i| {
            let sink = Arc::clone(&sink);
            std::thread::spawn(move || {
                sink.append_row(
                    Stream::Output,
                    &[
                        (BUILDS_BUCKET, format!("pkg-{i}")),
                        (TAGS_BUCKET, format!("branch-{i}")),
                    ],
                );
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let builds = sink.output(BUILDS_BUCKET);
    let tags = sink.output(TAGS_BUCKET);
    assert_eq!(builds.len(), 30);
    for (build, tag) in builds.iter().zip(tags.iter()) {
        assert_eq!(build.trim_start_matches("pkg-"), tag.trim_start_matches("branch-"));
    }
}
