// src/sink.rs

//! Shared, append-only result buckets.
//!
//! Every branch task writes its command output into two streams (output and
//! errors) keyed by its branch name. Summary mode additionally appends one
//! entry per branch to the shared buckets [`SUMMARY_BUCKET`],
//! [`BUILDS_BUCKET`] and [`TAGS_BUCKET`].
//!
//! A single mutex guards both streams. Throughput is low and lines are short,
//! and one lock keeps per-bucket append order equal to observed order.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Build-info link markup, one per successfully summarised branch.
pub const SUMMARY_BUCKET: &str = "_summary";
/// Local verrel strings, one per successfully summarised branch.
pub const BUILDS_BUCKET: &str = "_builds";
/// Branch names, one per successfully summarised branch.
pub const TAGS_BUCKET: &str = "_tags";

/// Which stream of a bucket a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Output,
    Error,
}

#[derive(Debug, Default)]
struct Buckets {
    output: HashMap<String, Vec<String>>,
    errors: HashMap<String, Vec<String>>,
}

impl Buckets {
    fn stream_mut(&mut self, stream: Stream) -> &mut HashMap<String, Vec<String>> {
        match stream {
            Stream::Output => &mut self.output,
            Stream::Error => &mut self.errors,
        }
    }

    fn stream(&self, stream: Stream) -> &HashMap<String, Vec<String>> {
        match stream {
            Stream::Output => &self.output,
            Stream::Error => &self.errors,
        }
    }
}

/// Concurrency-safe multi-map from bucket name to an ordered list of lines.
///
/// There is no removal: a sink lives for exactly one orchestrator run.
#[derive(Debug, Default)]
pub struct ResultSink {
    inner: Mutex<Buckets>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `line` to the end of `bucket` in `stream`, creating it if needed.
    pub fn append(&self, stream: Stream, bucket: &str, line: impl Into<String>) {
        let mut guard = self.lock();
        guard
            .stream_mut(stream)
            .entry(bucket.to_string())
            .or_default()
            .push(line.into());
    }

    /// Append several `(bucket, line)` pairs under one lock, so that rows
    /// spread over parallel buckets stay aligned.
    pub fn append_row(&self, stream: Stream, row: &[(&str, String)]) {
        let mut guard = self.lock();
        let buckets = guard.stream_mut(stream);
        for (bucket, line) in row {
            buckets
                .entry((*bucket).to_string())
                .or_default()
                .push(line.clone());
        }
    }

    /// Snapshot of `bucket`; unknown buckets read as empty.
    pub fn read(&self, stream: Stream, bucket: &str) -> Vec<String> {
        self.lock()
            .stream(stream)
            .get(bucket)
            .cloned()
            .unwrap_or_default()
    }

    pub fn append_output(&self, bucket: &str, line: impl Into<String>) {
        self.append(Stream::Output, bucket, line);
    }

    pub fn append_error(&self, bucket: &str, line: impl Into<String>) {
        self.append(Stream::Error, bucket, line);
    }

    pub fn output(&self, bucket: &str) -> Vec<String> {
        self.read(Stream::Output, bucket)
    }

    pub fn errors(&self, bucket: &str) -> Vec<String> {
        self.read(Stream::Error, bucket)
    }

    fn lock(&self) -> MutexGuard<'_, Buckets> {
        // Appends never leave the maps half-updated, so a poisoned lock is
        // still safe to use.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
