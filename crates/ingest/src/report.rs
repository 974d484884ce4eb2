use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Summary of one bulk load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub files_seen: usize,
    pub unsupported_files: usize,
    pub documents_loaded: usize,
    pub meaningless_documents: usize,
    pub dropped_documents: usize,
    pub by_subject: BTreeMap<String, usize>,
    pub elapsed_ms: f64,
}

impl LoadReport {
    pub fn record_document(&mut self, subject: &str, meaningful: bool, kept: bool) {
        self.files_seen += 1;
        if !meaningful {
            self.meaningless_documents += 1;
        }
        if kept {
            self.documents_loaded += 1;
            *self.by_subject.entry(subject.to_string()).or_default() += 1;
        } else {
            self.dropped_documents += 1;
        }
    }

    pub fn finish(&mut self, elapsed: Duration) {
        self.elapsed_ms = elapsed.as_micros() as f64 / 1000.0;
    }
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
