use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Lightweight, lock-free counters sampled on demand. Mirrors the reference
/// database's own stats module, minus the storage/WAL/buffer-pool fields
/// that have no counterpart in an in-memory engine.
#[derive(Debug)]
pub struct EngineStats {
    start_time: Instant,
    documents_added: AtomicU64,
    documents_removed: AtomicU64,
    queries_run: AtomicU64,
    empty_result_queries: AtomicU64,
}

impl Default for EngineStats {
    fn default() -> Self {
        EngineStats {
            start_time: Instant::now(),
            documents_added: AtomicU64::new(0),
            documents_removed: AtomicU64::new(0),
            queries_run: AtomicU64::new(0),
            empty_result_queries: AtomicU64::new(0),
        }
    }
}

impl EngineStats {
    pub fn record_document_added(&self) {
        self.documents_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_document_removed(&self) {
        self.documents_removed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_query(&self, was_empty: bool) {
        self.queries_run.fetch_add(1, Ordering::Relaxed);
        if was_empty {
            self.empty_result_queries.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> EngineStatsSnapshot {
        EngineStatsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            documents_added: self.documents_added.load(Ordering::Relaxed),
            documents_removed: self.documents_removed.load(Ordering::Relaxed),
            queries_run: self.queries_run.load(Ordering::Relaxed),
            empty_result_queries: self.empty_result_queries.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStatsSnapshot {
    pub uptime_secs: u64,
    pub documents_added: u64,
    pub documents_removed: u64,
    pub queries_run: u64,
    pub empty_result_queries: u64,
}
