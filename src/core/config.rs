/// Tunables for a `SearchEngine`. The `Default` impl reproduces the reference
/// constants exactly; callers override individual fields for tests or
/// unusual corpora without touching the algorithms that consume them.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Max results returned by `find_top_documents`.
    pub top_k: usize,
    /// Length of the recent-query FIFO tracked by the request window.
    pub request_window_size: usize,
    /// Shard count for the concurrent accumulator used by the parallel ranker.
    pub accumulator_shards: usize,
    /// Relevance values within this tolerance are treated as tied.
    pub relevance_epsilon: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            top_k: 5,
            request_window_size: 1440,
            accumulator_shards: 500,
            relevance_epsilon: 1e-6,
        }
    }
}
