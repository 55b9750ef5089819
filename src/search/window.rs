use std::collections::VecDeque;

use crate::core::error::Result;
use crate::core::types::ScoredDocument;
use crate::engine::SearchEngine;

/// Tracks the most recent `window_size` queries issued through an engine,
/// maintaining a running count of how many came back empty.
pub struct RequestQueue<'a> {
    engine: &'a SearchEngine,
    history: VecDeque<bool>,
    window_size: usize,
    empty_count: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(engine: &'a SearchEngine) -> Self {
        let window_size = engine.config().request_window_size;
        RequestQueue {
            engine,
            history: VecDeque::with_capacity(window_size),
            window_size,
            empty_count: 0,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        let results = self.engine.find_top_documents(raw_query)?;
        self.push(results.is_empty());
        Ok(results)
    }

    fn push(&mut self, was_empty: bool) {
        self.history.push_back(was_empty);
        if was_empty {
            self.empty_count += 1;
        }
        while self.history.len() > self.window_size {
            if let Some(oldest) = self.history.pop_front() {
                if oldest {
                    self.empty_count -= 1;
                }
            }
        }
    }

    pub fn no_result_requests(&self) -> usize {
        self.empty_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{DocId, DocumentStatus};

    #[test]
    fn tracks_empty_count_across_pushes() {
        let mut engine = SearchEngine::new(["and", "with"]).unwrap();
        for id in 0..5 {
            engine
                .add_document(DocId(id), "cat in the city", DocumentStatus::Actual, &[1])
                .unwrap();
        }
        let mut queue = RequestQueue::new(&engine);

        for _ in 0..1439 {
            queue.add_find_request("dog").unwrap();
        }
        assert_eq!(queue.no_result_requests(), 1439);

        queue.add_find_request("cat").unwrap();
        assert_eq!(queue.no_result_requests(), 1439);

        queue.add_find_request("cat").unwrap();
        assert_eq!(queue.no_result_requests(), 1438);

        queue.add_find_request("cat").unwrap();
        assert_eq!(queue.no_result_requests(), 1437);
    }
}
