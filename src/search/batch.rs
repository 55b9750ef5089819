use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::core::error::Result;
use crate::core::types::ScoredDocument;
use crate::engine::SearchEngine;

/// Runs each query through `find_top_documents`, in parallel across queries,
/// preserving query order in the returned vector.
pub fn process_queries(
    engine: &SearchEngine,
    queries: &[String],
) -> Vec<Result<Vec<ScoredDocument>>> {
    let total = queries.len();
    let processed = AtomicUsize::new(0);

    queries
        .par_iter()
        .map(|query| {
            let result = engine.find_top_documents(query);
            let current = processed.fetch_add(1, Ordering::Relaxed) + 1;
            if total >= 1000 && current % 1000 == 0 {
                eprintln!("processed {current}/{total} queries");
            }
            result
        })
        .collect()
}

/// Like `process_queries`, but concatenates the per-query result lists,
/// preserving both query order and each query's intra-rank order. A failed
/// query contributes no results rather than aborting the batch.
pub fn process_queries_joined(engine: &SearchEngine, queries: &[String]) -> Vec<ScoredDocument> {
    process_queries(engine, queries)
        .into_iter()
        .flat_map(|result| result.unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{DocId, DocumentStatus};

    fn engine_with_docs() -> SearchEngine {
        let mut engine = SearchEngine::new(["and", "with"]).unwrap();
        engine
            .add_document(DocId(0), "cat in the city", DocumentStatus::Actual, &[1])
            .unwrap();
        engine
            .add_document(DocId(1), "dog in the park", DocumentStatus::Actual, &[2])
            .unwrap();
        engine
    }

    #[test]
    fn preserves_query_order() {
        let engine = engine_with_docs();
        let queries = vec!["cat".to_string(), "dog".to_string(), "nothing".to_string()];
        let results = process_queries(&engine, &queries);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap()[0].id, DocId(0));
        assert_eq!(results[1].as_ref().unwrap()[0].id, DocId(1));
        assert!(results[2].as_ref().unwrap().is_empty());
    }

    #[test]
    fn joined_concatenates_in_order() {
        let engine = engine_with_docs();
        let queries = vec!["cat".to_string(), "dog".to_string()];
        let joined = process_queries_joined(&engine, &queries);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].id, DocId(0));
        assert_eq!(joined[1].id, DocId(1));
    }
}
