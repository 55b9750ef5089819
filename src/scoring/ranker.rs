use std::collections::HashMap;

use rayon::prelude::*;

use crate::concurrent::sharded_map::ShardedMap;
use crate::core::config::EngineConfig;
use crate::core::types::{DocId, DocumentStatus, ScoredDocument};
use crate::index::inverted::InvertedIndex;
use crate::query::types::Query;

/// How `find_top_documents` splits work across the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPolicy {
    Sequential,
    Parallel,
}

/// Ranks documents against a query by summed `tf · idf` over plus-terms,
/// vetoing any document containing a minus-term.
pub struct Ranker<'a> {
    index: &'a InvertedIndex,
    config: &'a EngineConfig,
}

impl<'a> Ranker<'a> {
    pub fn new(index: &'a InvertedIndex, config: &'a EngineConfig) -> Self {
        Ranker { index, config }
    }

    pub fn find_top_documents<P>(
        &self,
        query: &Query,
        policy: ExecutionPolicy,
        predicate: P,
    ) -> Vec<ScoredDocument>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        match policy {
            ExecutionPolicy::Sequential => self.find_sequential(query, predicate),
            ExecutionPolicy::Parallel => self.find_parallel(query, predicate),
        }
    }

    fn find_sequential<P>(&self, query: &Query, predicate: P) -> Vec<ScoredDocument>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let mut acc: HashMap<DocId, f64> = HashMap::new();

        for term in &query.plus_terms {
            let Some(idf) = self.index.idf(term) else {
                continue;
            };
            let Some(postings) = self.index.postings(term) else {
                continue;
            };
            for (&id, &tf) in postings {
                let meta = self.index.document_meta(id).expect("id has postings");
                if predicate(id, meta.status, meta.mean_rating) {
                    *acc.entry(id).or_insert(0.0) += tf * idf;
                }
            }
        }

        for term in &query.minus_terms {
            if let Some(postings) = self.index.postings(term) {
                for id in postings.keys() {
                    acc.remove(id);
                }
            }
        }

        let mut scored = self.materialize(acc);
        self.sort_and_truncate(&mut scored);
        scored
    }

    fn find_parallel<P>(&self, query: &Query, predicate: P) -> Vec<ScoredDocument>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let acc: ShardedMap<DocId, f64> = ShardedMap::new(self.config.accumulator_shards);

        query.plus_terms.par_iter().for_each(|term| {
            let Some(idf) = self.index.idf(term) else {
                return;
            };
            let Some(postings) = self.index.postings(term) else {
                return;
            };
            postings.par_iter().for_each(|(&id, &tf)| {
                let meta = self.index.document_meta(id).expect("id has postings");
                if predicate(id, meta.status, meta.mean_rating) {
                    *acc.access_or_insert_default(id) += tf * idf;
                }
            });
        });

        query.minus_terms.par_iter().for_each(|term| {
            if let Some(postings) = self.index.postings(term) {
                postings.keys().for_each(|&id| acc.erase(id));
            }
        });

        let mut scored = self.materialize(acc.build_ordinary_map().into_iter().collect());
        scored.par_sort_unstable_by(|a, b| self.tie_break(a, b));
        scored.truncate(self.config.top_k);
        scored
    }

    fn materialize(&self, acc: HashMap<DocId, f64>) -> Vec<ScoredDocument> {
        acc.into_iter()
            .map(|(id, relevance)| {
                let rating = self
                    .index
                    .document_meta(id)
                    .map(|m| m.mean_rating)
                    .unwrap_or(0);
                ScoredDocument {
                    id,
                    relevance,
                    rating,
                }
            })
            .collect()
    }

    fn sort_and_truncate(&self, scored: &mut Vec<ScoredDocument>) {
        scored.sort_unstable_by(|a, b| self.tie_break(a, b));
        scored.truncate(self.config.top_k);
    }

    /// Relevance desc (within `epsilon`, treated equal), then rating desc,
    /// then id asc as the final deterministic tiebreak.
    fn tie_break(&self, a: &ScoredDocument, b: &ScoredDocument) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        if (a.relevance - b.relevance).abs() >= self.config.relevance_epsilon {
            return b
                .relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(Ordering::Equal);
        }
        match b.rating.cmp(&a.rating) {
            Ordering::Equal => a.id.cmp(&b.id),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stopwords::StopWords;
    use crate::analysis::tokenizer::WhitespaceTokenizer;

    fn build_index() -> InvertedIndex {
        let mut index = InvertedIndex::new();
        let stop_words = StopWords::default();
        let docs: [(i32, &str, &[i32]); 4] = [
            (0, "cat in the city", &[-3]),
            (1, "cat in the city", &[0]),
            (2, "cat in the city", &[4, 5, 6]),
            (3, "cat in the city", &[-10, -3, -3]),
        ];
        for (id, text, ratings) in docs {
            index
                .add_document(
                    DocId(id),
                    text,
                    DocumentStatus::Actual,
                    ratings,
                    &stop_words,
                    &WhitespaceTokenizer,
                )
                .unwrap();
        }
        index
    }

    fn query(plus: &[&str]) -> Query {
        Query {
            plus_terms: plus.iter().map(|s| s.to_string()).collect(),
            minus_terms: Default::default(),
        }
    }

    #[test]
    fn ties_break_by_descending_rating() {
        let index = build_index();
        let config = EngineConfig::default();
        let ranker = Ranker::new(&index, &config);
        let results =
            ranker.find_top_documents(&query(&["cat"]), ExecutionPolicy::Sequential, |_, s, _| {
                s == DocumentStatus::Actual
            });
        let ratings: Vec<i32> = results.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![5, 0, -3, -5]);
    }

    #[test]
    fn minus_term_excludes_document() {
        let index = build_index();
        let config = EngineConfig::default();
        let ranker = Ranker::new(&index, &config);
        let mut q = query(&["cat"]);
        q.minus_terms.insert("city".to_string());
        let results =
            ranker.find_top_documents(&q, ExecutionPolicy::Sequential, |_, s, _| {
                s == DocumentStatus::Actual
            });
        assert!(results.is_empty());
    }

    #[test]
    fn parallel_matches_sequential() {
        let index = build_index();
        let config = EngineConfig::default();
        let ranker = Ranker::new(&index, &config);
        let seq = ranker.find_top_documents(&query(&["cat"]), ExecutionPolicy::Sequential, |_, s, _| {
            s == DocumentStatus::Actual
        });
        let par = ranker.find_top_documents(&query(&["cat"]), ExecutionPolicy::Parallel, |_, s, _| {
            s == DocumentStatus::Actual
        });
        let seq_ids: Vec<_> = seq.iter().map(|r| r.id).collect();
        let par_ids: Vec<_> = par.iter().map(|r| r.id).collect();
        assert_eq!(seq_ids, par_ids);
    }

    #[test]
    fn caps_results_at_top_k() {
        let mut index = InvertedIndex::new();
        let stop_words = StopWords::default();
        for id in 0..8 {
            index
                .add_document(
                    DocId(id),
                    "cat",
                    DocumentStatus::Actual,
                    &[1],
                    &stop_words,
                    &WhitespaceTokenizer,
                )
                .unwrap();
        }
        let config = EngineConfig::default();
        let ranker = Ranker::new(&index, &config);
        let results = ranker.find_top_documents(&query(&["cat"]), ExecutionPolicy::Sequential, |_, s, _| {
            s == DocumentStatus::Actual
        });
        assert_eq!(results.len(), config.top_k);
    }
}
