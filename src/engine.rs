use parking_lot::RwLock;

use crate::analysis::stopwords::StopWords;
use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::stats::{EngineStats, EngineStatsSnapshot};
use crate::core::types::{DocId, DocumentStatus, ScoredDocument};
use crate::index::inverted::InvertedIndex;
use crate::query::matcher::DocumentMatcher;
use crate::query::parser::QueryParser;
use crate::scoring::ranker::{ExecutionPolicy, Ranker};

/// Owns the stop-word set, the inverted index behind a single-writer /
/// multi-reader lock, the engine's tunables, and its counters. This is the
/// receiver of every operation in the public surface: `add_document` and
/// `remove_document` take the write side of `index`, every other operation
/// the read side, matching the reference database's own split between its
/// writer and its reader pool.
pub struct SearchEngine {
    stop_words: StopWords,
    index: RwLock<InvertedIndex>,
    tokenizer: WhitespaceTokenizer,
    config: EngineConfig,
    stats: EngineStats,
}

impl SearchEngine {
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(stop_words, EngineConfig::default())
    }

    pub fn with_config<I, S>(stop_words: I, config: EngineConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(SearchEngine {
            stop_words: StopWords::new(stop_words)?,
            index: RwLock::new(InvertedIndex::new()),
            tokenizer: WhitespaceTokenizer,
            config,
            stats: EngineStats::default(),
        })
    }

    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.index.get_mut().add_document(
            id,
            text,
            status,
            ratings,
            &self.stop_words,
            &self.tokenizer,
        )?;
        self.stats.record_document_added();
        Ok(())
    }

    pub fn remove_document(&mut self, id: DocId) {
        if self.index.get_mut().contains(id) {
            self.index.get_mut().remove_document(id);
            self.stats.record_document_removed();
        }
    }

    /// Deprecated legacy mutator: stop-words are fixed at construction time.
    /// Always fails rather than silently accepting a set it cannot apply
    /// retroactively to already-indexed documents.
    #[deprecated(note = "stop-words are immutable after SearchEngine::new")]
    pub fn set_stop_words<I, S>(&mut self, _words: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Err(crate::core::error::Error::invalid_argument(
            "stop-words cannot be changed after construction",
        ))
    }

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with(raw_query, ExecutionPolicy::Sequential, move |_, s, _| {
            s == status
        })
    }

    pub fn find_top_documents_with<P>(
        &self,
        raw_query: &str,
        policy: ExecutionPolicy,
        predicate: P,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let index = self.index.read();
        let parser = QueryParser::new(&self.stop_words, &self.tokenizer);
        let query = parser.parse(raw_query)?;
        let ranker = Ranker::new(&index, &self.config);
        let results = ranker.find_top_documents(&query, policy, predicate);
        self.stats.record_query(results.is_empty());
        Ok(results)
    }

    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        let index = self.index.read();
        let parser = QueryParser::new(&self.stop_words, &self.tokenizer);
        let query = parser.parse(raw_query)?;
        DocumentMatcher::new(&index).match_document(&query, id)
    }

    pub fn match_document_parallel(
        &self,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let index = self.index.read();
        let parser = QueryParser::new(&self.stop_words, &self.tokenizer);
        let query = parser.parse(raw_query)?;
        DocumentMatcher::new(&index).match_document_parallel(&query, id)
    }

    pub fn get_word_frequencies(&self, id: DocId) -> std::collections::HashMap<String, f64> {
        self.index.read().word_frequencies(id)
    }

    pub fn document_count(&self) -> usize {
        self.index.read().document_count()
    }

    pub fn iter_ids(&self) -> Vec<DocId> {
        self.index.read().ids().collect()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> EngineStatsSnapshot {
        self.stats.snapshot()
    }

    pub(crate) fn index(&self) -> parking_lot::RwLockReadGuard<'_, InvertedIndex> {
        self.index.read()
    }
}
