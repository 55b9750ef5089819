use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::analysis::stopwords::StopWords;
use crate::analysis::tokenizer::Tokenizer;
use crate::core::error::{Error, Result};
use crate::core::types::{compute_mean_rating, DocId, DocumentMeta, DocumentStatus};

/// Forward + inverted maps over interned term strings. Both maps share the
/// same `Arc<str>` per (document, term) pair rather than each owning a
/// duplicate `String`.
pub struct InvertedIndex {
    forward: HashMap<DocId, HashMap<Arc<str>, f64>>,
    inverted: HashMap<Arc<str>, HashMap<DocId, f64>>,
    documents: HashMap<DocId, DocumentMeta>,
    id_registry: Vec<DocId>,
    interned: HashMap<Box<str>, Arc<str>>,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex {
            forward: HashMap::new(),
            inverted: HashMap::new(),
            documents: HashMap::new(),
            id_registry: Vec::new(),
            interned: HashMap::new(),
        }
    }

    fn intern(&mut self, term: &str) -> Arc<str> {
        if let Some(existing) = self.interned.get(term) {
            return existing.clone();
        }
        let arc: Arc<str> = Arc::from(term);
        self.interned.insert(term.into(), arc.clone());
        arc
    }

    /// Tokenizes `text`, strips stop-words, and inserts the document. The
    /// TF divisor is the count of *non-stop-word* tokens; a document
    /// reduced to zero such tokens is rejected.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
        stop_words: &StopWords,
        tokenizer: &dyn Tokenizer,
    ) -> Result<()> {
        if id.is_negative() {
            return Err(Error::invalid_argument(format!(
                "document id {id} must be non-negative"
            )));
        }
        if self.documents.contains_key(&id) {
            return Err(Error::invalid_argument(format!(
                "document id {id} already exists"
            )));
        }

        let tokens = tokenizer.tokenize(text)?;
        let kept: Vec<&str> = tokens
            .into_iter()
            .filter(|token| !stop_words.contains(token))
            .collect();
        if kept.is_empty() {
            return Err(Error::invalid_text(
                "document has no terms once stop-words are removed",
            ));
        }

        let total = kept.len() as f64;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in &kept {
            *counts.entry(token).or_insert(0) += 1;
        }

        let mut forward_entry = HashMap::with_capacity(counts.len());
        for (term, count) in counts {
            let term = self.intern(term);
            let tf = count as f64 / total;
            self.inverted.entry(term.clone()).or_default().insert(id, tf);
            forward_entry.insert(term, tf);
        }

        self.forward.insert(id, forward_entry);
        self.documents.insert(
            id,
            DocumentMeta {
                status,
                mean_rating: compute_mean_rating(ratings),
            },
        );
        self.id_registry.push(id);
        Ok(())
    }

    /// Idempotent, infallible: absent ids are a silent no-op.
    pub fn remove_document(&mut self, id: DocId) {
        let Some(terms) = self.forward.remove(&id) else {
            return;
        };
        for term in terms.keys() {
            if let Some(postings) = self.inverted.get_mut(term) {
                postings.remove(&id);
                if postings.is_empty() {
                    self.inverted.remove(term);
                }
            }
        }
        self.documents.remove(&id);
        self.id_registry.retain(|&existing| existing != id);
    }

    /// Owned copy of forward[id]; empty if the document is absent.
    pub fn word_frequencies(&self, id: DocId) -> HashMap<String, f64> {
        self.forward
            .get(&id)
            .map(|terms| terms.iter().map(|(t, f)| (t.to_string(), *f)).collect())
            .unwrap_or_default()
    }

    /// Term set (ignoring frequencies) used by the duplicate remover.
    pub fn term_set(&self, id: DocId) -> Option<HashSet<Arc<str>>> {
        self.forward
            .get(&id)
            .map(|terms| terms.keys().cloned().collect())
    }

    pub fn postings(&self, term: &str) -> Option<&HashMap<DocId, f64>> {
        self.inverted.get(term)
    }

    pub fn document_meta(&self, id: DocId) -> Option<DocumentMeta> {
        self.documents.get(&id).copied()
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Insertion order; this is the engine's iteration order.
    pub fn ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.id_registry.iter().copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        let doc_freq = self.inverted.get(term)?.len();
        if doc_freq == 0 {
            return None;
        }
        Some((self.document_count() as f64 / doc_freq as f64).ln())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::WhitespaceTokenizer;

    fn no_stop_words() -> StopWords {
        StopWords::new(Vec::<String>::new()).unwrap()
    }

    #[test]
    fn forward_and_inverted_stay_consistent() {
        let mut index = InvertedIndex::new();
        let stop_words = no_stop_words();
        index
            .add_document(
                DocId(1),
                "cat in the city",
                DocumentStatus::Actual,
                &[1, 2, 3],
                &stop_words,
                &WhitespaceTokenizer,
            )
            .unwrap();

        let forward = index.word_frequencies(DocId(1));
        for (term, tf) in &forward {
            let postings = index.postings(term).unwrap();
            assert_eq!(postings.get(&DocId(1)), Some(tf));
        }
        let total: f64 = forward.values().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn duplicate_id_is_invalid_argument() {
        let mut index = InvertedIndex::new();
        let stop_words = no_stop_words();
        index
            .add_document(
                DocId(1),
                "cat",
                DocumentStatus::Actual,
                &[],
                &stop_words,
                &WhitespaceTokenizer,
            )
            .unwrap();
        let err = index
            .add_document(
                DocId(1),
                "dog",
                DocumentStatus::Actual,
                &[],
                &stop_words,
                &WhitespaceTokenizer,
            )
            .unwrap_err();
        assert_eq!(err.kind, crate::core::error::ErrorKind::InvalidArgument);
    }

    #[test]
    fn negative_id_is_invalid_argument() {
        let mut index = InvertedIndex::new();
        let stop_words = no_stop_words();
        let err = index
            .add_document(
                DocId(-1),
                "cat",
                DocumentStatus::Actual,
                &[],
                &stop_words,
                &WhitespaceTokenizer,
            )
            .unwrap_err();
        assert_eq!(err.kind, crate::core::error::ErrorKind::InvalidArgument);
    }

    #[test]
    fn all_stop_words_rejected() {
        let mut index = InvertedIndex::new();
        let stop_words = StopWords::from_text("and with").unwrap();
        let err = index
            .add_document(
                DocId(1),
                "and with",
                DocumentStatus::Actual,
                &[],
                &stop_words,
                &WhitespaceTokenizer,
            )
            .unwrap_err();
        assert_eq!(err.kind, crate::core::error::ErrorKind::InvalidText);
    }

    #[test]
    fn remove_document_restores_prior_state() {
        let mut index = InvertedIndex::new();
        let stop_words = no_stop_words();
        index
            .add_document(
                DocId(1),
                "cat dog",
                DocumentStatus::Actual,
                &[],
                &stop_words,
                &WhitespaceTokenizer,
            )
            .unwrap();
        index.remove_document(DocId(1));
        assert_eq!(index.document_count(), 0);
        assert!(index.word_frequencies(DocId(1)).is_empty());
        assert!(index.postings("cat").is_none());
        assert!(index.ids().next().is_none());
    }

    #[test]
    fn remove_document_is_idempotent() {
        let mut index = InvertedIndex::new();
        index.remove_document(DocId(42));
        index.remove_document(DocId(42));
        assert_eq!(index.document_count(), 0);
    }
}
