use rayon::prelude::*;

use crate::core::error::{Error, Result};
use crate::core::types::{DocId, DocumentStatus};
use crate::index::inverted::InvertedIndex;
use crate::query::types::Query;

/// For a target document, returns which plus-terms occur; any occurring
/// minus-term vetoes the whole result.
pub struct DocumentMatcher<'a> {
    index: &'a InvertedIndex,
}

impl<'a> DocumentMatcher<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        DocumentMatcher { index }
    }

    pub fn match_document(
        &self,
        query: &Query,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let meta = self
            .index
            .document_meta(id)
            .ok_or_else(|| Error::out_of_range(format!("document id {id} is out of range")))?;

        for minus_term in &query.minus_terms {
            if self.occurs_in(minus_term, id) {
                return Ok((Vec::new(), meta.status));
            }
        }

        let matched = query
            .plus_terms
            .iter()
            .filter(|term| self.occurs_in(term, id))
            .cloned()
            .collect();
        Ok((matched, meta.status))
    }

    /// Same contract as `match_document`; splits the term scans across the
    /// thread pool. No lock is held while testing `occurs_in`, so there is
    /// nothing for concurrent queries to race on.
    pub fn match_document_parallel(
        &self,
        query: &Query,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let meta = self
            .index
            .document_meta(id)
            .ok_or_else(|| Error::out_of_range(format!("document id {id} is out of range")))?;

        let vetoed = query
            .minus_terms
            .par_iter()
            .any(|term| self.occurs_in(term, id));
        if vetoed {
            return Ok((Vec::new(), meta.status));
        }

        let matched: Vec<String> = query
            .plus_terms
            .par_iter()
            .filter(|term| self.occurs_in(term, id))
            .cloned()
            .collect();
        Ok((matched, meta.status))
    }

    fn occurs_in(&self, term: &str, id: DocId) -> bool {
        self.index
            .postings(term)
            .is_some_and(|docs| docs.contains_key(&id))
    }
}
