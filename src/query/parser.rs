use crate::analysis::stopwords::StopWords;
use crate::analysis::tokenizer::{is_valid_token, Tokenizer};
use crate::core::error::{Error, Result};
use crate::query::types::Query;

/// Classifies each raw-query token as a plus-term, minus-term, or
/// stop-word, and validates minus-term syntax.
pub struct QueryParser<'a> {
    stop_words: &'a StopWords,
    tokenizer: &'a dyn Tokenizer,
}

impl<'a> QueryParser<'a> {
    pub fn new(stop_words: &'a StopWords, tokenizer: &'a dyn Tokenizer) -> Self {
        QueryParser {
            stop_words,
            tokenizer,
        }
    }

    pub fn parse(&self, raw_query: &str) -> Result<Query> {
        let tokens = self.tokenizer.tokenize(raw_query).map_err(|e| {
            Error::invalid_query(format!("query contains an invalid token: {}", e.context))
        })?;

        let mut query = Query::default();
        for token in tokens {
            if token == "-" {
                return Err(Error::invalid_query("empty minus term"));
            }
            if token.starts_with("--") {
                return Err(Error::invalid_query(format!("doubled minus in '{token}'")));
            }

            let (candidate, is_minus) = match token.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (token, false),
            };

            if candidate.is_empty() || !is_valid_token(candidate) {
                return Err(Error::invalid_query(format!(
                    "query term '{token}' is invalid"
                )));
            }

            if self.stop_words.contains(candidate) {
                continue;
            }

            if is_minus {
                query.minus_terms.insert(candidate.to_string());
            } else {
                query.plus_terms.insert(candidate.to_string());
            }
        }

        Ok(query)
    }
}
