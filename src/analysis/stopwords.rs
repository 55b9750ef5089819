use std::collections::HashSet;

use crate::analysis::tokenizer::is_valid_token;
use crate::core::error::{Error, Result};

/// Immutable once constructed. The legacy `set_stop_words` mutator is
/// deprecated, see `SearchEngine::set_stop_words`.
#[derive(Debug, Clone, Default)]
pub struct StopWords(HashSet<String>);

impl StopWords {
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.into();
            if word.is_empty() || !is_valid_token(&word) {
                return Err(Error::invalid_argument(format!(
                    "stop word '{word}' is invalid"
                )));
            }
            set.insert(word);
        }
        Ok(StopWords(set))
    }

    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(text.split_whitespace())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
