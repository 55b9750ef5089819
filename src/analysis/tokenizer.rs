use crate::core::error::{Error, Result};

/// Tokens are maximal runs of non-whitespace bytes. A token is invalid if it
/// contains any byte in the ASCII control range `[0x00, 0x1F]`; whitespace
/// splitting never case-folds or stems.
pub trait Tokenizer: Send + Sync {
    fn tokenize<'a>(&self, text: &'a str) -> Result<Vec<&'a str>>;
}

/// Whitespace tokenizer used for both document bodies and query strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        text.split_whitespace()
            .map(|token| {
                if is_valid_token(token) {
                    Ok(token)
                } else {
                    Err(Error::invalid_text(format!(
                        "token '{token}' contains a control character"
                    )))
                }
            })
            .collect()
    }
}

pub fn is_valid_token(token: &str) -> bool {
    !token.bytes().any(|b| b < 0x20)
}
