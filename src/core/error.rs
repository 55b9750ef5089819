use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Duplicate or negative document id, or an invalid rating list.
    InvalidArgument,
    /// A document body tokenized to an invalid or empty (non-stop-word) token stream.
    InvalidText,
    /// A query string failed to parse (bare `-`, doubled `--`, control characters).
    InvalidQuery,
    /// A document id was not found in the id registry.
    OutOfRange,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Error {
            kind,
            context: context.into(),
        }
    }

    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidArgument, context)
    }

    pub fn invalid_text(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidText, context)
    }

    pub fn invalid_query(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidQuery, context)
    }

    pub fn out_of_range(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::OutOfRange, context)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
