use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A grammar that violates the model's invariants, rejected before any pass runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedGrammarError {
    #[error("start symbol `{0}` is not a declared variable")]
    UndeclaredStart(char),
    #[error("variable `{0}` is declared more than once")]
    DuplicateVariable(char),
    #[error("`{0}` marks the empty body and cannot be declared as a variable")]
    EpsilonAsVariable(char),
    #[error("productions are given for `{0}`, which is not a declared variable")]
    UndeclaredLeftHandSide(char),
    #[error("production for `{0}` has an empty body")]
    EmptyBody(char),
    #[error("invalid production `{0}`")]
    InvalidProduction(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Malformed(#[from] MalformedGrammarError),
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("missing {0} line")]
    MissingLine(&'static str),
    #[error("body `{marker}` of `{variable}` would read back as the empty body")]
    AmbiguousBody { variable: char, marker: char },
    #[error("Failed to read or write grammar file: {0}")]
    Io(#[from] std::io::Error),
}
