use thiserror::Error;

/// Canonical result for fallible operators.
pub type Result<T> = std::result::Result<T, SeqError>;

/// Failure kinds raised by strict operators.
///
/// Operators only ever return these; they never retry or swallow a failure
/// coming from an inner operator. The `-OrDefault` / `-OrFallback` variants
/// turn a selection failure into a normal return instead of raising it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeqError {
    #[error("the source contains no elements")]
    EmptySource,

    #[error("no element satisfies the condition in predicate")]
    NoMatch,

    #[error("more than one element satisfies the condition in predicate")]
    MoreThanOneMatch,

    #[error("the source has more than one element")]
    MoreThanOneElement,

    #[error("size is below 1")]
    SizeBelowOne,

    #[error("index out of range")]
    IndexOutOfRange,

    /// A fallible cast could not convert the runtime value.
    #[error("cannot cast element of type {from} to {to}")]
    InvalidCast {
        from: &'static str,
        to: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("configuration already installed for this process")]
    AlreadyInstalled,
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Invalid(e.to_string())
    }
}
