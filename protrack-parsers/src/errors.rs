use thiserror::Error;

use protrack_core::CoreError;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unexpected payload for {source_name}: {error}")]
    Payload {
        source_name: &'static str,
        #[source]
        error: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(#[from] CoreError),
}

impl ParseError {
    /// Fatal errors must reach the caller instead of only dropping one source.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::Configuration(_))
    }
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
