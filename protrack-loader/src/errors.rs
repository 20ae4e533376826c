use std::io;

use thiserror::Error;

use protrack_parsers::ParseError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Sources `{0}` and `{1}` are mutually exclusive")]
    ConflictingSources(&'static str, &'static str),

    #[error("Source template for {0} is missing the {{accession}} placeholder")]
    MissingPlaceholder(&'static str),

    #[error("Timeout must be greater than zero")]
    InvalidTimeout,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("Could not read {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON from {location}: {source}")]
    Json {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Source {0} stopped unexpectedly")]
    Worker(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type LoaderResult<T> = std::result::Result<T, LoaderError>;
