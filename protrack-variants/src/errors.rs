use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VariantError {
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("A filter named {0} is already registered")]
    DuplicateFilter(String),
}

pub type VariantResult<T> = std::result::Result<T, VariantError>;
