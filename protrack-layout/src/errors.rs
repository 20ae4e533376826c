use thiserror::Error;

use protrack_core::CoreError;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Invalid chain mapping: {0}")]
    InvalidMapping(#[from] CoreError),

    #[error("Chain mapping is empty")]
    EmptyMapping,
}

pub type LayoutResult<T> = std::result::Result<T, LayoutError>;
