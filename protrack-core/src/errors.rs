use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid interval: start {0} is greater than end {1}")]
    InvalidInterval(u32, u32),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Fragment mappings are not sorted or overlap at segment {0}")]
    UnsortedMappings(usize),

    #[error("Structure {0} has neither a URL nor inline data")]
    MissingStructureSource(String),

    #[error("Structure {0} has both a URL and inline data, only one may be given")]
    ConflictingStructureSource(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
