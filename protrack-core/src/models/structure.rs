#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, CoreResult};
use crate::models::FragmentMapping;

#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StructureFormat {
    Pdb,
    Mmcif,
    Bcif,
}

#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StructureProvider {
    #[cfg_attr(feature = "serde", serde(rename = "PDB"))]
    Pdb,
    #[cfg_attr(feature = "serde", serde(rename = "SMR"))]
    Smr,
}

/// Where the renderer gets the coordinates from.
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StructureSource {
    Url(String),
    Inline(String),
}

impl StructureSource {
    ///
    /// Build the source from the two optional fields a structure record carries.
    /// Exactly one of them must be present.
    ///
    /// # Arguments
    /// - structure_id: used for the error message
    /// - url: remote location of the coordinate file
    /// - data: inline coordinate data
    pub fn from_parts(
        structure_id: &str,
        url: Option<String>,
        data: Option<String>,
    ) -> CoreResult<Self> {
        match (url, data) {
            (Some(url), None) => Ok(StructureSource::Url(url)),
            (None, Some(data)) => Ok(StructureSource::Inline(data)),
            (None, None) => Err(CoreError::MissingStructureSource(structure_id.to_string())),
            (Some(_), Some(_)) => Err(CoreError::ConflictingStructureSource(
                structure_id.to_string(),
            )),
        }
    }
}

///
/// Everything the structure viewer needs to show one chain next to the tracks.
///
#[derive(PartialEq, Eq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StructureInfo {
    pub pdb_id: String,
    pub chain_id: String,
    pub provider: StructureProvider,
    pub mappings: Vec<FragmentMapping>,
    pub format: StructureFormat,
    pub source: StructureSource,
    pub tax_ids: Vec<u32>,
}
