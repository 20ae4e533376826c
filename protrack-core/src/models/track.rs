#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::models::{Fragment, StructureInfo};

/// Non-overlapping fragments sharing one visual sub-line, sorted by start.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    pub fragments: Vec<Fragment>,
}

impl Location {
    /// End of the last fragment placed on this line.
    pub fn last_end(&self) -> Option<u32> {
        self.fragments.last().map(|f| f.end)
    }
}

/// One packed row.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Accession {
    pub locations: Vec<Location>,
}

impl Accession {
    pub fn from_location(location: Location) -> Self {
        Accession {
            locations: vec![location],
        }
    }

    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.locations.iter().flat_map(|l| l.fragments.iter())
    }
}

///
/// The unit handed to a rendering track: stacked accessions plus a label.
///
#[derive(PartialEq, Eq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TrackRow {
    pub row_data: Vec<Accession>,
    pub label: String,
    pub structure_info: Option<StructureInfo>,
}

impl TrackRow {
    pub fn new(label: impl Into<String>, row_data: Vec<Accession>) -> Self {
        TrackRow {
            row_data,
            label: label.into(),
            structure_info: None,
        }
    }

    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.row_data.iter().flat_map(|a| a.fragments())
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments().count()
    }
}
