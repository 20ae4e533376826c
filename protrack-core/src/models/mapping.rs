#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, CoreResult};
use crate::models::Interval;

///
/// One contiguous correspondence between a structure's residue numbering and
/// the reference sequence numbering. All four bounds are inclusive.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FragmentMapping {
    pub structure_start: u32,
    pub structure_end: u32,
    pub sequence_start: u32,
    pub sequence_end: u32,
}

impl FragmentMapping {
    pub fn structure_interval(&self) -> Interval {
        Interval {
            start: self.structure_start,
            end: self.structure_end,
        }
    }

    pub fn sequence_interval(&self) -> Interval {
        Interval {
            start: self.sequence_start,
            end: self.sequence_end,
        }
    }

    /// Translate a structure residue inside this segment to sequence numbering.
    /// Returns `None` for residues outside the segment.
    #[inline]
    pub fn to_sequence(&self, structure_residue: u32) -> Option<u32> {
        if structure_residue < self.structure_start || structure_residue > self.structure_end {
            return None;
        }
        Some(structure_residue - self.structure_start + self.sequence_start)
    }

    /// Translate a sequence residue inside this segment to structure numbering.
    #[inline]
    pub fn to_structure(&self, sequence_residue: u32) -> Option<u32> {
        if sequence_residue < self.sequence_start || sequence_residue > self.sequence_end {
            return None;
        }
        Some(sequence_residue - self.sequence_start + self.structure_start)
    }
}

///
/// Check that a chain's mapping list is sorted ascending on both axes, that
/// segments do not overlap and that every segment has `start <= end`.
///
/// # Arguments
/// - mappings: the chain's segments, in the order they will be searched
///
/// # Returns
/// - the index of the first offending segment inside the error
pub fn validate_mappings(mappings: &[FragmentMapping]) -> CoreResult<()> {
    for (i, m) in mappings.iter().enumerate() {
        if m.structure_start > m.structure_end || m.sequence_start > m.sequence_end {
            return Err(CoreError::UnsortedMappings(i));
        }
    }
    for (i, pair) in mappings.windows(2).enumerate() {
        if pair[0].structure_end >= pair[1].structure_start
            || pair[0].sequence_end >= pair[1].sequence_start
        {
            return Err(CoreError::UnsortedMappings(i + 1));
        }
    }
    Ok(())
}
