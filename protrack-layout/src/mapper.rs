use protrack_core::models::{FragmentMapping, Interval, validate_mappings};

use crate::errors::{LayoutError, LayoutResult};

/// Which numbering an interval query is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Structure,
    Sequence,
}

impl Axis {
    #[inline]
    fn bounds(&self, segment: &FragmentMapping) -> (u32, u32) {
        match self {
            Axis::Structure => (segment.structure_start, segment.structure_end),
            Axis::Sequence => (segment.sequence_start, segment.sequence_end),
        }
    }
}

///
/// Find the run of segments a query `[start, end]` touches on the given axis.
///
/// `start` resolves to the segment containing it or, when it sits in a gap,
/// to the next segment. `end` resolves to the segment containing it or to the
/// segment before its gap. When both land in the same gap the first index
/// ends up after the last one and nothing is covered.
fn covered_segments(
    start: u32,
    end: u32,
    mappings: &[FragmentMapping],
    axis: Axis,
) -> Option<(usize, usize)> {
    if start > end {
        return None;
    }

    let first = mappings.partition_point(|m| axis.bounds(m).1 < start);
    if first == mappings.len() {
        // past the last segment
        return None;
    }

    let after_last = mappings.partition_point(|m| axis.bounds(m).0 <= end);
    if after_last == 0 {
        // before the first segment
        return None;
    }
    let last = after_last - 1;

    if first > last {
        return None;
    }
    Some((first, last))
}

///
/// Translate a structure residue range into sequence intervals.
///
/// `mappings` must be sorted ascending and non-overlapping. Residues falling
/// in gaps between segments produce no output; each touched segment yields
/// one interval clipped to the query.
///
/// # Arguments
/// - start: first structure residue of the query
/// - end: last structure residue of the query
/// - mappings: the chain's structure to sequence segments
///
/// # Returns
/// - sequence intervals, one per touched segment, in ascending order
///
/// # Examples
///
/// ```
/// use protrack_core::models::{FragmentMapping, Interval};
/// use protrack_layout::find_intervals_from_structure_residues;
///
/// let mappings = vec![
///     FragmentMapping { structure_start: 0, structure_end: 10, sequence_start: 20, sequence_end: 30 },
///     FragmentMapping { structure_start: 15, structure_end: 25, sequence_start: 50, sequence_end: 60 },
///     FragmentMapping { structure_start: 40, structure_end: 60, sequence_start: 120, sequence_end: 140 },
/// ];
/// let intervals = find_intervals_from_structure_residues(5, 55, &mappings);
/// assert_eq!(
///     intervals,
///     vec![Interval::from((25, 30)), Interval::from((50, 60)), Interval::from((120, 135))]
/// );
/// ```
pub fn find_intervals_from_structure_residues(
    start: u32,
    end: u32,
    mappings: &[FragmentMapping],
) -> Vec<Interval> {
    let Some((first, last)) = covered_segments(start, end, mappings, Axis::Structure) else {
        return Vec::new();
    };

    mappings[first..=last]
        .iter()
        .map(|m| {
            let lo = start.max(m.structure_start);
            let hi = end.min(m.structure_end);
            Interval {
                start: lo - m.structure_start + m.sequence_start,
                end: hi - m.structure_start + m.sequence_start,
            }
        })
        .collect()
}

///
/// Clip a sequence residue range to the parts of it covered by the chain.
///
/// The mirror of [`find_intervals_from_structure_residues`]: segments are
/// searched by their sequence bounds and the output stays in sequence
/// numbering, so covered residues map onto themselves.
pub fn find_intervals_from_sequence(
    start: u32,
    end: u32,
    mappings: &[FragmentMapping],
) -> Vec<Interval> {
    let Some((first, last)) = covered_segments(start, end, mappings, Axis::Sequence) else {
        return Vec::new();
    };

    mappings[first..=last]
        .iter()
        .map(|m| Interval {
            start: start.max(m.sequence_start),
            end: end.min(m.sequence_end),
        })
        .collect()
}

///
/// A validated chain mapping. Construction checks ordering once so that
/// every query afterwards can rely on binary search.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentMapper {
    segments: Vec<FragmentMapping>,
}

impl SegmentMapper {
    pub fn new(segments: Vec<FragmentMapping>) -> LayoutResult<Self> {
        if segments.is_empty() {
            return Err(LayoutError::EmptyMapping);
        }
        validate_mappings(&segments)?;
        Ok(SegmentMapper { segments })
    }

    /// Sort the segments by structure start before validating them.
    pub fn from_unsorted(mut segments: Vec<FragmentMapping>) -> LayoutResult<Self> {
        segments.sort_by_key(|m| m.structure_start);
        Self::new(segments)
    }

    pub fn segments(&self) -> &[FragmentMapping] {
        &self.segments
    }

    /// Overall sequence extent covered by the chain, gaps included.
    pub fn sequence_extent(&self) -> Interval {
        // non-empty by construction
        let first = self.segments[0];
        let last = self.segments[self.segments.len() - 1];
        Interval {
            start: first.sequence_start,
            end: last.sequence_end,
        }
    }

    pub fn structure_to_sequence(&self, start: u32, end: u32) -> Vec<Interval> {
        find_intervals_from_structure_residues(start, end, &self.segments)
    }

    pub fn clip_to_sequence(&self, start: u32, end: u32) -> Vec<Interval> {
        find_intervals_from_sequence(start, end, &self.segments)
    }

    /// Sequence residue for a single structure residue, `None` in gaps.
    pub fn sequence_position(&self, structure_residue: u32) -> Option<u32> {
        self.segment_at(structure_residue, Axis::Structure)?
            .to_sequence(structure_residue)
    }

    /// Structure residue for a single sequence residue, `None` in gaps.
    pub fn structure_position(&self, sequence_residue: u32) -> Option<u32> {
        self.segment_at(sequence_residue, Axis::Sequence)?
            .to_structure(sequence_residue)
    }

    fn segment_at(&self, residue: u32, axis: Axis) -> Option<&FragmentMapping> {
        let idx = self
            .segments
            .partition_point(|m| axis.bounds(m).1 < residue);
        self.segments.get(idx).filter(|m| {
            let (lo, hi) = axis.bounds(m);
            lo <= residue && residue <= hi
        })
    }
}
