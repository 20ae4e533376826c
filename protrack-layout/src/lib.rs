//! Layout primitives for protein annotation tracks.
//!
//! This crate holds the two algorithms every protrack parser leans on:
//!
//! - **Row packing**: [`FragmentAligner`] stacks overlapping annotation
//!   fragments into the fewest non-overlapping rows a greedy first-fit pass
//!   can find.
//! - **Coordinate mapping**: [`find_intervals_from_structure_residues`] and
//!   [`find_intervals_from_sequence`] translate residue ranges across a
//!   chain's gapped, piecewise-linear structure to sequence mapping.
//!   [`SegmentMapper`] wraps a validated mapping for repeated queries.
//!
//! Parsers should not reimplement either algorithm; all packing and mapping
//! logic lives here.
//!
//! ## Quick Start
//!
//! ```rust
//! use protrack_core::models::FragmentMapping;
//! use protrack_layout::SegmentMapper;
//!
//! let mapper = SegmentMapper::new(vec![
//!     FragmentMapping { structure_start: 1, structure_end: 50, sequence_start: 101, sequence_end: 150 },
//!     FragmentMapping { structure_start: 60, structure_end: 90, sequence_start: 160, sequence_end: 190 },
//! ]).unwrap();
//!
//! // residues 51-59 of the structure are not aligned to the sequence
//! let intervals = mapper.structure_to_sequence(40, 70);
//! assert_eq!(intervals.len(), 2);
//! assert_eq!((intervals[0].start, intervals[0].end), (140, 150));
//! assert_eq!((intervals[1].start, intervals[1].end), (160, 170));
//! ```

/// Greedy fragment row packing.
///
/// See [`FragmentAligner`] for details.
pub mod aligner;

pub mod errors;

/// Structure to sequence coordinate mapping.
pub mod mapper;

// re-exports
pub use self::aligner::FragmentAligner;
pub use self::errors::{LayoutError, LayoutResult};
pub use self::mapper::{
    Axis, SegmentMapper, find_intervals_from_sequence, find_intervals_from_structure_residues,
};
