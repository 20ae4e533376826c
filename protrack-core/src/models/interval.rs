use std::cmp::Ordering;
use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, CoreResult};

/// Represent a residue range [start, end]
/// Inclusive of both ends, 1-based residue numbering
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    ///
    /// Create a new interval, checking that `start <= end`
    ///
    pub fn new(start: u32, end: u32) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::InvalidInterval(start, end));
        }
        Ok(Interval { start, end })
    }

    ///
    /// Number of residues covered by the interval, saturating at `u32::MAX`
    ///
    #[inline]
    pub fn width(&self) -> u32 {
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    /// Check if a residue falls within the interval
    #[inline]
    pub fn contains(&self, residue: u32) -> bool {
        self.start <= residue && residue <= self.end
    }

    /// Check if two intervals share at least one residue.
    /// Touching intervals (`a.end == b.start`) overlap.
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl Ord for Interval {
    #[inline]
    fn cmp(&self, other: &Interval) -> Ordering {
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ordering => ordering,
        }
    }
}

impl PartialOrd for Interval {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(u32, u32)> for Interval {
    fn from(value: (u32, u32)) -> Self {
        let (start, end) = value;
        Interval {
            start: start.min(end),
            end: start.max(end),
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_new_rejects_reversed_bounds() {
        assert_eq!(Interval::new(10, 5), Err(CoreError::InvalidInterval(10, 5)));
        assert_eq!(Interval::new(5, 5).unwrap().width(), 1);
    }

    #[rstest]
    #[case((5, 5), 1)]
    #[case((1, 10), 10)]
    #[case((0, u32::MAX), u32::MAX)]
    fn test_width(#[case] bounds: (u32, u32), #[case] expected: u32) {
        assert_eq!(Interval::from(bounds).width(), expected);
    }

    #[rstest]
    #[case((1, 10), (10, 20), true)]
    #[case((1, 10), (11, 20), false)]
    #[case((5, 6), (1, 100), true)]
    fn test_overlaps(#[case] a: (u32, u32), #[case] b: (u32, u32), #[case] expected: bool) {
        let a = Interval::from(a);
        let b = Interval::from(b);
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected);
    }

    #[rstest]
    fn test_ordering_by_start_then_end() {
        let mut intervals = vec![
            Interval::from((8, 12)),
            Interval::from((2, 10)),
            Interval::from((2, 4)),
        ];
        intervals.sort();
        assert_eq!(
            intervals,
            vec![
                Interval::from((2, 4)),
                Interval::from((2, 10)),
                Interval::from((8, 12))
            ]
        );
    }

    #[rstest]
    fn test_display() {
        assert_eq!(Interval::from((3, 7)).to_string(), "3-7");
    }
}
