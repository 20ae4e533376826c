use protrack_core::models::{Accession, Fragment, Location};

/// Greedy row packing of annotation fragments.
///
/// Fragments are stably sorted by start and each one is dropped into the
/// first row whose last fragment ends strictly before it starts. Fragments
/// that touch (`end == start`) never share a row. The result is deterministic
/// for a given insertion order, which is all the track layout needs; it is not
/// an optimal interval graph coloring.
///
/// # Examples
///
/// ```
/// use protrack_core::Rgb;
/// use protrack_core::models::{Fragment, Interval};
/// use protrack_layout::FragmentAligner;
///
/// let mut aligner = FragmentAligner::new();
/// aligner.add_fragment(Fragment::new(1, Interval::from((10, 20)), Rgb::BLACK));
/// aligner.add_fragment(Fragment::new(2, Interval::from((2, 10)), Rgb::BLACK));
/// aligner.add_fragment(Fragment::new(3, Interval::from((8, 12)), Rgb::BLACK));
///
/// let rows = aligner.align_fragments();
/// assert_eq!(rows.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FragmentAligner {
    fragments: Vec<Fragment>,
}

impl FragmentAligner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_fragment(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    pub fn add_fragments<I: IntoIterator<Item = Fragment>>(&mut self, fragments: I) {
        self.fragments.extend(fragments);
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    ///
    /// Pack the collected fragments into rows.
    ///
    /// # Returns
    /// - one [`Accession`] per row, in row-creation order; every accession
    ///   holds a single [`Location`] whose fragments are sorted by start
    pub fn align_fragments(&self) -> Vec<Accession> {
        let mut sorted: Vec<&Fragment> = self.fragments.iter().collect();
        // stable: equal starts keep insertion order
        sorted.sort_by_key(|f| f.start);

        let mut rows: Vec<Location> = Vec::new();
        for fragment in sorted {
            let free_row = rows
                .iter_mut()
                .find(|row| row.last_end().is_some_and(|end| end < fragment.start));
            match free_row {
                Some(row) => row.fragments.push(fragment.clone()),
                None => rows.push(Location {
                    fragments: vec![fragment.clone()],
                }),
            }
        }

        rows.into_iter().map(Accession::from_location).collect()
    }
}

impl FromIterator<Fragment> for FragmentAligner {
    fn from_iter<T: IntoIterator<Item = Fragment>>(iter: T) -> Self {
        FragmentAligner {
            fragments: iter.into_iter().collect(),
        }
    }
}
