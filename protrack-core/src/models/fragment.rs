#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::models::{Interval, StructureInfo};

#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Shape {
    Rectangle,
    Roundrectangle,
    Line,
    Triangle,
    Diamond,
    Circle,
    Chevron,
}

///
/// One renderable annotation span. Fragments are built once by a parser and
/// never modified afterwards; the `id` identifies the same biological feature
/// in a category's main track and in its subtracks.
///
#[derive(PartialEq, Eq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Fragment {
    pub id: u32,
    pub start: u32,
    pub end: u32,
    pub border_color: Rgb,
    pub fill_color: Rgb,
    pub shape: Option<Shape>,
    pub tooltip: String,
    pub structure_info: Option<StructureInfo>,
}

impl Fragment {
    pub fn new(id: u32, interval: Interval, color: Rgb) -> Self {
        Fragment {
            id,
            start: interval.start,
            end: interval.end,
            border_color: color,
            fill_color: color,
            shape: None,
            tooltip: String::new(),
            structure_info: None,
        }
    }

    pub fn with_fill(mut self, fill_color: Rgb) -> Self {
        self.fill_color = fill_color;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    pub fn with_structure_info(mut self, structure_info: StructureInfo) -> Self {
        self.structure_info = Some(structure_info);
        self
    }

    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }
}

///
/// Hands out fragment ids. One generator lives for one parser invocation so
/// that ids are unique within everything that invocation produces.
///
#[derive(Debug)]
pub struct FragmentIds {
    next: u32,
}

impl Default for FragmentIds {
    fn default() -> Self {
        FragmentIds { next: 1 }
    }
}

impl FragmentIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_ids_are_monotonic() {
        let mut ids = FragmentIds::new();
        let taken: Vec<u32> = (0..4).map(|_| ids.next_id()).collect();
        assert_eq!(taken, vec![1, 2, 3, 4]);
    }

    #[rstest]
    fn test_builder_keeps_border_color() {
        let border = Rgb::new(10, 20, 30);
        let fragment = Fragment::new(7, Interval::from((3, 9)), border)
            .with_fill(Rgb::WHITE)
            .with_shape(Shape::Diamond)
            .with_tooltip("t");
        assert_eq!(fragment.border_color, border);
        assert_eq!(fragment.fill_color, Rgb::WHITE);
        assert_eq!(fragment.interval(), Interval::from((3, 9)));
        assert_eq!(fragment.shape, Some(Shape::Diamond));
    }
}
