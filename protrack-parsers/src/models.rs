use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};

use protrack_core::Rgb;
use protrack_core::models::{Fragment, TrackRow};
use protrack_variants::{ActiveFilters, VariantBucket, VariantWithSources};

use crate::render::{Channel, Highlight, RenderSink};

/// What one track draws.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum TrackData {
    /// Packed fragment rows.
    Rows(Vec<TrackRow>),
    /// Variants grouped by sequence position.
    #[serde(rename_all = "camelCase")]
    Variation {
        sequence: String,
        buckets: Vec<VariantBucket>,
    },
    /// All variants as one flat list.
    #[serde(rename_all = "camelCase")]
    VariationGraph {
        sequence_length: u32,
        variants: Vec<VariantWithSources>,
    },
}

impl TrackData {
    pub fn fragments(&self) -> Box<dyn Iterator<Item = &Fragment> + '_> {
        match self {
            TrackData::Rows(rows) => Box::new(rows.iter().flat_map(|r| r.fragments())),
            _ => Box::new(std::iter::empty()),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Track {
    pub label: String,
    pub data: TrackData,
}

impl Track {
    pub fn new(label: impl Into<String>, data: TrackData) -> Self {
        Track {
            label: label.into(),
            data,
        }
    }
}

///
/// A group of tracks rendered together. The first track is the category's
/// main track; the rest are its subtracks.
///
/// A category owns the highlight channel its tracks listen on.
///
#[derive(Serialize, Debug, Default)]
pub struct Category {
    pub name: String,
    pub label: String,
    pub tracks: Vec<Track>,
    #[serde(skip)]
    highlights: Channel<Highlight>,
}

impl Category {
    pub fn new(name: impl Into<String>, label: impl Into<String>, tracks: Vec<Track>) -> Self {
        Category {
            name: name.into(),
            label: label.into(),
            tracks,
            highlights: Channel::default(),
        }
    }

    pub fn main_track(&self) -> Option<&Track> {
        self.tracks.first()
    }

    pub fn subtracks(&self) -> &[Track] {
        self.tracks.get(1..).unwrap_or(&[])
    }

    pub fn track(&self, label: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.label == label)
    }

    pub fn subscribe_highlights(&mut self) -> Receiver<Highlight> {
        self.highlights.subscribe()
    }

    /// Returns the number of subscribers the highlight reached.
    pub fn highlight(&mut self, highlight: Highlight) -> usize {
        self.highlights.publish(highlight)
    }

    ///
    /// Apply a variant filter selection to every variation track.
    ///
    /// Fragment tracks are left alone. Bucketed and flat variation tracks go
    /// through the same selection, so both views keep the same variants.
    pub fn apply_filters(&mut self, filters: &ActiveFilters<'_>) {
        for track in self.tracks.iter_mut() {
            match &mut track.data {
                TrackData::Variation { buckets, .. } => {
                    *buckets = filters.filter_data_variation(buckets);
                }
                TrackData::VariationGraph { variants, .. } => {
                    *variants = filters.filter_data_variation_graph(variants);
                }
                TrackData::Rows(_) => {}
            }
        }
    }

    /// Hand every track to the sink, then ask it to redraw once.
    pub fn render<S: RenderSink + ?Sized>(&self, sink: &mut S, sequence_length: u32) {
        for track in &self.tracks {
            sink.set_data(track, sequence_length);
            sink.on_data_changed(track);
        }
        sink.refresh();
    }
}

///
/// Colors for fragment tracks that are not derived from the data itself.
///
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct TrackPalette {
    pub observed: Rgb,
    pub unobserved: Rgb,
    pub unique_peptide: Rgb,
    pub non_unique_peptide: Rgb,
    pub antigen: Rgb,
}

impl Default for TrackPalette {
    fn default() -> Self {
        TrackPalette {
            observed: Rgb::new(0x00, 0x66, 0x99),
            unobserved: Rgb::new(0xcc, 0xcc, 0xcc),
            unique_peptide: Rgb::new(0x00, 0x80, 0x80),
            non_unique_peptide: Rgb::new(0x99, 0x99, 0x99),
            antigen: Rgb::new(0x99, 0x66, 0xcc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use protrack_core::models::{Accession, Interval, Location};
    use protrack_variants::{FilterEngine, SourceType, VariantPalette, default_filters};

    fn variant(begin: u32, alt: &str, source_type: SourceType) -> VariantWithSources {
        VariantWithSources {
            begin,
            end: begin,
            alternative_sequence: alt.into(),
            source_type: Some(source_type),
            ..Default::default()
        }
    }

    #[fixture]
    fn category() -> Category {
        let fragment = Fragment::new(1, Interval::from((1, 2)), Rgb::BLACK);
        let rows = vec![TrackRow::new(
            "Domain",
            vec![Accession::from_location(Location {
                fragments: vec![fragment],
            })],
        )];
        let variants = vec![
            variant(1, "K", SourceType::UniProt),
            variant(2, "L", SourceType::LargeScaleStudy),
        ];
        let buckets = vec![
            VariantBucket {
                position: 1,
                residue: "M".into(),
                variants: vec![variants[0].clone()],
            },
            VariantBucket {
                position: 2,
                residue: "A".into(),
                variants: vec![variants[1].clone()],
            },
        ];
        Category::new(
            "MIXED",
            "Mixed",
            vec![
                Track::new("Domain", TrackData::Rows(rows)),
                Track::new(
                    "Variants",
                    TrackData::Variation {
                        sequence: "MA".into(),
                        buckets,
                    },
                ),
                Track::new(
                    "Graph",
                    TrackData::VariationGraph {
                        sequence_length: 2,
                        variants,
                    },
                ),
            ],
        )
    }

    #[rstest]
    fn test_main_track_and_subtracks(category: Category) {
        assert_eq!(category.main_track().map(|t| t.label.as_str()), Some("Domain"));
        assert_eq!(category.subtracks().len(), 2);
        assert_eq!(category.main_track().unwrap().data.fragments().count(), 1);
        assert_eq!(Category::default().subtracks().len(), 0);
    }

    #[rstest]
    fn test_apply_filters_touches_both_variant_views(mut category: Category) {
        let engine = FilterEngine::new(default_filters(&VariantPalette::default(), &[]));
        let active = engine.activate(&["UniProt"]).unwrap();
        category.apply_filters(&active);

        match &category.track("Variants").unwrap().data {
            TrackData::Variation { buckets, .. } => {
                assert_eq!(buckets.len(), 2);
                assert_eq!(buckets[0].variants.len(), 1);
                assert!(buckets[1].variants.is_empty());
            }
            other => panic!("unexpected track data {:?}", other),
        }
        match &category.track("Graph").unwrap().data {
            TrackData::VariationGraph { variants, .. } => {
                assert_eq!(variants.len(), 1);
                assert_eq!(variants[0].alternative_sequence, "K");
            }
            other => panic!("unexpected track data {:?}", other),
        }
        assert_eq!(category.track("Domain").unwrap().data.fragments().count(), 1);
    }

    #[rstest]
    fn test_serializes_with_track_kind(category: Category) {
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["tracks"][0]["data"]["kind"], "rows");
        assert_eq!(json["tracks"][1]["data"]["kind"], "variation");
        assert_eq!(json["tracks"][2]["data"]["kind"], "variationGraph");
        assert_eq!(json["tracks"][2]["data"]["data"]["sequenceLength"], 2);
        assert!(json.get("highlights").is_none());
    }
}
