use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use protrack_variants::{
    FilterRegistry, VariantBucket, VariantStyle, VariantWithSources, default_filters,
    reconcile_variants,
};

use crate::errors::ParseResult;
use crate::models::{Category, Track, TrackData};
use crate::parser::{Parser, decode};

pub const VARIATION_CATEGORY: &str = "VARIATION";

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct VariationPayload {
    pub accession: Option<String>,
    pub sequence: Option<String>,
    #[serde(default)]
    pub features: Vec<Value>,
}

///
/// Group variants by their begin position.
///
/// With a reference sequence there is one bucket per residue and variants
/// starting outside the sequence are left out. Without one, only positions
/// that carry variants get a bucket, in ascending order.
pub fn bucket_variants(sequence: &str, variants: &[VariantWithSources]) -> Vec<VariantBucket> {
    if sequence.is_empty() {
        return sparse_buckets(variants);
    }

    let mut buckets: Vec<VariantBucket> = sequence
        .chars()
        .zip(1..)
        .map(|(residue, position)| VariantBucket {
            position,
            residue: residue.to_string(),
            variants: Vec::new(),
        })
        .collect();

    for variant in variants {
        match variant.begin.checked_sub(1).and_then(|i| buckets.get_mut(i as usize)) {
            Some(bucket) => bucket.variants.push(variant.clone()),
            None => log::debug!("Variant at {} is outside the sequence", variant.begin),
        }
    }
    buckets
}

fn sparse_buckets(variants: &[VariantWithSources]) -> Vec<VariantBucket> {
    let mut by_position: BTreeMap<u32, Vec<VariantWithSources>> = BTreeMap::new();
    for variant in variants {
        by_position.entry(variant.begin).or_default().push(variant.clone());
    }
    by_position
        .into_iter()
        .map(|(position, variants)| VariantBucket {
            position,
            residue: String::new(),
            variants,
        })
        .collect()
}

///
/// Parser for the variation API.
///
/// API variants are reconciled with the caller's custom variants before
/// anything is drawn, so every variant carries its final color and tooltip.
/// The result is one category with a position-bucketed track and a flat
/// track over the same variants.
///
#[derive(Debug, Clone, Default)]
pub struct VariationParser {
    style: VariantStyle,
    custom_variants: Vec<VariantWithSources>,
}

impl VariationParser {
    pub fn new(style: VariantStyle) -> Self {
        VariationParser {
            style,
            custom_variants: Vec::new(),
        }
    }

    pub fn with_custom_variants(mut self, variants: Vec<VariantWithSources>) -> Self {
        self.custom_variants = variants;
        self
    }

    /// Distinct custom source names, in first-seen order.
    pub fn custom_sources(&self) -> Vec<String> {
        let mut sources: Vec<String> = Vec::new();
        for name in self.custom_variants.iter().filter_map(|v| v.custom_source.as_ref()) {
            if !sources.contains(name) {
                sources.push(name.clone());
            }
        }
        sources
    }

    /// Built-in filters plus one per custom source.
    pub fn filters(&self) -> FilterRegistry {
        default_filters(&self.style.palette, &self.custom_sources())
    }
}

impl Parser for VariationParser {
    fn name(&self) -> &'static str {
        "variation"
    }

    fn parse(&self, id: &str, raw: &Value) -> ParseResult<Option<Vec<Category>>> {
        let Some(payload) = decode::<VariationPayload>(self.name(), id, raw)? else {
            return Ok(None);
        };

        let api: Vec<VariantWithSources> = payload
            .features
            .iter()
            .filter_map(|feature| match VariantWithSources::deserialize(feature) {
                Ok(variant) => Some(variant),
                Err(e) => {
                    log::debug!("Skipping variant of {}: {}", id, e);
                    None
                }
            })
            .collect();

        let variants = reconcile_variants(api, self.custom_variants.clone(), &self.style);
        if variants.is_empty() {
            return Ok(None);
        }

        let sequence = payload.sequence.unwrap_or_default();
        let sequence_length = if sequence.is_empty() {
            variants.iter().map(|v| v.end).max().unwrap_or(0)
        } else {
            sequence.chars().count() as u32
        };

        log::debug!("{} variants for {}", variants.len(), id);
        let buckets = bucket_variants(&sequence, &variants);
        let tracks = vec![
            Track::new("Variants", TrackData::Variation { sequence, buckets }),
            Track::new(
                "Variant graph",
                TrackData::VariationGraph {
                    sequence_length,
                    variants,
                },
            ),
        ];
        Ok(Some(vec![Category::new(VARIATION_CATEGORY, "Variants", tracks)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    use protrack_variants::{FilterEngine, SourceType};

    #[fixture]
    fn payload() -> Value {
        json!({
            "accession": "P1",
            "sequence": "MKRA",
            "features": [
                {"type": "VARIANT", "begin": "2", "end": "2", "wildType": "K", "alternativeSequence": "E",
                 "sourceType": "large_scale_study", "consequenceType": "missense"},
                {"type": "VARIANT", "begin": "3", "end": "3", "wildType": "R", "alternativeSequence": "*",
                 "sourceType": "uniprot"},
                {"type": "VARIANT", "begin": "~", "end": "3"}
            ]
        })
    }

    fn custom() -> Vec<VariantWithSources> {
        serde_json::from_value(json!([
            {"begin": 2, "end": 2, "alternativeSequence": "E", "customSource": "lab",
             "predictions": [{"predAlgorithmNameType": "SIFT", "score": 0.0}]},
            {"begin": 4, "end": 4, "alternativeSequence": "P", "customSource": "lab"}
        ]))
        .unwrap()
    }

    fn graph(category: &Category) -> &[VariantWithSources] {
        match &category.tracks[1].data {
            TrackData::VariationGraph { variants, .. } => variants.as_slice(),
            other => panic!("unexpected track data {:?}", other),
        }
    }

    #[rstest]
    fn test_bucketed_and_flat_views(payload: Value) {
        let categories = VariationParser::default().parse("P1", &payload).unwrap().unwrap();
        let category = &categories[0];

        let TrackData::Variation { sequence, buckets } = &category.tracks[0].data else {
            panic!("expected variation track");
        };
        assert_eq!(sequence, "MKRA");
        let residues: Vec<&str> = buckets.iter().map(|b| b.residue.as_str()).collect();
        assert_eq!(residues, vec!["M", "K", "R", "A"]);
        let sizes: Vec<usize> = buckets.iter().map(|b| b.variants.len()).collect();
        assert_eq!(sizes, vec![0, 1, 1, 0]);

        assert_eq!(graph(category).len(), 2);
        assert!(graph(category).iter().all(|v| v.color.is_some()));
    }

    #[rstest]
    fn test_custom_variants_are_reconciled(payload: Value) {
        let parser = VariationParser::new(VariantStyle::default()).with_custom_variants(custom());
        let categories = parser.parse("P1", &payload).unwrap().unwrap();
        let variants = graph(&categories[0]);

        assert_eq!(variants.len(), 3);
        let merged = &variants[0];
        assert_eq!(merged.source_type, Some(SourceType::LargeScaleStudy));
        assert!(merged.other_sources.contains_key("lab"));
        assert_eq!(merged.color, Some(VariantStyle::default().palette.deleterious));

        assert_eq!(parser.custom_sources(), vec!["lab".to_string()]);
        let engine = FilterEngine::new(parser.filters());
        let active = engine.activate(&["lab"]).unwrap();
        assert_eq!(active.filter_data_variation_graph(variants).len(), 2);
    }

    #[rstest]
    fn test_sequence_length_from_variants_when_sequence_missing() {
        let raw = json!({"features": [{"begin": 7, "end": 9, "alternativeSequence": "A"}]});
        let categories = VariationParser::default().parse("P1", &raw).unwrap().unwrap();
        match &categories[0].tracks[1].data {
            TrackData::VariationGraph {
                sequence_length, ..
            } => assert_eq!(*sequence_length, 9),
            other => panic!("unexpected track data {:?}", other),
        }
    }

    #[rstest]
    fn test_far_variant_without_sequence_gets_one_bucket() {
        let raw = json!({"features": [
            {"begin": 5000000, "end": 5000000, "alternativeSequence": "A"},
            {"begin": 12, "end": 12, "alternativeSequence": "G"},
            {"begin": 12, "end": 12, "alternativeSequence": "T"}
        ]});
        let categories = VariationParser::default().parse("P1", &raw).unwrap().unwrap();
        let TrackData::Variation { buckets, .. } = &categories[0].tracks[0].data else {
            panic!("expected variation track");
        };

        let positions: Vec<(u32, usize)> = buckets
            .iter()
            .map(|b| (b.position, b.variants.len()))
            .collect();
        assert_eq!(positions, vec![(12, 2), (5000000, 1)]);
        assert!(buckets.iter().all(|b| b.residue.is_empty()));
    }

    #[rstest]
    fn test_no_variants() {
        let raw = json!({"sequence": "MKRA", "features": []});
        assert!(VariationParser::default().parse("P1", &raw).unwrap().is_none());
    }
}
