use fxhash::FxHashMap as HashMap;

use crate::fill::VariantStyle;
use crate::models::{OtherSourceData, VariantKey, VariantWithSources};

///
/// Combine two variants that share a [`VariantKey`].
///
/// Only custom-sourced data is merged. When `incoming` carries a
/// `custom_source` it is folded into `existing`; when only `existing` does,
/// it is folded into `incoming`. The surviving record's `other_sources`
/// becomes the union of both (entries of `incoming` win on a name clash)
/// plus one entry, named after the folded variant's custom source, holding
/// that variant's own data. Without any custom source `incoming` replaces
/// `existing` unchanged.
///
/// Derived fields are left stale; callers refresh them afterwards.
pub fn combine_sources(
    mut existing: VariantWithSources,
    mut incoming: VariantWithSources,
) -> VariantWithSources {
    if existing.custom_source.is_none() && incoming.custom_source.is_none() {
        return incoming;
    }

    let mut other_sources = std::mem::take(&mut existing.other_sources);
    other_sources.extend(std::mem::take(&mut incoming.other_sources));

    let (mut kept, folded) = if incoming.custom_source.is_some() {
        (existing, incoming)
    } else {
        (incoming, existing)
    };

    if let Some(tag) = folded.custom_source.clone() {
        other_sources.insert(tag, OtherSourceData::from(&folded));
    }
    kept.other_sources = other_sources;
    kept
}

///
/// Merge two variant collections into one.
///
/// Every variant of `primary` is inserted first, then `secondary` variants are
/// merged in through [`combine_sources`]. Output order is the order in which
/// keys were first seen. Every returned variant has its color and tooltip
/// recomputed from its merged state.
///
/// # Arguments
/// - primary: the canonical collection, usually the API variants
/// - secondary: caller supplied variants, usually tagged with a custom source
/// - style: palette and prediction preference used for the recomputation
pub fn reconcile_variants(
    primary: Vec<VariantWithSources>,
    secondary: Vec<VariantWithSources>,
    style: &VariantStyle,
) -> Vec<VariantWithSources> {
    let mut index: HashMap<VariantKey, usize> = HashMap::default();
    let mut merged: Vec<VariantWithSources> = Vec::with_capacity(primary.len() + secondary.len());

    for variant in primary.into_iter().chain(secondary) {
        let key = variant.key();
        match index.get(&key) {
            Some(&slot) => {
                let existing = std::mem::take(&mut merged[slot]);
                merged[slot] = combine_sources(existing, variant);
            }
            None => {
                index.insert(key, merged.len());
                merged.push(variant);
            }
        }
    }

    for variant in merged.iter_mut() {
        variant.refresh(style);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use protrack_core::Rgb;

    use crate::fill::variants_fill;
    use crate::models::{Prediction, SourceType};

    const STALE: Rgb = Rgb::new(1, 2, 3);

    fn api_variant(begin: u32, alt: &str) -> VariantWithSources {
        VariantWithSources {
            begin,
            end: begin,
            wild_type: Some("R".into()),
            alternative_sequence: alt.into(),
            source_type: Some(SourceType::LargeScaleStudy),
            consequence_type: Some("missense".into()),
            color: Some(STALE),
            ..Default::default()
        }
    }

    fn custom_variant(begin: u32, alt: &str, tag: &str, sift: f64) -> VariantWithSources {
        VariantWithSources {
            begin,
            end: begin,
            alternative_sequence: alt.into(),
            custom_source: Some(tag.into()),
            predictions: vec![Prediction {
                pred_algorithm_name_type: "SIFT".into(),
                prediction_val_type: Some("deleterious".into()),
                score: Some(sift),
                sources: vec![],
            }],
            description: Some(format!("from {}", tag)),
            color: Some(STALE),
            ..Default::default()
        }
    }

    #[rstest]
    fn test_custom_variant_is_folded_under_its_tag() {
        let custom = custom_variant(12, "W", "X", 0.0);
        let style = VariantStyle::default();
        let merged = reconcile_variants(vec![api_variant(12, "W")], vec![custom.clone()], &style);

        assert_eq!(merged.len(), 1);
        let variant = &merged[0];
        assert_eq!(variant.custom_source, None);
        assert_eq!(variant.source_type, Some(SourceType::LargeScaleStudy));
        assert_eq!(variant.other_sources.get("X"), Some(&OtherSourceData::from(&custom)));

        // recomputed from the merged state, not copied from either input
        assert_ne!(variant.color, Some(STALE));
        assert_eq!(variant.color, Some(variants_fill(variant, &style)));
        assert_eq!(variant.color, Some(style.palette.deleterious));
        assert!(variant.tooltip_content.contains("from X"));
    }

    #[rstest]
    fn test_existing_custom_variant_is_folded_into_incoming() {
        let custom = custom_variant(12, "W", "X", 1.0);
        let merged = combine_sources(custom.clone(), api_variant(12, "W"));
        assert_eq!(merged.custom_source, None);
        assert_eq!(merged.other_sources.get("X"), Some(&OtherSourceData::from(&custom)));
    }

    #[rstest]
    fn test_plain_duplicates_are_replaced() {
        let mut first = api_variant(5, "A");
        first.description = Some("first".into());
        let mut second = api_variant(5, "A");
        second.description = Some("second".into());

        let merged = reconcile_variants(vec![first], vec![second], &VariantStyle::default());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].description.as_deref(), Some("second"));
        assert!(merged[0].other_sources.is_empty());
    }

    #[rstest]
    fn test_other_sources_union_prefers_incoming() {
        let mut existing = api_variant(5, "A");
        existing
            .other_sources
            .insert("shared".into(), OtherSourceData { description: Some("old".into()), ..Default::default() });
        existing
            .other_sources
            .insert("only-existing".into(), OtherSourceData::default());

        let mut incoming = custom_variant(5, "A", "Y", 0.5);
        incoming
            .other_sources
            .insert("shared".into(), OtherSourceData { description: Some("new".into()), ..Default::default() });

        let merged = combine_sources(existing, incoming);
        let names: Vec<&str> = merged.other_sources.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["Y", "only-existing", "shared"]);
        assert_eq!(
            merged.other_sources["shared"].description.as_deref(),
            Some("new")
        );
    }

    #[rstest]
    fn test_distinct_keys_keep_first_seen_order() {
        let merged = reconcile_variants(
            vec![api_variant(9, "A"), api_variant(3, "C")],
            vec![custom_variant(3, "D", "X", 0.1), custom_variant(9, "A", "X", 0.1)],
            &VariantStyle::default(),
        );
        let keys: Vec<(u32, &str)> = merged
            .iter()
            .map(|v| (v.begin, v.alternative_sequence.as_str()))
            .collect();
        assert_eq!(keys, vec![(9, "A"), (3, "C"), (3, "D")]);
        assert!(merged[0].other_sources.contains_key("X"));
        assert_eq!(merged[2].custom_source.as_deref(), Some("X"));
    }
}
