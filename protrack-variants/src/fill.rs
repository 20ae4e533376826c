//! Variant coloring.
//!
//! [`variants_fill`] decides a variant's color from its provenance, disease
//! associations and functional predictions. The rules are checked in a fixed
//! order and the first one that applies wins:
//!
//! 1. an uncertain alternative sequence (`*`) is always the uncertain color
//! 2. curated (UniProt or mixed) variants are disease or non-disease colored
//! 3. large scale study variants with a disease association are disease colored
//! 4. everything else is placed on the deleterious to benign gradient by its
//!    prediction score

use serde::{Deserialize, Serialize};

use protrack_core::{Rgb, Tooltip};

use crate::models::{Prediction, SourceType, VariantWithSources};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct VariantPalette {
    pub disease: Rgb,
    pub non_disease: Rgb,
    pub uncertain: Rgb,
    pub unknown: Rgb,
    pub deleterious: Rgb,
    pub benign: Rgb,
}

impl Default for VariantPalette {
    fn default() -> Self {
        VariantPalette {
            disease: Rgb::new(0x99, 0x00, 0x00),
            non_disease: Rgb::new(0x99, 0xcc, 0x00),
            uncertain: Rgb::new(0x00, 0x33, 0xcc),
            unknown: Rgb::new(0x80, 0x80, 0x80),
            deleterious: Rgb::new(0xff, 0x33, 0x00),
            benign: Rgb::new(0x00, 0x9e, 0x73),
        }
    }
}

/// Everything variant coloring depends on besides the variant itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariantStyle {
    pub palette: VariantPalette,
    /// Prefer a record's own prediction score over scores supplied by
    /// reconciled custom sources.
    pub overwrite_predictions: bool,
}

///
/// Normalized prediction score in [0, 1]; 0 is the deleterious end.
///
/// SIFT scores are used as they are, PolyPhen scores are inverted. With both
/// present the two are averaged. A PolyPhen verdict of exactly `unknown`
/// forces the score to 1.
///
/// # Returns
/// - `None` when neither algorithm supplied a score
pub fn prediction_score(predictions: &[Prediction]) -> Option<f64> {
    let polyphen = predictions.iter().find(|p| p.is_polyphen());
    if polyphen.is_some_and(|p| p.prediction_val_type.as_deref() == Some("unknown")) {
        return Some(1.0);
    }

    let sift_score = predictions
        .iter()
        .filter(|p| p.is_sift())
        .find_map(|p| p.score);
    let polyphen_score = predictions
        .iter()
        .filter(|p| p.is_polyphen())
        .find_map(|p| p.score);

    let score = match (sift_score, polyphen_score) {
        (Some(sift), Some(polyphen)) => (sift + (1.0 - polyphen)) / 2.0,
        (Some(sift), None) => sift,
        (None, Some(polyphen)) => 1.0 - polyphen,
        (None, None) => return None,
    };
    Some(score.clamp(0.0, 1.0))
}

/// Score supplied by reconciled sources, first source in name order wins.
pub fn external_score(variant: &VariantWithSources) -> Option<f64> {
    variant
        .other_sources
        .values()
        .find_map(|source| prediction_score(&source.predictions))
}

pub fn variants_fill(variant: &VariantWithSources, style: &VariantStyle) -> Rgb {
    let palette = &style.palette;

    if variant.is_uncertain() {
        return palette.uncertain;
    }

    match variant.source_type {
        Some(SourceType::UniProt) | Some(SourceType::Mixed) => {
            return if variant.has_disease_association() {
                palette.disease
            } else {
                palette.non_disease
            };
        }
        Some(SourceType::LargeScaleStudy) if variant.has_disease_association() => {
            return palette.disease;
        }
        _ => {}
    }

    let external = external_score(variant);
    if variant.source_type.is_none() && external.is_none() && variant.consequence_type.is_none() {
        return Rgb::BLACK;
    }

    let own = prediction_score(&variant.predictions);
    let score = if style.overwrite_predictions {
        own.or(external)
    } else {
        external.or(own)
    };

    match score {
        Some(score) => Rgb::interpolate(palette.deleterious, palette.benign, score),
        None => palette.unknown,
    }
}

fn describe_predictions(predictions: &[Prediction]) -> String {
    predictions
        .iter()
        .map(|p| {
            let verdict = p.prediction_val_type.as_deref().unwrap_or("n/a");
            match p.score {
                Some(score) => format!("{}: {} ({})", p.pred_algorithm_name_type, verdict, score),
                None => format!("{}: {}", p.pred_algorithm_name_type, verdict),
            }
        })
        .collect::<Vec<_>>()
        .join("<br/>")
}

fn describe_associations(variant: &VariantWithSources) -> String {
    variant
        .association
        .iter()
        .filter_map(|a| a.name.clone())
        .collect::<Vec<_>>()
        .join(", ")
}

///
/// Build the tooltip for a variant from its current sources.
///
pub fn variant_tooltip(variant: &VariantWithSources) -> String {
    let wild_type = variant.wild_type.as_deref().unwrap_or("");
    let title = if variant.begin == variant.end {
        format!("{}{}{}", wild_type, variant.begin, variant.alternative_sequence)
    } else {
        format!(
            "{}{}-{}{}",
            wild_type, variant.begin, variant.end, variant.alternative_sequence
        )
    };

    let source_type = variant.source_type.map(|s| match s {
        SourceType::UniProt => "UniProt",
        SourceType::LargeScaleStudy => "Large scale studies",
        SourceType::Mixed => "UniProt and large scale studies",
    });

    let mut tooltip = Tooltip::new(title)
        .row(
            "Variant",
            format!("{} > {}", wild_type, variant.alternative_sequence),
        )
        .optional_row("Source", source_type)
        .optional_row("Custom source", variant.custom_source.clone())
        .optional_row("Consequence", variant.consequence_type.clone())
        .optional_row("Description", variant.description.clone())
        .row("Disease association", describe_associations(variant))
        .row("Predictions", describe_predictions(&variant.predictions))
        .row(
            "Cross-references",
            variant
                .xrefs
                .iter()
                .map(|x| match &x.id {
                    Some(id) => format!("{} {}", x.name, id),
                    None => x.name.clone(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        );

    for (name, source) in &variant.other_sources {
        let mut summary = Vec::new();
        if let Some(consequence) = &source.consequence_type {
            summary.push(consequence.clone());
        }
        let predictions = describe_predictions(&source.predictions);
        if !predictions.is_empty() {
            summary.push(predictions);
        }
        if let Some(description) = &source.description {
            summary.push(description.clone());
        }
        tooltip = tooltip.row(name.clone(), summary.join("<br/>"));
    }

    tooltip.render()
}

impl VariantWithSources {
    /// Recompute the derived color and tooltip from the record's current state.
    pub fn refresh(&mut self, style: &VariantStyle) {
        self.color = Some(variants_fill(self, style));
        self.tooltip_content = variant_tooltip(self);
    }
}
