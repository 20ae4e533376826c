use serde_json::Value;

use protrack_core::models::{Fragment, FragmentIds, Shape};

use crate::errors::ParseResult;
use crate::features::{FeaturesPayload, feature_tooltip, rows_track};
use crate::models::{Category, TrackPalette};
use crate::parser::{Parser, decode};

pub const PROTEOMICS_CATEGORY: &str = "PROTEOMICS";
pub const ANTIGEN_CATEGORY: &str = "ANTIGEN";

///
/// Peptides observed by mass spectrometry, split by whether they map to this
/// protein only.
///
#[derive(Debug, Clone, Default)]
pub struct ProteomicsParser {
    palette: TrackPalette,
}

impl ProteomicsParser {
    pub fn new(palette: TrackPalette) -> Self {
        ProteomicsParser { palette }
    }
}

impl Parser for ProteomicsParser {
    fn name(&self) -> &'static str {
        "proteomics"
    }

    fn parse(&self, id: &str, raw: &Value) -> ParseResult<Option<Vec<Category>>> {
        let Some(payload) = decode::<FeaturesPayload>(self.name(), id, raw)? else {
            return Ok(None);
        };

        let mut ids = FragmentIds::new();
        let mut unique = Vec::new();
        let mut shared = Vec::new();

        for feature in &payload.features {
            let Some(interval) = feature.interval() else {
                continue;
            };
            let is_unique = feature.unique.unwrap_or(false);
            let color = if is_unique {
                self.palette.unique_peptide
            } else {
                self.palette.non_unique_peptide
            };
            let tooltip = feature_tooltip(feature, interval)
                .optional_row("Peptide", feature.peptide.clone())
                .row("Unique", if is_unique { "Yes" } else { "No" });
            let fragment = Fragment::new(ids.next_id(), interval, color)
                .with_shape(Shape::Rectangle)
                .with_tooltip(tooltip.render());

            if is_unique {
                unique.push(fragment);
            } else {
                shared.push(fragment);
            }
        }

        if unique.is_empty() && shared.is_empty() {
            return Ok(None);
        }

        let all: Vec<Fragment> = unique.iter().chain(shared.iter()).cloned().collect();
        let mut tracks = vec![rows_track("Proteomics", all)];
        if !unique.is_empty() {
            tracks.push(rows_track("Unique peptide", unique));
        }
        if !shared.is_empty() {
            tracks.push(rows_track("Non-unique peptide", shared));
        }

        Ok(Some(vec![Category::new(PROTEOMICS_CATEGORY, "Proteomics", tracks)]))
    }
}

///
/// Antigenic sequences, drawn as a single track.
///
#[derive(Debug, Clone, Default)]
pub struct AntigenParser {
    palette: TrackPalette,
}

impl AntigenParser {
    pub fn new(palette: TrackPalette) -> Self {
        AntigenParser { palette }
    }
}

impl Parser for AntigenParser {
    fn name(&self) -> &'static str {
        "antigen"
    }

    fn parse(&self, id: &str, raw: &Value) -> ParseResult<Option<Vec<Category>>> {
        let Some(payload) = decode::<FeaturesPayload>(self.name(), id, raw)? else {
            return Ok(None);
        };

        let mut ids = FragmentIds::new();
        let fragments: Vec<Fragment> = payload
            .features
            .iter()
            .filter_map(|feature| {
                let interval = feature.interval()?;
                Some(
                    Fragment::new(ids.next_id(), interval, self.palette.antigen)
                        .with_shape(Shape::Rectangle)
                        .with_tooltip(feature_tooltip(feature, interval).render()),
                )
            })
            .collect();

        if fragments.is_empty() {
            return Ok(None);
        }
        let label = "Antigenic sequences";
        Ok(Some(vec![Category::new(
            ANTIGEN_CATEGORY,
            label,
            vec![rows_track(label, fragments)],
        )]))
    }
}
