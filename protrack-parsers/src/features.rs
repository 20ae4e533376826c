//! Sequence features: domains, sites, secondary structure, modifications.

use fxhash::FxHashMap as HashMap;
use serde::Deserialize;
use serde_json::Value;

use protrack_core::models::{Fragment, FragmentIds, Interval, Shape, TrackRow};
use protrack_core::utils::parse_position;
use protrack_core::{Rgb, Tooltip};
use protrack_layout::FragmentAligner;

use crate::errors::ParseResult;
use crate::models::{Category, Track, TrackData};
use crate::parser::{Parser, decode, humanize};

const UNCATEGORIZED: &str = "OTHER";

/// A residue position as the features APIs send it, a number or a string
/// such as `"12"`, `">12"` or `"~"`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawPosition {
    Number(u64),
    Text(String),
}

impl RawPosition {
    pub fn resolve(&self) -> Option<u32> {
        match self {
            RawPosition::Number(n) => u32::try_from(*n).ok(),
            RawPosition::Text(s) => parse_position(s),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct EvidenceSource {
    pub name: Option<String>,
    pub id: Option<String>,
    pub url: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Evidence {
    pub code: Option<String>,
    pub source: Option<EvidenceSource>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub category: Option<String>,
    pub begin: Option<RawPosition>,
    pub end: Option<RawPosition>,
    pub description: Option<String>,
    pub ft_id: Option<String>,
    #[serde(default)]
    pub evidences: Vec<Evidence>,
    /// Proteomics only.
    pub unique: Option<bool>,
    /// Proteomics only.
    pub peptide: Option<String>,
}

impl RawFeature {
    /// Both ends resolved, `None` when either is unknown.
    pub fn interval(&self) -> Option<Interval> {
        let begin = self.begin.as_ref()?.resolve()?;
        let end = self.end.as_ref()?.resolve()?;
        Interval::new(begin, end).ok()
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FeaturesPayload {
    pub accession: Option<String>,
    pub sequence: Option<String>,
    #[serde(default)]
    pub features: Vec<RawFeature>,
}

pub(crate) fn describe_evidences(evidences: &[Evidence]) -> String {
    evidences
        .iter()
        .map(|e| {
            let code = e.code.as_deref().unwrap_or("");
            match &e.source {
                Some(EvidenceSource {
                    name: Some(name),
                    id: Some(id),
                    ..
                }) => format!("{} {}:{}", code, name, id).trim().to_string(),
                _ => code.to_string(),
            }
        })
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("<br/>")
}

pub(crate) fn feature_tooltip(feature: &RawFeature, interval: Interval) -> Tooltip {
    let position = if interval.start == interval.end {
        interval.start.to_string()
    } else {
        interval.to_string()
    };
    Tooltip::new(format!("{} {}", humanize(&feature.feature_type), position))
        .optional_row("Description", feature.description.clone())
        .optional_row("Feature ID", feature.ft_id.clone())
        .row("Evidence", describe_evidences(&feature.evidences))
}

///
/// Color and shape for a UniProt feature type.
///
pub fn feature_style(feature_type: &str) -> (Rgb, Shape) {
    match feature_type.to_ascii_uppercase().as_str() {
        "DOMAIN" | "REGION" | "REPEAT" | "ZN_FING" | "DNA_BIND" => {
            (Rgb::new(0x1b, 0x9e, 0x77), Shape::Roundrectangle)
        }
        "MOTIF" | "COILED" | "COMPBIAS" => (Rgb::new(0x66, 0xa6, 0x1e), Shape::Roundrectangle),
        "HELIX" => (Rgb::new(0xff, 0x00, 0x66), Shape::Rectangle),
        "STRAND" => (Rgb::new(0xff, 0xcc, 0x00), Shape::Rectangle),
        "TURN" => (Rgb::new(0x00, 0x66, 0xcc), Shape::Rectangle),
        "ACT_SITE" | "BINDING" | "METAL" | "SITE" => (Rgb::new(0xd9, 0x5f, 0x02), Shape::Circle),
        "MOD_RES" | "CARBOHYD" | "LIPID" | "CROSSLNK" => {
            (Rgb::new(0x75, 0x70, 0xb3), Shape::Triangle)
        }
        "DISULFID" => (Rgb::new(0xe6, 0xab, 0x02), Shape::Line),
        "MUTAGEN" | "CONFLICT" | "VAR_SEQ" => (Rgb::new(0xe7, 0x29, 0x8a), Shape::Diamond),
        "SIGNAL" | "TRANSIT" | "PROPEP" | "PEPTIDE" | "CHAIN" | "INIT_MET" => {
            (Rgb::new(0xa6, 0x76, 0x1d), Shape::Chevron)
        }
        _ => (Rgb::new(0x66, 0x66, 0x66), Shape::Rectangle),
    }
}

/// Pack fragments and wrap them into a single-row-set track.
pub(crate) fn rows_track(label: &str, fragments: Vec<Fragment>) -> Track {
    let aligner: FragmentAligner = fragments.into_iter().collect();
    let rows = vec![TrackRow::new(label, aligner.align_fragments())];
    Track::new(label, TrackData::Rows(rows))
}

/// Fragments of one category, grouped by feature type in first-seen order.
#[derive(Default)]
struct CategoryBuilder {
    by_type: Vec<(String, Vec<Fragment>)>,
}

impl CategoryBuilder {
    fn push(&mut self, feature_type: &str, fragment: Fragment) {
        match self.by_type.iter_mut().find(|(t, _)| t == feature_type) {
            Some((_, fragments)) => fragments.push(fragment),
            None => self
                .by_type
                .push((feature_type.to_string(), vec![fragment])),
        }
    }

    fn build(self, name: String) -> Category {
        let label = humanize(&name);
        let all: Vec<Fragment> = self
            .by_type
            .iter()
            .flat_map(|(_, fragments)| fragments.iter().cloned())
            .collect();

        let mut tracks = vec![rows_track(&label, all)];
        tracks.extend(
            self.by_type
                .into_iter()
                .map(|(feature_type, fragments)| rows_track(&humanize(&feature_type), fragments)),
        );
        Category::new(name, label, tracks)
    }
}

///
/// Parser for the features API. Each feature category becomes one
/// [`Category`] whose main track packs all of the category's fragments and
/// whose subtracks hold one feature type each. A feature keeps the same
/// fragment id in both places.
///
#[derive(Debug, Clone, Default)]
pub struct FeaturesParser;

impl FeaturesParser {
    pub fn new() -> Self {
        FeaturesParser
    }
}

impl Parser for FeaturesParser {
    fn name(&self) -> &'static str {
        "features"
    }

    fn parse(&self, id: &str, raw: &Value) -> ParseResult<Option<Vec<Category>>> {
        let Some(payload) = decode::<FeaturesPayload>(self.name(), id, raw)? else {
            return Ok(None);
        };

        let mut ids = FragmentIds::new();
        let mut order: Vec<String> = Vec::new();
        let mut builders: HashMap<String, CategoryBuilder> = HashMap::default();

        for feature in &payload.features {
            let Some(interval) = feature.interval() else {
                log::debug!(
                    "Skipping {} feature of {} with unresolved position",
                    feature.feature_type,
                    id
                );
                continue;
            };

            let (color, shape) = feature_style(&feature.feature_type);
            let fragment = Fragment::new(ids.next_id(), interval, color)
                .with_shape(shape)
                .with_tooltip(feature_tooltip(feature, interval).render());

            let category = feature
                .category
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            if !builders.contains_key(&category) {
                order.push(category.clone());
            }
            builders
                .entry(category)
                .or_default()
                .push(&feature.feature_type, fragment);
        }

        let categories: Vec<Category> = order
            .into_iter()
            .filter_map(|name| builders.remove(&name).map(|b| b.build(name)))
            .collect();

        log::debug!("{} feature categories for {}", categories.len(), id);
        if categories.is_empty() {
            Ok(None)
        } else {
            Ok(Some(categories))
        }
    }
}
