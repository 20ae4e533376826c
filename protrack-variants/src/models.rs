use std::collections::BTreeMap;

use serde::de::Error as SerdeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use protrack_core::Rgb;
use protrack_core::utils::parse_position;

/// The alternative sequence marking a variant of uncertain consequence.
pub const UNCERTAIN_SEQUENCE: &str = "*";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    #[serde(rename = "uniprot", alias = "UniProt")]
    UniProt,
    #[serde(rename = "large_scale_study", alias = "LargeScaleStudy")]
    LargeScaleStudy,
    #[serde(rename = "mixed", alias = "Mixed")]
    Mixed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Association {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub disease: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Algorithm name, e.g. `SIFT` or `PolyPhen`.
    pub pred_algorithm_name_type: String,
    /// Algorithm verdict, e.g. `deleterious`, `benign` or `unknown`.
    #[serde(default)]
    pub prediction_val_type: Option<String>,
    pub score: Option<f64>,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl Prediction {
    pub fn is_sift(&self) -> bool {
        self.pred_algorithm_name_type.eq_ignore_ascii_case("sift")
    }

    pub fn is_polyphen(&self) -> bool {
        self.pred_algorithm_name_type
            .to_ascii_lowercase()
            .starts_with("polyphen")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Xref {
    pub name: String,
    pub id: Option<String>,
    pub url: Option<String>,
}

///
/// What a reconciled variant remembers about one additional source.
///
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OtherSourceData {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub association: Vec<Association>,
    pub consequence_type: Option<String>,
    #[serde(default)]
    pub xrefs: Vec<Xref>,
    pub description: Option<String>,
}

impl From<&VariantWithSources> for OtherSourceData {
    fn from(variant: &VariantWithSources) -> Self {
        OtherSourceData {
            predictions: variant.predictions.clone(),
            association: variant.association.clone(),
            consequence_type: variant.consequence_type.clone(),
            xrefs: variant.xrefs.clone(),
            description: variant.description.clone(),
        }
    }
}

/// Identity of a variant across sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey {
    pub begin: u32,
    pub end: u32,
    pub alternative_sequence: String,
}

///
/// A variant record, possibly combining data from several sources.
///
/// `color` and `tooltip_content` are derived: they are never read from input
/// and are recomputed whenever the record's sources change.
///
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VariantWithSources {
    #[serde(deserialize_with = "deserialize_position")]
    pub begin: u32,
    #[serde(deserialize_with = "deserialize_position")]
    pub end: u32,
    #[serde(default)]
    pub wild_type: Option<String>,
    #[serde(default, alias = "mutatedType")]
    pub alternative_sequence: String,
    #[serde(default)]
    pub source_type: Option<SourceType>,
    #[serde(default)]
    pub consequence_type: Option<String>,
    #[serde(default)]
    pub association: Vec<Association>,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub xrefs: Vec<Xref>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ft_id: Option<String>,
    #[serde(default)]
    pub custom_source: Option<String>,
    #[serde(default)]
    pub other_sources: BTreeMap<String, OtherSourceData>,
    #[serde(default, skip_deserializing)]
    pub color: Option<Rgb>,
    #[serde(default, skip_deserializing)]
    pub tooltip_content: String,
}

impl VariantWithSources {
    pub fn key(&self) -> VariantKey {
        VariantKey {
            begin: self.begin,
            end: self.end,
            alternative_sequence: self.alternative_sequence.clone(),
        }
    }

    pub fn is_uncertain(&self) -> bool {
        self.alternative_sequence == UNCERTAIN_SEQUENCE
    }

    pub fn has_disease_association(&self) -> bool {
        self.association.iter().any(|a| a.disease)
    }

    /// Whether any source, this record's own or a reconciled one, names `source`.
    pub fn has_source(&self, source: &str) -> bool {
        self.custom_source.as_deref() == Some(source) || self.other_sources.contains_key(source)
    }

    pub fn has_xref(&self, name: &str) -> bool {
        self.xrefs.iter().any(|x| x.name.eq_ignore_ascii_case(name))
            || self
                .other_sources
                .values()
                .any(|o| o.xrefs.iter().any(|x| x.name.eq_ignore_ascii_case(name)))
    }
}

/// Variants at one sequence position, the row-grouped view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct VariantBucket {
    pub position: u32,
    /// Reference residue at `position`.
    pub residue: String,
    pub variants: Vec<VariantWithSources>,
}

fn deserialize_position<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| D::Error::custom(format!("Invalid position: {}", n))),
        Value::String(s) => {
            parse_position(&s).ok_or_else(|| D::Error::custom(format!("Invalid position: {}", s)))
        }
        _ => Err(D::Error::custom("Invalid type for position")),
    }
}
