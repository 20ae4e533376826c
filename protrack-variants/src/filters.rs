//! Variant filters.
//!
//! A [`FilterCase`] is a named set of predicates; a variant passes the case
//! when every predicate accepts it. Each case can be applied to the two shapes
//! the variation views use: position buckets ([`FilterCase::filter_data_variation`])
//! and the flat list behind the graph ([`FilterCase::filter_data_variation_graph`]).
//! Both go through [`FilterCase::passes`], so a variant gets the same verdict
//! in either shape.
//!
//! Cases are grouped into facets by their type name. [`FilterEngine::activate`]
//! turns a selection of case names into an [`ActiveFilters`] that ORs the
//! selected cases within a facet and ANDs the facets together.

use std::fmt::{self, Debug};
use std::sync::Arc;

use fxhash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use protrack_core::Rgb;

use crate::errors::{VariantError, VariantResult};
use crate::fill::{VariantPalette, external_score, prediction_score};
use crate::models::{SourceType, VariantBucket, VariantWithSources};

pub const CONSEQUENCE_FACET: &str = "consequence";
pub const PROVENANCE_FACET: &str = "provenance";
pub const CUSTOM_FILTER_PREFIX: &str = "custom:";

pub type Predicate = Arc<dyn Fn(&VariantWithSources) -> bool + Send + Sync>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FilterType {
    pub name: String,
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub labels: Vec<String>,
    pub colors: Vec<Rgb>,
}

#[derive(Clone)]
pub struct FilterCase {
    pub name: String,
    pub filter_type: FilterType,
    pub options: FilterOptions,
    properties: Vec<Predicate>,
}

impl Debug for FilterCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterCase")
            .field("name", &self.name)
            .field("filter_type", &self.filter_type)
            .field("options", &self.options)
            .field("properties", &self.properties.len())
            .finish()
    }
}

impl FilterCase {
    pub fn new(name: impl Into<String>, filter_type: FilterType, options: FilterOptions) -> Self {
        FilterCase {
            name: name.into(),
            filter_type,
            options,
            properties: Vec::new(),
        }
    }

    pub fn with_property<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&VariantWithSources) -> bool + Send + Sync + 'static,
    {
        self.properties.push(Arc::new(predicate));
        self
    }

    pub fn properties(&self) -> &[Predicate] {
        &self.properties
    }

    /// AND over all predicates. A case without predicates passes everything.
    pub fn passes(&self, variant: &VariantWithSources) -> bool {
        self.properties.iter().all(|p| p(variant))
    }

    /// Filter each bucket's variants, keeping every bucket.
    pub fn filter_data_variation(&self, buckets: &[VariantBucket]) -> Vec<VariantBucket> {
        filter_buckets(buckets, |v| self.passes(v))
    }

    pub fn filter_data_variation_graph(
        &self,
        variants: &[VariantWithSources],
    ) -> Vec<VariantWithSources> {
        variants.iter().filter(|v| self.passes(v)).cloned().collect()
    }
}

fn filter_buckets<F>(buckets: &[VariantBucket], keep: F) -> Vec<VariantBucket>
where
    F: Fn(&VariantWithSources) -> bool,
{
    buckets
        .iter()
        .map(|bucket| VariantBucket {
            position: bucket.position,
            residue: bucket.residue.clone(),
            variants: bucket.variants.iter().filter(|v| keep(v)).cloned().collect(),
        })
        .collect()
}

///
/// Filter cases by name, in registration order.
///
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    cases: Vec<FilterCase>,
    by_name: HashMap<String, usize>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, case: FilterCase) -> VariantResult<()> {
        if self.by_name.contains_key(&case.name) {
            return Err(VariantError::DuplicateFilter(case.name));
        }
        self.by_name.insert(case.name.clone(), self.cases.len());
        self.cases.push(case);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FilterCase> {
        self.by_name.get(name).map(|&i| &self.cases[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterCase> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

fn consequence(text: &str) -> FilterType {
    FilterType {
        name: CONSEQUENCE_FACET.to_string(),
        text: text.to_string(),
    }
}

fn provenance() -> FilterType {
    FilterType {
        name: PROVENANCE_FACET.to_string(),
        text: "Filter data source".to_string(),
    }
}

fn options(labels: &[&str], colors: &[Rgb]) -> FilterOptions {
    FilterOptions {
        labels: labels.iter().map(|l| l.to_string()).collect(),
        colors: colors.to_vec(),
    }
}

fn is_curated(variant: &VariantWithSources) -> bool {
    matches!(
        variant.source_type,
        Some(SourceType::UniProt) | Some(SourceType::Mixed)
    )
}

fn is_large_scale(variant: &VariantWithSources) -> bool {
    matches!(
        variant.source_type,
        Some(SourceType::LargeScaleStudy) | Some(SourceType::Mixed)
    )
}

fn has_score(variant: &VariantWithSources) -> bool {
    prediction_score(&variant.predictions).is_some() || external_score(variant).is_some()
}

///
/// The built-in consequence and provenance filters, plus one provenance
/// filter per custom source name. A custom source named like a built-in
/// filter is registered as `custom:<name>`.
///
/// # Arguments
/// - palette: colors shown next to each filter's labels
/// - custom_sources: names of caller supplied sources present in the data
pub fn default_filters(palette: &VariantPalette, custom_sources: &[String]) -> FilterRegistry {
    let cases = vec![
        FilterCase::new(
            "disease",
            consequence("Filter consequence"),
            options(&["Likely disease"], &[palette.disease]),
        )
        .with_property(|v| !v.is_uncertain())
        .with_property(|v| v.has_disease_association()),
        FilterCase::new(
            "predicted",
            consequence("Filter consequence"),
            options(
                &["Predicted deleterious", "Predicted benign"],
                &[palette.deleterious, palette.benign],
            ),
        )
        .with_property(|v| !v.is_uncertain())
        .with_property(|v| !v.has_disease_association())
        .with_property(|v| !is_curated(v))
        .with_property(has_score),
        FilterCase::new(
            "nonDisease",
            consequence("Filter consequence"),
            options(&["Likely benign"], &[palette.non_disease]),
        )
        .with_property(|v| !v.is_uncertain())
        .with_property(is_curated)
        .with_property(|v| !v.has_disease_association()),
        FilterCase::new(
            "uncertain",
            consequence("Filter consequence"),
            options(&["Uncertain significance"], &[palette.uncertain]),
        )
        .with_property(|v| {
            v.is_uncertain()
                || (!is_curated(v) && !v.has_disease_association() && !has_score(v))
        }),
        FilterCase::new("UniProt", provenance(), options(&["UniProt reviewed"], &[]))
            .with_property(is_curated),
        FilterCase::new("ClinVar", provenance(), options(&["ClinVar"], &[]))
            .with_property(|v| v.has_xref("ClinVar")),
        FilterCase::new("LSS", provenance(), options(&["Large scale studies"], &[]))
            .with_property(is_large_scale),
    ];

    let mut registry = FilterRegistry::new();
    for case in cases {
        if let Err(e) = registry.register(case) {
            log::warn!("Skipping built-in filter: {}", e);
        }
    }

    for source in custom_sources {
        let filter_name = custom_filter_name(&registry, source);
        if filter_name != *source {
            log::warn!(
                "Custom source {} shares its name with a built-in filter, registered as {}",
                source,
                filter_name
            );
        }
        let name = source.clone();
        let case = FilterCase::new(filter_name, provenance(), options(&[source.as_str()], &[]))
            .with_property(move |v| v.has_source(&name));
        if let Err(e) = registry.register(case) {
            log::warn!("Skipping filter for custom source {}: {}", source, e);
        }
    }
    registry
}

///
/// Name under which the filter for a custom source is registered: the source
/// name itself, or the source name behind [`CUSTOM_FILTER_PREFIX`] when a
/// built-in filter already uses it.
pub fn custom_filter_name(registry: &FilterRegistry, source: &str) -> String {
    if registry.get(source).is_some() {
        format!("{}{}", CUSTOM_FILTER_PREFIX, source)
    } else {
        source.to_string()
    }
}

///
/// Applies selections of named filters from a registry.
///
#[derive(Debug, Clone)]
pub struct FilterEngine {
    registry: FilterRegistry,
}

/// A resolved selection: selected cases grouped by facet.
#[derive(Debug)]
pub struct ActiveFilters<'a> {
    facets: Vec<(&'a str, Vec<&'a FilterCase>)>,
}

impl FilterEngine {
    pub fn new(registry: FilterRegistry) -> Self {
        FilterEngine { registry }
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    ///
    /// Resolve selected filter names into facets.
    ///
    /// Facets keep the order in which their first selected case was given.
    pub fn activate<S: AsRef<str>>(&self, selected: &[S]) -> VariantResult<ActiveFilters<'_>> {
        let mut facets: Vec<(&str, Vec<&FilterCase>)> = Vec::new();
        for name in selected {
            let name = name.as_ref();
            let case = self
                .registry
                .get(name)
                .ok_or_else(|| VariantError::UnknownFilter(name.to_string()))?;
            let facet = case.filter_type.name.as_str();
            match facets.iter_mut().find(|(f, _)| *f == facet) {
                Some((_, cases)) => cases.push(case),
                None => facets.push((facet, vec![case])),
            }
        }
        Ok(ActiveFilters { facets })
    }
}

impl ActiveFilters<'_> {
    /// Every facet must have at least one passing case. No selection passes all.
    pub fn passes(&self, variant: &VariantWithSources) -> bool {
        self.facets
            .iter()
            .all(|(_, cases)| cases.iter().any(|c| c.passes(variant)))
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    pub fn filter_data_variation(&self, buckets: &[VariantBucket]) -> Vec<VariantBucket> {
        filter_buckets(buckets, |v| self.passes(v))
    }

    pub fn filter_data_variation_graph(
        &self,
        variants: &[VariantWithSources],
    ) -> Vec<VariantWithSources> {
        variants.iter().filter(|v| self.passes(v)).cloned().collect()
    }
}
