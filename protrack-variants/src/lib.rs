//! Variant handling for protrack.
//!
//! Variants arrive from several places: the variation API, and optionally a
//! caller supplied set tagged with a custom source name. This crate takes
//! them from raw records to what the variation views draw:
//!
//! - **Coloring**: [`variants_fill`] picks a color from provenance, disease
//!   association and SIFT/PolyPhen scores.
//! - **Reconciliation**: [`reconcile_variants`] merges collections keyed by
//!   position and alternative sequence, folding custom data under its source
//!   name and recomputing color and tooltip for every output.
//! - **Filtering**: [`FilterCase`]s apply to both the bucketed and the flat
//!   variant views, composed into facets by [`FilterEngine`].
//!
//! ## Quick Start
//!
//! ```rust
//! use protrack_variants::{VariantStyle, VariantWithSources, reconcile_variants};
//!
//! let api: Vec<VariantWithSources> = serde_json::from_str(
//!     r#"[{"begin": "12", "end": "12", "alternativeSequence": "W", "sourceType": "large_scale_study"}]"#,
//! ).unwrap();
//! let custom: Vec<VariantWithSources> = serde_json::from_str(
//!     r#"[{"begin": 12, "end": 12, "alternativeSequence": "W", "customSource": "lab"}]"#,
//! ).unwrap();
//!
//! let merged = reconcile_variants(api, custom, &VariantStyle::default());
//! assert_eq!(merged.len(), 1);
//! assert!(merged[0].other_sources.contains_key("lab"));
//! assert!(merged[0].color.is_some());
//! ```

pub mod errors;

/// Color and tooltip derivation for single variants.
pub mod fill;

/// Named variant filters and their facet composition.
pub mod filters;

pub mod models;

/// Merging variant collections from several sources.
pub mod reconcile;

// re-exports
pub use self::errors::{VariantError, VariantResult};
pub use self::fill::{VariantPalette, VariantStyle, variant_tooltip, variants_fill};
pub use self::filters::{
    ActiveFilters, CUSTOM_FILTER_PREFIX, FilterCase, FilterEngine, FilterOptions, FilterRegistry,
    FilterType, custom_filter_name, default_filters,
};
pub use self::models::{
    OtherSourceData, Prediction, SourceType, VariantBucket, VariantKey, VariantWithSources,
};
pub use self::reconcile::{combine_sources, reconcile_variants};
