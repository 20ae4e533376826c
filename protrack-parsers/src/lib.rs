//! Parsers for protein annotation sources.
//!
//! Every source (structures, features, proteomics, antigen, variation) has a
//! [`Parser`] turning its raw JSON payload into [`Category`]s ready for a
//! [`RenderSink`]. Parsers never pack rows or translate coordinates
//! themselves; they go through `protrack-layout` for both.
//!
//! ## Quick Start
//!
//! ```rust
//! use protrack_parsers::{FeaturesParser, Parser};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "sequence": "MKTAYIAKQR",
//!     "features": [
//!         {"type": "DOMAIN", "category": "DOMAINS_AND_SITES", "begin": "1", "end": "6"},
//!         {"type": "BINDING", "category": "DOMAINS_AND_SITES", "begin": "4", "end": "4"}
//!     ]
//! });
//!
//! let categories = FeaturesParser::new().parse("P12345", &raw).unwrap().unwrap();
//! assert_eq!(categories[0].label, "Domains & sites");
//! assert_eq!(categories[0].subtracks().len(), 2);
//! ```

pub mod errors;
pub mod features;
pub mod models;
pub mod parser;
pub mod proteomics;

/// Renderer capability and highlight channel.
pub mod render;

/// PDB and SMR structure parsing.
pub mod structures;

pub mod variation;

// re-exports
pub use self::errors::{ParseError, ParseResult};
pub use self::features::FeaturesParser;
pub use self::models::{Category, Track, TrackData, TrackPalette};
pub use self::parser::{Parser, is_error_payload};
pub use self::proteomics::{AntigenParser, ProteomicsParser};
pub use self::render::{Channel, Highlight, RenderSink};
pub use self::structures::StructureParser;
pub use self::variation::VariationParser;
