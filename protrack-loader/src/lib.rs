//! Loading protrack sources.
//!
//! This crate wires the parsers to the outside world:
//!
//! - [`ProtrackConfig`] reads source URLs, timeout and colors from TOML.
//! - [`HttpLoader`] fetches JSON payloads with a per-request timeout.
//! - [`Pipeline`] loads and parses all sources of an accession concurrently
//!   and collects whatever succeeded.
//!
//! ## Quick Start
//!
//! ```no_run
//! use protrack_loader::{HttpLoader, Pipeline, ProtrackConfig};
//!
//! let config = ProtrackConfig::default();
//! let loader = HttpLoader::new(config.timeout());
//! let pipeline = Pipeline::from_config(&config, loader, vec![]).unwrap();
//!
//! let rendered = pipeline.render("P05067").unwrap();
//! for category in &rendered.categories {
//!     println!("{}: {} tracks", category.label, category.tracks.len());
//! }
//! ```

pub mod config;
pub mod errors;
pub mod loader;
pub mod pipeline;

// re-exports
pub use self::config::{ColorConfig, ProtrackConfig, SourcesConfig, expand_template};
pub use self::errors::{ConfigError, ConfigResult, LoaderError, LoaderResult};
pub use self::loader::{HttpLoader, Loader, SourceLocation};
pub use self::pipeline::{Pipeline, Rendered, Source};
