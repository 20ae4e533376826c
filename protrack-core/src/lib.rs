//! Core models for protrack.
//!
//! Every other protrack crate speaks in the types defined here: residue
//! [`Interval`](models::Interval)s, structure to sequence
//! [`FragmentMapping`](models::FragmentMapping)s, and the
//! [`Fragment`](models::Fragment) / [`Location`](models::Location) /
//! [`Accession`](models::Accession) / [`TrackRow`](models::TrackRow)
//! hierarchy that the rendering layer consumes.
//!
//! Serialization of all models is available behind the `serde` feature.

pub mod color;
pub mod errors;
pub mod models;
pub mod tooltip;
pub mod utils;

pub use color::Rgb;
pub use errors::{CoreError, CoreResult};
pub use tooltip::Tooltip;
