pub mod fragment;
pub mod interval;
pub mod mapping;
pub mod structure;
pub mod track;

// re-export for cleaner imports
pub use self::fragment::{Fragment, FragmentIds, Shape};
pub use self::interval::Interval;
pub use self::mapping::{FragmentMapping, validate_mappings};
pub use self::structure::{StructureFormat, StructureInfo, StructureProvider, StructureSource};
pub use self::track::{Accession, Location, TrackRow};
