#[cfg(feature = "core")]
#[doc(inline)]
pub use protrack_core as core;

#[cfg(feature = "layout")]
#[doc(inline)]
pub use protrack_layout as layout;

#[cfg(feature = "variants")]
#[doc(inline)]
pub use protrack_variants as variants;

#[cfg(feature = "parsers")]
#[doc(inline)]
pub use protrack_parsers as parsers;

#[cfg(feature = "loader")]
#[doc(inline)]
pub use protrack_loader as loader;
