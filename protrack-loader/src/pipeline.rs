//! Loading and parsing every configured source for one accession.
//!
//! Sources are loaded and parsed concurrently, one scoped thread each, and
//! all of them are joined before anything is returned. A source that fails
//! to load or parse is logged and left out; only fatal parse errors reach
//! the caller.

use std::thread;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;

use protrack_parsers::{
    AntigenParser, Category, FeaturesParser, Parser, ProteomicsParser, StructureParser,
    VariationParser,
};
use protrack_variants::{FilterRegistry, VariantWithSources};

use crate::config::{ProtrackConfig, expand_template};
use crate::errors::{LoaderError, LoaderResult};
use crate::loader::{Loader, SourceLocation, read_local};

pub struct Source {
    pub name: String,
    pub location: SourceLocation,
    parser: Box<dyn Parser>,
}

impl Source {
    pub fn new(
        name: impl Into<String>,
        location: SourceLocation,
        parser: impl Parser + 'static,
    ) -> Self {
        Source {
            name: name.into(),
            location,
            parser: Box::new(parser),
        }
    }

    fn fetch<L: Loader>(&self, loader: &L, accession: &str) -> LoaderResult<Value> {
        match &self.location {
            SourceLocation::Remote(template) => loader.load(&expand_template(template, accession)),
            SourceLocation::Local(path) => read_local(path),
        }
    }

    fn run<L: Loader>(
        &self,
        loader: &L,
        accession: &str,
    ) -> LoaderResult<Option<Vec<Category>>> {
        let started = Instant::now();
        let raw = self.fetch(loader, accession)?;
        let parsed = self.parser.parse(accession, &raw)?;
        log::debug!(
            "{} for {} took {:?} ({} categories)",
            self.name,
            accession,
            started.elapsed(),
            parsed.as_ref().map_or(0, |c| c.len())
        );
        Ok(parsed)
    }
}

/// Everything one render produced.
#[derive(Serialize, Debug, Default)]
pub struct Rendered {
    pub accession: String,
    pub categories: Vec<Category>,
    /// Sources that failed to load or parse.
    pub failed: Vec<String>,
}

pub struct Pipeline<L: Loader> {
    loader: L,
    sources: Vec<Source>,
    filters: FilterRegistry,
}

impl<L: Loader> Pipeline<L> {
    pub fn new(loader: L) -> Self {
        Pipeline {
            loader,
            sources: Vec::new(),
            filters: FilterRegistry::default(),
        }
    }

    ///
    /// Build a pipeline with one source per configured location, in the
    /// order structures, features, proteomics, antigen, variation.
    ///
    /// # Arguments
    /// - config: a validated configuration
    /// - loader: used for every remote source
    /// - custom_variants: caller supplied variants reconciled with the API ones
    pub fn from_config(
        config: &ProtrackConfig,
        loader: L,
        custom_variants: Vec<VariantWithSources>,
    ) -> LoaderResult<Self> {
        config.validate()?;
        let palette = config.track_palette();
        let sources = &config.sources;
        let mut pipeline = Pipeline::new(loader);

        let structures = match (&sources.structures, &sources.structures_inline) {
            (Some(template), _) => Some(SourceLocation::Remote(template.clone())),
            (None, Some(path)) => Some(SourceLocation::Local(path.clone())),
            (None, None) => None,
        };
        if let Some(location) = structures {
            pipeline = pipeline.with_source(Source::new(
                "structures",
                location,
                StructureParser::new(palette),
            ));
        }
        if let Some(template) = &sources.features {
            pipeline = pipeline.with_source(Source::new(
                "features",
                SourceLocation::Remote(template.clone()),
                FeaturesParser::new(),
            ));
        }
        if let Some(template) = &sources.proteomics {
            pipeline = pipeline.with_source(Source::new(
                "proteomics",
                SourceLocation::Remote(template.clone()),
                ProteomicsParser::new(palette),
            ));
        }
        if let Some(template) = &sources.antigen {
            pipeline = pipeline.with_source(Source::new(
                "antigen",
                SourceLocation::Remote(template.clone()),
                AntigenParser::new(palette),
            ));
        }
        if let Some(template) = &sources.variation {
            let parser =
                VariationParser::new(config.variant_style()).with_custom_variants(custom_variants);
            pipeline.filters = parser.filters();
            pipeline = pipeline.with_source(Source::new(
                "variation",
                SourceLocation::Remote(template.clone()),
                parser,
            ));
        }
        Ok(pipeline)
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Variant filters matching the variation source, empty without one.
    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    ///
    /// Load, parse and collect every source for `accession`.
    ///
    /// All sources run to completion before this returns. Failed sources are
    /// listed in [`Rendered::failed`]; a fatal parse error from any source is
    /// returned instead, after the other sources have finished.
    pub fn render(&self, accession: &str) -> LoaderResult<Rendered> {
        log::info!("Rendering {} from {} sources", accession, self.sources.len());

        let outcomes: Vec<LoaderResult<Option<Vec<Category>>>> = thread::scope(|scope| {
            let handles: Vec<_> = self
                .sources
                .iter()
                .map(|source| scope.spawn(move || source.run(&self.loader, accession)))
                .collect();

            handles
                .into_iter()
                .zip(&self.sources)
                .map(|(handle, source)| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(LoaderError::Worker(source.name.clone())))
                })
                .collect()
        });

        let mut rendered = Rendered {
            accession: accession.to_string(),
            ..Default::default()
        };
        let mut fatal = None;

        for (source, outcome) in self.sources.iter().zip(outcomes) {
            match outcome {
                Ok(Some(categories)) => rendered.categories.extend(categories),
                Ok(None) => log::debug!("{} has no data for {}", source.name, accession),
                Err(LoaderError::Parse(e)) if e.is_fatal() => {
                    log::error!("{} failed for {}: {}", source.name, accession, e);
                    if fatal.is_none() {
                        fatal = Some(LoaderError::Parse(e));
                    }
                }
                Err(e) => {
                    log::warn!("Skipping {} for {}: {}", source.name, accession, e);
                    rendered.failed.push(source.name.clone());
                }
            }
        }

        if let Some(e) = fatal {
            return Err(e);
        }
        log::info!(
            "Rendered {} categories for {}, {} sources failed",
            rendered.categories.len(),
            accession,
            rendered.failed.len()
        );
        Ok(rendered)
    }
}
