use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use protrack_loader::{HttpLoader, Loader, Pipeline, ProtrackConfig, Rendered};
use protrack_variants::{FilterEngine, VariantWithSources};

fn load_config(path: Option<&String>) -> Result<ProtrackConfig> {
    match path {
        Some(path) => ProtrackConfig::try_from(Path::new(path))
            .with_context(|| format!("Could not load config {}", path)),
        None => Ok(ProtrackConfig::default()),
    }
}

fn read_custom_variants(path: Option<&String>) -> Result<Vec<VariantWithSources>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let file = File::open(path).with_context(|| format!("Could not open {}", path))?;
    let variants: Vec<VariantWithSources> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid custom variants file {}", path))?;
    log::info!("Loaded {} custom variants from {}", variants.len(), path);
    Ok(variants)
}

///
/// Render one accession and narrow its variation tracks to the selected
/// filters. An unknown filter name fails before anything is loaded.
fn render_accession<L: Loader>(
    pipeline: &Pipeline<L>,
    accession: &str,
    filters: &[String],
) -> Result<Rendered> {
    let engine = FilterEngine::new(pipeline.filters().clone());
    let active = engine.activate(filters)?;

    let mut rendered = pipeline.render(accession)?;
    if !active.is_empty() {
        for category in rendered.categories.iter_mut() {
            category.apply_filters(&active);
        }
    }
    Ok(rendered)
}

pub fn run_render(matches: &ArgMatches) -> Result<()> {
    let accession = matches
        .get_one::<String>("accession")
        .expect("An accession is required.");
    let config = load_config(matches.get_one::<String>("config"))?;
    let custom_variants = read_custom_variants(matches.get_one::<String>("custom-variants"))?;
    let filters: Vec<String> = matches
        .get_many::<String>("filter")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let loader = HttpLoader::new(config.timeout());
    let pipeline = Pipeline::from_config(&config, loader, custom_variants)?;
    let rendered = render_accession(&pipeline, accession, &filters)?;

    let writer: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Could not create {}", path))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, &rendered)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
