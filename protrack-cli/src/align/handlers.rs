use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::Deserialize;

use protrack_core::Rgb;
use protrack_core::models::{Accession, Fragment, FragmentIds, Interval};
use protrack_layout::FragmentAligner;

#[derive(Deserialize, Debug)]
struct RawFragment {
    id: Option<u32>,
    start: u32,
    end: u32,
}

fn align(raw: Vec<RawFragment>) -> Result<Vec<Accession>> {
    let mut ids = FragmentIds::new();
    let mut aligner = FragmentAligner::new();
    for fragment in raw {
        let interval = Interval::new(fragment.start, fragment.end)?;
        let id = fragment.id.unwrap_or_else(|| ids.next_id());
        aligner.add_fragment(Fragment::new(id, interval, Rgb::BLACK));
    }
    Ok(aligner.align_fragments())
}

/// One line per row: the row number, then `id:start-end` per fragment.
fn format_rows(rows: &[Accession]) -> String {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let fragments: Vec<String> = row
                .fragments()
                .map(|f| format!("{}:{}-{}", f.id, f.start, f.end))
                .collect();
            format!("{}\t{}\n", i + 1, fragments.join("\t"))
        })
        .collect()
}

pub fn run_align(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("A path to a fragments file is required.");

    let file = File::open(Path::new(input)).with_context(|| format!("Could not open {}", input))?;
    let raw: Vec<RawFragment> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid fragments file {}", input))?;

    let rows = align(raw)?;
    log::debug!("Packed fragments into {} rows", rows.len());

    let mut stdout = io::stdout().lock();
    stdout.write_all(format_rows(&rows).as_bytes())?;
    Ok(())
}
