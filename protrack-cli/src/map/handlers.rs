use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use protrack_core::models::{FragmentMapping, Interval};
use protrack_layout::SegmentMapper;

use super::cli::{FROM_SEQUENCE, FROM_STRUCTURE};

fn read_mappings(path: &Path) -> Result<SegmentMapper> {
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    let segments: Vec<FragmentMapping> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid mappings file {}", path.display()))?;
    Ok(SegmentMapper::from_unsorted(segments)?)
}

fn map_range(mapper: &SegmentMapper, start: u32, end: u32, from: &str) -> Vec<Interval> {
    match from {
        FROM_SEQUENCE => mapper.clip_to_sequence(start, end),
        _ => mapper.structure_to_sequence(start, end),
    }
}

pub fn run_map(matches: &ArgMatches) -> Result<()> {
    let mappings = matches
        .get_one::<String>("mappings")
        .expect("A mappings file is required.");
    let start = *matches.get_one::<u32>("start").expect("A start residue is required.");
    let end = *matches.get_one::<u32>("end").expect("An end residue is required.");
    let from = matches
        .get_one::<String>("from")
        .map(String::as_str)
        .unwrap_or(FROM_STRUCTURE);

    let mapper = read_mappings(Path::new(mappings))?;
    let intervals = map_range(&mapper, start, end, from);
    if intervals.is_empty() {
        log::warn!("{}-{} is not covered by any segment", start, end);
    }

    let mut stdout = io::stdout().lock();
    for interval in intervals {
        writeln!(stdout, "{}", interval)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn mapper() -> SegmentMapper {
        read_mappings(Path::new("../tests/data/mappings.json")).unwrap()
    }

    fn render(intervals: Vec<Interval>) -> Vec<String> {
        intervals.iter().map(|i| i.to_string()).collect()
    }

    #[rstest]
    #[case(5, 55, FROM_STRUCTURE, vec!["25-30", "50-60", "120-135"])]
    #[case(11, 14, FROM_STRUCTURE, vec![])]
    #[case(25, 55, FROM_SEQUENCE, vec!["25-30", "50-55"])]
    fn test_map_range(
        mapper: SegmentMapper,
        #[case] start: u32,
        #[case] end: u32,
        #[case] from: &str,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(render(map_range(&mapper, start, end, from)), expected);
    }

    #[rstest]
    fn test_overlapping_mappings_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"structureStart": 1, "structureEnd": 10, "sequenceStart": 1, "sequenceEnd": 10}},
               {{"structureStart": 5, "structureEnd": 20, "sequenceStart": 15, "sequenceEnd": 30}}]"#
        )
        .unwrap();
        assert!(read_mappings(file.path()).is_err());
    }
}
