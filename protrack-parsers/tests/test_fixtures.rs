use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::Value;

use protrack_core::models::TrackRow;
use protrack_parsers::{
    AntigenParser, Category, FeaturesParser, Parser, ProteomicsParser, StructureParser,
    TrackData, TrackPalette, VariationParser,
};
use protrack_variants::{FilterEngine, VariantStyle, VariantWithSources};

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../tests/data")
        .join(name)
}

fn load(name: &str) -> Value {
    let file = File::open(data_path(name)).unwrap();
    serde_json::from_reader(BufReader::new(file)).unwrap()
}

fn rows(track_data: &TrackData) -> &[TrackRow] {
    match track_data {
        TrackData::Rows(rows) => rows.as_slice(),
        other => panic!("expected rows, got {:?}", other),
    }
}

fn row_ids(row: &TrackRow) -> Vec<Vec<u32>> {
    row.row_data
        .iter()
        .map(|accession| accession.fragments().map(|f| f.id).collect())
        .collect()
}

fn graph(category: &Category) -> &[VariantWithSources] {
    match &category.tracks[1].data {
        TrackData::VariationGraph { variants, .. } => variants.as_slice(),
        other => panic!("expected variant graph, got {:?}", other),
    }
}

#[fixture]
fn style() -> VariantStyle {
    VariantStyle::default()
}

#[rstest]
fn test_features_fixture() {
    let categories = FeaturesParser::new()
        .parse("P05067", &load("P05067/features.json"))
        .unwrap()
        .unwrap();

    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["MOLECULE_PROCESSING", "DOMAINS_AND_SITES", "STRUCTURAL"]
    );

    let domains = &categories[1];
    let main = &rows(&domains.main_track().unwrap().data)[0];
    // [20-35], [22-30] and [28-28] all overlap
    assert_eq!(row_ids(main), vec![vec![3], vec![5], vec![4]]);

    let structural = &categories[2];
    let labels: Vec<&str> = structural.subtracks().iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["Helix", "Strand"]);
}

#[rstest]
fn test_proteomics_fixture() {
    let categories = ProteomicsParser::default()
        .parse("P05067", &load("P05067/proteomics.json"))
        .unwrap()
        .unwrap();
    let category = &categories[0];

    let main = &rows(&category.tracks[0].data)[0];
    assert_eq!(row_ids(main), vec![vec![1, 3], vec![2]]);
    let unique = &rows(&category.tracks[1].data)[0];
    assert_eq!(row_ids(unique), vec![vec![1, 3]]);
}

#[rstest]
fn test_antigen_error_payload_is_no_data() {
    let parsed = AntigenParser::default()
        .parse("P05067", &load("P05067/antigen.json"))
        .unwrap();
    assert!(parsed.is_none());
}

#[rstest]
fn test_structures_fixture() {
    let palette = TrackPalette::default();
    let categories = StructureParser::new(palette)
        .parse("P05067", &load("P05067/structures.json"))
        .unwrap()
        .unwrap();
    let chains = rows(&categories[0].tracks[0].data);

    let labels: Vec<&str> = chains.iter().map(|r| r.label.as_str()).collect();
    // chain B has no mapping and is skipped
    assert_eq!(labels, vec!["1AAP A", "P05067_1 A"]);

    let pdb = &chains[0];
    assert_eq!(pdb.structure_info.as_ref().unwrap().tax_ids, vec![9606, 10090]);
    let mut observed: Vec<(u32, u32)> = pdb
        .fragments()
        .filter(|f| f.fill_color == palette.observed)
        .map(|f| (f.start, f.end))
        .collect();
    observed.sort();
    assert_eq!(observed, vec![(18, 23), (31, 40)]);
    let unobserved: Vec<(u32, u32)> = pdb
        .fragments()
        .filter(|f| f.fill_color == palette.unobserved)
        .map(|f| (f.start, f.end))
        .collect();
    assert_eq!(unobserved, vec![(24, 27)]);

    let smr = &chains[1];
    assert_eq!(smr.fragment_count(), 1);
    assert!(smr.fragments().all(|f| (f.start, f.end) == (18, 40)));
}

#[rstest]
fn test_variation_fixture(style: VariantStyle) {
    let categories = VariationParser::new(style)
        .parse("P05067", &load("P05067/variation.json"))
        .unwrap()
        .unwrap();
    let variants = graph(&categories[0]);

    let colors: Vec<_> = variants.iter().map(|v| v.color.unwrap()).collect();
    assert_eq!(colors[0], style.palette.disease);
    assert_eq!(colors[2], style.palette.uncertain);
    assert_eq!(colors[3], style.palette.non_disease);
    assert_ne!(colors[1], style.palette.unknown);
}

#[rstest]
fn test_variation_with_custom_source(style: VariantStyle) {
    let custom: Vec<VariantWithSources> = serde_json::from_value(load("custom_variants.json")).unwrap();
    let parser = VariationParser::new(style).with_custom_variants(custom);
    let mut categories = parser
        .parse("P05067", &load("P05067/variation.json"))
        .unwrap()
        .unwrap();

    let variants = graph(&categories[0]);
    assert_eq!(variants.len(), 5);
    assert!(variants[1].other_sources.contains_key("ClinicalLab"));
    assert_eq!(variants[4].color, Some(style.palette.unknown));

    let engine = FilterEngine::new(parser.filters());
    let active = engine.activate(&["ClinicalLab"]).unwrap();
    categories[0].apply_filters(&active);

    let kept: Vec<u32> = graph(&categories[0]).iter().map(|v| v.begin).collect();
    assert_eq!(kept, vec![10, 35]);
    let TrackData::Variation { buckets, .. } = &categories[0].tracks[0].data else {
        panic!("expected variation track");
    };
    assert_eq!(buckets.len(), 40);
    let bucketed: Vec<u32> = buckets
        .iter()
        .flat_map(|b| b.variants.iter().map(|v| v.begin))
        .collect();
    assert_eq!(bucketed, kept);
}
