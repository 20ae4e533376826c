//! Experimental (PDB) and modelled (SMR) structures.
//!
//! Every distinct (structure, chain) pair becomes one [`TrackRow`]. The row
//! holds the chain's observed residues, translated from structure numbering
//! into sequence numbering, and the unobserved residues in between, all
//! packed by the [`FragmentAligner`].

use fxhash::FxHashMap as HashMap;
use serde::Deserialize;
use serde_json::Value;

use protrack_core::Tooltip;
use protrack_core::models::{
    Fragment, FragmentIds, FragmentMapping, Interval, Shape, StructureFormat, StructureInfo,
    StructureProvider, StructureSource, TrackRow,
};
use protrack_layout::{FragmentAligner, SegmentMapper};

use crate::errors::ParseResult;
use crate::models::{Category, Track, TrackData, TrackPalette};
use crate::parser::{Parser, decode};

pub const STRUCTURE_CATEGORY: &str = "STRUCTURE";

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidueRange {
    pub start: u32,
    pub end: u32,
}

fn default_provider() -> StructureProvider {
    StructureProvider::Pdb
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawStructure {
    pub pdb_id: String,
    pub chain_id: String,
    #[serde(default = "default_provider")]
    pub provider: StructureProvider,
    pub tax_id: Option<u32>,
    pub format: Option<StructureFormat>,
    pub url: Option<String>,
    pub data: Option<String>,
    pub method: Option<String>,
    pub resolution: Option<f64>,
    #[serde(default)]
    pub mappings: Vec<FragmentMapping>,
    /// Resolved residues in structure numbering. Absent means every mapped
    /// residue was resolved.
    pub observed: Option<Vec<ResidueRange>>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct StructuresPayload {
    #[serde(default)]
    pub structures: Vec<RawStructure>,
}

///
/// Complement of `observed` within `extent`.
///
/// `observed` must be sorted by start; overlaps are allowed. Spans are the
/// stretch before the first observed interval, the gaps between consecutive
/// ones and the stretch after the last. Without observed intervals the whole
/// extent is returned.
pub fn unobserved_spans(observed: &[Interval], extent: Interval) -> Vec<Interval> {
    let mut spans = Vec::new();
    // first residue not yet accounted for
    let mut cursor = extent.start;

    for interval in observed {
        if cursor > extent.end {
            break;
        }
        if interval.start > cursor {
            spans.push(Interval {
                start: cursor,
                end: (interval.start - 1).min(extent.end),
            });
        }
        cursor = cursor.max(interval.end.saturating_add(1));
    }

    if cursor <= extent.end {
        spans.push(Interval {
            start: cursor,
            end: extent.end,
        });
    }
    spans
}

/// One (structure, chain) pair after deduplication.
struct ChainRecord {
    structure: RawStructure,
    tax_ids: Vec<u32>,
}

fn dedupe(structures: Vec<RawStructure>) -> Vec<ChainRecord> {
    let mut records: Vec<ChainRecord> = Vec::new();
    let mut seen: HashMap<(String, String), usize> = HashMap::default();

    for structure in structures {
        let key = (structure.pdb_id.to_ascii_lowercase(), structure.chain_id.clone());
        match seen.get(&key) {
            Some(&idx) => {
                let record = &mut records[idx];
                if let Some(tax_id) = structure.tax_id {
                    if !record.tax_ids.contains(&tax_id) {
                        record.tax_ids.push(tax_id);
                    }
                }
            }
            None => {
                seen.insert(key, records.len());
                let tax_ids = structure.tax_id.into_iter().collect();
                records.push(ChainRecord { structure, tax_ids });
            }
        }
    }
    records
}

#[derive(Debug, Clone, Default)]
pub struct StructureParser {
    palette: TrackPalette,
}

impl StructureParser {
    pub fn new(palette: TrackPalette) -> Self {
        StructureParser { palette }
    }

    fn tooltip(
        &self,
        info: &StructureInfo,
        raw: &RawStructure,
        interval: Interval,
        observed: bool,
    ) -> String {
        let provider = match info.provider {
            StructureProvider::Pdb => "PDB",
            StructureProvider::Smr => "SWISS-MODEL",
        };
        Tooltip::new(format!("{} chain {}", info.pdb_id.to_uppercase(), info.chain_id))
            .row("Source", provider)
            .optional_row("Method", raw.method.clone())
            .optional_row("Resolution", raw.resolution.map(|r| format!("{:.2} Å", r)))
            .row("Residues", interval.to_string())
            .row("Status", if observed { "Observed" } else { "Unobserved" })
            .render()
    }

    fn chain_row(
        &self,
        record: ChainRecord,
        ids: &mut FragmentIds,
    ) -> ParseResult<Option<TrackRow>> {
        let ChainRecord { structure, tax_ids } = record;

        let source = StructureSource::from_parts(
            &structure.pdb_id,
            structure.url.clone(),
            structure.data.clone(),
        )?;

        let mapper = match SegmentMapper::from_unsorted(structure.mappings.clone()) {
            Ok(mapper) => mapper,
            Err(e) => {
                log::warn!(
                    "Skipping chain {} of {}: {}",
                    structure.chain_id,
                    structure.pdb_id,
                    e
                );
                return Ok(None);
            }
        };

        let info = StructureInfo {
            pdb_id: structure.pdb_id.clone(),
            chain_id: structure.chain_id.clone(),
            provider: structure.provider,
            mappings: mapper.segments().to_vec(),
            format: structure.format.unwrap_or(StructureFormat::Mmcif),
            source,
            tax_ids,
        };

        let observed_ranges: Vec<ResidueRange> = match &structure.observed {
            Some(ranges) => ranges.clone(),
            None => mapper
                .segments()
                .iter()
                .map(|m| ResidueRange {
                    start: m.structure_start,
                    end: m.structure_end,
                })
                .collect(),
        };

        let mut observed: Vec<Interval> = observed_ranges
            .iter()
            .flat_map(|r| mapper.structure_to_sequence(r.start, r.end))
            .collect();
        observed.sort();

        let unobserved: Vec<Interval> = unobserved_spans(&observed, mapper.sequence_extent())
            .into_iter()
            .flat_map(|span| mapper.clip_to_sequence(span.start, span.end))
            .collect();

        let mut aligner = FragmentAligner::new();
        for interval in observed {
            aligner.add_fragment(
                Fragment::new(ids.next_id(), interval, self.palette.observed)
                    .with_shape(Shape::Rectangle)
                    .with_tooltip(self.tooltip(&info, &structure, interval, true))
                    .with_structure_info(info.clone()),
            );
        }
        for interval in unobserved {
            aligner.add_fragment(
                Fragment::new(ids.next_id(), interval, self.palette.unobserved)
                    .with_shape(Shape::Line)
                    .with_tooltip(self.tooltip(&info, &structure, interval, false))
                    .with_structure_info(info.clone()),
            );
        }

        let mut row = TrackRow::new(
            format!("{} {}", info.pdb_id.to_uppercase(), info.chain_id),
            aligner.align_fragments(),
        );
        row.structure_info = Some(info);
        Ok(Some(row))
    }
}

impl Parser for StructureParser {
    fn name(&self) -> &'static str {
        "structures"
    }

    fn parse(&self, id: &str, raw: &Value) -> ParseResult<Option<Vec<Category>>> {
        let Some(payload) = decode::<StructuresPayload>(self.name(), id, raw)? else {
            return Ok(None);
        };

        let mut ids = FragmentIds::new();
        let mut rows = Vec::new();
        for record in dedupe(payload.structures) {
            if let Some(row) = self.chain_row(record, &mut ids)? {
                rows.push(row);
            }
        }

        log::debug!("{} structure chains for {}", rows.len(), id);
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(vec![Category::new(
            STRUCTURE_CATEGORY,
            "Structures",
            vec![Track::new("Structures", TrackData::Rows(rows))],
        )]))
    }
}
