use std::path::{Path, PathBuf};

use polars::prelude::{DataType, Series};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::RankingError;
use crate::services::excel::render_table;
use crate::services::ranking::RankingTable;

pub const RANK_FIELD: &str = "Rank";

/// One player in the JSON export: `Rank` first, then every table column in
/// order with numbers as fixed two-decimal strings.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRecord {
    pub rank: u32,
    pub fields: Vec<(String, String)>,
}

impl Serialize for RankingRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(RANK_FIELD, &self.rank)?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

fn format_cell(series: &Series, row: usize) -> Result<String, RankingError> {
    let value = match series.dtype() {
        DataType::Float64 => format!("{:.2}", series.f64()?.get(row).unwrap_or(0.0)),
        DataType::String => series.str()?.get(row).unwrap_or_default().to_string(),
        _ => series.get(row)?.to_string(),
    };
    Ok(value)
}

pub fn ranking_records(table: &RankingTable) -> Result<Vec<RankingRecord>, RankingError> {
    let columns = table.frame().get_columns();
    table
        .ranks()
        .enumerate()
        .map(|(row, rank)| -> Result<RankingRecord, RankingError> {
            let fields = columns
                .iter()
                .map(|series| -> Result<(String, String), RankingError> {
                    Ok((series.name().to_string(), format_cell(series, row)?))
                })
                .collect::<Result<Vec<_>, RankingError>>()?;
            Ok(RankingRecord { rank, fields })
        })
        .collect()
}

/// Pretty JSON with four-space indentation. Non-ASCII text is written as is.
pub fn render_json(table: &RankingTable) -> Result<Vec<u8>, RankingError> {
    let records = ranking_records(table)?;
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    Ok(buffer)
}

#[derive(Debug, Clone, PartialEq)]
pub struct WrittenOutputs {
    pub table_path: PathBuf,
    pub json_path: PathBuf,
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), RankingError> {
    std::fs::write(path, contents).map_err(|e| RankingError::Export {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Renders both artifacts in memory, then writes them. If the JSON file
/// cannot be written the spreadsheet is removed again.
pub fn write_outputs(
    table: &RankingTable,
    table_path: &Path,
    json_path: &Path,
) -> Result<WrittenOutputs, RankingError> {
    let spreadsheet = render_table(table)?;
    let json = render_json(table)?;

    for path in [table_path, json_path] {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| RankingError::Export {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
    }

    write_file(table_path, &spreadsheet)?;
    if let Err(err) = write_file(json_path, &json) {
        // both artifacts or neither
        if let Err(e) = std::fs::remove_file(table_path) {
            tracing::warn!("Could not remove {}: {}", table_path.display(), e);
        }
        return Err(err);
    }
    tracing::info!("Rankings saved to {}", table_path.display());
    tracing::info!("Rankings saved to {}", json_path.display());

    Ok(WrittenOutputs {
        table_path: table_path.to_path_buf(),
        json_path: json_path.to_path_buf(),
    })
}
