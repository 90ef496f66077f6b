use polars::prelude::DataType;
use rust_xlsxwriter::{Format, Workbook};

use crate::error::RankingError;
use crate::services::ranking::RankingTable;

pub const RANKING_SHEET_NAME: &str = "Sheet1";

/// Renders the ranking table as an xlsx document: a bold header row with the
/// column names, one row per player, no index column.
pub fn render_table(table: &RankingTable) -> Result<Vec<u8>, RankingError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(RANKING_SHEET_NAME)?;

    for (col_idx, series) in table.frame().get_columns().iter().enumerate() {
        let col = col_idx as u16;
        worksheet.write_string_with_format(0, col, series.name(), &header_format)?;

        match series.dtype() {
            DataType::Float64 => {
                for (row_idx, value) in series.f64()?.into_iter().enumerate() {
                    if let Some(value) = value {
                        worksheet.write_number(row_idx as u32 + 1, col, value)?;
                    }
                }
            }
            _ => {
                let text = series.cast(&DataType::String)?;
                for (row_idx, value) in text.str()?.into_iter().enumerate() {
                    if let Some(value) = value {
                        worksheet.write_string(row_idx as u32 + 1, col, value)?;
                    }
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
