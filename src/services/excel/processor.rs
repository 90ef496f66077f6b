use std::io::{Cursor, ErrorKind, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx, XlsxError};

use super::types::{MemoryWorkbook, SheetRows};
use super::utils::{cell_number, cell_text, is_blank};
use crate::error::RankingError;
use crate::models::{QuizRecord, QuizSheet, RankingContext, RawScore};

/// A workbook-like container of named sheets.
pub trait SheetSource {
    fn sheet_names(&self) -> Vec<String>;

    fn sheet_rows(&mut self, sheet_name: &str) -> Result<SheetRows, RankingError>;
}

impl<RS: Read + Seek> SheetSource for Xlsx<RS> {
    fn sheet_names(&self) -> Vec<String> {
        Reader::sheet_names(self).to_vec()
    }

    fn sheet_rows(&mut self, sheet_name: &str) -> Result<SheetRows, RankingError> {
        let range = self.worksheet_range(sheet_name).map_err(|e| {
            tracing::error!("Failed to read worksheet {}: {}", sheet_name, e);
            RankingError::input_format(sheet_name, format!("unreadable worksheet: {}", e))
        })?;
        Ok(range.rows().map(|row| row.to_vec()).collect())
    }
}

impl SheetSource for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn sheet_rows(&mut self, sheet_name: &str) -> Result<SheetRows, RankingError> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet_name)
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| RankingError::input_format(sheet_name, "sheet not present in workbook"))
    }
}

/// Reads the whole file up front and opens it as an xlsx workbook.
pub fn open_workbook_file(path: &Path) -> Result<Xlsx<Cursor<Vec<u8>>>, RankingError> {
    tracing::info!("Opening workbook {}", path.display());
    let data = std::fs::read(path).map_err(|e| {
        if e.kind() != ErrorKind::NotFound {
            tracing::error!("Failed to read {}: {}", path.display(), e);
        }
        RankingError::InputNotFound {
            path: path.to_path_buf(),
        }
    })?;

    let workbook: Xlsx<Cursor<Vec<u8>>> =
        open_workbook_from_rs(Cursor::new(data)).map_err(|e: XlsxError| {
            tracing::error!("Failed to open Excel file: {}", e);
            RankingError::Workbook(e.to_string())
        })?;
    Ok(workbook)
}

/// Parses one quiz sheet: header row `[quiz name, max points]`, then
/// `[player, score]` rows.
pub fn parse_sheet(sheet_name: &str, rows: &[Vec<Data>]) -> Result<QuizSheet, RankingError> {
    let header = rows
        .first()
        .ok_or_else(|| RankingError::input_format(sheet_name, "missing header row"))?;
    check_width(sheet_name, 1, header)?;

    let quiz_name = header
        .first()
        .and_then(cell_text)
        .ok_or_else(|| RankingError::input_format(sheet_name, "header row has no quiz name"))?;
    let max_points = header.get(1).and_then(cell_number).ok_or_else(|| {
        RankingError::input_format(sheet_name, "max points in header row must be numeric")
    })?;

    let mut scores = Vec::with_capacity(rows.len().saturating_sub(1));
    for (idx, row) in rows.iter().enumerate().skip(1) {
        let line = idx + 1;
        if row.iter().all(is_blank) {
            tracing::debug!("Skipping empty row {} in sheet {}", line, sheet_name);
            continue;
        }
        check_width(sheet_name, line, row)?;

        let player = row.first().and_then(cell_text).ok_or_else(|| {
            RankingError::input_format(sheet_name, format!("row {} has no player name", line))
        })?;
        let score = row.get(1).and_then(cell_number).ok_or_else(|| {
            RankingError::input_format(sheet_name, format!("row {} has a non-numeric score", line))
        })?;
        scores.push(RawScore { player, score });
    }

    Ok(QuizSheet {
        sheet_name: sheet_name.to_string(),
        record: QuizRecord {
            quiz_name,
            max_points,
        },
        scores,
    })
}

fn check_width(sheet_name: &str, line: usize, row: &[Data]) -> Result<(), RankingError> {
    if row.iter().skip(2).any(|cell| !is_blank(cell)) {
        return Err(RankingError::input_format(
            sheet_name,
            format!("row {} has more than two columns", line),
        ));
    }
    Ok(())
}

/// Reads every sheet in workbook order into the context and records quiz
/// names in first-seen order.
pub fn ingest_workbook<S: SheetSource>(
    source: &mut S,
    mut ctx: RankingContext,
) -> Result<RankingContext, RankingError> {
    let sheet_names = source.sheet_names();
    tracing::info!("Processing {} sheets", sheet_names.len());

    for sheet_name in &sheet_names {
        let rows = source.sheet_rows(sheet_name)?;
        let sheet = parse_sheet(sheet_name, &rows)?;
        tracing::debug!(
            "Sheet {}: quiz '{}' (max {}) with {} players",
            sheet_name,
            sheet.record.quiz_name,
            sheet.record.max_points,
            sheet.scores.len()
        );

        if !ctx.quiz_order.push_if_absent(&sheet.record.quiz_name) {
            tracing::warn!(
                "Quiz '{}' in sheet {} was already seen, merging its scores",
                sheet.record.quiz_name,
                sheet_name
            );
        }
        ctx.sheets.push(sheet);
    }

    Ok(ctx)
}
