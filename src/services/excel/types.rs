use calamine::Data;

/// All cells of one worksheet, row-major.
pub type SheetRows = Vec<Vec<Data>>;

/// A workbook held entirely in memory, sheets kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    pub sheets: Vec<(String, SheetRows)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: &str, rows: SheetRows) -> Self {
        self.sheets.push((name.to_string(), rows));
        self
    }
}
