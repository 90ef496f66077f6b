pub mod processor;
pub mod types;
pub mod utils;
pub mod writer;

pub use processor::{ingest_workbook, open_workbook_file, parse_sheet, SheetSource};
pub use types::{MemoryWorkbook, SheetRows};
pub use writer::render_table;
