use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

// Process exit codes, one per failure kind
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INPUT_NOT_FOUND: i32 = 2;
pub const EXIT_INPUT_FORMAT: i32 = 3;
pub const EXIT_DEGENERATE_QUIZ: i32 = 4;
pub const EXIT_EXPORT: i32 = 5;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Invalid sheet '{sheet}': {reason}")]
    InputFormat { sheet: String, reason: String },

    #[error("Quiz '{quiz}' has a top score of zero, scores cannot be scaled")]
    DegenerateQuiz { quiz: String },

    #[error("Failed to open workbook: {0}")]
    Workbook(String),

    #[error("Failed to build ranking table: {0}")]
    Table(#[from] PolarsError),

    #[error("Failed to render spreadsheet: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to render JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write {}: {reason}", path.display())]
    Export { path: PathBuf, reason: String },
}

impl RankingError {
    pub fn input_format(sheet: &str, reason: impl Into<String>) -> Self {
        RankingError::InputFormat {
            sheet: sheet.to_string(),
            reason: reason.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            RankingError::InputNotFound { .. } => EXIT_INPUT_NOT_FOUND,
            RankingError::InputFormat { .. } | RankingError::Workbook(_) => EXIT_INPUT_FORMAT,
            RankingError::DegenerateQuiz { .. } => EXIT_DEGENERATE_QUIZ,
            RankingError::Table(_)
            | RankingError::Spreadsheet(_)
            | RankingError::Serialization(_)
            | RankingError::Export { .. } => EXIT_EXPORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_format_names_sheet() {
        let err = RankingError::input_format("Kviz 3", "max points must be numeric");
        assert_eq!(
            err.to_string(),
            "Invalid sheet 'Kviz 3': max points must be numeric"
        );
        assert_eq!(err.exit_code(), EXIT_INPUT_FORMAT);
    }

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        let not_found = RankingError::InputNotFound {
            path: PathBuf::from("missing.xlsx"),
        };
        let degenerate = RankingError::DegenerateQuiz {
            quiz: "12x7 #1".to_string(),
        };
        let export = RankingError::Export {
            path: PathBuf::from("out.json"),
            reason: "read-only".to_string(),
        };

        assert_eq!(not_found.exit_code(), EXIT_INPUT_NOT_FOUND);
        assert_eq!(degenerate.exit_code(), EXIT_DEGENERATE_QUIZ);
        assert_eq!(export.exit_code(), EXIT_EXPORT);
        assert_eq!(not_found.to_string(), "Input file not found: missing.xlsx");
        assert_ne!(EXIT_SUCCESS, EXIT_FAILURE);
    }
}
