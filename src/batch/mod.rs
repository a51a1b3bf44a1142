// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Spreadsheet batch generation
//
// Reads one post request per sheet row, generates each post in turn with a
// JSON-shaped instruction, and exports the results as a printable report.

mod brief;
mod reply;
mod report;
mod runner;
mod sheet;

use std::path::PathBuf;

pub use brief::{font_characteristics, image_style, PostBrief};
pub use reply::{ReplyFields, ReplyParser};
pub use report::{render_report, report_file_name, write_report};
pub use runner::{BatchRunner, Progress, RowError, RowReport};
pub use sheet::{read_csv, read_rows, SheetRow};

/// Errors that stop a batch before or while reading its input.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported sheet format: {0} (expected .csv, .xlsx, .xlsm, .xlsb, .xls or .ods)")]
    UnsupportedFormat(String),

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook has no sheets: {0}")]
    EmptyWorkbook(String),

    #[error("sheet has no rows")]
    NoRows,

    #[error("invalid reply pattern: {0}")]
    Pattern(#[from] regex::Error),
}
