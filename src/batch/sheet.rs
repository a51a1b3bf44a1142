// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Spreadsheet input
//
// The first row is the header. Header names are matched case-insensitively
// after trimming; unknown columns are ignored and empty cells read as absent.
// CSV goes through `csv`, workbooks (xlsx, xlsm, xlsb, xls, ods) through
// `calamine`, which only reads the first sheet.

use std::io;
use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use serde::Serialize;

use super::BatchError;

/// One post request as read from the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SheetRow {
    pub brand_name: Option<String>,
    pub prompt: Option<String>,
    pub content: Option<String>,
    pub platform_type: Option<String>,
    pub type_of_post: Option<String>,
    pub font_style: Option<String>,
    pub phone_number: Option<String>,
    pub email_id: Option<String>,
}

impl SheetRow {
    /// Build a row from header names and the matching cells.
    ///
    /// Returns `None` when every cell is blank.
    pub fn from_cells<I, S>(headers: &[String], cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut row = SheetRow::default();
        let mut blank = true;

        for (header, cell) in headers.iter().zip(cells) {
            let value = cell.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            blank = false;

            let slot = match header.trim().to_ascii_lowercase().as_str() {
                "brand_name" => &mut row.brand_name,
                "prompt" => &mut row.prompt,
                "content" => &mut row.content,
                "platform_type" => &mut row.platform_type,
                "type_of_post" => &mut row.type_of_post,
                "font_style" => &mut row.font_style,
                "phone_number" => &mut row.phone_number,
                "email_id" => &mut row.email_id,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }

        (!blank).then_some(row)
    }
}

/// Read every non-blank row from a spreadsheet file, picking the reader by
/// extension.
pub fn read_rows(path: &Path) -> Result<Vec<SheetRow>, BatchError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).map_err(|source| BatchError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            read_csv(file)
        }
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path),
        _ => Err(BatchError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Read rows from CSV text with a header line.
pub fn read_csv<R: io::Read>(input: R) -> Result<Vec<SheetRow>, BatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(row) = SheetRow::from_cells(&headers, record.iter()) {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn read_workbook(path: &Path) -> Result<Vec<SheetRow>, BatchError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| BatchError::EmptyWorkbook(path.display().to_string()))??;

    let mut grid = range.rows();
    let Some(header_cells) = grid.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_cells.iter().map(|c| c.to_string()).collect();

    Ok(grid
        .filter_map(|cells| SheetRow::from_cells(&headers, cells.iter().map(|c| c.to_string())))
        .collect())
}
