// Workbook codec (xlsx, xls, xlsb, ods in; xlsx out)
//
// Import is a one-way conversion into the engine's values-only model.
// Export always re-encodes as xlsx, whatever container the decoder
// accepted.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use rust_xlsxwriter::Workbook as XlsxWorkbook;

use cellswap_engine::{CellValue, Sheet, Workbook};

/// Decode a workbook payload into the in-memory model.
pub fn import(bytes: &[u8]) -> Result<Workbook, String> {
    let mut source: Sheets<_> = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| format!("Failed to open workbook: {}", e))?;

    let sheet_names: Vec<String> = source.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err("Workbook contains no sheets".to_string());
    }

    let mut workbook = Workbook::new();
    for sheet_name in &sheet_names {
        let range = source
            .worksheet_range(sheet_name)
            .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

        let mut sheet = Sheet::new(sheet_name);

        let (height, width) = range.get_size();
        if height == 0 || width == 0 {
            // No used range: the sheet exists but is skipped by the walker.
            workbook.add_sheet(sheet);
            continue;
        }
        sheet.has_range = true;

        // Range start offset (data may not begin at A1)
        let (start_row, start_col) = range.start().unwrap_or((0, 0));

        for (row_idx, row) in range.rows().enumerate() {
            let target_row = start_row as usize + row_idx;
            for (col_idx, cell) in row.iter().enumerate() {
                let target_col = start_col as usize + col_idx;
                match cell {
                    Data::Empty => {}
                    Data::String(s) => {
                        // Explicit empty strings are kept: in a replacement
                        // map an empty value column is a deletion rule.
                        sheet.set(target_row, target_col, CellValue::Text(s.clone()));
                    }
                    Data::Float(n) => {
                        sheet.set(target_row, target_col, CellValue::Number(*n));
                    }
                    Data::Int(n) => {
                        sheet.set(target_row, target_col, CellValue::Number(*n as f64));
                    }
                    Data::Bool(b) => {
                        sheet.set(target_row, target_col, CellValue::Bool(*b));
                    }
                    Data::Error(e) => {
                        // Store the error as its display text ("#DIV/0!" etc.)
                        sheet.set(target_row, target_col, CellValue::Text(e.to_string()));
                    }
                    Data::DateTime(dt) => {
                        // Carry the raw serial; date formatting is out of scope.
                        sheet.set(target_row, target_col, CellValue::Number(dt.as_f64()));
                    }
                    Data::DateTimeIso(s) | Data::DurationIso(s) => {
                        sheet.set(target_row, target_col, CellValue::Text(s.clone()));
                    }
                }
            }
        }

        workbook.add_sheet(sheet);
    }

    Ok(workbook)
}

/// Encode the in-memory model back to xlsx bytes.
pub fn export(workbook: &Workbook) -> Result<Vec<u8>, String> {
    let mut xlsx = XlsxWorkbook::new();

    for sheet in workbook.sheets() {
        let worksheet = xlsx
            .add_worksheet()
            .set_name(&sheet.name)
            .map_err(|e| format!("Failed to create sheet '{}': {}", sheet.name, e))?;

        for (&(row, col), value) in sheet.cells() {
            let (row, col) = (row as u32, col as u16);
            match value {
                CellValue::Text(s) => worksheet.write_string(row, col, s),
                CellValue::Number(n) => worksheet.write_number(row, col, *n),
                CellValue::Bool(b) => worksheet.write_boolean(row, col, *b),
            }
            .map_err(|e| {
                format!(
                    "Failed to write cell ({}, {}) of sheet '{}': {}",
                    row, col, sheet.name, e
                )
            })?;
        }
    }

    xlsx.save_to_buffer()
        .map_err(|e| format!("Failed to serialize workbook: {}", e))
}
