use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Cannot read workbook: {0}")]
    Excel(String),
    #[error("Unsupported file format: .{0}")]
    UnsupportedFormat(String),
}

/// File extensions accepted by `load_file` (and by drag and drop).
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "xls", "xlsx"];

pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

/// Load every integer cell of a CSV or Excel file, row by row, left to right.
pub fn load_file(path: &Path) -> Result<Vec<f64>, LoadError> {
    let ext = extension_of(path);
    match ext.as_str() {
        "csv" => load_csv(path),
        "xls" | "xlsx" => load_excel(path),
        _ => Err(LoadError::UnsupportedFormat(ext)),
    }
}

fn load_csv(path: &Path) -> Result<Vec<f64>, LoadError> {
    let content = std::fs::read(path)?;
    integers_from_csv(&content)
}

/// Collect the cells of CSV text that read as integers. Everything else,
/// floats included, is skipped.
pub fn integers_from_csv(content: &[u8]) -> Result<Vec<f64>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut values = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        for cell in record.iter() {
            if let Some(v) = integer_cell(&String::from_utf8_lossy(cell)) {
                values.push(v);
            }
        }
    }
    Ok(values)
}

fn integer_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<i64>().ok().map(|i| i as f64)
}

fn load_excel(path: &Path) -> Result<Vec<f64>, LoadError> {
    use calamine::{open_workbook_auto, Data, Reader};

    let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::Excel(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LoadError::Excel("No sheets found".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LoadError::Excel(e.to_string()))?;

    let mut values = Vec::new();
    for row in range.rows() {
        for cell in row {
            let value = match cell {
                Data::Int(i) => Some(*i as f64),
                // Spreadsheets store whole numbers as floats.
                Data::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f),
                Data::String(s) => integer_cell(s),
                _ => None,
            };
            if let Some(v) = value {
                values.push(v);
            }
        }
    }
    Ok(values)
}

/// Write the displayed results exactly as shown.
pub fn export_text(path: &Path, text: &str) -> Result<(), LoadError> {
    std::fs::write(path, text)?;
    Ok(())
}
