use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::LoadError;
use crate::schema::ColumnSchema;
use crate::table::{Cell, WideTable};

const SUPPORTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Reads the first worksheet of `path` with the default column schema.
///
/// # Errors
///
/// See [`load_with_schema`].
pub fn load(path: &Path) -> Result<WideTable, LoadError> {
    load_with_schema(path, &ColumnSchema::default())
}

/// Reads the first worksheet of `path` and validates it against `schema`.
///
/// The first row is the header row. Repeated headers are disambiguated with
/// `.1`, `.2`, ... suffixes.
///
/// # Errors
///
/// - [`LoadError::FileNotFound`] if `path` does not exist.
/// - [`LoadError::UnsupportedFormat`] if the extension is not `.xlsx`/`.xls`.
/// - [`LoadError::Workbook`] / [`LoadError::EmptyWorkbook`] if the workbook
///   cannot be read or has no sheets.
/// - [`LoadError::InvalidSchema`] if required columns or slot anchors are missing.
pub fn load_with_schema(path: &Path, schema: &ColumnSchema) -> Result<WideTable, LoadError> {
    let display = path.display().to_string();

    if !path.is_file() {
        return Err(LoadError::FileNotFound { path: display });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(LoadError::UnsupportedFormat {
            path: display,
            extension,
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|source| LoadError::Workbook {
        path: display.clone(),
        source,
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::EmptyWorkbook {
            path: display.clone(),
        })?
        .map_err(|source| LoadError::Workbook {
            path: display.clone(),
            source,
        })?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(header_text).collect())
        .unwrap_or_default();
    let body: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    let table = WideTable::new(headers, body);
    schema.validate(&table)?;

    tracing::info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.headers().len(),
        "loaded competitor workbook"
    );

    Ok(table)
}

fn header_text(cell: &Data) -> String {
    convert_cell(cell).text().unwrap_or_default().trim().to_string()
}

#[allow(clippy::cast_precision_loss)]
fn convert_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => {
            Cell::Text(cell.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_cell_maps_errors_to_empty() {
        assert_eq!(
            convert_cell(&Data::Error(calamine::CellErrorType::NA)),
            Cell::Empty
        );
    }

    #[test]
    fn convert_cell_keeps_numbers_and_text() {
        assert_eq!(convert_cell(&Data::Int(12)), Cell::Number(12.0));
        assert_eq!(convert_cell(&Data::Float(2.5)), Cell::Number(2.5));
        assert_eq!(
            convert_cell(&Data::String("满佳喜".to_string())),
            Cell::Text("满佳喜".to_string())
        );
    }

    #[test]
    fn header_text_renders_numeric_headers() {
        assert_eq!(header_text(&Data::Float(2024.0)), "2024");
        assert_eq!(header_text(&Data::Empty), "");
        assert_eq!(header_text(&Data::String(" 城市 ".to_string())), "城市");
    }
}
