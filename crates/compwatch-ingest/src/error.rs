use thiserror::Error;

/// Hard failures of the workbook loader. Nothing downstream of the loader
/// fails; it degrades to empty or neutral values instead.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("unsupported file format \"{extension}\" for {path}; expected .xlsx or .xls")]
    UnsupportedFormat { path: String, extension: String },

    #[error("missing required columns: {}", .missing.join(", "))]
    InvalidSchema { missing: Vec<String> },

    #[error("failed to read workbook {path}: {source}")]
    Workbook {
        path: String,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook {path} has no worksheets")]
    EmptyWorkbook { path: String },
}
