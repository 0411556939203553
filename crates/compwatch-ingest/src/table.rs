//! In-memory wide table: one row per store, columns as read from the sheet.

use std::collections::HashMap;

/// A single spreadsheet cell after loading.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// `true` for empty cells and for text that is blank after trimming.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(f) => f.is_nan(),
            Cell::Bool(_) => false,
        }
    }

    /// The cell rendered as text, or `None` when absent.
    ///
    /// Text is returned verbatim. Integral numbers drop the trailing `.0`
    /// so a numeric store code reads the same as it does in the sheet.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        if self.is_absent() {
            return None;
        }
        match self {
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(f) => Some(format_number(*f)),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Empty => None,
        }
    }

    /// The cell as a finite number. Numeric text is parsed; anything else
    /// is `None`.
    #[must_use]
    pub fn number(&self) -> Option<f64> {
        let value = match self {
            Cell::Number(f) => *f,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Empty | Cell::Bool(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// The cell as a non-negative count. Non-numeric and negative values
    /// coerce to `0`; fractional values truncate.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn count(&self) -> u32 {
        match self.number() {
            Some(v) if v > 0.0 => v.min(f64::from(u32::MAX)) as u32,
            _ => 0,
        }
    }
}

fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        let whole = f as i64;
        whole.to_string()
    } else {
        f.to_string()
    }
}

/// One worksheet as a header row plus data rows of equal width.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WideTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl WideTable {
    /// Builds a table, disambiguating repeated headers and normalising every
    /// row to the header width (short rows are padded with [`Cell::Empty`]).
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let headers = dedupe_headers(headers);
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Self { headers, rows }
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column with exactly this (disambiguated) header.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Renames repeated headers to `X`, `X.1`, `X.2`, ... and blank headers to
/// `Unnamed: <index>`, matching what spreadsheet tooling produces.
fn dedupe_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(raw.len());

    for (idx, header) in raw.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header
        };

        // Literal headers such as "X.1" can collide with generated suffixes.
        let mut suffix = seen.get(&base).copied().unwrap_or(0);
        let mut name = base.clone();
        while out.contains(&name) {
            suffix += 1;
            name = format!("{base}.{suffix}");
        }
        seen.insert(base, suffix);
        out.push(name);
    }

    out
}
