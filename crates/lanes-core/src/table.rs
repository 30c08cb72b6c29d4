//! Plain-text rendering of labelled tables.
//!
//! Layout: a header row of column names, then one row per index label. The
//! index column is left-aligned; value columns are right-aligned to the
//! widest of their header and values, two spaces apart.
//!
//! ```text
//!        MID  Top  Jg
//! Ana      1    1   0
//! Bruno    1    0   0
//! ```
//!
//! Float columns are rounded to [`FLOAT_DECIMALS`] places and printed with
//! the fewest decimals (at least one) that show every rounded value exactly,
//! uniformly across the column. Output depends only on the values, so the
//! same table always renders to the same bytes.

use std::fmt::Write as _;

/// Rounding applied to float columns.
pub const FLOAT_DECIMALS: usize = 3;

const COLUMN_GAP: &str = "  ";

/// One column of values.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<i64>),
    Float(Vec<f64>),
}

impl Column {
    fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
        }
    }

    fn cells(&self) -> Vec<String> {
        match self {
            Self::Int(values) => values.iter().map(ToString::to_string).collect(),
            Self::Float(values) => {
                let rounded: Vec<f64> = values.iter().map(|&v| round(v)).collect();
                let decimals = column_decimals(&rounded);
                rounded
                    .iter()
                    .map(|&v| {
                        if v.is_nan() {
                            "NaN".to_string()
                        } else {
                            format!("{v:.decimals$}")
                        }
                    })
                    .collect()
            }
        }
    }
}

/// A table with a row index and named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TextTable {
    index: Vec<String>,
    headers: Vec<String>,
    columns: Vec<Column>,
}

impl TextTable {
    #[must_use]
    pub fn new(index: Vec<String>) -> Self {
        Self {
            index,
            headers: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Append an integer column.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have one entry per index label.
    #[must_use]
    pub fn int_column(self, header: impl Into<String>, values: Vec<i64>) -> Self {
        self.push(header.into(), Column::Int(values))
    }

    /// Append a float column, rounded on render.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have one entry per index label.
    #[must_use]
    pub fn float_column(self, header: impl Into<String>, values: Vec<f64>) -> Self {
        self.push(header.into(), Column::Float(values))
    }

    fn push(mut self, header: String, column: Column) -> Self {
        assert_eq!(
            column.len(),
            self.index.len(),
            "column '{header}' needs one value per row"
        );
        self.headers.push(header);
        self.columns.push(column);
        self
    }

    /// Render to text, one line per row, newline-terminated.
    #[must_use]
    pub fn render(&self) -> String {
        if self.index.is_empty() || self.columns.is_empty() {
            return format!(
                "Empty DataFrame\nColumns: [{}]\nIndex: [{}]\n",
                self.headers.join(", "),
                self.index.join(", ")
            );
        }

        let cells: Vec<Vec<String>> = self.columns.iter().map(Column::cells).collect();
        let index_width = self.index.iter().map(|s| s.chars().count()).max().unwrap_or(0);
        let widths: Vec<usize> = self
            .headers
            .iter()
            .zip(&cells)
            .map(|(header, col)| {
                col.iter()
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let _ = write!(out, "{:index_width$}", "");
        for (header, &width) in self.headers.iter().zip(&widths) {
            let _ = write!(out, "{COLUMN_GAP}{header:>width$}");
        }
        out.push('\n');

        for (row, label) in self.index.iter().enumerate() {
            let _ = write!(out, "{label:<index_width$}");
            for (col, &width) in cells.iter().zip(&widths) {
                let _ = write!(out, "{COLUMN_GAP}{:>width$}", col[row]);
            }
            out.push('\n');
        }

        out
    }
}

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn round(v: f64) -> f64 {
    if v.is_nan() {
        return v;
    }
    let scale = 10f64.powi(FLOAT_DECIMALS as i32);
    // + 0.0 folds -0.0 into 0.0
    (v * scale).round() / scale + 0.0
}

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn column_decimals(values: &[f64]) -> usize {
    (1..FLOAT_DECIMALS)
        .find(|&d| {
            let scale = 10f64.powi(d as i32);
            values
                .iter()
                .filter(|v| v.is_finite())
                .all(|&v| ((v * scale).round() - v * scale).abs() < 1e-6)
        })
        .unwrap_or(FLOAT_DECIMALS)
}
