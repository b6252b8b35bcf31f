//! Extraction output
//!
//! Text extraction yields either one flat string (PDF, audio) or a table of
//! per-cell strings (CSV) with column and row order preserved from the source.

use serde::Serialize;

/// Result of text extraction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "lowercase")]
pub enum ExtractedText {
    /// Whole-document text
    Flat(String),
    /// Tabular data
    Table(Table),
}

impl ExtractedText {
    /// True when there is nothing to scan
    ///
    /// Flat text is blank when empty or whitespace-only; a table is blank
    /// when it has no columns or no rows.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Flat(text) => text.trim().is_empty(),
            Self::Table(table) => table.is_empty(),
        }
    }

    /// Plain-text rendering used when the whole extraction is sent somewhere
    /// as one string
    pub fn to_text(&self) -> String {
        match self {
            Self::Flat(text) => text.clone(),
            Self::Table(table) => table.to_text(),
        }
    }
}

/// A named column of stringified cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Header name
    pub name: String,
    /// Cell strings, one per row
    pub cells: Vec<String>,
}

/// Ordered columns of equal length
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from columns
    ///
    /// Returns `None` if the columns do not all hold the same number of cells.
    pub fn from_columns(columns: Vec<Column>) -> Option<Self> {
        let rows = columns.first().map(|c| c.cells.len()).unwrap_or(0);
        if columns.iter().any(|c| c.cells.len() != rows) {
            return None;
        }
        Some(Self { columns })
    }

    /// Columns in source order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.cells.len()).unwrap_or(0)
    }

    /// No columns or no rows
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.row_count() == 0
    }

    /// Cell at a zero-based row and column
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.columns
            .get(column)
            .and_then(|c| c.cells.get(row))
            .map(String::as_str)
    }

    /// Render the table as aligned text with a zero-based index column
    ///
    /// ```
    /// use granite_regulate::domain::{Column, Table};
    ///
    /// let table = Table::from_columns(vec![
    ///     Column { name: "a".into(), cells: vec!["1".into(), "22".into()] },
    ///     Column { name: "b".into(), cells: vec!["foo".into(), "x".into()] },
    /// ]).unwrap();
    ///
    /// assert_eq!(table.to_text(), "    a    b\n0   1  foo\n1  22    x");
    /// ```
    pub fn to_text(&self) -> String {
        let rows = self.row_count();
        let index_width = rows.saturating_sub(1).to_string().len();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| {
                c.cells
                    .iter()
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(c.name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(rows + 1);

        let mut header = " ".repeat(index_width);
        for (column, width) in self.columns.iter().zip(&widths) {
            header.push_str(&format!("  {:>width$}", column.name, width = width));
        }
        lines.push(header);

        for row in 0..rows {
            let mut line = format!("{row:<index_width$}");
            for (column, width) in self.columns.iter().zip(&widths) {
                line.push_str(&format!("  {:>width$}", column.cells[row], width = width));
            }
            lines.push(line);
        }

        lines.join("\n")
    }
}
