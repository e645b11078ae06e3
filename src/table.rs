//! Owned tabular model and its HTML `<table>` serialization.

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{ReportError, Result};
use crate::html;

/// Class attribute emitted on serialized tables when the caller does
/// not supply one. Stylesheets written against the default markup key
/// off this name.
pub const DEFAULT_TABLE_CLASS: &str = "dataframe";

/// A rectangular block of string cells with named columns and an
/// optional row-index column.
///
/// This is an input collaborator for the report builder: it knows how
/// to serialize itself as an HTML table and how many rows it holds,
/// and nothing else.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    index: Option<Vec<String>>,
}

impl DataTable {
    /// Create an empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            index: None,
        }
    }

    /// Append one row. The cell count must match the column count.
    pub fn push_row<I, S>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(ReportError::RowArityMismatch {
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Replace the default ordinal row index with explicit labels.
    /// The label count must match the current row count.
    pub fn set_index<I, S>(&mut self, labels: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.rows.len() {
            return Err(ReportError::IndexLengthMismatch {
                rows: self.rows.len(),
                labels: labels.len(),
            });
        }
        self.index = Some(labels);
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Load a table from CSV. The header record becomes the column
    /// names, every following record becomes a row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let columns: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();
        let mut table = Self::new(columns);
        for record in csv_reader.records() {
            let record = record?;
            table.push_row(record.iter())?;
        }
        Ok(table)
    }

    /// Load a table from a CSV file on disk.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Serialize as one HTML `<table>` with a header row and a leading
    /// index column.
    ///
    /// Cell text is escaped, and newline characters inside cells are
    /// rendered as `<br/>`. The class attribute is taken from `class`,
    /// falling back to [`DEFAULT_TABLE_CLASS`].
    pub fn to_html(&self, class: Option<&str>) -> String {
        let class = class.unwrap_or(DEFAULT_TABLE_CLASS);
        let mut out = String::new();

        writeln!(out, "<table border=\"1\" class=\"{}\">", html::escape(class)).unwrap();

        writeln!(out, "  <thead>").unwrap();
        writeln!(out, "    <tr>").unwrap();
        writeln!(out, "      <th></th>").unwrap();
        for column in &self.columns {
            writeln!(out, "      <th>{}</th>", cell_text(column)).unwrap();
        }
        writeln!(out, "    </tr>").unwrap();
        writeln!(out, "  </thead>").unwrap();

        writeln!(out, "  <tbody>").unwrap();
        for (i, row) in self.rows.iter().enumerate() {
            writeln!(out, "    <tr>").unwrap();
            match &self.index {
                Some(labels) => writeln!(out, "      <th>{}</th>", cell_text(&labels[i])).unwrap(),
                None => writeln!(out, "      <th>{}</th>", i).unwrap(),
            }
            for cell in row {
                writeln!(out, "      <td>{}</td>", cell_text(cell)).unwrap();
            }
            writeln!(out, "    </tr>").unwrap();
        }
        writeln!(out, "  </tbody>").unwrap();

        out.push_str("</table>");
        out
    }
}

/// Escape a cell and render embedded newlines as line breaks.
fn cell_text(raw: &str) -> String {
    html::escape(raw).replace('\n', "<br/>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTable {
        let mut table = DataTable::new(["region", "amount"]);
        table.push_row(["EMEA", "1200.50"]).unwrap();
        table.push_row(["APAC", "830.00"]).unwrap();
        table
    }

    #[test]
    fn test_default_class() {
        let html = sample().to_html(None);
        assert!(html.starts_with("<table border=\"1\" class=\"dataframe\">"));
    }

    #[test]
    fn test_custom_class_replaces_default() {
        let html = sample().to_html(Some("sales"));
        assert!(html.contains("class=\"sales\""));
        assert!(!html.contains("dataframe"));
    }

    #[test]
    fn test_header_row_and_ordinal_index() {
        let html = sample().to_html(None);
        assert!(html.contains("<th>region</th>"));
        assert!(html.contains("<th>amount</th>"));
        // Rows are numbered from zero when no explicit index is set.
        assert!(html.contains("<th>0</th>"));
        assert!(html.contains("<th>1</th>"));
    }

    #[test]
    fn test_explicit_index_labels() {
        let mut table = sample();
        table.set_index(["q1", "q2"]).unwrap();
        let html = table.to_html(None);
        assert!(html.contains("<th>q1</th>"));
        assert!(!html.contains("<th>0</th>"));
    }

    #[test]
    fn test_cells_are_escaped() {
        let mut table = DataTable::new(["note"]);
        table.push_row(["a <b> & \"c\""]).unwrap();
        let html = table.to_html(None);
        assert!(html.contains("<td>a &lt;b&gt; &amp; &quot;c&quot;</td>"));
    }

    #[test]
    fn test_cell_newlines_become_breaks() {
        let mut table = DataTable::new(["note"]);
        table.push_row(["line1\nline2"]).unwrap();
        let html = table.to_html(None);
        assert!(html.contains("<td>line1<br/>line2</td>"));
    }

    #[test]
    fn test_row_arity_mismatch() {
        let mut table = DataTable::new(["a", "b"]);
        let err = table.push_row(["only one"]).unwrap_err();
        assert!(matches!(err, ReportError::RowArityMismatch { expected: 2, got: 1 }));
    }

    #[test]
    fn test_index_length_mismatch() {
        let mut table = sample();
        assert!(matches!(
            table.set_index(["just one"]),
            Err(ReportError::IndexLengthMismatch { rows: 2, labels: 1 })
        ));
    }

    #[test]
    fn test_from_csv_reader() {
        let csv = "region,amount\nEMEA,1200.50\nAPAC,830.00\n";
        let table = DataTable::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.columns(), ["region", "amount"]);
        assert_eq!(table.row_count(), 2);
        assert!(table.to_html(None).contains("<td>EMEA</td>"));
    }
}
