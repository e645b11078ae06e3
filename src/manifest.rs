//! Declarative report description consumed by the CLI.
//!
//! A manifest is a JSON document listing the report's elements in the
//! order they should appear, plus optional styling. Tables can carry
//! their rows inline or reference a CSV file; charts reference a
//! Vega-Lite spec file or carry the spec inline. Relative paths are
//! resolved against a caller-supplied base directory, normally the
//! manifest's own directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::builder::{HeaderLevel, ReportBuilder};
use crate::chart::VegaLiteChart;
use crate::error::Result;
use crate::table::DataTable;

#[derive(Debug, Deserialize)]
pub struct ReportManifest {
    /// Stylesheet text applied to the report.
    #[serde(default)]
    pub css: Option<String>,
    /// Stylesheet file appended after `css`.
    #[serde(default)]
    pub css_file: Option<PathBuf>,
    pub elements: Vec<ElementSpec>,
}

/// One report element, tagged by `kind`.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ElementSpec {
    Header {
        id: String,
        text: String,
        level: HeaderLevel,
        #[serde(default)]
        class: Option<String>,
    },
    Text {
        id: String,
        text: String,
        #[serde(default)]
        class: Option<String>,
    },
    Table {
        id: String,
        #[serde(default)]
        class: Option<String>,
        #[serde(default)]
        collapsible: bool,
        #[serde(flatten)]
        source: TableSource,
    },
    Chart {
        id: String,
        #[serde(default)]
        class: Option<String>,
        #[serde(flatten)]
        source: ChartSource,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TableSource {
    Inline {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
        #[serde(default)]
        index: Option<Vec<String>>,
    },
    Csv { csv: PathBuf },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ChartSource {
    Path { spec: PathBuf },
    Inline { inline: serde_json::Value },
}

impl ReportManifest {
    /// Parse a manifest file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Assemble a report from this manifest, resolving referenced
    /// files against `base_dir`.
    pub fn build_report(&self, base_dir: &Path) -> Result<ReportBuilder> {
        let mut report = ReportBuilder::new();

        if let Some(css) = &self.css {
            report.append_css(css);
        }
        if let Some(css_file) = &self.css_file {
            report.append_css(&fs::read_to_string(resolve(base_dir, css_file))?);
        }

        for element in &self.elements {
            match element {
                ElementSpec::Header { id, text, level, class } => {
                    report.insert_header(id, text, *level, class.as_deref());
                }
                ElementSpec::Text { id, text, class } => {
                    report.insert_text(id, text, class.as_deref());
                }
                ElementSpec::Table { id, class, collapsible, source } => {
                    let table = load_table(source, base_dir)?;
                    report.insert_table(id, &table, class.as_deref(), *collapsible);
                }
                ElementSpec::Chart { id, class, source } => {
                    let chart = load_chart(source, base_dir)?;
                    report.insert_chart(id, &chart, class.as_deref())?;
                }
            }
        }

        Ok(report)
    }
}

fn load_table(source: &TableSource, base_dir: &Path) -> Result<DataTable> {
    match source {
        TableSource::Inline { columns, rows, index } => {
            let mut table = DataTable::new(columns.iter().cloned());
            for row in rows {
                table.push_row(row.iter().cloned())?;
            }
            if let Some(labels) = index {
                table.set_index(labels.iter().cloned())?;
            }
            Ok(table)
        }
        TableSource::Csv { csv } => DataTable::from_csv_path(resolve(base_dir, csv)),
    }
}

fn load_chart(source: &ChartSource, base_dir: &Path) -> Result<VegaLiteChart> {
    match source {
        ChartSource::Path { spec } => VegaLiteChart::from_spec_path(resolve(base_dir, spec)),
        ChartSource::Inline { inline } => Ok(VegaLiteChart::from_value(inline.clone())),
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_with_every_element_kind() {
        let json = r#"{
            "css": "h1 { color: #303e55; }",
            "elements": [
                {"kind": "header", "id": "title", "text": "Sales", "level": "h1"},
                {"kind": "text", "id": "intro", "text": "Q1\nQ2", "class": "lead"},
                {"kind": "table", "id": "summary",
                 "columns": ["region", "amount"],
                 "rows": [["EMEA", "1200"], ["APAC", "830"]],
                 "collapsible": true},
                {"kind": "chart", "id": "trend",
                 "inline": {"mark": "bar", "data": {"values": [{"x": 1}]}}}
            ]
        }"#;

        let manifest: ReportManifest = serde_json::from_str(json).unwrap();
        let report = manifest.build_report(Path::new(".")).unwrap();
        assert_eq!(report.element_count(), 4);

        let html = report.render();
        let order: Vec<usize> = ["<h1", "<p class=\"lead\"", "<details>", "id=\"trend\""]
            .iter()
            .map(|needle| html.find(needle).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "manifest order preserved");
        assert!(report.css().starts_with("h1 { color: #303e55; }"));
    }

    #[test]
    fn test_uppercase_header_level_accepted() {
        let json = r#"{"kind": "header", "id": "t", "text": "x", "level": "H3"}"#;
        let element: ElementSpec = serde_json::from_str(json).unwrap();
        assert!(matches!(element, ElementSpec::Header { level: HeaderLevel::H3, .. }));
    }

    #[test]
    fn test_table_source_forms() {
        let inline: TableSource =
            serde_json::from_str(r#"{"columns": ["a"], "rows": [["1"]]}"#).unwrap();
        assert!(matches!(inline, TableSource::Inline { .. }));

        let csv: TableSource = serde_json::from_str(r#"{"csv": "data.csv"}"#).unwrap();
        assert!(matches!(csv, TableSource::Csv { .. }));
    }

    #[test]
    fn test_unknown_element_kind_is_rejected() {
        let json = r#"{"kind": "iframe", "id": "x"}"#;
        assert!(serde_json::from_str::<ElementSpec>(json).is_err());
    }
}
