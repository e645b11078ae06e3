//! The report builder: an ordered, id-keyed registry of HTML fragments
//! plus a CSS buffer, flattened on demand into one static document.

use std::collections::HashSet;
use std::fmt::Write as FmtWrite;
use std::str::FromStr;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::chart::{VegaLiteChart, VEGA_CDN, VEGA_EMBED_CDN, VEGA_LITE_CDN};
use crate::error::{ReportError, Result};
use crate::html;
use crate::table::DataTable;

/// Charts are embedded inline into the document; datasets above this
/// row count are rejected to keep the artifact's size bounded.
pub const MAX_CHART_ROWS: usize = 5000;

/// Styling for tables wrapped in a disclosure element. Keyed so it is
/// appended to the CSS buffer at most once per report.
const DISCLOSURE_STYLE_ID: &str = "disclosure";
const DISCLOSURE_CSS: &str = "
details {
  user-select: all;
}

details > summary span.icon {
  width: 24px;
  height: 24px;
  transition: all 0.3s;
  margin-left: auto;
}

details[open] summary span.icon {
  transform: rotate(180deg);
  transform-origin: center center;
}

summary {
  display: flex;
  background-color: #D3D3D3;
  padding: 1rem;
  border-radius: .5rem;
  cursor: pointer;
  margin-bottom: 1rem;
}

summary::-webkit-details-marker {
  display: none;
}
";

/// Heading levels accepted by [`ReportBuilder::insert_header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderLevel {
    #[serde(alias = "h1")]
    H1,
    #[serde(alias = "h2")]
    H2,
    #[serde(alias = "h3")]
    H3,
    #[serde(alias = "h4")]
    H4,
}

impl HeaderLevel {
    fn tag(self) -> &'static str {
        match self {
            HeaderLevel::H1 => "h1",
            HeaderLevel::H2 => "h2",
            HeaderLevel::H3 => "h3",
            HeaderLevel::H4 => "h4",
        }
    }
}

/// Output representation of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Bytes,
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "bytes" => Ok(OutputFormat::Bytes),
            _ => Err(ReportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// A fully rendered report, in the representation the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedReport {
    Text(String),
    Bytes(Vec<u8>),
}

impl RenderedReport {
    /// The document as bytes, whichever representation was requested.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            RenderedReport::Text(text) => text.into_bytes(),
            RenderedReport::Bytes(bytes) => bytes,
        }
    }
}

/// Accumulates HTML fragments and CSS, then emits one static HTML
/// document.
///
/// Fragments are keyed by a caller-chosen id and kept in insertion
/// order; re-inserting an existing id overwrites the fragment in place
/// without moving it. Rendering is non-destructive: the builder can be
/// rendered, mutated further, and rendered again.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    css: String,
    elements: IndexMap<String, String>,
    named_styles: HashSet<&'static str>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder seeded with an initial stylesheet.
    pub fn with_css<S: Into<String>>(css: S) -> Self {
        Self {
            css: css.into(),
            ..Self::default()
        }
    }

    /// Append caller-supplied CSS to the stylesheet buffer.
    pub fn append_css(&mut self, css: &str) {
        self.css.push_str(css);
    }

    /// The current stylesheet buffer, as accumulated so far.
    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Register a heading under `id`. The class attribute is omitted
    /// entirely when `class` is `None`.
    pub fn insert_header(&mut self, id: &str, text: &str, level: HeaderLevel, class: Option<&str>) {
        let tag = level.tag();
        let markup = format!("<{tag}{}>{text}</{tag}>", html::class_attr(class));
        self.register(id, markup);
    }

    /// Register a paragraph under `id`. Newlines in `text` are rendered
    /// as `<br/>`.
    pub fn insert_text(&mut self, id: &str, text: &str, class: Option<&str>) {
        let markup = format!(
            "<p{}>{}</p>",
            html::class_attr(class),
            text.replace('\n', "<br/>")
        );
        self.register(id, markup);
    }

    /// Register a table under `id`.
    ///
    /// The optional class is handed straight to the table serializer,
    /// which falls back to its default class. With `collapsible` set,
    /// the table is hidden behind a `<details>` disclosure element and
    /// the disclosure styling is added to the stylesheet.
    pub fn insert_table(&mut self, id: &str, table: &DataTable, class: Option<&str>, collapsible: bool) {
        let table_html = table.to_html(class);
        let markup = if collapsible {
            self.ensure_named_style(DISCLOSURE_STYLE_ID, DISCLOSURE_CSS);
            format!(
                "<details><summary><span class=\"icon\">⬇️</span></summary>{table_html}</details>"
            )
        } else {
            table_html
        };
        self.register(id, markup);
    }

    /// Register a chart under `id`: an empty target div plus the script
    /// that renders the specification into it, inside a wrapper div
    /// with an optional class.
    ///
    /// Fails without touching the registry when the chart's inline
    /// dataset exceeds [`MAX_CHART_ROWS`].
    pub fn insert_chart(&mut self, id: &str, chart: &VegaLiteChart, class: Option<&str>) -> Result<()> {
        let rows = chart.data_row_count();
        if rows > MAX_CHART_ROWS {
            return Err(ReportError::ChartDataTooLarge { rows, limit: MAX_CHART_ROWS });
        }

        let script = chart.embed_script(id)?;
        let markup = format!(
            "<div{}><div id=\"{id}\"></div>{script}</div>",
            html::class_attr(class)
        );
        self.register(id, markup);
        Ok(())
    }

    /// Flatten the registry into the final document: one `<head>` with
    /// the pinned chart runtimes and the de-indented stylesheet, then
    /// every fragment in insertion order.
    pub fn render(&self) -> String {
        debug!(
            "rendering document: {} fragments, {} bytes of css",
            self.elements.len(),
            self.css.len()
        );

        let mut out = String::new();
        writeln!(out, "<head>").unwrap();
        for src in [VEGA_CDN, VEGA_LITE_CDN, VEGA_EMBED_CDN] {
            writeln!(out, "<script type=\"text/javascript\" src=\"{}\"></script>", src).unwrap();
        }
        writeln!(out, "<style>{}</style>", html::dedent(&self.css)).unwrap();
        writeln!(out, "</head>").unwrap();

        for fragment in self.elements.values() {
            out.push_str(fragment);
            out.push_str("\n\n");
        }
        out
    }

    /// UTF-8 bytes of [`render`](Self::render).
    pub fn render_bytes(&self) -> Vec<u8> {
        self.render().into_bytes()
    }

    /// Render in a caller-selected representation. For callers that
    /// carry the format as data (a flag, a config value), parse it
    /// into [`OutputFormat`] first.
    pub fn build(&self, format: OutputFormat) -> RenderedReport {
        match format {
            OutputFormat::Text => RenderedReport::Text(self.render()),
            OutputFormat::Bytes => RenderedReport::Bytes(self.render_bytes()),
        }
    }

    fn register(&mut self, id: &str, markup: String) {
        debug!("registered fragment {:?} ({} bytes)", id, markup.len());
        self.elements.insert(id.to_string(), markup);
    }

    fn ensure_named_style(&mut self, style_id: &'static str, css: &str) {
        if self.named_styles.insert(style_id) {
            self.css.push_str(css);
        }
    }
}
