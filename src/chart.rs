//! Vega-Lite chart collaborator.
//!
//! A chart is carried as its declarative JSON specification. Rendering
//! is delegated entirely to the vega/vega-lite/vega-embed runtimes
//! referenced from the document head; this module only produces the
//! markup that hands the specification to them.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::Result;

/// Runtime script URLs embedded in every document head. Pinned so the
/// generated embed calls keep working as the CDN majors move.
pub const VEGA_CDN: &str = "https://cdn.jsdelivr.net/npm/vega@5";
pub const VEGA_LITE_CDN: &str = "https://cdn.jsdelivr.net/npm/vega-lite@5.16.3";
pub const VEGA_EMBED_CDN: &str = "https://cdn.jsdelivr.net/npm/vega-embed@6";

/// Script fragment that renders a specification into a named div.
/// Viewer action controls (the export / view-source menu) are disabled.
const EMBED_SCRIPT_TEMPLATE: &str = r##"<script type="text/javascript">
  (function(vegaEmbed) {
    var spec = "__SPEC_PLACEHOLDER__";
    var embedOpt = {"actions": false};
    vegaEmbed("#__DIV_PLACEHOLDER__", spec, embedOpt).catch(console.error);
  })(vegaEmbed);
</script>"##;

/// Standalone single-chart page, for viewing a chart outside a report.
const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <script type="text/javascript" src="__VEGA_PLACEHOLDER__"></script>
  <script type="text/javascript" src="__VEGA_LITE_PLACEHOLDER__"></script>
  <script type="text/javascript" src="__VEGA_EMBED_PLACEHOLDER__"></script>
</head>
<body>
  <div id="__DIV_PLACEHOLDER__"></div>
__SCRIPT_PLACEHOLDER__
</body>
</html>"#;

/// A Vega-Lite chart specification.
#[derive(Debug, Clone)]
pub struct VegaLiteChart {
    spec: Value,
}

impl VegaLiteChart {
    /// Wrap an already-parsed specification.
    pub fn from_value(spec: Value) -> Self {
        Self { spec }
    }

    /// Parse a specification from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self { spec: serde_json::from_str(json)? })
    }

    /// Load a specification from a JSON file on disk.
    pub fn from_spec_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn spec(&self) -> &Value {
        &self.spec
    }

    /// Number of rows in the specification's inline dataset.
    ///
    /// Remote datasets (`data.url`) and specs without data report zero:
    /// only inline values are embedded into the document, so only they
    /// count against the embed size limit.
    pub fn data_row_count(&self) -> usize {
        self.spec
            .get("data")
            .and_then(|data| data.get("values"))
            .and_then(Value::as_array)
            .map(|values| values.len())
            .unwrap_or(0)
    }

    /// Produce the `<script>` fragment that renders this chart into the
    /// div named `div_id`.
    pub fn embed_script(&self, div_id: &str) -> Result<String> {
        let mut json = serde_json::to_string(&self.spec)?;
        // The JSON lands inside a script element; escape `</` so a
        // string like "</script>" in the spec cannot terminate it.
        json = json.replace("</", "<\\/");
        Ok(EMBED_SCRIPT_TEMPLATE
            .replace("__DIV_PLACEHOLDER__", div_id)
            .replace("\"__SPEC_PLACEHOLDER__\"", &json))
    }

    /// Produce a complete standalone HTML document showing only this
    /// chart, rendered into a div named `div_id`.
    pub fn to_html_document(&self, div_id: &str) -> Result<String> {
        let script = self.embed_script(div_id)?;
        Ok(DOCUMENT_TEMPLATE
            .replace("__VEGA_PLACEHOLDER__", VEGA_CDN)
            .replace("__VEGA_LITE_PLACEHOLDER__", VEGA_LITE_CDN)
            .replace("__VEGA_EMBED_PLACEHOLDER__", VEGA_EMBED_CDN)
            .replace("__DIV_PLACEHOLDER__", div_id)
            .replace("__SCRIPT_PLACEHOLDER__", &script))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bar_chart(rows: usize) -> VegaLiteChart {
        let values: Vec<Value> = (0..rows)
            .map(|i| json!({"x": i, "y": i * 2}))
            .collect();
        VegaLiteChart::from_value(json!({
            "mark": "bar",
            "data": {"values": values},
            "encoding": {
                "x": {"field": "x", "type": "ordinal"},
                "y": {"field": "y", "type": "quantitative"}
            }
        }))
    }

    #[test]
    fn test_inline_row_count() {
        assert_eq!(bar_chart(3).data_row_count(), 3);
        assert_eq!(bar_chart(0).data_row_count(), 0);
    }

    #[test]
    fn test_remote_data_counts_as_zero() {
        let chart = VegaLiteChart::from_value(json!({
            "mark": "line",
            "data": {"url": "data/stocks.csv"}
        }));
        assert_eq!(chart.data_row_count(), 0);
    }

    #[test]
    fn test_embed_script_targets_div() {
        let script = bar_chart(2).embed_script("sales").unwrap();
        assert!(script.starts_with("<script type=\"text/javascript\">"));
        assert!(script.ends_with("</script>"));
        assert!(script.contains("vegaEmbed(\"#sales\""));
        assert!(script.contains("\"actions\": false"));
        assert!(!script.contains("__SPEC_PLACEHOLDER__"));
    }

    #[test]
    fn test_embed_script_escapes_close_tags() {
        let chart = VegaLiteChart::from_value(json!({
            "title": "</script><script>alert(1)</script>",
            "mark": "bar"
        }));
        let script = chart.embed_script("c").unwrap();
        // The only unescaped close tag is the fragment's own.
        assert_eq!(script.matches("</script>").count(), 1);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(VegaLiteChart::from_json("{not json").is_err());
    }

    #[test]
    fn test_standalone_document() {
        let doc = bar_chart(1).to_html_document("only").unwrap();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(VEGA_CDN));
        assert!(doc.contains(VEGA_LITE_CDN));
        assert!(doc.contains(VEGA_EMBED_CDN));
        assert!(doc.contains("<div id=\"only\"></div>"));
        assert!(doc.contains("vegaEmbed(\"#only\""));
    }
}
