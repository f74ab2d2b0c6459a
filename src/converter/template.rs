//!
//! Rendering of log records through a display template.
//!
//! Understands the `{{.field}}` tags produced by [`convert_log_format`]; all other
//! text is literal. Field values come from a structured JSON log record as
//! delivered by the log stream.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::converter::log_format::convert_log_format;
use crate::error::{KiiError, Result};

/* --- constants ------------------------------------------------------------------------------ */

/** matches `{{.field}}` template tags */
static TEMPLATE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\.([0-9A-Za-z_]+)\}\}").expect("template tag pattern is valid")
});

/** format used when none is configured */
pub const DEFAULT_LOG_FORMAT: &str = "${time} [${level}] ${message}";

/** rendered for fields that are missing or null */
pub const NO_VALUE: &str = "<no value>";

/* --- types ----------------------------------------------------------------------------------- */

///
/// A parsed display template for log records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTemplate {
    /** the template-form source */
    source: String,
}

/* --- start of code -------------------------------------------------------------------------- */

impl LogTemplate {
    ///
    /// Build a template from a display format in either placeholder syntax.
    pub fn parse(format: &str) -> Self {
        Self { source: convert_log_format(format) }
    }

    /// Template-form text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Names of the fields referenced, in order of appearance
    pub fn fields(&self) -> Vec<&str> {
        TEMPLATE_TAG
            .captures_iter(&self.source)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    ///
    /// Render a single log record.
    ///
    /// # Arguments
    ///  * `record` - field map of the log record
    ///
    /// # Returns
    ///  * The rendered line; missing or null fields render as `<no value>`
    pub fn render(&self, record: &Map<String, Value>) -> String {
        TEMPLATE_TAG
            .replace_all(&self.source, |caps: &Captures| display_value(record.get(&caps[1])))
            .into_owned()
    }

    ///
    /// Parse a JSON log record and render it.
    ///
    /// # Returns
    ///  * The rendered line
    ///  * `KiiError::Serialization` if the line is not JSON
    ///  * `KiiError::Conversion` if the JSON is not an object
    pub fn render_line(&self, line: &str) -> Result<String> {
        match serde_json::from_str::<Value>(line)? {
            Value::Object(record) => Ok(self.render(&record)),
            other => Err(KiiError::Conversion(format!(
                "log record must be a JSON object, got: {}",
                other
            ))),
        }
    }
}

impl Default for LogTemplate {
    fn default() -> Self {
        Self::parse(DEFAULT_LOG_FORMAT)
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NO_VALUE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/* --- tests ------------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_parse_accepts_both_syntaxes() {
        assert_eq!(LogTemplate::parse("${time} [${level}]"), LogTemplate::parse("{{.time}} [{{.level}}]"));
    }

    #[test]
    fn test_fields_in_order() {
        let template = LogTemplate::parse("${time} {{.level}} ${message} ${time}");
        assert_eq!(template.fields(), vec!["time", "level", "message", "time"]);
    }

    #[test]
    fn test_render_record() {
        let template = LogTemplate::default();
        let line = template.render(&record(json!({
            "time": "2026-01-02T03:04:05Z",
            "level": "INFO",
            "message": "user created",
        })));
        assert_eq!(line, "2026-01-02T03:04:05Z [INFO] user created");
    }

    #[test]
    fn test_render_value_kinds() {
        let template = LogTemplate::parse("${n} ${b} ${o} ${z} ${missing}");
        let line = template.render(&record(json!({
            "n": 42,
            "b": true,
            "o": {"k": [1, 2]},
            "z": null,
        })));
        assert_eq!(line, "42 true {\"k\":[1,2]} <no value> <no value>");
    }

    #[test]
    fn test_render_line_rejects_non_objects() {
        let template = LogTemplate::default();
        assert!(matches!(template.render_line("[1,2]"), Err(KiiError::Conversion(_))));
        assert!(matches!(template.render_line("not json"), Err(KiiError::Serialization(_))));
    }

    #[test]
    fn test_literal_braces_untouched() {
        let template = LogTemplate::parse("{{ .x }} {x} ${x}");
        assert_eq!(template.render(&record(json!({"x": "v"}))), "{{ .x }} {x} v");
    }
}
