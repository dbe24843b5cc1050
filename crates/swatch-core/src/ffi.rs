//! JSON entrypoint for language bindings.
//!
//! [`run_json`] accepts a mode string and JSON arguments and always
//! returns envelope JSON:
//! - Success: `{"ok": true, "data": {...}}`
//! - Error: `{"ok": false, "error": {"code": "...", "message": "..."}}`
//!
//! Missing keys use defaults. Present keys with the wrong shape are errors.
//!
//! | mode | arguments |
//! |---|---|
//! | `extract` | `roots` (array of nodes), `settings` (object) or `config` (TOML text) |
//! | `variants` | `node` (a `component_set` node) |
//! | `version` | none |

use serde::de::DeserializeOwned;
use serde_json::Value;

use swatch_settings::{ExtractSettings, SwatchConfig};
use swatch_types::{DesignNode, SCHEMA_VERSION};

use crate::error::{ErrorCode, ResponseEnvelope, SwatchError};
use crate::{extract_workflow, variants_workflow};

/// Run a swatch operation with JSON arguments, returning JSON output.
///
/// Never panics on bad input; every failure comes back as an error
/// envelope.
///
/// ```
/// let out = swatch_core::ffi::run_json("version", "{}");
/// assert!(out.starts_with(r#"{"ok":true"#));
/// ```
pub fn run_json(mode: &str, args_json: &str) -> String {
    match run_json_inner(mode, args_json) {
        Ok(data) => ResponseEnvelope::success(data).to_json(),
        Err(err) => ResponseEnvelope::error(&err).to_json(),
    }
}

fn run_json_inner(mode: &str, args_json: &str) -> Result<Value, SwatchError> {
    let args: Value = serde_json::from_str(args_json)?;
    if !args.is_object() {
        return Err(SwatchError::invalid_field("arguments", "a JSON object"));
    }

    match mode {
        "extract" => {
            let roots: Vec<DesignNode> =
                parse_field(&args, "roots", "an array of design nodes")?.unwrap_or_default();
            let settings = parse_settings(&args)?;
            let receipt = extract_workflow(&roots, &settings)?;
            Ok(serde_json::to_value(&receipt)?)
        }
        "variants" => {
            let node: DesignNode = parse_field(&args, "node", "a design node")?
                .ok_or_else(|| SwatchError::invalid_field("node", "a design node"))?;
            let analysis = variants_workflow(&node)?;
            Ok(serde_json::to_value(&analysis)?)
        }
        "version" => Ok(serde_json::json!({
            "version": version(),
            "schema_version": schema_version(),
        })),
        _ => Err(SwatchError::unknown_mode(mode)),
    }
}

/// Deserialize `args[field]`: missing/null -> `None`, wrong shape -> error.
fn parse_field<T: DeserializeOwned>(
    args: &Value,
    field: &str,
    expected: &str,
) -> Result<Option<T>, SwatchError> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => serde_json::from_value(v.clone()).map(Some).map_err(|e| {
            SwatchError::with_details(
                ErrorCode::InvalidJson,
                format!("Invalid value for `{}`", field),
                format!("expected {}: {}", expected, e),
            )
        }),
    }
}

/// `settings` wins over `config`; neither means defaults.
fn parse_settings(args: &Value) -> Result<ExtractSettings, SwatchError> {
    if let Some(settings) = parse_field(args, "settings", "a settings object")? {
        return Ok(settings);
    }
    match args.get("config") {
        None | Some(Value::Null) => Ok(ExtractSettings::default()),
        Some(Value::String(text)) => SwatchConfig::parse(text)
            .map(|c| c.to_settings())
            .map_err(SwatchError::invalid_settings),
        Some(_) => Err(SwatchError::invalid_field("config", "TOML text")),
    }
}

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Receipt schema version.
pub fn schema_version() -> u32 {
    SCHEMA_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_object_arguments_are_rejected() {
        let out: Value = serde_json::from_str(&run_json("version", "[1, 2]")).unwrap();
        assert_eq!(out["ok"], false);
        assert_eq!(out["error"]["code"], "invalid_json");
    }

    #[test]
    fn null_roots_mean_empty() {
        let out: Value =
            serde_json::from_str(&run_json("extract", r#"{"roots": null}"#)).unwrap();
        assert_eq!(out["ok"], true);
        assert_eq!(out["data"]["tokens"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn config_text_is_parsed_as_toml() {
        let args = serde_json::json!({ "config": "[report]\ntop = 2\n" });
        let settings = parse_settings(&args).unwrap();
        assert_eq!(settings.report.top, 2);
    }

    #[test]
    fn settings_object_beats_config_text() {
        let args = serde_json::json!({
            "settings": { "report": { "top": 7 } },
            "config": "[report]\ntop = 2\n",
        });
        assert_eq!(parse_settings(&args).unwrap().report.top, 7);
    }
}
