//! Output envelopes and error reporting.
//!
//! Payloads go to stdout. Under `--format json` errors are a JSON document on
//! stdout too; every other format prints the human block to stderr.

use crate::exit_codes::ExitCode;
use serde_json::{json, Map, Value};
use vx_common::{format_error_human, Error, OutputFormat, StructuredError, SCHEMA_VERSION};

/// Wrap a command payload with the common envelope fields.
///
/// Object payloads are merged into the envelope; anything else lands under
/// `"data"`.
pub fn envelope(command: &str, body: Value) -> Value {
    let mut out = Map::new();
    out.insert("schema_version".into(), json!(SCHEMA_VERSION));
    out.insert("generated_at".into(), json!(chrono::Utc::now().to_rfc3339()));
    out.insert("command".into(), json!(command));
    match body {
        Value::Object(fields) => out.extend(fields),
        Value::Null => {}
        other => {
            out.insert("data".into(), other);
        }
    }
    Value::Object(out)
}

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}

/// JSON document describing a failed command.
pub fn error_document(command: &str, err: &Error) -> Value {
    let exit = ExitCode::from_error(err);
    envelope(
        command,
        json!({
            "status": "error",
            "exit_code": exit.as_i32(),
            "exit_code_name": exit.code_name(),
            "error": StructuredError::from(err),
        }),
    )
}

/// Report a failed command in the requested format and return its exit code.
pub fn report_error(command: &str, err: &Error, format: OutputFormat, use_color: bool) -> ExitCode {
    match format {
        OutputFormat::Json => print_json(&error_document(command, err)),
        OutputFormat::Summary => eprintln!("[{}] {}: {}", err.code(), command, err),
        OutputFormat::Exitcode => {}
        OutputFormat::Md => eprintln!("{}", format_error_human(err, use_color)),
    }
    ExitCode::from_error(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_merges_objects() {
        let value = envelope("curve", json!({"exponent": 0.5}));
        assert_eq!(value["command"], "curve");
        assert_eq!(value["schema_version"], SCHEMA_VERSION);
        assert_eq!(value["exponent"], 0.5);
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_envelope_wraps_arrays() {
        let value = envelope("project list", json!([1, 2]));
        assert_eq!(value["data"], json!([1, 2]));
    }

    #[test]
    fn test_error_document() {
        let err = Error::ProjectNotFound {
            project_id: "vsl-20260101-000000-abcd".into(),
        };
        let doc = error_document("project show", &err);
        assert_eq!(doc["status"], "error");
        assert_eq!(doc["exit_code"], 15);
        assert_eq!(doc["error"]["category"], "store");
        assert_eq!(doc["error"]["context"]["project_id"], "vsl-20260101-000000-abcd");
    }
}
