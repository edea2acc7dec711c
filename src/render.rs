//! Turns a selected value into the text printed on stdout.
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Strings unquoted, scalars as JSON literals, containers as pretty JSON.
    #[default]
    Raw,
    /// Everything as pretty JSON.
    Json,
}

/// Renders a value without a trailing newline.
pub fn render(value: &Value, format: OutputFormat) -> Result<String, serde_json::Error> {
    match (format, value) {
        (OutputFormat::Raw, Value::String(s)) => Ok(s.clone()),
        (_, Value::Array(_) | Value::Object(_)) => serde_json::to_string_pretty(value),
        _ => serde_json::to_string(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_scalars() {
        assert_eq!(render(&json!("my-app"), OutputFormat::Raw).unwrap(), "my-app");
        assert_eq!(render(&json!(256), OutputFormat::Raw).unwrap(), "256");
        assert_eq!(render(&json!(1.5), OutputFormat::Raw).unwrap(), "1.5");
        assert_eq!(render(&json!(true), OutputFormat::Raw).unwrap(), "true");
        assert_eq!(render(&json!(null), OutputFormat::Raw).unwrap(), "null");
    }

    #[test]
    fn test_json_quotes_strings() {
        assert_eq!(
            render(&json!("say \"hi\""), OutputFormat::Json).unwrap(),
            r#""say \"hi\"""#
        );
    }

    #[test]
    fn test_containers_are_pretty_and_ordered() {
        let value = json!({ "z": [1], "a": {} });
        let expected = "{\n  \"z\": [\n    1\n  ],\n  \"a\": {}\n}";
        assert_eq!(render(&value, OutputFormat::Raw).unwrap(), expected);
        assert_eq!(render(&value, OutputFormat::Json).unwrap(), expected);
    }
}
