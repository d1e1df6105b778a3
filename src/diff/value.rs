//! Display formatting for plan values

use serde_json::Value;

/// Formats plan values the way `terraform show` prints them
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueFormatter;

impl ValueFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render a scalar value: quoted strings, numbers exactly as written in the
    /// plan, bare booleans and `null`
    pub fn render(&self, value: &Value) -> String {
        match value {
            Value::String(text) => Self::quote(text),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Null => "null".to_string(),
            Value::Array(_) | Value::Object(_) => self.inline(value),
        }
    }

    /// Render any value on a single line; composites use compact JSON
    pub fn inline(&self, value: &Value) -> String {
        match value {
            Value::Array(_) | Value::Object(_) => value.to_string(),
            _ => self.render(value),
        }
    }

    fn quote(text: &str) -> String {
        Value::String(text.to_owned()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_strings_quoted() {
        let formatter = ValueFormatter::new();
        assert_eq!(formatter.render(&json!("small")), "\"small\"");
        assert_eq!(formatter.render(&json!("")), "\"\"");
    }

    #[test]
    fn test_render_escapes_quotes_and_backslashes() {
        let formatter = ValueFormatter::new();
        assert_eq!(formatter.render(&json!("C:\\temp")), "\"C:\\\\temp\"");
        assert_eq!(formatter.render(&json!("say \"hi\"")), "\"say \\\"hi\\\"\"");
        assert_eq!(formatter.render(&json!("a\nb")), "\"a\\nb\"");
    }

    #[test]
    fn test_render_numbers_without_locale() {
        let formatter = ValueFormatter::new();
        let plan: Value = serde_json::from_str(r#"[42, 1.5, -3, 1.0]"#).unwrap();
        let rendered: Vec<String> = plan
            .as_array()
            .unwrap()
            .iter()
            .map(|v| formatter.render(v))
            .collect();

        assert_eq!(rendered, vec!["42", "1.5", "-3", "1.0"]);
    }

    #[test]
    fn test_render_numbers_keep_source_text() {
        let formatter = ValueFormatter::new();
        let plan: Value =
            serde_json::from_str(r#"[1.50, 1e3, 123456789012345678901234, 0.1]"#).unwrap();
        let rendered: Vec<String> = plan
            .as_array()
            .unwrap()
            .iter()
            .map(|v| formatter.render(v))
            .collect();

        assert_eq!(rendered, vec!["1.50", "1e3", "123456789012345678901234", "0.1"]);
    }

    #[test]
    fn test_render_bool_and_null() {
        let formatter = ValueFormatter::new();
        assert_eq!(formatter.render(&json!(true)), "true");
        assert_eq!(formatter.render(&json!(false)), "false");
        assert_eq!(formatter.render(&Value::Null), "null");
    }

    #[test]
    fn test_inline_composites_as_compact_json() {
        let formatter = ValueFormatter::new();
        assert_eq!(formatter.inline(&json!(["a", "b"])), r#"["a","b"]"#);
        assert_eq!(formatter.inline(&json!({"k": 1})), r#"{"k":1}"#);
        assert_eq!(formatter.inline(&json!("x")), "\"x\"");
    }
}
