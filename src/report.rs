//! Command reports: the fields-style summary a successful invocation
//! prints, built from an operation's visible-after properties.

use serde_json::json;

/// Ordered field summary for one completed operation.
#[derive(Debug)]
pub struct Report {
    operation: String,
    success: bool,
    fields: Vec<(String, serde_json::Value)>,
}

impl Report {
    pub fn new(operation: impl Into<String>, success: bool) -> Self {
        Self {
            operation: operation.into(),
            success,
            fields: Vec::new(),
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn push(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.fields.push((key.into(), value));
    }

    /// Fields in property-collection order.
    pub fn fields(&self) -> &[(String, serde_json::Value)] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// `key: value` lines, one per field, preceded by the success flag.
    pub fn render_text(&self) -> String {
        let mut out = format!("success: {}\n", self.success);
        for (key, value) in &self.fields {
            match value {
                serde_json::Value::String(text) => out.push_str(&format!("{key}: {text}\n")),
                other => out.push_str(&format!("{key}: {other}\n")),
            }
        }
        out
    }

    /// Fields nest under their own key so a property that happens to be
    /// named `operation` or `success` cannot clobber the envelope.
    pub fn to_json(&self) -> serde_json::Value {
        let mut fields = serde_json::Map::new();
        for (key, value) in &self.fields {
            fields.insert(key.clone(), value.clone());
        }
        let mut map = serde_json::Map::new();
        map.insert("operation".to_string(), json!(self.operation));
        map.insert("success".to_string(), json!(self.success));
        map.insert("fields".to_string(), serde_json::Value::Object(fields));
        serde_json::Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rendering_keeps_field_order_and_unquotes_strings() {
        let mut report = Report::new("users.list", true);
        report.push("filter", json!("active"));
        report.push("count", json!(3));

        let text = report.render_text();
        assert_eq!(text, "success: true\nfilter: active\ncount: 3\n");
    }

    #[test]
    fn json_rendering_carries_operation_and_fields() {
        let mut report = Report::new("users.list", true);
        report.push("count", json!(3));

        let value = report.to_json();
        assert_eq!(value["operation"], json!("users.list"));
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["fields"]["count"], json!(3));
    }

    #[test]
    fn field_named_success_cannot_clobber_the_envelope() {
        let mut report = Report::new("health.check", true);
        report.push("success", json!(false));
        report.push("operation", json!("spoofed"));

        let value = report.to_json();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["operation"], json!("health.check"));
        assert_eq!(value["fields"]["success"], json!(false));
        assert_eq!(value["fields"]["operation"], json!("spoofed"));
    }

    #[test]
    fn get_finds_fields_by_key() {
        let mut report = Report::new("auth.login", true);
        report.push("user", json!("ada"));
        assert_eq!(report.get("user"), Some(&json!("ada")));
        assert_eq!(report.get("missing"), None);
    }
}
