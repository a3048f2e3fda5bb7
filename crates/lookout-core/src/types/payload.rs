use serde_json::{Map, Value};

/// Untyped body returned by one provider attempt.
///
/// WHOIS providers answer with JSON, plain text or scraped HTML, so the body
/// is kept as whichever of the two shapes it parsed into. Payloads are only
/// alive for the duration of normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Body parsed as JSON
    Json(Value),
    /// Body that was not valid JSON
    Text(String),
}

impl Payload {
    /// Parse a body strictly as JSON
    pub fn from_json_str(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body).map(Self::Json)
    }

    /// Parse a body as JSON, keeping it as text when that fails
    #[must_use]
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(body),
        }
    }

    /// The top-level JSON object, if the payload is one
    #[must_use]
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Json(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// The raw text, if the payload was not JSON
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            // A JSON string literal is still text as far as adapters care
            Self::Json(Value::String(text)) => Some(text),
            Self::Json(_) => None,
        }
    }

    /// Whether the payload carries an explicit `status: "fail"` marker
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.as_object()
            .and_then(|map| map.get("status"))
            .and_then(Value::as_str)
            .is_some_and(|status| status.eq_ignore_ascii_case("fail"))
    }

    /// Value at a dotted path (`connection.org`) rendered as a string.
    ///
    /// Only non-empty strings and numbers count as present.
    #[must_use]
    pub fn field(&self, path: &str) -> Option<String> {
        let mut current = self.as_object()?.get(path.split('.').next()?)?;
        for segment in path.split('.').skip(1) {
            current = current.as_object()?.get(segment)?;
        }
        scalar(current)
    }

    /// First present value among `paths`, in order
    #[must_use]
    pub fn first_field(&self, paths: &[&str]) -> Option<String> {
        paths.iter().find_map(|path| self.field(path))
    }
}

/// Render a JSON scalar, treating empty strings as absent.
#[must_use]
pub fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_paths_and_empties() {
        let payload = Payload::Json(json!({
            "ip": "",
            "query": "8.8.8.8",
            "asn": 15169,
            "connection": { "org": "Google LLC" }
        }));
        assert_eq!(payload.field("ip"), None);
        assert_eq!(payload.field("asn").as_deref(), Some("15169"));
        assert_eq!(payload.field("connection.org").as_deref(), Some("Google LLC"));
        assert_eq!(payload.field("connection.isp"), None);
        assert_eq!(
            payload.first_field(&["ip", "query"]).as_deref(),
            Some("8.8.8.8")
        );
    }

    #[test]
    fn failure_marker_is_case_insensitive() {
        assert!(Payload::Json(json!({"status": "FAIL"})).is_failure());
        assert!(!Payload::Json(json!({"status": "success"})).is_failure());
        assert!(!Payload::Json(json!({"status": ["active"]})).is_failure());
        assert!(!Payload::Text("status: fail".into()).is_failure());
    }

    #[test]
    fn lenient_body_falls_back_to_text() {
        assert!(matches!(
            Payload::from_body("{\"a\":1}".into()),
            Payload::Json(_)
        ));
        let text = Payload::from_body("Registrar: Example".into());
        assert_eq!(text.as_text(), Some("Registrar: Example"));
        assert!(Payload::from_json_str("<html>").is_err());
    }
}
