//! The backend's JSON response envelope.
//!
//! Every endpoint wraps its payload as `{ success, data, message?, errors? }`,
//! except that some write endpoints omit `success` entirely on a 2xx. Failure
//! messages arrive either as a plain string, as a field-keyed object, or as
//! the first element of an `errors` array, so extraction has to try all three
//! before falling back.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<Value>>,
}

impl<T> Envelope<T> {
    /// True unless the backend explicitly said `success: false`. Missing
    /// `success` on a 2xx is treated as success; see the registration
    /// endpoint note in DESIGN.md.
    pub fn is_success(&self) -> bool {
        self.success != Some(false)
    }

    /// Best-effort human-readable error text.
    pub fn error_message(&self) -> Option<String> {
        if let Some(message) = &self.message {
            return Some(stringify(message));
        }
        if let Some(first) = self.errors.as_ref().and_then(|errs| errs.first()) {
            if let Some(inner) = first.get("message") {
                return Some(stringify(inner));
            }
            return Some(stringify(first));
        }
        None
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
