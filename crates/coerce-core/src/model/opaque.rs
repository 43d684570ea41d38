use std::fmt;

/// Capability implemented by values outside the closed kind universe
///
/// Opaque values can be carried through the engine but never coerced into a
/// numeric, boolean or timestamp kind. The only thing they may offer is a
/// textual representation.
pub trait OpaqueValue: fmt::Debug + Send + Sync {
    /// Human-readable name of the foreign type (`json_object`, `complex`, ...)
    fn type_name(&self) -> &str;

    /// Textual form of the value, when it has one
    fn as_text(&self) -> Option<String> {
        None
    }
}

/// A decoded JSON object
///
/// Objects have no place in the scalar universe; their textual form is their
/// compact JSON encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonObject(pub serde_json::Map<String, serde_json::Value>);

impl OpaqueValue for JsonObject {
    fn type_name(&self) -> &str {
        "json_object"
    }

    fn as_text(&self) -> Option<String> {
        Some(serde_json::Value::Object(self.0.clone()).to_string())
    }
}
