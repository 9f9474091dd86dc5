use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Caller-supplied parameter values keyed by parameter name
pub type ParameterValueMap = BTreeMap<String, Value>;

/// Static identity of a provider kind, unique within a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ProviderDescriptor {
    pub name: &'static str,
}

impl ProviderDescriptor {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl fmt::Display for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Shape of value a parameter accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParameterKind {
    String,
    Path,
    StringMap,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterKind::String => "string",
            ParameterKind::Path => "path",
            ParameterKind::StringMap => "string-map",
        };
        f.write_str(name)
    }
}

/// One bindable parameter on a handler.
///
/// Providers expose these as an ordered sequence. Downstream authorization
/// checks depend on the position of each entry, so new parameters are only
/// ever appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    pub name: &'static str,
    pub kind: ParameterKind,
}

impl ParameterDescriptor {
    pub const fn new(name: &'static str, kind: ParameterKind) -> Self {
        Self { name, kind }
    }
}

/// Name of the JSON kind of `value`, for error messages
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_serializes_kind_in_kebab_case() {
        let descriptor = ParameterDescriptor::new("Configurations", ParameterKind::StringMap);
        let value = serde_json::to_value(descriptor).unwrap();
        assert_eq!(value, json!({ "name": "Configurations", "kind": "string-map" }));
    }

    #[test]
    fn test_json_kind_names() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!(3)), "number");
        assert_eq!(json_kind(&json!({})), "object");
    }
}
