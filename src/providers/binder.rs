//! Declared-surface parameter binding
//!
//! Each handler variant registers, at compile time, a typed setter for every
//! parameter it accepts. Binding walks that declared surface in order and
//! never looks at caller keys the surface does not name, so arbitrary input
//! cannot reach handler state the provider did not advertise.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

use super::descriptor::{ParameterDescriptor, ParameterKind, ParameterValueMap, json_kind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    #[error("parameter '{name}' expects a {expected} value, got {found}")]
    TypeMismatch {
        name: &'static str,
        expected: ParameterKind,
        found: &'static str,
    },
}

/// Value rejected by a typed setter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueMismatch {
    pub expected: ParameterKind,
    pub found: &'static str,
}

impl ValueMismatch {
    fn new(expected: ParameterKind, value: &Value) -> Self {
        Self {
            expected,
            found: json_kind(value),
        }
    }
}

/// Typed setter applying one parameter value to a handler
pub type ParameterSetter<H> = fn(&mut H, Value) -> Result<(), ValueMismatch>;

/// Outcome of the filter hook for one parameter
#[derive(Debug, Clone, PartialEq)]
pub enum FilterDecision {
    /// Assign this (possibly rewritten) value
    Accept(Value),
    /// Leave the handler field at its current value
    Veto,
}

pub struct ParameterBinding<H> {
    pub descriptor: ParameterDescriptor,
    setter: ParameterSetter<H>,
}

impl<H> ParameterBinding<H> {
    pub fn new(descriptor: ParameterDescriptor, setter: ParameterSetter<H>) -> Self {
        Self { descriptor, setter }
    }
}

impl<H> Clone for ParameterBinding<H> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor,
            setter: self.setter,
        }
    }
}

/// Ordered set of bindable parameters for handler type `H`
pub struct ParameterSurface<H> {
    bindings: Vec<ParameterBinding<H>>,
}

impl<H> ParameterSurface<H> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn with(
        mut self,
        name: &'static str,
        kind: ParameterKind,
        setter: ParameterSetter<H>,
    ) -> Self {
        self.bindings
            .push(ParameterBinding::new(ParameterDescriptor::new(name, kind), setter));
        self
    }

    pub fn descriptors(&self) -> Vec<ParameterDescriptor> {
        self.bindings.iter().map(|b| b.descriptor).collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<H> Default for ParameterSurface<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Clone for ParameterSurface<H> {
    fn clone(&self) -> Self {
        Self {
            bindings: self.bindings.clone(),
        }
    }
}

/// What a bind pass did with each key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    pub applied: Vec<&'static str>,
    pub vetoed: Vec<&'static str>,
    /// Supplied keys that were not bound: undeclared, or a case variant of
    /// a key that was
    pub ignored: Vec<String>,
}

/// Apply `values` onto `handler` through `surface`.
///
/// Parameters are visited in surface order. For each one present in `values`
/// the filter decides whether (and with what value) the setter runs.
/// Undeclared keys are recorded in the report and otherwise dropped, as is
/// any second key naming the same parameter in a different case.
///
/// Keys match exactly first, then ignoring ASCII case, since layered config
/// sources may lower-case them.
pub fn bind<H, F>(
    handler: &mut H,
    surface: &ParameterSurface<H>,
    values: &ParameterValueMap,
    mut on_each_applied: F,
) -> Result<BindReport, ParameterError>
where
    F: FnMut(&ParameterDescriptor, &Value) -> FilterDecision,
{
    let mut report = BindReport::default();
    let mut consumed: Vec<&str> = Vec::with_capacity(surface.len());

    for binding in &surface.bindings {
        let descriptor = &binding.descriptor;
        let Some((key, value)) = lookup(values, descriptor.name) else {
            continue;
        };
        consumed.push(key);

        match on_each_applied(descriptor, value) {
            FilterDecision::Accept(final_value) => {
                (binding.setter)(handler, final_value).map_err(|mismatch| {
                    ParameterError::TypeMismatch {
                        name: descriptor.name,
                        expected: mismatch.expected,
                        found: mismatch.found,
                    }
                })?;
                report.applied.push(descriptor.name);
            }
            FilterDecision::Veto => report.vetoed.push(descriptor.name),
        }
    }

    report.ignored = values
        .keys()
        .filter(|key| !consumed.contains(&key.as_str()))
        .cloned()
        .collect();

    Ok(report)
}

fn lookup<'a>(values: &'a ParameterValueMap, name: &str) -> Option<(&'a str, &'a Value)> {
    values
        .get_key_value(name)
        .or_else(|| values.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)))
        .map(|(key, value)| (key.as_str(), value))
}

pub fn string_value(value: Value) -> Result<String, ValueMismatch> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ValueMismatch::new(ParameterKind::String, &other)),
    }
}

pub fn path_value(value: Value) -> Result<PathBuf, ValueMismatch> {
    match value {
        Value::String(s) => Ok(PathBuf::from(s)),
        other => Err(ValueMismatch::new(ParameterKind::Path, &other)),
    }
}

/// JSON object whose values are all strings
pub fn string_map_value(value: Value) -> Result<BTreeMap<String, String>, ValueMismatch> {
    let Value::Object(entries) = value else {
        return Err(ValueMismatch::new(ParameterKind::StringMap, &value));
    };

    let mut map = BTreeMap::new();
    for (key, entry) in entries {
        match entry {
            Value::String(s) => {
                map.insert(key, s);
            }
            other => return Err(ValueMismatch::new(ParameterKind::StringMap, &other)),
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default)]
    struct Sample {
        a: Option<i64>,
        b: Option<i64>,
        order: Vec<&'static str>,
    }

    fn int_value(value: Value) -> Result<i64, ValueMismatch> {
        value.as_i64().ok_or_else(|| ValueMismatch {
            expected: ParameterKind::String,
            found: json_kind(&value),
        })
    }

    fn surface() -> ParameterSurface<Sample> {
        ParameterSurface::<Sample>::new()
            .with("B", ParameterKind::String, |h, v| {
                h.b = Some(int_value(v)?);
                h.order.push("B");
                Ok(())
            })
            .with("A", ParameterKind::String, |h, v| {
                h.a = Some(int_value(v)?);
                h.order.push("A");
                Ok(())
            })
    }

    fn values(pairs: &[(&str, Value)]) -> ParameterValueMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_only_declared_parameters_are_bound() {
        let mut handler = Sample::default();
        let values = values(&[("A", json!(1)), ("B", json!(2)), ("C", json!(3))]);

        let report = bind(&mut handler, &surface(), &values, |_, v| {
            FilterDecision::Accept(v.clone())
        })
        .unwrap();

        assert_eq!(handler.a, Some(1));
        assert_eq!(handler.b, Some(2));
        assert_eq!(report.ignored, vec!["C".to_string()]);
    }

    #[test]
    fn test_binding_follows_surface_order() {
        let mut handler = Sample::default();
        let values = values(&[("A", json!(1)), ("B", json!(2))]);

        let report = bind(&mut handler, &surface(), &values, |_, v| {
            FilterDecision::Accept(v.clone())
        })
        .unwrap();

        assert_eq!(handler.order, vec!["B", "A"]);
        assert_eq!(report.applied, vec!["B", "A"]);
    }

    #[test]
    fn test_veto_leaves_default() {
        let mut handler = Sample::default();
        let values = values(&[("A", json!(1)), ("B", json!(2))]);

        let report = bind(&mut handler, &surface(), &values, |d, v| {
            if d.name == "B" {
                FilterDecision::Veto
            } else {
                FilterDecision::Accept(v.clone())
            }
        })
        .unwrap();

        assert_eq!(handler.a, Some(1));
        assert_eq!(handler.b, None);
        assert_eq!(report.vetoed, vec!["B"]);
    }

    #[test]
    fn test_filter_can_rewrite_value() {
        let mut handler = Sample::default();
        let values = values(&[("A", json!(1))]);

        bind(&mut handler, &surface(), &values, |_, _| {
            FilterDecision::Accept(json!(42))
        })
        .unwrap();

        assert_eq!(handler.a, Some(42));
    }

    #[test]
    fn test_filter_sees_only_present_declared_keys() {
        let mut handler = Sample::default();
        let values = values(&[("A", json!(1)), ("Z", json!(0))]);
        let mut seen = Vec::new();

        bind(&mut handler, &surface(), &values, |d, v| {
            seen.push(d.name);
            FilterDecision::Accept(v.clone())
        })
        .unwrap();

        assert_eq!(seen, vec!["A"]);
    }

    #[test]
    fn test_type_mismatch_names_parameter() {
        let mut handler = Sample::default();
        let values = values(&[("A", json!("one"))]);

        let err = bind(&mut handler, &surface(), &values, |_, v| {
            FilterDecision::Accept(v.clone())
        })
        .unwrap_err();

        assert_eq!(
            err,
            ParameterError::TypeMismatch {
                name: "A",
                expected: ParameterKind::String,
                found: "string",
            }
        );
    }

    #[test]
    fn test_keys_match_ignoring_case() {
        let mut handler = Sample::default();
        let values = values(&[("a", json!(1)), ("c", json!(3))]);

        let report = bind(&mut handler, &surface(), &values, |_, v| {
            FilterDecision::Accept(v.clone())
        })
        .unwrap();

        assert_eq!(handler.a, Some(1));
        assert_eq!(report.ignored, vec!["c".to_string()]);
    }

    #[test]
    fn test_case_variant_of_bound_key_is_ignored() {
        let mut handler = Sample::default();
        let values = values(&[("A", json!(1)), ("a", json!(5))]);

        let report = bind(&mut handler, &surface(), &values, |_, v| {
            FilterDecision::Accept(v.clone())
        })
        .unwrap();

        assert_eq!(handler.a, Some(1));
        assert_eq!(report.applied, vec!["A"]);
        assert_eq!(report.ignored, vec!["a".to_string()]);
    }

    #[test]
    fn test_value_helpers() {
        assert_eq!(string_value(json!("x")).unwrap(), "x");
        assert_eq!(path_value(json!("/tmp")).unwrap(), PathBuf::from("/tmp"));
        assert_eq!(
            path_value(json!(true)).unwrap_err(),
            ValueMismatch {
                expected: ParameterKind::Path,
                found: "bool"
            }
        );

        let map = string_map_value(json!({ "web": "content" })).unwrap();
        assert_eq!(map["web"], "content");
        assert!(string_map_value(json!({ "web": 1 })).is_err());
        assert!(string_map_value(json!([])).is_err());
    }
}
