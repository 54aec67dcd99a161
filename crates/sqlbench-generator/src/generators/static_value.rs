//! Static value generator and YAML to Value conversion.

use serde_yaml::Value as YamlValue;
use sqlbench_core::Value;
use std::collections::HashMap;

/// Convert a YAML value (from a `static` or `one_of` rule) to a Value.
///
/// YAML sequences have no counterpart in the value model and are carried
/// as nested structs keyed by position.
pub fn yaml_to_value(yaml: &YamlValue) -> Value {
    match yaml {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int64(i)
            } else if let Some(u) = n.as_u64() {
                Value::Uint64(u)
            } else if let Some(f) = n.as_f64() {
                Value::Float64(f)
            } else {
                Value::String(n.to_string())
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(arr) => {
            let values: HashMap<String, Value> = arr
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), yaml_to_value(v)))
                .collect();
            Value::Struct(values)
        }
        YamlValue::Mapping(map) => {
            let values: HashMap<String, Value> = map
                .iter()
                .filter_map(|(k, v)| {
                    let key = match k {
                        YamlValue::String(s) => s.clone(),
                        _ => k.as_str().map(|s| s.to_string())?,
                    };
                    Some((key, yaml_to_value(v)))
                })
                .collect();
            Value::Struct(values)
        }
    }
}
