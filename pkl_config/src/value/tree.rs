//! Conversion of rendered module output into figment's value tree.
//!
//! The evaluator emits a JSON document; figment consumes nested
//! dictionaries. Null handling follows the language's binding rules: a null
//! property or map-entry value stays observable as an empty value, so
//! optional fields bind to `None`, while null sequence elements are dropped
//! so element types need not admit null. Empty collections are preserved.

use figment::value::{Empty, Num, Tag, Value};

/// Convert a rendered JSON document into a figment value.
pub(crate) fn value_from_json(json: serde_json::Value) -> Value {
    let tag = Tag::Default;
    match json {
        serde_json::Value::Null => Value::Empty(tag, Empty::None),
        serde_json::Value::Bool(b) => Value::Bool(tag, b),
        serde_json::Value::Number(n) => number_value(n),
        serde_json::Value::String(s) => Value::String(tag, s),
        serde_json::Value::Array(items) => Value::Array(
            tag,
            items
                .into_iter()
                .filter(|item| !item.is_null())
                .map(value_from_json)
                .collect(),
        ),
        serde_json::Value::Object(entries) => Value::Dict(
            tag,
            entries
                .into_iter()
                .map(|(key, value)| (key, value_from_json(value)))
                .collect(),
        ),
    }
}

fn number_value(number: serde_json::Number) -> Value {
    let tag = Tag::Default;
    if let Some(int) = number.as_i64() {
        Value::Num(tag, int.into())
    } else if let Some(int) = number.as_u64() {
        Value::Num(tag, Num::U64(int))
    } else {
        Value::Num(tag, Num::F64(number.as_f64().unwrap_or(f64::NAN)))
    }
}

#[cfg(test)]
mod tests {
    use figment::value::{Empty, Num, Value};
    use rstest::rstest;
    use serde_json::json;

    use super::value_from_json;

    fn expect_dict(value: Value) -> figment::value::Dict {
        match value {
            Value::Dict(_, dict) => dict,
            other => panic!("expected a dict, got {other:?}"),
        }
    }

    #[rstest]
    fn null_property_values_stay_observable() {
        let dict = expect_dict(value_from_json(json!({"owner": null, "port": 8080})));
        assert!(matches!(dict.get("owner"), Some(Value::Empty(_, Empty::None))));
        assert!(matches!(dict.get("port"), Some(Value::Num(_, _))));
    }

    #[rstest]
    fn null_sequence_elements_are_dropped() {
        let dict = expect_dict(value_from_json(json!({"hosts": ["one", null, "two"]})));
        let Some(Value::Array(_, items)) = dict.get("hosts") else {
            panic!("expected an array");
        };
        let rendered: Vec<&str> = items
            .iter()
            .filter_map(|item| match item {
                Value::String(_, s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(rendered, ["one", "two"]);
    }

    #[rstest]
    fn empty_collections_are_preserved() {
        let dict = expect_dict(value_from_json(json!({"tags": [], "limits": {}})));
        assert!(matches!(dict.get("tags"), Some(Value::Array(_, items)) if items.is_empty()));
        assert!(matches!(dict.get("limits"), Some(Value::Dict(_, entries)) if entries.is_empty()));
    }

    #[rstest]
    fn nested_objects_stay_nested() {
        let dict = expect_dict(value_from_json(json!({"server": {"port": 8080}})));
        let Some(Value::Dict(_, server)) = dict.get("server") else {
            panic!("expected a nested dict");
        };
        assert!(matches!(server.get("port"), Some(Value::Num(_, _))));
    }

    #[rstest]
    fn floats_survive_conversion() {
        let dict = expect_dict(value_from_json(json!({"ratio": 0.25})));
        let Some(Value::Num(_, Num::F64(ratio))) = dict.get("ratio") else {
            panic!("expected a float entry");
        };
        assert!((ratio - 0.25).abs() < f64::EPSILON);
    }
}
