//! Rendering: generated value graph → JSON value.
//!
//! Beans become objects whose first key is `$type`, followed by the fields in
//! declaration order (serde_json's `preserve_order`). A bean that is already
//! being rendered further up the path (a cycle) becomes `{"$ref": "<Type>"}`.
//! Numbers that do not fit JSON's safe range (`big_integer`, `big_decimal`)
//! and dates are rendered as strings.

use mock_core::{BeanRef, MockValue};
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Render a generated value as JSON.
pub fn to_json(value: &MockValue) -> Value {
    let mut path = HashSet::new();
    render(value, &mut path)
}

fn render(value: &MockValue, path: &mut HashSet<usize>) -> Value {
    match value {
        MockValue::Null => Value::Null,
        MockValue::Bool(b) => json!(b),
        MockValue::Char(c) => json!(c.to_string()),
        MockValue::Byte(v) => json!(v),
        MockValue::Short(v) => json!(v),
        MockValue::Int(v) => json!(v),
        MockValue::Long(v) => json!(v),
        MockValue::Float(v) => json!(v),
        MockValue::Double(v) => json!(v),
        MockValue::BigInteger(v) => json!(v.to_string()),
        MockValue::BigDecimal(v) => json!(v.to_string()),
        MockValue::Date(dt) => json!(dt.to_rfc3339()),
        MockValue::String(s) | MockValue::Enum(s) => json!(s),
        MockValue::List(items) | MockValue::Set(items) => {
            Value::Array(items.iter().map(|item| render(item, path)).collect())
        }
        MockValue::Map(entries) => render_map(entries, path),
        MockValue::Bean(bean) => render_bean(bean, path),
    }
}

fn render_bean(bean: &BeanRef, path: &mut HashSet<usize>) -> Value {
    if !path.insert(bean.id()) {
        return json!({ "$ref": bean.type_name() });
    }

    let instance = bean.borrow();
    let mut obj = Map::new();
    obj.insert("$type".to_string(), json!(instance.type_name()));
    for (name, field) in instance.fields() {
        obj.insert(name.to_string(), render(field, path));
    }
    drop(instance);

    path.remove(&bean.id());
    Value::Object(obj)
}

/// Maps with scalar keys become objects; anything else a list of entries.
fn render_map(entries: &[(MockValue, MockValue)], path: &mut HashSet<usize>) -> Value {
    let keys: Option<Vec<String>> = entries.iter().map(|(k, _)| key_string(k)).collect();

    match keys {
        Some(keys) => {
            let mut obj = Map::new();
            for (key, (_, value)) in keys.into_iter().zip(entries) {
                obj.insert(key, render(value, path));
            }
            Value::Object(obj)
        }
        None => Value::Array(
            entries
                .iter()
                .map(|(k, v)| json!({ "key": render(k, path), "value": render(v, path) }))
                .collect(),
        ),
    }
}

fn key_string(key: &MockValue) -> Option<String> {
    match key {
        MockValue::String(s) | MockValue::Enum(s) => Some(s.clone()),
        MockValue::Char(c) => Some(c.to_string()),
        MockValue::Bool(b) => Some(b.to_string()),
        MockValue::Byte(v) => Some(v.to_string()),
        MockValue::Short(v) => Some(v.to_string()),
        MockValue::Int(v) => Some(v.to_string()),
        MockValue::Long(v) => Some(v.to_string()),
        MockValue::BigInteger(v) => Some(v.to_string()),
        _ => None,
    }
}

/// Break the reference cycles of every bean reachable from a value.
pub fn release(value: &MockValue) {
    match value {
        MockValue::Bean(bean) => bean.release_graph(),
        MockValue::List(items) | MockValue::Set(items) => items.iter().for_each(release),
        MockValue::Map(entries) => entries.iter().for_each(|(k, v)| {
            release(k);
            release(v);
        }),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mock_core::BeanInstance;

    #[test]
    fn test_scalars() {
        assert_eq!(to_json(&MockValue::Int(7)), json!(7));
        assert_eq!(to_json(&MockValue::Char('x')), json!("x"));
        assert_eq!(
            to_json(&MockValue::BigInteger(170_141_183_460_469_231_731_687_303_715_884_105_727)),
            json!("170141183460469231731687303715884105727")
        );
        let dt = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            to_json(&MockValue::Date(dt)),
            json!("2020-01-02T03:04:05+00:00")
        );
    }

    #[test]
    fn test_cycle_becomes_ref() {
        let node = BeanRef::new(BeanInstance::new(
            "Node",
            vec![
                ("next".to_string(), MockValue::Null),
                ("value".to_string(), MockValue::Int(1)),
            ],
        ));
        node.set("next", MockValue::Bean(node.clone()));

        let rendered = to_json(&MockValue::Bean(node.clone()));
        assert_eq!(
            rendered,
            json!({ "$type": "Node", "next": { "$ref": "Node" }, "value": 1 })
        );
        release(&MockValue::Bean(node));
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let bean = BeanRef::new(BeanInstance::new(
            "Point",
            vec![
                ("y".to_string(), MockValue::Int(2)),
                ("x".to_string(), MockValue::Int(1)),
            ],
        ));
        let text = serde_json::to_string(&to_json(&MockValue::Bean(bean))).unwrap();
        assert_eq!(text, r#"{"$type":"Point","y":2,"x":1}"#);
    }

    #[test]
    fn test_shared_bean_without_cycle_is_rendered_twice() {
        let leaf = BeanRef::new(BeanInstance::new(
            "Leaf",
            vec![("count".to_string(), MockValue::Int(1))],
        ));
        let pair = MockValue::List(vec![
            MockValue::Bean(leaf.clone()),
            MockValue::Bean(leaf),
        ]);
        let leaf_json = json!({ "$type": "Leaf", "count": 1 });
        assert_eq!(to_json(&pair), json!([leaf_json.clone(), leaf_json]));
    }

    #[test]
    fn test_maps() {
        let scalar_keys = MockValue::Map(vec![(MockValue::Int(1), MockValue::Bool(true))]);
        assert_eq!(to_json(&scalar_keys), json!({ "1": true }));

        let list_keys = MockValue::Map(vec![(
            MockValue::List(vec![MockValue::Int(1)]),
            MockValue::Null,
        )]);
        assert_eq!(
            to_json(&list_keys),
            json!([{ "key": [1], "value": null }])
        );
    }
}
