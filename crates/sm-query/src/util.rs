//! Value helpers exposed on the namespace

use std::cmp::Ordering;

use crate::iter::Iterable;
use crate::{Result, Value};

/// Copy entries of each source into `target`, filling only keys that are
/// absent, `null` or `undefined` there.
///
/// With `deep`, object and array entries are replaced by fresh containers
/// merged recursively from the source. Targets that are neither objects
/// nor arrays are left alone.
pub fn extend<'a>(target: &'a mut Value, sources: &[Value], deep: bool) -> &'a mut Value {
    for source in sources {
        extend_one(target, source, deep);
    }
    target
}

fn extend_one(target: &mut Value, source: &Value, deep: bool) {
    for (name, value) in own_entries(source) {
        if deep && matches!(value, Value::Object(_) | Value::Array(_)) {
            let fresh = match value {
                Value::Array(_) => Value::Array(Vec::new()),
                _ => Value::Object(Default::default()),
            };
            if let Some(slot) = slot_mut(target, &name, fresh) {
                extend_one(slot, &value, deep);
            }
        } else if target.get(&name).is_none_or(Value::is_nullish) {
            slot_mut(target, &name, value);
        }
    }
}

/// Own entries of a source: object keys as stored (`length` is an ordinary
/// key here), array and string slots by index
fn own_entries(source: &Value) -> Vec<(String, Value)> {
    match source {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        Value::Array(_) | Value::String(_) | Value::Collection(_) => source
            .enumeration()
            .keys()
            .filter_map(|key| source.item(&key).map(|value| (key.to_string(), value)))
            .collect(),
        _ => Vec::new(),
    }
}

/// Store `value` under `name` and hand back the stored slot. Arrays only
/// take existing indices or the one just past the end; other keys are
/// skipped.
fn slot_mut<'a>(target: &'a mut Value, name: &str, value: Value) -> Option<&'a mut Value> {
    match target {
        Value::Object(map) => {
            map.insert(name.to_string(), value);
            map.get_mut(name)
        }
        Value::Array(items) => {
            let index = name.parse::<usize>().ok()?;
            match index.cmp(&items.len()) {
                Ordering::Less => items[index] = value,
                Ordering::Equal => items.push(value),
                Ordering::Greater => return None,
            }
            items.get_mut(index)
        }
        _ => None,
    }
}

/// Strip leading and trailing whitespace
pub fn trim(s: &str) -> &str {
    s.trim()
}

/// Parse JSON text into a [`Value`]
pub fn parse(json: &str) -> Result<Value> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    Ok(parsed.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Object;

    fn object(entries: &[(&str, Value)]) -> Value {
        Value::Object(entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect::<Object>())
    }

    #[test]
    fn test_extend_fills_missing_and_nullish() {
        let mut target = object(&[("a", Value::from(1)), ("b", Value::Null)]);
        let source = object(&[("a", Value::from(9)), ("b", Value::from(2)), ("c", Value::from(3))]);
        extend(&mut target, &[source], false);
        assert_eq!(
            target,
            object(&[("a", Value::from(1)), ("b", Value::from(2)), ("c", Value::from(3))])
        );
    }

    #[test]
    fn test_extend_copies_nested_values() {
        let inner = object(&[("x", Value::from(1))]);
        let mut target = object(&[]);
        extend(&mut target, &[object(&[("inner", inner.clone())])], false);
        assert_eq!(target.get("inner"), Some(&inner));
    }

    #[test]
    fn test_extend_deep_rebuilds_containers() {
        let mut target = object(&[("nested", object(&[("keep", Value::from(1))]))]);
        let source = object(&[
            ("nested", object(&[("add", Value::from(2))])),
            ("list", Value::Array(vec![Value::from("a"), Value::from("b")])),
        ]);
        extend(&mut target, &[source], true);

        // Deep mode replaces the existing container before merging
        assert_eq!(target.get("nested"), Some(&object(&[("add", Value::from(2))])));
        assert_eq!(
            target.get("list"),
            Some(&Value::Array(vec![Value::from("a"), Value::from("b")]))
        );
    }

    #[test]
    fn test_extend_treats_length_as_plain_key() {
        let mut target = object(&[]);
        let source = object(&[("length", Value::from(2)), ("a", Value::from(1))]);
        extend(&mut target, &[source.clone()], false);
        assert_eq!(target, source);
        assert_eq!(target.get("0"), None);
    }

    #[test]
    fn test_extend_array_skips_far_indices() {
        let mut target = Value::Array(Vec::new());
        let source = object(&[
            ("0", Value::from("a")),
            ("1", Value::from("b")),
            ("1000000000000000000", Value::from(1)),
            ("name", Value::from(2)),
        ]);
        extend(&mut target, &[source], false);
        assert_eq!(target, Value::Array(vec![Value::from("a"), Value::from("b")]));
    }

    #[test]
    fn test_extend_ignores_scalar_target() {
        let mut target = Value::from(5);
        extend(&mut target, &[object(&[("a", Value::from(1))])], false);
        assert_eq!(target, Value::from(5));
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse("[1, true]").unwrap(), Value::Array(vec![Value::from(1), Value::from(true)]));
        assert_eq!(parse("null").unwrap(), Value::Null);
        assert!(parse("{oops").is_err());
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim("  a b \n"), "a b");
    }
}
