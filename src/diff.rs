use serde_json::{Map, Value};

/// One leaf that differs between two device-state documents.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldChange {
    pub path: String,
    pub old: Value,
    pub new: Value,
}

/// Leaf-level differences between two JSON documents, in dotted-path form.
/// Arrays are compared as whole values.
pub(crate) fn diff(previous: &Value, current: &Value) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    walk(previous, current, "", &mut changes);
    changes
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn walk(previous: &Value, current: &Value, prefix: &str, changes: &mut Vec<FieldChange>) {
    match (previous, current) {
        (Value::Object(prev_map), Value::Object(curr_map)) => {
            let empty = Value::Object(Map::new());
            for (key, curr_val) in curr_map {
                let path = join(prefix, key);
                match prev_map.get(key) {
                    Some(prev_val) => walk(prev_val, curr_val, &path, changes),
                    None if curr_val.is_object() => walk(&empty, curr_val, &path, changes),
                    None => changes.push(FieldChange {
                        path,
                        old: Value::Null,
                        new: curr_val.clone(),
                    }),
                }
            }
            for (key, prev_val) in prev_map {
                if !curr_map.contains_key(key) {
                    changes.push(FieldChange {
                        path: join(prefix, key),
                        old: prev_val.clone(),
                        new: Value::Null,
                    });
                }
            }
        }
        (prev, curr) if prev != curr => changes.push(FieldChange {
            path: prefix.to_string(),
            old: prev.clone(),
            new: curr.clone(),
        }),
        _ => {}
    }
}
