//! Dotted-path editing over nested records.
//!
//! Paths are computed once, against the pre-exclusion record, and applied
//! best-effort afterwards: by then an addressed field may be gone, or the
//! record may use the shallower key-values shape. Both cases are handled
//! here rather than by the callers.

use serde_json::Value;

/// Outcome of resolving a segment chain against a record.
enum Step<'a> {
    Found(&'a mut Value),
    Missing,
    TypeMismatch,
}

/// Outcome of blanking one slot under a resolved parent.
enum Assign {
    Done,
    Missing,
    TypeMismatch,
}

/// Blank the value addressed by a dotted path with an empty string.
///
/// Resolves all but the last segment and assigns (normalized shape); if a
/// scalar shows up where a container was expected, the addressed leaf
/// sits one level shallower (key-values shape) and the last *two*
/// segments collapse into one. Lookup failures on either attempt are
/// silent no-ops: a path that does not exist is never created.
pub fn clear_path(record: &mut Value, path: &str) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, parent_segments)) = segments.split_last() else {
        return;
    };

    let first_attempt = match descend(record, parent_segments) {
        Step::Found(parent) => blank_slot(parent, last),
        Step::Missing => return,
        Step::TypeMismatch => Assign::TypeMismatch,
    };
    if !matches!(first_attempt, Assign::TypeMismatch) {
        return;
    }

    // Key-values shape: the leaf lives one level shallower.
    if segments.len() < 2 {
        return;
    }
    let key = segments[segments.len() - 2];
    if let Step::Found(parent) = descend(record, &segments[..segments.len() - 2]) {
        let _ = blank_slot(parent, key);
    }
}

/// Remove every occurrence of an attribute key anywhere in the record,
/// whole subtree included.
pub fn delete_key(record: &mut Value, key: &str) {
    match record {
        Value::Object(map) => {
            map.shift_remove(key);
            for (_field, child) in map.iter_mut() {
                delete_key(child, key);
            }
        }
        Value::Array(items) => {
            for child in items.iter_mut() {
                delete_key(child, key);
            }
        }
        _ => {}
    }
}

fn descend<'a>(root: &'a mut Value, segments: &[&str]) -> Step<'a> {
    let mut current = root;
    for segment in segments {
        current = match current {
            Value::Object(map) => match map.get_mut(*segment) {
                Some(child) => child,
                None => return Step::Missing,
            },
            Value::Array(items) => match segment.parse::<usize>() {
                Ok(index) => match items.get_mut(index) {
                    Some(child) => child,
                    None => return Step::Missing,
                },
                Err(_) => return Step::TypeMismatch,
            },
            _ => return Step::TypeMismatch,
        };
    }
    Step::Found(current)
}

fn blank_slot(parent: &mut Value, key: &str) -> Assign {
    match parent {
        Value::Object(map) => match map.get_mut(key) {
            Some(slot) => {
                *slot = Value::String(String::new());
                Assign::Done
            }
            None => Assign::Missing,
        },
        Value::Array(items) => match key.parse::<usize>() {
            Ok(index) => match items.get_mut(index) {
                Some(slot) => {
                    *slot = Value::String(String::new());
                    Assign::Done
                }
                None => Assign::Missing,
            },
            Err(_) => Assign::TypeMismatch,
        },
        _ => Assign::TypeMismatch,
    }
}
