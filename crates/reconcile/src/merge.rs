use crate::{ReconcileError, Result};
use serde_json::{Map, Value};

/// Merge two body texts, falling back instead of failing.
///
/// - fresh is not JSON: the old text is returned unchanged
/// - old is not JSON, or either side is not an object: the fresh text is
///   returned unchanged
#[must_use]
pub fn merge_bodies(fresh: &str, old: &str) -> String {
    match try_merge_bodies(fresh, old) {
        Ok(merged) => merged,
        Err(err @ ReconcileError::MalformedFresh(_)) => {
            log::debug!("Keeping stored body: {err}");
            old.to_string()
        }
        Err(err) => {
            log::debug!("Keeping generated body: {err}");
            fresh.to_string()
        }
    }
}

/// Merge two body texts, reporting why a merge was not possible
pub fn try_merge_bodies(fresh: &str, old: &str) -> Result<String> {
    let mut fresh_value: Value =
        serde_json::from_str(fresh).map_err(ReconcileError::MalformedFresh)?;
    let old_value: Value = serde_json::from_str(old).map_err(ReconcileError::MalformedOld)?;

    match (&mut fresh_value, &old_value) {
        (Value::Object(fresh_map), Value::Object(old_map)) => merge_objects(fresh_map, old_map),
        _ => return Err(ReconcileError::NotAnObject),
    }

    serde_json::to_string_pretty(&fresh_value).map_err(ReconcileError::Render)
}

/// Merge `old` into `fresh` in place. Non-object pairs are left untouched.
pub fn merge_values(fresh: &mut Value, old: &Value) {
    if let (Value::Object(fresh_map), Value::Object(old_map)) = (fresh, old) {
        merge_objects(fresh_map, old_map);
    }
}

fn merge_objects(fresh: &mut Map<String, Value>, old: &Map<String, Value>) {
    for (key, fresh_value) in fresh.iter_mut() {
        let Some(old_value) = old.get(key) else {
            continue;
        };

        match (fresh_value, old_value) {
            (Value::Object(fresh_inner), Value::Object(old_inner)) => {
                merge_objects(fresh_inner, old_inner);
            }
            // A newly introduced nested structure never collapses to a stale scalar.
            (Value::Object(_), _) => {}
            (slot, old_value) => *slot = old_value.clone(),
        }
    }
}
