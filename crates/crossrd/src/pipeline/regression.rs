use serde_json::Value;

/// Keys expected to change between otherwise identical runs.
pub const IGNORED_KEYS: &[&str] = &["last_updated"];

const PREVIEW_LEN: usize = 80;

/// Recursive comparison of a reference document against a fresh one. Object
/// keys are visited in sorted order so the report is stable.
pub fn deep_diff(reference: &Value, fresh: &Value) -> Vec<String> {
    let mut diffs = Vec::new();
    diff_into(reference, fresh, "", &mut diffs);
    diffs
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn preview(value: &Value) -> String {
    let text = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    text.chars().take(PREVIEW_LEN).collect()
}

fn diff_into(reference: &Value, fresh: &Value, path: &str, diffs: &mut Vec<String>) {
    if type_name(reference) != type_name(fresh) {
        diffs.push(format!(
            "{path}: type mismatch ({} vs {})",
            type_name(reference),
            type_name(fresh)
        ));
        return;
    }

    match (reference, fresh) {
        (Value::Object(old), Value::Object(new)) => {
            let mut keys: Vec<&String> = old.keys().chain(new.keys()).collect();
            keys.sort();
            keys.dedup();
            for key in keys {
                if IGNORED_KEYS.contains(&key.as_str()) {
                    continue;
                }
                let key_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                match (old.get(key), new.get(key)) {
                    (None, Some(_)) => diffs.push(format!("{key_path}: NEW key (not in reference)")),
                    (Some(_), None) => {
                        diffs.push(format!("{key_path}: MISSING key (was in reference)"))
                    }
                    (Some(old), Some(new)) => diff_into(old, new, &key_path, diffs),
                    (None, None) => {}
                }
            }
        }
        (Value::Array(old), Value::Array(new)) => {
            if old.len() != new.len() {
                diffs.push(format!(
                    "{path}: list length {} vs {}",
                    old.len(),
                    new.len()
                ));
            }
            for (index, (old, new)) in old.iter().zip(new).enumerate() {
                diff_into(old, new, &format!("{path}[{index}]"), diffs);
            }
        }
        _ => {
            if reference != fresh {
                diffs.push(format!(
                    "{path}: {} -> {}",
                    preview(reference),
                    preview(fresh)
                ));
            }
        }
    }
}
