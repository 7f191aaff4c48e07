//! JSON merge for layered configuration.

use serde_json::Value;

/// Merge overlay values into the base.
///
/// Objects merge key by key; any other overlay value replaces the base value,
/// so arrays and provider names are never combined across layers.
pub(super) fn merge_json_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base_slot, overlay_value) => {
            *base_slot = overlay_value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nested_objects_merge_and_scalars_replace() {
        let mut base = json!({
            "llm": { "provider": "openai", "config": { "model": "gpt-4o", "apiKey": "a" } },
            "vectorStore": { "provider": "qdrant", "config": { "tags": ["a", "b"] } }
        });
        let overlay = json!({
            "llm": { "config": { "model": "gpt-4o-mini" } },
            "vectorStore": { "config": { "tags": ["c"] } },
            "enableGraph": true
        });
        merge_json_values(&mut base, &overlay);
        assert_eq!(
            base,
            json!({
                "llm": { "provider": "openai", "config": { "model": "gpt-4o-mini", "apiKey": "a" } },
                "vectorStore": { "provider": "qdrant", "config": { "tags": ["c"] } },
                "enableGraph": true
            })
        );
    }
}
