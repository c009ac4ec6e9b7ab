//! Deep merge of partial option trees onto defaults.

use serde_json::Value;

/// Merge every source into `dst`, left to right.
///
/// Objects merge key by key and scalars overwrite. A destination array is
/// truncated to the length of the matching source array before its elements
/// are merged, so a shorter list in the source removes trailing entries.
/// `null` in a source stands for "not provided" and never overwrites.
pub fn merge_config(dst: &mut Value, sources: &[&Value]) {
    for source in sources {
        merge_value(dst, source);
    }
}

fn merge_value(dst: &mut Value, src: &Value) {
    match (dst, src) {
        (_, Value::Null) => {}
        (Value::Object(dst_map), Value::Object(src_map)) => {
            for (key, value) in src_map {
                if value.is_null() {
                    continue;
                }
                match dst_map.get_mut(key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        dst_map.insert(key.clone(), deep_copy(value));
                    }
                }
            }
        }
        (Value::Array(dst_items), Value::Array(src_items)) => {
            dst_items.truncate(src_items.len());
            for (index, value) in src_items.iter().enumerate() {
                match dst_items.get_mut(index) {
                    Some(existing) => merge_value(existing, value),
                    None => dst_items.push(deep_copy(value)),
                }
            }
        }
        (dst, src) => *dst = deep_copy(src),
    }
}

/// Structural copy of an option tree; the result shares nothing with `value`.
pub fn deep_copy(value: &Value) -> Value {
    value.clone()
}

/// Defaults merged with the caller's partial options, in that order.
pub fn merged_with_defaults(defaults: &Value, partial: Option<&Value>) -> Value {
    let mut merged = deep_copy(defaults);
    if let Some(partial) = partial {
        merge_config(&mut merged, &[partial]);
    }
    merged
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_array_truncated_to_source_length() {
        let mut dst = json!({ "levels": [1, 2, 3, 4, 5] });
        merge_config(&mut dst, &[&json!({ "levels": [10, 20, 30] })]);
        assert_eq!(dst, json!({ "levels": [10, 20, 30] }));
    }

    #[test]
    fn test_array_elements_merge_deeply() {
        let mut dst = json!([{ "coeff": 0.5, "color": "red" }, { "coeff": 1 }]);
        merge_config(&mut dst, &[&json!([{ "color": "blue" }])]);
        assert_eq!(dst, json!([{ "coeff": 0.5, "color": "blue" }]));
    }

    #[test]
    fn test_longer_source_array_appends() {
        let mut dst = json!([1]);
        merge_config(&mut dst, &[&json!([7, 8])]);
        assert_eq!(dst, json!([7, 8]));
    }

    #[test]
    fn test_nested_objects_keep_untouched_leaves() {
        let mut dst = json!({ "line": { "color": "red", "width": 1 }, "visible": true });
        merge_config(&mut dst, &[&json!({ "line": { "width": 3 } })]);
        assert_eq!(
            dst,
            json!({ "line": { "color": "red", "width": 3 }, "visible": true })
        );
    }

    #[test]
    fn test_null_never_overwrites() {
        let mut dst = json!({ "a": 1, "b": [1, 2] });
        merge_config(&mut dst, &[&json!({ "a": null, "b": [null, 5] })]);
        assert_eq!(dst, json!({ "a": 1, "b": [1, 5] }));
    }

    #[test]
    fn test_type_mismatch_replaces() {
        let mut dst = json!({ "a": { "x": 1 } });
        merge_config(&mut dst, &[&json!({ "a": "flat" })]);
        assert_eq!(dst, json!({ "a": "flat" }));
    }

    #[test]
    fn test_sources_apply_left_to_right() {
        let mut dst = json!({ "a": 1 });
        merge_config(&mut dst, &[&json!({ "a": 2 }), &json!({ "a": 3, "b": 4 })]);
        assert_eq!(dst, json!({ "a": 3, "b": 4 }));
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let merged = merged_with_defaults(&json!({ "a": 1 }), Some(&json!({ "custom": "x" })));
        assert_eq!(merged, json!({ "a": 1, "custom": "x" }));
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let template = json!({ "levels": [1, 2] });
        let mut copy = deep_copy(&template);
        copy["levels"][0] = json!(9);
        assert_eq!(template["levels"][0], json!(1));
    }
}
