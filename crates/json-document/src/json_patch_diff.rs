//! JSON Patch (RFC 6902) generation: a structural diff of two documents.
//!
//! The generated batch is minimal-ish, not LCS-optimal: array positions are
//! compared pairwise, tail growth appends through `/-`, tail shrinkage
//! removes at a constant index, and objects are merge-walked in key order.
//! Applying the batch to `from` in order yields `to`.

use crate::json_equal::numbers_equal;
use crate::json_pointer::escape_token;
use crate::json_sort::{key_cmp, sorted_members};
use crate::Value;

/// Generates a patch array converting `from` into `to`.
pub fn generate_patches(from: &Value, to: &Value) -> Value {
    let mut patches = Value::Array(Vec::new());
    create_patches(&mut patches, "", from, to, false);
    patches
}

/// Like [`generate_patches`], matching object keys through an ASCII case fold.
pub fn generate_patches_ignore_case(from: &Value, to: &Value) -> Value {
    let mut patches = Value::Array(Vec::new());
    create_patches(&mut patches, "", from, to, true);
    patches
}

/// Appends one operation object to a patch array, duplicating `value` into
/// it. Fails only when the duplication depth limit is exceeded.
pub fn add_patch_to_array(
    patches: &mut Value,
    operation: &str,
    path: &str,
    value: Option<&Value>,
) -> bool {
    compose_patch(patches, operation, path, None, value)
}

fn compose_patch(
    patches: &mut Value,
    operation: &str,
    path: &str,
    suffix: Option<&str>,
    value: Option<&Value>,
) -> bool {
    let full_path = match suffix {
        Some(suffix) => format!("{path}/{}", escape_token(suffix)),
        None => path.to_string(),
    };
    let mut members = vec![
        ("op".to_string(), Value::String(operation.to_string())),
        ("path".to_string(), Value::String(full_path)),
    ];
    if let Some(value) = value {
        match value.duplicate() {
            Some(copy) => members.push(("value".to_string(), copy)),
            None => return false,
        }
    }
    patches.push(Value::Object(members))
}

fn create_patches(patches: &mut Value, path: &str, from: &Value, to: &Value, ignore_case: bool) {
    if !from.same_kind(to) {
        compose_patch(patches, "replace", path, None, Some(to));
        return;
    }
    match (from, to) {
        (Value::Bool(a), Value::Bool(b)) => {
            if a != b {
                compose_patch(patches, "replace", path, None, Some(to));
            }
        }
        (Value::Number(a), Value::Number(b)) => {
            if !numbers_equal(*a, *b) {
                compose_patch(patches, "replace", path, None, Some(to));
            }
        }
        (Value::String(a), Value::String(b)) => {
            if a != b {
                compose_patch(patches, "replace", path, None, Some(to));
            }
        }
        (Value::Array(from_items), Value::Array(to_items)) => {
            let shared = from_items.len().min(to_items.len());
            for index in 0..shared {
                let item_path = format!("{path}/{index}");
                create_patches(
                    patches,
                    &item_path,
                    &from_items[index],
                    &to_items[index],
                    ignore_case,
                );
            }
            // Extra source tail: each removal happens at the same index,
            // because earlier removals shift the rest left.
            let cut = to_items.len().to_string();
            for _ in to_items.len()..from_items.len() {
                compose_patch(patches, "remove", path, Some(&cut), None);
            }
            for item in to_items.iter().skip(from_items.len()) {
                compose_patch(patches, "add", path, Some("-"), Some(item));
            }
        }
        (Value::Object(from_members), Value::Object(to_members)) => {
            let from_sorted = sorted_members(from_members, ignore_case);
            let to_sorted = sorted_members(to_members, ignore_case);
            let mut i = 0;
            let mut j = 0;
            while i < from_sorted.len() || j < to_sorted.len() {
                let order = if i >= from_sorted.len() {
                    std::cmp::Ordering::Greater
                } else if j >= to_sorted.len() {
                    std::cmp::Ordering::Less
                } else {
                    key_cmp(from_sorted[i].0, to_sorted[j].0, ignore_case)
                };
                match order {
                    std::cmp::Ordering::Equal => {
                        let member_path = format!("{path}/{}", escape_token(to_sorted[j].0));
                        create_patches(
                            patches,
                            &member_path,
                            from_sorted[i].1,
                            to_sorted[j].1,
                            ignore_case,
                        );
                        i += 1;
                        j += 1;
                    }
                    std::cmp::Ordering::Less => {
                        compose_patch(patches, "remove", path, Some(from_sorted[i].0), None);
                        i += 1;
                    }
                    std::cmp::Ordering::Greater => {
                        compose_patch(
                            patches,
                            "add",
                            path,
                            Some(to_sorted[j].0),
                            Some(to_sorted[j].1),
                        );
                        j += 1;
                    }
                }
            }
        }
        // Equal-kind null and raw values produce no operation.
        _ => {}
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
