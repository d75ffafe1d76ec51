//! JSON Merge Patch (RFC 7386) application and generation.

use crate::json_equal::equal_unordered;
use crate::json_sort::{key_cmp, sorted_members};
use crate::Value;

/// Applies `patch` to `target`, consuming the target and returning the
/// merged document.
///
/// A non-object patch replaces the target wholesale. Otherwise the target
/// is coerced to an object, a `null` patch member deletes the matching key,
/// and any other member merges recursively; merged-in keys move to the end
/// of the member list. Returns `None` only when duplicating a patch subtree
/// exceeds the depth limit.
pub fn merge_patch(target: Value, patch: &Value) -> Option<Value> {
    merge(target, patch, false)
}

/// Like [`merge_patch`], matching target keys through an ASCII case fold.
pub fn merge_patch_ignore_case(target: Value, patch: &Value) -> Option<Value> {
    merge(target, patch, true)
}

fn merge(target: Value, patch: &Value, ignore_case: bool) -> Option<Value> {
    let patch_members = match patch.as_object() {
        Some(members) => members,
        None => return patch.duplicate(),
    };
    let mut target = if target.is_object() {
        target
    } else {
        Value::Object(Vec::new())
    };
    for (key, patch_value) in patch_members {
        if patch_value.is_null() {
            if ignore_case {
                target.remove_key_ignore_case(key);
            } else {
                target.remove_key(key);
            }
        } else {
            let existing = if ignore_case {
                target.remove_key_ignore_case(key)
            } else {
                target.remove_key(key)
            }
            .unwrap_or(Value::Null);
            let replacement = merge(existing, patch_value, ignore_case)?;
            target.push_member(key.clone(), replacement);
        }
    }
    Some(target)
}

/// Generates the merge patch turning `from` into `to`.
///
/// Returns `None` when the two documents already match (an empty `{}` patch
/// is never emitted). When either side is not an object, the patch is `to`
/// itself.
pub fn generate_merge_patch(from: &Value, to: &Value) -> Option<Value> {
    generate(from, to, false)
}

/// Like [`generate_merge_patch`], matching keys through an ASCII case fold.
pub fn generate_merge_patch_ignore_case(from: &Value, to: &Value) -> Option<Value> {
    generate(from, to, true)
}

fn generate(from: &Value, to: &Value, ignore_case: bool) -> Option<Value> {
    let (from_members, to_members) = match (from.as_object(), to.as_object()) {
        (Some(f), Some(t)) => (f, t),
        _ => return to.duplicate(),
    };
    let from_sorted = sorted_members(from_members, ignore_case);
    let to_sorted = sorted_members(to_members, ignore_case);
    let mut patch = Value::Object(Vec::new());
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
            std::cmp::Ordering::Less => {
                patch.push_member(from_sorted[i].0.to_string(), Value::Null);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                patch.push_member(to_sorted[j].0.to_string(), to_sorted[j].1.duplicate()?);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                if !equal_unordered(from_sorted[i].1, to_sorted[j].1, ignore_case) {
                    if let Some(sub) = generate(from_sorted[i].1, to_sorted[j].1, ignore_case) {
                        patch.push_member(to_sorted[j].0.to_string(), sub);
                    }
                }
                i += 1;
                j += 1;
            }
        }
    }
    match patch.as_object() {
        Some(members) if members.is_empty() => None,
        _ => Some(patch),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::parse;
    use crate::encoder::to_string;
    use crate::json_equal::structural_equal;

    fn merged(target: &str, patch: &str) -> String {
        let target = parse(target).unwrap();
        let patch = parse(patch).unwrap();
        to_string(&merge_patch(target, &patch).unwrap())
    }

    #[test]
    fn null_members_delete_keys() {
        assert_eq!(
            merged(r#"{"a":1,"b":2}"#, r#"{"a":null,"c":3}"#),
            r#"{"b":2,"c":3}"#
        );
    }

    #[test]
    fn rfc_7386_example_table() {
        // A selection of the example rows from RFC 7386, section 3.
        assert_eq!(merged(r#"{"a":"b"}"#, r#"{"a":"c"}"#), r#"{"a":"c"}"#);
        assert_eq!(merged(r#"{"a":"b"}"#, r#"{"b":"c"}"#), r#"{"a":"b","b":"c"}"#);
        assert_eq!(merged(r#"{"a":"b"}"#, r#"{"a":null}"#), "{}");
        assert_eq!(merged(r#"{"a":["b"]}"#, r#"{"a":"c"}"#), r#"{"a":"c"}"#);
        assert_eq!(merged(r#"{"a":"c"}"#, r#"{"a":["b"]}"#), r#"{"a":["b"]}"#);
        assert_eq!(merged(r#"["a","b"]"#, r#"["c","d"]"#), r#"["c","d"]"#);
        assert_eq!(merged(r#"{"a":"b"}"#, r#"["c"]"#), r#"["c"]"#);
        assert_eq!(merged(r#"{"a":"foo"}"#, "null"), "null");
        assert_eq!(merged(r#"{"a":"foo"}"#, r#""bar""#), r#""bar""#);
        assert_eq!(merged(r#"{"e":null}"#, r#"{"a":1}"#), r#"{"e":null,"a":1}"#);
        assert_eq!(merged("[1,2]", r#"{"a":"b","c":null}"#), r#"{"a":"b"}"#);
        assert_eq!(merged("{}", r#"{"a":{"bb":{"ccc":null}}}"#), r#"{"a":{"bb":{}}}"#);
    }

    #[test]
    fn merge_recurses_into_objects() {
        assert_eq!(
            merged(
                r#"{"title":"Goodbye!","author":{"givenName":"John","familyName":"Doe"}}"#,
                r#"{"title":"Hello!","author":{"familyName":null}}"#
            ),
            r#"{"title":"Hello!","author":{"givenName":"John"}}"#
        );
    }

    #[test]
    fn merged_keys_move_to_the_end() {
        assert_eq!(
            merged(r#"{"a":1,"b":2}"#, r#"{"a":9}"#),
            r#"{"b":2,"a":9}"#
        );
    }

    #[test]
    fn null_object_patch_is_identity() {
        assert_eq!(merged(r#"{"a":1}"#, "{}"), r#"{"a":1}"#);
    }

    #[test]
    fn generation_returns_none_for_equal_documents() {
        let a = parse(r#"{"x":{"y":1}}"#).unwrap();
        let b = parse(r#"{"x":{"y":1}}"#).unwrap();
        assert!(generate_merge_patch(&a, &b).is_none());
    }

    #[test]
    fn generation_emits_null_for_dropped_keys() {
        let from = parse(r#"{"a":1,"b":2}"#).unwrap();
        let to = parse(r#"{"b":2,"c":3}"#).unwrap();
        let patch = generate_merge_patch(&from, &to).unwrap();
        assert_eq!(to_string(&patch), r#"{"a":null,"c":3}"#);
    }

    #[test]
    fn generation_replaces_non_object_sides_wholesale() {
        let from = parse(r#"{"a":1}"#).unwrap();
        let to = parse("[1,2]").unwrap();
        assert_eq!(to_string(&generate_merge_patch(&from, &to).unwrap()), "[1,2]");
        let from = parse("7").unwrap();
        let to = parse(r#"{"a":1}"#).unwrap();
        assert_eq!(to_string(&generate_merge_patch(&from, &to).unwrap()), r#"{"a":1}"#);
    }

    #[test]
    fn generated_patches_round_trip() {
        let cases = [
            (r#"{"a":1,"b":{"x":[1,2]},"c":"s"}"#, r#"{"b":{"x":[1,2,3]},"c":"s","d":4}"#),
            (r#"{"nested":{"deep":{"er":1}}}"#, r#"{"nested":{"deep":{"er":2}}}"#),
            (r#"{"a":1}"#, "[3]"),
            ("null", r#"{"k":"v"}"#),
        ];
        for (from, to) in cases {
            let from = parse(from).unwrap();
            let to = parse(to).unwrap();
            let patch = generate_merge_patch(&from, &to).unwrap();
            let merged = merge_patch(from, &patch).unwrap();
            assert!(structural_equal(&merged, &to), "got {}", to_string(&merged));
        }
    }
}
