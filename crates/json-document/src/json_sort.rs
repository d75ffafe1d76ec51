//! Stable ordering of object members by key.

use std::cmp::Ordering;

use crate::Value;

/// Compares two keys byte-wise, optionally through an ASCII case fold.
///
/// The fold is ASCII-only (`tolower` semantics), never a Unicode fold.
pub(crate) fn key_cmp(left: &str, right: &str, ignore_case: bool) -> Ordering {
    if ignore_case {
        left.bytes()
            .map(|b| b.to_ascii_lowercase())
            .cmp(right.bytes().map(|b| b.to_ascii_lowercase()))
    } else {
        left.as_bytes().cmp(right.as_bytes())
    }
}

/// Sorts an object's members by key. Stable, top-level members only; any
/// other kind of value is left untouched.
pub fn sort_object_keys(value: &mut Value) {
    sort_with(value, false);
}

/// Like [`sort_object_keys`], comparing keys through an ASCII case fold.
pub fn sort_object_keys_ignore_case(value: &mut Value) {
    sort_with(value, true);
}

fn sort_with(value: &mut Value, ignore_case: bool) {
    if let Value::Object(members) = value {
        members.sort_by(|(a, _), (b, _)| key_cmp(a, b, ignore_case));
    }
}

/// A key-sorted view of object members. The members themselves are not
/// moved; the diff and comparison layers walk these views instead of
/// mutating their inputs.
pub(crate) fn sorted_members(
    members: &[(String, Value)],
    ignore_case: bool,
) -> Vec<(&str, &Value)> {
    let mut view: Vec<(&str, &Value)> = members.iter().map(|(k, v)| (k.as_str(), v)).collect();
    view.sort_by(|(a, _), (b, _)| key_cmp(a, b, ignore_case));
    view
}

// ── Tests ─────────────────────────────────────────────────────────────────
