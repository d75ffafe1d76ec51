//! Structural equality for JSON values.
//!
//! Two comparators exist, differing only in how object members are walked:
//! [`deep_equal`] requires members in identical stored order, while
//! [`structural_equal`] compares key-sorted views. The patch engine's `test`
//! operation and the diff generators use the sorted form.

use crate::json_sort::{key_cmp, sorted_members};
use crate::value::int_projection;
use crate::Value;

/// Epsilon comparison of two doubles, scaled by the larger magnitude.
pub(crate) fn compare_double(a: f64, b: f64) -> bool {
    let max = a.abs().max(b.abs());
    (a - b).abs() <= max * f64::EPSILON
}

/// Numbers are equal when their doubles are epsilon-equal and their
/// saturating integer projections agree.
pub(crate) fn numbers_equal(a: f64, b: f64) -> bool {
    int_projection(a) == int_projection(b) && compare_double(a, b)
}

/// Deep equality with objects compared in stored member order.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    equal_ordered(a, b, false)
}

/// Like [`deep_equal`], matching object keys through an ASCII case fold.
pub fn deep_equal_ignore_case(a: &Value, b: &Value) -> bool {
    equal_ordered(a, b, true)
}

/// Deep equality with object members compared by key, regardless of stored
/// order. Duplicate keys are compared positionally within the sorted views.
pub fn structural_equal(a: &Value, b: &Value) -> bool {
    equal_unordered(a, b, false)
}

/// Like [`structural_equal`], matching object keys through an ASCII case fold.
pub fn structural_equal_ignore_case(a: &Value, b: &Value) -> bool {
    equal_unordered(a, b, true)
}

fn scalars_equal(a: &Value, b: &Value) -> Option<bool> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(true),
        (Value::Bool(x), Value::Bool(y)) => Some(x == y),
        (Value::Number(x), Value::Number(y)) => Some(numbers_equal(*x, *y)),
        (Value::String(x), Value::String(y)) => Some(x == y),
        (Value::Raw(x), Value::Raw(y)) => Some(x == y),
        _ => None,
    }
}

fn equal_ordered(a: &Value, b: &Value, ignore_case: bool) -> bool {
    if let Some(result) = scalars_equal(a, b) {
        return result;
    }
    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys)
                    .all(|(x, y)| equal_ordered(x, y, ignore_case))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs.iter().zip(ys).all(|((ka, va), (kb, vb))| {
                    key_cmp(ka, kb, ignore_case).is_eq() && equal_ordered(va, vb, ignore_case)
                })
        }
        _ => false,
    }
}

pub(crate) fn equal_unordered(a: &Value, b: &Value, ignore_case: bool) -> bool {
    if let Some(result) = scalars_equal(a, b) {
        return result;
    }
    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys)
                    .all(|(x, y)| equal_unordered(x, y, ignore_case))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            if xs.len() != ys.len() {
                return false;
            }
            let xs = sorted_members(xs, ignore_case);
            let ys = sorted_members(ys, ignore_case);
            xs.iter().zip(&ys).all(|((ka, va), (kb, vb))| {
                key_cmp(ka, kb, ignore_case).is_eq() && equal_unordered(va, vb, ignore_case)
            })
        }
        _ => false,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(members: Vec<(&str, Value)>) -> Value {
        Value::Object(
            members
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn scalar_kinds_do_not_cross() {
        assert!(!deep_equal(&Value::Number(0.0), &Value::Null));
        assert!(!deep_equal(&Value::Bool(false), &Value::Number(0.0)));
        assert!(!deep_equal(
            &Value::String("x".into()),
            &Value::Raw("x".into())
        ));
    }

    #[test]
    fn numbers_compare_with_epsilon() {
        let a = 0.1 + 0.2;
        assert!(deep_equal(&Value::Number(a), &Value::Number(0.30000000000000004)));
        assert!(!deep_equal(&Value::Number(1.0), &Value::Number(1.0000001)));
    }

    #[test]
    fn integer_projections_must_agree() {
        // Adjacent doubles near 2^63: epsilon-equal, but one saturates to
        // i64::MAX and the other does not.
        let a = (1u64 << 63) as f64;
        let b = 9223372036854774784.0;
        assert!(compare_double(a, b));
        assert!(!numbers_equal(a, b));
    }

    #[test]
    fn arrays_compare_pairwise() {
        let a = Value::Array(vec![Value::Number(1.0), Value::Bool(true)]);
        let b = Value::Array(vec![Value::Number(1.0), Value::Bool(true)]);
        let c = Value::Array(vec![Value::Number(1.0)]);
        assert!(deep_equal(&a, &b));
        assert!(!deep_equal(&a, &c));
    }

    #[test]
    fn ordered_compare_requires_member_order() {
        let a = obj(vec![("x", Value::Number(1.0)), ("y", Value::Number(2.0))]);
        let b = obj(vec![("y", Value::Number(2.0)), ("x", Value::Number(1.0))]);
        assert!(!deep_equal(&a, &b));
        assert!(structural_equal(&a, &b));
    }

    #[test]
    fn case_fold_applies_to_keys_not_values() {
        let a = obj(vec![("Key", Value::String("Word".into()))]);
        let b = obj(vec![("key", Value::String("Word".into()))]);
        let c = obj(vec![("key", Value::String("word".into()))]);
        assert!(deep_equal_ignore_case(&a, &b));
        assert!(!deep_equal_ignore_case(&a, &c));
        assert!(!deep_equal(&a, &b));
    }

    #[test]
    fn nested_structures_recurse() {
        let a = obj(vec![("a", Value::Array(vec![obj(vec![("b", Value::Null)])]))]);
        let b = obj(vec![("a", Value::Array(vec![obj(vec![("b", Value::Null)])]))]);
        assert!(deep_equal(&a, &b));
        assert!(structural_equal(&a, &b));
    }

    #[test]
    fn member_count_must_match() {
        let a = obj(vec![("x", Value::Number(1.0))]);
        let b = obj(vec![("x", Value::Number(1.0)), ("y", Value::Number(2.0))]);
        assert!(!structural_equal(&a, &b));
    }
}
