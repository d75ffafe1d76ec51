//! JSON Pointer (RFC 6901): evaluation against a value tree, plus the
//! reverse lookup from a node back to its pointer.

use crate::Value;

/// Decodes one reference token: `~1` becomes `/`, then `~0` becomes `~`.
///
/// The order matters: `~01` must decode to `~1`, not `/`.
pub fn unescape_token(token: &str) -> String {
    if !token.contains('~') {
        return token.to_string();
    }
    token.replace("~1", "/").replace("~0", "~")
}

/// Encodes a key as a reference token: `~` becomes `~0`, `/` becomes `~1`.
pub fn escape_token(token: &str) -> String {
    if !token.contains('~') && !token.contains('/') {
        return token.to_string();
    }
    token.replace('~', "~0").replace('/', "~1")
}

/// Splits a pointer into decoded reference tokens. `""` addresses the root;
/// any other pointer must begin with `/`.
pub fn parse_pointer(pointer: &str) -> Option<Vec<String>> {
    if pointer.is_empty() {
        return Some(Vec::new());
    }
    let rest = pointer.strip_prefix('/')?;
    Some(rest.split('/').map(unescape_token).collect())
}

/// Joins decoded tokens back into a pointer string, escaping each.
pub fn format_pointer(tokens: &[String]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push('/');
        out.push_str(&escape_token(token));
    }
    out
}

/// Decodes an array-index token: decimal digits only, with no leading zero
/// except for `0` itself.
pub(crate) fn array_index(token: &str) -> Option<usize> {
    let bytes = token.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    token.parse().ok()
}

fn key_matches(key: &str, token: &str, ignore_case: bool) -> bool {
    if ignore_case {
        key.eq_ignore_ascii_case(token)
    } else {
        key == token
    }
}

pub(crate) fn resolve<'a>(
    root: &'a Value,
    tokens: &[String],
    ignore_case: bool,
) -> Option<&'a Value> {
    let mut current = root;
    for token in tokens {
        current = match current {
            Value::Array(items) => items.get(array_index(token)?)?,
            Value::Object(members) => {
                members
                    .iter()
                    .find(|(key, _)| key_matches(key, token, ignore_case))
                    .map(|(_, value)| value)?
            }
            _ => return None,
        };
    }
    Some(current)
}

pub(crate) fn resolve_mut<'a>(
    root: &'a mut Value,
    tokens: &[String],
    ignore_case: bool,
) -> Option<&'a mut Value> {
    let mut current = root;
    for token in tokens {
        current = match current {
            Value::Array(items) => items.get_mut(array_index(token)?)?,
            Value::Object(members) => {
                members
                    .iter_mut()
                    .find(|(key, _)| key_matches(key, token, ignore_case))
                    .map(|(_, value)| value)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Resolves a pointer against `root`. Returns `None` for unresolvable paths
/// and for malformed pointers.
pub fn get_pointer<'a>(root: &'a Value, pointer: &str) -> Option<&'a Value> {
    resolve(root, &parse_pointer(pointer)?, false)
}

/// Like [`get_pointer`], matching object keys through an ASCII case fold.
/// Array-index tokens are unaffected.
pub fn get_pointer_ignore_case<'a>(root: &'a Value, pointer: &str) -> Option<&'a Value> {
    resolve(root, &parse_pointer(pointer)?, true)
}

/// Builds the pointer leading from `root` to `target`, matching by node
/// identity. Object keys are escaped on the way back up.
pub fn find_pointer_to(root: &Value, target: &Value) -> Option<String> {
    if std::ptr::eq(root, target) {
        return Some(String::new());
    }
    match root {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if let Some(suffix) = find_pointer_to(item, target) {
                    return Some(format!("/{index}{suffix}"));
                }
            }
            None
        }
        Value::Object(members) => {
            for (key, item) in members {
                if let Some(suffix) = find_pointer_to(item, target) {
                    return Some(format!("/{}{}", escape_token(key), suffix));
                }
            }
            None
        }
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
