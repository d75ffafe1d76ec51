//! JSON Patch (RFC 6902) application.
//!
//! A patch document is a JSON array of operation objects, each with an `op`
//! and a `path`, decoded straight off the value tree. A batch stops at the
//! first failing operation; operations already applied stay applied.

use thiserror::Error;

use crate::json_equal::equal_unordered;
use crate::json_pointer::{array_index, parse_pointer, resolve, resolve_mut};
use crate::Value;

/// Why a patch batch stopped.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PatchError {
    #[error("patch document is not an array")]
    NotAnArray,
    #[error("operation has a missing or unknown \"op\"")]
    InvalidOperation,
    #[error("operation has a missing or invalid \"path\"")]
    MissingPath,
    #[error("operation is missing \"value\"")]
    MissingValue,
    #[error("operation has a missing or invalid \"from\"")]
    MissingFrom,
    #[error("path cannot be resolved in the document")]
    PathNotFound,
    #[error("invalid array index in path")]
    InvalidIndex,
    #[error("test operation failed")]
    FailedTest,
    #[error("duplication depth limit exceeded")]
    DepthLimit,
}

/// Applies every operation in `patches` to `doc`, in order.
pub fn apply_patches(doc: &mut Value, patches: &Value) -> Result<(), PatchError> {
    apply_with(doc, patches, false)
}

/// Like [`apply_patches`], matching object keys (in operation objects,
/// pointers, and targets) through an ASCII case fold.
pub fn apply_patches_ignore_case(doc: &mut Value, patches: &Value) -> Result<(), PatchError> {
    apply_with(doc, patches, true)
}

fn apply_with(doc: &mut Value, patches: &Value, ignore_case: bool) -> Result<(), PatchError> {
    let operations = patches.as_array().ok_or(PatchError::NotAnArray)?;
    for operation in operations {
        apply_one(doc, operation, ignore_case)?;
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OpCode {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

fn member<'a>(operation: &'a Value, key: &str, ignore_case: bool) -> Option<&'a Value> {
    if ignore_case {
        operation.get_ignore_case(key)
    } else {
        operation.get(key)
    }
}

fn decode_op(operation: &Value, ignore_case: bool) -> Result<OpCode, PatchError> {
    let name = member(operation, "op", ignore_case)
        .and_then(Value::as_str)
        .ok_or(PatchError::InvalidOperation)?;
    match name {
        "add" => Ok(OpCode::Add),
        "remove" => Ok(OpCode::Remove),
        "replace" => Ok(OpCode::Replace),
        "move" => Ok(OpCode::Move),
        "copy" => Ok(OpCode::Copy),
        "test" => Ok(OpCode::Test),
        _ => Err(PatchError::InvalidOperation),
    }
}

fn apply_one(doc: &mut Value, operation: &Value, ignore_case: bool) -> Result<(), PatchError> {
    let path = member(operation, "path", ignore_case)
        .and_then(Value::as_str)
        .ok_or(PatchError::MissingPath)?;
    let opcode = decode_op(operation, ignore_case)?;
    let tokens = parse_pointer(path).ok_or(PatchError::MissingPath)?;

    if opcode == OpCode::Test {
        let target = resolve(doc, &tokens, ignore_case).ok_or(PatchError::PathNotFound)?;
        let expected = member(operation, "value", ignore_case).ok_or(PatchError::MissingValue)?;
        if !equal_unordered(target, expected, ignore_case) {
            return Err(PatchError::FailedTest);
        }
        return Ok(());
    }

    // Root paths replace the document in place.
    if tokens.is_empty() {
        return match opcode {
            OpCode::Remove => {
                *doc = Value::Null;
                Ok(())
            }
            OpCode::Add | OpCode::Replace => {
                let value =
                    member(operation, "value", ignore_case).ok_or(PatchError::MissingValue)?;
                *doc = value.duplicate().ok_or(PatchError::DepthLimit)?;
                Ok(())
            }
            OpCode::Move | OpCode::Copy => Err(PatchError::PathNotFound),
            OpCode::Test => unreachable!(),
        };
    }

    if matches!(opcode, OpCode::Remove | OpCode::Replace) {
        detach_at(doc, &tokens, ignore_case)?;
        if opcode == OpCode::Remove {
            return Ok(());
        }
    }

    let value = match opcode {
        OpCode::Move => {
            let from = member(operation, "from", ignore_case)
                .and_then(Value::as_str)
                .ok_or(PatchError::MissingFrom)?;
            let from_tokens = parse_pointer(from).ok_or(PatchError::MissingFrom)?;
            if from_tokens.is_empty() {
                return Err(PatchError::PathNotFound);
            }
            detach_at(doc, &from_tokens, ignore_case)?
        }
        OpCode::Copy => {
            let from = member(operation, "from", ignore_case)
                .and_then(Value::as_str)
                .ok_or(PatchError::MissingFrom)?;
            let from_tokens = parse_pointer(from).ok_or(PatchError::MissingFrom)?;
            let source = resolve(doc, &from_tokens, ignore_case).ok_or(PatchError::PathNotFound)?;
            source.duplicate().ok_or(PatchError::DepthLimit)?
        }
        _ => member(operation, "value", ignore_case)
            .ok_or(PatchError::MissingValue)?
            .duplicate()
            .ok_or(PatchError::DepthLimit)?,
    };

    insert_at(doc, &tokens, value, ignore_case)
}

/// Detaches the value addressed by `tokens` (non-empty) from the document.
fn detach_at(doc: &mut Value, tokens: &[String], ignore_case: bool) -> Result<Value, PatchError> {
    let (last, parent_tokens) = tokens.split_last().ok_or(PatchError::PathNotFound)?;
    let parent = resolve_mut(doc, parent_tokens, ignore_case).ok_or(PatchError::PathNotFound)?;
    match parent {
        Value::Array(_) => {
            let index = array_index(last).ok_or(PatchError::PathNotFound)?;
            parent.remove_at(index).ok_or(PatchError::PathNotFound)
        }
        Value::Object(_) => {
            let detached = if ignore_case {
                parent.remove_key_ignore_case(last)
            } else {
                parent.remove_key(last)
            };
            detached.ok_or(PatchError::PathNotFound)
        }
        _ => Err(PatchError::PathNotFound),
    }
}

/// Adds `value` at `tokens` (non-empty): arrays insert before the index or
/// append for `-`; objects drop any prior binding and append.
fn insert_at(
    doc: &mut Value,
    tokens: &[String],
    value: Value,
    ignore_case: bool,
) -> Result<(), PatchError> {
    let (last, parent_tokens) = tokens.split_last().ok_or(PatchError::PathNotFound)?;
    let parent = resolve_mut(doc, parent_tokens, ignore_case).ok_or(PatchError::PathNotFound)?;
    match parent {
        Value::Array(_) => {
            if last == "-" {
                parent.push(value);
            } else {
                let index = array_index(last).ok_or(PatchError::InvalidIndex)?;
                parent.insert_at(index, value);
            }
            Ok(())
        }
        Value::Object(_) => {
            if ignore_case {
                parent.remove_key_ignore_case(last);
            } else {
                parent.remove_key(last);
            }
            parent.push_member(last.clone(), value);
            Ok(())
        }
        _ => Err(PatchError::PathNotFound),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
