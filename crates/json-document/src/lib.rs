//! In-memory JSON documents.
//!
//! Parse untrusted JSON text into an owned [`Value`] tree, edit it, resolve
//! JSON Pointers (RFC 6901) against it, apply and generate JSON Patches
//! (RFC 6902) and JSON Merge Patches (RFC 7386), and print it back out,
//! compact or indented. A standalone minifier strips whitespace and
//! JSON-with-comments comments from raw text.
//!
//! ```
//! use json_document::{apply_patches, generate_patches, parse, to_string};
//!
//! let mut doc = parse(r#"{"a":[1,2,3],"b":{"x":1}}"#)?;
//! let target = parse(r#"{"a":[9,3],"b":{"x":1,"y":2}}"#)?;
//! let patch = generate_patches(&doc, &target);
//! apply_patches(&mut doc, &patch).unwrap();
//! assert_eq!(to_string(&doc), r#"{"a":[9,3],"b":{"x":1,"y":2}}"#);
//! # Ok::<(), json_document::JsonError>(())
//! ```

pub mod decoder;
pub mod encoder;
pub mod json_equal;
pub mod json_merge_patch;
pub mod json_patch;
pub mod json_patch_diff;
pub mod json_pointer;
pub mod json_sort;
pub mod minify;
pub mod value;

pub use decoder::{parse, parse_partial, JsonError};
pub use encoder::{print_preallocated, to_string, to_string_pretty};
pub use json_equal::{
    deep_equal, deep_equal_ignore_case, structural_equal, structural_equal_ignore_case,
};
pub use json_merge_patch::{
    generate_merge_patch, generate_merge_patch_ignore_case, merge_patch, merge_patch_ignore_case,
};
pub use json_patch::{apply_patches, apply_patches_ignore_case, PatchError};
pub use json_patch_diff::{add_patch_to_array, generate_patches, generate_patches_ignore_case};
pub use json_pointer::{
    escape_token, find_pointer_to, format_pointer, get_pointer, get_pointer_ignore_case,
    parse_pointer, unescape_token,
};
pub use json_sort::{sort_object_keys, sort_object_keys_ignore_case};
pub use minify::{minify, minify_bytes};
pub use value::Value;

/// Maximum `[` / `{` depth the decoder will enter.
pub const NESTING_LIMIT: usize = 1000;

/// Maximum recursion depth for deep duplication, a guard against degenerate
/// hand-built trees.
pub const DUPLICATION_LIMIT: usize = 10_000;
