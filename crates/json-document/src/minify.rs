//! In-place minifier: strips whitespace and comments from JSON text.
//!
//! `//…` and `/*…*/` comments are consumed even though RFC 8259 has no
//! comment syntax; this is a convenience for JSON-with-comments inputs. The
//! pass is idempotent: minifying already-minified text changes nothing.

/// Minifies `json` in place.
pub fn minify(json: &mut String) {
    let mut bytes = std::mem::take(json).into_bytes();
    minify_bytes(&mut bytes);
    // Only whole ASCII bytes are ever removed, so the buffer stays UTF-8.
    *json = String::from_utf8(bytes).unwrap_or_default();
}

/// Minifies a byte buffer in place, truncating it to the written length.
///
/// A single forward pass with separate read and write cursors. String
/// literals are copied verbatim, honoring `\"` and `\\` escapes. A `/` that
/// starts no comment is dropped, like any whitespace; copying it could fuse
/// two stray slashes into a comment marker on a second pass.
pub fn minify_bytes(bytes: &mut Vec<u8>) {
    let len = bytes.len();
    let mut read = 0;
    let mut write = 0;
    while read < len {
        match bytes[read] {
            b' ' | b'\t' | b'\r' | b'\n' => read += 1,
            b'/' => {
                if read + 1 < len && bytes[read + 1] == b'/' {
                    read += 2;
                    while read < len && bytes[read] != b'\n' {
                        read += 1;
                    }
                } else if read + 1 < len && bytes[read + 1] == b'*' {
                    read += 2;
                    while read < len {
                        if bytes[read] == b'*' && read + 1 < len && bytes[read + 1] == b'/' {
                            read += 2;
                            break;
                        }
                        read += 1;
                    }
                } else {
                    read += 1;
                }
            }
            b'"' => {
                bytes[write] = b'"';
                write += 1;
                read += 1;
                while read < len && bytes[read] != b'"' {
                    if bytes[read] == b'\\' && read + 1 < len {
                        bytes[write] = bytes[read];
                        bytes[write + 1] = bytes[read + 1];
                        write += 2;
                        read += 2;
                    } else {
                        bytes[write] = bytes[read];
                        write += 1;
                        read += 1;
                    }
                }
                if read < len {
                    bytes[write] = b'"';
                    write += 1;
                    read += 1;
                }
            }
            byte => {
                bytes[write] = byte;
                write += 1;
                read += 1;
            }
        }
    }
    bytes.truncate(write);
}

// ── Tests ─────────────────────────────────────────────────────────────────
