//! JSON text encoder: compact or tab-indented output.
//!
//! Numbers are printed with 15 significant digits when that round-trips to
//! the identical double, and with 17 otherwise; the round-trip check runs
//! through the crate's own decimal converter, so decode/encode stay mutually
//! consistent. Formatting is locale-independent throughout.

use crate::decoder::parse_decimal;
use crate::value::int_projection;
use crate::Value;

/// Compact serialization, no insignificant whitespace.
pub fn to_string(value: &Value) -> String {
    print_growable(value, false)
}

/// Indented serialization: objects break across lines with one horizontal
/// tab per nesting level; array items are separated by `", "`.
pub fn to_string_pretty(value: &Value) -> String {
    print_growable(value, true)
}

/// Serializes into a caller-supplied buffer, returning the number of bytes
/// written, or `None` once the buffer's capacity is exceeded. The buffer
/// contents up to the failure point are unspecified.
pub fn print_preallocated(value: &Value, buf: &mut [u8], pretty: bool) -> Option<usize> {
    let mut printer = PrintBuffer {
        out: Out::Fixed { buf, len: 0 },
        pretty,
        depth: 0,
    };
    if !printer.write_value(value) {
        return None;
    }
    match printer.out {
        Out::Fixed { len, .. } => Some(len),
        Out::Growable(_) => None,
    }
}

fn print_growable(value: &Value, pretty: bool) -> String {
    let mut printer = PrintBuffer {
        out: Out::Growable(Vec::with_capacity(256)),
        pretty,
        depth: 0,
    };
    printer.write_value(value);
    match printer.out {
        Out::Growable(bytes) => String::from_utf8(bytes).unwrap_or_default(),
        Out::Fixed { .. } => String::new(),
    }
}

enum Out<'a> {
    Growable(Vec<u8>),
    Fixed { buf: &'a mut [u8], len: usize },
}

struct PrintBuffer<'a> {
    out: Out<'a>,
    pretty: bool,
    depth: usize,
}

impl PrintBuffer<'_> {
    /// Every write funnels through here; only the fixed buffer can refuse.
    fn put(&mut self, bytes: &[u8]) -> bool {
        match &mut self.out {
            Out::Growable(vec) => {
                vec.extend_from_slice(bytes);
                true
            }
            Out::Fixed { buf, len } => {
                if *len + bytes.len() > buf.len() {
                    return false;
                }
                buf[*len..*len + bytes.len()].copy_from_slice(bytes);
                *len += bytes.len();
                true
            }
        }
    }

    fn put_byte(&mut self, byte: u8) -> bool {
        self.put(&[byte])
    }

    fn put_tabs(&mut self, count: usize) -> bool {
        for _ in 0..count {
            if !self.put_byte(b'\t') {
                return false;
            }
        }
        true
    }

    fn write_value(&mut self, value: &Value) -> bool {
        match value {
            Value::Null => self.put(b"null"),
            Value::Bool(true) => self.put(b"true"),
            Value::Bool(false) => self.put(b"false"),
            Value::Number(n) => {
                let text = format_number(*n);
                self.put(text.as_bytes())
            }
            Value::String(s) => self.write_string(s),
            Value::Raw(fragment) => self.put(fragment.as_bytes()),
            Value::Array(items) => self.write_array(items),
            Value::Object(members) => self.write_object(members),
        }
    }

    fn write_string(&mut self, s: &str) -> bool {
        if !self.put_byte(b'"') {
            return false;
        }
        for &byte in s.as_bytes() {
            let ok = match byte {
                b'"' => self.put(b"\\\""),
                b'\\' => self.put(b"\\\\"),
                0x08 => self.put(b"\\b"),
                0x0C => self.put(b"\\f"),
                b'\n' => self.put(b"\\n"),
                b'\r' => self.put(b"\\r"),
                b'\t' => self.put(b"\\t"),
                byte if byte < 0x20 => {
                    const HEX: &[u8; 16] = b"0123456789abcdef";
                    let escape = [
                        b'\\',
                        b'u',
                        b'0',
                        b'0',
                        HEX[usize::from(byte >> 4)],
                        HEX[usize::from(byte & 0x0F)],
                    ];
                    self.put(&escape)
                }
                byte => self.put_byte(byte),
            };
            if !ok {
                return false;
            }
        }
        self.put_byte(b'"')
    }

    fn write_array(&mut self, items: &[Value]) -> bool {
        if !self.put_byte(b'[') {
            return false;
        }
        self.depth += 1;
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                let separator: &[u8] = if self.pretty { b", " } else { b"," };
                if !self.put(separator) {
                    return false;
                }
            }
            if !self.write_value(item) {
                return false;
            }
        }
        self.depth -= 1;
        self.put_byte(b']')
    }

    fn write_object(&mut self, members: &[(String, Value)]) -> bool {
        if !self.put_byte(b'{') {
            return false;
        }
        if self.pretty && !self.put_byte(b'\n') {
            return false;
        }
        self.depth += 1;
        for (index, (key, value)) in members.iter().enumerate() {
            if self.pretty && !self.put_tabs(self.depth) {
                return false;
            }
            if !self.write_string(key) {
                return false;
            }
            if !self.put_byte(b':') {
                return false;
            }
            if self.pretty && !self.put_byte(b'\t') {
                return false;
            }
            if !self.write_value(value) {
                return false;
            }
            if index + 1 < members.len() && !self.put_byte(b',') {
                return false;
            }
            if self.pretty && !self.put_byte(b'\n') {
                return false;
            }
        }
        self.depth -= 1;
        if self.pretty && !self.put_tabs(self.depth) {
            return false;
        }
        self.put_byte(b'}')
    }
}

// ── Number formatting ─────────────────────────────────────────────────────

fn format_number(number: f64) -> String {
    if number.is_nan() || number.is_infinite() {
        return "null".to_string();
    }
    let projected = int_projection(number);
    if number == projected as f64 {
        return projected.to_string();
    }
    let short = format_g(number, 15);
    let (reparsed, consumed) = parse_decimal(short.as_bytes());
    if consumed == short.len() && reparsed == number {
        short
    } else {
        format_g(number, 17)
    }
}

/// Renders `value` the way C's `%1.<precision>g` does: `precision`
/// significant digits, fixed or scientific notation by decimal exponent,
/// trailing zeros removed, exponent at least two digits with a sign.
fn format_g(value: f64, precision: usize) -> String {
    // `{:.*e}` rounds to precision-1 fractional mantissa digits, which is
    // exactly `precision` significant digits.
    let rendered = format!("{:.*e}", precision - 1, value);
    let Some(e_at) = rendered.find('e') else {
        return rendered;
    };
    let mantissa = &rendered[..e_at];
    let exponent: i32 = rendered[e_at + 1..].parse().unwrap_or(0);

    let negative = mantissa.starts_with('-');
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    let mut out = String::new();
    if negative {
        out.push('-');
    }

    if exponent < -4 || exponent >= precision as i32 {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        out.push('e');
        out.push(sign);
        let magnitude = exponent.unsigned_abs();
        if magnitude < 10 {
            out.push('0');
        }
        out.push_str(&magnitude.to_string());
    } else if exponent < 0 {
        out.push_str("0.");
        for _ in exponent + 1..0 {
            out.push('0');
        }
        out.push_str(digits);
    } else {
        let int_len = (exponent as usize + 1).min(digits.len());
        out.push_str(&digits[..int_len]);
        for _ in int_len..exponent as usize + 1 {
            out.push('0');
        }
        if digits.len() > exponent as usize + 1 {
            out.push('.');
            out.push_str(&digits[exponent as usize + 1..]);
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────
