//! TOON encoding.
//!
//! The encoder walks a [`Value`] tree and emits indentation-significant
//! lines. Arrays pick one of three shapes:
//!
//! - **inline** for all-primitive arrays: `tags[2]: reading,gaming`
//! - **tabular** for arrays of like-shaped objects: `items[2]{sku,qty}:`
//!   followed by one delimited row per object
//! - **list** for everything else: `items[2]:` followed by `- ` items
//!
//! Output carries no trailing spaces and no trailing newline, and object
//! keys are emitted in insertion order.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{encode, toon, EncodeOptions};
//!
//! let value = toon!({
//!     "user": { "id": 123, "tags": ["reading", "gaming"] }
//! });
//!
//! let text = encode(&value, &EncodeOptions::default()).unwrap();
//! assert_eq!(text, "user:\n  id: 123\n  tags[2]: reading,gaming");
//! ```

use crate::error::Result;
use crate::lexical::{encode_key, encode_string};
use crate::options::{Delimiter, EncodeOptions};
use crate::value::Value;

/// Encodes a value tree as TOON text.
///
/// Non-finite numbers render as `null`; callers that need the normalized
/// tree itself should go through [`Value::normalize`] first.
///
/// # Errors
///
/// Returns an error only for invalid options; well-formed values always
/// encode.
pub fn encode(value: &Value, options: &EncodeOptions) -> Result<String> {
    options.validate()?;
    let mut encoder = Encoder {
        out: String::with_capacity(256),
        options,
    };
    encoder.emit_root(value);
    Ok(encoder.out)
}

struct Encoder<'a> {
    out: String,
    options: &'a EncodeOptions,
}

impl Encoder<'_> {
    fn line(&mut self, cols: usize, text: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..cols {
            self.out.push(' ');
        }
        self.out.push_str(text);
    }

    fn emit_root(&mut self, value: &Value) {
        match value {
            Value::Object(map) => {
                if !map.is_empty() {
                    self.emit_object(map, 0, self.options.delimiter);
                }
            }
            Value::Array(arr) => {
                self.emit_array(0, "", None, arr, self.options.delimiter, self.options.indent);
            }
            primitive => {
                let token = primitive_token(primitive, self.options.delimiter);
                self.line(0, &token);
            }
        }
    }

    fn emit_object(&mut self, map: &crate::Map, cols: usize, delimiter: Delimiter) {
        for (key, value) in map.iter() {
            self.emit_entry(key, value, cols, delimiter);
        }
    }

    fn emit_entry(&mut self, key: &str, value: &Value, cols: usize, delimiter: Delimiter) {
        let k = encode_key(key);
        match value {
            Value::Object(obj) if obj.is_empty() => self.line(cols, &format!("{k}:")),
            Value::Object(obj) => {
                self.line(cols, &format!("{k}:"));
                self.emit_object(obj, cols + self.options.indent, delimiter);
            }
            Value::Array(arr) => {
                self.emit_array(cols, "", Some(&k), arr, delimiter, cols + self.options.indent);
            }
            primitive => {
                let token = primitive_token(primitive, delimiter);
                self.line(cols, &format!("{k}: {token}"));
            }
        }
    }

    /// Emits an array header (optionally behind a `- ` prefix) and its body.
    ///
    /// `body_cols` is where tabular rows or list items land; callers pick it
    /// because list-item first fields push their block one extra level down.
    fn emit_array(
        &mut self,
        cols: usize,
        prefix: &str,
        key: Option<&str>,
        arr: &[Value],
        delimiter: Delimiter,
        body_cols: usize,
    ) {
        let head = self.header(key, arr.len(), delimiter);
        if arr.is_empty() {
            self.line(cols, &format!("{prefix}{head}:"));
            return;
        }

        let delim = delimiter.as_char().to_string();

        if arr.iter().all(Value::is_primitive) {
            let joined = arr
                .iter()
                .map(|v| primitive_token(v, delimiter))
                .collect::<Vec<_>>()
                .join(&delim);
            self.line(cols, &format!("{prefix}{head}: {joined}"));
            return;
        }

        if let Some(fields) = tabular_fields(arr) {
            let field_list = fields
                .iter()
                .map(|f| encode_key(f))
                .collect::<Vec<_>>()
                .join(&delim);
            self.line(cols, &format!("{prefix}{head}{{{field_list}}}:"));
            for element in arr {
                if let Value::Object(obj) = element {
                    let row = fields
                        .iter()
                        .map(|f| primitive_token(obj.get(f).unwrap_or(&Value::Null), delimiter))
                        .collect::<Vec<_>>()
                        .join(&delim);
                    self.line(body_cols, &row);
                }
            }
            return;
        }

        self.line(cols, &format!("{prefix}{head}:"));
        for element in arr {
            self.emit_list_item(body_cols, element, delimiter);
        }
    }

    fn emit_list_item(&mut self, cols: usize, element: &Value, delimiter: Delimiter) {
        let indent = self.options.indent;
        match element {
            // Nested arrays carry their own delimiter, defaulting to comma.
            Value::Array(arr) => {
                self.emit_array(cols, "- ", None, arr, Delimiter::Comma, cols + indent);
            }
            Value::Object(obj) if obj.is_empty() => self.line(cols, "-"),
            Value::Object(obj) => {
                let mut entries = obj.iter();
                let (first_key, first_value) = entries.next().expect("object is non-empty");
                let fk = encode_key(first_key);
                let mut follow_cols = cols + indent;
                match first_value {
                    Value::Object(inner) if inner.is_empty() => {
                        self.line(cols, &format!("- {fk}:"));
                    }
                    Value::Object(inner) => {
                        self.line(cols, &format!("- {fk}:"));
                        self.emit_object(inner, cols + 2 * indent, Delimiter::Comma);
                    }
                    Value::Array(arr) => {
                        // An array header opening the field list pushes the
                        // remaining fields two levels below the item.
                        self.emit_array(
                            cols,
                            "- ",
                            Some(&fk),
                            arr,
                            Delimiter::Comma,
                            cols + 2 * indent,
                        );
                        if array_has_block(arr) {
                            follow_cols = cols + 2 * indent;
                        }
                    }
                    primitive => {
                        let token = primitive_token(primitive, Delimiter::Comma);
                        self.line(cols, &format!("- {fk}: {token}"));
                    }
                }
                for (key, value) in entries {
                    self.emit_entry(key, value, follow_cols, Delimiter::Comma);
                }
            }
            primitive => {
                let token = primitive_token(primitive, delimiter);
                self.line(cols, &format!("- {token}"));
            }
        }
    }

    fn header(&self, key: Option<&str>, len: usize, delimiter: Delimiter) -> String {
        let marker = if self.options.length_marker.is_some() {
            "#"
        } else {
            ""
        };
        format!(
            "{}[{marker}{len}{}]",
            key.unwrap_or(""),
            delimiter.header_suffix()
        )
    }
}

fn primitive_token(value: &Value, delimiter: Delimiter) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => encode_string(s, delimiter),
        Value::Array(_) | Value::Object(_) => {
            unreachable!("containers are emitted by their own shapes")
        }
    }
}

fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    n.to_string()
}

/// Whether the array renders as a block (tabular rows or list items) rather
/// than inline on its header line.
fn array_has_block(arr: &[Value]) -> bool {
    !arr.is_empty() && !arr.iter().all(Value::is_primitive)
}

/// Tabular shape applies when every element is an object sharing the first
/// element's keys in the same order, with primitive values throughout.
fn tabular_fields(arr: &[Value]) -> Option<Vec<&String>> {
    let first = match arr.first()? {
        Value::Object(obj) if !obj.is_empty() => obj,
        _ => return None,
    };
    if !first.values().all(Value::is_primitive) {
        return None;
    }
    let fields: Vec<&String> = first.keys().collect();
    for element in &arr[1..] {
        let obj = match element {
            Value::Object(obj) => obj,
            _ => return None,
        };
        if obj.len() != fields.len() {
            return None;
        }
        if !obj.keys().zip(fields.iter()).all(|(k, f)| k == *f) {
            return None;
        }
        if !obj.values().all(Value::is_primitive) {
            return None;
        }
    }
    Some(fields)
}
