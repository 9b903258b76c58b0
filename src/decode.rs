//! TOON decoding.
//!
//! A recursive descent over the scanner's line cursor. The first line picks
//! the document form (root array header, single primitive, or object);
//! array headers declare their length and the body must produce exactly
//! that count. Strict mode additionally rejects surplus items and blank
//! lines inside array bodies.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{decode, DecodeOptions, Value};
//!
//! let value = decode("user:\n  id: 123\n  tags[2]: a,b", &DecodeOptions::default()).unwrap();
//! let user = value.as_object().unwrap().get("user").unwrap();
//! assert_eq!(user.as_object().unwrap().get("id"), Some(&Value::Number(123.0)));
//! ```

use crate::error::{Error, Result};
use crate::lexical::{
    find_closing_quote, find_unquoted, parse_primitive, parse_quoted, split_delimited, unescape,
};
use crate::map::Map;
use crate::options::{DecodeOptions, Delimiter};
use crate::scanner::{scan, LineCursor, ParsedLine};
use crate::value::Value;

/// Decodes TOON text into a value tree.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] for inputs without content and the syntax
/// errors of [`Error`] for malformed documents; see the error type for the
/// full taxonomy.
pub fn decode(text: &str, options: &DecodeOptions) -> Result<Value> {
    options.validate()?;
    let scan = scan(text, options)?;
    if scan.lines.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut parser = Parser {
        cursor: LineCursor::new(scan.lines),
        blanks: scan.blanks,
        strict: options.strict,
    };
    let value = parser.parse_document()?;
    if !parser.cursor.at_end() {
        let line = parser.cursor.peek().expect("cursor is not at the end");
        return Err(Error::syntax(
            line.line_number,
            "unexpected content after document root",
        ));
    }
    Ok(value)
}

/// One parsed array header line.
#[derive(Debug)]
struct ArrayHeader {
    /// Key preceding the bracket; `None` for root arrays.
    key: Option<String>,
    len: usize,
    delimiter: Delimiter,
    /// Field list for tabular arrays.
    fields: Option<Vec<String>>,
    /// Values following the colon on the header line.
    inline: Option<String>,
    line: usize,
}

struct Parser {
    cursor: LineCursor,
    blanks: Vec<usize>,
    strict: bool,
}

impl Parser {
    fn parse_document(&mut self) -> Result<Value> {
        let first = self.cursor.peek().cloned().expect("input has content");
        if first.content.starts_with('[') && find_unquoted(&first.content, ':').is_some() {
            if let Some(header) = parse_array_header(&first.content, first.line_number)? {
                self.cursor.next();
                return self.parse_array_body(&header, 0);
            }
        }
        if self.cursor.remaining() == 1 && find_unquoted(&first.content, ':').is_none() {
            self.cursor.next();
            return parse_primitive(&first.content, first.line_number);
        }
        self.parse_object(0)
    }

    /// Reads key-value lines while the cursor stays at `depth`.
    fn parse_object(&mut self, depth: usize) -> Result<Value> {
        let mut map = Map::new();
        while let Some(line) = self.cursor.peek() {
            if line.depth != depth {
                break;
            }
            let line = line.clone();
            self.cursor.next();
            let (key, value, _) = self.parse_field(&line.content, line.line_number, depth)?;
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }

    /// Parses one field whose line content is `content`, read at base
    /// `depth`. Returns the key, the value, and whether the value was an
    /// array whose body occupied subsequent lines (list items need that to
    /// compute their follow depth).
    fn parse_field(
        &mut self,
        content: &str,
        line: usize,
        depth: usize,
    ) -> Result<(String, Value, bool)> {
        if let Some(header) = parse_array_header(content, line)? {
            let key = match &header.key {
                Some(key) => key.clone(),
                None => return Err(Error::syntax(line, "array header without a key")),
            };
            let has_block = header.inline.is_none() && header.len > 0;
            let value = self.parse_array_body(&header, depth)?;
            return Ok((key, value, has_block));
        }

        let (key, after) = if content.starts_with('"') {
            let close =
                find_closing_quote(content, 0).ok_or(Error::UnterminatedString { line })?;
            (unescape(&content[1..close], line)?, &content[close + 1..])
        } else {
            let colon = find_unquoted(content, ':').ok_or(Error::MissingColon { line })?;
            (content[..colon].trim().to_string(), &content[colon..])
        };

        let after = after.trim_start();
        if !after.starts_with(':') {
            return Err(Error::MissingColon { line });
        }
        let rest = after[1..].trim();
        if !rest.is_empty() {
            return Ok((key, parse_primitive(rest, line)?, false));
        }

        // No inline value: a nested object follows, or the object is empty.
        match self.cursor.peek() {
            Some(next) if next.depth > depth => {
                let value = self.parse_object(depth + 1)?;
                Ok((key, value, false))
            }
            _ => Ok((key, Value::Object(Map::new()), false)),
        }
    }

    /// Decodes the body belonging to `header`, whose line sat at
    /// `base_depth`. Bodies occupy lines at `base_depth + 1`.
    fn parse_array_body(&mut self, header: &ArrayHeader, base_depth: usize) -> Result<Value> {
        if let Some(inline) = &header.inline {
            if header.fields.is_some() {
                return Err(Error::InvalidHeader {
                    line: header.line,
                    msg: "tabular header carries inline values".to_string(),
                });
            }
            let tokens = split_delimited(inline, header.delimiter);
            if tokens.len() != header.len {
                return Err(Error::LengthMismatch {
                    line: header.line,
                    expected: header.len,
                    found: tokens.len(),
                });
            }
            let mut items = Vec::with_capacity(tokens.len());
            for token in &tokens {
                items.push(parse_primitive(token, header.line)?);
            }
            return Ok(Value::Array(items));
        }

        if let Some(fields) = &header.fields {
            return self.parse_tabular_rows(header, fields, base_depth);
        }

        if header.len == 0 {
            return Ok(Value::Array(Vec::new()));
        }

        self.parse_list_items(header, base_depth)
    }

    fn parse_tabular_rows(
        &mut self,
        header: &ArrayHeader,
        fields: &[String],
        base_depth: usize,
    ) -> Result<Value> {
        let row_depth = base_depth + 1;
        let mut rows = Vec::with_capacity(header.len);
        let mut first_body_line = None;

        for _ in 0..header.len {
            let line = match self.cursor.peek_at_depth(row_depth) {
                Some(line) => line.clone(),
                None => {
                    return Err(Error::LengthMismatch {
                        line: header.line,
                        expected: header.len,
                        found: rows.len(),
                    })
                }
            };
            self.cursor.next();
            first_body_line.get_or_insert(line.line_number);

            let tokens = split_delimited(&line.content, header.delimiter);
            if tokens.len() != fields.len() {
                return Err(row_width_error(
                    &line,
                    fields.len(),
                    tokens.len(),
                    header.delimiter,
                ));
            }
            let mut row = Map::with_capacity(fields.len());
            for (field, token) in fields.iter().zip(&tokens) {
                row.insert(field.clone(), parse_primitive(token, line.line_number)?);
            }
            rows.push(Value::Object(row));
        }

        if self.strict {
            if let Some(extra) = self.cursor.peek_at_depth(row_depth) {
                // A key-value or list-item line at row depth belongs to an
                // enclosing list item, not to this table.
                if find_unquoted(&extra.content, ':').is_none() && !is_list_item(&extra.content) {
                    return Err(Error::LengthMismatch {
                        line: extra.line_number,
                        expected: header.len,
                        found: header.len + 1,
                    });
                }
            }
            self.check_blanks(first_body_line, self.cursor.last_line_number())?;
        }

        Ok(Value::Array(rows))
    }

    fn parse_list_items(&mut self, header: &ArrayHeader, base_depth: usize) -> Result<Value> {
        let item_depth = base_depth + 1;
        let mut items = Vec::with_capacity(header.len);
        let mut first_body_line = None;

        for _ in 0..header.len {
            let line = match self.cursor.peek_at_depth(item_depth) {
                Some(line) if is_list_item(&line.content) => line.clone(),
                _ => {
                    return Err(Error::LengthMismatch {
                        line: header.line,
                        expected: header.len,
                        found: items.len(),
                    })
                }
            };
            self.cursor.next();
            first_body_line.get_or_insert(line.line_number);

            let remainder = list_item_remainder(&line.content);
            items.push(self.parse_list_item(remainder, item_depth, line.line_number)?);
        }

        if self.strict {
            if let Some(extra) = self.cursor.peek_at_depth(item_depth) {
                if is_list_item(&extra.content) {
                    return Err(Error::LengthMismatch {
                        line: extra.line_number,
                        expected: header.len,
                        found: header.len + 1,
                    });
                }
            }
            self.check_blanks(first_body_line, self.cursor.last_line_number())?;
        }

        Ok(Value::Array(items))
    }

    /// Decodes the content after a `- ` marker.
    fn parse_list_item(&mut self, remainder: &str, item_depth: usize, line: usize) -> Result<Value> {
        if remainder.is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        let header = parse_array_header(remainder, line)?;
        if let Some(header) = &header {
            if header.key.is_none() {
                // The item is itself an array: `- [2]: 1,2`.
                return self.parse_array_body(header, item_depth);
            }
        }

        if header.is_some() || find_unquoted(remainder, ':').is_some() {
            // First field of an object item; the remaining fields sit one
            // level below the item, or two when the first field's array
            // body occupies its own lines.
            let mut map = Map::new();
            let (key, value, has_block) = self.parse_field(remainder, line, item_depth + 1)?;
            map.insert(key, value);
            let follow_depth = if has_block {
                item_depth + 2
            } else {
                item_depth + 1
            };
            self.parse_item_fields(&mut map, follow_depth)?;
            return Ok(Value::Object(map));
        }

        parse_primitive(remainder, line)
    }

    fn parse_item_fields(&mut self, map: &mut Map, depth: usize) -> Result<()> {
        while let Some(line) = self.cursor.peek_at_depth(depth) {
            if is_list_item(&line.content) {
                break;
            }
            let line = line.clone();
            self.cursor.next();
            let (key, value, _) = self.parse_field(&line.content, line.line_number, depth)?;
            map.insert(key, value);
        }
        Ok(())
    }

    fn check_blanks(&self, first: Option<usize>, last: usize) -> Result<()> {
        let Some(first) = first else { return Ok(()) };
        if let Some(&blank) = self.blanks.iter().find(|&&b| b > first && b < last) {
            return Err(Error::BlankLineInArray { line: blank });
        }
        Ok(())
    }
}

fn is_list_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ")
}

fn list_item_remainder(content: &str) -> &str {
    if content == "-" {
        ""
    } else {
        content[2..].trim()
    }
}

/// Detects whether splitting by a different delimiter would explain a
/// one-cell row; detection stays width-driven.
fn row_width_error(line: &ParsedLine, expected: usize, found: usize, declared: Delimiter) -> Error {
    if found == 1 && expected > 1 {
        for other in [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe] {
            if other != declared && find_unquoted(&line.content, other.as_char()).is_some() {
                return Error::DelimiterMismatch {
                    line: line.line_number,
                };
            }
        }
    }
    Error::TabularWidthMismatch {
        line: line.line_number,
        expected,
        found,
    }
}

/// Parses a line as an array header, returning `Ok(None)` when the line is
/// an ordinary key-value instead.
///
/// Quoted keys are never headers. The bracket segment optionally carries a
/// leading `#` marker and a trailing `\t` or `|` delimiter suffix around
/// the length; a field list between braces may follow before the colon.
fn parse_array_header(content: &str, line: usize) -> Result<Option<ArrayHeader>> {
    if content.starts_with('"') {
        return Ok(None);
    }
    let bracket = match find_unquoted(content, '[') {
        Some(idx) => idx,
        None => return Ok(None),
    };
    match find_unquoted(content, ':') {
        Some(colon) if colon > bracket => {}
        _ => return Ok(None),
    }
    let close = match content[bracket..].find(']') {
        Some(idx) => bracket + idx,
        None => return Ok(None),
    };

    let after = &content[close + 1..];
    let (fields_raw, after_fields) = match (find_unquoted(after, '{'), find_unquoted(after, ':')) {
        (Some(brace), Some(colon)) if brace < colon && after[..brace].trim().is_empty() => {
            let close_brace = match find_unquoted(&after[brace + 1..], '}') {
                Some(idx) => brace + 1 + idx,
                None => {
                    return Err(Error::InvalidHeader {
                        line,
                        msg: "unterminated field list".to_string(),
                    })
                }
            };
            (Some(&after[brace + 1..close_brace]), &after[close_brace + 1..])
        }
        _ => (None, after),
    };

    let after_fields = after_fields.trim_start();
    if !after_fields.starts_with(':') {
        return Ok(None);
    }
    let rest = after_fields[1..].trim();
    let inline = if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    };

    let mut segment = &content[bracket + 1..close];
    if let Some(stripped) = segment.strip_prefix('#') {
        segment = stripped;
    }
    let delimiter = if let Some(stripped) = segment.strip_suffix('\t') {
        segment = stripped;
        Delimiter::Tab
    } else if let Some(stripped) = segment.strip_suffix('|') {
        segment = stripped;
        Delimiter::Pipe
    } else {
        Delimiter::Comma
    };
    let len: usize = segment.parse().map_err(|_| Error::InvalidHeader {
        line,
        msg: format!("'{segment}' is not a valid length"),
    })?;

    let fields = match fields_raw {
        Some(raw) => {
            let mut names = Vec::new();
            for token in split_delimited(raw, delimiter) {
                if token.starts_with('"') {
                    names.push(parse_quoted(&token, line)?);
                } else {
                    names.push(token);
                }
            }
            Some(names)
        }
        None => None,
    };

    let key_part = content[..bracket].trim();
    let key = if key_part.is_empty() {
        None
    } else {
        Some(key_part.to_string())
    };

    Ok(Some(ArrayHeader {
        key,
        len,
        delimiter,
        fields,
        inline,
        line,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toon;

    fn dec(text: &str) -> Value {
        decode(text, &DecodeOptions::default()).unwrap()
    }

    fn dec_err(text: &str) -> Error {
        decode(text, &DecodeOptions::default()).unwrap_err()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(dec_err(""), Error::EmptyInput);
        assert_eq!(dec_err("\n  \n"), Error::EmptyInput);
    }

    #[test]
    fn test_root_forms() {
        assert_eq!(dec("42"), Value::Number(42.0));
        assert_eq!(dec("hello"), Value::String("hello".to_string()));
        assert_eq!(dec("\"a:b\""), Value::String("a:b".to_string()));
        assert_eq!(dec("[3]: 1,2,3"), toon!([1, 2, 3]));
        assert_eq!(dec("[0]:"), toon!([]));
        assert_eq!(dec("a: 1"), toon!({ "a": 1 }));
    }

    #[test]
    fn test_nested_objects() {
        assert_eq!(
            dec("user:\n  name: Ada\n  age: 36"),
            toon!({ "user": { "name": "Ada", "age": 36 } })
        );
    }

    #[test]
    fn test_empty_object_value() {
        assert_eq!(dec("a:\nb: 1"), toon!({ "a": {}, "b": 1 }));
        assert_eq!(dec("a:"), toon!({ "a": {} }));
    }

    #[test]
    fn test_primitive_values() {
        let value = dec("n: null\nt: true\nf: false\ni: 42\nx: -3.14\ne: 1e-6\ns: plain\nz: 05");
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("n"), Some(&Value::Null));
        assert_eq!(obj.get("t"), Some(&Value::Bool(true)));
        assert_eq!(obj.get("i"), Some(&Value::Number(42.0)));
        assert_eq!(obj.get("x"), Some(&Value::Number(-3.14)));
        assert_eq!(obj.get("e"), Some(&Value::Number(1e-6)));
        assert_eq!(obj.get("s"), Some(&Value::String("plain".to_string())));
        assert_eq!(obj.get("z"), Some(&Value::String("05".to_string())));
    }

    #[test]
    fn test_quoted_strings_stay_strings() {
        assert_eq!(
            dec("v: \"true\"\nn: \"42\""),
            toon!({ "v": "true", "n": "42" })
        );
    }

    #[test]
    fn test_tabular_array() {
        assert_eq!(
            dec("items[2]{sku,qty,price}:\n  A1,2,9.99\n  B2,1,14.5"),
            toon!({
                "items": [
                    { "sku": "A1", "qty": 2, "price": 9.99 },
                    { "sku": "B2", "qty": 1, "price": 14.5 }
                ]
            })
        );
    }

    #[test]
    fn test_tabular_empty_cell_parses_as_empty_string() {
        assert_eq!(
            dec("rows[1]{a,b,c}:\n  1,,3"),
            toon!({ "rows": [{ "a": 1, "b": "", "c": 3 }] })
        );
    }

    #[test]
    fn test_list_array() {
        assert_eq!(
            dec("items[2]:\n  - id: 1\n    name: First\n  - id: 2\n    name: Second\n    extra: true"),
            toon!({
                "items": [
                    { "id": 1, "name": "First" },
                    { "id": 2, "name": "Second", "extra": true }
                ]
            })
        );
    }

    #[test]
    fn test_list_items_primitive_and_array() {
        assert_eq!(
            dec("mixed[3]:\n  - 1\n  - [2]: 2,3\n  - x"),
            toon!({ "mixed": [1, [2, 3], "x"] })
        );
    }

    #[test]
    fn test_bare_hyphen_is_empty_object() {
        assert_eq!(dec("items[1]:\n  -"), toon!({ "items": [{}] }));
    }

    #[test]
    fn test_list_item_with_leading_block_array() {
        assert_eq!(
            dec("items[1]:\n  - rows[1]{x,y}:\n      1,2\n      flag: true"),
            toon!({ "items": [{ "rows": [{ "x": 1, "y": 2 }], "flag": true }] })
        );
    }

    #[test]
    fn test_list_item_with_leading_inline_array() {
        assert_eq!(
            dec("items[1]:\n  - tags[2]: a,b\n    flag: true"),
            toon!({ "items": [{ "tags": ["a", "b"], "flag": true }] })
        );
    }

    #[test]
    fn test_header_variants() {
        assert_eq!(dec("tags[#2]: a,b"), toon!({ "tags": ["a", "b"] }));
        assert_eq!(dec("tags[2|]: a|b"), toon!({ "tags": ["a", "b"] }));
        assert_eq!(dec("tags[2\t]: a\tb"), toon!({ "tags": ["a", "b"] }));
        assert_eq!(dec("tags[#2|]: a|b"), toon!({ "tags": ["a", "b"] }));
    }

    #[test]
    fn test_inactive_delimiter_is_plain_content() {
        assert_eq!(
            dec("items[1\t]{id\tnote}:\n  1\ta,b"),
            toon!({ "items": [{ "id": 1, "note": "a,b" }] })
        );
    }

    #[test]
    fn test_quoted_field_names() {
        assert_eq!(
            dec("rows[1]{\"a b\",c}:\n  1,2"),
            toon!({ "rows": [{ "a b": 1, "c": 2 }] })
        );
    }

    #[test]
    fn test_quoted_cell_with_delimiter() {
        assert_eq!(
            dec("tags[2]: \"a,b\",c"),
            toon!({ "tags": ["a,b", "c"] })
        );
    }

    #[test]
    fn test_key_order_is_preserved() {
        let value = dec("zebra: 1\napple: 2\nmango: 3");
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            dec_err("tags[3]: a,b"),
            Error::LengthMismatch {
                line: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            dec_err("items[2]:\n  - a"),
            Error::LengthMismatch {
                line: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_strict_surplus_items() {
        assert_eq!(
            dec_err("items[1]:\n  - a\n  - b"),
            Error::LengthMismatch {
                line: 3,
                expected: 1,
                found: 2
            }
        );
        assert_eq!(
            dec_err("rows[1]{a,b}:\n  1,2\n  3,4"),
            Error::LengthMismatch {
                line: 3,
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn test_lenient_reports_surplus_as_residual() {
        assert!(decode("items[1]:\n  - a\n  - b", &DecodeOptions::lenient()).is_err());
    }

    #[test]
    fn test_tabular_width_mismatch() {
        assert_eq!(
            dec_err("rows[1]{a,b}:\n  1,2,3"),
            Error::TabularWidthMismatch {
                line: 2,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_delimiter_mismatch() {
        assert_eq!(
            dec_err("rows[1|]{a|b}:\n  1,2"),
            Error::DelimiterMismatch { line: 2 }
        );
    }

    #[test]
    fn test_invalid_header() {
        assert_eq!(
            dec_err("items[abc]: x"),
            Error::InvalidHeader {
                line: 1,
                msg: "'abc' is not a valid length".to_string()
            }
        );
    }

    #[test]
    fn test_missing_colon() {
        assert_eq!(dec_err("a: 1\nbroken"), Error::MissingColon { line: 2 });
    }

    #[test]
    fn test_invalid_escape_and_unterminated() {
        assert_eq!(
            dec_err("a: \"bad\\q\""),
            Error::InvalidEscape {
                line: 1,
                escape: 'q'
            }
        );
        assert_eq!(dec_err("a: \"open"), Error::UnterminatedString { line: 1 });
    }

    #[test]
    fn test_strict_blank_in_array() {
        assert_eq!(
            dec_err("items[3]:\n  - a\n\n  - b\n  - c"),
            Error::BlankLineInArray { line: 3 }
        );
        assert_eq!(
            decode("items[3]:\n  - a\n\n  - b\n  - c", &DecodeOptions::lenient()).unwrap(),
            toon!({ "items": ["a", "b", "c"] })
        );
    }

    #[test]
    fn test_blank_lines_between_fields_are_fine() {
        assert_eq!(dec("a: 1\n\nb: 2"), toon!({ "a": 1, "b": 2 }));
    }

    #[test]
    fn test_strict_indentation_failure_and_lenient_recovery() {
        assert_eq!(
            dec_err("a:\n   b: 1"),
            Error::IndentNotMultiple {
                line: 2,
                indent: 3,
                indent_size: 2
            }
        );
        assert_eq!(
            decode("a:\n   b: 1", &DecodeOptions::lenient()).unwrap(),
            toon!({ "a": { "b": 1 } })
        );
    }

    #[test]
    fn test_residual_content_is_rejected() {
        assert!(matches!(
            dec_err("a: 1\n    deep: 2"),
            Error::Syntax { line: 2, .. }
        ));
    }

    #[test]
    fn test_value_with_brackets_is_not_a_header() {
        assert_eq!(
            dec("note: \"see [3]: here\""),
            toon!({ "note": "see [3]: here" })
        );
    }

    #[test]
    fn test_quoted_keys() {
        assert_eq!(
            dec("\"my key\": 1\n\"a:b\": 2"),
            toon!({ "my key": 1, "a:b": 2 })
        );
    }

    #[test]
    fn test_custom_indent_grid() {
        let options = DecodeOptions::new().with_indent(4);
        assert_eq!(
            decode("a:\n    b: 1", &options).unwrap(),
            toon!({ "a": { "b": 1 } })
        );
    }
}
