//! Lexical rules shared by the encoder and decoder.
//!
//! Everything that decides how a single token looks lives here: when keys
//! and strings need quotes, the escape alphabet, literal detection, and the
//! quote-aware scanning helpers used by the line decoder. The three scanning
//! routines share one invariant: inside quotes, `\X` consumes two characters
//! atomically.

use crate::error::{Error, Result};
use crate::options::Delimiter;
use crate::value::Value;

/// A key is emittable without quotes iff it matches `[A-Za-z_][A-Za-z0-9_.]*`.
pub(crate) fn is_identifier_key(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Matches `-?\d+(\.\d+)?(e[+-]?\d+)?` case-insensitively.
///
/// Leading-zero integers such as `05` also match; they are flagged so the
/// encoder quotes them, while [`is_leading_zero_integer`] keeps the decoder
/// from turning them into numbers.
pub(crate) fn is_numeric_like(s: &str) -> bool {
    let b = s.as_bytes();
    let mut i = 0;
    if i < b.len() && b[i] == b'-' {
        i += 1;
    }
    if i >= b.len() || !b[i].is_ascii_digit() {
        return false;
    }
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i < b.len() && b[i] == b'.' {
        i += 1;
        if i >= b.len() || !b[i].is_ascii_digit() {
            return false;
        }
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < b.len() && matches!(b[i], b'e' | b'E') {
        i += 1;
        if i < b.len() && matches!(b[i], b'+' | b'-') {
            i += 1;
        }
        if i >= b.len() || !b[i].is_ascii_digit() {
            return false;
        }
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
    }
    i == b.len()
}

/// Matches `0\d+`. Such tokens decode as strings, not numbers.
pub(crate) fn is_leading_zero_integer(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 2 && b[0] == b'0' && b[1..].iter().all(u8::is_ascii_digit)
}

/// Whether a string value must be double-quoted under the active delimiter.
pub(crate) fn needs_quoting(s: &str, delimiter: Delimiter) -> bool {
    if s.is_empty() || s != s.trim() {
        return true;
    }
    if matches!(s, "true" | "false" | "null") {
        return true;
    }
    if is_numeric_like(s) {
        return true;
    }
    if s.starts_with('-') {
        return true;
    }
    let delim = delimiter.as_char();
    s.chars().any(|c| {
        matches!(
            c,
            ':' | '"' | '\\' | '[' | ']' | '{' | '}' | '\n' | '\r' | '\t'
        ) || c == delim
    })
}

/// Appends `s` as a double-quoted string with the five escapes applied.
///
/// All other characters, arbitrary Unicode included, pass through literally.
pub(crate) fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

/// Renders a key token, quoting non-identifier keys.
pub(crate) fn encode_key(key: &str) -> String {
    if is_identifier_key(key) {
        key.to_string()
    } else {
        let mut out = String::with_capacity(key.len() + 2);
        write_quoted(&mut out, key);
        out
    }
}

/// Renders a string value token under the active delimiter.
pub(crate) fn encode_string(s: &str, delimiter: Delimiter) -> String {
    if needs_quoting(s, delimiter) {
        let mut out = String::with_capacity(s.len() + 2);
        write_quoted(&mut out, s);
        out
    } else {
        s.to_string()
    }
}

/// Resolves the escape sequences of a quoted-string body.
pub(crate) fn unescape(body: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some(other) => return Err(Error::InvalidEscape { line, escape: other }),
                None => return Err(Error::UnterminatedString { line }),
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// Parses a complete quoted token: the closing quote must end the token.
pub(crate) fn parse_quoted(token: &str, line: usize) -> Result<String> {
    let close = find_closing_quote(token, 0).ok_or(Error::UnterminatedString { line })?;
    if close != token.len() - 1 {
        return Err(Error::UnterminatedString { line });
    }
    unescape(&token[1..close], line)
}

/// Parses a trimmed token into a primitive [`Value`].
///
/// Empty tokens produce the empty string; bare tokens that are neither
/// literals nor numeric fall through as strings.
pub(crate) fn parse_primitive(token: &str, line: usize) -> Result<Value> {
    let t = token.trim();
    if t.is_empty() {
        return Ok(Value::String(String::new()));
    }
    if t.starts_with('"') {
        return parse_quoted(t, line).map(Value::String);
    }
    match t {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "null" => return Ok(Value::Null),
        _ => {}
    }
    if is_numeric_like(t) && !is_leading_zero_integer(t) {
        if let Ok(n) = t.parse::<f64>() {
            return Ok(Value::Number(n));
        }
    }
    Ok(Value::String(t.to_string()))
}

/// Splits `s` on the delimiter while respecting a single level of quotes.
///
/// Each resulting value is trimmed. An empty input yields the empty list;
/// otherwise leading and trailing empties adjacent to a delimiter are kept.
pub(crate) fn split_delimited(s: &str, delimiter: Delimiter) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    let delim = delimiter.as_char();
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if in_quotes {
            current.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            } else if c == '"' {
                in_quotes = false;
            }
        } else if c == delim {
            values.push(std::mem::take(&mut current));
        } else {
            if c == '"' {
                in_quotes = true;
            }
            current.push(c);
        }
    }
    values.push(current);
    values.into_iter().map(|v| v.trim().to_string()).collect()
}

/// Returns the byte index of the first `target` outside quotes.
pub(crate) fn find_unquoted(s: &str, target: char) -> Option<usize> {
    let mut in_quotes = false;
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        if in_quotes {
            if c == '\\' {
                chars.next();
            } else if c == '"' {
                in_quotes = false;
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == target {
            return Some(i);
        }
    }
    None
}

/// Returns the byte index of the unescaped `"` closing the quote at `open`.
pub(crate) fn find_closing_quote(s: &str, open: usize) -> Option<usize> {
    let mut chars = s[open + 1..].char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '"' => return Some(open + 1 + i),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_keys() {
        assert!(is_identifier_key("name"));
        assert!(is_identifier_key("_private"));
        assert!(is_identifier_key("user.email"));
        assert!(is_identifier_key("a1_b2"));
        assert!(!is_identifier_key(""));
        assert!(!is_identifier_key("2nd"));
        assert!(!is_identifier_key("user-id"));
        assert!(!is_identifier_key("with space"));
        assert!(!is_identifier_key("a:b"));
    }

    #[test]
    fn test_numeric_like() {
        assert!(is_numeric_like("0"));
        assert!(is_numeric_like("42"));
        assert!(is_numeric_like("-3.14"));
        assert!(is_numeric_like("1e-6"));
        assert!(is_numeric_like("2E+10"));
        assert!(is_numeric_like("05"));
        assert!(!is_numeric_like(""));
        assert!(!is_numeric_like("-"));
        assert!(!is_numeric_like("1."));
        assert!(!is_numeric_like(".5"));
        assert!(!is_numeric_like("1e"));
        assert!(!is_numeric_like("abc"));
        assert!(!is_numeric_like("1.2.3"));
    }

    #[test]
    fn test_leading_zero_integer() {
        assert!(is_leading_zero_integer("05"));
        assert!(is_leading_zero_integer("007"));
        assert!(!is_leading_zero_integer("0"));
        assert!(!is_leading_zero_integer("0.5"));
        assert!(!is_leading_zero_integer("50"));
    }

    #[test]
    fn test_needs_quoting() {
        let comma = Delimiter::Comma;
        assert!(needs_quoting("", comma));
        assert!(needs_quoting(" padded ", comma));
        assert!(needs_quoting("true", comma));
        assert!(needs_quoting("42", comma));
        assert!(needs_quoting("05", comma));
        assert!(needs_quoting("-dash", comma));
        assert!(needs_quoting("a,b", comma));
        assert!(needs_quoting("a:b", comma));
        assert!(needs_quoting("a[b]", comma));
        assert!(needs_quoting("line\nbreak", comma));
        assert!(!needs_quoting("hello world", comma));
        assert!(!needs_quoting("a|b", comma));

        // Only the active delimiter triggers quoting.
        assert!(needs_quoting("a|b", Delimiter::Pipe));
        assert!(!needs_quoting("a,b", Delimiter::Pipe));
        assert!(needs_quoting("a\tb", Delimiter::Pipe));
    }

    #[test]
    fn test_encode_string_escapes() {
        assert_eq!(encode_string("plain", Delimiter::Comma), "plain");
        assert_eq!(
            encode_string("say \"hi\"", Delimiter::Comma),
            "\"say \\\"hi\\\"\""
        );
        assert_eq!(encode_string("a\nb", Delimiter::Comma), "\"a\\nb\"");
        assert_eq!(encode_string("back\\slash", Delimiter::Comma), "\"back\\\\slash\"");
    }

    #[test]
    fn test_parse_primitive() {
        assert_eq!(parse_primitive("null", 1).unwrap(), Value::Null);
        assert_eq!(parse_primitive("true", 1).unwrap(), Value::Bool(true));
        assert_eq!(parse_primitive("42", 1).unwrap(), Value::Number(42.0));
        assert_eq!(parse_primitive("-3.14", 1).unwrap(), Value::Number(-3.14));
        assert_eq!(parse_primitive("1e-6", 1).unwrap(), Value::Number(1e-6));
        assert_eq!(
            parse_primitive("05", 1).unwrap(),
            Value::String("05".to_string())
        );
        assert_eq!(
            parse_primitive("hello", 1).unwrap(),
            Value::String("hello".to_string())
        );
        assert_eq!(
            parse_primitive("", 1).unwrap(),
            Value::String(String::new())
        );
        assert_eq!(
            parse_primitive("\"42\"", 1).unwrap(),
            Value::String("42".to_string())
        );
        assert_eq!(
            parse_primitive("\"a\\nb\"", 1).unwrap(),
            Value::String("a\nb".to_string())
        );
    }

    #[test]
    fn test_parse_primitive_errors() {
        assert!(matches!(
            parse_primitive("\"open", 3).unwrap_err(),
            Error::UnterminatedString { line: 3 }
        ));
        assert!(matches!(
            parse_primitive("\"done\" extra", 3).unwrap_err(),
            Error::UnterminatedString { line: 3 }
        ));
        assert!(matches!(
            parse_primitive("\"bad\\x\"", 2).unwrap_err(),
            Error::InvalidEscape { line: 2, escape: 'x' }
        ));
    }

    #[test]
    fn test_split_delimited() {
        let comma = Delimiter::Comma;
        assert_eq!(split_delimited("", comma), Vec::<String>::new());
        assert_eq!(split_delimited("a,b,c", comma), vec!["a", "b", "c"]);
        assert_eq!(split_delimited("a, b , c", comma), vec!["a", "b", "c"]);
        assert_eq!(split_delimited(",", comma), vec!["", ""]);
        assert_eq!(split_delimited("1,,3", comma), vec!["1", "", "3"]);
        assert_eq!(split_delimited("\"a,b\",c", comma), vec!["\"a,b\"", "c"]);
        assert_eq!(
            split_delimited("\"esc\\\",still\",x", comma),
            vec!["\"esc\\\",still\"", "x"]
        );
        assert_eq!(split_delimited("a|b", Delimiter::Pipe), vec!["a", "b"]);
        assert_eq!(split_delimited("a\tb", Delimiter::Tab), vec!["a", "b"]);
    }

    #[test]
    fn test_find_unquoted() {
        assert_eq!(find_unquoted("a: b", ':'), Some(1));
        assert_eq!(find_unquoted("\"a:b\": c", ':'), Some(5));
        assert_eq!(find_unquoted("\"a:b\"", ':'), None);
        assert_eq!(find_unquoted("\"\\\":\": x", ':'), Some(5));
    }

    #[test]
    fn test_find_closing_quote() {
        assert_eq!(find_closing_quote("\"abc\"", 0), Some(4));
        assert_eq!(find_closing_quote("\"a\\\"b\"", 0), Some(5));
        assert_eq!(find_closing_quote("\"open", 0), None);
    }
}
