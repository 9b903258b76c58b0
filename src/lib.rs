//! # toon-codec
//!
//! An encoder/decoder pair for TOON (Token-Oriented Object Notation), a
//! compact, human-readable text format for JSON-equivalent data trees,
//! optimized for feeding tokenizer-based language models.
//!
//! ## What is TOON?
//!
//! TOON drops the braces, brackets and redundant quotes of JSON and leans
//! on significant indentation instead. Arrays of like-shaped objects
//! collapse into tables with a single header row, which is where most of
//! the token savings come from. See the [`format`] module for the full
//! format reference.
//!
//! ## Quick start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon_codec::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Ada".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id: 123\nname: Ada\nactive: true");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ## Tabular arrays
//!
//! Arrays of homogeneous objects serialize as tables:
//!
//! ```rust
//! use serde::Serialize;
//! use toon_codec::to_string;
//!
//! #[derive(Serialize)]
//! struct Product {
//!     sku: String,
//!     qty: u32,
//! }
//!
//! let products = vec![
//!     Product { sku: "A1".to_string(), qty: 2 },
//!     Product { sku: "B2".to_string(), qty: 1 },
//! ];
//!
//! assert_eq!(to_string(&products).unwrap(), "[2]{sku,qty}:\n  A1,2\n  B2,1");
//! ```
//!
//! ## Dynamic values
//!
//! When the structure is not known at compile time, work with [`Value`]
//! directly through [`encode`]/[`decode`] and the [`toon!`] macro:
//!
//! ```rust
//! use toon_codec::{decode, encode, toon, DecodeOptions, EncodeOptions};
//!
//! let value = toon!({ "tags": ["reading", "gaming"] });
//! let text = encode(&value, &EncodeOptions::default()).unwrap();
//! assert_eq!(text, "tags[2]: reading,gaming");
//! assert_eq!(decode(&text, &DecodeOptions::default()).unwrap(), value);
//! ```
//!
//! ## Options
//!
//! [`EncodeOptions`] selects the indent width, the delimiter (comma, tab
//! or pipe) and an optional `#` length marker. [`DecodeOptions`] selects
//! the indent grid and strict or lenient parsing; strict mode (the
//! default) enforces exact indentation, rejects tabs in indentation and
//! blank lines inside arrays, and flags surplus array items.
//!
//! ## Errors
//!
//! Decoding reports typed failures with 1-based line numbers; see
//! [`Error`]. Encoding only fails for invalid options; values that left
//! the JSON model (non-finite floats, oversized integers) are normalized
//! rather than rejected.

pub mod de;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
mod lexical;
pub mod macros;
pub mod map;
pub mod options;
mod scanner;
pub mod ser;
pub mod value;

pub use de::{from_value, ValueDeserializer};
pub use decode::decode;
pub use encode::encode;
pub use error::{Error, Result};
pub use map::Map;
pub use options::{DecodeOptions, Delimiter, EncodeOptions};
pub use ser::{to_value, ValueSerializer};
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serializes any `T: Serialize` to a TOON string with default options.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized (e.g. a map with
/// non-string keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serializes any `T: Serialize` to a TOON string with custom options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{to_string_with_options, Delimiter, EncodeOptions};
///
/// let tags = vec!["a", "b"];
/// let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
/// assert_eq!(to_string_with_options(&tags, &options).unwrap(), "[2|]: a|b");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or the options are
/// invalid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    encode(&to_value(value)?, options)
}

/// Serializes any `T: Serialize` to a writer in TOON format.
///
/// # Errors
///
/// Returns an error if serialization fails or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &EncodeOptions::default())
}

/// Serializes any `T: Serialize` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &EncodeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserializes an instance of type `T` from TOON text with default options.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon_codec::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let point: Point = from_str("x: 1\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TOON or cannot be
/// deserialized to `T`. Errors carry line numbers where available.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, &DecodeOptions::default())
}

/// Deserializes an instance of type `T` from TOON text with custom options.
///
/// # Errors
///
/// Returns an error if the input is not valid TOON or cannot be
/// deserialized to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &DecodeOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode(s, options)?)
}

/// Deserializes an instance of type `T` from bytes of TOON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid TOON, or
/// cannot be deserialized to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserializes an instance of type `T` from an I/O stream of TOON.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid TOON, or the
/// data cannot be deserialized to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let toon = to_string(&point).unwrap();
        assert_eq!(toon, "x: 1\ny: 2");
        let back: Point = from_str(&toon).unwrap();
        assert_eq!(point, back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = User {
            id: 123,
            name: "Ada".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        };

        let toon = to_string(&user).unwrap();
        assert_eq!(
            toon,
            "id: 123\nname: Ada\nactive: true\ntags[2]: admin,user"
        );
        let back: User = from_str(&toon).unwrap();
        assert_eq!(user, back);
    }

    #[test]
    fn test_value_round_trip() {
        let value = toon!({
            "user": {
                "id": 123,
                "name": "Ada",
                "tags": ["reading", "gaming"],
                "active": true,
                "prefs": []
            }
        });

        let text = encode(&value, &EncodeOptions::default()).unwrap();
        assert_eq!(decode(&text, &DecodeOptions::default()).unwrap(), value);
    }

    #[test]
    fn test_writer_and_slice() {
        let point = Point { x: 1, y: 2 };
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &point).unwrap();
        let back: Point = from_slice(&buffer).unwrap();
        assert_eq!(point, back);
    }

    #[test]
    fn test_reader() {
        let cursor = std::io::Cursor::new(b"x: 1\ny: 2");
        let point: Point = from_reader(cursor).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_display_uses_default_encoding() {
        let value = toon!({ "a": 1 });
        assert_eq!(value.to_string(), "a: 1");
    }
}
