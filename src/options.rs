//! Configuration options for TOON encoding and decoding.
//!
//! This module provides the types that customize the codec:
//!
//! - [`EncodeOptions`]: indentation width, delimiter, optional length marker
//! - [`DecodeOptions`]: indentation grid and strict/lenient mode
//! - [`Delimiter`]: choice of delimiter for arrays and tabular rows
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{encode, toon, Delimiter, EncodeOptions};
//!
//! let value = toon!({ "tags": ["a", "b"] });
//!
//! let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
//! assert_eq!(encode(&value, &options).unwrap(), "tags[2|]: a|b");
//!
//! let options = EncodeOptions::new().with_length_marker('#');
//! assert_eq!(encode(&value, &options).unwrap(), "tags[#2]: a,b");
//! ```

use crate::error::{Error, Result};

/// Delimiter choice for TOON arrays and tabular rows.
///
/// The active delimiter applies to the immediate array only: it joins the
/// array's values, appears as a suffix inside the `[N]` header for tab and
/// pipe, and decides which strings need quoting within that array. Nested
/// arrays inside list items carry their own delimiter independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// Returns the delimiter character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// Returns the suffix encoded inside array headers, e.g. `[3|]`.
    ///
    /// Comma is the default and carries no suffix.
    #[must_use]
    pub const fn header_suffix(&self) -> &'static str {
        match self {
            Delimiter::Comma => "",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }
}

/// Options controlling TOON encoding.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{Delimiter, EncodeOptions};
///
/// let options = EncodeOptions::new()
///     .with_indent(4)
///     .with_delimiter(Delimiter::Tab)
///     .with_length_marker('#');
/// ```
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// Number of spaces per depth level.
    pub indent: usize,
    /// Delimiter between array values and tabular row cells.
    pub delimiter: Delimiter,
    /// Optional marker prefixed to array lengths (`[#3]` instead of `[3]`).
    pub length_marker: Option<char>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            length_marker: None,
        }
    }
}

impl EncodeOptions {
    /// Creates default options (2-space indent, comma delimiter, no marker).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation size (number of spaces per level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the delimiter for arrays and tabular rows.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the length marker character. Only `'#'` is recognized.
    #[must_use]
    pub fn with_length_marker(mut self, marker: char) -> Self {
        self.length_marker = Some(marker);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.indent == 0 {
            return Err(Error::InvalidOptions(
                "indent must be a positive number of spaces".to_string(),
            ));
        }
        if let Some(marker) = self.length_marker {
            if marker != '#' {
                return Err(Error::InvalidOptions(format!(
                    "unsupported length marker '{marker}', only '#' is recognized"
                )));
            }
        }
        Ok(())
    }
}

/// Options controlling TOON decoding.
///
/// `indent` is the grid size used for depth computation. In strict mode
/// (the default) every indent must be an exact multiple of it, tabs are
/// rejected in indentation, and blank lines are rejected inside array
/// bodies. Lenient mode tolerates all three.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode, DecodeOptions};
///
/// assert!(decode("a:\n   b: 1", &DecodeOptions::default()).is_err());
/// assert!(decode("a:\n   b: 1", &DecodeOptions::lenient()).is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Number of spaces per depth level.
    pub indent: usize,
    /// Whether indentation and blank-line rules are enforced.
    pub strict: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            indent: 2,
            strict: true,
        }
    }
}

impl DecodeOptions {
    /// Creates default options (2-space grid, strict mode on).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with strict mode off.
    #[must_use]
    pub fn lenient() -> Self {
        DecodeOptions {
            strict: false,
            ..Default::default()
        }
    }

    /// Sets the indentation grid size.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.indent == 0 {
            return Err(Error::InvalidOptions(
                "indent must be a positive number of spaces".to_string(),
            ));
        }
        Ok(())
    }
}
