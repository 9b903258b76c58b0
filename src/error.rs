//! Error types for TOON encoding and decoding.
//!
//! Decoding errors carry the 1-based line number of the offending input
//! line where one is available; [`Error::line`] exposes it uniformly.
//! All errors are raised synchronously and abort the current call;
//! nothing is retried or recovered locally, and nothing is logged.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{decode, DecodeOptions, Error};
//!
//! let err = decode("items[2]: a", &DecodeOptions::default()).unwrap_err();
//! assert!(matches!(err, Error::LengthMismatch { expected: 2, found: 1, .. }));
//! assert_eq!(err.line(), Some(1));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during TOON encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input contained no non-blank lines.
    #[error("input contains no content")]
    EmptyInput,

    /// A quoted run never closes, or a quoted token carries trailing characters.
    #[error("line {line}: unterminated quoted string")]
    UnterminatedString { line: usize },

    /// A backslash escape other than `\"`, `\\`, `\n`, `\r`, `\t`.
    #[error("line {line}: invalid escape sequence '\\{escape}'")]
    InvalidEscape { line: usize, escape: char },

    /// A key was parsed but no `:` followed it.
    #[error("line {line}: expected ':' after key")]
    MissingColon { line: usize },

    /// An array header whose bracket segment does not parse as a length.
    #[error("line {line}: invalid array header: {msg}")]
    InvalidHeader { line: usize, msg: String },

    /// The declared array length disagrees with the number of items found.
    #[error("line {line}: array declares {expected} items but {found} were found")]
    LengthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A tabular row whose value count disagrees with the field list.
    #[error("line {line}: row has {found} values but the header declares {expected} fields")]
    TabularWidthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A tabular row separated by something other than the declared delimiter.
    #[error("line {line}: row is not separated by the delimiter declared in the header")]
    DelimiterMismatch { line: usize },

    /// Strict mode: indentation that is not a multiple of the indent size.
    #[error("line {line}: indentation of {indent} is not a multiple of {indent_size}")]
    IndentNotMultiple {
        line: usize,
        indent: usize,
        indent_size: usize,
    },

    /// Strict mode: a tab character in the leading whitespace of a line.
    #[error("line {line}: tab character in indentation")]
    TabInIndent { line: usize },

    /// Strict mode: a blank line between the first and last item of an array body.
    #[error("line {line}: blank line inside array")]
    BlankLineInArray { line: usize },

    /// Residual structural error with position information.
    #[error("line {line}: {msg}")]
    Syntax { line: usize, msg: String },

    /// Invalid encode/decode options.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// IO error during reading or writing.
    #[error("io error: {0}")]
    Io(String),

    /// Generic message, used by the serde integration.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Returns the 1-based input line the error refers to, when available.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnterminatedString { line }
            | Error::InvalidEscape { line, .. }
            | Error::MissingColon { line }
            | Error::InvalidHeader { line, .. }
            | Error::LengthMismatch { line, .. }
            | Error::TabularWidthMismatch { line, .. }
            | Error::DelimiterMismatch { line }
            | Error::IndentNotMultiple { line, .. }
            | Error::TabInIndent { line }
            | Error::BlankLineInArray { line }
            | Error::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Creates a residual syntax error at the given line.
    pub fn syntax(line: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            msg: msg.into(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
