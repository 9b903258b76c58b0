//! TOON format reference
//!
//! This module documents the TOON (Token-Oriented Object Notation) surface
//! as implemented by this crate.
//!
//! # Overview
//!
//! TOON is a minimalist serialization format for JSON-equivalent data,
//! designed to spend fewer tokens than JSON when fed to language models.
//! It drops braces, brackets and most quotes, and relies on significant
//! indentation (2 spaces per level by default).
//!
//! # Objects
//!
//! Objects are newline-delimited `key: value` pairs. Key order is
//! significant and survives a round-trip.
//!
//! ```text
//! name: Ada
//! age: 36
//! address:
//!   city: London
//! ```
//!
//! Keys matching `[A-Za-z_][A-Za-z0-9_.]*` are written bare; anything else
//! is double-quoted: `"user-id": 7`, `"2nd place": x`. An empty object is
//! a key with no inline value and nothing indented beneath it.
//!
//! # Primitives
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Null | `null` | `value: null` |
//! | Boolean | `true` / `false` | `active: true` |
//! | Number | decimal, optional fraction/exponent | `price: 19.99` |
//! | String | unquoted or `"quoted"` | `name: Ada` |
//!
//! Strings are unquoted whenever that is unambiguous. Quotes are required
//! when the string:
//!
//! - is empty or has leading/trailing whitespace
//! - equals `true`, `false` or `null`
//! - looks numeric (`"42"`, `"-3.14"`, `"1e-6"`, and leading-zero integers
//!   such as `"05"`)
//! - starts with `-`
//! - contains the **active delimiter**, or any of `:`, `"`, `\`, `[`, `]`,
//!   `{`, `}`, newline, carriage return, tab
//!
//! Inactive delimiters never force quotes: with the tab delimiter active,
//! `a,b` is plain content.
//!
//! Quoted strings know exactly five escapes: `\"`, `\\`, `\n`, `\r`, `\t`.
//! Everything else, arbitrary Unicode included, passes through literally;
//! an unknown `\x` sequence is a decode error.
//!
//! # Arrays
//!
//! Every array advertises its length in a header, and the body must match
//! it exactly. Three shapes exist, chosen in this order:
//!
//! **Inline**, when every element is a primitive:
//!
//! ```text
//! tags[3]: reading,gaming,cooking
//! empty[0]:
//! ```
//!
//! **Tabular**, when every element is an object with the same keys in the
//! same order and primitive values only:
//!
//! ```text
//! items[2]{sku,qty,price}:
//!   A1,2,9.99
//!   B2,1,14.5
//! ```
//!
//! **List**, for everything else, with one `- ` item per line:
//!
//! ```text
//! items[2]:
//!   - id: 1
//!     name: First
//!   - id: 2
//!     name: Second
//!     extra: true
//! ```
//!
//! A list item may itself be a primitive (`- 42`), a nested array
//! (`- [2]: 1,2`), or an object whose first field shares the hyphen line.
//! When that first field is an array with a block body, the remaining
//! fields sit two indent levels below the item.
//!
//! # Delimiters
//!
//! Arrays and tables can be joined by comma (default), tab, or pipe. The
//! non-default delimiters are recorded inside the header bracket:
//!
//! ```text
//! tags[3|]: a|b|c
//! rows[2\t]{id\tname}:
//! ```
//!
//! The delimiter is local to its array; nested arrays inside list items
//! default back to comma.
//!
//! # Length markers
//!
//! An optional `#` may prefix the length (`[#3]: 1,2,3`), signaling that
//! the count is authoritative. Decoding accepts both forms.
//!
//! # Strict mode
//!
//! The decoder defaults to strict mode, which rejects:
//!
//! - indentation that is not a multiple of the indent size
//! - tab characters in indentation
//! - blank lines between the first and last item of an array body
//! - surplus items or rows beyond the declared length
//!
//! Lenient mode computes depth by floor division, ignores tabs in
//! indentation, and tolerates blank lines inside arrays. Every document a
//! strict decode accepts, a lenient decode accepts with the same value.
//!
//! # Conformance
//!
//! The format follows the TOON specification from
//! <https://github.com/toon-format/spec>.

// This module contains only documentation; no implementation code
