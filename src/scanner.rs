//! Line scanning for the decoder.
//!
//! Splits input on `\n` into parsed lines carrying their indentation depth,
//! validating indentation when strict. Whitespace-only lines are captured
//! separately as blank-line records so the decoder can enforce the
//! blank-lines-inside-arrays rule. `\r` is not stripped; it flows into line
//! content and disappears only through ordinary token trimming.

use crate::error::{Error, Result};
use crate::options::DecodeOptions;

/// A non-blank input line with its computed depth.
#[derive(Clone, Debug)]
pub(crate) struct ParsedLine {
    pub content: String,
    pub depth: usize,
    pub line_number: usize,
}

/// The scanner output: parsed lines plus the numbers of blank lines.
#[derive(Debug)]
pub(crate) struct Scan {
    pub lines: Vec<ParsedLine>,
    pub blanks: Vec<usize>,
}

/// Scans `text` into parsed lines, enforcing strict-mode indentation rules.
///
/// Strict mode rejects tabs in the leading whitespace region and indents
/// that are not exact multiples of the grid size. Lenient mode ignores tabs
/// (they do not count toward the indent) and computes depth by floor
/// division.
pub(crate) fn scan(text: &str, options: &DecodeOptions) -> Result<Scan> {
    let mut lines = Vec::new();
    let mut blanks = Vec::new();

    for (idx, raw) in text.split('\n').enumerate() {
        let line_number = idx + 1;
        if raw.trim().is_empty() {
            blanks.push(line_number);
            continue;
        }

        let ws_end = raw
            .find(|c| c != ' ' && c != '\t')
            .expect("non-blank line has content");
        let leading = &raw[..ws_end];
        let indent = if leading.contains('\t') {
            if options.strict {
                return Err(Error::TabInIndent { line: line_number });
            }
            leading.bytes().filter(|&b| b == b' ').count()
        } else {
            ws_end
        };

        if options.strict && indent > 0 && indent % options.indent != 0 {
            return Err(Error::IndentNotMultiple {
                line: line_number,
                indent,
                indent_size: options.indent,
            });
        }

        lines.push(ParsedLine {
            content: raw[ws_end..].to_string(),
            depth: indent / options.indent,
            line_number,
        });
    }

    Ok(Scan { lines, blanks })
}

/// Cursor over parsed lines driving the recursive descent.
pub(crate) struct LineCursor {
    lines: Vec<ParsedLine>,
    pos: usize,
}

impl LineCursor {
    pub fn new(lines: Vec<ParsedLine>) -> Self {
        LineCursor { lines, pos: 0 }
    }

    pub fn peek(&self) -> Option<&ParsedLine> {
        self.lines.get(self.pos)
    }

    /// Returns the next line only if its depth is exactly `depth`.
    pub fn peek_at_depth(&self, depth: usize) -> Option<&ParsedLine> {
        self.peek().filter(|line| line.depth == depth)
    }

    pub fn next(&mut self) -> Option<ParsedLine> {
        let line = self.lines.get(self.pos).cloned();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Number of lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }

    /// Line number of the most recently consumed line.
    pub fn last_line_number(&self) -> usize {
        if self.pos == 0 {
            0
        } else {
            self.lines[self.pos - 1].line_number
        }
    }
}
