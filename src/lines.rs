//! Line splitting and whole-buffer scanning.

use tracing::{debug, trace};

use crate::error::Result;
use crate::lexer::{Line, scan_line};

/// One logical line: its text without the terminator, and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'s> {
    pub text: &'s str,
    pub start: usize,
}

fn is_terminator(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

/// Bounds of the line starting at `start`: `(end, next)` where `end` is the
/// offset of its terminator (or `source.len()`) and `next` is where the
/// following line starts. `\r\n` is one terminator.
#[must_use]
pub fn line_bounds(source: &str, start: usize) -> (usize, usize) {
    let bytes = source.as_bytes();
    let rest = bytes.get(start..).unwrap_or_default();
    match rest.iter().position(|&b| is_terminator(b)) {
        None => (bytes.len(), bytes.len()),
        Some(i) => {
            let end = start + i;
            let next = if bytes[end] == b'\r' && bytes.get(end + 1) == Some(&b'\n') {
                end + 2
            } else {
                end + 1
            };
            (end, next)
        }
    }
}

/// Iterator over the logical lines of a buffer. See [`split_lines`].
#[derive(Debug, Clone)]
pub struct SplitLines<'s> {
    source: &'s str,
    pos: usize,
}

impl<'s> Iterator for SplitLines<'s> {
    type Item = SourceLine<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.source.len() {
            return None;
        }
        let start = self.pos;
        let (end, next) = line_bounds(self.source, start);
        self.pos = next;
        Some(SourceLine { text: &self.source[start..end], start })
    }
}

/// Split a buffer on `\n`, `\r` and `\r\n`.
///
/// Every terminator ends a line and a non-empty unterminated tail is one more
/// line, so `""` has no lines, `"a"` and `"a\n"` have one, and `"\n"` has one
/// empty line.
#[must_use]
pub fn split_lines(source: &str) -> SplitLines<'_> {
    SplitLines { source, pos: 0 }
}

/// Lex every line of `source`. The first error aborts the whole scan.
pub fn scan_lines(source: &str) -> Result<Vec<Line>> {
    let lines = split_lines(source)
        .enumerate()
        .map(|(i, line)| {
            let tokens = scan_line(line.text, line.start)?;
            trace!(line = i + 1, start = line.start, tokens = tokens.len(), "scanned line");
            Ok(tokens)
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(
        bytes = source.len(),
        lines = lines.len(),
        tokens = lines.iter().map(Vec::len).sum::<usize>(),
        "scanned buffer"
    );
    Ok(lines)
}
