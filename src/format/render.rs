//! Colorized re-emission of scanned lines, positioned from token offsets.

use std::io::Write;

use tracing::debug;

use super::theme::Theme;
use crate::error::Result;
use crate::lexer::{Line, Token, kind_at};
use crate::lines::{line_bounds, scan_lines};

/// Digits needed for the largest line number; at least 1.
#[must_use]
pub fn gutter_width(line_count: usize) -> usize {
    line_count.max(1).ilog10() as usize + 1
}

/// Write one line: gaps verbatim, each token wrapped in its color and the
/// reset string, then a newline. `line_start` is the absolute offset of `text`.
///
/// # Panics
///
/// If a token lies outside `text`.
pub fn render_line<W: Write + ?Sized>(
    out: &mut W,
    text: &str,
    tokens: &[Token],
    line_start: usize,
    theme: Theme,
) -> Result<()> {
    let palette = theme.palette();
    let mut pos = 0;

    for token in tokens {
        let start = token.start() - line_start;
        let end = token.end() - line_start + 1;
        let kind = kind_at(text, start, line_start)?;
        out.write_all(text[pos..start].as_bytes())?;
        out.write_all(palette.color(kind).as_bytes())?;
        out.write_all(text[start..end].as_bytes())?;
        out.write_all(palette.reset.as_bytes())?;
        pos = end;
    }
    out.write_all(text[pos..].as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Write every line of `source`, optionally behind a right-aligned line number
/// gutter. Blank lines print only the gutter.
///
/// Line starts are found by walking the source, not read back from tokens.
pub fn print_lines<W: Write + ?Sized>(
    out: &mut W,
    source: &str,
    lines: &[Line],
    show_line_numbers: bool,
    theme: Theme,
) -> Result<()> {
    let width = gutter_width(lines.len());
    let mut start = 0;

    for (i, tokens) in lines.iter().enumerate() {
        let (end, next) = line_bounds(source, start);
        if show_line_numbers {
            write!(out, "{:>width$} ", i + 1)?;
        }
        if tokens.is_empty() {
            out.write_all(b"\n")?;
        } else {
            render_line(out, &source[start..end], tokens, start, theme)?;
        }
        start = next;
    }

    debug!(lines = lines.len(), %theme, show_line_numbers, "rendered buffer");
    Ok(())
}

/// Scan and render a whole buffer into a string.
pub fn render_to_string(source: &str, show_line_numbers: bool, theme: Theme) -> Result<String> {
    let lines = scan_lines(source)?;
    let mut out = Vec::with_capacity(source.len() + lines.len() * 8);
    print_lines(&mut out, source, &lines, show_line_numbers, theme)?;
    // Only whole source lines and ASCII decorations were written.
    Ok(String::from_utf8_lossy(&out).into_owned())
}
