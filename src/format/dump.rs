use std::io::Write;

use crate::error::Result;
use crate::lexer::Line;

/// List every token as `<line>:<start>-<end> <kind> <text>`, with ` = <value>`
/// appended for numbers.
pub fn write_tokens<W: Write + ?Sized>(out: &mut W, source: &str, lines: &[Line]) -> Result<()> {
    for (i, tokens) in lines.iter().enumerate() {
        for token in tokens {
            let kind = token.kind(source)?;
            write!(out, "{}:{}-{} {} {}", i + 1, token.start, token.end, kind, token.text(source))?;
            if let Some(value) = token.value {
                write!(out, " = {value}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
