//! Render scanned lines back to text.
//!
//! Themes map token kinds to color strings, the renderer re-emits source lines
//! from token offsets with those colors around each token, and the dump lists
//! tokens one per row.

mod dump;
mod render;
mod theme;

pub use dump::write_tokens;
pub use render::{gutter_width, print_lines, render_line, render_to_string};
pub use theme::{Palette, Theme, UnknownTheme};
