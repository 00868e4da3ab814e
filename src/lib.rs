pub mod cli;
pub mod error;
pub mod format;
pub mod lexer;
pub mod lines;

pub use error::{Error, Result, Span};

#[cfg(test)]
mod tests;
