//! Styling: map token kinds to ANSI color strings.
//!
//! - **Word**: names and labels (`title`, `rent_2024`)
//! - **Number**: numeric literals (`12`, `4.5`, `1e3`)
//! - **Punctuator**: `: = ( ) + - / *`

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::lexer::TokenKind;

/// The four strings a theme selects. Every colored token is written as
/// `<color><text><reset>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub reset: &'static str,
    pub word: &'static str,
    pub number: &'static str,
    pub punctuator: &'static str,
}

impl Palette {
    #[must_use]
    pub fn color(&self, kind: TokenKind) -> &'static str {
        match kind {
            TokenKind::Word => self.word,
            TokenKind::Number => self.number,
            TokenKind::Punctuator => self.punctuator,
        }
    }
}

const MONO: Palette = Palette { reset: "", word: "", number: "", punctuator: "" };

const LIGHT: Palette = Palette {
    reset: "\x1b[0m",
    word: "\x1b[37m",
    number: "\x1b[32m",
    punctuator: "\x1b[34m",
};

const DARK: Palette = Palette {
    reset: "\x1b[0m",
    word: "\x1b[97m",       // bright white
    number: "\x1b[93m",     // bright yellow
    punctuator: "\x1b[36m", // cyan
};

/// Rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// No escape sequences at all.
    #[default]
    Mono,
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Mono, Theme::Light, Theme::Dark];

    #[must_use]
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Mono => &MONO,
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Theme::Mono => "mono",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{0}' (expected mono, light or dark)")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}
