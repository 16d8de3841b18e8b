//! The token model: a kind tag plus the exact raw source text.

use alloc::string::String;
use core::fmt;

/// The lexical category of a [`Token`].
///
/// String literals are emitted as three or more tokens: a `StringOpen` for
/// the opening quote, zero or more `StringChunk`s carrying the raw body, and
/// a `StringClose` for the closing quote. Everything else is a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// `{`
    ObjectOpen,
    /// `}`
    ObjectClose,
    /// `[`
    ArrayOpen,
    /// `]`
    ArrayClose,
    /// The opening `"` of a string literal.
    StringOpen,
    /// A run of raw string body characters, escapes included verbatim.
    StringChunk,
    /// The closing `"` of a string literal.
    StringClose,
    /// A complete number literal, preserved verbatim.
    Number,
    /// The keyword `true`.
    True,
    /// The keyword `false`.
    False,
    /// The keyword `null`.
    Null,
    /// A run of space, line feed, carriage return, or horizontal tab.
    Whitespace,
    /// `,`
    Comma,
    /// `:`
    Colon,
}

/// One lexical unit of a JSON document.
///
/// `text` is the exact characters consumed to produce the token, never
/// transformed or decoded. Concatenating the `text` of every token
/// in emission order reproduces the original input.
///
/// # Examples
///
/// ```rust
/// use jsontok::{Token, TokenKind};
///
/// let token = Token::new(TokenKind::Number, "-0.5e+10");
/// assert_eq!(token.kind, TokenKind::Number);
/// assert_eq!(token.text, "-0.5e+10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// The lexical category.
    pub kind: TokenKind,
    /// The raw source text that produced this token.
    pub text: String,
}

impl Token {
    /// Creates a token from a kind and its raw text.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    /// Writes the raw source text, so that formatting a token stream
    /// reproduces the input.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
