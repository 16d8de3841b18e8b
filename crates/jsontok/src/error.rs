use alloc::string::String;
use thiserror::Error;

/// What the lexer tripped over.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A character no grammar rule accepts at the current position.
    #[error("unexpected character '{0}'")]
    InvalidCharacter(char),
    /// The input ended in the middle of a construct.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A lowercase run that is not exactly `true`, `false`, or `null`.
    #[error("invalid keyword '{0}'")]
    InvalidKeyword(String),
}

/// A lexical syntax error.
///
/// This is the only failure the tokenizer produces: it is raised at the first
/// grammar violation, after which the token stream is over for good. Tokens
/// emitted before the error remain valid.
///
/// # Examples
///
/// ```rust
/// use jsontok::{LexerOptions, SyntaxErrorKind, tokenize};
///
/// let err = tokenize("{,}", LexerOptions::default())
///     .find_map(|result| result.err())
///     .unwrap();
/// assert_eq!(err.kind, SyntaxErrorKind::InvalidCharacter(','));
/// assert_eq!((err.line, err.column), (1, 2));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {line}:{column}")]
pub struct LexerError {
    /// Which grammar violation occurred.
    pub kind: SyntaxErrorKind,
    /// 1-based line of the offending position.
    pub line: usize,
    /// 1-based column of the offending position.
    pub column: usize,
}
