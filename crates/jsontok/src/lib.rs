//! A streaming, chunk-fed JSON tokenizer.
//!
//! `jsontok` turns text chunks of arbitrary size into a lazy sequence of
//! [`Token`]s, without ever holding the whole document in memory. Each token
//! carries its exact raw source text, so concatenating the `text` of every
//! emitted token reproduces the input byte for byte. Long string literals are
//! flushed incrementally as [`TokenKind::StringChunk`] tokens once a
//! configurable buffer threshold is reached.
//!
//! The tokenizer is the front end of a JSON pipeline: it does not build
//! values, decode escapes, or convert numbers. Downstream consumers (a tree
//! builder, a SAX-style handler, a validator) do that with the token stream.
//!
//! # Examples
//!
//! ```rust
//! use jsontok::{LexerOptions, Token, TokenKind, tokenize};
//!
//! let tokens: Vec<Token> = tokenize("[1,2]", LexerOptions::default())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(tokens[1], Token::new(TokenKind::Number, "1"));
//! let raw: String = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(raw, "[1,2]");
//! ```
//!
//! Input can arrive in chunks; the lexer pauses wherever the data runs out
//! and resumes on the next [`StreamingLexer::feed`]:
//!
//! ```rust
//! use jsontok::{LexerOptions, StreamingLexer, TokenKind};
//!
//! let mut lexer = StreamingLexer::new(LexerOptions::default());
//! lexer.feed("fal");
//! assert!(lexer.next().is_none()); // mid-keyword: need more input
//! lexer.feed("se");
//!
//! let token = lexer.finish().next().unwrap().unwrap();
//! assert_eq!(token.kind, TokenKind::False);
//! assert_eq!(token.text, "false");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod lexer;
mod options;
mod source;
mod token;

#[cfg(test)]
mod tests;

pub use error::{LexerError, SyntaxErrorKind};
pub use lexer::{ClosedStreamingLexer, StreamingLexer, tokenize};
pub use options::LexerOptions;
pub use token::{Token, TokenKind};
