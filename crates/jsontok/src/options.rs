/// Configuration options for the streaming JSON tokenizer.
///
/// There is a single knob: the flush threshold for string literal content.
/// It bounds the memory held for one string body and controls nothing else:
/// numbers and keywords are always buffered whole, and every other token is
/// at most a handful of characters.
///
/// # Examples
///
/// ```rust
/// use jsontok::{LexerOptions, TokenKind, tokenize};
///
/// let tokens: Vec<_> = tokenize("\"abcd\"", LexerOptions { string_chunk_size: 2 })
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// let chunks: Vec<&str> = tokens
///     .iter()
///     .filter(|t| t.kind == TokenKind::StringChunk)
///     .map(|t| t.text.as_str())
///     .collect();
/// assert_eq!(chunks, ["ab", "cd"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LexerOptions {
    /// Byte threshold at which in-progress string content is flushed as a
    /// [`StringChunk`](crate::TokenKind::StringChunk) token.
    ///
    /// The check runs after each completed character (or escape pair), so a
    /// flush may overshoot the threshold by the width of what was just
    /// pushed, and never splits an escape pair. Values below 1 are treated
    /// as 1.
    ///
    /// # Default
    ///
    /// `1024`
    pub string_chunk_size: usize,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            string_chunk_size: 1024,
        }
    }
}
