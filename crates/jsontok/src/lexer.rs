//! The streaming tokenizer implementation.
//!
//! This module provides [`StreamingLexer`], which accepts JSON text in
//! chunks and yields [`Token`]s as soon as they are fully determined.
//!
//! # Examples
//!
//! ```rust
//! use jsontok::{LexerOptions, StreamingLexer, TokenKind};
//!
//! let mut lexer = StreamingLexer::new(LexerOptions::default());
//! lexer.feed(r#"{"key": [null, true, 3.14]}"#);
//! for token in lexer.finish() {
//!     let token = token.unwrap();
//!     println!("{:?} {:?}", token.kind, token.text);
//! }
//! ```

use alloc::{string::String, vec::Vec};
use core::mem;

use crate::{
    error::{LexerError, SyntaxErrorKind},
    options::LexerOptions,
    source::CharSource,
    token::{Token, TokenKind},
};

// ------------------------------------------------------------------------------------------------
// Lookahead
// ------------------------------------------------------------------------------------------------

/// The head of the character stream, as seen by one state-machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PeekedChar {
    /// The buffered chunks are exhausted but the stream is still open.
    Empty,
    /// The next unconsumed character.
    Char(char),
    /// The stream is closed; no further character will ever arrive.
    EndOfInput,
}

use PeekedChar::{Char, Empty, EndOfInput};

// ------------------------------------------------------------------------------------------------
// States
// ------------------------------------------------------------------------------------------------

/// An open container the lexer is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Object,
    Array,
}

/// A grammar position between tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pos {
    /// Top level, before or between whole values. End of input is fine here.
    Root,
    /// Just after `{`: either `}` or the first member's key.
    ObjectFirstKey,
    /// Just after a member separator: the next member's key is required.
    ObjectKey,
    /// After a member key: `:` is required.
    ObjectColon,
    /// After `:`: the member's value is required.
    ObjectValue,
    /// Just after `[`: either `]` or the first element.
    ArrayFirstValue,
    /// Just after an element separator: the next element is required.
    ArrayValue,
    /// After a value inside a container: a separator or the closer.
    AfterValue,
}

/// Progress through a number literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    /// Consumed the leading `-`; a first digit is required.
    Sign,
    /// Consumed a leading `0`; only `.`, an exponent, or the end may follow.
    Zero,
    /// In the integer digit run.
    Integer,
    /// Consumed `.`; a fraction digit is required.
    Dot,
    /// In the fraction digit run.
    Fraction,
    /// Consumed `e`/`E`; a sign or digit is required.
    ExponentMark,
    /// Consumed the exponent sign; a digit is required.
    ExponentSign,
    /// In the exponent digit run.
    Exponent,
}

/// The single explicit state tag: either sitting between tokens at a grammar
/// position, or part-way through one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    At(Pos),
    /// Accumulating a whitespace run; resumes at the carried position.
    Whitespace(Pos),
    /// Inside a string body. Key strings resume before the colon, value
    /// strings resume after the value. `escaped` means the previous
    /// character was a backslash whose partner has not been consumed yet.
    Str { key: bool, escaped: bool },
    Number(NumberState),
    /// Accumulating a lowercase keyword run.
    Keyword,
    /// A syntax error was reported; the stream is over.
    Failed,
}

/// Outcome of one state-machine step.
enum Step {
    /// One token is ready.
    Emit(Token),
    /// State advanced (and possibly a character was consumed), no token yet.
    Advance,
    /// Out of data while the stream is still open: wait for the next chunk.
    Pending,
    /// End of input at the top level: the stream ended normally.
    Finished,
}

// ------------------------------------------------------------------------------------------------
// Lexer
// ------------------------------------------------------------------------------------------------

/// The streaming JSON tokenizer.
///
/// `StreamingLexer` can be fed partial or complete JSON input in chunks. It
/// implements `Iterator` to yield `Token`s lazily: `next` runs the state
/// machine forward until a token is fully determined, more input is needed,
/// or the grammar is violated. `None` from an open lexer means "need more
/// input": feed another chunk and keep pulling, or call [`finish`] to
/// declare the input complete.
///
/// [`finish`]: StreamingLexer::finish
///
/// # Examples
///
/// ```rust
/// use jsontok::{LexerOptions, StreamingLexer, TokenKind};
///
/// let mut lexer = StreamingLexer::new(LexerOptions::default());
/// lexer.feed("[tr");
/// let first = lexer.next().unwrap().unwrap();
/// assert_eq!(first.kind, TokenKind::ArrayOpen);
/// assert!(lexer.next().is_none()); // mid-keyword: need more input
///
/// lexer.feed("ue]");
/// let kinds: Vec<_> = lexer
///     .finish()
///     .map(|t| t.unwrap().kind)
///     .collect();
/// assert_eq!(kinds, [TokenKind::True, TokenKind::ArrayClose]);
/// ```
#[derive(Debug)]
pub struct StreamingLexer {
    source: CharSource,
    end_of_input: bool,

    /// Current position, maintained for error reports.
    line: usize,
    column: usize,

    state: LexState,
    /// Stack of open containers; decides what may follow a finished value.
    scopes: Vec<Scope>,

    /// Scratch for the token under construction, shared by whitespace,
    /// string, number, and keyword accumulation: at most one token is ever
    /// in flight.
    buffer: String,

    string_chunk_size: usize,
}

impl Default for StreamingLexer {
    fn default() -> Self {
        Self::new(LexerOptions::default())
    }
}

impl Iterator for StreamingLexer {
    type Item = Result<Token, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// A `StreamingLexer` that has been closed to further input.
///
/// Returned by [`StreamingLexer::finish`]. Iteration drains the remaining
/// tokens and then ends: `None` from a closed lexer means the stream is over,
/// not that more input is needed.
#[derive(Debug)]
pub struct ClosedStreamingLexer {
    lexer: StreamingLexer,
}

impl Iterator for ClosedStreamingLexer {
    type Item = Result<Token, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lexer.next_token()
    }
}

/// Tokenizes a complete in-memory document.
///
/// Convenience for the common case: one [`StreamingLexer::feed`] followed by
/// [`StreamingLexer::finish`].
///
/// # Examples
///
/// ```rust
/// use jsontok::{LexerOptions, TokenKind, tokenize};
///
/// let kinds: Vec<_> = tokenize("{}", LexerOptions::default())
///     .map(|t| t.unwrap().kind)
///     .collect();
/// assert_eq!(kinds, [TokenKind::ObjectOpen, TokenKind::ObjectClose]);
/// ```
#[must_use]
pub fn tokenize(text: &str, options: LexerOptions) -> ClosedStreamingLexer {
    let mut lexer = StreamingLexer::new(options);
    lexer.feed(text);
    lexer.finish()
}

impl StreamingLexer {
    /// Creates a new `StreamingLexer` with the given options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsontok::{LexerOptions, StreamingLexer};
    ///
    /// let lexer = StreamingLexer::new(LexerOptions {
    ///     string_chunk_size: 64,
    /// });
    /// ```
    #[must_use]
    pub fn new(options: LexerOptions) -> Self {
        Self {
            source: CharSource::new(),
            end_of_input: false,

            line: 1,
            column: 1,

            state: LexState::At(Pos::Root),
            scopes: Vec::new(),

            buffer: String::new(),

            string_chunk_size: options.string_chunk_size.max(1),
        }
    }

    /// Feeds a chunk of JSON text into the lexer.
    ///
    /// Chunks may split the input anywhere, even mid-token or mid-escape,
    /// as long as their original order is preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use jsontok::{LexerOptions, StreamingLexer};
    /// let mut lexer = StreamingLexer::new(LexerOptions::default());
    /// lexer.feed("{\"hello\":");
    /// ```
    pub fn feed(&mut self, text: &str) {
        self.source.push(text);
    }

    /// Marks the end of input and returns a closed lexer yielding the
    /// remaining tokens.
    ///
    /// After `finish`, constructs that were waiting for more data either
    /// complete (a number or keyword ending at end of input) or fail with
    /// [`SyntaxErrorKind::UnexpectedEndOfInput`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsontok::{LexerOptions, StreamingLexer, Token, TokenKind};
    ///
    /// let mut lexer = StreamingLexer::new(LexerOptions::default());
    /// lexer.feed("-0.5e+10");
    /// let tokens: Vec<Token> = lexer.finish().collect::<Result<_, _>>().unwrap();
    /// assert_eq!(tokens, [Token::new(TokenKind::Number, "-0.5e+10")]);
    /// ```
    #[must_use]
    pub fn finish(mut self) -> ClosedStreamingLexer {
        self.end_of_input = true;
        ClosedStreamingLexer { lexer: self }
    }

    /// Drive the state machine until one token is ready, more data is
    /// needed, the stream ends, or the grammar is violated. Errors latch:
    /// after yielding `Err` once, the lexer only returns `None`.
    fn next_token(&mut self) -> Option<Result<Token, LexerError>> {
        if matches!(self.state, LexState::Failed) {
            return None;
        }

        loop {
            let ahead = self.peek_char();
            match self.step(ahead) {
                Ok(Step::Emit(token)) => return Some(Ok(token)),
                Ok(Step::Advance) => {}
                Ok(Step::Pending | Step::Finished) => return None,
                Err(err) => {
                    self.state = LexState::Failed;
                    return Some(Err(err));
                }
            }
        }
    }

    // --------------------------------------------------------------------------------------------
    // Cursor
    // --------------------------------------------------------------------------------------------

    fn peek_char(&mut self) -> PeekedChar {
        if let Some(ch) = self.source.peek() {
            return Char(ch);
        }
        if self.end_of_input {
            return EndOfInput;
        }
        Empty
    }

    fn advance(&mut self) {
        if let Some(ch) = self.source.next() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    // --------------------------------------------------------------------------------------------
    // State machine
    // --------------------------------------------------------------------------------------------

    fn step(&mut self, ahead: PeekedChar) -> Result<Step, LexerError> {
        match self.state {
            LexState::At(pos) => self.step_position(pos, ahead),
            LexState::Whitespace(resume) => Ok(self.step_whitespace(resume, ahead)),
            LexState::Str { key, escaped } => self.step_string(key, escaped, ahead),
            LexState::Number(number) => self.step_number(number, ahead),
            LexState::Keyword => self.step_keyword(ahead),
            LexState::Failed => Ok(Step::Pending),
        }
    }

    fn step_position(&mut self, pos: Pos, ahead: PeekedChar) -> Result<Step, LexerError> {
        let ch = match ahead {
            Empty => return Ok(Step::Pending),
            EndOfInput if pos == Pos::Root => return Ok(Step::Finished),
            EndOfInput => return Err(self.unexpected_end()),
            Char(ch) => ch,
        };

        if is_whitespace(ch) {
            self.advance();
            self.buffer.push(ch);
            self.state = LexState::Whitespace(pos);
            return Ok(Step::Advance);
        }

        match pos {
            Pos::Root | Pos::ObjectValue | Pos::ArrayValue => self.begin_value(ch),
            Pos::ObjectFirstKey => match ch {
                '}' => Ok(self.close_scope(TokenKind::ObjectClose, ch)),
                '"' => Ok(self.begin_string(true)),
                _ => Err(self.unexpected_char(ch)),
            },
            Pos::ObjectKey => match ch {
                '"' => Ok(self.begin_string(true)),
                _ => Err(self.unexpected_char(ch)),
            },
            Pos::ObjectColon => match ch {
                ':' => Ok(self.emit_punct(TokenKind::Colon, ch, Pos::ObjectValue)),
                _ => Err(self.unexpected_char(ch)),
            },
            Pos::ArrayFirstValue => match ch {
                ']' => Ok(self.close_scope(TokenKind::ArrayClose, ch)),
                _ => self.begin_value(ch),
            },
            Pos::AfterValue => match (self.scopes.last().copied(), ch) {
                (Some(Scope::Object), ',') => {
                    Ok(self.emit_punct(TokenKind::Comma, ch, Pos::ObjectKey))
                }
                (Some(Scope::Object), '}') => Ok(self.close_scope(TokenKind::ObjectClose, ch)),
                (Some(Scope::Array), ',') => {
                    Ok(self.emit_punct(TokenKind::Comma, ch, Pos::ArrayValue))
                }
                (Some(Scope::Array), ']') => Ok(self.close_scope(TokenKind::ArrayClose, ch)),
                _ => Err(self.unexpected_char(ch)),
            },
        }
    }

    /// Dispatch on the first character of a value.
    fn begin_value(&mut self, ch: char) -> Result<Step, LexerError> {
        match ch {
            '{' => {
                self.scopes.push(Scope::Object);
                Ok(self.emit_punct_into(TokenKind::ObjectOpen, ch, LexState::At(Pos::ObjectFirstKey)))
            }
            '[' => {
                self.scopes.push(Scope::Array);
                Ok(self.emit_punct_into(TokenKind::ArrayOpen, ch, LexState::At(Pos::ArrayFirstValue)))
            }
            '"' => Ok(self.begin_string(false)),
            '-' => Ok(self.number_push(ch, NumberState::Sign)),
            '0' => Ok(self.number_push(ch, NumberState::Zero)),
            '1'..='9' => Ok(self.number_push(ch, NumberState::Integer)),
            'a'..='z' => {
                self.advance();
                self.buffer.push(ch);
                self.state = LexState::Keyword;
                Ok(Step::Advance)
            }
            _ => Err(self.unexpected_char(ch)),
        }
    }

    fn step_whitespace(&mut self, resume: Pos, ahead: PeekedChar) -> Step {
        match ahead {
            Empty => Step::Pending,
            Char(ch) if is_whitespace(ch) => {
                self.advance();
                self.buffer.push(ch);
                Step::Advance
            }
            // The run is over; the resumed position re-examines the lookahead.
            Char(_) | EndOfInput => {
                self.state = LexState::At(resume);
                Step::Emit(self.take_token(TokenKind::Whitespace))
            }
        }
    }

    fn begin_string(&mut self, key: bool) -> Step {
        self.advance();
        self.state = LexState::Str {
            key,
            escaped: false,
        };
        Step::Emit(Token::new(TokenKind::StringOpen, "\""))
    }

    fn step_string(&mut self, key: bool, escaped: bool, ahead: PeekedChar) -> Result<Step, LexerError> {
        let ch = match ahead {
            Empty => return Ok(Step::Pending),
            EndOfInput => return Err(self.unexpected_end()),
            Char(ch) => ch,
        };

        if escaped {
            // The partner of a backslash is copied without inspection:
            // escape validity is a later stage's concern, only the pairing
            // matters for finding the terminator.
            self.advance();
            self.buffer.push(ch);
            self.state = LexState::Str {
                key,
                escaped: false,
            };
            return Ok(self.flush_chunk_if_full());
        }

        match ch {
            // Flush the remainder first; the quote stays put until the next
            // step emits StringClose.
            '"' if !self.buffer.is_empty() => Ok(Step::Emit(self.take_token(TokenKind::StringChunk))),
            '"' => {
                self.advance();
                self.state = if key {
                    LexState::At(Pos::ObjectColon)
                } else {
                    LexState::At(self.after_value())
                };
                Ok(Step::Emit(Token::new(TokenKind::StringClose, "\"")))
            }
            '\\' => {
                self.advance();
                self.buffer.push(ch);
                self.state = LexState::Str { key, escaped: true };
                Ok(Step::Advance)
            }
            _ => {
                self.advance();
                self.buffer.push(ch);
                Ok(self.flush_chunk_if_full())
            }
        }
    }

    fn step_number(&mut self, number: NumberState, ahead: PeekedChar) -> Result<Step, LexerError> {
        use NumberState::{Dot, Exponent, ExponentMark, ExponentSign, Fraction, Integer, Sign, Zero};

        let ch = match ahead {
            Empty => return Ok(Step::Pending),
            EndOfInput => {
                return match number {
                    Zero | Integer | Fraction | Exponent => Ok(self.finish_number()),
                    Sign | Dot | ExponentMark | ExponentSign => Err(self.unexpected_end()),
                };
            }
            Char(ch) => ch,
        };

        match number {
            Sign => match ch {
                '0' => Ok(self.number_push(ch, Zero)),
                '1'..='9' => Ok(self.number_push(ch, Integer)),
                _ => Err(self.unexpected_char(ch)),
            },
            Zero => match ch {
                // No digit may follow a leading zero.
                '0'..='9' => Err(self.unexpected_char(ch)),
                '.' => Ok(self.number_push(ch, Dot)),
                'e' | 'E' => Ok(self.number_push(ch, ExponentMark)),
                _ => Ok(self.finish_number()),
            },
            Integer => match ch {
                '0'..='9' => Ok(self.number_push(ch, Integer)),
                '.' => Ok(self.number_push(ch, Dot)),
                'e' | 'E' => Ok(self.number_push(ch, ExponentMark)),
                _ => Ok(self.finish_number()),
            },
            Dot => match ch {
                '0'..='9' => Ok(self.number_push(ch, Fraction)),
                _ => Err(self.unexpected_char(ch)),
            },
            Fraction => match ch {
                '0'..='9' => Ok(self.number_push(ch, Fraction)),
                'e' | 'E' => Ok(self.number_push(ch, ExponentMark)),
                _ => Ok(self.finish_number()),
            },
            ExponentMark => match ch {
                '+' | '-' => Ok(self.number_push(ch, ExponentSign)),
                '0'..='9' => Ok(self.number_push(ch, Exponent)),
                _ => Err(self.unexpected_char(ch)),
            },
            ExponentSign => match ch {
                '0'..='9' => Ok(self.number_push(ch, Exponent)),
                _ => Err(self.unexpected_char(ch)),
            },
            Exponent => match ch {
                '0'..='9' => Ok(self.number_push(ch, Exponent)),
                _ => Ok(self.finish_number()),
            },
        }
    }

    fn step_keyword(&mut self, ahead: PeekedChar) -> Result<Step, LexerError> {
        match ahead {
            Empty => Ok(Step::Pending),
            Char(ch @ 'a'..='z') => {
                self.advance();
                self.buffer.push(ch);
                Ok(Step::Advance)
            }
            // The run is over; it must be one of the three keywords. The
            // terminating character, if any, is left for the next position.
            Char(_) | EndOfInput => {
                self.state = LexState::At(self.after_value());
                let kind = match self.buffer.as_str() {
                    "true" => TokenKind::True,
                    "false" => TokenKind::False,
                    "null" => TokenKind::Null,
                    _ => return Err(self.invalid_keyword()),
                };
                Ok(Step::Emit(self.take_token(kind)))
            }
        }
    }

    // --------------------------------------------------------------------------------------------
    // Emission helpers
    // --------------------------------------------------------------------------------------------

    /// Where a finished value leaves the lexer.
    fn after_value(&self) -> Pos {
        if self.scopes.is_empty() {
            Pos::Root
        } else {
            Pos::AfterValue
        }
    }

    /// Consume `ch`, emit it as a single-character token, resume at `pos`.
    fn emit_punct(&mut self, kind: TokenKind, ch: char, pos: Pos) -> Step {
        self.emit_punct_into(kind, ch, LexState::At(pos))
    }

    fn emit_punct_into(&mut self, kind: TokenKind, ch: char, state: LexState) -> Step {
        self.advance();
        self.state = state;
        Step::Emit(Token::new(kind, String::from(ch)))
    }

    /// Consume a closing bracket and pop its scope.
    fn close_scope(&mut self, kind: TokenKind, ch: char) -> Step {
        self.advance();
        self.scopes.pop();
        self.state = LexState::At(self.after_value());
        Step::Emit(Token::new(kind, String::from(ch)))
    }

    fn number_push(&mut self, ch: char, next: NumberState) -> Step {
        self.advance();
        self.buffer.push(ch);
        self.state = LexState::Number(next);
        Step::Advance
    }

    /// The literal is complete; the terminating character is not consumed.
    fn finish_number(&mut self) -> Step {
        self.state = LexState::At(self.after_value());
        Step::Emit(self.take_token(TokenKind::Number))
    }

    fn flush_chunk_if_full(&mut self) -> Step {
        if self.buffer.len() >= self.string_chunk_size {
            Step::Emit(self.take_token(TokenKind::StringChunk))
        } else {
            Step::Advance
        }
    }

    /// Hand the accumulated scratch over as one token.
    fn take_token(&mut self, kind: TokenKind) -> Token {
        Token::new(kind, mem::take(&mut self.buffer))
    }

    // --------------------------------------------------------------------------------------------
    // Errors
    // --------------------------------------------------------------------------------------------

    fn unexpected_char(&self, ch: char) -> LexerError {
        LexerError {
            kind: SyntaxErrorKind::InvalidCharacter(ch),
            line: self.line,
            column: self.column,
        }
    }

    fn unexpected_end(&self) -> LexerError {
        LexerError {
            kind: SyntaxErrorKind::UnexpectedEndOfInput,
            line: self.line,
            column: self.column,
        }
    }

    fn invalid_keyword(&mut self) -> LexerError {
        LexerError {
            kind: SyntaxErrorKind::InvalidKeyword(mem::take(&mut self.buffer)),
            line: self.line,
            column: self.column,
        }
    }
}

/// The four whitespace characters the grammar recognizes.
fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\n' | '\r' | '\t')
}
