use alloc::{string::String, vec, vec::Vec};

use crate::{LexerOptions, Token, TokenKind, tokenize};

fn lex(input: &str) -> Vec<Token> {
    tokenize(input, LexerOptions::default())
        .collect::<Result<_, _>>()
        .expect("input should tokenize")
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

fn rejoined(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

#[test]
fn empty_input_produces_no_tokens() {
    assert_eq!(lex(""), vec![]);
}

#[test]
fn whitespace_only_input_is_one_run() {
    assert_eq!(
        lex(" \t\r\n"),
        vec![Token::new(TokenKind::Whitespace, " \t\r\n")]
    );
}

#[test]
fn empty_object() {
    assert_eq!(
        lex("{}"),
        vec![
            Token::new(TokenKind::ObjectOpen, "{"),
            Token::new(TokenKind::ObjectClose, "}"),
        ]
    );
}

#[test]
fn empty_array() {
    assert_eq!(
        lex("[]"),
        vec![
            Token::new(TokenKind::ArrayOpen, "["),
            Token::new(TokenKind::ArrayClose, "]"),
        ]
    );
}

#[test]
fn array_of_numbers() {
    assert_eq!(
        lex("[1,2]"),
        vec![
            Token::new(TokenKind::ArrayOpen, "["),
            Token::new(TokenKind::Number, "1"),
            Token::new(TokenKind::Comma, ","),
            Token::new(TokenKind::Number, "2"),
            Token::new(TokenKind::ArrayClose, "]"),
        ]
    );
}

#[test]
fn escaped_quote_stays_raw() {
    assert_eq!(
        lex(r#""a\"b""#),
        vec![
            Token::new(TokenKind::StringOpen, "\""),
            Token::new(TokenKind::StringChunk, r#"a\"b"#),
            Token::new(TokenKind::StringClose, "\""),
        ]
    );
}

#[test]
fn empty_string_literal_has_no_chunk() {
    assert_eq!(
        kinds(&lex("\"\"")),
        vec![TokenKind::StringOpen, TokenKind::StringClose]
    );
}

#[test]
fn number_with_sign_fraction_and_exponent() {
    assert_eq!(lex("-0.5e+10"), vec![Token::new(TokenKind::Number, "-0.5e+10")]);
}

#[test]
fn number_literals_are_verbatim() {
    for literal in ["0", "-0", "7", "120", "0.125", "-3.0e-2", "9E5", "1e+01"] {
        assert_eq!(lex(literal), vec![Token::new(TokenKind::Number, literal)]);
    }
}

#[test]
fn keywords() {
    assert_eq!(
        kinds(&lex("[true, false, null]")),
        vec![
            TokenKind::ArrayOpen,
            TokenKind::True,
            TokenKind::Comma,
            TokenKind::Whitespace,
            TokenKind::False,
            TokenKind::Comma,
            TokenKind::Whitespace,
            TokenKind::Null,
            TokenKind::ArrayClose,
        ]
    );
}

#[test]
fn object_member_with_interior_whitespace() {
    assert_eq!(
        lex("{ \"a\" : 1 }"),
        vec![
            Token::new(TokenKind::ObjectOpen, "{"),
            Token::new(TokenKind::Whitespace, " "),
            Token::new(TokenKind::StringOpen, "\""),
            Token::new(TokenKind::StringChunk, "a"),
            Token::new(TokenKind::StringClose, "\""),
            Token::new(TokenKind::Whitespace, " "),
            Token::new(TokenKind::Colon, ":"),
            Token::new(TokenKind::Whitespace, " "),
            Token::new(TokenKind::Number, "1"),
            Token::new(TokenKind::Whitespace, " "),
            Token::new(TokenKind::ObjectClose, "}"),
        ]
    );
}

#[test]
fn object_keys_are_string_token_runs() {
    assert_eq!(
        kinds(&lex("{\"k\":\"v\"}")),
        vec![
            TokenKind::ObjectOpen,
            TokenKind::StringOpen,
            TokenKind::StringChunk,
            TokenKind::StringClose,
            TokenKind::Colon,
            TokenKind::StringOpen,
            TokenKind::StringChunk,
            TokenKind::StringClose,
            TokenKind::ObjectClose,
        ]
    );
}

#[test]
fn nested_containers() {
    assert_eq!(
        kinds(&lex("{\"a\":[{\"b\":null}]}")),
        vec![
            TokenKind::ObjectOpen,
            TokenKind::StringOpen,
            TokenKind::StringChunk,
            TokenKind::StringClose,
            TokenKind::Colon,
            TokenKind::ArrayOpen,
            TokenKind::ObjectOpen,
            TokenKind::StringOpen,
            TokenKind::StringChunk,
            TokenKind::StringClose,
            TokenKind::Colon,
            TokenKind::Null,
            TokenKind::ObjectClose,
            TokenKind::ArrayClose,
            TokenKind::ObjectClose,
        ]
    );
}

#[test]
fn multiple_top_level_values_are_accepted() {
    assert_eq!(
        kinds(&lex("{} []")),
        vec![
            TokenKind::ObjectOpen,
            TokenKind::ObjectClose,
            TokenKind::Whitespace,
            TokenKind::ArrayOpen,
            TokenKind::ArrayClose,
        ]
    );
    assert_eq!(
        kinds(&lex("1 2")),
        vec![TokenKind::Number, TokenKind::Whitespace, TokenKind::Number]
    );
}

#[test]
fn adjacent_top_level_keyword_and_number() {
    // A keyword run ends at the first non-lowercase character; at the top
    // level whatever follows is simply the next value.
    assert_eq!(
        kinds(&lex("true1")),
        vec![TokenKind::True, TokenKind::Number]
    );
}

#[test]
fn round_trip_reproduces_the_input() {
    let documents = [
        "",
        "   ",
        "{}",
        "[1,2]",
        r#"{"a": [1, -2.5, {"b": "c\nd"}], "e": [[]], "f": null}"#,
        "\r\n\t {\"weird\" :\t[ true,false , null ]\n}\n",
        r#""é\\\"""#,
        "-0.5e+10 1e-2\nnull",
    ];
    for doc in documents {
        assert_eq!(rejoined(&lex(doc)), doc, "round-trip failed for {doc:?}");
    }
}

#[test]
fn display_concatenation_matches_raw_text() {
    use core::fmt::Write as _;

    let mut rendered = String::new();
    for token in lex("[true, \"a\"]") {
        write!(rendered, "{token}").unwrap();
    }
    assert_eq!(rendered, "[true, \"a\"]");
}
