//! Lexer for Sanity schema source (a JavaScript/TypeScript subset).
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//! Only the shapes the schema scanner cares about get dedicated kinds: delimiters, `:` and `,`,
//! identifiers, and string literals. Everything else is either trivia or lumped into `Punct`.
//!
//! ## Error handling
//!
//! The lexer coalesces consecutive error characters (stray quotes, unterminated strings,
//! non-ASCII symbols) into single `Garbage` tokens rather than producing one error per character.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

/// Token kinds recognized in schema source.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum TokenKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    /// Single- or double-quoted string, quotes included. Cannot span lines.
    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    StringLiteral,

    /// Backtick template string. Never treated as a property value.
    #[regex(r"`(?:[^`\\]|\\.)*`")]
    TemplateLiteral,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Id,

    #[regex(r"[0-9][0-9a-zA-Z_.]*")]
    Number,

    /// Operators and statement punctuation the scanner never inspects.
    #[regex(r"=>|[.;=<>!&|?+\-*/%^~@#]")]
    Punct,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// Coalesced unrecognized characters
    Garbage,
}

use TokenKind::*;

impl TokenKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment | BlockComment)
    }

    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, ParenOpen | BracketOpen | BraceOpen)
    }

    #[inline]
    pub fn is_close(self) -> bool {
        matches!(self, ParenClose | BracketClose | BraceClose)
    }

    /// The closing kind for an opening delimiter.
    pub fn closing(self) -> Option<TokenKind> {
        match self {
            ParenOpen => Some(ParenClose),
            BracketOpen => Some(BracketClose),
            BraceOpen => Some(BraceClose),
            _ => None,
        }
    }

    /// Source spelling of a delimiter, for diagnostics.
    pub fn delimiter_str(self) -> &'static str {
        match self {
            ParenOpen => "(",
            ParenClose => ")",
            BracketOpen => "[",
            BracketClose => "]",
            BraceOpen => "{",
            BraceClose => "}",
            _ => "",
        }
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens, trivia included.
///
/// Consecutive lexer errors are coalesced into single `Garbage` tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(Garbage, range_to_text_range(start..end)));
                }
                tokens.push(Token::new(kind, range_to_text_range(lexer.span())));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        Garbage,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[std::ops::Range::<usize>::from(token.span)]
}

/// Content of a string literal with its quotes trimmed. Escapes are kept verbatim.
pub fn string_content(literal: &str) -> &str {
    if literal.len() < 2 {
        return "";
    }
    &literal[1..literal.len() - 1]
}
