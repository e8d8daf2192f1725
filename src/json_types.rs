use std::fmt;
use std::io;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    LeftBrace,
    RightBrace,
    LeftSquare,
    RightSquare,
    Colon,
    Comma,
    String,
    Null,
    True,
    False,
    Number,
    EndOfInput,
}

/// One lexical unit.
///
/// * punctuation / `EndOfInput` → empty `text`
/// * `String`  → decoded content (escapes resolved)
/// * `Number`  → the digits exactly as they appeared
/// * keywords  → their spelling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: Kind,
    pub text: String,
}

impl Token {
    pub fn punct(kind: Kind) -> Self {
        Self {
            kind,
            text: String::new(),
        }
    }

    pub fn with_text(kind: Kind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is_eoi(&self) -> bool {
        self.kind == Kind::EndOfInput
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Kind::LeftBrace => f.write_str("{"),
            Kind::RightBrace => f.write_str("}"),
            Kind::LeftSquare => f.write_str("["),
            Kind::RightSquare => f.write_str("]"),
            Kind::Colon => f.write_str(":"),
            Kind::Comma => f.write_str(","),
            Kind::String => write!(f, "{:?}", self.text),
            Kind::Null | Kind::True | Kind::False | Kind::Number => f.write_str(&self.text),
            Kind::EndOfInput => f.write_str("<end of input>"),
        }
    }
}

/// Faults found while turning bytes into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character: {}", .0.escape_ascii())]
    UnexpectedCharacter(u8),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid escape sequence in string")]
    InvalidEscape,
    #[error("control character inside string")]
    ControlCharacterInString,
    #[error("misspelled literal, expected 'null', 'true' or 'false'")]
    MisspelledLiteral,
    #[error("numbers cannot have leading zeroes")]
    LeadingZero,
    #[error("exponent is missing its digits")]
    InvalidExponent,
    #[error("malformed number")]
    InvalidNumber,
}

/// Faults found by the pushdown automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("reached closing bracket prematurely")]
    PrematureCloser,
    #[error("cannot find corresponding opening bracket")]
    UnmatchedCloser,
    #[error("nesting exceeds the maximum depth of {}", crate::MAX_DEPTH)]
    DepthExceeded,
    #[error("did not expect comma")]
    InvalidComma,
    #[error("found colon prematurely")]
    PrematureColon,
    #[error("could not find corresponding key for value")]
    OrphanValue,
    #[error("string is not a valid key or element here")]
    InvalidString,
    #[error("value is not allowed here")]
    InvalidValue,
    #[error("reached end of input prematurely")]
    PrematureEndOfInput,
}

#[derive(Debug, Error)]
pub enum JsonError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

impl JsonError {
    pub fn as_lex(&self) -> Option<LexError> {
        match self {
            JsonError::Lex(e) => Some(*e),
            _ => None,
        }
    }

    pub fn as_syntax(&self) -> Option<SyntaxError> {
        match self {
            JsonError::Syntax(e) => Some(*e),
            _ => None,
        }
    }
}
