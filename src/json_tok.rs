//! `json_tok` – pull scanner turning a byte stream into [`Token`]s.
//
//  Every lexical check (escapes, control bytes, keyword spelling, number
//  grammar) happens here, so the validator only ever sees well-formed tokens.

use std::io::Read;

use log::trace;

use crate::byte_src::ByteSource;
use crate::json_types::{JsonError, Kind, LexError, Token};

#[inline]
fn push_char(buf: &mut Vec<u8>, c: char) {
    let mut tmp = [0u8; 4];
    buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
}

/// A lead surrogate that never met its trail half decodes to U+FFFD.
#[inline]
fn flush_lead(buf: &mut Vec<u8>, lead: &mut Option<u16>) {
    if lead.take().is_some() {
        push_char(buf, char::REPLACEMENT_CHARACTER);
    }
}

fn decode_unit(buf: &mut Vec<u8>, lead: &mut Option<u16>, unit: u16) {
    match unit {
        0xD800..=0xDBFF => {
            flush_lead(buf, lead);
            *lead = Some(unit);
        }
        0xDC00..=0xDFFF => {
            let c = match lead.take() {
                Some(hi) => {
                    let scalar = 0x10000 + ((u32::from(hi) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                    char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER)
                }
                None => char::REPLACEMENT_CHARACTER,
            };
            push_char(buf, c);
        }
        _ => {
            flush_lead(buf, lead);
            let c = char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER);
            push_char(buf, c);
        }
    }
}

#[derive(Debug)]
pub struct Scanner<R> {
    src: ByteSource<R>,
}

impl<R: Read> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            src: ByteSource::new(reader),
        }
    }

    /// Bytes consumed so far. A byte parked in the lookahead slot is not counted.
    pub fn offset(&self) -> u64 {
        self.src.offset()
    }

    /// Produce the next token. Once the input is exhausted this keeps
    /// returning `EndOfInput`.
    pub fn next_token(&mut self) -> Result<Token, JsonError> {
        let tok = self.scan()?;
        trace!("token {:?} ending at byte {}", tok, self.src.offset());
        Ok(tok)
    }

    fn scan(&mut self) -> Result<Token, JsonError> {
        loop {
            let Some(b) = self.src.next_byte()? else {
                return Ok(Token::punct(Kind::EndOfInput));
            };

            return match b {
                b' ' | b'\t' | b'\n' | b'\r' => continue,
                b'{' => Ok(Token::punct(Kind::LeftBrace)),
                b'}' => Ok(Token::punct(Kind::RightBrace)),
                b'[' => Ok(Token::punct(Kind::LeftSquare)),
                b']' => Ok(Token::punct(Kind::RightSquare)),
                b':' => Ok(Token::punct(Kind::Colon)),
                b',' => Ok(Token::punct(Kind::Comma)),
                b'"' => self.read_string(),
                b'n' => self.read_keyword("null", Kind::Null),
                b't' => self.read_keyword("true", Kind::True),
                b'f' => self.read_keyword("false", Kind::False),
                b'-' | b'0'..=b'9' => self.read_number(b),
                other => Err(LexError::UnexpectedCharacter(other).into()),
            };
        }
    }

    /// Opening quote already consumed.
    fn read_string(&mut self) -> Result<Token, JsonError> {
        let mut buf = Vec::new();
        let mut lead: Option<u16> = None;

        loop {
            let b = self
                .src
                .next_byte()?
                .ok_or(LexError::UnterminatedString)?;

            match b {
                b'"' => break,
                b'\\' => {
                    let esc = self.src.next_byte()?.ok_or(LexError::InvalidEscape)?;
                    let c = match esc {
                        b'"' => '"',
                        b'\\' => '\\',
                        b'/' => '/',
                        b'b' => '\u{0008}',
                        b'f' => '\u{000C}',
                        b'n' => '\n',
                        b'r' => '\r',
                        b't' => '\t',
                        b'u' => {
                            let unit = self.read_hex4()?;
                            decode_unit(&mut buf, &mut lead, unit);
                            continue;
                        }
                        _ => return Err(LexError::InvalidEscape.into()),
                    };
                    flush_lead(&mut buf, &mut lead);
                    push_char(&mut buf, c);
                }
                b if b < 0x20 => return Err(LexError::ControlCharacterInString.into()),
                b => {
                    flush_lead(&mut buf, &mut lead);
                    buf.push(b);
                }
            }
        }
        flush_lead(&mut buf, &mut lead);

        let text = String::from_utf8_lossy(&buf).into_owned();
        Ok(Token::with_text(Kind::String, text))
    }

    fn read_hex4(&mut self) -> Result<u16, JsonError> {
        let mut unit = 0u16;
        for _ in 0..4 {
            let b = self.src.next_byte()?.ok_or(LexError::InvalidEscape)?;
            let digit = (b as char).to_digit(16).ok_or(LexError::InvalidEscape)?;
            unit = (unit << 4) | digit as u16;
        }
        Ok(unit)
    }

    /// First byte of `word` already consumed. A mismatching byte goes back
    /// into the lookahead slot so the next call starts from it.
    fn read_keyword(&mut self, word: &'static str, kind: Kind) -> Result<Token, JsonError> {
        for want in word.bytes().skip(1) {
            match self.src.next_byte()? {
                Some(b) if b == want => {}
                Some(b) => {
                    self.src.put_back(b);
                    return Err(LexError::MisspelledLiteral.into());
                }
                None => return Err(LexError::MisspelledLiteral.into()),
            }
        }
        Ok(Token::with_text(kind, word))
    }

    /// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
    fn read_number(&mut self, first: u8) -> Result<Token, JsonError> {
        let mut text = String::new();
        text.push(first as char);

        let lead = if first == b'-' {
            match self.src.peek()? {
                Some(d @ b'0'..=b'9') => {
                    self.src.bump();
                    text.push(d as char);
                    d
                }
                _ => return Err(LexError::InvalidNumber.into()),
            }
        } else {
            first
        };

        if lead == b'0' {
            if matches!(self.src.peek()?, Some(b'0'..=b'9')) {
                return Err(LexError::LeadingZero.into());
            }
        } else {
            self.take_digits(&mut text)?;
        }

        if self.src.peek()? == Some(b'.') {
            self.src.bump();
            text.push('.');
            if self.take_digits(&mut text)? == 0 {
                return Err(LexError::InvalidNumber.into());
            }
        }

        if let Some(e @ (b'e' | b'E')) = self.src.peek()? {
            self.src.bump();
            text.push(e as char);
            if let Some(sign @ (b'+' | b'-')) = self.src.peek()? {
                self.src.bump();
                text.push(sign as char);
            }
            if self.take_digits(&mut text)? == 0 {
                return Err(LexError::InvalidExponent.into());
            }
        }

        Ok(Token::with_text(Kind::Number, text))
    }

    fn take_digits(&mut self, text: &mut String) -> Result<usize, JsonError> {
        let mut n = 0;
        while let Some(d @ b'0'..=b'9') = self.src.peek()? {
            self.src.bump();
            text.push(d as char);
            n += 1;
        }
        Ok(n)
    }
}
