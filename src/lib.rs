//! Streaming JSON syntax checker.
//!
//! Bytes are pulled one at a time by [`Scanner`], turned into tokens, and fed
//! to a pushdown automaton ([`Validator`]) that never materialises a value.

use std::io::Read;

mod byte_src;
pub mod json_stack_validator;
pub mod json_tok;
pub mod json_types;

pub use json_stack_validator::{Symbol, Validator, MAX_DEPTH};
pub use json_tok::Scanner;
pub use json_types::{JsonError, Kind, LexError, SyntaxError, Token};

/// Validate everything `reader` yields. The reader is dropped before this
/// returns, on success and on the first error alike.
pub fn validate_reader<R: Read>(reader: R) -> Result<(), JsonError> {
    let mut scanner = Scanner::new(reader);
    Validator::new().validate(&mut scanner)
}

pub fn validate_slice(input: &[u8]) -> Result<(), JsonError> {
    validate_reader(input)
}

pub fn is_valid(input: &[u8]) -> bool {
    validate_slice(input).is_ok()
}
