use crate::json_stack_validator::{Symbol, Validator, MAX_DEPTH};
use crate::json_types::{JsonError, Kind, LexError, SyntaxError};
use crate::validate_slice;


pub(crate) fn syntax_err(input: &str) -> SyntaxError {
    let res = validate_slice(input.as_bytes());
    match res.as_ref().err().and_then(JsonError::as_syntax) {
        Some(e) => e,
        None => panic!("expected a syntax error for {:?}, got {:?}", input, res),
    }
}

pub(crate) fn lex_err(input: &str) -> LexError {
    let res = validate_slice(input.as_bytes());
    match res.as_ref().err().and_then(JsonError::as_lex) {
        Some(e) => e,
        None => panic!("expected a lexical error for {:?}, got {:?}", input, res),
    }
}

pub(crate) fn accepts(input: &str) -> bool {
    validate_slice(input.as_bytes()).is_ok()
}

/// `depth` objects, each holding the next under key "k".
pub(crate) fn nested_objects(depth: usize) -> String {
    let mut s = String::new();
    for _ in 1..depth {
        s.push_str(r#"{"k":"#);
    }
    s.push_str("{}");
    for _ in 1..depth {
        s.push('}');
    }
    s
}

pub(crate) fn nested_arrays(depth: usize) -> String {
    format!("{}{}", "[".repeat(depth), "]".repeat(depth))
}

#[test]
fn test_scenarios() {
    assert!(accepts("{}"));
    assert!(accepts(r#"{"a":1}"#));
    assert_eq!(syntax_err(r#"{"a":}"#), SyntaxError::PrematureCloser);
    assert!(accepts("[1,2,3]"));
    assert!(accepts(r#"{"a":[1,{"b":true}]}"#));
    assert_eq!(syntax_err(&nested_objects(20)), SyntaxError::DepthExceeded);
    assert_eq!(syntax_err(r#"{,"a":1}"#), SyntaxError::InvalidComma);
}

#[test]
fn test_depth_boundary() {
    assert_eq!(MAX_DEPTH, 19);
    assert!(accepts(&nested_objects(19)));
    assert_eq!(syntax_err(&nested_objects(20)), SyntaxError::DepthExceeded);
    assert!(accepts(&nested_arrays(19)));
    assert_eq!(syntax_err(&nested_arrays(20)), SyntaxError::DepthExceeded);
}

#[test]
fn test_depth_is_nesting_not_count() {
    // many siblings at shallow depth are fine
    let siblings = vec!["[[]]"; 50].join(",");
    assert!(accepts(&format!("[{}]", siblings)));
}

#[test]
fn test_empty_and_whitespace_input() {
    for input in ["", " ", "\n\t\r  "] {
        assert_eq!(syntax_err(input), SyntaxError::PrematureEndOfInput);
    }
}

#[test]
fn test_unclosed_input() {
    assert_eq!(syntax_err("{"), SyntaxError::PrematureEndOfInput);
    assert_eq!(syntax_err("["), SyntaxError::PrematureEndOfInput);
    assert_eq!(syntax_err(r#"{"a":1"#), SyntaxError::PrematureEndOfInput);
    assert_eq!(syntax_err(r#"{"a":true,"#), SyntaxError::PrematureEndOfInput);
}

#[test]
fn test_bare_scalars_rejected() {
    assert_eq!(syntax_err(r#""just a string""#), SyntaxError::InvalidString);
    assert_eq!(syntax_err("0"), SyntaxError::InvalidValue);
    assert_eq!(syntax_err("null"), SyntaxError::InvalidValue);
}

#[test]
fn test_object_rules() {
    assert!(accepts(r#"{"a":"b","c":null,"d":false,"e":-1.5e3}"#));
    assert!(accepts(r#"{"a":{"b":{"c":{}}}}"#));
    assert!(accepts(r#"{"a":[],"b":{}}"#));
    assert_eq!(syntax_err(r#"{"a":1,}"#), SyntaxError::PrematureCloser);
    assert_eq!(syntax_err(r#"{"a" null}"#), SyntaxError::InvalidValue);
    assert_eq!(syntax_err(r#"{"a"::1}"#), SyntaxError::PrematureColon);
    assert_eq!(syntax_err(r#"{:1}"#), SyntaxError::PrematureColon);
    assert_eq!(syntax_err(r#"{1:2}"#), SyntaxError::InvalidValue);
    assert_eq!(syntax_err(r#"{"a":1 "b":2}"#), SyntaxError::InvalidString);
    assert_eq!(syntax_err(r#"{"a":"b":"c"}"#), SyntaxError::PrematureColon);
    assert_eq!(syntax_err(r#"{"a", null}"#), SyntaxError::PrematureCloser);
    assert_eq!(syntax_err(r#"{"a","b":1}"#), SyntaxError::UnmatchedCloser);
}

#[test]
fn test_array_rules() {
    assert!(accepts("[]"));
    assert!(accepts(r#"["a",1,null,true,false,{},[]]"#));
    assert!(accepts("[{},{}]"));
    assert!(accepts("[[1],[2,[3]]]"));
    assert!(accepts(r#"[{"a":1},{"b":[{}]}]"#));
    assert_eq!(syntax_err("[1,]"), SyntaxError::PrematureCloser);
    assert_eq!(syntax_err("[,1]"), SyntaxError::InvalidComma);
    assert_eq!(syntax_err("[1,,2]"), SyntaxError::InvalidComma);
    assert_eq!(syntax_err("[1 2]"), SyntaxError::InvalidValue);
    assert_eq!(syntax_err(r#"["a" "b"]"#), SyntaxError::InvalidString);
    assert_eq!(syntax_err(r#"["a":1]"#), SyntaxError::PrematureCloser);
    assert_eq!(syntax_err("[{} 1]"), SyntaxError::InvalidValue);
}

#[test]
fn test_closer_mismatch() {
    assert_eq!(syntax_err("]"), SyntaxError::UnmatchedCloser);
    assert_eq!(syntax_err("}"), SyntaxError::PrematureCloser);
    assert_eq!(syntax_err("[}"), SyntaxError::PrematureCloser);
    assert_eq!(syntax_err("{]"), SyntaxError::PrematureCloser);
    assert_eq!(syntax_err(r#"["mismatch"}"#), SyntaxError::PrematureCloser);
    assert_eq!(syntax_err(r#"{"a":1]"#), SyntaxError::PrematureCloser);
    // `]` may not skip over an open object
    assert_eq!(syntax_err(r#"[{"a"]"#), SyntaxError::UnmatchedCloser);
    assert_eq!(syntax_err(r#"[{"a":1}]]"#), SyntaxError::UnmatchedCloser);
}

#[test]
fn test_lexical_errors_propagate() {
    assert_eq!(lex_err(r#"{"a":01}"#), LexError::LeadingZero);
    assert_eq!(lex_err(r#"["\q"]"#), LexError::InvalidEscape);
    assert_eq!(lex_err("[\"a\nb\"]"), LexError::ControlCharacterInString);
    assert_eq!(lex_err("[nul]"), LexError::MisspelledLiteral);
    assert_eq!(lex_err("{'a':1}"), LexError::UnexpectedCharacter(b'\''));
    assert_eq!(lex_err(r#"["open"#), LexError::UnterminatedString);
    assert_eq!(lex_err("[1e]"), LexError::InvalidExponent);
}

#[test]
fn test_first_error_wins() {
    // the structural fault comes first; the bad escape later is never reached
    assert_eq!(syntax_err(r#"[1,,"\q"]"#), SyntaxError::InvalidComma);
    assert_eq!(lex_err(r#"["\q",,]"#), LexError::InvalidEscape);
}

#[test]
fn test_stack_shape_while_stepping() {
    let mut v = Validator::new();
    v.step(Kind::LeftBrace).unwrap();
    v.step(Kind::String).unwrap();
    v.step(Kind::Colon).unwrap();
    assert_eq!(v.stack(), &[Symbol::LeftBrace, Symbol::String, Symbol::Colon]);

    v.step(Kind::LeftSquare).unwrap();
    v.step(Kind::Number).unwrap();
    v.step(Kind::Comma).unwrap();
    v.step(Kind::LeftBrace).unwrap();
    assert_eq!(v.nesting(), 3);
    v.step(Kind::RightBrace).unwrap();
    assert_eq!(
        v.stack(),
        &[
            Symbol::LeftBrace,
            Symbol::String,
            Symbol::Colon,
            Symbol::LeftSquare,
            Symbol::Number,
            Symbol::Object
        ]
    );

    v.step(Kind::RightSquare).unwrap();
    assert_eq!(v.stack(), &[Symbol::LeftBrace, Symbol::KeyValue]);
    assert_eq!(v.nesting(), 1);

    v.step(Kind::RightBrace).unwrap();
    assert!(v.stack().is_empty());
    assert_eq!(v.nesting(), 0);
    assert_eq!(v.processed(), 3);
    v.step(Kind::EndOfInput).unwrap();
}

#[test]
fn test_first_array_element_composite_is_reduced() {
    let mut v = Validator::new();
    for k in [Kind::LeftSquare, Kind::LeftSquare, Kind::RightSquare] {
        v.step(k).unwrap();
    }
    assert_eq!(v.stack(), &[Symbol::LeftSquare, Symbol::Array]);
    v.step(Kind::Comma).unwrap();
    v.step(Kind::LeftBrace).unwrap();
    v.step(Kind::RightBrace).unwrap();
    assert_eq!(v.stack(), &[Symbol::LeftSquare, Symbol::Array, Symbol::Object]);
}

#[test]
fn test_end_of_input_needs_processed_structure() {
    let mut v = Validator::new();
    assert_eq!(
        v.step(Kind::EndOfInput),
        Err(SyntaxError::PrematureEndOfInput)
    );
    assert_eq!(v.processed(), 0);
}
