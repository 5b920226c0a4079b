//! Lexer integration tests.
//!
//! Checks token classification on whole programs and the round-trip and
//! never-panics properties over generated input.

use proptest::prelude::*;
use reline_core::text::TextSpan;
use reline_lexer::lex;
use reline_syntax::SyntaxKind;

/// Helper: lex and return the kinds of the significant tokens.
fn significant_kinds(source: &str) -> Vec<SyntaxKind> {
    lex(source).significant_tokens().map(|t| t.kind).collect()
}

#[test]
fn test_empty_source() {
    let result = lex("");
    assert_eq!(result.tokens.len(), 1);
    assert_eq!(result.tokens[0].kind, SyntaxKind::EndOfFile);
    assert_eq!(result.tokens[0].span, TextSpan::empty(0));
}

#[test]
fn test_label_and_assignment() {
    use SyntaxKind::*;
    assert_eq!(
        significant_kinds("a: b = 0"),
        vec![Identifier, Colon, Identifier, Equals, NumberLiteral]
    );
}

#[test]
fn test_function_declaration() {
    use SyntaxKind::*;
    assert_eq!(
        significant_kinds("function Foo 1..here (x y) // body"),
        vec![
            FunctionKeyword, Identifier, NumberLiteral, DotDot, HereKeyword, OpenParen,
            Identifier, Identifier, CloseParen
        ]
    );
}

#[test]
fn test_pointers_and_manipulation() {
    use SyntaxKind::*;
    assert_eq!(
        significant_kinds("swap *[start] with *Foo"),
        vec![
            SwapKeyword, Asterisk, OpenBracket, StartKeyword, CloseBracket, WithKeyword,
            Asterisk, Identifier
        ]
    );
}

#[test]
fn test_invocation_with_string() {
    let result = lex("Write (\"Hello world!\")");
    let strings: Vec<_> = result.tokens.iter().filter_map(|t| t.string_value()).collect();
    assert_eq!(strings, vec!["Hello world!"]);
    assert!(!result.has_errors());
}

#[test]
fn test_newlines_are_tokens() {
    let result = lex("a\n\nb\r\n");
    let newlines = result.tokens.iter().filter(|t| t.kind == SyntaxKind::NewLine).count();
    assert_eq!(newlines, 3);
}

#[test]
fn test_positions_are_byte_offsets() {
    let result = lex("\"é\" x");
    assert_eq!(result.tokens[0].span, TextSpan::new(0, 4));
    assert_eq!(result.tokens[2].span, TextSpan::new(5, 1));
}

// ============================================================================
// Property tests
// ============================================================================

const FRAGMENTS: &[&str] = &[
    "a: b = 0",
    "function Foo 1..3 (x)",
    "move 1 to 2",
    "swap here with end",
    "copy *[1 + 2] to 3",
    "Write (\"hi\")",
    "return x % 2",
    "// note",
    "&$",
    "\"open",
];

fn fragment_program() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..8).prop_map(|lines| lines.join("\n"))
}

/// Default is 256 cases; keep at least that many.
fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(256),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Lexing never panics and always ends with exactly one EndOfFile.
    #[test]
    fn lexer_never_panics(input in "\\PC{0,300}") {
        let result = lex(&input);
        let eofs = result.tokens.iter().filter(|t| t.kind == SyntaxKind::EndOfFile).count();
        prop_assert_eq!(eofs, 1);
        prop_assert_eq!(result.tokens.last().map(|t| t.kind), Some(SyntaxKind::EndOfFile));
    }

    /// Token text concatenates back to the source, arbitrary input included.
    #[test]
    fn tokens_round_trip(input in "(\\PC|\\n|\\r){0,300}") {
        let result = lex(&input);
        prop_assert_eq!(result.full_text(), input);
    }

    /// Spans are contiguous and each one matches its token's text.
    #[test]
    fn spans_are_contiguous(input in fragment_program()) {
        let result = lex(&input);
        let mut expected_start = 0u32;
        for token in &result.tokens {
            prop_assert_eq!(token.span.start, expected_start);
            prop_assert_eq!(&input[token.span.start as usize..token.span.end() as usize], token.text.as_str());
            expected_start = token.span.end();
        }
        prop_assert_eq!(expected_start as usize, input.len());
    }

    /// Lexing is deterministic.
    #[test]
    fn lexer_is_deterministic(input in fragment_program()) {
        prop_assert_eq!(lex(&input), lex(&input));
    }
}
