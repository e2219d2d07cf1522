//! Property-based tests for the scanner and the relevance scorer.
//!
//! Inputs are either arbitrary strings or concatenations of fragments that
//! open and close comments, strings and interpolations in random order.

use liqhl_syntax::{Scanner, Token, TokenKind, scan, score};
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "#<", ">#", "#", "\"", "'", "#{", "}", "{", "%argsof(", "(", ")", "\\", "\n", " ",
    "def", "end", "x", "1", "5s", "+.", "%mp3", "r/a/", "@param", "é", "define", "ifx",
];

fn fragment_source() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..40)
        .prop_map(|fragments| fragments.concat())
}

fn source() -> impl Strategy<Value = String> {
    prop_oneof![".*", fragment_source()]
}

fn assert_coverage(input: &str, tokens: &[Token<'_>]) -> Result<(), TestCaseError> {
    let mut offset = 0;
    for token in tokens {
        prop_assert_eq!(token.start, offset);
        prop_assert!(token.start < token.end);
        prop_assert_eq!(token.text, &input[token.start..token.end]);
        offset = token.end;
    }
    prop_assert_eq!(offset, input.len());
    Ok(())
}

proptest! {
    #[test]
    fn test_tokens_cover_input(input in source()) {
        let tokens = scan(&input);
        assert_coverage(&input, &tokens)?;
        prop_assert_eq!(tokens.iter().map(|t| t.text).collect::<String>(), input);
    }

    #[test]
    fn test_raw_tokens_cover_input(input in source()) {
        let tokens: Vec<_> = Scanner::new(&input).collect();
        assert_coverage(&input, &tokens)?;
    }

    #[test]
    fn test_scan_terminates_within_input_length(input in source()) {
        let steps = Scanner::new(&input).count();
        prop_assert!(steps <= input.len());
    }

    #[test]
    fn test_scan_is_deterministic(input in source()) {
        prop_assert_eq!(scan(&input), scan(&input));
    }

    #[test]
    fn test_no_adjacent_plain_tokens(input in source()) {
        let tokens = scan(&input);
        for pair in tokens.windows(2) {
            prop_assert!(!(pair[0].kind == TokenKind::Plain && pair[1].kind == TokenKind::Plain));
        }
    }

    #[test]
    fn test_touching_comments_start_a_new_comment(input in source()) {
        let tokens = scan(&input);
        for pair in tokens.windows(2) {
            if pair[0].kind == TokenKind::Comment && pair[1].kind == TokenKind::Comment {
                prop_assert!(pair[1].text.starts_with('#'), "{} then {}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn test_stack_never_empties(input in fragment_source()) {
        let mut scanner = Scanner::new(&input);
        while scanner.next_raw().is_some() {
            prop_assert!(!scanner.stack().is_empty());
        }
    }

    #[test]
    fn test_score_is_monotonic(input in source()) {
        let mut tokens = scan(&input);
        let before = score(&tokens);
        tokens.push(Token::new(TokenKind::Keyword, "replaces", 0, 8));
        prop_assert!(score(&tokens) > before);
    }

    #[test]
    fn test_keyword_prefixed_identifier(suffix in "[a-z0-9_]{1,8}") {
        for keyword in ["def", "end", "if", "do", "true", "string"] {
            let word = format!("{keyword}{suffix}");
            let tokens = scan(&word);
            prop_assert_eq!(tokens.len(), 1);
            prop_assert!(
                tokens[0].kind == TokenKind::Identifier || tokens[0].kind == TokenKind::Keyword
            );
            prop_assert_eq!(tokens[0].text, word.as_str());
        }
    }
}
