//! The Liquidsoap lexical grammar.
//!
//! ```text
//! top-level ──"#<"──▶ block-comment   (nests on "#<", closes on ">#")
//!     │──────"#"────▶ line-comment    (closes at the newline)
//!     │──────"\""───▶ double-string ──"#{"──▶ double-interpolation ──"{"──▶ braces
//!     │──────"'"────▶ single-string ──"#{"──▶ single-interpolation ──"{"──▶ braces
//!     └──"%argsof("─▶ annotation-block (nests on "(", closes on ")")
//! ```
//!
//! Interpolation holes reuse the full top-level rule list, so strings nest
//! inside interpolations to any depth. A hole closes with `PopTo` its
//! originating string mode.

use crate::error::GrammarError;
use crate::mode::{Grammar, ModeId, Rule};
use crate::pattern::Pattern;
use crate::tables;
use crate::token::TokenKind;
use once_cell::sync::Lazy;

static LIQUIDSOAP: Lazy<Grammar> = Lazy::new(|| match build() {
    Ok(grammar) => grammar,
    Err(err) => panic!("invalid Liquidsoap grammar tables: {}", err),
});

/// The process-wide Liquidsoap grammar, built and validated on first use.
pub fn grammar() -> &'static Grammar {
    &LIQUIDSOAP
}

pub fn build() -> Result<Grammar, GrammarError> {
    Grammar::builder()
        .mode(ModeId::TopLevel, top_level_rules()?)
        .mode(ModeId::LineComment, line_comment_rules()?)
        .mode(ModeId::BlockComment, block_comment_rules()?)
        .mode(ModeId::DoubleString, string_rules(Quote::Double)?)
        .mode(ModeId::SingleString, string_rules(Quote::Single)?)
        .mode(ModeId::DoubleInterpolation, interpolation_rules(Quote::Double)?)
        .mode(ModeId::SingleInterpolation, interpolation_rules(Quote::Single)?)
        .mode(ModeId::Braces, braces_rules()?)
        .mode(ModeId::AnnotationBlock, annotation_block_rules()?)
        .build()
}

#[derive(Debug, Clone, Copy)]
enum Quote {
    Double,
    Single,
}

impl Quote {
    fn delimiter(self) -> &'static str {
        match self {
            Quote::Double => "\"",
            Quote::Single => "'",
        }
    }

    fn body(self) -> &'static str {
        match self {
            Quote::Double => r#"[^"\\#]+"#,
            Quote::Single => r"[^'\\#]+",
        }
    }

    fn string_mode(self) -> ModeId {
        match self {
            Quote::Double => ModeId::DoubleString,
            Quote::Single => ModeId::SingleString,
        }
    }

    fn interpolation_mode(self) -> ModeId {
        match self {
            Quote::Double => ModeId::DoubleInterpolation,
            Quote::Single => ModeId::SingleInterpolation,
        }
    }
}

fn top_level_rules() -> Result<Vec<Rule>, GrammarError> {
    Ok(vec![
        Rule::new("whitespace", Pattern::regex(tables::WHITESPACE)?, TokenKind::Plain),
        Rule::new(
            "block-comment-open",
            Pattern::Literal(tables::BLOCK_COMMENT_OPEN),
            TokenKind::Comment,
        )
        .push(ModeId::BlockComment),
        Rule::new(
            "line-comment-open",
            Pattern::Literal(tables::LINE_COMMENT_OPEN),
            TokenKind::Comment,
        )
        .push(ModeId::LineComment),
        Rule::new("double-quote", Pattern::Literal("\""), TokenKind::StringLiteral)
            .push(ModeId::DoubleString),
        Rule::new("single-quote", Pattern::Literal("'"), TokenKind::StringLiteral)
            .push(ModeId::SingleString),
        Rule::new(
            "argsof-open",
            Pattern::Literal(tables::ARGSOF_OPEN),
            TokenKind::Annotation,
        )
        .push(ModeId::AnnotationBlock),
        Rule::new("directive", Pattern::regex(tables::DIRECTIVE)?, TokenKind::Annotation),
        Rule::new("regexp", Pattern::regex(tables::REGEXP)?, TokenKind::StringLiteral),
        Rule::new("keyword", Pattern::Keywords(tables::KEYWORDS), TokenKind::Keyword),
        Rule::new("boolean", Pattern::Keywords(tables::BOOLEANS), TokenKind::BooleanLiteral),
        Rule::new(
            "builtin-type",
            Pattern::Keywords(tables::BUILTIN_TYPES),
            TokenKind::BuiltinType,
        ),
        Rule::new("duration", Pattern::token(tables::DURATION)?, TokenKind::Duration),
        Rule::new("hex", Pattern::regex(tables::HEX_NUMBER)?, TokenKind::Number),
        Rule::new("octal", Pattern::regex(tables::OCTAL_NUMBER)?, TokenKind::Number),
        Rule::new("binary", Pattern::regex(tables::BINARY_NUMBER)?, TokenKind::Number),
        Rule::new("float", Pattern::regex(tables::FLOAT_NUMBER)?, TokenKind::Number),
        Rule::new("integer", Pattern::regex(tables::INTEGER_NUMBER)?, TokenKind::Number),
        Rule::new("operator", Pattern::OneOf(tables::OPERATORS), TokenKind::Operator),
        Rule::new("punctuation", Pattern::OneOf(tables::PUNCTUATION), TokenKind::Punctuation),
        Rule::new("identifier", Pattern::regex(tables::IDENTIFIER)?, TokenKind::Identifier),
        Rule::new("plain", Pattern::AnyChar, TokenKind::Plain),
    ])
}

fn line_comment_rules() -> Result<Vec<Rule>, GrammarError> {
    Ok(vec![
        Rule::new("doc-tag", Pattern::regex(tables::DOC_TAG)?, TokenKind::Annotation),
        Rule::new("text", Pattern::regex(r"[^\n@]+")?, TokenKind::Comment),
        Rule::new("newline", Pattern::Literal("\n"), TokenKind::Plain).pop(),
        Rule::new("other", Pattern::AnyChar, TokenKind::Comment),
    ])
}

fn block_comment_rules() -> Result<Vec<Rule>, GrammarError> {
    Ok(vec![
        Rule::new(
            "nested-open",
            Pattern::Literal(tables::BLOCK_COMMENT_OPEN),
            TokenKind::Comment,
        )
        .nest(),
        Rule::new(
            "close",
            Pattern::Literal(tables::BLOCK_COMMENT_CLOSE),
            TokenKind::Comment,
        )
        .unnest(),
        Rule::new("text", Pattern::regex(r"[^#>]+")?, TokenKind::Comment),
        Rule::new("other", Pattern::AnyChar, TokenKind::Comment),
    ])
}

fn string_rules(quote: Quote) -> Result<Vec<Rule>, GrammarError> {
    Ok(vec![
        Rule::new("escape", Pattern::regex(r"\\(?s:.)")?, TokenKind::StringLiteral),
        Rule::new(
            "interpolation-open",
            Pattern::Literal(tables::INTERPOLATION_OPEN),
            TokenKind::StringInterpolationDelimiter,
        )
        .push(quote.interpolation_mode()),
        Rule::new("close", Pattern::Literal(quote.delimiter()), TokenKind::StringLiteral).pop(),
        Rule::new("body", Pattern::regex(quote.body())?, TokenKind::StringLiteral),
        Rule::new("other", Pattern::AnyChar, TokenKind::StringLiteral),
    ])
}

fn interpolation_rules(quote: Quote) -> Result<Vec<Rule>, GrammarError> {
    let mut rules = vec![
        Rule::new(
            "interpolation-close",
            Pattern::Literal(tables::INTERPOLATION_CLOSE),
            TokenKind::StringInterpolationDelimiter,
        )
        .pop_to(quote.string_mode()),
        Rule::new("brace-open", Pattern::Literal("{"), TokenKind::Punctuation)
            .push(ModeId::Braces),
    ];
    rules.extend(top_level_rules()?);
    Ok(rules)
}

fn braces_rules() -> Result<Vec<Rule>, GrammarError> {
    let mut rules = vec![
        Rule::new("brace-open", Pattern::Literal("{"), TokenKind::Punctuation)
            .push(ModeId::Braces),
        Rule::new("brace-close", Pattern::Literal("}"), TokenKind::Punctuation).pop(),
    ];
    rules.extend(top_level_rules()?);
    Ok(rules)
}

fn annotation_block_rules() -> Result<Vec<Rule>, GrammarError> {
    Ok(vec![
        Rule::new("nested-open", Pattern::Literal("("), TokenKind::Annotation).nest(),
        Rule::new("close", Pattern::Literal(")"), TokenKind::Annotation).unnest(),
        Rule::new("text", Pattern::regex(r"[^()]+")?, TokenKind::Annotation),
        Rule::new("other", Pattern::AnyChar, TokenKind::Annotation),
    ])
}
