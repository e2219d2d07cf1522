//! # liqhl Syntax
//!
//! Lexical grammar, scanner and relevance scorer for Liquidsoap scripts.
//!
//! ## Overview
//!
//! This crate classifies Liquidsoap source text into a stream of typed tokens
//! suitable for colorized rendering:
//!
//! - **Tables**: keywords, built-in types, operators and literal patterns
//! - **Modes**: named scanning contexts, each an ordered list of rules
//! - **Scanner**: drives a mode stack over the input and emits tokens
//! - **Relevance**: scores a token stream for language auto-detection
//!
//! It is not a parser. Every input, including truncated or binary garbage,
//! produces a token stream that covers the input exactly; unterminated
//! comments, strings and interpolations simply run to the end of the input.
//!
//! ## Architecture
//!
//! ```text
//! Source Code
//!     ↓
//! Scanner (mode stack over Grammar)
//!     ↓
//! Vec<Token>
//!     ↓
//! Host adapter (markup) / relevance::score (detection)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use liqhl_syntax::{scan, score, TokenKind};
//!
//! let source = r#"s = mksafe(playlist("/music")) # main source"#;
//! let tokens = scan(source);
//!
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Comment));
//! assert_eq!(tokens.iter().map(|t| t.text).collect::<String>(), source);
//! assert!(score(&tokens) > 0);
//! ```
//!
//! ## Grammar errors
//!
//! Rule tables are validated once, when a [`Grammar`] is built. A rule that
//! can match the empty string, or a mode without a catch-all rule, is
//! reported as a [`GrammarError`]:
//!
//! ```rust
//! use liqhl_syntax::{Grammar, GrammarError, ModeId, Pattern, Rule, TokenKind};
//!
//! let rules = vec![Rule::new("x", Pattern::Literal("x"), TokenKind::Identifier)];
//! let result = Grammar::builder().mode(ModeId::TopLevel, rules).build();
//!
//! assert_eq!(result.unwrap_err(), GrammarError::MissingCatchAll { mode: ModeId::TopLevel });
//! ```

pub mod error;
pub mod grammar;
pub mod mode;
pub mod pattern;
pub mod relevance;
pub mod scanner;
pub mod tables;
pub mod token;

pub use error::GrammarError;
pub use grammar::grammar;
pub use mode::{Grammar, GrammarBuilder, Mode, ModeId, Rule, Transition};
pub use pattern::Pattern;
pub use relevance::{Evidence, MIN_RELEVANCE, evidence, is_liquidsoap, score};
pub use scanner::{Frame, ModeStack, Scanner, scan, scan_with};
pub use token::{Token, TokenKind};
