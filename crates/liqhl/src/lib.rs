//! Liquidsoap syntax highlighting: the lexical grammar from `liqhl-syntax`
//! plus the host adapter that turns its tokens into highlight markup.

pub mod adapter;

pub use adapter::{
    ALIASES, Highlight, LANGUAGE_ID, LANGUAGE_NAME, Language, class_name, escape_html, language,
};
pub use liqhl_syntax::{
    Grammar, GrammarError, MIN_RELEVANCE, ModeId, Scanner, Token, TokenKind, grammar,
    is_liquidsoap, scan, score,
};
pub use liqhl_syntax;

pub mod prelude {
    pub use crate::{Highlight, Language, class_name, language};
    pub use crate::{Token, TokenKind, scan, score};
}
