//! Terminal rendering of token streams.

use colored::{ColoredString, Colorize};
use liqhl::{Token, TokenKind};

/// Applies the terminal theme for `kind` to `text`.
pub fn paint(kind: TokenKind, text: &str) -> ColoredString {
    match kind {
        TokenKind::Keyword => text.magenta().bold(),
        TokenKind::BuiltinType => text.yellow(),
        TokenKind::Identifier => text.normal(),
        TokenKind::Operator => text.cyan(),
        TokenKind::Number | TokenKind::Duration => text.bright_blue(),
        TokenKind::BooleanLiteral => text.bright_magenta(),
        TokenKind::StringLiteral => text.green(),
        TokenKind::StringInterpolationDelimiter => text.bright_green().bold(),
        TokenKind::Comment => text.bright_black().italic(),
        TokenKind::Annotation => text.yellow().bold(),
        TokenKind::Punctuation | TokenKind::Plain => text.normal(),
    }
}

pub fn ansi(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&paint(token.kind, token.text).to_string());
    }
    out
}

/// One line per token: offsets, kind and the quoted text.
pub fn token_line(token: &Token<'_>) -> String {
    format!(
        "{:>6}..{:<6} {} {:?}",
        token.start,
        token.end,
        paint(token.kind, &format!("{:<24}", token.kind.display_name())),
        token.text
    )
}
