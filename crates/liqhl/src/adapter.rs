//! Registration contract between the Liquidsoap grammar and a highlighting host.
//!
//! The host sees a [`Language`] with a stable identifier, looks it up by id or
//! alias through [`language`], and reads back a [`Highlight`]: the token list, a relevance
//! score, and class names in the highlight.js vocabulary. HTML escaping
//! happens here, never in the scanner.

use liqhl_syntax::{Grammar, Token, TokenKind, grammar, is_liquidsoap, scan_with, score};

pub const LANGUAGE_ID: &str = "liquidsoap";
pub const LANGUAGE_NAME: &str = "Liquidsoap";
pub const ALIASES: &[&str] = &["liq"];

/// A grammar as registered with a host.
#[derive(Debug, Clone, Copy)]
pub struct Language {
    pub id: &'static str,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub grammar: &'static Grammar,
}

impl Language {
    pub fn liquidsoap() -> Self {
        Self {
            id: LANGUAGE_ID,
            name: LANGUAGE_NAME,
            aliases: ALIASES,
            grammar: grammar(),
        }
    }

    /// True when `name` is the id or one of the aliases, ignoring ASCII case.
    pub fn answers_to(&self, name: &str) -> bool {
        self.id.eq_ignore_ascii_case(name)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    }

    pub fn highlight<'a>(&self, text: &'a str) -> Highlight<'a> {
        let tokens = scan_with(self.grammar, text);
        Highlight {
            language: self.id,
            relevance: score(&tokens),
            tokens,
        }
    }

    /// Relevance of `text`, or `None` when it is too low to claim the text.
    pub fn detect(&self, text: &str) -> Option<u32> {
        let relevance = self.highlight(text).relevance;
        is_liquidsoap(relevance).then_some(relevance)
    }
}

/// The result of highlighting one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight<'a> {
    pub language: &'static str,
    pub relevance: u32,
    pub tokens: Vec<Token<'a>>,
}

impl Highlight<'_> {
    /// Whether any token maps to a presentation class.
    pub fn has_highlights(&self) -> bool {
        self.tokens
            .iter()
            .any(|token| class_name(token.kind).is_some())
    }

    /// Renders the tokens as HTML, wrapping every classified token in
    /// `<span class="{prefix}{class}">`.
    pub fn to_markup(&self, prefix: &str) -> String {
        let mut out = String::with_capacity(self.tokens.iter().map(|t| t.len()).sum::<usize>() * 2);

        for token in &self.tokens {
            match class_name(token.kind) {
                Some(class) => {
                    out.push_str("<span class=\"");
                    escape_html_into(prefix, &mut out);
                    out.push_str(class);
                    out.push_str("\">");
                    escape_html_into(token.text, &mut out);
                    out.push_str("</span>");
                }
                None => escape_html_into(token.text, &mut out),
            }
        }

        out
    }
}

/// Maps a token kind to its highlight.js scope. Plain text gets no class.
pub fn class_name(kind: TokenKind) -> Option<&'static str> {
    let class = match kind {
        TokenKind::Keyword => "keyword",
        TokenKind::BuiltinType => "type",
        TokenKind::Identifier => "variable",
        TokenKind::Operator => "operator",
        TokenKind::Number | TokenKind::Duration => "number",
        TokenKind::BooleanLiteral => "literal",
        TokenKind::StringLiteral => "string",
        TokenKind::StringInterpolationDelimiter => "subst",
        TokenKind::Comment => "comment",
        TokenKind::Annotation => "meta",
        TokenKind::Punctuation => "punctuation",
        TokenKind::Plain => return None,
    };
    Some(class)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_html_into(text, &mut out);
    out
}

fn escape_html_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

/// Looks up the language registered under `name`, by id or alias.
pub fn language(name: &str) -> Option<Language> {
    let liquidsoap = Language::liquidsoap();
    liquidsoap.answers_to(name).then_some(liquidsoap)
}
