use crate::error::GrammarError;
use crate::tables::{ident_run_len, is_ident_continue};
use regex::Regex;

/// An anchored matcher tried against the remaining input at the scan offset.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Exact text.
    Literal(&'static str),
    /// The first listed literal that prefixes the input. Listed longest first.
    OneOf(&'static [&'static str]),
    /// The whole identifier run at the offset, if it is one of the words.
    Keywords(&'static [&'static str]),
    /// A regular expression anchored at the offset. With `bounded`, the match
    /// must not be followed by an identifier character.
    Regex {
        source: &'static str,
        regex: Regex,
        bounded: bool,
    },
    /// Exactly one character. Every mode ends with this catch-all.
    AnyChar,
}

impl Pattern {
    pub fn regex(source: &'static str) -> Result<Self, GrammarError> {
        Self::compile(source, false)
    }

    /// Like [`Pattern::regex`], but only matches when it ends on an identifier boundary.
    pub fn token(source: &'static str) -> Result<Self, GrammarError> {
        Self::compile(source, true)
    }

    fn compile(source: &'static str, bounded: bool) -> Result<Self, GrammarError> {
        let regex = Regex::new(&format!(r"\A(?:{})", source)).map_err(|err| {
            GrammarError::InvalidRegex {
                source: source.to_string(),
                message: err.to_string(),
            }
        })?;
        Ok(Pattern::Regex {
            source,
            regex,
            bounded,
        })
    }

    /// Byte length of the match at the start of `rest`, if any. Never `Some(0)`
    /// for a pattern accepted by grammar validation.
    pub fn match_len(&self, rest: &str) -> Option<usize> {
        let len = match self {
            Pattern::Literal(text) => rest.starts_with(*text).then_some(text.len())?,
            Pattern::OneOf(alternatives) => alternatives
                .iter()
                .find(|alt| rest.starts_with(**alt))
                .map(|alt| alt.len())?,
            Pattern::Keywords(words) => {
                let run = ident_run_len(rest);
                let word = &rest[..run];
                (run > 0 && words.iter().any(|candidate| *candidate == word)).then_some(run)?
            }
            Pattern::Regex { regex, bounded, .. } => {
                let end = regex.find(rest)?.end();
                if *bounded && rest[end..].chars().next().is_some_and(is_ident_continue) {
                    return None;
                }
                end
            }
            Pattern::AnyChar => rest.chars().next()?.len_utf8(),
        };
        (len > 0).then_some(len)
    }

    /// Shortest input this pattern can match, or `None` if it can never match.
    pub fn min_len(&self) -> Option<usize> {
        match self {
            Pattern::Literal(text) => Some(text.len()),
            Pattern::OneOf(alternatives) => alternatives.iter().map(|alt| alt.len()).min(),
            Pattern::Keywords(words) => words.iter().map(|word| word.len()).min(),
            Pattern::Regex { source, .. } => regex_syntax::parse(source)
                .ok()
                .and_then(|hir| hir.properties().minimum_len()),
            Pattern::AnyChar => Some(1),
        }
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, Pattern::AnyChar)
    }
}
