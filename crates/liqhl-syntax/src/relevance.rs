//! Relevance scoring used to tell Liquidsoap apart from look-alike languages.
//!
//! Tokens carry two kinds of evidence. Distinctive tokens (durations, known
//! directives and encoders, `replaces`, closed `#< >#` comments, Liquidsoap
//! operator names from the standard library) only occur in Liquidsoap.
//! Supporting tokens (`def`, `elsif`, `#{`, float operators, common stdlib
//! names) are shared with OCaml, Ruby and friends and only count once at least
//! one distinctive token was seen.
//!
//! Both sums are of non-negative weights, so the score depends only on which
//! tokens occur and how often, and never decreases as tokens are added.

use crate::tables;
use crate::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Below this score a text is not considered Liquidsoap.
pub const MIN_RELEVANCE: u32 = 5;

/// Weight of a token, split by how specific it is to Liquidsoap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evidence {
    None,
    Distinctive(u32),
    Supporting(u32),
}

/// Directive and encoder names, without the `%` and any `.variant` suffix.
static DIRECTIVES: &[&str] = &[
    "argsof", "ifdef", "ifndef", "ifencoder", "ifnencoder", "ifversion", "endif", "include",
    "mp3", "ffmpeg", "wav", "ogg", "vorbis", "opus", "flac", "fdkaac", "shine", "speex", "theora",
    "external", "ndi", "avi",
];

static DISTINCTIVE_IDENTIFIERS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    let mut m = HashMap::with_capacity(8);
    m.insert("liquidsoap", 3);
    m.insert("mksafe", 3);
    m.insert("icecast", 2);
    m.insert("harbor", 2);
    m.insert("crossfade", 2);
    m
});

static SUPPORTING_IDENTIFIERS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    let mut m = HashMap::with_capacity(16);
    m.insert("playlist", 1);
    m.insert("fallback", 1);
    m.insert("amplify", 1);
    m.insert("blank", 1);
    m.insert("sine", 1);
    m.insert("rotate", 1);
    m.insert("output", 1);
    m.insert("settings", 1);
    m.insert("metadata", 1);
    m
});

static SUPPORTING_KEYWORDS: &[&str] = &["def", "elsif", "fun", "finally"];

static SUPPORTING_OPERATORS: &[&str] = &["+.", "-.", "*.", "/.", "?.", "??", ":=", "::"];

fn is_known_directive(text: &str) -> bool {
    let Some(name) = text.strip_prefix('%') else {
        return false;
    };
    let end = name
        .find(|c: char| c == '.' || c == '(')
        .unwrap_or(name.len());
    DIRECTIVES.contains(&&name[..end])
}

/// Evidence contributed by a single token.
pub fn evidence(token: &Token<'_>) -> Evidence {
    match token.kind {
        TokenKind::Duration => Evidence::Distinctive(2),
        TokenKind::Annotation if is_known_directive(token.text) => Evidence::Distinctive(3),
        TokenKind::Comment
            if token.text.starts_with(tables::BLOCK_COMMENT_OPEN)
                && token.text.ends_with(tables::BLOCK_COMMENT_CLOSE)
                && token.text.len() >= 4 =>
        {
            Evidence::Distinctive(2)
        }
        TokenKind::Keyword if token.text == "replaces" => Evidence::Distinctive(3),
        TokenKind::Keyword if SUPPORTING_KEYWORDS.contains(&token.text) => Evidence::Supporting(1),
        TokenKind::Operator if SUPPORTING_OPERATORS.contains(&token.text) => {
            Evidence::Supporting(1)
        }
        TokenKind::StringInterpolationDelimiter if token.text == tables::INTERPOLATION_OPEN => {
            Evidence::Supporting(1)
        }
        TokenKind::Identifier => {
            if let Some(weight) = DISTINCTIVE_IDENTIFIERS.get(token.text) {
                Evidence::Distinctive(*weight)
            } else if let Some(weight) = SUPPORTING_IDENTIFIERS.get(token.text) {
                Evidence::Supporting(*weight)
            } else {
                Evidence::None
            }
        }
        _ => Evidence::None,
    }
}

pub fn score(tokens: &[Token<'_>]) -> u32 {
    let (distinctive, supporting) =
        tokens
            .iter()
            .fold((0u32, 0u32), |(distinctive, supporting), token| match evidence(token) {
                Evidence::Distinctive(w) => (distinctive.saturating_add(w), supporting),
                Evidence::Supporting(w) => (distinctive, supporting.saturating_add(w)),
                Evidence::None => (distinctive, supporting),
            });

    if distinctive == 0 {
        0
    } else {
        distinctive.saturating_add(supporting)
    }
}

/// Detection decision for a relevance score.
pub fn is_liquidsoap(score: u32) -> bool {
    score >= MIN_RELEVANCE
}
