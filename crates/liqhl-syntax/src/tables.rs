//! Static character-class and literal tables of the Liquidsoap grammar.

pub const KEYWORDS: &[&str] = &[
    "and", "begin", "catch", "def", "do", "done", "else", "elsif", "end", "finally", "for", "fun",
    "if", "in", "let", "mod", "not", "open", "or", "rec", "replaces", "then", "to", "try",
    "while",
];

pub const BUILTIN_TYPES: &[&str] = &[
    "active_source",
    "bool",
    "float",
    "format",
    "int",
    "request",
    "source",
    "string",
    "unit",
];

pub const BOOLEANS: &[&str] = &["true", "false"];

/// Ordered so that no operator follows one of its own prefixes.
pub const OPERATORS: &[&str] = &[
    "...", ":=", "::", "==", "!=", "<=", ">=", "->", "??", "?.", "+.", "-.", "*.", "/.", "=", "<",
    ">", "+", "-", "*", "/", "^", "!", "?", "~", "@", "|",
];

pub const PUNCTUATION: &[&str] = &["(", ")", "[", "]", "{", "}", ",", ";", ":", "."];

pub const WHITESPACE: &str = r"\s+";

pub const IDENTIFIER: &str = r"[A-Za-z_][A-Za-z0-9_]*";

/// `5s`, `12h30m`, `250ms`, `1w`.
pub const DURATION: &str = r"(?:[0-9]+(?:ms|w|d|h|m|s))+";

pub const HEX_NUMBER: &str = r"0[xX][0-9a-fA-F][0-9a-fA-F_]*";
pub const OCTAL_NUMBER: &str = r"0[oO][0-7][0-7_]*";
pub const BINARY_NUMBER: &str = r"0[bB][01][01_]*";
pub const FLOAT_NUMBER: &str = r"[0-9][0-9_]*(?:\.[0-9_]*(?:[eE][+-]?[0-9]+)?|[eE][+-]?[0-9]+)";
pub const INTEGER_NUMBER: &str = r"[0-9][0-9_]*";

/// `r/^foo.*$/gi`
pub const REGEXP: &str = r"r/(?:[^/\\\n]|\\.)+/[gimsu]*";

/// Preprocessor directives (`%ifdef`, `%include`) and encoder formats (`%mp3.vbr`, `%ffmpeg`).
pub const DIRECTIVE: &str = r"%[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*";

pub const ARGSOF_OPEN: &str = "%argsof(";

pub const LINE_COMMENT_OPEN: &str = "#";
pub const BLOCK_COMMENT_OPEN: &str = "#<";
pub const BLOCK_COMMENT_CLOSE: &str = ">#";
pub const INTERPOLATION_OPEN: &str = "#{";
pub const INTERPOLATION_CLOSE: &str = "}";

pub const DOC_TAG: &str = r"@(?:argsof|category|docof|flag|method|param)\b";

pub fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Matches the tail of [`IDENTIFIER`]; ASCII only.
pub fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Length in bytes of the identifier-like run at the start of `text`.
pub fn ident_run_len(text: &str) -> usize {
    match text.chars().next() {
        Some(ch) if is_ident_start(ch) => text
            .char_indices()
            .find(|&(_, ch)| !is_ident_continue(ch))
            .map_or(text.len(), |(idx, _)| idx),
        _ => 0,
    }
}
