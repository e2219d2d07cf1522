use std::fmt;
use std::ops::Range;

/// Classification attached to every scanned span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    Keyword,
    BuiltinType,
    Identifier,
    Operator,
    Number,
    Duration,
    BooleanLiteral,
    StringLiteral,
    StringInterpolationDelimiter,
    Comment,
    Annotation,
    Punctuation,
    Plain,
}

impl TokenKind {
    pub const ALL: [TokenKind; 13] = [
        TokenKind::Keyword,
        TokenKind::BuiltinType,
        TokenKind::Identifier,
        TokenKind::Operator,
        TokenKind::Number,
        TokenKind::Duration,
        TokenKind::BooleanLiteral,
        TokenKind::StringLiteral,
        TokenKind::StringInterpolationDelimiter,
        TokenKind::Comment,
        TokenKind::Annotation,
        TokenKind::Punctuation,
        TokenKind::Plain,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::BuiltinType => "built-in type",
            TokenKind::Identifier => "identifier",
            TokenKind::Operator => "operator",
            TokenKind::Number => "number",
            TokenKind::Duration => "duration",
            TokenKind::BooleanLiteral => "boolean",
            TokenKind::StringLiteral => "string",
            TokenKind::StringInterpolationDelimiter => "interpolation delimiter",
            TokenKind::Comment => "comment",
            TokenKind::Annotation => "annotation",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Plain => "plain",
        }
    }

    /// Kinds whose adjacent pieces are reported as a single token by [`crate::scan`].
    pub fn coalesces(&self) -> bool {
        matches!(
            self,
            TokenKind::Comment | TokenKind::Annotation | TokenKind::Plain
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A classified span of the scanned input. Offsets are byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, input: &'a str, start: usize, end: usize) -> Self {
        Self {
            kind,
            text: &input[start..end],
            start,
            end,
        }
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{} {} {:?}",
            self.start, self.end, self.kind, self.text
        )
    }
}
