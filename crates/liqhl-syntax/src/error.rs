use crate::mode::ModeId;
use std::fmt;

/// Defects in the static rule tables, reported while a [`crate::Grammar`] is built.
///
/// Scanning itself never fails; these errors only describe a broken grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    InvalidRegex { source: String, message: String },
    ZeroLengthPattern { mode: ModeId, rule: &'static str },
    UnmatchablePattern { mode: ModeId, rule: &'static str },
    InvalidKeyword { mode: ModeId, rule: &'static str, word: &'static str },
    ShadowedAlternative { mode: ModeId, rule: &'static str, alternative: &'static str, prefix: &'static str },
    UnreachableRule { mode: ModeId, rule: &'static str },
    MissingCatchAll { mode: ModeId },
    DuplicateMode { mode: ModeId },
    UndefinedMode { mode: ModeId, rule: &'static str, target: ModeId },
    MissingTopLevel,
}

impl GrammarError {
    pub fn mode(&self) -> Option<ModeId> {
        match self {
            GrammarError::InvalidRegex { .. } | GrammarError::MissingTopLevel => None,
            GrammarError::ZeroLengthPattern { mode, .. } => Some(*mode),
            GrammarError::UnmatchablePattern { mode, .. } => Some(*mode),
            GrammarError::InvalidKeyword { mode, .. } => Some(*mode),
            GrammarError::ShadowedAlternative { mode, .. } => Some(*mode),
            GrammarError::UnreachableRule { mode, .. } => Some(*mode),
            GrammarError::MissingCatchAll { mode } => Some(*mode),
            GrammarError::DuplicateMode { mode } => Some(*mode),
            GrammarError::UndefinedMode { mode, .. } => Some(*mode),
        }
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::InvalidRegex { source, message } => {
                write!(f, "invalid pattern /{}/: {}", source, message)
            }
            GrammarError::ZeroLengthPattern { mode, rule } => {
                write!(f, "rule '{}' in mode {} can match the empty string", rule, mode)
            }
            GrammarError::UnmatchablePattern { mode, rule } => {
                write!(f, "rule '{}' in mode {} can never match", rule, mode)
            }
            GrammarError::InvalidKeyword { mode, rule, word } => {
                write!(
                    f,
                    "rule '{}' in mode {} lists '{}', which is not an identifier",
                    rule, mode, word
                )
            }
            GrammarError::ShadowedAlternative {
                mode,
                rule,
                alternative,
                prefix,
            } => {
                write!(
                    f,
                    "rule '{}' in mode {}: '{}' is listed after its prefix '{}' and can never match",
                    rule, mode, alternative, prefix
                )
            }
            GrammarError::UnreachableRule { mode, rule } => {
                write!(f, "rule '{}' in mode {} follows the catch-all rule", rule, mode)
            }
            GrammarError::MissingCatchAll { mode } => {
                write!(f, "mode {} does not end with a catch-all rule", mode)
            }
            GrammarError::DuplicateMode { mode } => {
                write!(f, "mode {} is defined more than once", mode)
            }
            GrammarError::UndefinedMode { mode, rule, target } => {
                write!(
                    f,
                    "rule '{}' in mode {} transitions to undefined mode {}",
                    rule, mode, target
                )
            }
            GrammarError::MissingTopLevel => write!(f, "grammar has no top-level mode"),
        }
    }
}

impl std::error::Error for GrammarError {}
