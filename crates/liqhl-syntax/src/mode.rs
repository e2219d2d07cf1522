//! Scanning modes, their ordered rules, and grammar construction.
//!
//! A [`Grammar`] is validated once when it is built. Every check that
//! guarantees the scanner terminates lives here, so that scanning arbitrary
//! input never has to fail.

use crate::error::GrammarError;
use crate::pattern::Pattern;
use crate::tables::ident_run_len;
use crate::token::TokenKind;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModeId {
    TopLevel,
    LineComment,
    BlockComment,
    DoubleString,
    SingleString,
    DoubleInterpolation,
    SingleInterpolation,
    Braces,
    AnnotationBlock,
}

impl ModeId {
    pub const ALL: [ModeId; 9] = [
        ModeId::TopLevel,
        ModeId::LineComment,
        ModeId::BlockComment,
        ModeId::DoubleString,
        ModeId::SingleString,
        ModeId::DoubleInterpolation,
        ModeId::SingleInterpolation,
        ModeId::Braces,
        ModeId::AnnotationBlock,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModeId::TopLevel => "top-level",
            ModeId::LineComment => "line-comment",
            ModeId::BlockComment => "block-comment",
            ModeId::DoubleString => "double-string",
            ModeId::SingleString => "single-string",
            ModeId::DoubleInterpolation => "double-interpolation",
            ModeId::SingleInterpolation => "single-interpolation",
            ModeId::Braces => "braces",
            ModeId::AnnotationBlock => "annotation-block",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What a matching rule does to the mode stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Push(ModeId),
    /// A no-op when only the top-level frame is left.
    Pop,
    /// Pop until the given mode is on top, never below the top-level frame.
    PopTo(ModeId),
    /// Increment the depth of the active frame.
    Nest,
    /// Decrement the depth of the active frame, popping it at depth zero.
    Unnest,
}

impl Transition {
    fn target(&self) -> Option<ModeId> {
        match self {
            Transition::Push(mode) | Transition::PopTo(mode) => Some(*mode),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub name: &'static str,
    pub pattern: Pattern,
    pub kind: TokenKind,
    pub transition: Transition,
}

impl Rule {
    pub fn new(name: &'static str, pattern: Pattern, kind: TokenKind) -> Self {
        Self {
            name,
            pattern,
            kind,
            transition: Transition::Stay,
        }
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn push(self, mode: ModeId) -> Self {
        self.with_transition(Transition::Push(mode))
    }

    pub fn pop(self) -> Self {
        self.with_transition(Transition::Pop)
    }

    pub fn pop_to(self, mode: ModeId) -> Self {
        self.with_transition(Transition::PopTo(mode))
    }

    pub fn nest(self) -> Self {
        self.with_transition(Transition::Nest)
    }

    pub fn unnest(self) -> Self {
        self.with_transition(Transition::Unnest)
    }

    fn validate(&self, mode: ModeId) -> Result<(), GrammarError> {
        match self.pattern.min_len() {
            Some(0) => {
                return Err(GrammarError::ZeroLengthPattern {
                    mode,
                    rule: self.name,
                })
            }
            None => {
                return Err(GrammarError::UnmatchablePattern {
                    mode,
                    rule: self.name,
                })
            }
            Some(_) => {}
        }

        match &self.pattern {
            Pattern::Keywords(words) => {
                if let Some(word) = words.iter().find(|word| ident_run_len(word) != word.len()) {
                    return Err(GrammarError::InvalidKeyword {
                        mode,
                        rule: self.name,
                        word: *word,
                    });
                }
            }
            Pattern::OneOf(alternatives) => {
                for (idx, alternative) in alternatives.iter().enumerate() {
                    if let Some(prefix) = alternatives[..idx]
                        .iter()
                        .find(|prefix| alternative.starts_with(**prefix))
                    {
                        return Err(GrammarError::ShadowedAlternative {
                            mode,
                            rule: self.name,
                            alternative: *alternative,
                            prefix: *prefix,
                        });
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }
}

/// A named scanning context: rules are tried in order and the first match wins.
#[derive(Debug, Clone)]
pub struct Mode {
    id: ModeId,
    rules: Vec<Rule>,
}

impl Mode {
    pub fn new(id: ModeId, rules: Vec<Rule>) -> Self {
        Self { id, rules }
    }

    pub fn id(&self) -> ModeId {
        self.id
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// A mode scanning the inside of one construct (a comment, a string, an
    /// annotation block) rather than expressions: its catch-all is not plain.
    pub fn is_enclosed(&self) -> bool {
        self.rules
            .last()
            .is_some_and(|rule| rule.kind != TokenKind::Plain)
    }

    fn validate(&self) -> Result<(), GrammarError> {
        for rule in &self.rules {
            rule.validate(self.id)?;
        }

        let Some((last, rest)) = self.rules.split_last() else {
            return Err(GrammarError::MissingCatchAll { mode: self.id });
        };
        if !last.pattern.is_catch_all() {
            return Err(GrammarError::MissingCatchAll { mode: self.id });
        }
        if let Some(pos) = rest.iter().position(|rule| rule.pattern.is_catch_all()) {
            return Err(GrammarError::UnreachableRule {
                mode: self.id,
                rule: self.rules[pos + 1].name,
            });
        }

        Ok(())
    }
}

/// An immutable, validated set of modes.
#[derive(Debug, Clone)]
pub struct Grammar {
    modes: Vec<Option<Mode>>,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    pub fn mode(&self, id: ModeId) -> Option<&Mode> {
        self.modes.get(id.index()).and_then(Option::as_ref)
    }

    pub fn modes(&self) -> impl Iterator<Item = &Mode> {
        self.modes.iter().flatten()
    }
}

#[derive(Debug, Default)]
pub struct GrammarBuilder {
    modes: Vec<Mode>,
}

impl GrammarBuilder {
    pub fn mode(mut self, id: ModeId, rules: Vec<Rule>) -> Self {
        self.modes.push(Mode::new(id, rules));
        self
    }

    pub fn build(self) -> Result<Grammar, GrammarError> {
        let mut modes: Vec<Option<Mode>> = vec![None; ModeId::ALL.len()];

        for mode in self.modes {
            mode.validate()?;
            let slot = &mut modes[mode.id.index()];
            if slot.is_some() {
                return Err(GrammarError::DuplicateMode { mode: mode.id });
            }
            *slot = Some(mode);
        }

        if modes[ModeId::TopLevel.index()].is_none() {
            return Err(GrammarError::MissingTopLevel);
        }

        for mode in modes.iter().flatten() {
            for rule in &mode.rules {
                if let Some(target) = rule.transition.target()
                    && modes[target.index()].is_none()
                {
                    return Err(GrammarError::UndefinedMode {
                        mode: mode.id,
                        rule: rule.name,
                        target,
                    });
                }
            }
        }

        Ok(Grammar { modes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catch_all() -> Rule {
        Rule::new("plain", Pattern::AnyChar, TokenKind::Plain)
    }

    #[test]
    fn test_build_minimal_grammar() {
        let grammar = Grammar::builder()
            .mode(ModeId::TopLevel, vec![catch_all()])
            .build()
            .unwrap();

        assert!(grammar.mode(ModeId::TopLevel).is_some());
        assert!(grammar.mode(ModeId::DoubleString).is_none());
        assert_eq!(grammar.modes().count(), 1);
    }

    #[test]
    fn test_enclosed_modes() {
        let grammar = crate::grammar();
        let enclosed: Vec<_> = grammar
            .modes()
            .filter(|mode| mode.is_enclosed())
            .map(Mode::id)
            .collect();

        assert_eq!(
            enclosed,
            vec![
                ModeId::LineComment,
                ModeId::BlockComment,
                ModeId::DoubleString,
                ModeId::SingleString,
                ModeId::AnnotationBlock,
            ]
        );
    }

    #[test]
    fn test_rejects_zero_length_regex() {
        let rules = vec![
            Rule::new("spaces", Pattern::regex(" *").unwrap(), TokenKind::Plain),
            catch_all(),
        ];
        let err = Grammar::builder()
            .mode(ModeId::TopLevel, rules)
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            GrammarError::ZeroLengthPattern {
                mode: ModeId::TopLevel,
                rule: "spaces"
            }
        );
    }

    #[test]
    fn test_rejects_word_boundary_only_regex() {
        let rules = vec![
            Rule::new("boundary", Pattern::regex(r"\b").unwrap(), TokenKind::Plain),
            catch_all(),
        ];
        let err = Grammar::builder()
            .mode(ModeId::TopLevel, rules)
            .build()
            .unwrap_err();

        assert!(matches!(err, GrammarError::ZeroLengthPattern { .. }));
    }

    #[test]
    fn test_rejects_empty_literal() {
        let rules = vec![
            Rule::new("nothing", Pattern::Literal(""), TokenKind::Plain),
            catch_all(),
        ];
        let err = Grammar::builder()
            .mode(ModeId::TopLevel, rules)
            .build()
            .unwrap_err();

        assert!(matches!(err, GrammarError::ZeroLengthPattern { .. }));
    }

    #[test]
    fn test_rejects_mode_without_catch_all() {
        let rules = vec![Rule::new("x", Pattern::Literal("x"), TokenKind::Identifier)];
        let err = Grammar::builder()
            .mode(ModeId::TopLevel, rules)
            .build()
            .unwrap_err();

        assert_eq!(err, GrammarError::MissingCatchAll { mode: ModeId::TopLevel });
    }

    #[test]
    fn test_rejects_empty_mode() {
        let err = Grammar::builder()
            .mode(ModeId::TopLevel, Vec::new())
            .build()
            .unwrap_err();

        assert_eq!(err, GrammarError::MissingCatchAll { mode: ModeId::TopLevel });
    }

    #[test]
    fn test_rejects_rule_after_catch_all() {
        let rules = vec![
            catch_all(),
            Rule::new("x", Pattern::Literal("x"), TokenKind::Identifier),
            catch_all(),
        ];
        let err = Grammar::builder()
            .mode(ModeId::TopLevel, rules)
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            GrammarError::UnreachableRule {
                mode: ModeId::TopLevel,
                rule: "x"
            }
        );
    }

    #[test]
    fn test_rejects_shadowed_operator() {
        let rules = vec![
            Rule::new("operator", Pattern::OneOf(&[">", ">="]), TokenKind::Operator),
            catch_all(),
        ];
        let err = Grammar::builder()
            .mode(ModeId::TopLevel, rules)
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            GrammarError::ShadowedAlternative {
                mode: ModeId::TopLevel,
                rule: "operator",
                alternative: ">=",
                prefix: ">"
            }
        );
    }

    #[test]
    fn test_rejects_non_identifier_keyword() {
        let rules = vec![
            Rule::new("keyword", Pattern::Keywords(&["if", "%if"]), TokenKind::Keyword),
            catch_all(),
        ];
        let err = Grammar::builder()
            .mode(ModeId::TopLevel, rules)
            .build()
            .unwrap_err();

        assert!(matches!(err, GrammarError::InvalidKeyword { word: "%if", .. }));
    }

    #[test]
    fn test_rejects_undefined_target() {
        let rules = vec![
            Rule::new("quote", Pattern::Literal("\""), TokenKind::StringLiteral)
                .push(ModeId::DoubleString),
            catch_all(),
        ];
        let err = Grammar::builder()
            .mode(ModeId::TopLevel, rules)
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            GrammarError::UndefinedMode {
                mode: ModeId::TopLevel,
                rule: "quote",
                target: ModeId::DoubleString
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_mode() {
        let err = Grammar::builder()
            .mode(ModeId::TopLevel, vec![catch_all()])
            .mode(ModeId::TopLevel, vec![catch_all()])
            .build()
            .unwrap_err();

        assert_eq!(err, GrammarError::DuplicateMode { mode: ModeId::TopLevel });
    }

    #[test]
    fn test_requires_top_level() {
        let err = Grammar::builder()
            .mode(ModeId::LineComment, vec![catch_all()])
            .build()
            .unwrap_err();

        assert_eq!(err, GrammarError::MissingTopLevel);
    }
}
