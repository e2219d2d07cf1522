//! Mode-stack scanner.
//!
//! The scanner walks the input once. At each offset it tries the rules of the
//! mode on top of the stack in order, emits a token for the first match and
//! applies the rule's transition. If nothing matches, one character becomes a
//! [`TokenKind::Plain`] token. Every step consumes at least one character, so a
//! scan of `n` bytes takes at most `n` steps and never fails.

use crate::grammar::grammar;
use crate::mode::{Grammar, ModeId, Transition};
use crate::token::{Token, TokenKind};
use smallvec::SmallVec;
use tracing::trace;

/// One active mode and its nesting depth. `serial` numbers the pushes of one
/// scan, so two frames of the same mode opened one after the other differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub mode: ModeId,
    pub depth: u32,
    pub serial: u32,
}

impl Frame {
    const TOP_LEVEL: Frame = Frame {
        mode: ModeId::TopLevel,
        depth: 0,
        serial: 0,
    };
}

/// The runtime nesting record of one scan. The top-level frame at the bottom
/// is never popped.
#[derive(Debug, Clone)]
pub struct ModeStack {
    frames: SmallVec<[Frame; 8]>,
    pushes: u32,
}

impl ModeStack {
    pub fn new() -> Self {
        let mut frames = SmallVec::new();
        frames.push(Frame::TOP_LEVEL);
        Self { frames, pushes: 0 }
    }

    pub fn top(&self) -> Frame {
        self.frames.last().copied().unwrap_or(Frame::TOP_LEVEL)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Modes from the bottom of the stack to the top.
    pub fn modes(&self) -> impl Iterator<Item = ModeId> + '_ {
        self.frames.iter().map(|frame| frame.mode)
    }

    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Push(mode) => self.push(mode),
            Transition::Pop => self.pop(),
            Transition::PopTo(mode) => self.pop_to(mode),
            Transition::Nest => {
                if let Some(frame) = self.frames.last_mut() {
                    frame.depth += 1;
                }
            }
            Transition::Unnest => match self.frames.last_mut() {
                Some(frame) if frame.depth > 0 => frame.depth -= 1,
                _ => self.pop(),
            },
        }
    }

    fn push(&mut self, mode: ModeId) {
        trace!(mode = %mode, depth = self.frames.len(), "push mode");
        self.pushes = self.pushes.wrapping_add(1);
        self.frames.push(Frame {
            mode,
            depth: 0,
            serial: self.pushes,
        });
    }

    fn pop(&mut self) {
        if self.frames.len() > 1 {
            let frame = self.frames.pop();
            trace!(mode = ?frame.map(|frame| frame.mode), "pop mode");
        }
    }

    fn pop_to(&mut self, mode: ModeId) {
        while self.frames.len() > 1 && self.top().mode != mode {
            self.pop();
        }
    }
}

impl Default for ModeStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Step-by-step scanner over one input. Iterating yields raw, uncoalesced tokens.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    grammar: &'a Grammar,
    input: &'a str,
    offset: usize,
    stack: ModeStack,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_grammar(grammar(), input)
    }

    pub fn with_grammar(grammar: &'a Grammar, input: &'a str) -> Self {
        Self {
            grammar,
            input,
            offset: 0,
            stack: ModeStack::new(),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The mode the next token will be scanned in.
    pub fn mode(&self) -> ModeId {
        self.stack.top().mode
    }

    pub fn depth(&self) -> u32 {
        self.stack.top().depth
    }

    pub fn stack(&self) -> &ModeStack {
        &self.stack
    }

    pub fn next_raw(&mut self) -> Option<Token<'a>> {
        self.next_piece().map(|(token, _)| token)
    }

    /// Like [`Scanner::next_raw`], also naming the construct the token belongs
    /// to: the serial of the enclosing comment, string or annotation frame it
    /// opened, continued or closed. `None` for tokens of expression modes.
    fn next_piece(&mut self) -> Option<(Token<'a>, Option<u32>)> {
        let rest = &self.input[self.offset..];
        if rest.is_empty() {
            return None;
        }

        let current = self.grammar.mode(self.mode());
        let matched = current.and_then(|mode| {
            mode.rules()
                .iter()
                .find_map(|rule| rule.pattern.match_len(rest).map(|len| (rule, len)))
        });

        let (kind, len, transition) = match matched {
            Some((rule, len)) => (rule.kind, len, rule.transition),
            None => {
                let len = rest.chars().next().map_or(rest.len(), char::len_utf8);
                (TokenKind::Plain, len, Transition::Stay)
            }
        };

        let enclosing = current
            .is_some_and(|mode| mode.is_enclosed())
            .then(|| self.stack.top().serial);

        let start = self.offset;
        self.offset += len;
        self.stack.apply(transition);

        let construct = match transition {
            Transition::Push(mode) if self.grammar.mode(mode).is_some_and(|m| m.is_enclosed()) => {
                Some(self.stack.top().serial)
            }
            _ => enclosing,
        };

        Some((Token::new(kind, self.input, start, self.offset), construct))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_raw()
    }
}

/// Scans `input` with the Liquidsoap grammar.
pub fn scan(input: &str) -> Vec<Token<'_>> {
    scan_with(grammar(), input)
}

/// Scans `input` with any validated grammar. Adjacent plain pieces are merged,
/// and so are comment and annotation pieces of one construct; two comments
/// that merely touch stay two tokens.
pub fn scan_with<'a>(grammar: &'a Grammar, input: &'a str) -> Vec<Token<'a>> {
    let mut tokens: Vec<Token<'a>> = Vec::with_capacity(input.len() / 4);
    let mut last_construct = None;
    let mut scanner = Scanner::with_grammar(grammar, input);

    while let Some((token, construct)) = scanner.next_piece() {
        if let Some(last) = tokens.last_mut()
            && last.kind == token.kind
            && token.kind.coalesces()
            && (token.kind == TokenKind::Plain || (construct.is_some() && construct == last_construct))
        {
            last.end = token.end;
            last.text = &input[last.start..last.end];
            continue;
        }
        tokens.push(token);
        last_construct = construct;
    }

    tokens
}
