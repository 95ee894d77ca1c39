//! Token-window scanner: the pattern-matching layer under the schema parser.
//!
//! The scanner owns the significant (non-trivia) tokens of one source and answers
//! questions about half-open *windows* of token indices: "where is the first `key:`
//! property", "which `{ ... }` blocks sit directly in this list", and so on.
//!
//! Every enumeration is a lazy iterator over a window. Iterators hold their own
//! cursor, are finite, and restart from the window start when created again.
//!
//! Delimiters are paired once, up front. Pairing is best-effort: a closer that does not
//! match the innermost opener closes the nearest matching outer opener (the skipped
//! openers stay unclosed), and a closer with no opener at all is ignored. An unclosed
//! group extends to the end of whatever window it is looked up in.
//!
//! Each token step of an enumeration consumes one unit of execution fuel. Once fuel runs
//! out, every iterator stops early and [`Scanner::finish`] reports the failure.

use std::cell::Cell;

use rowan::{TextRange, TextSize};

use super::lexer::{Token, TokenKind, string_content, token_text};
use crate::Error;

/// Half-open range `[start, end)` of significant-token indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

/// A delimited region: opening token plus the window strictly inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    pub open: usize,
    pub inner: Window,
    /// False when no matching closer exists inside the lookup window.
    pub closed: bool,
}

impl Group {
    /// Index of the first token after the group.
    pub fn end(&self) -> usize {
        if self.closed {
            self.inner.end + 1
        } else {
            self.inner.end
        }
    }
}

/// Where a property lookup may match, relative to the searched window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only keys not nested inside any group of the window.
    Shallow,
    /// Keys at any depth.
    Anywhere,
}

/// Structural problems found while pairing delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterIssue {
    /// Opener at this index never found its closer.
    Unclosed(usize),
    /// Closer at this index had no opener to match.
    Unexpected(usize),
}

pub struct Scanner<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    /// Opener index -> matching closer index.
    pairs: Vec<Option<usize>>,
    issues: Vec<DelimiterIssue>,
    exec_fuel_initial: Option<u32>,
    exec_fuel_remaining: Cell<Option<u32>>,
    fuel_exhausted: Cell<bool>,
}

impl<'src> Scanner<'src> {
    /// Builds a scanner from lexed tokens. Trivia is dropped here.
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        let tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        let (pairs, issues) = pair_delimiters(&tokens);
        Self {
            source,
            tokens,
            pairs,
            issues,
            exec_fuel_initial: None,
            exec_fuel_remaining: Cell::new(None),
            fuel_exhausted: Cell::new(false),
        }
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel_initial = limit;
        self.exec_fuel_remaining = Cell::new(limit);
        self
    }

    /// Fails if any enumeration ran out of fuel. Returns fuel consumed otherwise.
    pub fn finish(&self) -> Result<u32, Error> {
        if self.fuel_exhausted.get() {
            return Err(Error::ExecFuelExhausted);
        }
        Ok(match (self.exec_fuel_initial, self.exec_fuel_remaining.get()) {
            (Some(initial), Some(remaining)) => initial.saturating_sub(remaining),
            _ => 0,
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.fuel_exhausted.get()
    }

    /// Consumes one unit of fuel. False once the budget is spent.
    fn tick(&self) -> bool {
        if self.fuel_exhausted.get() {
            return false;
        }
        if let Some(remaining) = self.exec_fuel_remaining.get() {
            if remaining == 0 {
                self.fuel_exhausted.set(true);
                return false;
            }
            self.exec_fuel_remaining.set(Some(remaining - 1));
        }
        true
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The window covering every significant token.
    pub fn all(&self) -> Window {
        Window::new(0, self.tokens.len())
    }

    pub fn kind(&self, index: usize) -> Option<TokenKind> {
        self.tokens.get(index).map(|t| t.kind)
    }

    pub fn text(&self, index: usize) -> &'src str {
        self.tokens
            .get(index)
            .map_or("", |t| token_text(self.source, t))
    }

    pub fn span(&self, index: usize) -> TextRange {
        self.tokens.get(index).map_or_else(
            || TextRange::empty(TextSize::from(self.source.len() as u32)),
            |t| t.span,
        )
    }

    /// Source range covered by a window. Empty windows map to an empty range.
    pub fn window_span(&self, window: Window) -> TextRange {
        if window.is_empty() {
            return TextRange::empty(self.span(window.start).start());
        }
        self.span(window.start).cover(self.span(window.end - 1))
    }

    /// Source range of a group, delimiters included.
    pub fn group_span(&self, group: &Group) -> TextRange {
        let last = if group.closed {
            group.inner.end
        } else {
            group.inner.end.saturating_sub(1).max(group.open)
        };
        self.span(group.open).cover(self.span(last))
    }

    pub fn delimiter_issues(&self) -> &[DelimiterIssue] {
        &self.issues
    }

    /// Indices of `Garbage` tokens.
    pub fn garbage(&self) -> impl Iterator<Item = usize> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == TokenKind::Garbage)
            .map(|(i, _)| i)
    }

    /// The group opened at `index`, bounded by `within`.
    pub fn group_at(&self, index: usize, within: Window) -> Option<Group> {
        if !within.contains(index) || !self.kind(index)?.is_open() {
            return None;
        }
        let inner_start = index + 1;
        match self.pairs[index] {
            Some(close) if close < within.end => Some(Group {
                open: index,
                inner: Window::new(inner_start, close),
                closed: true,
            }),
            _ => Some(Group {
                open: index,
                inner: Window::new(inner_start, within.end),
                closed: false,
            }),
        }
    }

    /// Non-empty content of the string literal at `index`.
    pub fn string_value(&self, index: usize) -> Option<&'src str> {
        if self.kind(index)? != TokenKind::StringLiteral {
            return None;
        }
        let content = string_content(self.text(index));
        (!content.is_empty()).then_some(content)
    }

    fn is_key_at(&self, index: usize, key: &str, window: Window) -> bool {
        index + 2 < window.end
            && self.kind(index) == Some(TokenKind::Id)
            && self.text(index) == key
            && self.kind(index + 1) == Some(TokenKind::Colon)
    }

    /// Value-token indices of every `key:` property in the window, in source order.
    pub fn keys<'s>(
        &'s self,
        window: Window,
        key: &'s str,
        scope: Scope,
    ) -> KeyMatches<'s, 'src> {
        KeyMatches {
            scanner: self,
            window,
            key,
            scope,
            pos: window.start,
        }
    }

    /// First `key: '<non-empty>'` property in the window.
    pub fn string_property(
        &self,
        window: Window,
        key: &str,
        scope: Scope,
    ) -> Option<(usize, &'src str)> {
        self.keys(window, key, scope)
            .find_map(|value| self.string_value(value).map(|text| (value, text)))
    }

    /// First `key: [ ... ]` property in the window, as the list group.
    pub fn list_property(&self, window: Window, key: &str, scope: Scope) -> Option<Group> {
        self.keys(window, key, scope).find_map(|value| {
            if self.kind(value)? != TokenKind::BracketOpen {
                return None;
            }
            self.group_at(value, window)
        })
    }

    /// True when some `key: '<expected>'` property exists in the window.
    pub fn has_string_property(
        &self,
        window: Window,
        key: &str,
        expected: &str,
        scope: Scope,
    ) -> bool {
        self.keys(window, key, scope)
            .any(|value| self.string_value(value) == Some(expected))
    }

    /// True when the window mentions `key:` at any depth, whatever its value.
    pub fn has_key(&self, window: Window, key: &str) -> bool {
        self.keys(window, key, Scope::Anywhere).next().is_some()
    }

    /// Object blocks passed to `callee`, i.e. `callee({ ... })`, in source order.
    ///
    /// Enumeration resumes after each block, so calls nested inside a block are not
    /// reported separately.
    pub fn call_blocks<'s>(&'s self, window: Window, callee: &'s str) -> CallBlocks<'s, 'src> {
        CallBlocks {
            scanner: self,
            window,
            callee,
            pos: window.start,
        }
    }

    /// `{ ... }` blocks sitting directly in a list window.
    ///
    /// Parentheses are transparent, so `defineField({ ... })` and
    /// `defineArrayMember({ ... })` elements are found as well as bare objects.
    /// Nested lists are skipped whole.
    pub fn element_blocks<'s>(&'s self, window: Window) -> ElementBlocks<'s, 'src> {
        ElementBlocks {
            scanner: self,
            window,
            pos: window.start,
        }
    }
}

/// Lazy sequence of property value indices. See [`Scanner::keys`].
pub struct KeyMatches<'s, 'src> {
    scanner: &'s Scanner<'src>,
    window: Window,
    key: &'s str,
    scope: Scope,
    pos: usize,
}

impl Iterator for KeyMatches<'_, '_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.pos < self.window.end {
            if !self.scanner.tick() {
                return None;
            }
            let index = self.pos;

            if self.scanner.is_key_at(index, self.key, self.window) {
                self.pos = index + 1;
                return Some(index + 2);
            }

            if self.scope == Scope::Shallow {
                if let Some(group) = self.scanner.group_at(index, self.window) {
                    self.pos = group.end();
                    continue;
                }
            }
            self.pos += 1;
        }
        None
    }
}

/// Lazy sequence of `callee({ ... })` blocks. See [`Scanner::call_blocks`].
pub struct CallBlocks<'s, 'src> {
    scanner: &'s Scanner<'src>,
    window: Window,
    callee: &'s str,
    pos: usize,
}

impl Iterator for CallBlocks<'_, '_> {
    type Item = Group;

    fn next(&mut self) -> Option<Group> {
        let scanner = self.scanner;
        while self.pos < self.window.end {
            if !scanner.tick() {
                return None;
            }
            let index = self.pos;
            self.pos += 1;

            let is_call = scanner.kind(index) == Some(TokenKind::Id)
                && scanner.text(index) == self.callee
                && scanner.kind(index + 1) == Some(TokenKind::ParenOpen)
                && scanner.kind(index + 2) == Some(TokenKind::BraceOpen);
            if !is_call {
                continue;
            }

            if let Some(block) = scanner.group_at(index + 2, self.window) {
                self.pos = block.end();
                return Some(block);
            }
        }
        None
    }
}

/// Lazy sequence of element blocks. See [`Scanner::element_blocks`].
pub struct ElementBlocks<'s, 'src> {
    scanner: &'s Scanner<'src>,
    window: Window,
    pos: usize,
}

impl Iterator for ElementBlocks<'_, '_> {
    type Item = Group;

    fn next(&mut self) -> Option<Group> {
        let scanner = self.scanner;
        while self.pos < self.window.end {
            if !scanner.tick() {
                return None;
            }
            let index = self.pos;

            match scanner.kind(index) {
                Some(TokenKind::BraceOpen) => {
                    let block = scanner.group_at(index, self.window)?;
                    self.pos = block.end();
                    return Some(block);
                }
                Some(TokenKind::BracketOpen) => {
                    let list = scanner.group_at(index, self.window)?;
                    self.pos = list.end();
                }
                _ => self.pos += 1,
            }
        }
        None
    }
}

/// Pairs every opener with its closer in one pass over the tokens.
fn pair_delimiters(tokens: &[Token]) -> (Vec<Option<usize>>, Vec<DelimiterIssue>) {
    let mut pairs = vec![None; tokens.len()];
    let mut issues = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        if token.kind.is_open() {
            stack.push(index);
            continue;
        }
        if !token.kind.is_close() {
            continue;
        }

        let matching = stack
            .iter()
            .rposition(|&open| tokens[open].kind.closing() == Some(token.kind));
        let Some(depth) = matching else {
            issues.push(DelimiterIssue::Unexpected(index));
            continue;
        };

        for skipped in stack.drain(depth + 1..) {
            issues.push(DelimiterIssue::Unclosed(skipped));
        }
        if let Some(open) = stack.pop() {
            pairs[open] = Some(index);
        }
    }

    issues.extend(stack.into_iter().map(DelimiterIssue::Unclosed));
    (pairs, issues)
}
