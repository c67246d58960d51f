//! Parser state and low-level token operations.

use astgen_core::TextRange;
use astgen_core::idl::Ident;

use super::lexer::{Token, token_text};
use super::syntax_kind::SyntaxKind;
use crate::SourceId;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[cfg(debug_assertions)]
const DEFAULT_FUEL: u32 = 256;

/// Recursive-descent parser over a trivia-free token stream.
///
/// Grammar rules live in `grammar.rs`; each returns `None` after reporting
/// a diagnostic, and the definition loop recovers at the next `;` or `}`.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) source_id: SourceId,
    pub(super) tokens: Vec<Token>,
    /// Current position in `tokens`. Monotonically increases.
    pub(super) pos: usize,
    pub(super) diagnostics: Diagnostics,
    /// Last error position, used to suppress cascading errors at the same span.
    pub(super) last_error_pos: Option<u32>,
    #[cfg(debug_assertions)]
    pub(super) fuel: std::cell::Cell<u32>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, source_id: SourceId, tokens: Vec<Token>) -> Self {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokens
            .into_iter()
            .filter(|t| {
                if t.kind == SyntaxKind::Garbage {
                    diagnostics
                        .report(source_id, DiagnosticKind::UnexpectedToken, t.span)
                        .message(format!("`{}`", token_text(source, t)))
                        .emit();
                    return false;
                }
                !t.kind.is_trivia()
            })
            .collect();

        Self {
            source,
            source_id,
            tokens,
            pos: 0,
            diagnostics,
            last_error_pos: None,
            #[cfg(debug_assertions)]
            fuel: std::cell::Cell::new(DEFAULT_FUEL),
        }
    }

    /// Current token kind. Returns `Error` at EOF (acts as sentinel).
    pub(super) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Lookahead by `n` tokens (0 = current). Consumes fuel in debug mode.
    pub(super) fn nth(&self, lookahead: usize) -> SyntaxKind {
        #[cfg(debug_assertions)]
        {
            if self.fuel.get() == 0 {
                panic!("parser is stuck: no progress made in {DEFAULT_FUEL} iterations");
            }
            self.fuel.set(self.fuel.get() - 1);
        }
        self.tokens
            .get(self.pos + lookahead)
            .map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(super) fn current_span(&self) -> TextRange {
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    pub(super) fn eof_offset(&self) -> u32 {
        self.source.len() as u32
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token. Resets fuel.
    pub(super) fn bump(&mut self) -> Token {
        assert!(!self.eof(), "bump called at EOF");
        #[cfg(debug_assertions)]
        self.fuel.set(DEFAULT_FUEL);
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.at(kind) { Some(self.bump()) } else { None }
    }

    /// Expect token. On mismatch: report but don't consume (allows recovery).
    pub(super) fn expect(&mut self, kind: SyntaxKind) -> Option<Token> {
        if let Some(token) = self.eat(kind) {
            return Some(token);
        }
        self.error_expected(kind.describe());
        None
    }

    /// Expect a name token. Member names may also be keywords.
    pub(super) fn expect_name(&mut self, allow_keywords: bool) -> Option<Ident> {
        let kind = self.current();
        if kind == SyntaxKind::Ident || (allow_keywords && kind.is_name()) {
            let token = self.bump();
            return Some(Ident::new(token_text(self.source, &token), token.span));
        }
        self.error(DiagnosticKind::ExpectedName, None);
        None
    }

    pub(super) fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }

    pub(super) fn error_expected(&mut self, what: &str) {
        let found = self.current().describe();
        self.error(
            DiagnosticKind::ExpectedToken,
            Some(format!("{what}, found {found}")),
        );
    }

    /// Report at the current token, at most once per position.
    pub(super) fn error(&mut self, kind: DiagnosticKind, detail: Option<String>) {
        let range = self.current_span();
        if self.last_error_pos == Some(range.start) {
            return;
        }
        self.last_error_pos = Some(range.start);
        let builder = self.diagnostics.report(self.source_id, kind, range);
        match detail {
            Some(detail) => builder.message(detail).emit(),
            None => builder.emit(),
        }
    }

    /// Skip to just past the next `;` at brace depth zero, or to a `}` that
    /// closes an enclosing block (left unconsumed).
    pub(super) fn recover_to_semicolon(&mut self) {
        let mut depth = 0usize;
        while !self.eof() {
            match self.current() {
                SyntaxKind::Semicolon if depth == 0 => {
                    self.bump();
                    return;
                }
                SyntaxKind::BraceOpen => depth += 1,
                SyntaxKind::BraceClose => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.bump();
        }
    }
}
