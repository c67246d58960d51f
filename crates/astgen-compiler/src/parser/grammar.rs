//! Grammar rules.
//!
//! ```text
//! grammar    = definition*
//! definition = ext? "interface" Ident (":" Ident)? "{" member* "}" ";"
//!            | Ident "implements" Ident ";"
//!            | "typedef" ext? type Ident ";"
//!            | "enum" Ident "{" (String ("," String)* ","?)? "}" ";"
//! member     = ext? "readonly"? "attribute" ext? type Name ";"
//! type       = (Ident | union | ("sequence" | "FrozenArray") "<" type ">") ("?" | "[" "]")*
//! union      = "(" type ("or" type)* ")"
//! ext        = "[" ... "]"
//! ```

use astgen_core::TextRange;
use astgen_core::idl::{
    Definition, EnumDef, Grammar, Ident, IdlType, Implements, Interface, Member, Typedef,
};

use super::Parse;
use super::core::Parser;
use super::syntax_kind::SyntaxKind::{self, *};
use crate::diagnostics::DiagnosticKind;

impl<'src> Parser<'src> {
    pub fn parse_grammar(mut self) -> Parse {
        let mut definitions = Vec::new();
        while !self.eof() {
            match self.parse_definition() {
                Some(def) => definitions.push(def),
                None => {
                    self.recover_to_semicolon();
                    if self.at(BraceClose) {
                        self.error(DiagnosticKind::UnexpectedToken, Some("`}`".into()));
                        self.bump();
                        self.eat(Semicolon);
                    }
                }
            }
        }

        Parse {
            grammar: Grammar { definitions },
            diagnostics: self.diagnostics,
        }
    }

    fn parse_definition(&mut self) -> Option<Definition> {
        self.skip_extended_attributes()?;
        match self.current() {
            KwInterface => self.parse_interface().map(Definition::Interface),
            KwTypedef => self.parse_typedef().map(Definition::Typedef),
            KwEnum => self.parse_enum().map(Definition::Enum),
            SyntaxKind::Ident if self.nth(1) == KwImplements => {
                self.parse_implements().map(Definition::Implements)
            }
            _ => {
                self.error(DiagnosticKind::ExpectedDefinition, None);
                None
            }
        }
    }

    fn parse_interface(&mut self) -> Option<Interface> {
        self.bump();
        let name = self.expect_name(false)?;
        let inheritance = match self.eat(Colon) {
            Some(_) => Some(self.expect_name(false)?),
            None => None,
        };

        let open = self.expect(BraceOpen)?;
        let mut members = Vec::new();
        loop {
            match self.current() {
                BraceClose => {
                    self.bump();
                    break;
                }
                SyntaxKind::Error => {
                    self.diagnostics
                        .report(
                            self.source_id,
                            DiagnosticKind::UnclosedBlock,
                            TextRange::empty(self.eof_offset()),
                        )
                        .message(format!("interface `{}`", name.text))
                        .related_to("block opened here", open.span)
                        .emit();
                    return None;
                }
                _ => match self.parse_member() {
                    Some(member) => members.push(member),
                    None => self.recover_to_semicolon(),
                },
            }
        }
        self.expect_terminator();

        Some(Interface {
            name,
            inheritance,
            members,
        })
    }

    fn parse_member(&mut self) -> Option<Member> {
        self.skip_extended_attributes()?;
        self.eat(KwReadonly);
        self.expect(KwAttribute)?;
        self.skip_extended_attributes()?;
        let ty = self.parse_type()?;
        let name = self.expect_name(true)?;
        self.expect(Semicolon)?;
        Some(Member { name, ty })
    }

    fn parse_implements(&mut self) -> Option<Implements> {
        let target = self.expect_name(false)?;
        self.bump();
        let implements = self.expect_name(false)?;
        self.expect_terminator();
        Some(Implements { target, implements })
    }

    fn parse_typedef(&mut self) -> Option<Typedef> {
        self.bump();
        self.skip_extended_attributes()?;
        let ty = self.parse_type()?;
        let name = self.expect_name(false)?;
        self.expect_terminator();
        Some(Typedef { name, ty })
    }

    fn parse_enum(&mut self) -> Option<EnumDef> {
        self.bump();
        let name = self.expect_name(false)?;
        self.expect(BraceOpen)?;

        let mut values = Vec::new();
        while !self.at(BraceClose) {
            let Some(token) = self.eat(StringLiteral) else {
                self.error(DiagnosticKind::ExpectedString, None);
                while !self.eof() && !self.at(BraceClose) {
                    self.bump();
                }
                break;
            };
            let text = self.text(&token);
            let inner = &text[1..text.len() - 1];
            values.push(Ident::new(inner, token.span));
            if self.eat(Comma).is_none() {
                break;
            }
        }
        self.expect(BraceClose)?;
        self.expect_terminator();

        Some(EnumDef { name, values })
    }

    /// Parse a type expression with any number of `?`/`[]` suffixes.
    fn parse_type(&mut self) -> Option<IdlType> {
        let mut ty = match self.current() {
            ParenOpen => self.parse_union()?,
            KwSequence | KwFrozenArray => {
                let keyword = self.bump();
                self.expect(AngleOpen)?;
                let inner = self.parse_type()?;
                let close = self.expect(AngleClose)?;
                IdlType::Array(Box::new(inner), keyword.span.cover(close.span))
            }
            SyntaxKind::Ident => {
                let token = self.bump();
                IdlType::Simple(Ident::new(self.text(&token), token.span))
            }
            _ => {
                self.error(DiagnosticKind::ExpectedType, None);
                return None;
            }
        };

        loop {
            if let Some(question) = self.eat(Question) {
                let range = ty.range().cover(question.span);
                ty = IdlType::Nullable(Box::new(ty), range);
            } else if self.at(BracketOpen) && self.nth(1) == BracketClose {
                self.bump();
                let close = self.bump();
                let range = ty.range().cover(close.span);
                ty = IdlType::Array(Box::new(ty), range);
            } else {
                break;
            }
        }
        Some(ty)
    }

    fn parse_union(&mut self) -> Option<IdlType> {
        let open = self.bump();
        let mut members = vec![self.parse_type()?];
        while self.eat(KwOr).is_some() {
            members.push(self.parse_type()?);
        }
        let close = self.expect(ParenClose)?;
        Some(IdlType::Union(members, open.span.cover(close.span)))
    }

    /// `[Extended, Attributes=...]`, skipped wholesale.
    fn skip_extended_attributes(&mut self) -> Option<()> {
        while self.at(BracketOpen) {
            self.bump();
            let mut depth = 1usize;
            while depth > 0 {
                match self.current() {
                    SyntaxKind::Error => {
                        self.error_expected(BracketClose.describe());
                        return None;
                    }
                    BracketOpen => depth += 1,
                    BracketClose => depth -= 1,
                    _ => {}
                }
                self.bump();
            }
        }
        Some(())
    }

    /// Trailing `;` of a definition. A missing one is reported but the
    /// definition is kept.
    fn expect_terminator(&mut self) {
        if self.eat(Semicolon).is_none() {
            self.error_expected(Semicolon.describe());
        }
    }
}
