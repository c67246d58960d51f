//! Token kinds for the interface-description grammar.
//!
//! Logos is derived directly on this enum. `Garbage` and `Error` have no
//! pattern: the first is produced by coalescing lexer errors, the second is
//! the parser's end-of-input sentinel.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("<")]
    AngleOpen,

    #[token(">")]
    AngleClose,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token("?")]
    Question,

    #[token("=")]
    Equals,

    #[token("interface")]
    KwInterface,

    #[token("attribute")]
    KwAttribute,

    #[token("readonly")]
    KwReadonly,

    #[token("implements")]
    KwImplements,

    #[token("typedef")]
    KwTypedef,

    #[token("enum")]
    KwEnum,

    #[token("or")]
    KwOr,

    #[token("sequence")]
    KwSequence,

    #[token("FrozenArray")]
    KwFrozenArray,

    /// Defined after the keywords so they take precedence.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r#""[^"\n]*""#)]
    StringLiteral,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// Consecutive unrecognized characters coalesced into one token
    Garbage,
    /// End-of-input sentinel
    Error,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment | BlockComment)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            KwInterface
                | KwAttribute
                | KwReadonly
                | KwImplements
                | KwTypedef
                | KwEnum
                | KwOr
                | KwSequence
                | KwFrozenArray
        )
    }

    /// Tokens usable as a member name. Keywords are allowed there.
    #[inline]
    pub fn is_name(self) -> bool {
        self == Ident || self.is_keyword()
    }

    /// Human-readable form for "expected X" messages.
    pub fn describe(self) -> &'static str {
        match self {
            ParenOpen => "`(`",
            ParenClose => "`)`",
            BracketOpen => "`[`",
            BracketClose => "`]`",
            BraceOpen => "`{`",
            BraceClose => "`}`",
            AngleOpen => "`<`",
            AngleClose => "`>`",
            Colon => "`:`",
            Semicolon => "`;`",
            Comma => "`,`",
            Question => "`?`",
            Equals => "`=`",
            KwInterface => "`interface`",
            KwAttribute => "`attribute`",
            KwReadonly => "`readonly`",
            KwImplements => "`implements`",
            KwTypedef => "`typedef`",
            KwEnum => "`enum`",
            KwOr => "`or`",
            KwSequence => "`sequence`",
            KwFrozenArray => "`FrozenArray`",
            Ident => "identifier",
            StringLiteral => "string literal",
            Whitespace | Newline => "whitespace",
            LineComment | BlockComment => "comment",
            Garbage => "unrecognized input",
            Error => "end of input",
        }
    }
}
