//! Tokens for the Culebra language
//!
//! Defines every token kind the lexer can produce, the fixed symbol table
//! and the reserved-word set.

use culebra_error::Position;
use serde::{Serialize, Serializer};
use std::fmt;

/// Reserved words. Matching is case-sensitive.
pub const KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Returns true if `word` is a reserved word
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// All token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Literal values
    // =========================================
    /// Integer literal: `42`
    Number,
    /// Identifier: `foo`, `_private`, `DEF`
    Name,
    /// Reserved word; the token text holds which one
    Keyword,

    // =========================================
    // Delimiters
    // =========================================
    /// `(`
    Lpar,
    /// `)`
    Rpar,
    /// `[`
    Lsqb,
    /// `]`
    Rsqb,
    /// `{`
    Lbrace,
    /// `}`
    Rbrace,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `;`
    Semi,
    /// `.`
    Dot,
    /// `...`
    Ellipsis,
    /// `->`
    RArrow,
    /// `@`
    At,

    // =========================================
    // Arithmetic and bitwise operators
    // =========================================
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `**`
    DoubleStar,
    /// `//`
    DoubleSlash,
    /// `|`
    Vbar,
    /// `&`
    Amper,
    /// `^`
    Circumflex,
    /// `~`
    Tilde,
    /// `<<`
    LeftShift,
    /// `>>`
    RightShift,
    /// `!`
    Exclamation,

    // =========================================
    // Comparison operators
    // =========================================
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `==`
    EqEqual,
    /// `!=`
    NotEqual,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,

    // =========================================
    // Assignment operators
    // =========================================
    /// `=`
    Equal,
    /// `:=`
    ColonEqual,
    /// `+=`
    PlusEqual,
    /// `-=`
    MinEqual,
    /// `*=`
    StarEqual,
    /// `/=`
    SlashEqual,
    /// `%=`
    PercentEqual,
    /// `&=`
    AmperEqual,
    /// `|=`
    VbarEqual,
    /// `^=`
    CircumflexEqual,
    /// `<<=`
    LeftShiftEqual,
    /// `>>=`
    RightShiftEqual,
    /// `**=`
    DoubleStarEqual,
    /// `//=`
    DoubleSlashEqual,
    /// `@=`
    AtEqual,

    // =========================================
    // Structural tokens (synthetic)
    // =========================================
    /// End of a logical line
    Newline,
    /// Indentation increase
    Indent,
    /// Indentation decrease
    Dedent,
    /// End of input
    Eof,
}

/// Symbol table: every punctuation kind and its literal text
pub const SYMBOLS: [(TokenKind, &str); 48] = [
    (TokenKind::Lpar, "("),
    (TokenKind::Rpar, ")"),
    (TokenKind::Lsqb, "["),
    (TokenKind::Rsqb, "]"),
    (TokenKind::Colon, ":"),
    (TokenKind::Comma, ","),
    (TokenKind::Semi, ";"),
    (TokenKind::Plus, "+"),
    (TokenKind::Minus, "-"),
    (TokenKind::Star, "*"),
    (TokenKind::Slash, "/"),
    (TokenKind::Vbar, "|"),
    (TokenKind::Amper, "&"),
    (TokenKind::Less, "<"),
    (TokenKind::Greater, ">"),
    (TokenKind::Equal, "="),
    (TokenKind::Dot, "."),
    (TokenKind::Percent, "%"),
    (TokenKind::Lbrace, "{"),
    (TokenKind::Rbrace, "}"),
    (TokenKind::EqEqual, "=="),
    (TokenKind::NotEqual, "!="),
    (TokenKind::LessEqual, "<="),
    (TokenKind::GreaterEqual, ">="),
    (TokenKind::Tilde, "~"),
    (TokenKind::Circumflex, "^"),
    (TokenKind::LeftShift, "<<"),
    (TokenKind::RightShift, ">>"),
    (TokenKind::DoubleStar, "**"),
    (TokenKind::PlusEqual, "+="),
    (TokenKind::MinEqual, "-="),
    (TokenKind::StarEqual, "*="),
    (TokenKind::SlashEqual, "/="),
    (TokenKind::PercentEqual, "%="),
    (TokenKind::AmperEqual, "&="),
    (TokenKind::VbarEqual, "|="),
    (TokenKind::CircumflexEqual, "^="),
    (TokenKind::LeftShiftEqual, "<<="),
    (TokenKind::RightShiftEqual, ">>="),
    (TokenKind::DoubleStarEqual, "**="),
    (TokenKind::DoubleSlash, "//"),
    (TokenKind::DoubleSlashEqual, "//="),
    (TokenKind::At, "@"),
    (TokenKind::AtEqual, "@="),
    (TokenKind::RArrow, "->"),
    (TokenKind::Ellipsis, "..."),
    (TokenKind::ColonEqual, ":="),
    (TokenKind::Exclamation, "!"),
];

/// Longest entry in [`SYMBOLS`], in characters
pub const MAX_SYMBOL_LEN: usize = 3;

impl TokenKind {
    /// Literal text of a punctuation kind
    pub fn symbol(self) -> Option<&'static str> {
        SYMBOLS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, text)| *text)
    }

    /// Looks up the punctuation kind spelled exactly `text`
    pub fn from_symbol(text: &str) -> Option<TokenKind> {
        SYMBOLS
            .iter()
            .find(|(_, sym)| *sym == text)
            .map(|(kind, _)| *kind)
    }

    /// True for NEWLINE, INDENT, DEDENT and EOF
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent | TokenKind::Eof
        )
    }

    /// Upper-case kind name, as printed in token dumps
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Name => "NAME",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Lpar => "LPAR",
            TokenKind::Rpar => "RPAR",
            TokenKind::Lsqb => "LSQB",
            TokenKind::Rsqb => "RSQB",
            TokenKind::Lbrace => "LBRACE",
            TokenKind::Rbrace => "RBRACE",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Semi => "SEMI",
            TokenKind::Dot => "DOT",
            TokenKind::Ellipsis => "ELLIPSIS",
            TokenKind::RArrow => "RARROW",
            TokenKind::At => "AT",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Percent => "PERCENT",
            TokenKind::DoubleStar => "DOUBLESTAR",
            TokenKind::DoubleSlash => "DOUBLESLASH",
            TokenKind::Vbar => "VBAR",
            TokenKind::Amper => "AMPER",
            TokenKind::Circumflex => "CIRCUMFLEX",
            TokenKind::Tilde => "TILDE",
            TokenKind::LeftShift => "LEFTSHIFT",
            TokenKind::RightShift => "RIGHTSHIFT",
            TokenKind::Exclamation => "EXCLAMATION",
            TokenKind::Less => "LESS",
            TokenKind::Greater => "GREATER",
            TokenKind::EqEqual => "EQEQUAL",
            TokenKind::NotEqual => "NOTEQUAL",
            TokenKind::LessEqual => "LESSEQUAL",
            TokenKind::GreaterEqual => "GREATEREQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::ColonEqual => "COLONEQUAL",
            TokenKind::PlusEqual => "PLUSEQUAL",
            TokenKind::MinEqual => "MINEQUAL",
            TokenKind::StarEqual => "STAREQUAL",
            TokenKind::SlashEqual => "SLASHEQUAL",
            TokenKind::PercentEqual => "PERCENTEQUAL",
            TokenKind::AmperEqual => "AMPEREQUAL",
            TokenKind::VbarEqual => "VBAREQUAL",
            TokenKind::CircumflexEqual => "CIRCUMFLEXEQUAL",
            TokenKind::LeftShiftEqual => "LEFTSHIFTEQUAL",
            TokenKind::RightShiftEqual => "RIGHTSHIFTEQUAL",
            TokenKind::DoubleStarEqual => "DOUBLESTAREQUAL",
            TokenKind::DoubleSlashEqual => "DOUBLESLASHEQUAL",
            TokenKind::AtEqual => "ATEQUAL",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A token with its location in the source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text; empty for structural tokens
    pub text: String,
    /// Line of the first character (1-indexed)
    pub line: u32,
    /// Column of the first character (1-indexed)
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// Creates a NEWLINE/INDENT/DEDENT/EOF token
    pub fn structural(kind: TokenKind, pos: Position) -> Self {
        Self::new(kind, String::new(), pos.line, pos.column)
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Checks for a specific reserved word
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Human-readable form used in diagnostics: the symbol for
    /// punctuation, else the source text, else the kind name
    pub fn describe(&self) -> &str {
        if let Some(symbol) = self.kind.symbol() {
            symbol
        } else if !self.text.is_empty() {
            &self.text
        } else {
            self.kind.name()
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}, {}, {}, {}>",
            self.kind, self.text, self.line, self.column
        )
    }
}
