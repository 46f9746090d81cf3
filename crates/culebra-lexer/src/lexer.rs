//! Lexer for the Culebra language
//!
//! Converts source code into a sequence of tokens. Block structure is
//! encoded with synthetic NEWLINE/INDENT/DEDENT tokens (Python style).

use crate::token::{is_keyword, Token, TokenKind, MAX_SYMBOL_LEN};
use culebra_error::{Diagnostic, Diagnostics, ErrorCode, Position, Span};
use tracing::{debug, warn};

/// The Culebra language Lexer
pub struct Lexer {
    /// Source code characters
    chars: Vec<char>,
    /// Current position (index in chars vector)
    pos: usize,
    /// Current line (1-indexed)
    line: u32,
    /// Current column (1-indexed)
    column: u32,
    /// Stack of open indentation widths, bottom is always 0
    indent_stack: Vec<u32>,
    /// Tokens produced so far
    tokens: Vec<Token>,
    /// Accumulated lexical diagnostics
    diagnostics: Diagnostics,
}

impl Lexer {
    /// Creates a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            indent_stack: vec![0],
            tokens: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Returns the accumulated diagnostics
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Consumes and returns the diagnostics
    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }

    /// Returns the current character without advancing
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Returns the next character without advancing
    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    /// Advances to the next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn current_indent(&self) -> u32 {
        self.indent_stack.last().copied().unwrap_or(0)
    }

    /// Skips a comment (# until end of line)
    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Counts the leading spaces of a line and emits INDENT/DEDENT tokens.
    ///
    /// Blank and comment-only lines leave the indentation stack alone. A
    /// width that matches no open level is rounded down to the nearest
    /// lower one.
    fn handle_indentation(&mut self) {
        let mut width = 0u32;
        while self.peek() == Some(' ') {
            width += 1;
            self.advance();
        }

        match self.peek() {
            None | Some('\n') | Some('#') => return,
            Some('\r') if matches!(self.peek_next(), None | Some('\n')) => return,
            _ => {}
        }

        let start = self.current_position();

        if width > self.current_indent() {
            self.indent_stack.push(width);
            self.tokens.push(Token::structural(TokenKind::Indent, start));
            return;
        }

        while width < self.current_indent() && self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.tokens.push(Token::structural(TokenKind::Dedent, start));
        }
    }

    /// Reads a maximal run of digits
    fn read_number(&mut self) {
        let start = self.current_position();
        let mut number = String::new();

        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            number.push(ch);
            self.advance();
        }

        self.tokens
            .push(Token::new(TokenKind::Number, number, start.line, start.column));
    }

    /// Reads an identifier or keyword
    fn read_identifier(&mut self) {
        let start = self.current_position();
        let mut ident = String::new();

        while let Some(ch) = self.peek() {
            if !(ch.is_ascii_alphanumeric() || ch == '_') {
                break;
            }
            ident.push(ch);
            self.advance();
        }

        let kind = if is_keyword(&ident) {
            TokenKind::Keyword
        } else {
            TokenKind::Name
        };

        self.tokens
            .push(Token::new(kind, ident, start.line, start.column));
    }

    /// Reads the longest operator at the cursor. Returns false when no
    /// symbol starts here.
    fn read_operator(&mut self) -> bool {
        let start = self.current_position();

        for len in (1..=MAX_SYMBOL_LEN).rev() {
            let Some(slice) = self.chars.get(self.pos..self.pos + len) else {
                continue;
            };
            let text: String = slice.iter().collect();

            if let Some(kind) = TokenKind::from_symbol(&text) {
                for _ in 0..len {
                    self.advance();
                }
                self.tokens
                    .push(Token::new(kind, text, start.line, start.column));
                return true;
            }
        }

        false
    }

    /// Reports an unrecognized character and skips it
    fn report_unexpected(&mut self, ch: char) {
        let start = self.current_position();
        let message = format!(
            "Error léxico en línea {}, columna {}",
            start.line, start.column
        );

        warn!(line = start.line, column = start.column, character = %ch, "unrecognized character");

        self.diagnostics.push(
            Diagnostic::warning(message)
                .with_code(ErrorCode::UNEXPECTED_CHAR)
                .with_label(Span::on_line(start, 1), format!("unrecognized character '{}'", ch)),
        );
        self.advance();
    }

    /// Closes every open indentation level
    fn close_blocks(&mut self) {
        let end = self.current_position();
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.tokens.push(Token::structural(TokenKind::Dedent, end));
        }
    }

    /// Tokenizes the entire source code. Never fails: unrecognized
    /// characters are reported through [`Lexer::diagnostics`] and skipped.
    pub fn generate_tokens(&mut self) -> Vec<Token> {
        self.handle_indentation();

        while let Some(ch) = self.peek() {
            match ch {
                '\n' => {
                    let start = self.current_position();
                    self.advance();
                    self.tokens.push(Token::structural(TokenKind::Newline, start));
                    self.handle_indentation();
                }
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '#' => self.skip_comment(),
                c if c.is_ascii_digit() => self.read_number(),
                c if c.is_ascii_alphabetic() || c == '_' => self.read_identifier(),
                c => {
                    if !self.read_operator() {
                        self.report_unexpected(c);
                    }
                }
            }
        }

        self.close_blocks();
        let end = self.current_position();
        self.tokens.push(Token::structural(TokenKind::Eof, end));

        debug!(
            tokens = self.tokens.len(),
            lexical_errors = self.diagnostics.len(),
            "tokenized source"
        );

        std::mem::take(&mut self.tokens)
    }
}

/// Tokenizes source code and returns the tokens with any lexical diagnostics
pub fn generate_tokens(source: &str) -> (Vec<Token>, Diagnostics) {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.generate_tokens();
    (tokens, lexer.take_diagnostics())
}
