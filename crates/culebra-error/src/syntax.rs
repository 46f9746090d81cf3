//! Syntax errors raised by the parser
//!
//! The `Display` output of [`SyntaxError`] is the exact one-line text the
//! driver prints, so it must not change.

use crate::diagnostic::{Diagnostic, ErrorCode};
use crate::span::{Position, Span};
use thiserror::Error;

/// First rule violation found while parsing. Parsing stops here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// The current token does not fit the rule being parsed
    #[error("<{line},{column}> Error sintactico: se encontro: '{found}'; se esperaba: '{expected}'.")]
    UnexpectedToken {
        line: u32,
        column: u32,
        expected: String,
        found: String,
    },

    /// A block opener was followed by a newline but not by a deeper line
    #[error("<{line},{column}> Error sintactico: falla de indentacion")]
    Indentation { line: u32, column: u32 },

    /// Statements or expressions nest deeper than the parser allows
    #[error("<{line},{column}> Error sintactico: anidamiento demasiado profundo")]
    NestingTooDeep { line: u32, column: u32, limit: usize },
}

impl SyntaxError {
    pub fn unexpected(
        line: u32,
        column: u32,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        SyntaxError::UnexpectedToken {
            line,
            column,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn indentation(line: u32, column: u32) -> Self {
        SyntaxError::Indentation { line, column }
    }

    pub fn nesting_too_deep(line: u32, column: u32, limit: usize) -> Self {
        SyntaxError::NestingTooDeep {
            line,
            column,
            limit,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            SyntaxError::UnexpectedToken { line, column, .. }
            | SyntaxError::Indentation { line, column }
            | SyntaxError::NestingTooDeep { line, column, .. } => Position::new(*line, *column),
        }
    }

    pub fn line(&self) -> u32 {
        self.position().line
    }

    pub fn column(&self) -> u32 {
        self.position().column
    }

    /// Converts into a labelled diagnostic for snippet rendering
    pub fn to_diagnostic(&self) -> Diagnostic {
        let start = self.position();
        match self {
            SyntaxError::UnexpectedToken {
                expected, found, ..
            } => {
                let width = found.chars().count().max(1) as u32;
                Diagnostic::error(self.to_string())
                    .with_code(ErrorCode::UNEXPECTED_TOKEN)
                    .with_label(Span::on_line(start, width), format!("expected '{}'", expected))
            }
            SyntaxError::Indentation { .. } => Diagnostic::error(self.to_string())
                .with_code(ErrorCode::INVALID_INDENT)
                .with_label(Span::point(start), "this line should be indented")
                .with_help("indent the body of the block deeper than the line that opens it"),
            SyntaxError::NestingTooDeep { limit, .. } => Diagnostic::error(self.to_string())
                .with_code(ErrorCode::NESTING_TOO_DEEP)
                .with_label(Span::point(start), "nesting limit reached here")
                .with_note(format!(
                    "statements and expressions may nest at most {} levels",
                    limit
                )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_text() {
        let err = SyntaxError::unexpected(1, 22, "NAME", ")");
        assert_eq!(
            err.to_string(),
            "<1,22> Error sintactico: se encontro: ')'; se esperaba: 'NAME'."
        );
    }

    #[test]
    fn test_indentation_text() {
        let err = SyntaxError::indentation(3, 5);
        assert_eq!(err.to_string(), "<3,5> Error sintactico: falla de indentacion");
        assert_eq!(err.line(), 3);
        assert_eq!(err.column(), 5);
    }

    #[test]
    fn test_to_diagnostic_keeps_message() {
        let err = SyntaxError::unexpected(2, 4, "expression", "in");
        let diag = err.to_diagnostic();
        assert_eq!(diag.message, err.to_string());
        assert_eq!(diag.code, Some(ErrorCode::UNEXPECTED_TOKEN));
        assert_eq!(diag.primary_span().map(|s| s.width()), Some(2));
    }

    #[test]
    fn test_nesting_too_deep() {
        let err = SyntaxError::nesting_too_deep(1, 201, 200);
        assert_eq!(
            err.to_string(),
            "<1,201> Error sintactico: anidamiento demasiado profundo"
        );

        let diag = err.to_diagnostic();
        assert_eq!(diag.code, Some(ErrorCode::NESTING_TOO_DEEP));
        assert_eq!(
            diag.notes,
            vec!["statements and expressions may nest at most 200 levels".to_string()]
        );
    }
}
