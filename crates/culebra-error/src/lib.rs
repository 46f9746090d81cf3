//! culebra-error - Diagnostics for the Culebra front end
//!
//! Two kinds of problems are reported:
//!
//! - lexical problems (unrecognized characters), which are collected as
//!   warning-level [`Diagnostic`]s while tokenizing continues;
//! - syntax errors ([`SyntaxError`]), which end the parse.
//!
//! # Example
//!
//! ```rust
//! use culebra_error::{DiagnosticRenderer, SourceFile, SyntaxError};
//!
//! let file = SourceFile::new("entrada.py", "def f(data: ):\n    pass\n");
//! let err = SyntaxError::unexpected(1, 13, "NAME", ")");
//!
//! println!("{}", err);
//! println!("{}", DiagnosticRenderer::new(&file).render(&err.to_diagnostic()));
//! ```

pub mod diagnostic;
pub mod span;
pub mod syntax;

pub use diagnostic::{Diagnostic, DiagnosticRenderer, ErrorCode, Label, Level, SourceFile};
pub use span::{Position, Span};
pub use syntax::SyntaxError;

/// Result of a parse step
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Diagnostics accumulated while tokenizing
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.level == Level::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Renders all diagnostics against one source file
    pub fn render(&self, file: &SourceFile) -> String {
        let renderer = DiagnosticRenderer::new(file);
        self.items
            .iter()
            .map(|d| renderer.render(d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
