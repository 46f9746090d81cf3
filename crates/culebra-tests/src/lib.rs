//! Integration tests for the Culebra front end
//!
//! This crate provides end-to-end testing of the complete pipeline:
//! Source → Lexer → Parser

use culebra_error::{Diagnostics, SyntaxError};
use culebra_lexer::{Lexer, Token, TokenKind};
use culebra_parser::{parse, File};

/// Result of running Culebra source through the pipeline
#[derive(Debug)]
pub struct AnalysisResult {
    /// Tokens produced by the lexer
    pub tokens: Vec<Token>,
    /// Lexical diagnostics; these never stop the parse
    pub lexical: Diagnostics,
    /// Outcome of the parse
    pub outcome: Result<File, SyntaxError>,
}

/// Tokenizes and parses Culebra source code
pub fn analyze(source: &str) -> AnalysisResult {
    // Phase 1: Lexing
    let mut lexer = Lexer::new(source);
    let tokens = lexer.generate_tokens();
    let lexical = lexer.take_diagnostics();

    // Phase 2: Parsing
    let outcome = parse(tokens.clone());

    AnalysisResult {
        tokens,
        lexical,
        outcome,
    }
}

/// Asserts that source code parses and returns the file
pub fn assert_parses(source: &str) -> File {
    match analyze(source).outcome {
        Ok(file) => file,
        Err(err) => panic!(
            "Expected source to parse, but got:\n{}\n\nSource:\n{}",
            err, source
        ),
    }
}

/// Asserts that parsing fails with exactly the given message
pub fn assert_fails_with(source: &str, expected: &str) {
    match analyze(source).outcome {
        Ok(file) => panic!(
            "Expected source to fail with '{}', but it parsed:\n{:?}",
            expected, file
        ),
        Err(err) => assert_eq!(err.to_string(), expected, "source:\n{}", source),
    }
}

/// Checks that INDENT and DEDENT tokens pair up and never go negative
pub fn indentation_balanced(tokens: &[Token]) -> bool {
    let mut depth: i64 = 0;
    for token in tokens {
        match token.kind {
            TokenKind::Indent => depth += 1,
            TokenKind::Dedent => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}
