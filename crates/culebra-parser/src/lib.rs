//! culebra-parser - Parser for the Culebra language
//!
//! Converts a sequence of tokens into an AST (Abstract Syntax Tree).
//! Parsing is fail-fast: the first rule violation is returned as a
//! [`SyntaxError`](culebra_error::SyntaxError) and no partial tree is kept.
//!
//! # Example
//!
//! ```rust
//! use culebra_lexer::Lexer;
//! use culebra_parser::{parse, Stmt};
//!
//! let source = "def double(x: int):\n    return x * 2\n";
//! let mut lexer = Lexer::new(source);
//! let tokens = lexer.generate_tokens();
//!
//! let file = parse(tokens).unwrap();
//! assert!(matches!(file.statements[0], Stmt::FunctionDef(_)));
//! ```

pub mod ast;
pub mod parser;

pub use ast::*;
pub use parser::{parse, parse_source, Parser, MAX_DEPTH};
