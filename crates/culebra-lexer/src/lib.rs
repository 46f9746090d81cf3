//! culebra-lexer - Tokenizer for the Culebra language
//!
//! This crate converts Culebra source code into a sequence of tokens.
//!
//! # Features
//!
//! - Significant indentation, encoded as NEWLINE/INDENT/DEDENT tokens that
//!   are always balanced
//! - Longest-match recognition of one- to three-character operators
//! - Case-sensitive keyword recognition
//! - Unrecognized characters are reported and skipped; tokenizing never fails
//!
//! # Example
//!
//! ```rust
//! use culebra_lexer::{Lexer, TokenKind};
//!
//! let source = "def double(x: int):\n    return x * 2\n";
//!
//! let mut lexer = Lexer::new(source);
//! let tokens = lexer.generate_tokens();
//!
//! assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
//! for token in &tokens {
//!     println!("{}", token);
//! }
//! ```

pub mod lexer;
pub mod token;

pub use lexer::{generate_tokens, Lexer};
pub use token::{is_keyword, Token, TokenKind, KEYWORDS, SYMBOLS};
