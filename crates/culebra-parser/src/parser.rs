//! Parser for the Culebra language
//!
//! Converts a sequence of tokens into an AST using recursive descent with
//! one token of lookahead. Parsing stops at the first rule violation.

use crate::ast::*;
use culebra_error::{Diagnostics, Result, SyntaxError};
use culebra_lexer::{generate_tokens, Token, TokenKind};
use tracing::debug;

/// Maximum nesting depth of statements and expressions
pub const MAX_DEPTH: usize = 100;

/// Parser for the Culebra language
pub struct Parser {
    /// Tokens to be parsed
    tokens: Vec<Token>,
    /// Current position
    pos: usize,
    /// Stands in for the current token once the input is exhausted
    eof: Token,
    /// Current nesting depth, bounded by [`MAX_DEPTH`]
    depth: usize,
}

impl Parser {
    /// Creates a new parser
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof = match tokens.last() {
            Some(last) => Token::new(TokenKind::Eof, "", last.line, last.column),
            None => Token::new(TokenKind::Eof, "", 1, 1),
        };

        Self {
            tokens,
            pos: 0,
            eof,
            depth: 0,
        }
    }

    // =========================================
    // Helpers
    // =========================================

    /// Returns the current token without advancing
    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Checks if the current token is of the specified kind
    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn check_keyword(&self, word: &str) -> bool {
        self.current().is_keyword(word)
    }

    /// Checks if we've reached the end
    fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consumes the current token and returns it
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consumes the token if it is of the given kind
    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, word: &str) -> bool {
        if self.check_keyword(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Requires a token of `kind` (and text `value`, when given), or fails
    /// with an expected/found error at the current token
    fn expect(&mut self, kind: TokenKind, value: Option<&str>) -> Result<Token> {
        let current = self.current();
        let matches = current.kind == kind && value.map_or(true, |v| current.text == v);

        if matches {
            Ok(self.advance())
        } else {
            let expected = kind.symbol().or(value).unwrap_or(kind.name());
            Err(self.error_at_current(expected))
        }
    }

    fn expect_keyword(&mut self, word: &str) -> Result<Token> {
        self.expect(TokenKind::Keyword, Some(word))
    }

    fn expect_name(&mut self) -> Result<String> {
        Ok(self.expect(TokenKind::Name, None)?.text)
    }

    fn error_at_current(&self, expected: &str) -> SyntaxError {
        let token = self.current();
        SyntaxError::unexpected(token.line, token.column, expected, token.describe())
    }

    fn indentation_error(&self) -> SyntaxError {
        let token = self.current();
        SyntaxError::indentation(token.line, token.column)
    }

    /// Goes one nesting level deeper, failing at the current token once
    /// [`MAX_DEPTH`] is reached. Callers reset `depth` when they unwind.
    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            let token = self.current();
            return Err(SyntaxError::nesting_too_deep(
                token.line,
                token.column,
                MAX_DEPTH,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    /// Runs `parse` one nesting level deeper
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.enter()?;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// True where a simple statement may end
    fn at_statement_end(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof
        )
    }

    /// Consumes the NEWLINE ending a simple statement. A block or file
    /// closing right after the statement also ends it.
    fn end_statement(&mut self) -> Result<()> {
        if self.check(TokenKind::Dedent) || self.is_at_end() {
            return Ok(());
        }
        self.expect(TokenKind::Newline, None)?;
        Ok(())
    }

    // =========================================
    // Main parsing
    // =========================================

    /// Parses the complete file
    pub fn parse(&mut self) -> Result<File> {
        debug!(tokens = self.tokens.len(), "parsing file");

        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        debug!(statements = statements.len(), "parsed file");
        Ok(File { statements })
    }

    /// Parses a statement
    fn parse_statement(&mut self) -> Result<Stmt> {
        self.nested(Self::parse_statement_kind)
    }

    fn parse_statement_kind(&mut self) -> Result<Stmt> {
        match self.current().kind {
            TokenKind::Newline => {
                self.advance();
                Ok(Stmt::Empty)
            }
            TokenKind::Indent => Err(self.indentation_error()),
            TokenKind::Keyword => match self.current().text.as_str() {
                "class" => self.parse_class_def(),
                "def" => self.parse_function_def(),
                "if" => self.parse_conditional("if"),
                "while" => self.parse_while(),
                "for" => self.parse_for(),
                "return" => self.parse_return(),
                "pass" => self.parse_pass(),
                _ => self.parse_expr_stmt(),
            },
            _ => self.parse_expr_stmt(),
        }
    }

    // =========================================
    // Blocks
    // =========================================

    /// Parse: `NEWLINE INDENT statement* DEDENT`
    fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        self.expect(TokenKind::Newline, None)?;
        self.parse_indented_body()
    }

    /// Parse: `INDENT statement* DEDENT`. A missing INDENT is an
    /// indentation error rather than an expected-token error.
    fn parse_indented_body(&mut self) -> Result<Vec<Stmt>> {
        // Blank and comment-only lines between the colon and the body
        while self.match_token(TokenKind::Newline) {}

        if !self.check(TokenKind::Indent) {
            return Err(self.indentation_error());
        }
        self.advance();

        let mut statements = Vec::new();
        while !self.check(TokenKind::Dedent) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::Dedent, None)?;

        Ok(statements)
    }

    /// Parse a block, or a single statement on the same line as the colon
    fn parse_suite(&mut self) -> Result<Vec<Stmt>> {
        if self.match_token(TokenKind::Newline) {
            self.parse_indented_body()
        } else {
            Ok(vec![self.parse_statement()?])
        }
    }

    // =========================================
    // Statements
    // =========================================

    /// Parse: `class Name:` block
    fn parse_class_def(&mut self) -> Result<Stmt> {
        self.expect_keyword("class")?;
        let name = self.expect_name()?;
        self.expect(TokenKind::Colon, None)?;
        let statements = self.parse_block()?;

        Ok(Stmt::ClassDef(ClassDef {
            name,
            body: Block { statements },
        }))
    }

    /// Parse: `def name(params):` suite
    fn parse_function_def(&mut self) -> Result<Stmt> {
        self.expect_keyword("def")?;
        let name = self.expect_name()?;
        self.expect(TokenKind::Lpar, None)?;
        let params = self.parse_parameters()?;
        self.expect(TokenKind::Rpar, None)?;
        self.expect(TokenKind::Colon, None)?;
        let body = self.parse_suite()?;

        Ok(Stmt::FunctionDef(FunctionDef { name, params, body }))
    }

    /// Parse: `(NAME (':' type)? ','?)*` up to the closing parenthesis
    fn parse_parameters(&mut self) -> Result<Vec<Param>> {
        let mut params = Vec::new();

        while !self.check(TokenKind::Rpar) {
            let name = self.expect_name()?;
            let annotation = if self.match_token(TokenKind::Colon) {
                Some(self.parse_type_annotation()?)
            } else {
                None
            };
            params.push(Param { name, annotation });

            self.match_token(TokenKind::Comma);
        }

        Ok(params)
    }

    /// Parse: `[NAME]` or `NAME`
    fn parse_type_annotation(&mut self) -> Result<TypeAnnotation> {
        if self.match_token(TokenKind::Lsqb) {
            let element = self.expect_name()?;
            self.expect(TokenKind::Rsqb, None)?;
            Ok(TypeAnnotation::List { element })
        } else {
            let name = self.expect_name()?;
            Ok(TypeAnnotation::Named { name })
        }
    }

    /// Parse: `if expr:` suite, then any `elif`/`else` branches. `keyword`
    /// is `if` for the head of the chain and `elif` for later links.
    fn parse_conditional(&mut self, keyword: &str) -> Result<Stmt> {
        self.expect_keyword(keyword)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::Colon, None)?;
        let then_branch = self.parse_suite()?;

        let else_branch = if self.check_keyword("elif") {
            Some(vec![self.nested(|p| p.parse_conditional("elif"))?])
        } else if self.match_keyword("else") {
            self.expect(TokenKind::Colon, None)?;
            Some(self.parse_suite()?)
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            condition,
            then_branch,
            else_branch,
        }))
    }

    /// Parse: `while expr:` suite
    fn parse_while(&mut self) -> Result<Stmt> {
        self.expect_keyword("while")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::Colon, None)?;
        let body = self.parse_suite()?;

        Ok(Stmt::While(WhileStmt { condition, body }))
    }

    /// Parse: `for NAME in expr:` suite
    fn parse_for(&mut self) -> Result<Stmt> {
        self.expect_keyword("for")?;
        let target = self.expect_name()?;
        self.expect_keyword("in")?;
        let iterable = self.parse_expression()?;
        self.expect(TokenKind::Colon, None)?;
        let body = self.parse_suite()?;

        Ok(Stmt::For(ForStmt {
            target,
            iterable,
            body,
        }))
    }

    /// Parse: `return [expr]`
    fn parse_return(&mut self) -> Result<Stmt> {
        self.expect_keyword("return")?;

        let expression = if self.at_statement_end() {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.end_statement()?;

        Ok(Stmt::Return(ReturnStmt { expression }))
    }

    /// Parse: `pass`
    fn parse_pass(&mut self) -> Result<Stmt> {
        self.expect_keyword("pass")?;
        self.end_statement()?;
        Ok(Stmt::Pass)
    }

    /// Parse expression statement
    fn parse_expr_stmt(&mut self) -> Result<Stmt> {
        let expr = self.parse_expression()?;
        self.end_statement()?;
        Ok(Stmt::Expr(expr))
    }

    // =========================================
    // Expressions
    // =========================================

    pub fn parse_expression(&mut self) -> Result<Expr> {
        self.parse_or()
    }

    /// Parse `a or b`
    fn parse_or(&mut self) -> Result<Expr> {
        let mut left = self.parse_and()?;
        let depth = self.depth;

        while self.match_keyword("or") {
            self.enter()?;
            let right = self.parse_and()?;
            left = Expr::binary(left, BinaryOperator::Or, right);
        }

        self.depth = depth;
        Ok(left)
    }

    /// Parse `a and b`
    fn parse_and(&mut self) -> Result<Expr> {
        let mut left = self.parse_not()?;
        let depth = self.depth;

        while self.match_keyword("and") {
            self.enter()?;
            let right = self.parse_not()?;
            left = Expr::binary(left, BinaryOperator::And, right);
        }

        self.depth = depth;
        Ok(left)
    }

    /// Parse `not a`
    fn parse_not(&mut self) -> Result<Expr> {
        if self.match_keyword("not") {
            let operand = self.nested(Self::parse_not)?;
            return Ok(Expr::unary(UnaryOperator::Not, operand));
        }

        self.parse_comparison()
    }

    /// Parse comparisons, left-associative and not chained
    fn parse_comparison(&mut self) -> Result<Expr> {
        let mut left = self.parse_additive()?;
        let depth = self.depth;

        loop {
            let op = match self.current().kind {
                TokenKind::EqEqual => BinaryOperator::Eq,
                TokenKind::NotEqual => BinaryOperator::NotEq,
                TokenKind::Less => BinaryOperator::Lt,
                TokenKind::Greater => BinaryOperator::Gt,
                TokenKind::LessEqual => BinaryOperator::LtE,
                TokenKind::GreaterEqual => BinaryOperator::GtE,
                _ => break,
            };
            self.advance();
            self.enter()?;

            let right = self.parse_additive()?;
            left = Expr::binary(left, op, right);
        }

        self.depth = depth;
        Ok(left)
    }

    /// Parse addition/subtraction
    fn parse_additive(&mut self) -> Result<Expr> {
        let mut left = self.parse_multiplicative()?;
        let depth = self.depth;

        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Sub,
                _ => break,
            };
            self.advance();
            self.enter()?;

            let right = self.parse_multiplicative()?;
            left = Expr::binary(left, op, right);
        }

        self.depth = depth;
        Ok(left)
    }

    /// Parse multiplication/division/remainder
    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        let depth = self.depth;

        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinaryOperator::Mul,
                TokenKind::Slash => BinaryOperator::Div,
                TokenKind::DoubleSlash => BinaryOperator::FloorDiv,
                TokenKind::Percent => BinaryOperator::Mod,
                _ => break,
            };
            self.advance();
            self.enter()?;

            let right = self.parse_unary()?;
            left = Expr::binary(left, op, right);
        }

        self.depth = depth;
        Ok(left)
    }

    /// Parse unary `+`/`-`. Unary plus leaves its operand unchanged.
    fn parse_unary(&mut self) -> Result<Expr> {
        if self.match_token(TokenKind::Plus) {
            return self.nested(Self::parse_unary);
        }

        if self.match_token(TokenKind::Minus) {
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Expr::unary(UnaryOperator::Neg, operand));
        }

        self.parse_power()
    }

    /// Parse `a ** b`; binds tighter than a unary operator on its left
    /// and is right-associative
    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_primary()?;

        if self.match_token(TokenKind::DoubleStar) {
            let exponent = self.nested(Self::parse_unary)?;
            return Ok(Expr::binary(base, BinaryOperator::Pow, exponent));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let token = self.current().clone();

        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(Expr::number(token.text))
            }
            TokenKind::Keyword => {
                let value = match token.text.as_str() {
                    "True" => LiteralValue::True,
                    "False" => LiteralValue::False,
                    "None" => LiteralValue::None,
                    _ => return Err(self.error_at_current("expression")),
                };
                self.advance();
                Ok(Expr::Literal { value })
            }
            TokenKind::Name => {
                self.advance();
                if self.match_token(TokenKind::Lpar) {
                    let args = self.parse_arg_list()?;
                    self.expect(TokenKind::Rpar, None)?;
                    Ok(Expr::FunctionCall {
                        name: token.text,
                        args,
                    })
                } else {
                    Ok(Expr::Identifier { name: token.text })
                }
            }
            TokenKind::Lpar => {
                self.advance();
                let expr = self.nested(Self::parse_expression)?;
                self.expect(TokenKind::Rpar, None)?;
                Ok(expr)
            }
            _ => Err(self.error_at_current("expression")),
        }
    }

    fn parse_arg_list(&mut self) -> Result<Vec<Expr>> {
        let mut args = Vec::new();

        if !self.check(TokenKind::Rpar) {
            args.push(self.nested(Self::parse_expression)?);
            while self.match_token(TokenKind::Comma) {
                args.push(self.nested(Self::parse_expression)?);
            }
        }

        Ok(args)
    }
}

/// Parses a token sequence into a file
pub fn parse(tokens: Vec<Token>) -> Result<File> {
    Parser::new(tokens).parse()
}

/// Tokenizes and parses source code. Lexical diagnostics are returned
/// alongside the parse result; they never stop the parse.
pub fn parse_source(source: &str) -> (Result<File>, Diagnostics) {
    let (tokens, diagnostics) = generate_tokens(source);
    (parse(tokens), diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_ok(source: &str) -> File {
        let (result, _) = parse_source(source);
        match result {
            Ok(file) => file,
            Err(err) => panic!("expected {:?} to parse, got: {}", source, err),
        }
    }

    fn parse_err(source: &str) -> String {
        let (result, _) = parse_source(source);
        match result {
            Ok(file) => panic!("expected {:?} to fail, got: {:?}", source, file),
            Err(err) => err.to_string(),
        }
    }

    fn expr(source: &str) -> Expr {
        let file = parse_ok(source);
        let expr = match file.items().next() {
            Some(Stmt::Expr(expr)) => expr.clone(),
            other => panic!("expected an expression statement, got {:?}", other),
        };
        expr
    }

    fn only_function(file: &File) -> &FunctionDef {
        let items: Vec<_> = file.items().collect();
        assert_eq!(items.len(), 1, "expected one statement in {:?}", file);
        match items[0] {
            Stmt::FunctionDef(func) => func,
            other => panic!("expected FunctionDef, got {:?}", other),
        }
    }

    // =========================================
    // Expressions
    // =========================================

    #[test]
    fn test_multiplication_binds_tighter() {
        assert_eq!(
            expr("2+3*4"),
            Expr::binary(
                Expr::number("2"),
                BinaryOperator::Add,
                Expr::binary(Expr::number("3"), BinaryOperator::Mul, Expr::number("4")),
            )
        );
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(
            expr("-2+3"),
            Expr::binary(
                Expr::unary(UnaryOperator::Neg, Expr::number("2")),
                BinaryOperator::Add,
                Expr::number("3"),
            )
        );
    }

    #[test]
    fn test_unary_plus_is_a_no_op() {
        assert_eq!(expr("+5"), Expr::number("5"));
        assert_eq!(expr("+-x"), Expr::unary(UnaryOperator::Neg, Expr::identifier("x")));
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(expr("1-2-3").to_string(), "((1 - 2) - 3)");
        assert_eq!(expr("8/4*2").to_string(), "((8 / 4) * 2)");
        assert_eq!(expr("7//2%3").to_string(), "((7 // 2) % 3)");
    }

    #[test]
    fn test_power() {
        assert_eq!(expr("2**3**2").to_string(), "(2 ** (3 ** 2))");
        assert_eq!(expr("-2**2").to_string(), "(-(2 ** 2))");
        assert_eq!(expr("2*3**2").to_string(), "(2 * (3 ** 2))");
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(expr("(2+3)*4").to_string(), "((2 + 3) * 4)");
    }

    #[test]
    fn test_comparison_and_boolean_operators() {
        assert_eq!(
            expr("x % 2 == 0").to_string(),
            "((x % 2) == 0)"
        );
        assert_eq!(
            expr("a < b and not c or d >= 1").to_string(),
            "(((a < b) and (not c)) or (d >= 1))"
        );
    }

    #[test]
    fn test_keyword_literals() {
        assert_eq!(expr("True"), Expr::Literal { value: LiteralValue::True });
        assert_eq!(expr("None"), Expr::Literal { value: LiteralValue::None });
    }

    #[test]
    fn test_function_call() {
        assert_eq!(
            expr("f(1, g(x), y+1)").to_string(),
            "f(1, g(x), (y + 1))"
        );
        assert_eq!(
            expr("f()"),
            Expr::FunctionCall {
                name: "f".into(),
                args: vec![]
            }
        );
    }

    #[test]
    fn test_name_without_parenthesis_is_identifier() {
        assert_eq!(expr("print"), Expr::identifier("print"));
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            parse_err("1 +\n"),
            "<1,4> Error sintactico: se encontro: 'NEWLINE'; se esperaba: 'expression'."
        );
    }

    #[test]
    fn test_unclosed_call() {
        assert_eq!(
            parse_err("f(1"),
            "<1,4> Error sintactico: se encontro: 'EOF'; se esperaba: ')'."
        );
    }

    // =========================================
    // Statements
    // =========================================

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(Vec::new()), Ok(File { statements: vec![] }));
        assert_eq!(parse_ok(""), File { statements: vec![] });
    }

    #[test]
    fn test_blank_lines_are_empty_statements() {
        let file = parse_ok("\n\npass\n");
        assert_eq!(file.statements, vec![Stmt::Empty, Stmt::Empty, Stmt::Pass]);
    }

    #[test]
    fn test_parse_function() {
        let file = parse_ok(
            "def is_even(x: int):\n    if x % 2 == 0:\n        return True\n    else:\n        return False\n",
        );
        let func = only_function(&file);

        assert_eq!(func.name, "is_even");
        assert_eq!(
            func.params,
            vec![Param {
                name: "x".into(),
                annotation: Some(TypeAnnotation::Named { name: "int".into() }),
            }]
        );
        assert_eq!(func.body.len(), 1);

        let Stmt::If(if_stmt) = &func.body[0] else {
            panic!("expected IfStmt, got {:?}", func.body[0]);
        };
        assert_eq!(if_stmt.condition.to_string(), "((x % 2) == 0)");
        assert_eq!(
            if_stmt.then_branch,
            vec![Stmt::Return(ReturnStmt {
                expression: Some(Expr::Literal { value: LiteralValue::True })
            })]
        );
        assert_eq!(
            if_stmt.else_branch,
            Some(vec![Stmt::Return(ReturnStmt {
                expression: Some(Expr::Literal { value: LiteralValue::False })
            })])
        );
    }

    #[test]
    fn test_parameters() {
        let file = parse_ok("def f(a, b: int, c: [str]):\n    pass\n");
        let func = only_function(&file);
        assert_eq!(
            func.params,
            vec![
                Param { name: "a".into(), annotation: None },
                Param {
                    name: "b".into(),
                    annotation: Some(TypeAnnotation::Named { name: "int".into() }),
                },
                Param {
                    name: "c".into(),
                    annotation: Some(TypeAnnotation::List { element: "str".into() }),
                },
            ]
        );
    }

    #[test]
    fn test_inline_suite() {
        let file = parse_ok("def f(x): return x\n");
        let func = only_function(&file);
        assert_eq!(
            func.body,
            vec![Stmt::Return(ReturnStmt {
                expression: Some(Expr::identifier("x"))
            })]
        );

        let file = parse_ok("if x: pass\nelse: y\n");
        let items: Vec<_> = file.items().collect();
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Stmt::If(IfStmt { else_branch: Some(_), .. })));
    }

    #[test]
    fn test_bare_return() {
        let file = parse_ok("def f():\n    return\n");
        assert_eq!(
            only_function(&file).body,
            vec![Stmt::Return(ReturnStmt { expression: None })]
        );

        let file = parse_ok("def f():\n    return");
        assert_eq!(
            only_function(&file).body,
            vec![Stmt::Return(ReturnStmt { expression: None })]
        );
    }

    #[test]
    fn test_nested_functions() {
        let file = parse_ok(
            "def outer(x: int):\n    def inner(y: int):\n        return y + x\n    return inner\n",
        );
        let outer = only_function(&file);
        assert_eq!(outer.name, "outer");
        assert_eq!(outer.body.len(), 2);

        let Stmt::FunctionDef(inner) = &outer.body[0] else {
            panic!("expected nested FunctionDef, got {:?}", outer.body[0]);
        };
        assert_eq!(inner.name, "inner");
        assert_eq!(inner.params[0].name, "y");
        assert_eq!(
            inner.body,
            vec![Stmt::Return(ReturnStmt {
                expression: Some(Expr::binary(
                    Expr::identifier("y"),
                    BinaryOperator::Add,
                    Expr::identifier("x"),
                ))
            })]
        );
        assert_eq!(
            outer.body[1],
            Stmt::Return(ReturnStmt {
                expression: Some(Expr::identifier("inner"))
            })
        );
    }

    #[test]
    fn test_class_def() {
        let file = parse_ok("class Point:\n    def norm(self):\n        pass\n    pass\n");
        let items: Vec<_> = file.items().collect();
        let Stmt::ClassDef(class) = items[0] else {
            panic!("expected ClassDef, got {:?}", items[0]);
        };
        assert_eq!(class.name, "Point");
        assert_eq!(class.body.statements.len(), 2);
        assert!(matches!(class.body.statements[0], Stmt::FunctionDef(_)));
        assert_eq!(class.body.statements[1], Stmt::Pass);
    }

    #[test]
    fn test_class_requires_block() {
        assert_eq!(
            parse_err("class A: pass\n"),
            "<1,10> Error sintactico: se encontro: 'pass'; se esperaba: 'NEWLINE'."
        );
    }

    #[test]
    fn test_elif_chain() {
        let file = parse_ok("if a:\n    x\nelif b:\n    y\nelse:\n    z\n");
        let items: Vec<_> = file.items().collect();
        let Stmt::If(outer) = items[0] else {
            panic!("expected IfStmt");
        };
        let Some(else_branch) = &outer.else_branch else {
            panic!("expected elif branch");
        };
        let Stmt::If(inner) = &else_branch[0] else {
            panic!("expected nested IfStmt for elif");
        };
        assert_eq!(inner.condition, Expr::identifier("b"));
        assert_eq!(inner.else_branch, Some(vec![Stmt::Expr(Expr::identifier("z"))]));
    }

    #[test]
    fn test_while_and_for() {
        let file = parse_ok(
            "def f(items: [int]):\n    while n > 0:\n        n\n    for item in items:\n        print(item)\n",
        );
        let func = only_function(&file);
        assert_eq!(func.body.len(), 2);
        assert!(matches!(func.body[0], Stmt::While(_)));

        let Stmt::For(for_stmt) = &func.body[1] else {
            panic!("expected ForStmt");
        };
        assert_eq!(for_stmt.target, "item");
        assert_eq!(for_stmt.iterable, Expr::identifier("items"));
        assert_eq!(for_stmt.body[0], Stmt::Expr(expr("print(item)")));
    }

    #[test]
    fn test_blank_line_before_body() {
        let file = parse_ok("def f():\n\n    # body\n    pass\n");
        assert_eq!(only_function(&file).body, vec![Stmt::Pass]);
    }

    #[test]
    fn test_blank_line_inside_block() {
        let file = parse_ok("def f():\n    a\n\n    b\n");
        assert_eq!(
            only_function(&file).body,
            vec![
                Stmt::Expr(Expr::identifier("a")),
                Stmt::Empty,
                Stmt::Expr(Expr::identifier("b")),
            ]
        );
    }

    // =========================================
    // Errors
    // =========================================

    #[test]
    fn test_missing_indentation() {
        assert_eq!(
            parse_err("def is_odd(x: int):\nif x % 2 != 0:\n    return True\n"),
            "<2,1> Error sintactico: falla de indentacion"
        );
    }

    #[test]
    fn test_else_body_not_indented() {
        assert_eq!(
            parse_err(
                "def check_positive(x: int):\n    if x > 0:\n        return True\n    else:\n    return False\n"
            ),
            "<5,5> Error sintactico: falla de indentacion"
        );
    }

    #[test]
    fn test_unexpected_indent() {
        assert_eq!(
            parse_err("x\n    y\n"),
            "<2,5> Error sintactico: falla de indentacion"
        );
    }

    #[test]
    fn test_misspelled_keyword() {
        assert_eq!(
            parse_err("DEF is_even(x: int):\n    return True\n"),
            "<1,5> Error sintactico: se encontro: 'is_even'; se esperaba: 'NEWLINE'."
        );
    }

    #[test]
    fn test_missing_parameter_type() {
        assert_eq!(
            parse_err("def process_data(data: ):\n    pass\n"),
            "<1,24> Error sintactico: se encontro: ')'; se esperaba: 'NAME'."
        );
    }

    #[test]
    fn test_for_without_target() {
        assert_eq!(
            parse_err("def f(numbers: [int]):\n    for in numbers:\n        print(numbers)\n"),
            "<2,9> Error sintactico: se encontro: 'in'; se esperaba: 'NAME'."
        );
    }

    #[test]
    fn test_keyword_is_not_an_expression() {
        assert_eq!(
            parse_err("while:\n    pass\n"),
            "<1,6> Error sintactico: se encontro: ':'; se esperaba: 'expression'."
        );
        assert_eq!(
            parse_err("x = else\n"),
            "<1,3> Error sintactico: se encontro: '='; se esperaba: 'NEWLINE'."
        );
    }

    #[test]
    fn test_deep_unary_chain_is_an_error() {
        let source = format!("{}1\n", "-".repeat(100_000));
        assert_eq!(
            parse_err(&source),
            "<1,101> Error sintactico: anidamiento demasiado profundo"
        );
    }

    #[test]
    fn test_deep_parentheses_are_an_error() {
        let source = format!("{}1{}\n", "(".repeat(5_000), ")".repeat(5_000));
        assert_eq!(
            parse_err(&source),
            "<1,101> Error sintactico: anidamiento demasiado profundo"
        );

        let (result, _) = parse_source(&format!("{}1\n", "not ".repeat(5_000)));
        assert!(matches!(result, Err(SyntaxError::NestingTooDeep { .. })));
    }

    #[test]
    fn test_long_operator_chain_is_an_error() {
        let source = format!("1{}\n", "+1".repeat(150));
        assert_eq!(
            parse_err(&source),
            "<1,201> Error sintactico: anidamiento demasiado profundo"
        );
    }

    #[test]
    fn test_deep_blocks_are_an_error() {
        let source: String = (0..150)
            .map(|level| format!("{}if x:\n", " ".repeat(level)))
            .chain(std::iter::once(format!("{}pass\n", " ".repeat(150))))
            .collect();
        assert_eq!(
            parse_err(&source),
            "<101,101> Error sintactico: anidamiento demasiado profundo"
        );
    }

    #[test]
    fn test_moderate_nesting_parses() {
        let parens = format!("{}x{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(expr(&parens), Expr::identifier("x"));

        let negations = format!("{}x", "-".repeat(50));
        assert!(matches!(expr(&negations), Expr::UnaryOp { .. }));

        let sum = format!("1{}", "+1".repeat(90));
        assert!(matches!(expr(&sum), Expr::BinOp { .. }));
    }

    #[test]
    fn test_depth_resets_between_statements() {
        let line = format!("{}x{}\n", "(".repeat(60), ")".repeat(60));
        let file = parse_ok(&line.repeat(3));
        assert_eq!(file.items().count(), 3);
    }

    #[test]
    fn test_serializes_to_json() {
        let file = parse_ok("def f(x: [int]):\n    return -x\n");
        let json = serde_json::to_value(&file).expect("AST serializes");

        let func = &json["statements"][0];
        assert_eq!(func["stmt"], "function_def");
        assert_eq!(func["name"], "f");
        assert_eq!(func["params"][0]["annotation"]["kind"], "list");
        assert_eq!(func["body"][0]["expression"]["expr"], "unary_op");
        assert_eq!(func["body"][0]["expression"]["operator"], "-");
    }
}
