//! AST - Abstract Syntax Tree for the Culebra language
//!
//! Every node is owned by its parent; there is no sharing and no back
//! references.

use serde::Serialize;
use std::fmt;

/// Complete source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct File {
    pub statements: Vec<Stmt>,
}

impl File {
    /// Statements other than blank lines
    pub fn items(&self) -> impl Iterator<Item = &Stmt> {
        self.statements.iter().filter(|s| !matches!(s, Stmt::Empty))
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stmt", rename_all = "snake_case")]
pub enum Stmt {
    /// `class Name:` followed by an indented block
    ClassDef(ClassDef),

    /// `def name(params):` followed by a suite
    FunctionDef(FunctionDef),

    /// `if cond: ... elif cond: ... else: ...`
    If(IfStmt),

    /// `while cond: ...`
    While(WhileStmt),

    /// `for target in iterable: ...`
    For(ForStmt),

    /// `return [expr]`
    Return(ReturnStmt),

    /// `pass`
    Pass,

    /// A line with nothing on it
    Empty,

    /// Expression as statement
    Expr(Expr),
}

/// An indented sequence of statements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDef {
    pub name: String,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

/// Function parameter, optionally annotated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub annotation: Option<TypeAnnotation>,
}

/// Parameter type annotation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeAnnotation {
    /// `int`
    Named { name: String },
    /// `[int]`, a list of the element type
    List { element: String },
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeAnnotation::Named { name } => write!(f, "{}", name),
            TypeAnnotation::List { element } => write!(f, "[{}]", element),
        }
    }
}

/// `elif` branches are stored as a nested `IfStmt` in `else_branch`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Vec<Stmt>,
    pub else_branch: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStmt {
    pub target: String,
    pub iterable: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStmt {
    pub expression: Option<Expr>,
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expr {
    /// `42`, `True`, `None`
    Literal { value: LiteralValue },

    /// Name reference
    Identifier { name: String },

    /// Binary operation: `a + b`
    BinOp {
        left: Box<Expr>,
        operator: BinaryOperator,
        right: Box<Expr>,
    },

    /// Unary operation: `-x`, `not x`
    UnaryOp {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },

    /// Call of a bare name: `f(a, b)`
    FunctionCall { name: String, args: Vec<Expr> },
}

impl Expr {
    pub fn number(digits: impl Into<String>) -> Self {
        Expr::Literal {
            value: LiteralValue::Number(digits.into()),
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }

    pub fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Self {
        Expr::BinOp {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn unary(operator: UnaryOperator, operand: Expr) -> Self {
        Expr::UnaryOp {
            operator,
            operand: Box::new(operand),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal { value } => write!(f, "{}", value),
            Expr::Identifier { name } => write!(f, "{}", name),
            Expr::BinOp {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expr::UnaryOp { operator, operand } => match operator {
                UnaryOperator::Not => write!(f, "(not {})", operand),
                UnaryOperator::Neg => write!(f, "(-{})", operand),
            },
            Expr::FunctionCall { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Literal value. Numbers keep their source digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LiteralValue {
    Number(String),
    True,
    False,
    None,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(digits) => write!(f, "{}", digits),
            LiteralValue::True => write!(f, "True"),
            LiteralValue::False => write!(f, "False"),
            LiteralValue::None => write!(f, "None"),
        }
    }
}

/// Binary operators, loosest binding first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    #[serde(rename = "or")]
    Or,
    #[serde(rename = "and")]
    And,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    LtE,
    #[serde(rename = ">=")]
    GtE,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "//")]
    FloorDiv,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "**")]
    Pow,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "or",
            BinaryOperator::And => "and",
            BinaryOperator::Eq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Gt => ">",
            BinaryOperator::LtE => "<=",
            BinaryOperator::GtE => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::FloorDiv => "//",
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "**",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    #[serde(rename = "-")]
    Neg,
    #[serde(rename = "not")]
    Not,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Neg => write!(f, "-"),
            UnaryOperator::Not => write!(f, "not"),
        }
    }
}
