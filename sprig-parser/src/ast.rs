use crate::lexer::TokenKind;

mod display;
mod serialize;

pub use crate::lexer::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-expr`
    Negate,
    /// `not expr` or `!expr`
    Not,
}

impl UnaryOp {
    /// The tag an evaluator dispatches on.
    pub fn tag(self) -> &'static str {
        match self {
            UnaryOp::Negate => "negate",
            UnaryOp::Not => "not",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    NotEq,
    And,
    Or,
}

impl BinaryOp {
    /// Returns the binary operator spelled by `kind` or `None` if `kind` is not a binary operator.
    /// Which precedence level may consume it is decided by the parser.
    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::Le => BinaryOp::Le,
            TokenKind::Ge => BinaryOp::Ge,
            TokenKind::Eq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::And => BinaryOp::And,
            TokenKind::Or => BinaryOp::Or,
            _ => return None,
        })
    }

    /// The tag an evaluator dispatches on.
    pub fn tag(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Number),
    StringLit(String),
    /// An identifier (e.g. `foo`).
    Identifier(String),
    /// A prefix expression (e.g. `-x`). The operand is a full expression.
    Unary { op: UnaryOp, arg: Box<Expr> },
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },
    /// `object[index]`
    Index { object: Box<Expr>, index: Box<Expr> },
    /// `object.property`
    Member { object: Box<Expr>, property: String },
    /// `callee(args...)`
    Call { callee: Box<Expr>, args: Vec<Expr> },
    ArrayLit(Vec<Expr>),
    /// Entries keep their source order. Duplicate keys are kept as written.
    ObjectLit(Vec<(String, Expr)>),
    FunctionLit { params: Vec<String>, body: Block },
}

/// A brace delimited statement list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A bare expression used as a statement.
    Expr(Expr),
    /// `target = value`. The target is not checked for assignability.
    Assign { target: Expr, value: Expr },
    Print(Vec<Expr>),
    If {
        condition: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    While { condition: Expr, body: Block },
    Return(Option<Expr>),
    Block(Block),
}

/// Root of the syntax tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}
