//! S-expression rendering of the syntax tree, e.g. `(+ 2 (* 3 4))`.

use super::*;
use std::fmt::{self, Display, Formatter};

/// Writes `(head item item ...)`.
fn list<T: Display>(f: &mut Formatter<'_>, head: &str, items: &[T]) -> fmt::Result {
    write!(f, "({}", head)?;
    for item in items {
        write!(f, " {}", item)?;
    }
    f.write_str(")")
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOp::Negate => "neg",
            UnaryOp::Not => "not",
        })
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(val) => write!(f, "{}", val),
            Expr::StringLit(val) => write!(f, "{:?}", val),
            Expr::Identifier(ident) => f.write_str(ident),
            Expr::Unary { op, arg } => write!(f, "({} {})", op, arg),
            Expr::Binary { lhs, op, rhs } => write!(f, "({} {} {})", op, lhs, rhs),
            Expr::Index { object, index } => write!(f, "(index {} {})", object, index),
            Expr::Member { object, property } => write!(f, "(. {} {})", object, property),
            Expr::Call { callee, args } => list(f, &format!("call {}", callee), args),
            Expr::ArrayLit(items) => list(f, "array", items),
            Expr::ObjectLit(entries) => {
                f.write_str("(object")?;
                for (key, value) in entries {
                    write!(f, " ({:?} {})", key, value)?;
                }
                f.write_str(")")
            }
            Expr::FunctionLit { params, body } => {
                write!(f, "(function ({}) {})", params.join(" "), body)
            }
        }
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        list(f, "block", &self.statements)
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expr(expr) => write!(f, "{}", expr),
            Stmt::Assign { target, value } => write!(f, "(= {} {})", target, value),
            Stmt::Print(args) => list(f, "print", args),
            Stmt::If {
                condition,
                then_block,
                else_block: Some(else_block),
            } => write!(f, "(if {} {} {})", condition, then_block, else_block),
            Stmt::If {
                condition,
                then_block,
                else_block: None,
            } => write!(f, "(if {} {})", condition, then_block),
            Stmt::While { condition, body } => write!(f, "(while {} {})", condition, body),
            Stmt::Return(Some(value)) => write!(f, "(return {})", value),
            Stmt::Return(None) => f.write_str("(return)"),
            Stmt::Block(block) => write!(f, "{}", block),
        }
    }
}

/// One statement per line.
impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
