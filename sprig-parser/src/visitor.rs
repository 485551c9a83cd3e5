//! Visitor pattern for AST nodes.

use crate::ast::{Block, Expr, Program, Stmt};

pub trait Visitor<'ast>: Sized {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }
    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }
}

pub fn walk_expr<'ast>(visitor: &mut impl Visitor<'ast>, expr: &'ast Expr) {
    match expr {
        Expr::Number(_) => {}
        Expr::StringLit(_) => {}
        Expr::Identifier(_) => {}
        Expr::Unary { op: _, arg } => visitor.visit_expr(arg),
        Expr::Binary { lhs, op: _, rhs } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        Expr::Index { object, index } => {
            visitor.visit_expr(object);
            visitor.visit_expr(index);
        }
        Expr::Member {
            object,
            property: _,
        } => visitor.visit_expr(object),
        Expr::Call { callee, args } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::ArrayLit(items) => {
            for item in items {
                visitor.visit_expr(item);
            }
        }
        Expr::ObjectLit(entries) => {
            for (_key, value) in entries {
                visitor.visit_expr(value);
            }
        }
        Expr::FunctionLit { params: _, body } => visitor.visit_block(body),
    }
}

pub fn walk_stmt<'ast>(visitor: &mut impl Visitor<'ast>, stmt: &'ast Stmt) {
    match stmt {
        Stmt::Expr(expr) => visitor.visit_expr(expr),
        Stmt::Assign { target, value } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        Stmt::Print(args) => {
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Stmt::If {
            condition,
            then_block,
            else_block,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_block(then_block);
            if let Some(else_block) = else_block {
                visitor.visit_block(else_block);
            }
        }
        Stmt::While { condition, body } => {
            visitor.visit_expr(condition);
            visitor.visit_block(body);
        }
        Stmt::Return(Some(value)) => visitor.visit_expr(value),
        Stmt::Return(None) => {}
        Stmt::Block(block) => visitor.visit_block(block),
    }
}

pub fn walk_block<'ast>(visitor: &mut impl Visitor<'ast>, block: &'ast Block) {
    for stmt in &block.statements {
        visitor.visit_stmt(stmt);
    }
}

/// Visits every top level statement of `program`.
pub fn walk_program<'ast>(visitor: &mut impl Visitor<'ast>, program: &'ast Program) {
    for stmt in &program.statements {
        visitor.visit_stmt(stmt);
    }
}
