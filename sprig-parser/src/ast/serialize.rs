//! The tree's wire format: every node is a map tagged with `"tag"`, using the tag names an
//! evaluator dispatches on (`"+"`, `"identifier"`, `"call"`, ...).

use super::*;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Number::Int(val) => serializer.serialize_i64(val),
            Number::Float(val) => serializer.serialize_f64(val),
        }
    }
}

/// `{"key": ..., "value": ...}` entry of an object literal.
#[derive(Serialize)]
struct Entry<'a> {
    key: &'a str,
    value: &'a Expr,
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Expr::Number(val) => {
                map.serialize_entry("tag", "number")?;
                map.serialize_entry("value", val)?;
            }
            Expr::StringLit(val) => {
                map.serialize_entry("tag", "string")?;
                map.serialize_entry("value", val)?;
            }
            Expr::Identifier(ident) => {
                map.serialize_entry("tag", "identifier")?;
                map.serialize_entry("value", ident)?;
            }
            Expr::Unary { op, arg } => {
                map.serialize_entry("tag", op.tag())?;
                map.serialize_entry("value", arg)?;
            }
            Expr::Binary { lhs, op, rhs } => {
                map.serialize_entry("tag", op.tag())?;
                map.serialize_entry("left", lhs)?;
                map.serialize_entry("right", rhs)?;
            }
            Expr::Index { object, index } => {
                map.serialize_entry("tag", "index")?;
                map.serialize_entry("object", object)?;
                map.serialize_entry("index", index)?;
            }
            Expr::Member { object, property } => {
                map.serialize_entry("tag", "member")?;
                map.serialize_entry("object", object)?;
                map.serialize_entry("property", property)?;
            }
            Expr::Call { callee, args } => {
                map.serialize_entry("tag", "call")?;
                map.serialize_entry("callee", callee)?;
                map.serialize_entry("arguments", args)?;
            }
            Expr::ArrayLit(items) => {
                map.serialize_entry("tag", "array_literal")?;
                map.serialize_entry("items", items)?;
            }
            Expr::ObjectLit(entries) => {
                let entries: Vec<Entry<'_>> = entries
                    .iter()
                    .map(|(key, value)| Entry { key, value })
                    .collect();
                map.serialize_entry("tag", "object_literal")?;
                map.serialize_entry("entries", &entries)?;
            }
            Expr::FunctionLit { params, body } => {
                map.serialize_entry("tag", "function")?;
                map.serialize_entry("parameters", params)?;
                map.serialize_entry("body", body)?;
            }
        }
        map.end()
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("tag", "block")?;
        map.serialize_entry("statements", &self.statements)?;
        map.end()
    }
}

impl Serialize for Stmt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // expression statements are just their expression
            Stmt::Expr(expr) => expr.serialize(serializer),
            Stmt::Assign { target, value } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("tag", "assign")?;
                map.serialize_entry("target", target)?;
                map.serialize_entry("value", value)?;
                map.end()
            }
            Stmt::Print(args) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("tag", "print")?;
                map.serialize_entry("arguments", args)?;
                map.end()
            }
            Stmt::If {
                condition,
                then_block,
                else_block,
            } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("tag", "if")?;
                map.serialize_entry("condition", condition)?;
                map.serialize_entry("then", then_block)?;
                map.serialize_entry("else", else_block)?;
                map.end()
            }
            Stmt::While { condition, body } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("tag", "while")?;
                map.serialize_entry("condition", condition)?;
                map.serialize_entry("do", body)?;
                map.end()
            }
            Stmt::Return(value) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("tag", "return")?;
                map.serialize_entry("value", value)?;
                map.end()
            }
            Stmt::Block(block) => block.serialize(serializer),
        }
    }
}

impl Serialize for Program {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("tag", "program")?;
        map.serialize_entry("statements", &self.statements)?;
        map.end()
    }
}
