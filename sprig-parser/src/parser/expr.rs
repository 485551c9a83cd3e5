use super::*;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    ///
    /// `expression = logical_expr`
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.nested(Self::parse_logical_expr)
    }

    /// `logical_expr = logical_term { "or" logical_term }`
    fn parse_logical_expr(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(&[BinaryOp::Or], Self::parse_logical_term)
    }

    /// `logical_term = logical_factor { "and" logical_factor }`
    fn parse_logical_term(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(&[BinaryOp::And], Self::parse_logical_factor)
    }

    /// `logical_factor = relational_expr`
    fn parse_logical_factor(&mut self) -> ParseResult<Expr> {
        self.parse_relational_expr()
    }

    /// Chained comparisons are not special cased: `x<y>z` is `(x<y)>z`.
    ///
    /// `relational_expr = arith_expr { ("<"|">"|"<="|">="|"=="|"!=") arith_expr }`
    fn parse_relational_expr(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(
            &[
                BinaryOp::Lt,
                BinaryOp::Gt,
                BinaryOp::Le,
                BinaryOp::Ge,
                BinaryOp::Eq,
                BinaryOp::NotEq,
            ],
            Self::parse_arith_expr,
        )
    }

    /// `arith_expr = arith_term { ("+"|"-") arith_term }`
    fn parse_arith_expr(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(&[BinaryOp::Add, BinaryOp::Sub], Self::parse_arith_term)
    }

    /// `arith_term = arith_factor { ("*"|"/") arith_factor }`
    fn parse_arith_term(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(&[BinaryOp::Mul, BinaryOp::Div], Self::parse_arith_factor)
    }

    /// `arith_factor = complex_expr`
    fn parse_arith_factor(&mut self) -> ParseResult<Expr> {
        self.parse_complex_expr()
    }

    /// Parses one left associative precedence level: operands come from `operand` and are
    /// joined by any of `ops`. The accumulated node becomes the left child on every iteration.
    fn parse_binary_level(
        &mut self,
        ops: &[BinaryOp],
        operand: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut lhs = operand(self)?;

        while let Some(op) = BinaryOp::from_token(&self.peek().kind).filter(|op| ops.contains(op)) {
            self.next();
            let rhs = operand(self)?;
            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    /* Expressions.Postfix */
    /// Folds any number of index, member and call suffixes onto a simple expression, left to right.
    ///
    /// `complex_expr = simple_expr { "[" expression "]" | "." identifier | arguments }`
    fn parse_complex_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_simple_expr()?;

        loop {
            expr = match self.peek().kind {
                TokenKind::LBracket => {
                    self.next();
                    let index = self.parse_expr()?;
                    self.expect(TokenKind::RBracket)?;
                    Expr::Index {
                        object: Box::new(expr),
                        index: Box::new(index),
                    }
                }
                TokenKind::Dot => {
                    self.next();
                    let property = self.expect_identifier()?;
                    Expr::Member {
                        object: Box::new(expr),
                        property,
                    }
                }
                TokenKind::LParen => {
                    let args = self.parse_arguments()?;
                    Expr::Call {
                        callee: Box::new(expr),
                        args,
                    }
                }
                _ => break,
            };
        }

        Ok(expr)
    }

    /// Parses a simple (atom) expression.
    /// NOTE: prefix operators are handled here and take a full expression as their operand.
    ///
    /// `simple_expr = number | string | identifier | "(" expression ")" | "not" expression
    /// | "-" expression | function_lit | object_lit | array_lit`
    fn parse_simple_expr(&mut self) -> ParseResult<Expr> {
        match self.peek().kind {
            TokenKind::NumberLit(_) | TokenKind::StringLit(_) | TokenKind::Identifier(_) => {
                self.parse_literal_expr()
            }
            TokenKind::LParen => {
                self.next();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::Not => {
                self.next();
                Ok(Expr::Unary {
                    op: UnaryOp::Not,
                    arg: Box::new(self.parse_expr()?),
                })
            }
            TokenKind::Minus => {
                self.next();
                Ok(Expr::Unary {
                    op: UnaryOp::Negate,
                    arg: Box::new(self.parse_expr()?),
                })
            }
            TokenKind::Function => self.parse_function_lit(),
            TokenKind::LBrace => self.parse_object_lit(),
            TokenKind::LBracket => self.parse_array_lit(),
            _ => self.unexpected(),
        }
    }

    /* Expressions.Literals */
    /// Parses a number, string or identifier.
    fn parse_literal_expr(&mut self) -> ParseResult<Expr> {
        let expr = match &self.peek().kind {
            TokenKind::NumberLit(val) => Expr::Number(*val),
            TokenKind::StringLit(val) => Expr::StringLit(val.clone()),
            TokenKind::Identifier(ident) => Expr::Identifier(ident.clone()),
            _ => return self.unexpected(),
        };
        self.next(); // eat parsed token
        Ok(expr)
    }

    /// `function_lit = "function" parameters block`
    fn parse_function_lit(&mut self) -> ParseResult<Expr> {
        self.expect(TokenKind::Function)?;
        let params = self.parse_parameters()?;
        let body = self.parse_block()?;
        Ok(Expr::FunctionLit { params, body })
    }

    /// `parameters = "(" [ identifier { "," identifier } ] ")"`
    fn parse_parameters(&mut self) -> ParseResult<Vec<String>> {
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            params.push(self.expect_identifier()?);
            while self.eat(TokenKind::Comma) {
                params.push(self.expect_identifier()?);
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(params)
    }

    /// Shared by calls and `print`.
    ///
    /// `arguments = "(" [ expression { "," expression } ] ")"`
    pub(super) fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        self.expect(TokenKind::LParen)?;
        self.parse_expr_list(TokenKind::RParen)
    }

    /// `array_lit = "[" [ expression { "," expression } ] "]"`
    fn parse_array_lit(&mut self) -> ParseResult<Expr> {
        self.expect(TokenKind::LBracket)?;
        Ok(Expr::ArrayLit(self.parse_expr_list(TokenKind::RBracket)?))
    }

    /// Parses comma separated expressions up to and including `close`.
    fn parse_expr_list(&mut self, close: TokenKind) -> ParseResult<Vec<Expr>> {
        let mut items = Vec::new();
        if !self.check(&close) {
            items.push(self.parse_expr()?);
            while self.eat(TokenKind::Comma) {
                items.push(self.parse_expr()?);
            }
        }
        self.expect(close)?;
        Ok(items)
    }

    /// Only reached in expression position. At statement position `{` always starts a block.
    ///
    /// `object_lit = "{" [ key ":" expression { "," key ":" expression } ] "}"`
    fn parse_object_lit(&mut self) -> ParseResult<Expr> {
        self.expect(TokenKind::LBrace)?;
        let mut entries = Vec::new();
        if !self.check(&TokenKind::RBrace) {
            entries.push(self.parse_object_entry()?);
            while self.eat(TokenKind::Comma) {
                entries.push(self.parse_object_entry()?);
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Expr::ObjectLit(entries))
    }

    /// `key ":" expression` where `key = string | identifier`
    fn parse_object_entry(&mut self) -> ParseResult<(String, Expr)> {
        let key = match &self.peek().kind {
            TokenKind::StringLit(key) | TokenKind::Identifier(key) => key.clone(),
            _ => return Err(self.expected("string or identifier")),
        };
        self.next();
        self.expect(TokenKind::Colon)?;
        Ok((key, self.parse_expr()?))
    }
}
