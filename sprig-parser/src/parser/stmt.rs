use super::*;

impl<'a> Parser<'a> {
    /// Parses a statement. Keyword led forms are dispatched on the current token; anything
    /// else is an assignment or a bare expression.
    ///
    /// `statement = block | if_stmt | while_stmt | print_stmt | function_stmt | return_stmt
    /// | assignment_stmt`
    pub fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        match self.peek().kind {
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Print => self.parse_print_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            // `function (` is a function literal used as an expression statement
            TokenKind::Function if matches!(self.peek_second().kind, TokenKind::Identifier(_)) => {
                self.parse_function_stmt()
            }
            _ => self.parse_assignment_stmt(),
        }
    }

    /// `block = "{" [ statement { ";" statement } ] "}"`
    pub fn parse_block(&mut self) -> ParseResult<Block> {
        self.nested(Self::parse_block_body)
    }

    fn parse_block_body(&mut self) -> ParseResult<Block> {
        self.expect(TokenKind::LBrace)?;

        let mut statements = Vec::new();
        if !self.check(&TokenKind::RBrace) {
            statements.push(self.parse_stmt()?);
            while self.eat(TokenKind::Semicolon) {
                statements.push(self.parse_stmt()?);
            }
        }
        self.expect(TokenKind::RBrace)?;

        Ok(Block { statements })
    }

    /// `assignment_stmt = expression [ "=" expression ]`
    fn parse_assignment_stmt(&mut self) -> ParseResult<Stmt> {
        let target = self.parse_expr()?;
        if self.eat(TokenKind::Assign) {
            let value = self.parse_expr()?;
            Ok(Stmt::Assign { target, value })
        } else {
            Ok(Stmt::Expr(target))
        }
    }

    /// Sugar for `identifier = function parameters block`. The leading tokens are rewritten
    /// into that form and the assignment parser takes over, so anything following the block
    /// continues the assigned expression exactly as it would after the desugared spelling.
    ///
    /// `function_stmt = "function" identifier parameters block`
    fn parse_function_stmt(&mut self) -> ParseResult<Stmt> {
        let function = self.expect(TokenKind::Function)?;
        let ident_span = self.peek().span.clone();
        let ident = self.expect_identifier()?;
        log::trace!("rewriting `function {}` into an assignment", ident);

        // pushed in reverse: `ident` `=` `function`
        let assign_span = ident_span.end..ident_span.end;
        self.push_back(function);
        self.push_back(Token::new(TokenKind::Assign, assign_span));
        self.push_back(Token::new(TokenKind::Identifier(ident), ident_span));

        self.parse_assignment_stmt()
    }

    /// `print_stmt = "print" arguments`
    fn parse_print_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::Print)?;
        Ok(Stmt::Print(self.parse_arguments()?))
    }

    /// `if_stmt = "if" "(" expression ")" block [ "else" block ]`
    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        let then_block = self.parse_block()?;
        let else_block = if self.eat(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_block,
            else_block,
        })
    }

    /// `while_stmt = "while" "(" expression ")" block`
    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::While { condition, body })
    }

    /// `return_stmt = "return" [ expression ]`
    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::Return)?;
        match self.peek().kind {
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::EndOfInput => Ok(Stmt::Return(None)),
            _ => Ok(Stmt::Return(Some(self.parse_expr()?))),
        }
    }
}
