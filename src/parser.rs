use log::debug;

use crate::prelude::*;

/// A syntax error at `token`.
///
/// Returned through the productions up to the enclosing declaration, which
/// records it and resynchronizes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("[line {}] Error {}: {message}", .token.line, .token.location())]
pub struct ParserError {
    pub token: Token,
    pub message: String,
}

type ParseResult<T> = Result<T, ParserError>;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    errors: Vec<ParserError>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.token_type) != Some(TokenType::EOF) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::new(TokenType::EOF, "", None, line));
        }

        Self { tokens, current: 0, errors: vec![] }
    }

    /// Parse a whole program.
    ///
    /// Statements that failed to parse are left out of the result and their
    /// errors are returned alongside, in source order.
    pub fn parse(&mut self) -> (Vec<Stmt>, Vec<ParserError>) {
        let mut statements = vec![];
        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        debug!("parsed {} statements with {} errors", statements.len(), self.errors.len());
        (statements, std::mem::take(&mut self.errors))
    }

    fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.match_tt(&[TokenType::Var]) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(e) => {
                self.errors.push(e);
                self.synchronize();
                None
            }
        }
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenType::Identifier, "Expected variable name.")?;

        let initializer =
            if self.match_tt(&[TokenType::Equal]) { Some(self.expression()?) } else { None };

        self.consume(TokenType::Semicolon, "Expected ';' after variable declaration.")?;

        Ok(Stmt::Var { name, initializer })
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        if self.match_tt(&[TokenType::If]) {
            self.if_statement()
        } else if self.match_tt(&[TokenType::While]) {
            self.while_statement()
        } else if self.match_tt(&[TokenType::For]) {
            self.for_statement()
        } else if self.match_tt(&[TokenType::Print]) {
            self.print_statement()
        } else if self.match_tt(&[TokenType::LeftBrace]) {
            Ok(Stmt::Block { statements: self.block()? })
        } else {
            self.expression_statement()
        }
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenType::LeftParen, "Expected '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenType::RightParen, "Expected ')' after if condition.")?;

        // A dangling 'else' belongs to the nearest 'if'
        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.match_tt(&[TokenType::Else]) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If { condition, then_branch, else_branch })
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenType::LeftParen, "Expected '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(TokenType::RightParen, "Expected ')' after while loop condition.")?;

        let body = Box::new(self.statement()?);
        Ok(Stmt::While { condition, body })
    }

    /// `for` has no node of its own, it is rebuilt from blocks and a `while`.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenType::LeftParen, "Expected '(' after 'for'.")?;

        let initializer = if self.match_tt(&[TokenType::Semicolon]) {
            None
        } else if self.match_tt(&[TokenType::Var]) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(TokenType::Semicolon) {
            self.expression()?
        } else {
            Expr::bool_literal(true)
        };
        self.consume(TokenType::Semicolon, "Expected ';' after for loop condition.")?;

        let increment =
            if !self.check(TokenType::RightParen) { Some(self.expression()?) } else { None };
        self.consume(TokenType::RightParen, "Expected ')' after for loop clause.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block { statements: vec![body, Stmt::Expression { expr: increment }] };
        }

        body = Stmt::While { condition, body: Box::new(body) };

        if let Some(initializer) = initializer {
            body = Stmt::Block { statements: vec![initializer, body] };
        }

        Ok(body)
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenType::Semicolon, "Expected ';' after value.")?;
        Ok(Stmt::Print { expr })
    }

    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = vec![];

        while !self.check(TokenType::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(TokenType::RightBrace, "Expected '}' to close block.")?;
        Ok(statements)
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenType::Semicolon, "Expected ';' after value.")?;
        Ok(Stmt::Expression { expr })
    }

    fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.or()?;

        if self.match_tt(&[TokenType::Equal]) {
            let equals = self.previous();
            let value = self.assignment()?;
            if let Expr::Variable { name } = expr {
                return Ok(Expr::Assignment { name, value: Box::new(value) });
            }

            // Reported, but the parser is not confused, so keep going
            let e = self.error(equals, "Invalid assignment target.");
            self.errors.push(e);
        }

        Ok(expr)
    }

    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;

        while self.match_tt(&[TokenType::Or]) {
            let operator = self.previous();
            let right = self.and()?;
            expr = Expr::Logical { left: Box::new(expr), operator, right: Box::new(right) };
        }

        Ok(expr)
    }

    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;

        while self.match_tt(&[TokenType::And]) {
            let operator = self.previous();
            let right = self.equality()?;
            expr = Expr::Logical { left: Box::new(expr), operator, right: Box::new(right) };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;

        while self.match_tt(&[TokenType::BangEqual, TokenType::EqualEqual]) {
            let operator = self.previous();
            let right = self.comparison()?;
            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;

        while self.match_tt(&[
            TokenType::GreaterEqual,
            TokenType::Greater,
            TokenType::LessEqual,
            TokenType::Less,
        ]) {
            let operator = self.previous();
            let right = self.term()?;
            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }
        Ok(expr)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;

        while self.match_tt(&[TokenType::Minus, TokenType::Plus]) {
            let operator = self.previous();
            let right = self.factor()?;
            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }
        Ok(expr)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;

        while self.match_tt(&[TokenType::Slash, TokenType::Star]) {
            let operator = self.previous();
            let right = self.unary()?;
            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }
        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if self.match_tt(&[TokenType::Bang, TokenType::Minus]) {
            let operator = self.previous();
            let right = self.unary()?;
            return Ok(Expr::Unary { operator, right: Box::new(right) });
        }

        self.primary()
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if self.match_tt(&[TokenType::False]) {
            return Ok(Expr::bool_literal(false));
        }
        if self.match_tt(&[TokenType::True]) {
            return Ok(Expr::bool_literal(true));
        }
        if self.match_tt(&[TokenType::Nil]) {
            return Ok(Expr::Literal { value: Object::Null });
        }
        if self.match_tt(&[TokenType::Number, TokenType::StringLiteral]) {
            let value = self.previous().literal.unwrap_or(Object::Null);
            return Ok(Expr::Literal { value });
        }
        if self.match_tt(&[TokenType::Identifier]) {
            return Ok(Expr::Variable { name: self.previous() });
        }
        if self.match_tt(&[TokenType::LeftParen]) {
            let expr = self.expression()?;
            self.consume(TokenType::RightParen, "Expected ')' after expression.")?;
            return Ok(Expr::Grouping { expr: Box::new(expr) });
        }

        Err(self.error(self.peek().clone(), "Expected expression."))
    }

    /// Return the next token if its `token_type` matches the given type as input.
    /// Otherwise, return an error carrying the given message.
    fn consume(&mut self, token_type: TokenType, message: &str) -> ParseResult<Token> {
        if self.check(token_type) {
            return Ok(self.advance());
        }

        Err(self.error(self.peek().clone(), message))
    }

    fn error(&self, token: Token, message: &str) -> ParserError {
        ParserError { token, message: message.to_owned() }
    }

    fn match_tt(&mut self, types: &[TokenType]) -> bool {
        for &tt in types {
            if self.check(tt) {
                self.advance();
                return true;
            }
        }

        false
    }

    /// Check to see if the next token's type matches the given `token_type`.
    fn check(&self, token_type: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().token_type == token_type
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::EOF
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> Token {
        self.tokens[self.current.saturating_sub(1)].clone()
    }

    /// Discard tokens until the start of the next statement.
    ///
    /// The offending token is always skipped first, even when it could
    /// itself begin a statement.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().token_type == TokenType::Semicolon {
                return;
            }

            match self.peek().token_type {
                TokenType::Class
                | TokenType::Fun
                | TokenType::Var
                | TokenType::For
                | TokenType::If
                | TokenType::While
                | TokenType::Print
                | TokenType::Return => return,
                _ => {}
            }

            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (Vec<Stmt>, Vec<ParserError>) {
        let (tokens, errors) = Scanner::new(source).scan_tokens();
        assert!(errors.is_empty(), "scanner errors: {errors:?}");
        Parser::new(tokens).parse()
    }

    fn parse_ok(source: &str) -> Vec<String> {
        let (statements, errors) = parse(source);
        assert!(errors.is_empty(), "parser errors: {errors:?}");
        statements.iter().map(AstPrinter::stmt_to_string).collect()
    }

    fn messages(errors: &[ParserError]) -> Vec<String> {
        errors.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn factor_binds_tighter_than_term() {
        let (statements, _) = parse("1 + 2 * 3;");
        let Stmt::Expression { expr: Expr::Binary { operator, right, .. } } = &statements[0] else {
            panic!("expected a binary expression, got {statements:?}");
        };
        assert_eq!(operator.token_type, TokenType::Plus);
        assert!(matches!(right.as_ref(), Expr::Binary { operator, .. } if operator.lexeme == "*"));
    }

    #[test]
    fn precedence_ladder() {
        assert_eq!(
            parse_ok("a = b or c and !d == e < f + g * -h;"),
            vec!["(; (= a (or b (and c (== (! d) (< e (+ f (* g (- h)))))))))"]
        );
    }

    #[test]
    fn binary_operators_are_left_associative() {
        assert_eq!(parse_ok("10 - 2 - 3;"), vec!["(; (- (- 10 2) 3))"]);
        assert_eq!(parse_ok("a or b or c;"), vec!["(; (or (or a b) c))"]);
        assert_eq!(parse_ok("a and b and c;"), vec!["(; (and (and a b) c))"]);
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_eq!(parse_ok("a = b = 1;"), vec!["(; (= a (= b 1)))"]);
    }

    #[test]
    fn grouping_overrides_precedence() {
        assert_eq!(parse_ok("(1 + 2) * 3;"), vec!["(; (* (group (+ 1 2)) 3))"]);
    }

    #[test]
    fn declarations_and_blocks() {
        assert_eq!(
            parse_ok("var a; var b = \"x\"; { print a; }"),
            vec!["(var a)", "(var b \"x\")", "(block (print a))"]
        );
    }

    #[test]
    fn else_binds_to_nearest_if() {
        assert_eq!(
            parse_ok("if (a) if (b) print 1; else print 2;"),
            vec!["(if a (if b (print 1) (print 2)))"]
        );
    }

    #[test]
    fn for_desugars_to_while() {
        assert_eq!(
            parse_ok("for (var i = 0; i < 3; i = i + 1) print i;"),
            vec!["(block (var i 0) (while (< i 3) (block (print i) (; (= i (+ i 1))))))"]
        );
    }

    #[test]
    fn for_with_omitted_clauses() {
        assert_eq!(parse_ok("for (;;) print 1;"), vec!["(while true (print 1))"]);
        assert_eq!(parse_ok("for (x = 0; x < 1;) x = 1;"), vec![
            "(block (; (= x 0)) (while (< x 1) (; (= x 1))))"
        ]);
    }

    #[test]
    fn missing_semicolon_at_end() {
        let (_, errors) = parse("print 1");
        assert_eq!(messages(&errors), vec!["[line 1] Error at end: Expected ';' after value."]);
    }

    #[test]
    fn invalid_assignment_target_keeps_parsing() {
        let (statements, errors) = parse("a + b = c; print 1;");
        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at '=': Invalid assignment target."]
        );
        let printed: Vec<_> = statements.iter().map(AstPrinter::stmt_to_string).collect();
        assert_eq!(printed, vec!["(; (+ a b))", "(print 1)"]);
    }

    #[test]
    fn recovers_after_bad_declaration() {
        let (statements, errors) = parse("var x = ; var y = 1; print y;");
        assert_eq!(messages(&errors), vec!["[line 1] Error at ';': Expected expression."]);
        let printed: Vec<_> = statements.iter().map(AstPrinter::stmt_to_string).collect();
        assert_eq!(printed, vec!["(var y 1)", "(print y)"]);
    }

    #[test]
    fn collects_independent_errors() {
        let (statements, errors) = parse("print ;\nvar = 2;\nprint 3;\n{ print ; }");
        assert_eq!(
            messages(&errors),
            vec![
                "[line 1] Error at ';': Expected expression.",
                "[line 2] Error at '=': Expected variable name.",
                "[line 4] Error at ';': Expected expression.",
            ]
        );
        let printed: Vec<_> = statements.iter().map(AstPrinter::stmt_to_string).collect();
        assert_eq!(printed, vec!["(print 3)", "(block)"]);
    }

    #[test]
    fn synchronize_skips_the_offending_token() {
        // The error is reported at 'var', which is then discarded along with
        // the rest of its declaration.
        let (statements, errors) = parse("print (1 + 2 var y = 4; print y;");
        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at 'var': Expected ')' after expression."]
        );
        let printed: Vec<_> = statements.iter().map(AstPrinter::stmt_to_string).collect();
        assert_eq!(printed, vec!["(print y)"]);
    }

    #[test]
    fn unclosed_block() {
        let (_, errors) = parse("{ print 1;");
        assert_eq!(messages(&errors), vec!["[line 1] Error at end: Expected '}' to close block."]);
    }

    #[test]
    fn empty_token_list_is_an_empty_program() {
        let (statements, errors) = Parser::new(vec![]).parse();
        assert!(statements.is_empty());
        assert!(errors.is_empty());
    }
}
