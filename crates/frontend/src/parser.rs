use std::collections::VecDeque;

mod block_parser;
mod errors_parser;
mod fn_parser;

pub use crate::ast::{ASTNode, Expression, FunctionTable, Instruction};
pub use crate::lexer::{Token, TokenKind};
pub use self::errors_parser::ParserError;

use tools::errors::{CodeErr, ReportCodeErr};


pub struct Parser {
    tokens: VecDeque<Token>,
    // Returned by `at` once every token has been consumed
    eof: Token,
    // Number of blocks we are currently in, functions can only be declared at 0
    depth: usize,
    // Line of the last consumed token, errors are reported on it
    last_line: u64,
    functions: FunctionTable,
    pub ast_nodes: Vec<ASTNode>,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            tokens: VecDeque::new(),
            eof: Token::new_eof(0),
            depth: 0,
            last_line: 0,
            functions: FunctionTable::new(),
            ast_nodes: Vec::new(),
        }
    }
}

impl Parser {
    // Declared functions are kept between two calls, so a REPL can call a
    // function declared on a previous line
    pub fn build_ast(&mut self, tokens: VecDeque<Token>) -> Result<(), CodeErr> {
        self.ast_nodes.clear();
        self.depth = 0;
        self.last_line = 0;
        self.eof = tokens
            .back()
            .cloned()
            .unwrap_or_else(|| Token::new_eof(0));
        self.tokens = tokens;

        while !self.is_eof() {
            let line = self.at().line;
            let stmt = self
                .parse_statement()
                .map_err(|e| e.to_glob_err(self.last_line))?;

            if let Some(s) = stmt {
                self.ast_nodes.push(ASTNode::new(s, line));
            }
        }

        Ok(())
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    // Entry point of parsing. Function declarations don't produce any
    // instruction, they only fill the function table
    fn parse_statement(&mut self) -> Result<Option<Instruction>, ParserError> {
        let stmt = match self.at().kind {
            // New lines are only used at end of statement
            TokenKind::EndLine => {
                self.eat()?;
                return Ok(None);
            }
            TokenKind::Fn => {
                if self.depth > 0 {
                    return Err(ParserError::NestedFnDeclaration);
                }
                self.parse_fn_declaration()?;
                None
            }
            TokenKind::Print => {
                self.eat()?;
                Some(Instruction::output(self.parse_expression()?))
            }
            TokenKind::If => Some(self.parse_if()?),
            TokenKind::While => Some(self.parse_while()?),
            TokenKind::OpenBrace => {
                self.eat()?;
                Some(Instruction::from(self.parse_block()?))
            }
            TokenKind::Return => return Err(ParserError::ReturnOutsideFn),
            TokenKind::Identifier => Some(self.parse_assignment()?),
            _ => return Err(ParserError::UnrecognizedToken(self.at().clone())),
        };

        self.expect_end_of_statement()?;

        Ok(stmt)
    }

    // x = expr, x += expr, x -= expr
    fn parse_assignment(&mut self) -> Result<Instruction, ParserError> {
        let target = self.expect_token(TokenKind::Identifier)?;

        match self.at().kind {
            TokenKind::Equals => {
                self.eat()?;
                let value = self.parse_expression()?;

                Ok(Instruction::assign(target.value, value))
            }
            // We add a layer of operation to put the identifier in the expression
            TokenKind::CompoundAssign => {
                let ope = self.eat()?;
                let right = self.parse_expression()?;
                let right = match ope.value.as_str() {
                    "-" => Expression::negate(right),
                    _ => right,
                };
                let value = Expression::add(Expression::identifier(target.value.clone()), right);

                Ok(Instruction::assign(target.value, value))
            }
            _ => Err(ParserError::ExpressionAsStatement(target.value)),
        }
    }

    fn parse_expression(&mut self) -> Result<Expression, ParserError> {
        self.parse_or_expr()
    }

    fn parse_or_expr(&mut self) -> Result<Expression, ParserError> {
        let mut left = self.parse_equality_expr()?;

        while self.at().kind == TokenKind::Or {
            self.eat()?;
            let right = self.parse_equality_expr()?;

            left = Expression::or(left, right);
        }

        Ok(left)
    }

    fn parse_equality_expr(&mut self) -> Result<Expression, ParserError> {
        let mut left = self.parse_additive_expr()?;

        while self.at().kind == TokenKind::EqualEqual {
            self.eat()?;
            let right = self.parse_additive_expr()?;

            left = Expression::equal(left, right);
        }

        Ok(left)
    }

    // There is no subtraction node: a - b is a + (-b)
    fn parse_additive_expr(&mut self) -> Result<Expression, ParserError> {
        let mut left = self.parse_unary_expr()?;

        while self.at().kind == TokenKind::BinaryOperator {
            let operator = self.eat()?.value;
            let right = self.parse_unary_expr()?;

            left = match operator.as_str() {
                "-" => Expression::add(left, Expression::negate(right)),
                _ => Expression::add(left, right),
            };
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> Result<Expression, ParserError> {
        if self.at().kind == TokenKind::BinaryOperator && self.at().value == "-" {
            self.eat()?;
            return Ok(Expression::negate(self.parse_unary_expr()?));
        }

        self.parse_primary_expr()
    }

    fn parse_primary_expr(&mut self) -> Result<Expression, ParserError> {
        match self.at().kind {
            TokenKind::Number => self.parse_literal_number_expr(),
            TokenKind::Identifier => {
                if self.peek_kind(1) == Some(&TokenKind::OpenParen) {
                    self.parse_function_call()
                } else {
                    Ok(Expression::identifier(self.eat()?.value))
                }
            }
            // Manages the beginning of paranthesis x = 5 + (...
            TokenKind::OpenParen => {
                self.eat()?;
                let expr = self.parse_expression()?;
                self.expect_token(TokenKind::CloseParen)?;

                Ok(expr)
            }
            TokenKind::BinaryOperator => {
                Err(ParserError::WrongInLineOperator(self.at().value.clone()))
            }
            _ => Err(ParserError::UnrecognizedToken(self.at().clone())),
        }
    }

    fn parse_literal_number_expr(&mut self) -> Result<Expression, ParserError> {
        let number = self.eat()?;

        number
            .value
            .parse::<i32>()
            .map(Expression::literal)
            .map_err(|_| ParserError::InvalidNumber(number.value))
    }

    fn at(&self) -> &Token {
        self.tokens.front().unwrap_or(&self.eof)
    }

    fn peek_kind(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(offset).map(|tk| &tk.kind)
    }

    // Kind of the first token that isn't a new line
    fn next_significant_kind(&self) -> &TokenKind {
        self.tokens
            .iter()
            .find(|tk| tk.kind != TokenKind::EndLine)
            .map(|tk| &tk.kind)
            .unwrap_or(&self.eof.kind)
    }

    fn eat(&mut self) -> Result<Token, ParserError> {
        match self.tokens.pop_front() {
            Some(tk) => {
                self.last_line = tk.line;
                Ok(tk)
            }
            None => Err(ParserError::EmptyTokenBufferUsed),
        }
    }

    fn expect_token(&mut self, token_kind: TokenKind) -> Result<Token, ParserError> {
        let tk = self.eat()?;

        if tk.kind != token_kind {
            return Err(ParserError::FoundWrongToken(token_kind, tk.kind));
        }

        Ok(tk)
    }

    // A statement ends with a new line, or with the brace closing its block
    fn expect_end_of_statement(&self) -> Result<(), ParserError> {
        match self.at().kind {
            TokenKind::EndLine | TokenKind::CloseBrace | TokenKind::EOF => Ok(()),
            _ => Err(ParserError::ExpectedEndOfStatement(self.at().value.clone())),
        }
    }

    fn is_eof(&self) -> bool {
        self.at().kind == TokenKind::EOF
    }

    fn skip_end_lines(&mut self) {
        while self.at().kind == TokenKind::EndLine {
            let _ = self.eat();
        }
    }
}
