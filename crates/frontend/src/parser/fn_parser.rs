use std::collections::HashSet;

use crate::ast::{BlockBuilder, Function, Identifier, ParameterList};

use super::errors_parser::ParserError;
use super::Parser;
use super::{Expression, Instruction, TokenKind};

impl Parser {
    // Function declaration. The syntax is:
    // fn add(x, y) {
    //    z = x + y
    //
    //    return z + z
    // }
    // The return is optional, a function without one returns 0.
    // A function can call itself and the functions declared before it.
    pub(super) fn parse_fn_declaration(&mut self) -> Result<(), ParserError> {
        self.expect_token(TokenKind::Fn)?;

        let identifier = self
            .expect_token(TokenKind::Identifier)
            .map_err(|_| ParserError::MissingIdentifierAfterFn)?;

        self.expect_token(TokenKind::OpenParen)
            .map_err(|_| ParserError::MissingFnOpenParen)?;

        let params = self.parse_fn_decl_params(&identifier.value)?;

        self.expect_token(TokenKind::CloseParen)
            .map_err(|_| ParserError::MissingFnCloseParen)?;

        self.expect_token(TokenKind::OpenBrace)
            .map_err(|_| ParserError::MissingFnOpenBrace)?;

        // The signature is registered before the body so that recursive calls
        // resolve
        let handle = self
            .functions
            .declare(&identifier.value, params.len())
            .ok_or_else(|| ParserError::FunctionAlreadyDeclared(identifier.value.clone()))?;

        let (body, return_expr) = match self.parse_fn_definition() {
            Ok(parts) => parts,
            Err(e) => {
                // Lets a later REPL line declare it again
                self.functions.remove(&identifier.value);
                return Err(e);
            }
        };

        let function = Function::new(
            identifier.value,
            params,
            body,
            return_expr.unwrap_or(Expression::literal(0)),
        );

        tracing::debug!(name = function.name(), arity = function.arity(), "function declared");

        handle
            .bind(function)
            .map_err(|f| ParserError::FunctionAlreadyDeclared(f.name().to_string()))
    }

    // Body then closing brace, the opening one is already consumed
    fn parse_fn_definition(&mut self) -> Result<(Instruction, Option<Expression>), ParserError> {
        self.depth += 1;
        let (body, return_expr) = self.parse_fn_body()?;
        self.depth -= 1;

        self.expect_token(TokenKind::CloseBrace)
            .map_err(|_| ParserError::MissingFnCloseBrace)?;

        Ok((body, return_expr))
    }

    fn parse_fn_body(&mut self) -> Result<(Instruction, Option<Expression>), ParserError> {
        let mut body = BlockBuilder::new();
        let mut return_expr: Option<Expression> = None;

        while self.at().kind != TokenKind::CloseBrace {
            if self.is_eof() {
                return Err(ParserError::MissingFnCloseBrace);
            }

            // We check if this is the return statement to end declaration
            if self.at().kind == TokenKind::Return {
                self.eat()?;
                return_expr = Some(self.parse_expression()?);

                // The closing brace could be on the line after
                self.skip_end_lines();

                if self.at().kind != TokenKind::CloseBrace {
                    return Err(ParserError::StmtAfterReturn);
                }
            } else if let Some(stmt) = self.parse_statement()? {
                body.push(stmt);
            }
        }

        Ok((Instruction::from(body.build()), return_expr))
    }

    // Parse the parameters in prototype like: (x, y, z)
    fn parse_fn_decl_params(&mut self, fn_name: &str) -> Result<ParameterList, ParserError> {
        let mut params: Vec<Identifier> = vec![];
        let mut seen: HashSet<String> = HashSet::new();

        while self.at().kind != TokenKind::CloseParen {
            let param = self.eat()?;

            if param.kind != TokenKind::Identifier {
                return Err(ParserError::ParamNotIdentifier(param.value));
            }

            if !seen.insert(param.value.clone()) {
                return Err(ParserError::DuplicateParam(fn_name.to_string(), param.value));
            }

            params.push(Identifier::new(param.value));

            match self.at().kind {
                TokenKind::Comma => {
                    self.eat()?;
                }
                TokenKind::CloseParen => {}
                _ => return Err(ParserError::MissingFnCloseParen),
            }
        }

        Ok(ParameterList::new(params))
    }

    // Call syntax: add(1, x + 2). The callee is resolved right away in the
    // function table
    pub(super) fn parse_function_call(&mut self) -> Result<Expression, ParserError> {
        let name = self.expect_token(TokenKind::Identifier)?.value;
        self.expect_token(TokenKind::OpenParen)?;

        let mut args: Vec<Expression> = vec![];

        while self.at().kind != TokenKind::CloseParen {
            args.push(self.parse_expression()?);

            match self.at().kind {
                TokenKind::Comma => {
                    self.eat()?;
                }
                TokenKind::CloseParen => {}
                _ => return Err(ParserError::MissingFnCallCloseParen(name)),
            }
        }

        self.expect_token(TokenKind::CloseParen)?;

        let function = self
            .functions
            .resolve(&name)
            .ok_or_else(|| ParserError::UndeclaredFunction(name.clone()))?;

        if function.arity() != args.len() {
            return Err(ParserError::WrongArgNumber(name, function.arity(), args.len()));
        }

        Ok(Expression::call(function, args))
    }
}
