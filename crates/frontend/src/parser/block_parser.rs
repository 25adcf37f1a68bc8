use crate::ast::{Block, BlockBuilder};

use super::errors_parser::ParserError;
use super::Parser;
use super::{Instruction, TokenKind};

impl Parser {
    // Block syntax, statements are separated by new lines:
    // {
    //     x = 1
    //     print x
    // }
    // The opening brace is already consumed by the caller
    pub(super) fn parse_block(&mut self) -> Result<Block, ParserError> {
        self.depth += 1;
        let mut builder = BlockBuilder::new();

        while self.at().kind != TokenKind::CloseBrace {
            if self.is_eof() {
                return Err(ParserError::MissingCloseBrace);
            }

            if let Some(stmt) = self.parse_statement()? {
                builder.push(stmt);
            }
        }

        self.expect_token(TokenKind::CloseBrace)?;
        self.depth -= 1;

        Ok(builder.build())
    }

    // if cond { ... } else if cond { ... } else { ... }
    // Without else, the false branch is an empty block
    pub(super) fn parse_if(&mut self) -> Result<Instruction, ParserError> {
        self.expect_token(TokenKind::If)?;

        let condition = self.parse_expression()?;
        self.expect_open_brace("if")?;
        let then_branch = self.parse_block()?;

        // 'else' can be on the line after the closing brace
        let else_branch = if self.next_significant_kind() == &TokenKind::Else {
            self.skip_end_lines();
            self.eat()?;

            match self.at().kind {
                TokenKind::If => self.parse_if()?,
                _ => {
                    self.expect_open_brace("else")?;
                    Instruction::from(self.parse_block()?)
                }
            }
        } else {
            Instruction::from(Block::empty())
        };

        Ok(Instruction::if_else(condition, then_branch.into(), else_branch))
    }

    // while cond { ... }
    pub(super) fn parse_while(&mut self) -> Result<Instruction, ParserError> {
        self.expect_token(TokenKind::While)?;

        let condition = self.parse_expression()?;
        self.expect_open_brace("while")?;
        let body = self.parse_block()?;

        Ok(Instruction::while_loop(condition, body.into()))
    }

    fn expect_open_brace(&mut self, owner: &str) -> Result<(), ParserError> {
        self.expect_token(TokenKind::OpenBrace)
            .map(|_| ())
            .map_err(|_| ParserError::MissingOpenBrace(owner.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::ast::{Block, Expression, Instruction};
    use crate::parser::tests::parse;

    fn only_instruction(code: &str) -> Instruction {
        let mut parser = parse(code).expect("Should parse");
        assert_eq!(parser.ast_nodes.len(), 1);
        parser.ast_nodes.remove(0).node
    }

    #[test]
    fn parse_while_block() {
        let code = "while done == 0 {
            x += 1
            done = x == 3
        }";

        assert_eq!(
            only_instruction(code),
            Instruction::while_loop(
                Expression::equal(Expression::identifier("done"), Expression::literal(0)),
                Block::builder()
                    .with(Instruction::assign(
                        "x",
                        Expression::add(Expression::identifier("x"), Expression::literal(1))
                    ))
                    .with(Instruction::assign(
                        "done",
                        Expression::equal(Expression::identifier("x"), Expression::literal(3))
                    ))
                    .build()
                    .into()
            )
        );
    }

    #[test]
    fn parse_if_without_else() {
        assert_eq!(
            only_instruction("if x == 1 { print 1 }\n"),
            Instruction::if_else(
                Expression::equal(Expression::identifier("x"), Expression::literal(1)),
                Block::builder()
                    .with(Instruction::output(Expression::literal(1)))
                    .build()
                    .into(),
                Block::empty().into(),
            )
        );
    }

    #[test]
    fn parse_if_else_on_next_line() {
        let code = "if c {
            print 1
        }
        else {
            print 0
        }";

        assert_eq!(
            only_instruction(code),
            Instruction::if_else(
                Expression::identifier("c"),
                Block::builder()
                    .with(Instruction::output(Expression::literal(1)))
                    .build()
                    .into(),
                Block::builder()
                    .with(Instruction::output(Expression::literal(0)))
                    .build()
                    .into(),
            )
        );
    }

    #[test]
    fn parse_else_if_chain() {
        let code = "if a { print 1 } else if b { print 2 } else { print 3 }";

        let single = |v| -> Instruction {
            Block::builder()
                .with(Instruction::output(Expression::literal(v)))
                .build()
                .into()
        };

        assert_eq!(
            only_instruction(code),
            Instruction::if_else(
                Expression::identifier("a"),
                single(1),
                Instruction::if_else(Expression::identifier("b"), single(2), single(3)),
            )
        );
    }

    #[test]
    fn if_followed_by_statement() {
        let parser = parse("if a { }\nprint 2").unwrap();

        assert_eq!(parser.ast_nodes.len(), 2);
        assert_eq!(parser.ast_nodes[1].line, 1);
    }

    #[test]
    fn nested_bare_blocks() {
        assert_eq!(
            only_instruction("{ { } }"),
            Instruction::from(
                Block::builder()
                    .with(Block::empty().into())
                    .build()
            )
        );
    }

    #[test]
    fn unclosed_block() {
        assert!(parse("while 1 {\n x = 1\n").is_err());
    }

    #[test]
    fn missing_open_brace() {
        let err = parse("while 1\n{ }").err().unwrap();
        assert!(err.message().contains("while"));
    }

    #[test]
    fn return_outside_function() {
        assert!(parse("return 1").is_err());
    }
}
