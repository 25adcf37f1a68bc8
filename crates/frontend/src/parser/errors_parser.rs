use colored::*;
use thiserror::*;

use super::{Token, TokenKind};
use tools::errors::ReportCodeErr;

#[derive(Error, Debug, PartialEq)]
pub enum ParserError {
    // Token
    #[error("expected token: -{0:?}-, token found: -{1:?}-")]
    FoundWrongToken(TokenKind, TokenKind),

    #[error("Tryed to use non existant token")]
    EmptyTokenBufferUsed,

    #[error("Parsing for this token is not implemented: {0:?}")]
    UnrecognizedToken(Token),

    #[error("{} expected end of statement (new line or '}}'), found: -{0}-", "Error".red().bold())]
    ExpectedEndOfStatement(String),

    // Expressions
    #[error("{} the expression starting with -{0}- is not used. Only assignments, {}, {}, {} and blocks are statements.", "Error".red().bold(), "print".cyan(), "if".cyan(), "while".cyan())]
    ExpressionAsStatement(String),

    #[error("{} operator -{0}- can't start an expression. Only '-' is allowed in front of a value.", "Error".red().bold())]
    WrongInLineOperator(String),

    #[error("{} number -{0}- doesn't fit in a 32 bits integer.", "Error".red().bold())]
    InvalidNumber(String),

    // Blocks
    #[error("{} expected '{{' to open block of {0}.", "Error".red().bold())]
    MissingOpenBrace(String),

    #[error("{} expected '}}' to close block, reached end of file.", "Error".red().bold())]
    MissingCloseBrace,

    // Functions declaration
    #[error("{} while parsing function declaration. Expected function name after {} keyword.", "Error".red().bold(), "fn".cyan())]
    MissingIdentifierAfterFn,

    #[error("{} while parsing function declaration. Expected '(' after function name.", "Error".red().bold())]
    MissingFnOpenParen,

    #[error("{} while parsing function declaration. Expected ')' after parameters.", "Error".red().bold())]
    MissingFnCloseParen,

    #[error("{} while parsing function declaration. Parameters must be identifiers, found: -{0}-.", "Error".red().bold())]
    ParamNotIdentifier(String),

    #[error("{} while parsing function declaration -{0}-. Parameter -{1}- is declared twice.", "Error".red().bold())]
    DuplicateParam(String, String),

    #[error("{} while parsing function declaration. Expected '{{' to open function body.", "Error".red().bold())]
    MissingFnOpenBrace,

    #[error("{} while parsing function declaration. Expected '}}' to close function body.", "Error".red().bold())]
    MissingFnCloseBrace,

    #[error("{} while parsing function declaration. {} must be the last statement of the body.", "Error".red().bold(), "return".cyan())]
    StmtAfterReturn,

    #[error("{} {} is only allowed as the last statement of a function body.", "Error".red().bold(), "return".cyan())]
    ReturnOutsideFn,

    #[error("{} functions can only be declared at top level.", "Error".red().bold())]
    NestedFnDeclaration,

    #[error("{} function -{0}- is already declared.", "Error".red().bold())]
    FunctionAlreadyDeclared(String),

    // Function calls
    #[error("{} call to undeclared function -{0}-. Functions must be declared before being called.", "Error".red().bold())]
    UndeclaredFunction(String),

    #[error("{} while calling -{0}-: expected {1} arguments but {2} were given.", "Error".red().bold())]
    WrongArgNumber(String, usize, usize),

    #[error("{} while calling -{0}-: expected ',' or ')' after argument.", "Error".red().bold())]
    MissingFnCallCloseParen(String),
}

// Implement global trait for final error
impl ReportCodeErr for ParserError {}
