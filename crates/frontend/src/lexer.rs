use colored::*;
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LexerError {
    #[error("{0}")]
    GlobLexerError(String),

    #[error("{} while tokenizing code, unsupported character: -{0}-.", "Error".bold().red())]
    UnrecognizedToken(String),

    #[error("{} while tokenizing number, only digits are supported to declare a number.", "Error".bold().red())]
    AlphaCharInNumberToken,

    #[error("{} while tokenizing code, expected '||' but found a single '|'.", "Error".bold().red())]
    SinglePipe,
}

impl LexerError {
    pub fn context(self, line: u64) -> LexerError {
        Self::GlobLexerError(format!("Line: {}, {}", line + 1, self))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literal types
    Number,
    Identifier,

    // Operator
    Equals,
    EqualEqual,
    Or,
    BinaryOperator,
    CompoundAssign,

    // Grouping
    OpenParen,  // (
    CloseParen, // )
    OpenBrace,  // {
    CloseBrace, // }
    Comma,      // ,

    // Keywords
    Fn,
    Return,
    If,
    Else,
    While,
    Print,

    // File
    EndLine,
    EOF,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u64,
}

// Append a white space at the end of the code to allow the window to work
// correctly. Otherwise, last character is never in its own window.
fn append_space_and_eof(mut source_code: String) -> String {
    source_code.push('\n');
    source_code.push(' ');
    source_code
}

fn is_skippable(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

#[derive(Default)]
pub struct Lexer<'a> {
    pub tokens: VecDeque<Token>,
    reserved_keywords: HashMap<&'a str, Token>,
}

impl<'a> Lexer<'a> {
    fn generate_keywords(&mut self) {
        self.reserved_keywords.insert("fn", Token::new_fn());
        self.reserved_keywords.insert("return", Token::new_return());
        self.reserved_keywords.insert("if", Token::new_if());
        self.reserved_keywords.insert("else", Token::new_else());
        self.reserved_keywords.insert("while", Token::new_while());
        self.reserved_keywords.insert("print", Token::new_print());
    }

    pub fn tokenize(&mut self, source_code: String) -> Result<(), LexerError> {
        self.generate_keywords();

        let modified_code = append_space_and_eof(source_code);
        let chars = modified_code.chars().collect::<Vec<char>>();
        let mut window = chars.windows(2);

        let mut line: u64 = 0;

        self.tokens.clear();

        while let Some(c) = window.next() {
            let first_char = c[0];

            if is_skippable(first_char) {
                continue;
            }

            match first_char {
                '+' | '-' => match c[1] {
                    '=' => {
                        self.tokens.push_back(Token::new(
                            TokenKind::CompoundAssign,
                            first_char.to_string(),
                            line,
                        ));
                        // We skip the '=' token
                        window.next();
                    }
                    _ => self.tokens.push_back(Token::new(
                        TokenKind::BinaryOperator,
                        first_char.to_string(),
                        line,
                    )),
                },
                '/' => {
                    // Only comments start with a slash
                    if c[1] == '/' {
                        while let Some(s) = window.next() {
                            if s[1] == '\n' || s[1] == '\r' {
                                break;
                            }
                        }
                    } else {
                        return Err(LexerError::UnrecognizedToken(first_char.into()).context(line));
                    }
                }
                '=' => {
                    if c[1] == '=' {
                        self.tokens.push_back(Token::new_equal_equal(line));
                        window.next();
                    } else {
                        self.tokens.push_back(Token::new_equal(line));
                    }
                }
                '|' => {
                    if c[1] == '|' {
                        self.tokens.push_back(Token::new_or(line));
                        window.next();
                    } else {
                        return Err(LexerError::SinglePipe.context(line));
                    }
                }
                '(' => self.tokens.push_back(Token::new_open_paren(line)),
                ')' => self.tokens.push_back(Token::new_close_paren(line)),
                '{' => self.tokens.push_back(Token::new_open_brace(line)),
                '}' => self.tokens.push_back(Token::new_close_brace(line)),
                ',' => self.tokens.push_back(Token::new_comma(line)),
                // Linux new line
                '\n' => {
                    self.tokens.push_back(Token::new_end_line(line));
                    line += 1;
                }
                // Windows new line
                '\r' => {
                    if c[1] == '\n' {
                        self.tokens.push_back(Token::new_end_line(line));
                        line += 1;
                        window.next();
                    }
                }
                _ => {
                    let second_char = c[1];

                    if first_char.is_ascii_digit() {
                        let mut val = String::from(first_char);
                        let mut next_char = second_char;

                        if second_char.is_ascii_digit() {
                            while let Some(r) = window.next() {
                                val.push(r[0]);
                                next_char = r[1];

                                if !r[1].is_ascii_digit() {
                                    break;
                                }
                            }
                        }

                        // Letters glued to a number, like 12ab
                        if next_char.is_alphabetic() || next_char == '_' {
                            return Err(LexerError::AlphaCharInNumberToken.context(line));
                        }

                        self.tokens.push_back(Token::new_number(val, line));
                    } else if first_char.is_alphabetic() || first_char == '_' {
                        let mut val = String::from(first_char);

                        // Support for variable like init_pos and variable with number like vec2
                        if second_char.is_alphanumeric() || second_char == '_' {
                            while let Some(r) = window.next() {
                                val.push(r[0]);

                                if !r[1].is_alphanumeric() && r[1] != '_' {
                                    break;
                                }
                            }
                        }

                        if let Some(tk) = self.reserved_keywords.get(val.as_str()) {
                            self.tokens.push_back(tk.clone().set_line(line));
                        } else {
                            self.tokens.push_back(Token::new_identifier(val, line));
                        }
                    } else {
                        return Err(LexerError::UnrecognizedToken(first_char.into()).context(line));
                    }
                }
            }
        }

        // We append manualy end of file
        self.tokens.push_back(Token::new_eof(line));
        Ok(())
    }
}

// ---------
//  Helpers
// ---------
impl Token {
    pub fn new(kind: TokenKind, value: String, line: u64) -> Self {
        Self { kind, value, line }
    }

    fn set_line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }

    pub fn new_number(value: String, line: u64) -> Token {
        Token::new(TokenKind::Number, value, line)
    }
    pub fn new_identifier(value: String, line: u64) -> Token {
        Token::new(TokenKind::Identifier, value, line)
    }
    pub fn new_equal(line: u64) -> Token {
        Token::new(TokenKind::Equals, "=".into(), line)
    }
    pub fn new_equal_equal(line: u64) -> Token {
        Token::new(TokenKind::EqualEqual, "==".into(), line)
    }
    pub fn new_or(line: u64) -> Token {
        Token::new(TokenKind::Or, "||".into(), line)
    }
    pub fn new_plus(line: u64) -> Token {
        Token::new(TokenKind::BinaryOperator, "+".into(), line)
    }
    pub fn new_minus(line: u64) -> Token {
        Token::new(TokenKind::BinaryOperator, "-".into(), line)
    }
    pub fn new_plus_eq(line: u64) -> Token {
        Token::new(TokenKind::CompoundAssign, "+".into(), line)
    }
    pub fn new_minus_eq(line: u64) -> Token {
        Token::new(TokenKind::CompoundAssign, "-".into(), line)
    }
    pub fn new_open_paren(line: u64) -> Token {
        Token::new(TokenKind::OpenParen, "(".into(), line)
    }
    pub fn new_close_paren(line: u64) -> Token {
        Token::new(TokenKind::CloseParen, ")".into(), line)
    }
    pub fn new_open_brace(line: u64) -> Token {
        Token::new(TokenKind::OpenBrace, "{".into(), line)
    }
    pub fn new_close_brace(line: u64) -> Token {
        Token::new(TokenKind::CloseBrace, "}".into(), line)
    }
    pub fn new_comma(line: u64) -> Token {
        Token::new(TokenKind::Comma, ",".into(), line)
    }
    pub fn new_end_line(line: u64) -> Token {
        Token::new(TokenKind::EndLine, "\\n".into(), line)
    }
    pub fn new_eof(line: u64) -> Token {
        Token::new(TokenKind::EOF, "EOF".into(), line)
    }

    // Keywords are stored without line, it is set when the keyword is found
    pub fn new_fn() -> Token {
        Token::new(TokenKind::Fn, "fn".into(), 0)
    }
    pub fn new_return() -> Token {
        Token::new(TokenKind::Return, "return".into(), 0)
    }
    pub fn new_if() -> Token {
        Token::new(TokenKind::If, "if".into(), 0)
    }
    pub fn new_else() -> Token {
        Token::new(TokenKind::Else, "else".into(), 0)
    }
    pub fn new_while() -> Token {
        Token::new(TokenKind::While, "while".into(), 0)
    }
    pub fn new_print() -> Token {
        Token::new(TokenKind::Print, "print".into(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokenize(code: &str) -> Result<VecDeque<Token>, LexerError> {
        let mut lexer: Lexer = Default::default();
        lexer.tokenize(code.to_string())?;
        Ok(lexer.tokens)
    }

    #[test]
    fn tokenize_single_char() {
        let tokens = tokenize("(){}=,+-").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::new_open_paren(0),
                Token::new_close_paren(0),
                Token::new_open_brace(0),
                Token::new_close_brace(0),
                Token::new_equal(0),
                Token::new_comma(0),
                Token::new_plus(0),
                Token::new_minus(0),
                Token::new_end_line(0),
                Token::new_eof(1),
            ]
        );
    }

    #[test]
    fn tokenize_double_char_operators() {
        let tokens = tokenize("== || += -=").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::new_equal_equal(0),
                Token::new_or(0),
                Token::new_plus_eq(0),
                Token::new_minus_eq(0),
                Token::new_end_line(0),
                Token::new_eof(1),
            ]
        );
    }

    #[test]
    fn tokenize_new_line() {
        let tokens = tokenize("\n \r\n").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::new_end_line(0),
                Token::new_end_line(1),
                Token::new_end_line(2),
                Token::new_eof(3),
            ]
        );
    }

    #[test]
    fn tokenize_numeric_literal() {
        let tokens = tokenize("123 7 6768").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::new_number("123".into(), 0),
                Token::new_number("7".into(), 0),
                Token::new_number("6768".into(), 0),
                Token::new_end_line(0),
                Token::new_eof(1),
            ]
        );
    }

    #[test]
    fn tokenize_identifiers_and_keywords() {
        let tokens = tokenize("fn return if else while print init_pos vec2 _tmp").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::new_fn(),
                Token::new_return(),
                Token::new_if(),
                Token::new_else(),
                Token::new_while(),
                Token::new_print(),
                Token::new_identifier("init_pos".into(), 0),
                Token::new_identifier("vec2".into(), 0),
                Token::new_identifier("_tmp".into(), 0),
                Token::new_end_line(0),
                Token::new_eof(1),
            ]
        );
    }

    #[test]
    fn keywords_carry_their_line() {
        let tokens = tokenize("x = 1\nwhile").unwrap();

        assert_eq!(tokens[4], Token::new(TokenKind::While, "while".into(), 1));
    }

    #[test]
    fn tokenize_expression_without_spaces() {
        let tokens = tokenize("x=x+-1").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::new_identifier("x".into(), 0),
                Token::new_equal(0),
                Token::new_identifier("x".into(), 0),
                Token::new_plus(0),
                Token::new_minus(0),
                Token::new_number("1".into(), 0),
                Token::new_end_line(0),
                Token::new_eof(1),
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        let tokens = tokenize("// nothing to see\nprint 1 // trailing").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::new_end_line(0),
                Token::new(TokenKind::Print, "print".into(), 1),
                Token::new_number("1".into(), 1),
                Token::new_end_line(1),
                Token::new_eof(2),
            ]
        );
    }

    #[test]
    fn alpha_in_number() {
        assert!(matches!(
            tokenize("12ab"),
            Err(LexerError::GlobLexerError(_))
        ));
        assert_eq!(
            tokenize("x = 1a"),
            Err(LexerError::AlphaCharInNumberToken.context(0))
        );
    }

    #[test]
    fn unsupported_characters() {
        assert_eq!(
            tokenize("x = 2 * 3"),
            Err(LexerError::UnrecognizedToken("*".into()).context(0))
        );
        assert_eq!(tokenize("a | b"), Err(LexerError::SinglePipe.context(0)));
        assert_eq!(
            tokenize("1 / 2"),
            Err(LexerError::UnrecognizedToken("/".into()).context(0))
        );
    }
}
