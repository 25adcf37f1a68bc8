use std::fmt::Display;

// Final error handed to the host: a message already tagged with its source line
#[derive(Debug, PartialEq, Clone)]
pub struct CodeErr {
    line: u64,
    message: String,
}

impl CodeErr {
    pub fn new(line: u64, message: String) -> Self {
        Self { line, message }
    }

    // Lines are stored zero based, as produced by the lexer
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for CodeErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line: {}\n{}", self.line + 1, self.message)
    }
}

impl std::error::Error for CodeErr {}

pub trait ReportCodeErr {
    fn to_glob_err(&self, line: u64) -> CodeErr
    where
        Self: std::fmt::Display,
    {
        CodeErr::new(line, self.to_string())
    }
}
