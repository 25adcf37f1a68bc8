use colored::*;
use thiserror::Error;

use tools::errors::ReportCodeErr;
use crate::scope::ScopeError;

#[derive(Error, Debug, PartialEq)]
pub enum InterpreterError {
    #[error("{} while evaluating expression: {0}", "Error".red().bold())]
    Evaluation(#[from] ScopeError),

    // Only reachable with a tree built by hand, the parser rejects such calls
    #[error("{} during '{0}' function evaluation: expected {1} argument but found {2}", "Error".red().bold())]
    WrongArgNumber(String, usize, usize),

    // A handle declared by hand and never given a body
    #[error("{} call to function -{0}- whose body was never defined", "Error".red().bold())]
    UnboundFunction(String),
}

// Implement global trait for final error
impl ReportCodeErr for InterpreterError {}
