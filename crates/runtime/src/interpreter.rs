mod expr;
mod interp_errors;
mod stmt;

use tools::errors::{CodeErr, ReportCodeErr};
pub use interp_errors::InterpreterError;

use super::{output::OutputSink, scope::Scope};
use crate::frontend::ast::ASTNode;

/// Tree walking evaluator. Expressions are evaluated with [`Interpreter::evaluate`],
/// instructions run with [`Interpreter::execute`], and every value printed by
/// the program goes to the sink given at construction.
pub struct Interpreter<S: OutputSink> {
    sink: S,
}

impl<S: OutputSink> Interpreter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    // Runs the top level instructions in order and stops at the first error.
    // Instructions executed before the failing one keep their effects.
    pub fn execute_program(
        &mut self,
        nodes: &[ASTNode],
        scope: &mut Scope,
    ) -> Result<(), CodeErr> {
        for n in nodes {
            tracing::trace!(line = n.line, "executing top level statement");
            self.execute(&n.node, scope)
                .map_err(|e| e.to_glob_err(n.line))?;
        }

        Ok(())
    }
}
