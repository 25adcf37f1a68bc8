use super::{Interpreter, InterpreterError};
use crate::frontend::ast::Instruction;
use crate::output::OutputSink;
use crate::scope::Scope;

impl<S: OutputSink> Interpreter<S> {
    pub fn execute(
        &mut self,
        instr: &Instruction,
        scope: &mut Scope,
    ) -> Result<(), InterpreterError> {
        match instr {
            Instruction::Assignment { target, value } => {
                let value = self.evaluate(value, scope)?;
                scope.put(target.name(), value);
            }
            Instruction::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition, scope)? != 0 {
                    self.execute(then_branch, scope)?;
                } else {
                    self.execute(else_branch, scope)?;
                }
            }
            Instruction::While { condition, body } => {
                let mut iterations: u64 = 0;

                while self.evaluate(condition, scope)? != 0 {
                    self.execute(body, scope)?;
                    iterations += 1;
                }

                tracing::trace!(iterations, "loop exited");
            }
            Instruction::Block(block) => {
                for instruction in block.instructions() {
                    self.execute(instruction, scope)?;
                }
            }
            Instruction::Output { value } => {
                let value = self.evaluate(value, scope)?;
                tracing::trace!(value, "output");
                self.sink.emit(value);
            }
        }

        Ok(())
    }
}
