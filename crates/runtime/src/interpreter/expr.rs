use super::{Interpreter, InterpreterError};
use crate::frontend::ast::{CallExpression, Expression};
use crate::output::OutputSink;
use crate::scope::Scope;

impl<S: OutputSink> Interpreter<S> {
    // The scope is only read: an expression can't change the bindings it is
    // evaluated against, calls work in a scope of their own
    pub fn evaluate(
        &mut self,
        expr: &Expression,
        scope: &Scope,
    ) -> Result<i32, InterpreterError> {
        match expr {
            Expression::Literal { value } => Ok(*value),
            Expression::Identifier(id) => Ok(scope.get(id.name())?),
            Expression::Add { lhs, rhs } => {
                let lhs = self.evaluate(lhs, scope)?;
                let rhs = self.evaluate(rhs, scope)?;

                Ok(lhs.wrapping_add(rhs))
            }
            Expression::Negation { operand } => Ok(self.evaluate(operand, scope)?.wrapping_neg()),
            Expression::Or { lhs, rhs } => {
                // No short circuit, the right side can print through a call
                let lhs = self.evaluate(lhs, scope)?;
                let rhs = self.evaluate(rhs, scope)?;

                Ok(i32::from(lhs != 0 || rhs != 0))
            }
            Expression::Equal { lhs, rhs } => {
                let lhs = self.evaluate(lhs, scope)?;
                let rhs = self.evaluate(rhs, scope)?;

                Ok(i32::from(lhs == rhs))
            }
            Expression::Call(call) => self.call_function(call, scope),
        }
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(function = call.function().name(), arity = call.function().arity())
    )]
    fn call_function(
        &mut self,
        call: &CallExpression,
        scope: &Scope,
    ) -> Result<i32, InterpreterError> {
        let handle = call.function();
        let function = handle
            .get()
            .ok_or_else(|| InterpreterError::UnboundFunction(handle.name().to_string()))?;
        let params = function.params().params();
        let args = call.args().args();

        if params.len() != args.len() {
            return Err(InterpreterError::WrongArgNumber(
                function.name().to_string(),
                params.len(),
                args.len(),
            ));
        }

        // Every argument is evaluated in the caller scope before the first
        // binding, so arguments can't observe each other. Each call, recursive
        // ones included, gets a scope of its own.
        let values = args
            .iter()
            .map(|arg| self.evaluate(arg, scope))
            .collect::<Result<Vec<i32>, InterpreterError>>()?;

        let mut local = Scope::new();
        for (param, value) in params.iter().zip(values) {
            local.put(param.name(), value);
        }

        self.execute(function.body(), &mut local)?;

        self.evaluate(function.return_expr(), &local)
    }
}
