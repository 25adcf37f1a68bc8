use std::collections::{
    hash_map::Entry::{Occupied, Vacant},
    HashMap,
};
use std::fmt;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use super::{Expression, Identifier, Instruction};

#[derive(Debug, PartialEq, Clone, Default)]
pub struct ParameterList {
    params: Vec<Identifier>,
}

impl ParameterList {
    pub fn new(params: Vec<Identifier>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &[Identifier] {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct ArgList {
    args: Vec<Expression>,
}

impl ArgList {
    pub fn new(args: Vec<Expression>) -> Self {
        Self { args }
    }

    pub fn args(&self) -> &[Expression] {
        &self.args
    }
}

/// A callable unit: parameters, a body and the expression whose value is
/// returned once the body has run. Immutable once built.
#[derive(Debug, PartialEq, Clone)]
pub struct Function {
    name: String,
    params: ParameterList,
    body: Instruction,
    return_expr: Expression,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        params: ParameterList,
        body: Instruction,
        return_expr: Expression,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            body,
            return_expr,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &ParameterList {
        &self.params
    }

    pub fn body(&self) -> &Instruction {
        &self.body
    }

    pub fn return_expr(&self) -> &Expression {
        &self.return_expr
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

struct FunctionSlot {
    name: String,
    arity: usize,
    function: OnceCell<Function>,
}

/// Shared handle on a function, held by the function table and every call
/// site.
///
/// A handle exists as soon as the signature is known and the function is
/// bound to it once its body is complete, so a body can call the function it
/// belongs to. Handles compare by signature only: comparing bodies would
/// never end on a recursive function.
#[derive(Clone)]
pub struct FunctionRef(Rc<FunctionSlot>);

impl FunctionRef {
    pub fn declare(name: impl Into<String>, arity: usize) -> Self {
        Self(Rc::new(FunctionSlot {
            name: name.into(),
            arity,
            function: OnceCell::new(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn arity(&self) -> usize {
        self.0.arity
    }

    // None until the body is bound
    pub fn get(&self) -> Option<&Function> {
        self.0.function.get()
    }

    // Gives back the function if the handle is already bound or if the
    // signatures differ
    pub fn bind(&self, function: Function) -> Result<(), Function> {
        if function.name() != self.name() || function.arity() != self.arity() {
            return Err(function);
        }

        self.0.function.set(function)
    }

    pub fn ptr_eq(&self, other: &FunctionRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Function> for FunctionRef {
    fn from(function: Function) -> Self {
        let handle = FunctionRef::declare(function.name(), function.arity());
        // A fresh handle with the same signature always accepts it
        let _ = handle.0.function.set(function);
        handle
    }
}

impl PartialEq for FunctionRef {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.arity() == other.arity()
    }
}

impl fmt::Debug for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRef")
            .field("name", &self.name())
            .field("arity", &self.arity())
            .field("bound", &self.get().is_some())
            .finish()
    }
}

// Registry of declared functions, call sites are resolved by name against it
#[derive(Debug, Default, Clone)]
pub struct FunctionTable {
    functions: HashMap<String, FunctionRef>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    // Registers the signature, None if the name is already taken
    pub fn declare(&mut self, name: &str, arity: usize) -> Option<FunctionRef> {
        match self.functions.entry(name.to_string()) {
            Occupied(_) => None,
            Vacant(e) => Some(e.insert(FunctionRef::declare(name, arity)).clone()),
        }
    }

    pub fn resolve(&self, name: &str) -> Option<FunctionRef> {
        self.functions.get(name).cloned()
    }

    // Drops a declaration whose body failed to parse
    pub fn remove(&mut self, name: &str) -> Option<FunctionRef> {
        self.functions.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Block;

    fn identity() -> Function {
        Function::new(
            "id",
            ParameterList::new(vec![Identifier::new("n")]),
            Instruction::Block(Block::empty()),
            Expression::identifier("n"),
        )
    }

    #[test]
    fn declare_and_resolve() {
        let mut table = FunctionTable::new();
        assert!(table.resolve("id").is_none());

        let declared = table.declare("id", 1).expect("Should succeed");
        let resolved = table.resolve("id").unwrap();

        assert!(declared.ptr_eq(&resolved));
        assert_eq!(resolved.arity(), 1);
        assert!(resolved.get().is_none());

        declared.bind(identity()).unwrap();
        assert_eq!(resolved.get(), Some(&identity()));
    }

    #[test]
    fn declare_twice() {
        let mut table = FunctionTable::new();
        let first = table.declare("id", 1).unwrap();

        assert!(table.declare("id", 2).is_none());
        assert!(table.resolve("id").unwrap().ptr_eq(&first));
    }

    #[test]
    fn remove_frees_the_name() {
        let mut table = FunctionTable::new();
        table.declare("id", 1).unwrap();

        assert!(table.remove("id").is_some());
        assert!(table.resolve("id").is_none());
        assert!(table.declare("id", 1).is_some());
    }

    #[test]
    fn bind_only_once() {
        let handle = FunctionRef::declare("id", 1);

        assert_eq!(handle.bind(identity()), Ok(()));
        assert_eq!(handle.bind(identity()), Err(identity()));
    }

    #[test]
    fn bind_rejects_other_signature() {
        let handle = FunctionRef::declare("id", 2);

        assert_eq!(handle.bind(identity()), Err(identity()));
        assert!(handle.get().is_none());
    }

    #[test]
    fn from_function_is_bound() {
        let handle = FunctionRef::from(identity());

        assert_eq!(handle.name(), "id");
        assert_eq!(handle.get(), Some(&identity()));
    }
}
