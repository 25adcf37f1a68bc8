//! Read only view shared by every node of the tree.
//!
//! Evaluation never goes through this module, it exists for tooling (the tree
//! printer, debugging output) that needs to walk a program without knowing
//! its node kinds.

use super::{
    ArgList, Block, CallExpression, Expression, Function, Identifier, Instruction, ParameterList,
};

pub trait Node {
    /// Fixed per node kind, like `+`, `If` or `Call`.
    fn label(&self) -> &'static str;

    /// Semantic payload beyond the children: names and literal values.
    /// Empty for most nodes.
    fn text(&self) -> String {
        String::new()
    }

    fn children(&self) -> Vec<NodeRef<'_>>;

    fn child(&self, index: usize) -> Option<NodeRef<'_>> {
        self.children().get(index).copied()
    }

    fn num_children(&self) -> usize {
        self.children().len()
    }
}

// Borrowed handle on any kind of node, so children of different kinds can
// live in the same list
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Expression(&'a Expression),
    Instruction(&'a Instruction),
    Identifier(&'a Identifier),
    Function(&'a Function),
    Parameters(&'a ParameterList),
    Arguments(&'a ArgList),
}

impl<'a> NodeRef<'a> {
    fn as_node(self) -> &'a dyn Node {
        match self {
            NodeRef::Expression(n) => n,
            NodeRef::Instruction(n) => n,
            NodeRef::Identifier(n) => n,
            NodeRef::Function(n) => n,
            NodeRef::Parameters(n) => n,
            NodeRef::Arguments(n) => n,
        }
    }
}

impl Node for NodeRef<'_> {
    fn label(&self) -> &'static str {
        self.as_node().label()
    }

    fn text(&self) -> String {
        self.as_node().text()
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        self.as_node().children()
    }
}

impl Node for Identifier {
    fn label(&self) -> &'static str {
        "Id"
    }

    fn text(&self) -> String {
        self.name().to_string()
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        vec![]
    }
}

impl Node for Expression {
    fn label(&self) -> &'static str {
        match self {
            Expression::Literal { .. } => "Int",
            Expression::Identifier(id) => id.label(),
            Expression::Add { .. } => "+",
            Expression::Negation { .. } => "Negative",
            Expression::Or { .. } => "||",
            Expression::Equal { .. } => "==",
            Expression::Call(call) => call.label(),
        }
    }

    fn text(&self) -> String {
        match self {
            Expression::Literal { value } => value.to_string(),
            Expression::Identifier(id) => id.text(),
            Expression::Call(call) => call.text(),
            _ => String::new(),
        }
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        match self {
            Expression::Literal { .. } | Expression::Identifier(_) => vec![],
            Expression::Negation { operand } => vec![NodeRef::Expression(operand)],
            Expression::Add { lhs, rhs }
            | Expression::Or { lhs, rhs }
            | Expression::Equal { lhs, rhs } => {
                vec![NodeRef::Expression(lhs), NodeRef::Expression(rhs)]
            }
            Expression::Call(call) => call.children(),
        }
    }
}

impl Node for CallExpression {
    fn label(&self) -> &'static str {
        "Call"
    }

    fn text(&self) -> String {
        self.function().name().to_string()
    }

    // The callee is only listed once its body is bound
    fn children(&self) -> Vec<NodeRef<'_>> {
        match self.function().get() {
            Some(function) => {
                vec![NodeRef::Function(function), NodeRef::Arguments(self.args())]
            }
            None => vec![NodeRef::Arguments(self.args())],
        }
    }
}

impl Node for Instruction {
    fn label(&self) -> &'static str {
        match self {
            Instruction::Assignment { .. } => "Assign",
            Instruction::If { .. } => "If",
            Instruction::While { .. } => "While",
            Instruction::Block(block) => block.label(),
            Instruction::Output { .. } => "Output",
        }
    }

    fn text(&self) -> String {
        match self {
            Instruction::Assignment { target, .. } => target.text(),
            _ => String::new(),
        }
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        match self {
            Instruction::Assignment { target, value } => {
                vec![NodeRef::Identifier(target), NodeRef::Expression(value)]
            }
            Instruction::If {
                condition,
                then_branch,
                else_branch,
            } => vec![
                NodeRef::Expression(condition),
                NodeRef::Instruction(then_branch),
                NodeRef::Instruction(else_branch),
            ],
            Instruction::While { condition, body } => {
                vec![NodeRef::Expression(condition), NodeRef::Instruction(body)]
            }
            Instruction::Block(block) => block.children(),
            Instruction::Output { value } => vec![NodeRef::Expression(value)],
        }
    }
}

impl Node for Block {
    fn label(&self) -> &'static str {
        "Block"
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        self.instructions().iter().map(NodeRef::Instruction).collect()
    }

    fn child(&self, index: usize) -> Option<NodeRef<'_>> {
        self.instructions().get(index).map(NodeRef::Instruction)
    }

    fn num_children(&self) -> usize {
        self.len()
    }
}

impl Node for Function {
    fn label(&self) -> &'static str {
        "Function"
    }

    fn text(&self) -> String {
        self.name().to_string()
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        vec![
            NodeRef::Parameters(self.params()),
            NodeRef::Instruction(self.body()),
            NodeRef::Expression(self.return_expr()),
        ]
    }
}

impl Node for ParameterList {
    fn label(&self) -> &'static str {
        "Params"
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        self.params().iter().map(NodeRef::Identifier).collect()
    }
}

impl Node for ArgList {
    fn label(&self) -> &'static str {
        "Args"
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        self.args().iter().map(NodeRef::Expression).collect()
    }
}
