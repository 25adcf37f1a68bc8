mod function;
pub mod node;
pub mod printer;

pub use function::{ArgList, Function, FunctionRef, FunctionTable, ParameterList};
pub use node::{Node, NodeRef};

// A top level instruction with the line it starts on, used to report errors
#[derive(Debug, PartialEq, Clone)]
pub struct ASTNode {
    pub node: Instruction,
    pub line: u64,
}

impl ASTNode {
    pub fn new(node: Instruction, line: u64) -> Self {
        Self { node, line }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Identifier {
    name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// Values are 32 bits integers and arithmetic wraps on overflow. Relational
// and logical operators always produce 0 or 1, any nonzero value is true when
// used as a condition.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Literal {
        value: i32,
    },
    Identifier(Identifier),
    Add {
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Negation {
        operand: Box<Expression>,
    },
    // Both sides are always evaluated, there is no short circuit
    Or {
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Equal {
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Call(CallExpression),
}

#[derive(Debug, PartialEq, Clone)]
pub struct CallExpression {
    function: FunctionRef,
    args: ArgList,
}

impl CallExpression {
    pub fn new(function: FunctionRef, args: ArgList) -> Self {
        Self { function, args }
    }

    pub fn function(&self) -> &FunctionRef {
        &self.function
    }

    pub fn args(&self) -> &ArgList {
        &self.args
    }
}

impl Expression {
    pub fn literal(value: i32) -> Self {
        Expression::Literal { value }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier::new(name))
    }

    pub fn add(lhs: Expression, rhs: Expression) -> Self {
        Expression::Add {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn negate(operand: Expression) -> Self {
        Expression::Negation {
            operand: Box::new(operand),
        }
    }

    pub fn or(lhs: Expression, rhs: Expression) -> Self {
        Expression::Or {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn equal(lhs: Expression, rhs: Expression) -> Self {
        Expression::Equal {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn call(function: FunctionRef, args: Vec<Expression>) -> Self {
        Expression::Call(CallExpression::new(function, ArgList::new(args)))
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Instruction {
    Assignment {
        target: Identifier,
        value: Expression,
    },
    If {
        condition: Expression,
        then_branch: Box<Instruction>,
        else_branch: Box<Instruction>,
    },
    While {
        condition: Expression,
        body: Box<Instruction>,
    },
    Block(Block),
    Output {
        value: Expression,
    },
}

impl Instruction {
    pub fn assign(target: impl Into<String>, value: Expression) -> Self {
        Instruction::Assignment {
            target: Identifier::new(target),
            value,
        }
    }

    pub fn if_else(
        condition: Expression,
        then_branch: Instruction,
        else_branch: Instruction,
    ) -> Self {
        Instruction::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn while_loop(condition: Expression, body: Instruction) -> Self {
        Instruction::While {
            condition,
            body: Box::new(body),
        }
    }

    pub fn output(value: Expression) -> Self {
        Instruction::Output { value }
    }
}

impl From<Block> for Instruction {
    fn from(value: Block) -> Self {
        Instruction::Block(value)
    }
}

/// Sequence of instructions executed in insertion order.
///
/// Instructions can only be appended through a [`BlockBuilder`], so a block
/// that exists is already complete and can't grow while it runs.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Block {
    instructions: Vec<Instruction>,
}

impl Block {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> BlockBuilder {
        BlockBuilder::new()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl FromIterator<Instruction> for Block {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        Self {
            instructions: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct BlockBuilder {
    instructions: Vec<Instruction>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    pub fn with(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    pub fn build(self) -> Block {
        Block {
            instructions: self.instructions,
        }
    }
}
