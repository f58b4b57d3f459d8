mod evaluator;
mod parser;

pub use evaluator::{Evaluation, Evaluator};
pub use parser::{nesting_cutoff, ArithmeticParser as Parser, ParsedPrefix, Rule};

#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Number(f64),
    Negate(Box<ASTNode>),
    Group(Box<ASTNode>),
    /// Operands at a single precedence level, folded left to right.
    Chain {
        first: Box<ASTNode>,
        rest: Vec<(Operator, ASTNode)>,
    },
}

impl ASTNode {
    /// Builds a chain node, collapsing to `first` when there are no further operands.
    pub fn chain(first: ASTNode, rest: Vec<(Operator, ASTNode)>) -> ASTNode {
        if rest.is_empty() {
            first
        } else {
            ASTNode::Chain {
                first: Box::new(first),
                rest,
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Applies the operator with IEEE-754 semantics; division by zero yields
    /// an infinity or NaN rather than an error.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            _ => Err(format!("Unknown operator: {}", value)),
        }
    }
}
