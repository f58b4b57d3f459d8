use crate::ast::{nesting_cutoff, ASTNode, ParsedPrefix, Parser};
use crate::config::{Config, DEFAULT_MAX_NESTING};
use crate::Error;
use log::debug;
use rayon::prelude::*;

/// Value of the longest arithmetic prefix of an input, and where that prefix ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub value: f64,
    /// Byte offset of the first character not consumed. `0` when no expression was found.
    pub rest: usize,
}

impl Evaluation {
    pub const NONE: Evaluation = Evaluation {
        value: 0.0,
        rest: 0,
    };

    pub fn is_recognized(&self) -> bool {
        self.rest > 0
    }

    /// Splits `input` into the recognized prefix and the trailing remainder.
    ///
    /// `input` should be the string this evaluation was produced from; an offset
    /// that does not fall on a char boundary of `input` treats it all as trailing.
    pub fn split<'a>(&self, input: &'a str) -> (&'a str, &'a str) {
        input.split_at_checked(self.rest).unwrap_or(("", input))
    }

    pub fn recognized<'a>(&self, input: &'a str) -> &'a str {
        self.split(input).0
    }

    pub fn trailing<'a>(&self, input: &'a str) -> &'a str {
        self.split(input).1
    }
}

#[derive(Debug, Clone)]
pub struct Evaluator {
    max_nesting: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_NESTING)
    }
}

impl Evaluator {
    /// Creates a new `Evaluator` that refuses to descend past `max_nesting` parentheses.
    pub fn new(max_nesting: usize) -> Self {
        Self { max_nesting }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_nesting)
    }

    pub fn max_nesting(&self) -> usize {
        self.max_nesting
    }

    /// Parse the longest expression prefix of `input` into an AST.
    pub fn parse_expression(&self, input: &str) -> Result<ParsedPrefix, Error> {
        Parser::parse_prefix(input, self.max_nesting)
    }

    /// Evaluates the longest arithmetic prefix of `input`.
    ///
    /// Never fails: input without a valid prefix yields [`Evaluation::NONE`].
    /// Numeric faults such as division by zero show up in `value` as an
    /// infinity or NaN and do not shorten `rest`.
    pub fn evaluate(&self, input: &str) -> Evaluation {
        match self.parse_expression(input) {
            Ok(ParsedPrefix { ast, consumed }) => Evaluation {
                value: self.evaluate_ast(&ast),
                rest: consumed,
            },
            Err(e) => {
                debug!("No value for {:?}: {}", input, e);
                Evaluation::NONE
            }
        }
    }

    /// Evaluates `input`, requiring all of it to be a single expression.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if the whole input parsed.
    /// * `Err(Error::NestingTooDeep)` if parentheses exceed the nesting limit.
    /// * `Err(Error::TrailingInput)` if only a prefix parsed.
    /// * `Err(Error::NoExpression)` if nothing parsed.
    pub fn evaluate_expression(&self, input: &str) -> Result<f64, Error> {
        if let Some(offset) = nesting_cutoff(input, self.max_nesting) {
            return Err(Error::NestingTooDeep {
                limit: self.max_nesting,
                offset,
            });
        }

        let ParsedPrefix { ast, consumed } = self.parse_expression(input)?;
        if consumed < input.len() {
            return Err(Error::TrailingInput {
                offset: consumed,
                remainder: input[consumed..].to_string(),
            });
        }

        Ok(self.evaluate_ast(&ast))
    }

    /// Evaluates many inputs in parallel, preserving their order.
    pub fn evaluate_batch<S>(&self, inputs: &[S]) -> Vec<Evaluation>
    where
        S: AsRef<str> + Sync,
    {
        inputs
            .par_iter()
            .map(|input| self.evaluate(input.as_ref()))
            .collect()
    }

    /// Folds a parsed tree down to its value.
    pub fn evaluate_ast(&self, ast: &ASTNode) -> f64 {
        match ast {
            ASTNode::Number(n) => *n,
            ASTNode::Negate(inner) => -self.evaluate_ast(inner),
            ASTNode::Group(inner) => self.evaluate_ast(inner),
            ASTNode::Chain { first, rest } => {
                rest.iter()
                    .fold(self.evaluate_ast(first), |acc, (operator, operand)| {
                        operator.apply(acc, self.evaluate_ast(operand))
                    })
            }
        }
    }
}
