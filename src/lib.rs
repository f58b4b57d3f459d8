pub mod ast;
pub mod config;
mod error;
pub mod omnibox;

pub use ast::{Evaluation, Evaluator};
pub use config::Config;
pub use error::Error;

/// Evaluates the longest arithmetic prefix of `input` with the default nesting limit.
///
/// Total: input without a valid prefix yields `rest == 0`.
pub fn evaluate(input: &str) -> Evaluation {
    Evaluator::default().evaluate(input)
}

/// Evaluates `input`, failing unless all of it is one arithmetic expression.
pub fn evaluate_expression(input: &str) -> Result<f64, Error> {
    Evaluator::default().evaluate_expression(input)
}
