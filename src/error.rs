/// Errors reported by the strict parsing and evaluation APIs.
///
/// [`crate::evaluate`] never returns these; it folds every failure into
/// an [`crate::Evaluation`] with `rest == 0`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("no arithmetic expression at the start of the input")]
    NoExpression,

    #[error("unexpected input at offset {offset}: {remainder:?}")]
    TrailingInput { offset: usize, remainder: String },

    #[error("parentheses nested deeper than {limit} levels at offset {offset}")]
    NestingTooDeep { limit: usize, offset: usize },

    #[error("invalid number literal {0:?}")]
    InvalidNumber(String),

    #[error("malformed parse tree: {0}")]
    MalformedTree(String),
}
