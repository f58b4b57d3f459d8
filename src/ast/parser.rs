use crate::ast::{ASTNode, Operator};
use crate::Error;
use log::{debug, warn};
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "ast/arithmetic.pest"]
pub struct ArithmeticParser;

/// The tree of the longest expression prefix, and how many bytes of input it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPrefix {
    pub ast: ASTNode,
    /// Includes whitespace skipped after the last consumed token.
    pub consumed: usize,
}

/// Returns the offset of the first `(` that would open a level deeper than `max_nesting`.
pub fn nesting_cutoff(input: &str, max_nesting: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, byte) in input.bytes().enumerate() {
        match byte {
            b'(' => {
                depth += 1;
                if depth > max_nesting {
                    return Some(offset);
                }
            }
            b')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

impl ArithmeticParser {
    /// Parses the longest arithmetic prefix of `input`.
    ///
    /// Input past a `(` nested deeper than `max_nesting` is never handed to the
    /// parser, so recursion depth is bounded by the limit rather than by input length.
    pub fn parse_prefix(input: &str, max_nesting: usize) -> Result<ParsedPrefix, Error> {
        let input = match nesting_cutoff(input, max_nesting) {
            Some(offset) => {
                warn!(
                    "Parentheses nested deeper than {} levels at offset {}, ignoring the rest",
                    max_nesting, offset
                );
                &input[..offset]
            }
            None => input,
        };

        debug!("Parsing expression prefix: {:?}", input);
        let prefix = ArithmeticParser::parse(Rule::prefix, input)
            .map_err(|e| {
                debug!("No expression prefix: {}", e);
                Error::NoExpression
            })?
            .next()
            .ok_or(Error::NoExpression)?;

        let end = prefix.as_span().end();
        // Implicit skipping only keeps whitespace that precedes another token.
        let consumed = end + input[end..].bytes().take_while(|b| is_whitespace(*b)).count();
        let expression = next_pair(&mut prefix.into_inner(), "expression")?;
        let ast = Self::build_expression(expression)?;

        debug!("Parsed {} of {} bytes: {:?}", consumed, input.len(), ast);
        Ok(ParsedPrefix { ast, consumed })
    }

    fn build_expression(pair: Pair<Rule>) -> Result<ASTNode, Error> {
        let mut pairs = pair.into_inner();
        let first = Self::build_term(next_pair(&mut pairs, "term")?)?;

        let mut rest = Vec::new();
        while let Some(operator_pair) = pairs.next() {
            let operator = match operator_pair.as_rule() {
                Rule::PLUS => Operator::Add,
                Rule::MINUS => Operator::Subtract,
                _ => return Err(unexpected(&operator_pair, "additive operator")),
            };

            let right = Self::build_term(next_pair(&mut pairs, "term")?)?;
            rest.push((operator, right));
        }

        Ok(ASTNode::chain(first, rest))
    }

    fn build_term(pair: Pair<Rule>) -> Result<ASTNode, Error> {
        let mut pairs = pair.into_inner();
        let first = Self::build_factor(next_pair(&mut pairs, "factor")?)?;

        let mut rest = Vec::new();
        while let Some(operator_pair) = pairs.next() {
            let operator = match operator_pair.as_rule() {
                Rule::STAR => Operator::Multiply,
                Rule::SLASH => Operator::Divide,
                _ => return Err(unexpected(&operator_pair, "multiplicative operator")),
            };

            let right = Self::build_factor(next_pair(&mut pairs, "factor")?)?;
            rest.push((operator, right));
        }

        Ok(ASTNode::chain(first, rest))
    }

    fn build_factor(pair: Pair<Rule>) -> Result<ASTNode, Error> {
        // Signs are folded here instead of nesting one node per sign.
        let mut negative = false;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::PLUS => {}
                Rule::MINUS => negative = !negative,
                Rule::number | Rule::group => {
                    let operand = Self::build_primary(inner)?;
                    return Ok(if negative {
                        ASTNode::Negate(Box::new(operand))
                    } else {
                        operand
                    });
                }
                _ => return Err(unexpected(&inner, "sign or operand")),
            }
        }

        Err(Error::MalformedTree("factor without an operand".to_string()))
    }

    fn build_primary(pair: Pair<Rule>) -> Result<ASTNode, Error> {
        match pair.as_rule() {
            Rule::number => pair
                .as_str()
                .parse::<f64>()
                .map(ASTNode::Number)
                .map_err(|_| Error::InvalidNumber(pair.as_str().to_string())),
            Rule::group => {
                let inner = next_pair(&mut pair.into_inner(), "expression")?;
                Ok(ASTNode::Group(Box::new(Self::build_expression(inner)?)))
            }
            _ => Err(unexpected(&pair, "number or group")),
        }
    }
}

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, expected: &str) -> Result<Pair<'i, Rule>, Error> {
    pairs
        .next()
        .ok_or_else(|| Error::MalformedTree(format!("expected {}", expected)))
}

fn unexpected(pair: &Pair<Rule>, expected: &str) -> Error {
    Error::MalformedTree(format!("expected {}, found {:?}", expected, pair.as_rule()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_NESTING;

    fn parse(input: &str) -> ParsedPrefix {
        ArithmeticParser::parse_prefix(input, DEFAULT_MAX_NESTING).unwrap()
    }

    #[test]
    fn test_single_number() {
        let parsed = parse("19");
        assert_eq!(parsed.ast, ASTNode::Number(19.0));
        assert_eq!(parsed.consumed, 2);
    }

    #[test]
    fn test_decimal_number() {
        let parsed = parse("1.25");
        assert_eq!(parsed.ast, ASTNode::Number(1.25));
        assert_eq!(parsed.consumed, 4);
    }

    #[test]
    fn test_dangling_decimal_point_not_consumed() {
        let parsed = parse("2.");
        assert_eq!(parsed.ast, ASTNode::Number(2.0));
        assert_eq!(parsed.consumed, 1);
    }

    #[test]
    fn test_precedence() {
        let parsed = parse("2+3*4");
        let expected = ASTNode::Chain {
            first: Box::new(ASTNode::Number(2.0)),
            rest: vec![(
                Operator::Add,
                ASTNode::Chain {
                    first: Box::new(ASTNode::Number(3.0)),
                    rest: vec![(Operator::Multiply, ASTNode::Number(4.0))],
                },
            )],
        };
        assert_eq!(parsed.ast, expected);
        assert_eq!(parsed.consumed, 5);
    }

    #[test]
    fn test_left_associative_chain_is_flat() {
        let parsed = parse("8-4-2");
        let expected = ASTNode::Chain {
            first: Box::new(ASTNode::Number(8.0)),
            rest: vec![
                (Operator::Subtract, ASTNode::Number(4.0)),
                (Operator::Subtract, ASTNode::Number(2.0)),
            ],
        };
        assert_eq!(parsed.ast, expected);
    }

    #[test]
    fn test_grouped_expression() {
        let parsed = parse("(1+2)*3");
        let expected = ASTNode::Chain {
            first: Box::new(ASTNode::Group(Box::new(ASTNode::Chain {
                first: Box::new(ASTNode::Number(1.0)),
                rest: vec![(Operator::Add, ASTNode::Number(2.0))],
            }))),
            rest: vec![(Operator::Multiply, ASTNode::Number(3.0))],
        };
        assert_eq!(parsed.ast, expected);
        assert_eq!(parsed.consumed, 7);
    }

    #[test]
    fn test_unary_signs_fold() {
        assert_eq!(
            parse("-3").ast,
            ASTNode::Negate(Box::new(ASTNode::Number(3.0)))
        );
        assert_eq!(parse("--3").ast, ASTNode::Number(3.0));
        assert_eq!(parse("+3").ast, ASTNode::Number(3.0));
        assert_eq!(
            parse("- + -(-3)").ast,
            ASTNode::Group(Box::new(ASTNode::Negate(Box::new(ASTNode::Number(3.0)))))
        );
    }

    #[test]
    fn test_dangling_operator_not_consumed() {
        let parsed = parse("2+3*");
        assert_eq!(parsed.consumed, 3);
    }

    #[test]
    fn test_whitespace_accounting() {
        assert_eq!(parse("  2").consumed, 3);
        assert_eq!(parse("2 ").consumed, 2);
        assert_eq!(parse("2 + 3 *").consumed, 6);
        assert_eq!(parse("2 +").consumed, 2);
        assert_eq!(parse("1+2*3 ").consumed, 6);
        assert_eq!(parse("(1)\t\n").consumed, 5);
    }

    #[test]
    fn test_unclosed_group_backtracks() {
        let parsed = parse("1+(2+3");
        assert_eq!(parsed.ast, ASTNode::Number(1.0));
        assert_eq!(parsed.consumed, 1);
    }

    #[test]
    fn test_no_expression() {
        for input in ["", "   ", "abc", "(2+3", ".5", "*2", ")"] {
            assert_eq!(
                ArithmeticParser::parse_prefix(input, DEFAULT_MAX_NESTING),
                Err(Error::NoExpression),
                "input: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_nesting_cutoff() {
        assert_eq!(nesting_cutoff("((1))", 2), None);
        assert_eq!(nesting_cutoff("(((1)))", 2), Some(2));
        assert_eq!(nesting_cutoff("(1)+((2))+(((3)))", 2), Some(12));
        assert_eq!(nesting_cutoff(")))(((", 3), None);
    }

    #[test]
    fn test_nesting_guard_cuts_input() {
        let parsed = ArithmeticParser::parse_prefix("1+(((2)))", 2).unwrap();
        assert_eq!(parsed.ast, ASTNode::Number(1.0));
        assert_eq!(parsed.consumed, 1);
    }
}
