#![doc(html_root_url = "https://docs.rs/treecalc/0.1.0")]
//! Treecalc turns lines of infix arithmetic like `2 + 3 * (4 - 1)` into owned evaluation
//! trees and evaluates them.
//!
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use treecalc::{evaluate, parse};
//! let tree = parse::<f64>("2 + 3 * 4")?;
//! assert_eq!(evaluate(&tree)?, 14.0);
//! // the tree is only borrowed, evaluate as often as you like
//! assert_eq!(evaluate(&tree)?, 14.0);
//! #
//! #     Ok(())
//! # }
//! ```
//! Supported are non-negative number literals like `3` or `0.25`, the binary operators
//! `+`, `-`, `*`, and `/`, parentheses, and whitespace. Multiplication and division bind
//! tighter than addition and subtraction and operators of equal priority are evaluated
//! from left to right.
//!
//! Errors come in two flavors. Malformed input is reported as
//! [`ParseError`](ParseError) by [`parse`](parse), and a division by zero is reported as
//! [`EvalError::DivisionByZero`](EvalError::DivisionByZero) by [`evaluate`](evaluate).
//! ```rust
//! use treecalc::{eval_str, evaluate, parse, EvalError, ExError};
//! assert!(parse::<f64>("2 + ").is_err());
//! let tree = parse::<f64>("5 / (2 - 2)").unwrap();
//! assert_eq!(evaluate(&tree), Err(EvalError::DivisionByZero));
//! assert_eq!(eval_str::<f64>("1 / 0"), Err(ExError::Eval(EvalError::DivisionByZero)));
//! ```
//! The tree can be printed and parsed again.
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use treecalc::ExpressionNode;
//! let tree: ExpressionNode<f64> = "1 + 2 * 3 / 4".parse()?;
//! assert_eq!(tree.to_string(), "1 + ((2 * 3) / 4)");
//! assert_eq!(tree.to_string().parse::<ExpressionNode<f64>>()?, tree);
//! #
//! #     Ok(())
//! # }
//! ```
//!
//! With the feature `serde` trees can be serialized and deserialized as strings.
//!
//! The [`repl`](repl) module contains the read-evaluate-print loop of the `treecalc`
//! binary.

mod data_type;
mod definitions;
mod expression;
mod operators;
mod parser;
pub mod repl;
mod result;
mod util;

pub use {
    data_type::DataType,
    expression::ExpressionNode,
    operators::{Operator, PrecedenceTable, PRECEDENCE},
    parser::parse,
    result::{EvalError, ExError, ExResult, ParseError},
};

/// Evaluates a tree that has been created by [`parse`](parse). The tree is only read,
/// see [`ExpressionNode::eval`](ExpressionNode::eval).
///
/// # Errors
///
/// [`EvalError::DivisionByZero`](EvalError::DivisionByZero) if a divisor evaluates to zero.
///
pub fn evaluate<T: DataType>(tree: &ExpressionNode<T>) -> Result<T, EvalError> {
    tree.eval()
}

/// Parses a string, evaluates the resulting tree, and drops it.
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// assert_eq!(treecalc::eval_str::<f64>("(2 + 3) * 4")?, 20.0);
/// #
/// #     Ok(())
/// # }
/// ```
/// # Errors
///
/// See [`parse`](parse) and [`evaluate`](evaluate).
///
pub fn eval_str<T: DataType>(text: &str) -> ExResult<T> {
    let tree = parse::<T>(text)?;
    Ok(evaluate(&tree)?)
}
