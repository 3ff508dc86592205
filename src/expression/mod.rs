use crate::{operators::Operator, parser, DataType, EvalError, ParseError};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
mod serde;

/// This is the core data type representing the result of parsing a string, i.e.,
/// a binary evaluation tree. Children of a binary operation are exclusively owned by
/// their parent, so the tree is never shared and never cyclic.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// use treecalc::{ExpressionNode, Operator};
///
/// let tree = ExpressionNode::<f64>::parse("8 - 4 - 2")?;
/// assert_eq!(
///     tree,
///     ExpressionNode::binary(
///         Operator::Sub,
///         ExpressionNode::binary(
///             Operator::Sub,
///             ExpressionNode::from_num(8.0),
///             ExpressionNode::from_num(4.0)
///         ),
///         ExpressionNode::from_num(2.0),
///     )
/// );
/// assert_eq!(tree.eval()?, 2.0);
/// #
/// #     Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Debug)]
pub enum ExpressionNode<T> {
    Literal {
        value: T,
    },
    BinaryOp {
        operator: Operator,
        left: Box<ExpressionNode<T>>,
        right: Box<ExpressionNode<T>>,
    },
}

impl<T: DataType> ExpressionNode<T> {
    /// Parses a string into an evaluation tree, see [`parse`](crate::parse).
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parser::parse(text)
    }

    pub fn from_num(value: T) -> Self {
        ExpressionNode::Literal { value }
    }

    /// Creates a binary node that takes ownership of both operands.
    pub fn binary(operator: Operator, left: Self, right: Self) -> Self {
        ExpressionNode::BinaryOp {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Evaluates the tree, left operands before right operands.
    ///
    /// # Errors
    ///
    /// A division whose right operand evaluates to zero returns
    /// [`EvalError::DivisionByZero`](EvalError::DivisionByZero). Nothing above the
    /// failing node is computed.
    ///
    pub fn eval(&self) -> Result<T, EvalError> {
        match self {
            ExpressionNode::Literal { value } => Ok(*value),
            ExpressionNode::BinaryOp {
                operator,
                left,
                right,
            } => {
                let left = left.eval()?;
                let right = right.eval()?;
                operator.apply(left, right)
            }
        }
    }

    /// Number of literals and operators in the tree.
    pub fn n_nodes(&self) -> usize {
        match self {
            ExpressionNode::Literal { .. } => 1,
            ExpressionNode::BinaryOp { left, right, .. } => 1 + left.n_nodes() + right.n_nodes(),
        }
    }

    fn unparse(&self, f: &mut Formatter, is_root: bool) -> fmt::Result {
        match self {
            ExpressionNode::Literal { value } => write!(f, "{}", value),
            ExpressionNode::BinaryOp {
                operator,
                left,
                right,
            } => {
                if !is_root {
                    write!(f, "(")?;
                }
                left.unparse(f, false)?;
                write!(f, " {} ", operator)?;
                right.unparse(f, false)?;
                if !is_root {
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

/// Fully parenthesized infix representation that parses back to an equal tree. The
/// root's parentheses are omitted.
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// use treecalc::ExpressionNode;
/// let tree = ExpressionNode::<f64>::parse("2+3*4 - 1")?;
/// assert_eq!(format!("{}", tree), "(2 + (3 * 4)) - 1");
/// #
/// #     Ok(())
/// # }
/// ```
impl<T: DataType> Display for ExpressionNode<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.unparse(f, true)
    }
}

impl<T: DataType> FromStr for ExpressionNode<T> {
    type Err = ParseError;
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}
