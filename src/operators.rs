use crate::{DataType, EvalError};
use std::fmt::{self, Display, Formatter};

/// The four binary operators an evaluation tree can contain.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Returns the operator that is represented by `c`, if any.
    pub fn from_repr(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    /// Representation of the operator in the string to be parsed, e.g., `-`.
    pub fn repr(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Rank of the operator in the [`PRECEDENCE`](PRECEDENCE) table.
    pub fn prio(&self) -> i32 {
        PRECEDENCE.rank(self.repr())
    }

    /// Applies the operator to two evaluated operands.
    ///
    /// # Errors
    ///
    /// Dividing by exactly zero returns [`EvalError::DivisionByZero`](EvalError::DivisionByZero).
    ///
    pub fn apply<T: DataType>(&self, a: T, b: T) -> Result<T, EvalError> {
        match self {
            Operator::Add => Ok(a + b),
            Operator::Sub => Ok(a - b),
            Operator::Mul => Ok(a * b),
            Operator::Div => {
                if b == T::zero() {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(a / b)
                }
            }
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.repr())
    }
}

/// Immutable mapping from operator representation to its rank. A binary operation with
/// a higher rank is executed first. Unknown representations rank 0, i.e., lower than all
/// real operators.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct PrecedenceTable {
    ranks: [(char, i32); 4],
}

impl PrecedenceTable {
    pub fn rank(&self, repr: char) -> i32 {
        self.ranks
            .iter()
            .find(|(r, _)| *r == repr)
            .map(|(_, rank)| *rank)
            .unwrap_or(0)
    }
}

pub const PRECEDENCE: PrecedenceTable = PrecedenceTable {
    ranks: [('+', 1), ('-', 1), ('*', 2), ('/', 2)],
};

#[cfg(test)]
mod test {
    use crate::{
        operators::{Operator, PRECEDENCE},
        util::assert_close,
        EvalError,
    };

    #[test]
    fn test_precedence() {
        assert_eq!(PRECEDENCE.rank('+'), 1);
        assert_eq!(PRECEDENCE.rank('-'), 1);
        assert_eq!(PRECEDENCE.rank('*'), 2);
        assert_eq!(PRECEDENCE.rank('/'), 2);
        assert_eq!(PRECEDENCE.rank('('), 0);
        assert_eq!(PRECEDENCE.rank('^'), 0);
        assert!(Operator::Mul.prio() > Operator::Sub.prio());
        assert_eq!(Operator::Div.prio(), Operator::Mul.prio());
    }

    #[test]
    fn test_repr() {
        for c in ['+', '-', '*', '/'] {
            assert_eq!(Operator::from_repr(c).map(|op| op.repr()), Some(c));
        }
        assert_eq!(Operator::from_repr('('), None);
        assert_eq!(Operator::from_repr('x'), None);
        assert_eq!(format!("{}", Operator::Div), "/");
    }

    #[test]
    fn test_apply() {
        assert_close(Operator::Add.apply(1.5, 2.0).unwrap(), 3.5);
        assert_close(Operator::Sub.apply(1.5, 2.0).unwrap(), -0.5);
        assert_close(Operator::Mul.apply(1.5, 2.0).unwrap(), 3.0);
        assert_close(Operator::Div.apply(1.5, 2.0).unwrap(), 0.75);
        assert_eq!(Operator::Div.apply(1.5, 0.0), Err(EvalError::DivisionByZero));
        assert_eq!(Operator::Div.apply(0.0f32, -0.0), Err(EvalError::DivisionByZero));
        assert_eq!(Operator::Mul.apply(0.0, 0.0), Ok(0.0));
    }
}
