use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// This will be thrown at you if a string cannot be turned into an evaluation tree. Ok,
/// obviously it is not an exception, so thrown needs to be understood figuratively.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct ParseError {
    pub msg: String,
}
impl ParseError {
    pub fn new(msg: &str) -> ParseError {
        ParseError {
            msg: msg.to_string(),
        }
    }
}
impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}
impl Error for ParseError {}

/// Failures that can only be detected while walking a tree.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum EvalError {
    /// The right operand of a `/` node evaluated to zero.
    DivisionByZero,
}
impl Display for EvalError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            EvalError::DivisionByZero => write!(f, "division by zero"),
        }
    }
}
impl Error for EvalError {}

/// Either of the two error kinds. Used where parsing and evaluation happen in one go,
/// e.g., in [`eval_str`](crate::eval_str) or in the [`repl`](crate::repl).
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ExError {
    Parse(ParseError),
    Eval(EvalError),
}
impl Display for ExError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ExError::Parse(e) => write!(f, "{}", e),
            ExError::Eval(e) => write!(f, "{}", e),
        }
    }
}
impl Error for ExError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExError::Parse(e) => Some(e),
            ExError::Eval(e) => Some(e),
        }
    }
}
impl From<ParseError> for ExError {
    fn from(e: ParseError) -> Self {
        ExError::Parse(e)
    }
}
impl From<EvalError> for ExError {
    fn from(e: EvalError) -> Self {
        ExError::Eval(e)
    }
}

/// Treecalc' result type with [`ExError`](ExError) as error type.
pub type ExResult<U> = Result<U, ExError>;

/// Creates a [`ParseError`](ParseError) with a formatted message.
/// ```rust
/// use treecalc::{parse_err, ParseError};
/// let err: ParseError = parse_err!("cannot parse {}", "$");
/// assert_eq!(err.msg, "cannot parse $");
/// ```
#[macro_export]
macro_rules! parse_err {
    ($s:literal $(, $exps:expr)* $(,)?) => {
        $crate::ParseError {
            msg: format!($s $(, $exps)*),
        }
    };
}

#[test]
fn test_error_conversion() {
    let exerr: ExError = EvalError::DivisionByZero.into();
    assert_eq!(format!("{}", exerr), "division by zero");
    assert!(exerr.source().is_some());
    let exerr: ExError = parse_err!("what is {}", 'x').into();
    assert_eq!(exerr, ExError::Parse(ParseError::new("what is x")));
}
