use crate::definitions::{MAX_DEPTH, N_NODES_ON_STACK, N_OPS_ON_STACK, N_TOKENS_ON_STACK};
use crate::expression::ExpressionNode;
use crate::operators::Operator;
use crate::{parse_err, DataType, ParseError};
use lazy_static::lazy_static;
use regex::Regex;
use smallvec::SmallVec;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Paren {
    Open,
    Close,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ParsedToken<T> {
    Num(T),
    Paren(Paren),
    Op(Operator),
}

/// Entries of the operator stack
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Pending {
    Op(Operator),
    OpenParen,
}

type ParsedTokenVec<T> = SmallVec<[ParsedToken<T>; N_TOKENS_ON_STACK]>;

/// Finished sub-tree together with its number of levels
#[derive(Debug)]
struct Operand<T> {
    node: ExpressionNode<T>,
    depth: usize,
}

type OperandStack<T> = SmallVec<[Operand<T>; N_NODES_ON_STACK]>;
type OperatorStack = SmallVec<[Pending; N_OPS_ON_STACK]>;

/// Returns the maximal run of digits and dots at the beginning of `text` if it starts
/// with a digit. Whether the run is a valid number is decided later.
pub fn is_numeric_text(text: &str) -> Option<&str> {
    lazy_static! {
        static ref RE_NUMBER: Regex = Regex::new(r"^[0-9][0-9.]*").unwrap();
    }
    RE_NUMBER.find(text).map(|m| m.as_str())
}

fn parse_number<T: DataType>(num_str: &str) -> Result<T, ParseError> {
    if num_str.chars().filter(|c| *c == '.').count() > 1 {
        return Err(parse_err!("malformed number literal {}", num_str));
    }
    let number = num_str
        .parse::<T>()
        .map_err(|_| parse_err!("could not convert {} to a number", num_str))?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(parse_err!("number literal {} is too large", num_str))
    }
}

/// Splits a text into numbers, parentheses, and operators.
///
/// # Errors
///
/// Non-ascii input, malformed number literals like `1.2.3`, and characters that
/// cannot start a token.
///
pub fn tokenize<T: DataType>(text: &str) -> Result<ParsedTokenVec<T>, ParseError> {
    // Make sure that the text does not contain unicode characters
    if text.chars().any(|c| !c.is_ascii()) {
        return Err(ParseError::new("only ascii characters are supported"));
    };

    let mut res = ParsedTokenVec::new();
    let mut cur_offset = 0usize;
    while cur_offset < text.len() {
        let text_rest = &text[cur_offset..];
        // ascii, hence one byte per char
        let c = text.as_bytes()[cur_offset] as char;
        if c.is_ascii_whitespace() {
            cur_offset += 1;
            continue;
        }
        let next_parsed_token = if c == '(' {
            cur_offset += 1;
            ParsedToken::Paren(Paren::Open)
        } else if c == ')' {
            cur_offset += 1;
            ParsedToken::Paren(Paren::Close)
        } else if let Some(num_str) = is_numeric_text(text_rest) {
            cur_offset += num_str.len();
            ParsedToken::Num(parse_number(num_str)?)
        } else if let Some(op) = Operator::from_repr(c) {
            cur_offset += 1;
            ParsedToken::Op(op)
        } else {
            return Err(parse_err!("how to parse the beginning of {}", text_rest));
        };
        res.push(next_parsed_token);
    }
    Ok(res)
}

struct PairPreCondition<T> {
    apply: fn(&ParsedToken<T>, &ParsedToken<T>) -> bool,
    error_msg: &'static str,
}

fn make_pair_pre_conditions<T>() -> [PairPreCondition<T>; 7] {
    [
        PairPreCondition {
            apply: |left, right| {
                !matches!((left, right), (ParsedToken::Num(_), ParsedToken::Num(_)))
            },
            error_msg: "a number cannot be next to a number",
        },
        PairPreCondition {
            apply: |left, right| {
                !matches!(
                    (left, right),
                    (ParsedToken::Paren(Paren::Close), ParsedToken::Num(_))
                        | (ParsedToken::Num(_), ParsedToken::Paren(Paren::Open))
                )
            },
            error_msg: "wlog a number cannot be on the right of a closing parenthesis",
        },
        PairPreCondition {
            apply: |left, right| {
                !matches!(
                    (left, right),
                    (ParsedToken::Paren(Paren::Close), ParsedToken::Paren(Paren::Open))
                )
            },
            error_msg: "an opening paren cannot be on the right of a closing paren",
        },
        PairPreCondition {
            apply: |left, right| {
                !matches!((left, right), (ParsedToken::Op(_), ParsedToken::Op(_)))
            },
            error_msg: "a binary operator cannot be next to a binary operator",
        },
        PairPreCondition {
            apply: |left, right| {
                !matches!(
                    (left, right),
                    (ParsedToken::Op(_), ParsedToken::Paren(Paren::Close))
                )
            },
            error_msg: "an operator cannot be on the left of a closing paren",
        },
        PairPreCondition {
            apply: |left, right| {
                !matches!(
                    (left, right),
                    (ParsedToken::Paren(Paren::Open), ParsedToken::Op(_))
                )
            },
            error_msg: "a binary operator cannot be on the right of an opening paren",
        },
        PairPreCondition {
            apply: |left, right| {
                !matches!(
                    (left, right),
                    (ParsedToken::Paren(Paren::Open), ParsedToken::Paren(Paren::Close))
                )
            },
            error_msg: "wlog an opening paren cannot be next to a closing paren",
        },
    ]
}

/// Tries to give useful error messages for invalid constellations of the parsed tokens
///
/// # Errors
///
/// Empty token lists, invalid neighbors, operators at the borders, and parentheses
/// that do not match.
///
pub fn check_parsed_token_preconditions<T>(
    parsed_tokens: &[ParsedToken<T>],
) -> Result<(), ParseError> {
    let (first, last) = match (parsed_tokens.first(), parsed_tokens.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ParseError::new("cannot parse empty string")),
    };

    let pair_pre_conditions = make_pair_pre_conditions::<T>();
    for pair in parsed_tokens.windows(2) {
        let failed = pair_pre_conditions
            .iter()
            .find(|ppc| !(ppc.apply)(&pair[0], &pair[1]));
        if let Some(failed_ppc) = failed {
            return Err(ParseError::new(failed_ppc.error_msg));
        }
    }

    let mut open_paren_cnt = 0i32;
    for (i, token) in parsed_tokens.iter().enumerate() {
        if let ParsedToken::Paren(p) = token {
            open_paren_cnt += match p {
                Paren::Close => -1,
                Paren::Open => 1,
            };
            if open_paren_cnt < 0 {
                return Err(parse_err!(
                    "too many closing parentheses until position {}",
                    i
                ));
            }
        }
    }
    if open_paren_cnt != 0 {
        Err(ParseError::new("parentheses mismatch"))
    } else if let ParsedToken::Op(op) = first {
        Err(parse_err!(
            "the first element cannot be an operator, found {}",
            op
        ))
    } else if let ParsedToken::Op(op) = last {
        Err(parse_err!(
            "the last element cannot be an operator, found {}",
            op
        ))
    } else {
        Ok(())
    }
}

/// Pops the right and then the left operand and pushes their combination.
///
/// # Errors
///
/// Missing operands and trees with more than `MAX_DEPTH` levels. Evaluating, displaying,
/// and dropping recurse once per level, so deeper trees are not built.
///
fn fold<T: DataType>(
    operands: &mut OperandStack<T>,
    operator: Operator,
) -> Result<(), ParseError> {
    let right = operands.pop();
    let left = operands.pop();
    match (left, right) {
        (Some(left), Some(right)) => {
            let depth = 1 + left.depth.max(right.depth);
            if depth > MAX_DEPTH {
                return Err(parse_err!(
                    "expression is nested deeper than {} levels",
                    MAX_DEPTH
                ));
            }
            operands.push(Operand {
                node: ExpressionNode::binary(operator, left.node, right.node),
                depth,
            });
            Ok(())
        }
        _ => Err(parse_err!("operator {} is missing an operand", operator)),
    }
}

/// Builds the tree with an operand stack of finished sub-trees and an operator stack of
/// pending operators and opening parentheses.
fn make_expression<T: DataType>(
    parsed_tokens: &[ParsedToken<T>],
) -> Result<ExpressionNode<T>, ParseError> {
    let mut operands = OperandStack::<T>::new();
    let mut operators = OperatorStack::new();

    for token in parsed_tokens {
        match token {
            ParsedToken::Num(n) => operands.push(Operand {
                node: ExpressionNode::from_num(*n),
                depth: 1,
            }),
            ParsedToken::Paren(Paren::Open) => operators.push(Pending::OpenParen),
            ParsedToken::Paren(Paren::Close) => loop {
                match operators.pop() {
                    Some(Pending::Op(op)) => fold(&mut operands, op)?,
                    Some(Pending::OpenParen) => break,
                    None => return Err(ParseError::new("unmatched closing parenthesis")),
                }
            },
            ParsedToken::Op(op) => {
                // equal priorities fold the pending operator first, i.e., left associativity
                while let Some(Pending::Op(pending)) = operators.last().copied() {
                    if pending.prio() < op.prio() {
                        break;
                    }
                    operators.pop();
                    fold(&mut operands, pending)?;
                }
                operators.push(Pending::Op(*op));
            }
        }
    }
    while let Some(pending) = operators.pop() {
        match pending {
            Pending::Op(op) => fold(&mut operands, op)?,
            Pending::OpenParen => {
                return Err(ParseError::new("unmatched opening parenthesis"));
            }
        }
    }

    let n_operands = operands.len();
    match operands.pop() {
        Some(root) if n_operands == 1 => Ok(root.node),
        _ => Err(parse_err!(
            "unbalanced expression, {} operands remain after folding",
            n_operands
        )),
    }
}

/// Parses a line of infix arithmetic into an evaluation tree. Whitespace is ignored,
/// `*` and `/` bind tighter than `+` and `-`, and operators of equal priority are
/// left-associative.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// let tree = treecalc::parse::<f64>("(2 + 3) * 4")?;
/// assert_eq!(treecalc::evaluate(&tree)?, 20.0);
/// #
/// #     Ok(())
/// # }
/// ```
///
/// # Errors
///
/// A [`ParseError`](ParseError) for empty input, characters other than digits,
/// dots, operators, parentheses, and whitespace, malformed numbers, unmatched
/// parentheses, and operators without operands.
///
pub fn parse<T: DataType>(text: &str) -> Result<ExpressionNode<T>, ParseError> {
    let parsed_tokens = tokenize::<T>(text)?;
    check_parsed_token_preconditions(&parsed_tokens)?;
    make_expression(&parsed_tokens)
}

#[cfg(test)]
use crate::util::assert_close;

#[test]
fn test_is_numeric() {
    assert_eq!(is_numeric_text("5/6").unwrap(), "5");
    assert!(is_numeric_text(".").is_none());
    assert!(is_numeric_text(".4").is_none());
    assert!(is_numeric_text("o.4").is_none());
    assert_eq!(is_numeric_text("6").unwrap(), "6");
    assert_eq!(is_numeric_text("4.").unwrap(), "4.");
    assert_eq!(is_numeric_text("23.414+1").unwrap(), "23.414");
    assert_eq!(is_numeric_text("1.2.3").unwrap(), "1.2.3");
}

#[test]
fn test_tokenize() {
    let tokens = tokenize::<f64>(" 12.5*( 3-\t4)").unwrap();
    assert_eq!(
        tokens.as_slice(),
        &[
            ParsedToken::Num(12.5),
            ParsedToken::Op(Operator::Mul),
            ParsedToken::Paren(Paren::Open),
            ParsedToken::Num(3.0),
            ParsedToken::Op(Operator::Sub),
            ParsedToken::Num(4.0),
            ParsedToken::Paren(Paren::Close),
        ]
    );
    assert!(tokenize::<f64>("   ").unwrap().is_empty());
    assert!(tokenize::<f64>(r"5\6").is_err());
    assert!(tokenize::<f64>("ӭ").is_err());
}

#[test]
fn test_left_associative() {
    let tree = parse::<f64>("8 - 4 - 2").unwrap();
    match &tree {
        ExpressionNode::BinaryOp {
            operator, right, ..
        } => {
            assert_eq!(*operator, Operator::Sub);
            assert_eq!(**right, ExpressionNode::from_num(2.0));
        }
        _ => unreachable!(),
    }
    assert_close(tree.eval().unwrap(), 2.0);
    assert_close(parse::<f64>("16 / 4 / 2").unwrap().eval().unwrap(), 2.0);
    assert_close(parse::<f64>("2 * 6 / 3 * 2").unwrap().eval().unwrap(), 8.0);
}

#[test]
fn test_make_expression_stack_failures() {
    // token lists that bypass the pre-condition check
    let unmatched = [
        ParsedToken::Num(1.0),
        ParsedToken::Paren(Paren::Close),
    ];
    assert!(make_expression(&unmatched).unwrap_err().msg.contains("unmatched closing"));
    let unmatched = [ParsedToken::Paren(Paren::Open), ParsedToken::Num(1.0)];
    assert!(make_expression(&unmatched).unwrap_err().msg.contains("unmatched opening"));
    let missing = [ParsedToken::Op(Operator::Add), ParsedToken::Num(3.0)];
    assert!(make_expression(&missing).unwrap_err().msg.contains("missing an operand"));
    let too_many = [ParsedToken::Num(3.0), ParsedToken::Num(4.0)];
    assert!(make_expression(&too_many).unwrap_err().msg.contains("unbalanced"));
    assert!(make_expression::<f64>(&[]).is_err());
}

#[test]
fn test_depth_limit() {
    // n terms chained by one operator give n levels
    let chain = |n_terms: usize| vec!["1"; n_terms].join("+");
    let tree = parse::<f64>(&chain(MAX_DEPTH)).unwrap();
    assert_close(tree.eval().unwrap(), MAX_DEPTH as f64);
    assert!(parse::<f64>(&chain(MAX_DEPTH + 1))
        .unwrap_err()
        .msg
        .contains("nested deeper than"));
    assert!(parse::<f64>(&chain(200_000)).is_err());

    let nested = format!("{}1{}", "(1-".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
    assert!(parse::<f64>(&nested).is_err());
    // parentheses alone do not add levels
    let parens = format!("{}2{}", "(".repeat(5000), ")".repeat(5000));
    assert_eq!(parse::<f64>(&parens).unwrap(), ExpressionNode::from_num(2.0));
}

#[test]
fn test_preconditions() {
    fn test(text: &str, msg_part: &str) {
        match parse::<f64>(text) {
            Ok(tree) => {
                println!("expected an error that should contain '{}', got {}", msg_part, tree);
                assert!(false)
            }
            Err(e) => {
                println!("msg '{}' should contain '{}'", e.msg, msg_part);
                assert!(e.msg.contains(msg_part));
            }
        }
    }
    test("", "empty string");
    test(" \t ", "empty string");
    test("++", "binary operator cannot be next to a binary operator");
    test("3 4", "number cannot be next to a number");
    test("2 (1)", "wlog a number cannot be on the right of a closing parenthesis");
    test("(1) 2", "wlog a number cannot be on the right of a closing parenthesis");
    test("(1)(2)", "opening paren cannot be on the right of a closing paren");
    test("(1+)", "operator cannot be on the left of a closing");
    test("(*2)", "binary operator cannot be on the right of an opening paren");
    test("12-()+3", "wlog an opening paren");
    test(")+12-(1+1", "closing parentheses until position 0");
    test("12-(3-4)*2+ (1/2))", "closing parentheses until");
    test("12-(3-4)*2+ ((1/2)", "parentheses mismatch");
    test("+ 3", "first element cannot be an operator");
    test("3 -", "last element cannot be an operator");
    test(r"5\6", r"how to parse the beginning of \6");
    test(".5 + 1", "how to parse the beginning of .5");
    test("2 $ 3", "how to parse the beginning of $ 3");
    test("1.2.3", "malformed number literal 1.2.3");
    test("3 + x", "how to parse the beginning of x");
    test(&format!("1{} + 1", "0".repeat(400)), "is too large");
}

#[test]
fn test_large_literals() {
    let f32_max_digits = format!("1{}", "0".repeat(38));
    assert!(parse::<f64>(&f32_max_digits).is_ok());
    assert!(parse::<f32>(&format!("1{}", "0".repeat(39))).is_err());
    assert!(parse::<f64>(&format!("1{}.5", "0".repeat(308))).is_ok());
    assert!(parse::<f64>(&format!("1{}", "0".repeat(309))).is_err());
}
