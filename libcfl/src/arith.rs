//! Two-operand arithmetic for `$[OP A B]` expressions.

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::error::ValueError;
use crate::value::Number;

/// An arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// Parse an operator symbol.
    pub fn from_symbol(s: &str) -> Option<Op> {
        match s {
            "+" => Some(Op::Add),
            "-" => Some(Op::Sub),
            "*" => Some(Op::Mul),
            "/" => Some(Op::Div),
            _ => None,
        }
    }
}

/// Apply `op` to two numbers.
///
/// Integers stay integers under `+`, `-` and `*`. Division is true division
/// and yields an integer only when it is exact. A float operand makes the
/// result a float.
pub fn apply(op: Op, lhs: &Number, rhs: &Number) -> Result<Number, ValueError> {
    if op == Op::Div && rhs.is_zero() {
        return Err(ValueError::DivisionByZero);
    }
    match (lhs, rhs) {
        (Number::Integer(a), Number::Integer(b)) => Ok(integer_op(op, a, b)),
        _ => {
            let (a, b) = (lhs.to_f64(), rhs.to_f64());
            Ok(Number::Float(match op {
                Op::Add => a + b,
                Op::Sub => a - b,
                Op::Mul => a * b,
                Op::Div => a / b,
            }))
        }
    }
}

fn integer_op(op: Op, a: &BigInt, b: &BigInt) -> Number {
    match op {
        Op::Add => Number::Integer(a + b),
        Op::Sub => Number::Integer(a - b),
        Op::Mul => Number::Integer(a * b),
        Op::Div => {
            if (a % b).is_zero() {
                Number::Integer(a / b)
            } else {
                let (a, b) = (a.to_f64(), b.to_f64());
                Number::Float(a.unwrap_or(f64::NAN) / b.unwrap_or(f64::NAN))
            }
        }
    }
}
