//! CFL value representation.

use indexmap::IndexMap;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use std::fmt;

/// An ordered mapping from key to value. Keys keep the position of their
/// first assignment.
pub type Table = IndexMap<String, Value>;

/// A numeric value, as held by constants and produced by arithmetic.
#[derive(Clone, PartialEq)]
pub enum Number {
    /// Arbitrary-precision integer.
    Integer(BigInt),
    /// 64-bit floating-point number.
    Float(f64),
}

impl Number {
    /// The value as a float, for mixed-type arithmetic.
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Integer(n) => n.to_f64().unwrap_or(f64::NAN),
            Number::Float(f) => *f,
        }
    }

    /// Returns `true` if this number is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(n) => n.is_zero(),
            Number::Float(f) => *f == 0.0,
        }
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{:?}", n),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Integer(BigInt::from(n))
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::Integer(BigInt::from(n))
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

/// A resolved CFL value.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// Arbitrary-precision integer.
    Integer(BigInt),
    /// 64-bit floating-point number.
    Float(f64),
    /// Opaque text that is neither a number nor a reference.
    String(String),
    /// Ordered sequence; elements may themselves be arrays.
    Array(Vec<Value>),
    /// Nested block.
    Table(Table),
}

impl Value {
    /// Returns a reference to the table if this is a `Table`.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{:?}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(arr) => f.debug_list().entries(arr).finish(),
            Value::Table(t) => f.debug_map().entries(t).finish(),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Integer(i) => Value::Integer(i),
            Number::Float(f) => Value::Float(f),
        }
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::Integer(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Value::Table(t)
    }
}
