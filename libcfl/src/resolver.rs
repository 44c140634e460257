//! Value resolution: turns the raw text after `NAME :` into a [`Value`].
//!
//! Precedence, first match wins:
//!
//! 1. `$[OP A B]` arithmetic over constants and numeric literals.
//! 2. `#( ... )` arrays, whose elements go through this same resolution and
//!    may nest to any depth.
//! 3. The exact name of a known constant.
//! 4. Numeric coercion, falling back to an opaque string.

use indexmap::IndexMap;

use crate::arith::{self, Op};
use crate::error::ValueError;
use crate::lexer::is_identifier;
use crate::number::{coerce, parse_number};
use crate::value::{Number, Value};

/// Constants declared so far in one document, in declaration order.
pub type Constants = IndexMap<String, Number>;

/// Resolves value text against the constants declared so far.
#[derive(Debug)]
pub struct Resolver {
    constants: Constants,
    strict_references: bool,
    max_depth: usize,
}

type Step<'a, T> = Result<(T, &'a str), ValueError>;

impl Resolver {
    /// Create a resolver with an empty constant table. Arrays may nest at
    /// most `max_depth` levels.
    pub fn new(strict_references: bool, max_depth: usize) -> Self {
        Self {
            constants: Constants::new(),
            strict_references,
            max_depth,
        }
    }

    /// Declare (or redeclare) a constant. Returns the previous value if the
    /// name was already bound.
    pub fn declare(&mut self, name: &str, value: Number) -> Option<Number> {
        self.constants.insert(name.to_string(), value)
    }

    /// The constant table.
    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    /// Give up the constant table.
    pub fn into_constants(self) -> Constants {
        self.constants
    }

    /// Resolve the value text of a key-value line.
    pub fn resolve(&self, text: &str) -> Result<Value, ValueError> {
        let text = text.trim();
        if text.starts_with("$[") {
            let (n, rest) = self.arithmetic(text)?;
            expect_end(rest, "arithmetic expression")?;
            return Ok(n.into());
        }
        if text.starts_with("#(") {
            let (items, rest) = self.array(text, 1)?;
            expect_end(rest, "array literal")?;
            return Ok(Value::Array(items));
        }
        self.scalar(text)
    }

    /// A constant reference, an unknown identifier, or a coerced literal.
    fn scalar(&self, text: &str) -> Result<Value, ValueError> {
        if let Some(n) = self.constants.get(text) {
            return Ok(n.clone().into());
        }
        if self.strict_references && is_identifier(text) {
            return Err(ValueError::UnresolvedReference(text.to_string()));
        }
        Ok(coerce(text))
    }

    /// Parse `$[OP A B]` at the start of `src`.
    fn arithmetic<'a>(&self, src: &'a str) -> Step<'a, Number> {
        let end = match src.find(']') {
            Some(end) => end,
            None => return Err(ValueError::MalformedExpression(src.to_string())),
        };
        let expr = &src[..=end];
        let malformed = || ValueError::MalformedExpression(expr.to_string());
        let body = &src[2..end];
        let mut parts = body.split_whitespace();
        let (op, lhs, rhs) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(op), Some(lhs), Some(rhs), None) => (op, lhs, rhs),
            _ => return Err(malformed()),
        };
        let op = Op::from_symbol(op).ok_or_else(malformed)?;
        let lhs = self.operand(lhs)?;
        let rhs = self.operand(rhs)?;
        Ok((arith::apply(op, &lhs, &rhs)?, &src[end + 1..]))
    }

    fn operand(&self, token: &str) -> Result<Number, ValueError> {
        if let Some(n) = self.constants.get(token) {
            return Ok(n.clone());
        }
        parse_number(token).ok_or_else(|| ValueError::UnresolvedReference(token.to_string()))
    }

    /// Parse `#( ... )` at the start of `src`, returning the elements and the
    /// text after the closing parenthesis. `depth` counts this array.
    fn array<'a>(&self, src: &'a str, depth: usize) -> Step<'a, Vec<Value>> {
        if depth > self.max_depth {
            return Err(ValueError::NestingTooDeep(self.max_depth));
        }
        let mut rest = &src[2..];
        let mut items = Vec::new();
        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                return Err(ValueError::UnterminatedArray);
            }
            if let Some(after) = rest.strip_prefix(')') {
                return Ok((items, after));
            }
            if rest.starts_with("#(") {
                let (nested, after) = self.array(rest, depth + 1)?;
                items.push(Value::Array(nested));
                rest = after;
            } else if rest.starts_with("$[") {
                let (n, after) = self.arithmetic(rest)?;
                items.push(n.into());
                rest = after;
            } else {
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == ')')
                    .unwrap_or(rest.len());
                items.push(self.scalar(&rest[..end])?);
                rest = &rest[end..];
            }
        }
    }
}

fn expect_end(rest: &str, what: &'static str) -> Result<(), ValueError> {
    let rest = rest.trim();
    if rest.is_empty() {
        Ok(())
    } else {
        Err(ValueError::TrailingContent(what, rest.to_string()))
    }
}
