//! The result of parsing one CFL document.

use crate::error::{ParseError, Result, Warning};
use crate::resolver::Constants;
use crate::value::{Table, Value};

/// A parsed document: the constants it declared, its key/block tree, and
/// any warnings raised while parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub constants: Constants,
    pub config: Table,
    pub warnings: Vec<Warning>,
}

impl Document {
    /// Merge constants and configuration into the single top-level mapping
    /// that gets serialized: constants first in declaration order, then the
    /// configuration entries.
    ///
    /// A constant and a top-level key with the same name is an error.
    pub fn merged(&self) -> Result<Table> {
        let mut out = Table::with_capacity(self.constants.len() + self.config.len());
        for (name, value) in &self.constants {
            out.insert(name.clone(), value.clone().into());
        }
        for (key, value) in &self.config {
            if out.contains_key(key) {
                return Err(ParseError::NameCollision(key.clone()));
            }
            out.insert(key.clone(), value.clone());
        }
        Ok(out)
    }

    /// [`Document::merged`] as a [`Value`].
    pub fn to_value(&self) -> Result<Value> {
        self.merged().map(Value::Table)
    }
}
