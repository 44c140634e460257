//! TOML transcoding: convert CFL values to TOML text.
//!
//! Mapping from CFL to TOML:
//!   - Value::Integer       -> TOML integer (if fits in i64, otherwise error)
//!   - Value::Float         -> TOML float
//!   - Value::String        -> TOML string
//!   - Value::Array         -> TOML array (mixed element types allowed)
//!   - Value::Table         -> TOML table; an inline table inside arrays
//!
//! Lossy edges:
//!   - TOML integers are i64; big integers that overflow will error.
//!   - TOML requires the top-level value to be a table.

use num_traits::ToPrimitive;
use toml_edit::DocumentMut;

use crate::value::Value;

/// Encode a CFL Value as a TOML string.
pub fn encode(value: &Value) -> Result<String, String> {
    match value {
        Value::Table(_) => match value_to_toml(value)? {
            toml_edit::Item::Table(table) => {
                let mut doc = DocumentMut::new();
                for (key, item) in table.iter() {
                    doc[key] = item.clone();
                }
                Ok(doc.to_string())
            }
            _ => Err("Internal error: expected table".to_string()),
        },
        _ => Err("TOML requires the top-level value to be a table".to_string()),
    }
}

fn value_to_toml(value: &Value) -> Result<toml_edit::Item, String> {
    match value {
        Value::Table(table) => {
            let mut out = toml_edit::Table::new();
            for (k, v) in table {
                out.insert(k, value_to_toml(v)?);
            }
            Ok(toml_edit::Item::Table(out))
        }
        other => Ok(toml_edit::Item::Value(value_to_inline(other)?)),
    }
}

fn value_to_inline(value: &Value) -> Result<toml_edit::Value, String> {
    match value {
        Value::Integer(n) => {
            let i = n
                .to_i64()
                .ok_or_else(|| format!("Integer {} too large for TOML (i64)", n))?;
            Ok(toml_edit::Value::Integer(toml_edit::Formatted::new(i)))
        }
        Value::Float(f) => Ok(toml_edit::Value::Float(toml_edit::Formatted::new(*f))),
        Value::String(s) => Ok(toml_edit::Value::String(toml_edit::Formatted::new(
            s.clone(),
        ))),
        Value::Array(arr) => {
            let mut toml_arr = toml_edit::Array::new();
            for v in arr {
                toml_arr.push(value_to_inline(v)?);
            }
            Ok(toml_edit::Value::Array(toml_arr))
        }
        Value::Table(table) => {
            let mut inline = toml_edit::InlineTable::new();
            for (k, v) in table {
                inline.insert(k.as_str(), value_to_inline(v)?);
            }
            Ok(toml_edit::Value::InlineTable(inline))
        }
    }
}
