//! JSON transcoding: convert CFL values to JSON text.
//!
//! Integers outside the i64/u64 range and non-finite floats have no JSON
//! representation and are rejected.

use num_traits::ToPrimitive;

use crate::value::Value;

/// Encode a CFL Value as pretty-printed JSON.
pub fn encode(value: &Value) -> Result<String, String> {
    let json = value_to_json(value)?;
    let mut text =
        serde_json::to_string_pretty(&json).map_err(|e| format!("JSON encode error: {}", e))?;
    text.push('\n');
    Ok(text)
}

fn value_to_json(value: &Value) -> Result<serde_json::Value, String> {
    match value {
        Value::Integer(n) => {
            if let Some(i) = n.to_i64() {
                Ok(serde_json::Value::from(i))
            } else if let Some(u) = n.to_u64() {
                Ok(serde_json::Value::from(u))
            } else {
                Err(format!("Integer {} too large for JSON", n))
            }
        }
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or_else(|| format!("JSON cannot represent {}", f)),
        Value::String(s) => Ok(serde_json::Value::String(s.clone())),
        Value::Array(arr) => {
            let items: Result<Vec<serde_json::Value>, String> =
                arr.iter().map(value_to_json).collect();
            Ok(serde_json::Value::Array(items?))
        }
        Value::Table(table) => {
            let mut map = serde_json::Map::new();
            for (k, v) in table {
                map.insert(k.clone(), value_to_json(v)?);
            }
            Ok(serde_json::Value::Object(map))
        }
    }
}
