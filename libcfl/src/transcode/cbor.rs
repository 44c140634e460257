//! CBOR transcoding: convert CFL values to CBOR binary data.
//!
//! Mapping from CFL to CBOR:
//!   - Value::Integer -> CBOR integer (error outside -2^64 .. 2^64-1)
//!   - Value::Float   -> CBOR float
//!   - Value::String  -> CBOR text string
//!   - Value::Array   -> CBOR array
//!   - Value::Table   -> CBOR map with text string keys, in document order

use ciborium::value::{Integer, Value as CborValue};
use num_traits::ToPrimitive;

use crate::value::Value;

/// Encode a CFL Value as CBOR bytes.
pub fn encode(value: &Value) -> Result<Vec<u8>, String> {
    let cbor = value_to_cbor(value)?;
    let mut buf = Vec::new();
    ciborium::ser::into_writer(&cbor, &mut buf).map_err(|e| format!("CBOR encode error: {}", e))?;
    Ok(buf)
}

fn value_to_cbor(value: &Value) -> Result<CborValue, String> {
    match value {
        Value::Integer(n) => {
            let wide = n
                .to_i128()
                .ok_or_else(|| format!("Integer {} exceeds CBOR integer range", n))?;
            let int = Integer::try_from(wide)
                .map_err(|_| format!("Integer {} exceeds CBOR integer range", n))?;
            Ok(CborValue::Integer(int))
        }
        Value::Float(f) => Ok(CborValue::Float(*f)),
        Value::String(s) => Ok(CborValue::Text(s.clone())),
        Value::Array(arr) => {
            let items: Result<Vec<CborValue>, String> = arr.iter().map(value_to_cbor).collect();
            Ok(CborValue::Array(items?))
        }
        Value::Table(table) => {
            let mut pairs = Vec::with_capacity(table.len());
            for (k, v) in table {
                pairs.push((CborValue::Text(k.clone()), value_to_cbor(v)?));
            }
            Ok(CborValue::Map(pairs))
        }
    }
}
