//! YAML transcoding: convert between CFL values and YAML text.
//!
//! Values are serialized straight through serde rather than via
//! `serde_yaml::Value`, whose numbers stop at 64 bits.
//!
//! Mapping from CFL to YAML:
//!   - Value::Integer   -> YAML integer (as a string if it exceeds i128/u128)
//!   - Value::Float     -> YAML float (including .nan, .inf, -.inf)
//!   - Value::String    -> YAML string
//!   - Value::Array     -> YAML sequence
//!   - Value::Table     -> YAML mapping, keys in document order
//!
//! Mapping from YAML to CFL (used to check round trips):
//!   - YAML integer     -> Value::Integer
//!   - YAML float       -> Value::Float
//!   - YAML string      -> Value::String
//!   - YAML sequence    -> Value::Array
//!   - YAML mapping     -> Value::Table (string keys only)
//!   - anything else    -> error (CFL has no null, bool or tags)

use std::fmt;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::value::{Table, Value};

/// Decode a YAML string into a CFL Value.
pub fn decode(input: &str) -> Result<Value, String> {
    let Decoded(value) =
        serde_yaml::from_str(input).map_err(|e| format!("YAML parse error: {}", e))?;
    Ok(value)
}

/// Encode a CFL Value as a YAML string.
pub fn encode(value: &Value) -> Result<String, String> {
    serde_yaml::to_string(&Encoded(value)).map_err(|e| format!("YAML encode error: {}", e))
}

struct Encoded<'a>(&'a Value);

impl Serialize for Encoded<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Integer(n) => {
                if let Some(i) = n.to_i64() {
                    serializer.serialize_i64(i)
                } else if let Some(i) = n.to_i128() {
                    serializer.serialize_i128(i)
                } else if let Some(u) = n.to_u128() {
                    serializer.serialize_u128(u)
                } else {
                    serializer.serialize_str(&n.to_string())
                }
            }
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => serializer.collect_seq(items.iter().map(Encoded)),
            Value::Table(table) => {
                serializer.collect_map(table.iter().map(|(k, v)| (k, Encoded(v))))
            }
        }
    }
}

struct Decoded(Value);

impl<'de> Deserialize<'de> for Decoded {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor).map(Decoded)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, string, sequence or mapping")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Integer(BigInt::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Integer(BigInt::from(v)))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Value, E> {
        Ok(Value::Integer(BigInt::from(v)))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Value, E> {
        Ok(Value::Integer(BigInt::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(Decoded(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut table = Table::new();
        while let Some((key, Decoded(value))) = map.next_entry::<String, Decoded>()? {
            table.insert(key, value);
        }
        Ok(Value::Table(table))
    }
}
