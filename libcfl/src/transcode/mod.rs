//! Serializers for the merged document.

pub mod cbor;
pub mod json;
pub mod toml;
pub mod yaml;

use crate::value::Value;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
    Toml,
    Cbor,
}

impl Format {
    /// Look up a format by name.
    pub fn from_name(s: &str) -> Option<Format> {
        match s {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            "cbor" => Some(Format::Cbor),
            _ => None,
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Toml => "toml",
            Format::Cbor => "cbor",
        }
    }

    /// Whether the output is binary rather than text.
    pub fn is_binary(self) -> bool {
        matches!(self, Format::Cbor)
    }
}

/// Encode a value in the given format.
pub fn encode(value: &Value, format: Format) -> Result<Vec<u8>, String> {
    match format {
        Format::Yaml => yaml::encode(value).map(String::into_bytes),
        Format::Json => json::encode(value).map(String::into_bytes),
        Format::Toml => toml::encode(value).map(String::into_bytes),
        Format::Cbor => cbor::encode(value),
    }
}
