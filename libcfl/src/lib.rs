//! CFL configuration language parser.
//!
//! CFL is a line-oriented configuration language with numeric constants,
//! nested blocks, arrays and two-operand arithmetic:
//!
//! ```text
//! const BASE = 8000;
//!
//! SERVER : {
//!     PORT : $[+ BASE 80]
//!     HOSTS : #( alpha beta #( 1 2 ) )
//! }
//! ```
//!
//! # Parsing Pipeline
//!
//! 1. **Scanner**: Presents the source as a cursor over trimmed lines and
//!    tracks block nesting depth.
//!
//! 2. **Line Classifier**: Sorts each line into blank, comment, constant
//!    declaration, block opener, block closer, key-value pair, or
//!    unrecognized.
//!
//! 3. **Block Parser**: Recursively builds nested tables from the classified
//!    lines, handing each value to the resolver.
//!
//! 4. **Value Resolver**: Evaluates arithmetic, arrays, constant references
//!    and numeric literals into typed values.
//!
//! The resulting [`Document`] merges into one table that the
//! [`transcode`] module writes as YAML, JSON, TOML or CBOR.

mod arith;
mod document;
mod error;
mod lexer;
mod number;
mod options;
mod parser;
mod resolver;
mod scanner;
pub mod transcode;
mod value;

use std::fs;
use std::io;
use std::path::Path;

pub use arith::Op;
pub use document::Document;
pub use error::{Location, ParseError, Result, ValueError, Warning, WarningKind};
pub use lexer::is_identifier;
pub use number::coerce;
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use resolver::Constants;
pub use transcode::Format;
pub use value::{Number, Table, Value};

/// Parse a CFL document from a string.
///
/// # Example
///
/// ```
/// use libcfl::{parse, Value};
///
/// let doc = parse("const A = 10;\nX : $[* A 2]\n").unwrap();
/// assert_eq!(doc.config["X"], Value::from(20));
/// ```
pub fn parse(input: &str) -> Result<Document> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse a CFL document from a string with explicit options.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Document> {
    parser::parse_document(input, options)
}

/// Read and parse a CFL file. The file name is used in diagnostics unless
/// `options` already names one.
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Document> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let input = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ParseError::InputNotFound(name.clone()),
        _ => ParseError::Io {
            path: name.clone(),
            source,
        },
    })?;
    tracing::debug!(path = %name, bytes = input.len(), "read input");

    if options.filename.is_some() {
        return parse_with_options(&input, options);
    }
    let options = options.clone().with_filename(name);
    parse_with_options(&input, &options)
}
