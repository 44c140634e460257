//! Error and warning types for CFL parsing.

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type for CFL parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying filename for error reporting.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub filename: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
        }
    }

    /// Build a location for a one-based line number and its trimmed text.
    pub fn locate(&self, line: usize, text: &str) -> Location {
        Location {
            filename: self.filename.clone(),
            line,
            text: text.to_string(),
        }
    }
}

/// Where in the source a diagnostic points: one-based line number plus the
/// trimmed text of that line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub filename: Option<String>,
    pub line: usize,
    pub text: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(name) => write!(f, "{}:{}", name, self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}

/// Failure while resolving the value text of a single line.
///
/// These carry no location; the block parser wraps them in
/// [`ParseError::Value`] together with the offending line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// An identifier that names no constant declared so far.
    #[error("Unknown constant \"{0}\"")]
    UnresolvedReference(String),

    /// Division by zero inside `$[/ A B]`.
    #[error("Division by zero")]
    DivisionByZero,

    /// A `$[` expression that is not `$[OP A B]`.
    #[error("Malformed arithmetic expression \"{0}\"")]
    MalformedExpression(String),

    /// Arrays nested deeper than the configured limit.
    #[error("Arrays nested deeper than {0}")]
    NestingTooDeep(usize),

    /// A `#(` with no matching `)`.
    #[error("Unterminated array literal")]
    UnterminatedArray,

    /// Text left over after a complete array or arithmetic expression.
    #[error("Unexpected content after {0}: \"{1}\"")]
    TrailingContent(&'static str, String),
}

/// Error type for CFL parsing. Any of these aborts the whole parse.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The input path does not exist.
    #[error("The file '{0}' does not exist.")]
    InputNotFound(String),

    /// The input exists but could not be read.
    #[error("Cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A constant declaration whose literal is not a number.
    #[error("{location}: Invalid number \"{literal}\" in constant declaration")]
    InvalidConstant { location: Location, literal: String },

    /// A `}` with no open block.
    #[error("{location}: Unmatched closing brace")]
    UnmatchedClose { location: Location },

    /// End of input reached inside a block.
    #[error("{location}: Block \"{name}\" is never closed")]
    UnterminatedBlock { location: Location, name: String },

    /// Blocks nested deeper than the configured limit.
    #[error("{location}: Blocks nested deeper than {max}")]
    NestingTooDeep { location: Location, max: usize },

    /// A value that failed to resolve.
    #[error("{location}: {source}")]
    Value {
        location: Location,
        #[source]
        source: ValueError,
    },

    /// A constant and a top-level key share a name in the merged output.
    #[error("Constant \"{0}\" collides with a top-level key of the same name")]
    NameCollision(String),
}

impl ParseError {
    /// The source location of this error, if it has one.
    pub fn location(&self) -> Option<&Location> {
        match self {
            ParseError::InvalidConstant { location, .. }
            | ParseError::UnmatchedClose { location }
            | ParseError::UnterminatedBlock { location, .. }
            | ParseError::NestingTooDeep { location, .. }
            | ParseError::Value { location, .. } => Some(location),
            ParseError::InputNotFound(_) | ParseError::Io { .. } | ParseError::NameCollision(_) => {
                None
            }
        }
    }
}

/// What a [`Warning`] is about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarningKind {
    /// The line matches none of the recognized line forms and was skipped.
    UnrecognizedLine,
    /// A constant was declared again; the new value replaces the old one.
    ConstantRedeclared(String),
    /// A key was assigned twice in the same block; the last value wins.
    DuplicateKey(String),
}

/// A recoverable diagnostic. Warnings never abort a parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    pub location: Location,
    pub kind: WarningKind,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::UnrecognizedLine => write!(
                f,
                "{}: warning: Unrecognized line ignored: {}",
                self.location, self.location.text
            ),
            WarningKind::ConstantRedeclared(name) => write!(
                f,
                "{}: warning: Constant \"{}\" redeclared",
                self.location, name
            ),
            WarningKind::DuplicateKey(name) => write!(
                f,
                "{}: warning: Key \"{}\" assigned more than once",
                self.location, name
            ),
        }
    }
}
