//! Phase 3: Block Parser
//!
//! Recursive descent over classified lines. Each call to [`Parser::block`]
//! builds one table and returns when it sees the closing brace for the block
//! it was called for. All calls draw from one [`LineCursor`], so a nested
//! block picks up exactly where its opener was and hands the cursor back to
//! the parent on `}`.

use tracing::{debug, trace};

use crate::document::Document;
use crate::error::{Location, ParseContext, ParseError, Result, Warning, WarningKind};
use crate::lexer::{classify, LineKind};
use crate::number::{is_decimal_literal, parse_number};
use crate::options::ParseOptions;
use crate::resolver::Resolver;
use crate::scanner::{LineCursor, SourceLine};
use crate::value::{Table, Value};

/// Resolution context for one document: the shared cursor, the constants
/// declared so far, and the warnings collected on the way.
struct Parser<'a> {
    cursor: LineCursor<'a>,
    resolver: Resolver,
    ctx: ParseContext,
    max_depth: usize,
    warnings: Vec<Warning>,
}

/// The block a [`Parser::block`] call is filling in.
struct Opener<'a> {
    name: &'a str,
    location: Location,
}

/// Parse a whole document.
pub fn parse_document(source: &str, options: &ParseOptions) -> Result<Document> {
    let mut parser = Parser {
        cursor: LineCursor::new(source),
        resolver: Resolver::new(options.strict_references, options.max_depth),
        ctx: ParseContext::new(options.filename.as_deref()),
        max_depth: options.max_depth,
        warnings: Vec::new(),
    };
    let config = parser.block(None)?;
    debug!(
        constants = parser.resolver.constants().len(),
        keys = config.len(),
        warnings = parser.warnings.len(),
        "parsed document"
    );
    Ok(Document {
        constants: parser.resolver.into_constants(),
        config,
        warnings: parser.warnings,
    })
}

impl<'a> Parser<'a> {
    fn block(&mut self, opener: Option<Opener<'a>>) -> Result<Table> {
        let mut table = Table::new();

        while let Some(line) = self.cursor.next_line() {
            let kind = classify(line.text);
            trace!(line = line.number, ?kind, "classified");

            match kind {
                LineKind::Blank | LineKind::Comment => {}
                LineKind::Const { name, literal } => self.declare(&line, name, literal)?,
                LineKind::Open { name } => {
                    let location = self.ctx.locate(line.number, line.text);
                    if self.cursor.depth() >= self.max_depth {
                        return Err(ParseError::NestingTooDeep {
                            location,
                            max: self.max_depth,
                        });
                    }
                    self.cursor.enter();
                    debug!(block = name, depth = self.cursor.depth(), "open");
                    let nested = self.block(Some(Opener { name, location }))?;
                    self.insert(&mut table, &line, name, Value::Table(nested));
                }
                LineKind::Close => {
                    if opener.is_none() {
                        return Err(ParseError::UnmatchedClose {
                            location: self.ctx.locate(line.number, line.text),
                        });
                    }
                    debug!(depth = self.cursor.depth(), "close");
                    self.cursor.leave();
                    return Ok(table);
                }
                LineKind::KeyValue { key, value } => {
                    let value =
                        self.resolver
                            .resolve(value)
                            .map_err(|source| ParseError::Value {
                                location: self.ctx.locate(line.number, line.text),
                                source,
                            })?;
                    self.insert(&mut table, &line, key, value);
                }
                LineKind::Unrecognized => {
                    self.warn(&line, WarningKind::UnrecognizedLine);
                }
            }
        }

        match opener {
            None => Ok(table),
            Some(Opener { name, location }) => Err(ParseError::UnterminatedBlock {
                location,
                name: name.to_string(),
            }),
        }
    }

    fn declare(&mut self, line: &SourceLine<'a>, name: &str, literal: &str) -> Result<()> {
        let number = match parse_number(literal) {
            Some(n) if is_decimal_literal(literal) => n,
            _ => {
                return Err(ParseError::InvalidConstant {
                    location: self.ctx.locate(line.number, line.text),
                    literal: literal.to_string(),
                })
            }
        };
        debug!(constant = name, value = %number, "declare");
        if self.resolver.declare(name, number).is_some() {
            self.warn(line, WarningKind::ConstantRedeclared(name.to_string()));
        }
        Ok(())
    }

    fn insert(&mut self, table: &mut Table, line: &SourceLine<'a>, key: &str, value: Value) {
        if table.insert(key.to_string(), value).is_some() {
            self.warn(line, WarningKind::DuplicateKey(key.to_string()));
        }
    }

    fn warn(&mut self, line: &SourceLine<'a>, kind: WarningKind) {
        self.warnings.push(Warning {
            location: self.ctx.locate(line.number, line.text),
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;
    use crate::value::Number;

    fn parse(source: &str) -> Result<Document> {
        parse_document(source, &ParseOptions::default())
    }

    fn int(n: i64) -> Value {
        Value::from(n)
    }

    fn table(entries: Vec<(&str, Value)>) -> Value {
        Value::Table(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn test_sample_block() {
        let doc = parse(
            "
            const CONSTA = 10;
            const CONSTB = 5;

            SAMPLEDICT : {
                VALUEA : CONSTA
                VALUEB : $[+ CONSTA CONSTB]
                ARRAY : #( 1 2 3 )
            }
            ",
        )
        .unwrap();
        assert_eq!(
            Value::Table(doc.config),
            table(vec![(
                "SAMPLEDICT",
                table(vec![
                    ("VALUEA", int(10)),
                    ("VALUEB", int(15)),
                    ("ARRAY", Value::Array(vec![int(1), int(2), int(3)])),
                ])
            )])
        );
        assert_eq!(doc.constants.get("CONSTA"), Some(&Number::from(10)));
        assert_eq!(doc.constants.get("CONSTB"), Some(&Number::from(5)));
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_nested_blocks_see_outer_constants() {
        let doc = parse("const A = 10;\nOUTER : {\n  INNER : {\n    X : A\n  }\n}\n").unwrap();
        assert_eq!(
            Value::Table(doc.config),
            table(vec![(
                "OUTER",
                table(vec![("INNER", table(vec![("X", int(10))]))])
            )])
        );
    }

    #[test]
    fn test_parent_resumes_after_nested_block() {
        let doc = parse("A : {\n B : {\n  C : 1\n }\n D : 2\n}\nE : 3\n").unwrap();
        assert_eq!(
            Value::Table(doc.config),
            table(vec![
                (
                    "A",
                    table(vec![("B", table(vec![("C", int(1))])), ("D", int(2))])
                ),
                ("E", int(3)),
            ])
        );
    }

    #[test]
    fn test_constants_bind_in_order() {
        let strict = ParseOptions::default().with_strict_references(true);
        let err = parse_document("X : LATER\nconst LATER = 1;\n", &strict).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Value {
                source: ValueError::UnresolvedReference(ref name),
                ..
            } if name == "LATER"
        ));

        let doc = parse("X : LATER\nconst LATER = 1;\nY : LATER\n").unwrap();
        assert_eq!(doc.config.get("X"), Some(&Value::from("LATER")));
        assert_eq!(doc.config.get("Y"), Some(&int(1)));
    }

    #[test]
    fn test_constant_declared_in_block_stays_visible() {
        let doc = parse("A : {\n const N = 2;\n}\nB : N\n").unwrap();
        assert_eq!(doc.config.get("B"), Some(&int(2)));
        assert_eq!(doc.constants.get("N"), Some(&Number::from(2)));
    }

    #[test]
    fn test_constant_literals() {
        let doc = parse("const A = 2.0;\nconst B = 2.5;\nconst C = .5;\n").unwrap();
        assert_eq!(doc.constants.get("A"), Some(&Number::from(2)));
        assert_eq!(doc.constants.get("B"), Some(&Number::Float(2.5)));
        assert_eq!(doc.constants.get("C"), Some(&Number::Float(0.5)));

        let err = parse("const A = 1.2.3;").unwrap_err();
        assert!(matches!(err, ParseError::InvalidConstant { ref literal, .. } if literal == "1.2.3"));
    }

    #[test]
    fn test_redeclaration_overwrites_with_warning() {
        let doc = parse("const A = 1;\nX : A\nconst A = 2;\nY : A\n").unwrap();
        assert_eq!(doc.config.get("X"), Some(&int(1)));
        assert_eq!(doc.config.get("Y"), Some(&int(2)));
        assert_eq!(doc.warnings.len(), 1);
        assert_eq!(
            doc.warnings[0].kind,
            WarningKind::ConstantRedeclared("A".into())
        );
        assert_eq!(doc.warnings[0].location.line, 3);
    }

    #[test]
    fn test_unrecognized_lines_warn() {
        let doc = parse("A : 1\nthis is not valid\nB : 2\n").unwrap();
        assert_eq!(doc.config.len(), 2);
        assert_eq!(doc.warnings.len(), 1);
        assert_eq!(doc.warnings[0].kind, WarningKind::UnrecognizedLine);
        assert_eq!(doc.warnings[0].location.line, 2);
        assert_eq!(doc.warnings[0].location.text, "this is not valid");
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let doc = parse("A : 1\nB : 2\nA : 3\n").unwrap();
        let keys: Vec<&str> = doc.config.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(doc.config.get("A"), Some(&int(3)));
        assert_eq!(doc.warnings[0].kind, WarningKind::DuplicateKey("A".into()));
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse("OUTER : {\n  INNER : {\n  }\n").unwrap_err();
        match err {
            ParseError::UnterminatedBlock { location, name } => {
                assert_eq!(name, "OUTER");
                assert_eq!(location.line, 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unmatched_close() {
        let err = parse("A : 1\n}\nB : 2\n").unwrap_err();
        assert!(matches!(err, ParseError::UnmatchedClose { ref location } if location.line == 2));
    }

    #[test]
    fn test_nesting_limit() {
        let options = ParseOptions::default().with_max_depth(2);
        assert!(parse_document("A : {\nB : {\n}\n}\n", &options).is_ok());
        let err = parse_document("A : {\nB : {\nC : {\n}\n}\n}\n", &options).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { max: 2, ref location } if location.line == 3));
    }

    #[test]
    fn test_value_errors_carry_line() {
        let options = ParseOptions::default().with_filename("app.cfl");
        let err = parse_document("\n\nX : $[/ 10 0]\n", &options).unwrap_err();
        assert_eq!(err.to_string(), "app.cfl:3: Division by zero");
        let location = err.location().unwrap();
        assert_eq!(location.text, "X : $[/ 10 0]");
    }

    #[test]
    fn test_unknown_tokens_stay_strings() {
        let doc = parse("MODE : DEBUG\nLIST : #( ON OFF )\n").unwrap();
        assert_eq!(
            Value::Table(doc.config),
            table(vec![
                ("MODE", Value::from("DEBUG")),
                (
                    "LIST",
                    Value::Array(vec![Value::from("ON"), Value::from("OFF")])
                ),
            ])
        );
    }

    #[test]
    fn test_array_nesting_limit() {
        let source = format!("X : {}{}\n", "#(".repeat(200_000), ")".repeat(200_000));
        let err = parse(&source).unwrap_err();
        assert_eq!(err.to_string(), "line 1: Arrays nested deeper than 128");

        let options = ParseOptions::default().with_max_depth(2);
        assert!(parse_document("X : #( #( 1 ) )\n", &options).is_ok());
        let err = parse_document("X : #( #( #( 1 ) ) )\n", &options).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Value {
                source: ValueError::NestingTooDeep(2),
                ..
            }
        ));
    }

    #[test]
    fn test_opaque_string_value() {
        let doc = parse("NAME : hello").unwrap();
        assert_eq!(Value::Table(doc.config), table(vec![("NAME", Value::from("hello"))]));
    }

    #[test]
    fn test_empty_input() {
        let doc = parse("").unwrap();
        assert!(doc.config.is_empty());
        assert!(doc.constants.is_empty());
    }
}
