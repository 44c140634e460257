//! Phase 2: Line Classifier
//!
//! Each trimmed line is sorted into one of the line kinds below. Forms are
//! tried in a fixed order and the first match wins; a constant declaration
//! is tested before anything that could read it as a key.

/// The kind of a single source line, borrowing its parts from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty line.
    Blank,
    /// Line starting with `#`.
    Comment,
    /// `const NAME = LITERAL;`
    Const { name: &'a str, literal: &'a str },
    /// `NAME : {`
    Open { name: &'a str },
    /// `}`
    Close,
    /// `NAME : VALUE`
    KeyValue { key: &'a str, value: &'a str },
    /// Anything else.
    Unrecognized,
}

/// Check whether a string is a valid key or constant name: one or more
/// uppercase ASCII letters or underscores.
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_identifier_byte)
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_uppercase() || b == b'_'
}

/// Characters permitted in the value part of a key-value line.
fn is_value_char(c: char) -> bool {
    c.is_alphanumeric()
        || c.is_whitespace()
        || matches!(
            c,
            '_' | '#' | '(' | ')' | '$' | '[' | ']' | '+' | '-' | '*' | '/' | '.'
        )
}

/// Classify one trimmed line.
pub fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with('#') {
        return LineKind::Comment;
    }
    if let Some(kind) = classify_const(line) {
        return kind;
    }
    if let Some((name, rest)) = split_key(line) {
        if rest == "{" {
            return LineKind::Open { name };
        }
    }
    if line == "}" {
        return LineKind::Close;
    }
    if let Some((key, value)) = split_key(line) {
        if !value.is_empty() && value.chars().all(is_value_char) {
            return LineKind::KeyValue { key, value };
        }
    }
    LineKind::Unrecognized
}

/// Match `const NAME = LITERAL;` where LITERAL is a run of digits and dots.
fn classify_const(line: &str) -> Option<LineKind<'_>> {
    let rest = line.strip_prefix("const")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let (name, rest) = take_identifier(rest)?;
    let rest = rest.trim_start().strip_prefix('=')?;
    let literal = rest.strip_suffix(';')?.trim();
    if literal.is_empty() || !literal.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    Some(LineKind::Const { name, literal })
}

/// Split `NAME : REST` into the name and the trimmed remainder.
fn split_key(line: &str) -> Option<(&str, &str)> {
    let (name, rest) = take_identifier(line)?;
    let rest = rest.trim_start().strip_prefix(':')?;
    Some((name, rest.trim_start()))
}

/// Take the leading identifier off `s`.
fn take_identifier(s: &str) -> Option<(&str, &str)> {
    let end = s.bytes().take_while(|&b| is_identifier_byte(b)).count();
    if end == 0 {
        return None;
    }
    Some(s.split_at(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("A"));
        assert!(is_identifier("MAX_SIZE"));
        assert!(is_identifier("_"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("Max"));
        assert!(!is_identifier("A1"));
    }

    #[test]
    fn test_blank_and_comment() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("# note"), LineKind::Comment);
        assert_eq!(classify("#( 1 2 )"), LineKind::Comment);
    }

    #[test]
    fn test_const() {
        assert_eq!(
            classify("const A = 10;"),
            LineKind::Const {
                name: "A",
                literal: "10"
            }
        );
        assert_eq!(
            classify("const RATE=2.5;"),
            LineKind::Const {
                name: "RATE",
                literal: "2.5"
            }
        );
        assert_eq!(classify("const A = 10"), LineKind::Unrecognized);
        assert_eq!(classify("const A = x;"), LineKind::Unrecognized);
        assert_eq!(classify("constA = 1;"), LineKind::Unrecognized);
    }

    #[test]
    fn test_const_is_not_a_key() {
        // "CONST : 1" is an ordinary key, "const X = 1;" never is.
        assert_eq!(
            classify("CONST : 1"),
            LineKind::KeyValue {
                key: "CONST",
                value: "1"
            }
        );
        assert!(matches!(
            classify("const X = 1;"),
            LineKind::Const { .. }
        ));
    }

    #[test]
    fn test_open_and_close() {
        assert_eq!(classify("SERVER : {"), LineKind::Open { name: "SERVER" });
        assert_eq!(classify("SERVER:{"), LineKind::Open { name: "SERVER" });
        assert_eq!(classify("}"), LineKind::Close);
        assert_eq!(classify("} }"), LineKind::Unrecognized);
        assert_eq!(classify("server : {"), LineKind::Unrecognized);
    }

    #[test]
    fn test_key_value() {
        assert_eq!(
            classify("PORT : $[+ BASE 1]"),
            LineKind::KeyValue {
                key: "PORT",
                value: "$[+ BASE 1]"
            }
        );
        assert_eq!(
            classify("LIST : #( 1 #( 2 3 ) )"),
            LineKind::KeyValue {
                key: "LIST",
                value: "#( 1 #( 2 3 ) )"
            }
        );
        assert_eq!(
            classify("NAME : hello world"),
            LineKind::KeyValue {
                key: "NAME",
                value: "hello world"
            }
        );
    }

    #[test]
    fn test_key_value_rejects_disallowed_characters() {
        assert_eq!(classify("URL : http://host"), LineKind::Unrecognized);
        assert_eq!(classify("A : { B"), LineKind::Unrecognized);
        assert_eq!(classify("A :"), LineKind::Unrecognized);
        assert_eq!(classify("A = 1"), LineKind::Unrecognized);
    }
}
