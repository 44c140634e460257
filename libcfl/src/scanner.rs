//! Phase 1: Scanner
//!
//! The scanner presents the source as a cursor over trimmed lines. Every
//! block parse, nested or not, pulls from the same cursor, so a nested block
//! resumes exactly where its parent stopped. The cursor also owns the
//! nesting depth, which rises on each block opener and falls on each closer.

use std::iter::Enumerate;
use std::str::Lines;

/// A single line as seen by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// One-based line number.
    pub number: usize,
    /// Line content with surrounding whitespace removed.
    pub text: &'a str,
}

/// Cursor over the lines of one document.
pub struct LineCursor<'a> {
    lines: Enumerate<Lines<'a>>,
    depth: usize,
}

impl<'a> LineCursor<'a> {
    /// Create a cursor positioned at the first line of `source`.
    pub fn new(source: &'a str) -> Self {
        let source = source.strip_prefix('\u{FEFF}').unwrap_or(source);
        Self {
            lines: source.lines().enumerate(),
            depth: 0,
        }
    }

    /// Take the next line, or `None` at end of input.
    pub fn next_line(&mut self) -> Option<SourceLine<'a>> {
        self.lines.next().map(|(index, line)| SourceLine {
            number: index + 1,
            text: line.trim(),
        })
    }

    /// Current block nesting depth. Zero at top level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Record entry into a nested block.
    pub fn enter(&mut self) {
        self.depth += 1;
    }

    /// Record exit from a nested block.
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_trimmed_and_numbered() {
        let mut cursor = LineCursor::new("  A : 1  \n\tB : 2\n");
        assert_eq!(
            cursor.next_line(),
            Some(SourceLine {
                number: 1,
                text: "A : 1"
            })
        );
        assert_eq!(
            cursor.next_line(),
            Some(SourceLine {
                number: 2,
                text: "B : 2"
            })
        );
        assert_eq!(cursor.next_line(), None);
    }

    #[test]
    fn test_crlf_and_bom() {
        let mut cursor = LineCursor::new("\u{FEFF}const A = 1;\r\nX : A\r\n");
        assert_eq!(cursor.next_line().map(|l| l.text), Some("const A = 1;"));
        assert_eq!(cursor.next_line().map(|l| l.text), Some("X : A"));
        assert_eq!(cursor.next_line(), None);
    }

    #[test]
    fn test_depth_tracking() {
        let mut cursor = LineCursor::new("");
        assert_eq!(cursor.depth(), 0);
        cursor.enter();
        cursor.enter();
        assert_eq!(cursor.depth(), 2);
        cursor.leave();
        assert_eq!(cursor.depth(), 1);
        cursor.leave();
        cursor.leave();
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn test_end_of_input_is_sticky() {
        let mut cursor = LineCursor::new("only");
        assert!(cursor.next_line().is_some());
        assert!(cursor.next_line().is_none());
        assert!(cursor.next_line().is_none());
    }
}
