//! Text scanner for brace-delimited formats.
//!
//! This module provides [`TextScanner`], a cursor over a string slice that
//! can jump to literal markers and skip balanced `{ ... }` blocks without
//! a general-purpose parser.

use memchr::{memchr2, memmem};

use crate::{Error, Result};

/// A cursor over text with an explicit byte position.
///
/// Positions are byte offsets. The scanner only ever stops on ASCII bytes
/// (`{`, `}` or the end of a matched marker), so slicing at its position is
/// always on a char boundary.
///
/// # Example
///
/// ```
/// use pobx_common::TextScanner;
///
/// let mut scanner = TextScanner::new("a={b={1},c=2} tail");
/// assert!(scanner.skip_past("a={"));
/// assert_eq!(scanner.read_block().unwrap(), "b={1},c=2");
/// assert_eq!(scanner.remaining_text(), " tail");
/// ```
#[derive(Debug, Clone)]
pub struct TextScanner<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> TextScanner<'a> {
    /// Create a new scanner at the start of the text.
    #[inline]
    pub const fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }

    /// Get the current byte position.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying text in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the cursor has reached the end of the text.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.text.len()
    }

    /// Seek to an absolute byte position.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position.min(self.text.len());
    }

    /// Get the text from the cursor to the end.
    #[inline]
    pub fn remaining_text(&self) -> &'a str {
        &self.text[self.position.min(self.text.len())..]
    }

    /// Move the cursor just past the next occurrence of `marker`.
    ///
    /// Returns `false` and leaves the cursor unchanged if the marker does
    /// not occur after the cursor.
    pub fn skip_past(&mut self, marker: &str) -> bool {
        match memmem::find(self.remaining_text().as_bytes(), marker.as_bytes()) {
            Some(offset) => {
                self.position += offset + marker.len();
                true
            }
            None => false,
        }
    }

    /// Read the body of a brace block whose `{` has already been consumed.
    ///
    /// The depth counter starts at 1 and every `{` / `}` after the cursor
    /// adjusts it. On success the returned slice excludes the closing `}`
    /// and the cursor sits just past it. Braces inside quoted strings are
    /// counted like any other.
    pub fn read_block(&mut self) -> Result<&'a str> {
        let start = self.position;
        let bytes = self.text.as_bytes();
        let mut depth = 1usize;
        let mut pos = start;

        while let Some(offset) = memchr2(b'{', b'}', &bytes[pos..]) {
            pos += offset;
            if bytes[pos] == b'{' {
                depth += 1;
            } else {
                depth -= 1;
                if depth == 0 {
                    self.position = pos + 1;
                    return Ok(&self.text[start..pos]);
                }
            }
            pos += 1;
        }

        Err(Error::UnbalancedBraces {
            opened_at: start.saturating_sub(1),
            depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_past_missing_marker() {
        let mut scanner = TextScanner::new("abc");
        assert!(!scanner.skip_past("x"));
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn test_read_nested_block() {
        let mut scanner = TextScanner::new("{ {a} { {b} } } rest");
        assert!(scanner.skip_past("{"));
        assert_eq!(scanner.read_block().unwrap(), " {a} { {b} } ");
        assert_eq!(scanner.remaining_text(), " rest");
    }

    #[test]
    fn test_read_empty_block() {
        let mut scanner = TextScanner::new("x={}");
        assert!(scanner.skip_past("x={"));
        assert_eq!(scanner.read_block().unwrap(), "");
        assert!(scanner.is_empty());
    }

    #[test]
    fn test_unbalanced_block() {
        let mut scanner = TextScanner::new("t={ {a}");
        assert!(scanner.skip_past("t={"));
        match scanner.read_block() {
            Err(Error::UnbalancedBraces { opened_at, depth }) => {
                assert_eq!(opened_at, 2);
                assert_eq!(depth, 1);
            }
            other => panic!("expected unbalanced braces, got {:?}", other),
        }
        // Cursor does not move on failure.
        assert_eq!(scanner.position(), 3);
    }

    #[test]
    fn test_multibyte_text_is_sliced_on_boundaries() {
        let mut scanner = TextScanner::new("n={\"Ærø\"} ü");
        assert!(scanner.skip_past("n={"));
        assert_eq!(scanner.read_block().unwrap(), "\"Ærø\"");
        assert_eq!(scanner.remaining_text(), " ü");
    }
}
