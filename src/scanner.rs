//! One-codepoint lookahead over a codepoint source.

#[cfg(test)]
#[path = "./scanner_tests.rs"]
mod tests;

use crate::decode::MalformedInput;
use crate::error::{Error, ErrorKind};
use crate::span::{Position, Span};

/// Pull-based reader holding exactly one codepoint of lookahead.
///
/// `current` is `None` once the source is exhausted; `position` is the
/// codepoint offset of `current` (or the input length at end).
pub(crate) struct Scanner<I> {
    source: I,
    current: Option<char>,
    position: Position,
    line_starts: Vec<Position>,
}

impl<I> Scanner<I>
where
    I: Iterator<Item = Result<char, MalformedInput>>,
{
    /// Creates a scanner and primes the lookahead with the first codepoint.
    pub fn new(source: I) -> Result<Self, Error> {
        let mut scanner = Scanner {
            source,
            current: None,
            position: 0,
            line_starts: vec![0],
        };
        scanner.pull()?;
        Ok(scanner)
    }

    fn pull(&mut self) -> Result<(), Error> {
        self.current = match self.source.next() {
            None => None,
            Some(Ok(c)) => Some(c),
            Some(Err(MalformedInput)) => {
                self.current = None;
                return Err((ErrorKind::InvalidEncoding, Span::point(self.position)).into());
            }
        };
        Ok(())
    }

    /// Moves past the current codepoint. Does nothing at end of input.
    pub fn advance(&mut self) -> Result<(), Error> {
        let Some(c) = self.current else {
            return Ok(());
        };
        let Some(next) = self.position.checked_add(1).filter(|p| *p < u32::MAX) else {
            return Err((ErrorKind::FileTooLarge, Span::point(self.position)).into());
        };
        self.position = next;
        if c == '\n' {
            self.line_starts.push(next);
        }
        self.pull()
    }

    #[inline]
    pub fn current(&self) -> Option<char> {
        self.current
    }

    #[inline]
    pub fn at(&self, c: char) -> bool {
        self.current == Some(c)
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Span of the current codepoint, empty at end of input.
    #[inline]
    pub fn codepoint_span(&self) -> Span {
        if self.current.is_some() {
            Span::codepoint(self.position)
        } else {
            Span::point(self.position)
        }
    }

    /// Builds an error located at the current position.
    pub fn error_here(&self, kind: ErrorKind) -> Error {
        (kind, Span::point(self.position)).into()
    }

    /// Consumes `expected` or fails with [`ErrorKind::Wanted`].
    pub fn expect(&mut self, expected: char) -> Result<(), Error> {
        if self.current != Some(expected) {
            return Err(self.error_here(ErrorKind::Wanted {
                expected,
                found: self.current,
            }));
        }
        self.advance()
    }

    /// Consumes every codepoint of `sequence` in order.
    pub fn expect_sequence(&mut self, sequence: &str) -> Result<(), Error> {
        for c in sequence.chars() {
            self.expect(c)?;
        }
        Ok(())
    }

    /// Consumes the current codepoint if it equals `c`.
    pub fn eat(&mut self, c: char) -> Result<bool, Error> {
        if self.current == Some(c) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Appends the current codepoint to `buf` and advances.
    pub fn consume_into(&mut self, buf: &mut String) -> Result<(), Error> {
        if let Some(c) = self.current {
            buf.push(c);
        }
        self.advance()
    }

    pub fn skip_whitespace(&mut self) -> Result<(), Error> {
        while matches!(self.current, Some(' ' | '\t')) {
            self.advance()?;
        }
        Ok(())
    }

    /// Zero-based line and column of `offset`, for any offset already scanned.
    pub fn line_col(&self, offset: Position) -> (usize, usize) {
        let line = self.line_starts.partition_point(|start| *start <= offset) - 1;
        (line, (offset - self.line_starts[line]) as usize)
    }
}
