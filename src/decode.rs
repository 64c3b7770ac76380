//! Codepoint sources consumed by the parser.

#[cfg(test)]
#[path = "./decode_tests.rs"]
mod tests;

/// Signal produced by a codepoint source when its underlying bytes are not
/// well-formed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MalformedInput;

impl std::fmt::Display for MalformedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("malformed input")
    }
}

impl std::error::Error for MalformedInput {}

/// Strict UTF-8 decoder yielding one codepoint at a time.
///
/// Overlong encodings, surrogates, code points above `U+10FFFF` and truncated
/// sequences all produce a single [`MalformedInput`], after which the
/// iterator is exhausted.
pub struct Utf8Codepoints<'a> {
    bytes: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Utf8Codepoints<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            failed: false,
        }
    }
}

fn sequence_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

impl Iterator for Utf8Codepoints<'_> {
    type Item = Result<char, MalformedInput>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let rest = &self.bytes[self.offset..];
        let &lead = rest.first()?;
        let decoded = sequence_width(lead)
            .and_then(|width| rest.get(..width))
            .and_then(|seq| std::str::from_utf8(seq).ok())
            .and_then(|s| s.chars().next());
        match decoded {
            Some(c) => {
                self.offset += c.len_utf8();
                Some(Ok(c))
            }
            None => {
                self.failed = true;
                Some(Err(MalformedInput))
            }
        }
    }
}
