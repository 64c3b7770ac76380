//! Codepoint-offset span types for source location tracking.

#[cfg(test)]
#[path = "./span_tests.rs"]
mod tests;

/// A codepoint index into the parsed input.
pub type Position = u32;

/// A half-open codepoint range `[start, end)` within a TOML document.
///
/// Offsets count Unicode scalar values, not bytes. Convertible to and from
/// [`Range<u32>`](std::ops::Range) and [`Range<usize>`](std::ops::Range).
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Hash)]
pub struct Span {
    /// Start codepoint offset (inclusive).
    pub start: Position,
    /// End codepoint offset (exclusive).
    pub end: Position,
}

impl Span {
    /// Creates a new [`Span`] from start and end codepoint offsets.
    #[inline]
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// An empty span located at `pos`.
    #[inline]
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// The span covering the single codepoint at `pos`.
    #[inline]
    pub fn codepoint(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Number of codepoints covered.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` if the span covers no codepoints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Converts the span into a byte range of `source`, which must be the text
    /// the span was produced from. Offsets past the end clamp to `source.len()`.
    pub fn byte_range(&self, source: &str) -> std::ops::Range<usize> {
        let mut start = source.len();
        let mut end = source.len();
        for (index, (byte, _)) in source.char_indices().enumerate() {
            if index == self.start as usize {
                start = byte;
            }
            if index == self.end as usize {
                end = byte;
                break;
            }
        }
        start..end.max(start)
    }
}

impl From<Span> for (u32, u32) {
    fn from(s: Span) -> (u32, u32) {
        (s.start, s.end)
    }
}

impl From<Span> for (usize, usize) {
    fn from(s: Span) -> (usize, usize) {
        (s.start as usize, s.end as usize)
    }
}

impl From<std::ops::Range<u32>> for Span {
    fn from(s: std::ops::Range<u32>) -> Self {
        Self::new(s.start, s.end)
    }
}

impl From<Span> for std::ops::Range<u32> {
    fn from(s: Span) -> Self {
        s.start..s.end
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(s: Span) -> Self {
        s.start as usize..s.end as usize
    }
}

/// Wraps a value `T` with its source [`Span`].
///
/// Equality compares the values only; compare `span` explicitly when the
/// location matters.
///
/// # Examples
///
/// ```
/// let root = toml_strict::parse("name = \"hello\"")?;
/// let name = root.get("name").and_then(|v| v.as_spanned_str()).unwrap();
/// assert_eq!(name.value, "hello");
/// assert_eq!(name.span, toml_strict::Span::new(7, 14));
/// # Ok::<(), toml_strict::Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct Spanned<T> {
    /// The parsed value.
    pub value: T,
    /// The codepoint span in the source document.
    pub span: Span,
}

impl<T> Spanned<T> {
    /// Creates a [`Spanned`] with the given value and a zero span.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            span: Span { start: 0, end: 0 },
        }
    }

    /// Creates a [`Spanned`] from a value and a [`Span`].
    #[inline]
    pub const fn with_span(value: T, span: Span) -> Self {
        Self { value, span }
    }

    /// Consumes the wrapper, returning the inner value.
    #[inline]
    pub fn take(self) -> T {
        self.value
    }
}

impl<T> AsRef<T> for Spanned<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T> std::fmt::Debug for Spanned<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.value.fmt(f)
    }
}

impl<T> PartialEq for Spanned<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.value.eq(&other.value)
    }
}

impl<T> PartialEq<T> for Spanned<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &T) -> bool {
        self.value.eq(other)
    }
}
