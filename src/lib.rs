//! A strict TOML 1.0 parser that records the codepoint span of every key and
//! value it reads.
//!
//! The parser pulls one codepoint at a time from any fallible codepoint
//! source and builds an owned tree of [`Value`]s. Documents that violate the
//! grammar or redefine a key are rejected with an [`Error`] pointing at the
//! offending input.
//!
//! # Examples
//!
//! ```
//! use toml_strict::{Error, Span};
//!
//! let content = r#"
//! dev-mode = true
//!
//! [[things]]
//! name = "hammer"
//! value = 43
//!
//! [[things]]
//! name = "drill"
//! value = 300
//! color = "green"
//! "#;
//!
//! let table = toml_strict::parse(content)?;
//!
//! let things = table.get("things").and_then(|v| v.as_array()).unwrap();
//! assert_eq!(things.len(), 2);
//! let drill = things.get(1).and_then(|v| v.as_table()).unwrap();
//! assert_eq!(drill.get("value").and_then(|v| v.as_integer()), Some(300));
//! assert_eq!(table.get("dev-mode").and_then(|v| v.as_bool()), Some(true));
//!
//! let err = toml_strict::parse("a = true\n[a]").unwrap_err();
//! assert_eq!(err.span, Span::new(10, 11));
//! assert_eq!(err.line_info, Some((1, 1)));
//! # Ok::<(), Error>(())
//! ```

mod array;
mod builder;
mod decode;
mod error;
mod parser;
mod scanner;
mod span;
mod table;
mod time;
mod value;

pub use array::Array;
pub use decode::{MalformedInput, Utf8Codepoints};
pub use error::{Error, ErrorKind};
pub use span::{Position, Span, Spanned};
pub use table::Table;
pub use time::{Date, LocalDateTime, OffsetDateTime, Time, TimeOffset};
pub use value::{Key, Value};

#[cfg(feature = "serde")]
pub mod impl_serde;

use parser::Parser;

/// Parses a TOML document held in a string.
pub fn parse(document: &str) -> Result<Table, Error> {
    parse_codepoints(document.chars().map(Ok))
}

/// Parses a TOML document from raw bytes, rejecting anything that is not
/// well-formed UTF-8 with [`ErrorKind::InvalidEncoding`].
pub fn parse_bytes(document: &[u8]) -> Result<Table, Error> {
    parse_codepoints(Utf8Codepoints::new(document))
}

/// Parses a TOML document from a stream of codepoints.
///
/// A [`MalformedInput`] item stops the parse with
/// [`ErrorKind::InvalidEncoding`] at the offset where it occurred.
pub fn parse_codepoints<I>(source: I) -> Result<Table, Error>
where
    I: IntoIterator<Item = Result<char, MalformedInput>>,
{
    let _span = tracing::debug_span!("parse").entered();

    let mut parser = match Parser::new(source.into_iter()) {
        Ok(parser) => parser,
        Err(mut err) => {
            err.line_info = Some((0, 0));
            tracing::debug!(kind = %err.kind, start = err.span.start, "parse failed");
            return Err(err);
        }
    };
    match parser.parse_document() {
        Ok(table) => Ok(table),
        Err(mut err) => {
            err.line_info = Some(parser.line_col(err.span.start));
            tracing::debug!(
                kind = %err.kind,
                start = err.span.start,
                end = err.span.end,
                "parse failed"
            );
            Err(err)
        }
    }
}
