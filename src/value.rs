#[cfg(test)]
#[path = "./value_tests.rs"]
mod tests;

use crate::time::{Date, LocalDateTime, OffsetDateTime, Time};
use crate::{Array, Span, Spanned, Table};
use std::fmt;

/// A table key with its location.
///
/// For quoted keys the name is the unescaped content and the span covers
/// the quotes.
///
/// Keys compare and hash by name only.
#[derive(Clone)]
pub struct Key {
    /// The key name.
    pub name: String,
    /// The codepoint span of the key in the source document.
    pub span: Span,
}

impl Key {
    pub fn new(name: impl Into<String>, span: Span) -> Key {
        Key {
            name: name.into(),
            span,
        }
    }

    /// Returns the key name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Key {}

impl std::hash::Hash for Key {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A parsed TOML value with span information.
///
/// Use the `as_*` methods ([`as_str`](Self::as_str),
/// [`as_integer`](Self::as_integer), [`as_table`](Self::as_table), etc.) to
/// extract the value, or match on the variants directly.
///
/// # Examples
///
/// ```
/// use toml_strict::Value;
///
/// let table = toml_strict::parse("n = 10")?;
/// match table.get("n") {
///     Some(Value::Integer(i)) => assert_eq!(i.value, 10),
///     _ => panic!("expected integer"),
/// }
/// # Ok::<(), toml_strict::Error>(())
/// ```
#[derive(Clone, PartialEq)]
pub enum Value {
    /// A table, from a header, a dotted key or an inline table.
    Table(Table),
    /// A static array or an array of tables.
    Array(Array),
    /// A string value.
    String(Spanned<String>),
    /// An integer value.
    Integer(Spanned<i64>),
    /// A floating-point value.
    Float(Spanned<f64>),
    /// A boolean value.
    Boolean(Spanned<bool>),
    /// A date without a time.
    LocalDate(Spanned<Date>),
    /// A date and time without an offset.
    LocalDateTime(Spanned<LocalDateTime>),
    /// A time without a date.
    LocalTime(Spanned<Time>),
    /// A date and time with an offset.
    OffsetDateTime(Spanned<OffsetDateTime>),
}

impl Value {
    /// Returns the codepoint span of this value in the source document.
    pub fn span(&self) -> Span {
        match self {
            Value::Table(t) => t.span(),
            Value::Array(a) => a.span(),
            Value::String(s) => s.span,
            Value::Integer(i) => i.span,
            Value::Float(f) => f.span,
            Value::Boolean(b) => b.span,
            Value::LocalDate(d) => d.span,
            Value::LocalDateTime(d) => d.span,
            Value::LocalTime(t) => t.span,
            Value::OffsetDateTime(d) => d.span,
        }
    }

    /// Returns the TOML type name (e.g. `"string"`, `"integer"`, `"table"`).
    pub fn type_str(&self) -> &'static str {
        match self {
            Value::Table(_) => "table",
            Value::Array(_) => "array",
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::LocalDate(_) => "local date",
            Value::LocalDateTime(_) => "local date-time",
            Value::LocalTime(_) => "local time",
            Value::OffsetDateTime(_) => "offset date-time",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&s.value),
            _ => None,
        }
    }

    /// Returns the string along with its span.
    pub fn as_spanned_str(&self) -> Option<Spanned<&str>> {
        match self {
            Value::String(s) => Some(Spanned::with_span(&s.value, s.span)),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(i.value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(f.value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(b.value),
            _ => None,
        }
    }

    pub fn as_local_date(&self) -> Option<Date> {
        match self {
            Value::LocalDate(d) => Some(d.value),
            _ => None,
        }
    }

    pub fn as_local_date_time(&self) -> Option<LocalDateTime> {
        match self {
            Value::LocalDateTime(d) => Some(d.value),
            _ => None,
        }
    }

    pub fn as_local_time(&self) -> Option<Time> {
        match self {
            Value::LocalTime(t) => Some(t.value),
            _ => None,
        }
    }

    pub fn as_offset_date_time(&self) -> Option<OffsetDateTime> {
        match self {
            Value::OffsetDateTime(d) => Some(d.value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Table(t) => t.fmt(f),
            Value::Array(a) => a.fmt(f),
            Value::String(s) => s.fmt(f),
            Value::Integer(i) => i.fmt(f),
            Value::Float(v) => v.fmt(f),
            Value::Boolean(b) => b.fmt(f),
            Value::LocalDate(d) => d.fmt(f),
            Value::LocalDateTime(d) => d.fmt(f),
            Value::LocalTime(t) => t.fmt(f),
            Value::OffsetDateTime(d) => d.fmt(f),
        }
    }
}
