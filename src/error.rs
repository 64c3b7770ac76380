use crate::Span;
use std::fmt::{self, Debug, Display};

#[cfg(test)]
#[path = "./error_tests.rs"]
mod tests;

/// Error that can occur when parsing TOML.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The error kind
    pub kind: ErrorKind,
    /// The codepoint span where the error occurs.
    ///
    /// Zero-width when the error is about a missing codepoint.
    pub span: Span,
    /// Zero-based line and column (in codepoints) of `span.start`.
    pub line_info: Option<(usize, usize)>,
}

impl std::error::Error for Error {}

impl From<(ErrorKind, Span)> for Error {
    fn from((kind, span): (ErrorKind, Span)) -> Self {
        Self {
            kind,
            span,
            line_info: None,
        }
    }
}

/// Every way a document can be rejected.
#[derive(Clone, PartialEq)]
pub enum ErrorKind {
    /// The codepoint source reported malformed input.
    InvalidEncoding,

    /// The input holds more codepoints than a [`Span`] can address.
    FileTooLarge,

    /// A specific codepoint was required.
    Wanted {
        /// The required codepoint.
        expected: char,
        /// What was found instead, `None` at end of input.
        found: Option<char>,
    },

    /// No kind of line starts with this codepoint.
    Unexpected(char),

    /// A key, or a key segment after a dot, is empty.
    MissingKey,

    /// A key was not followed by `=`.
    MissingEquals {
        /// What was found instead, `None` at end of input.
        found: Option<char>,
    },

    /// `=` was not followed by a value.
    UnspecifiedValue,

    /// Content after a value or header on the same line.
    UnexpectedTrailingText(String),

    /// A key or table was defined more than once.
    DuplicateKey {
        /// The duplicate key
        key: String,
        /// The span where the key was first defined
        first: Span,
    },

    /// A dotted key or header tried to extend a completed value that is not
    /// a table.
    CannotDefineSubKeyOfNonTable {
        /// The key naming the value
        key: String,
    },

    /// Multiline strings are not allowed for key.
    MultilineStringKey,

    /// A number literal is malformed.
    InvalidNumber(String),

    /// An `_` in a number is not between two digits.
    UnderscoreMustBeSurroundedByDigits,

    /// A local date failed calendar validation.
    InvalidLocalDate(String),

    /// A local time failed clock validation.
    InvalidLocalTime(String),

    /// A local date-time failed validation.
    InvalidLocalDateTime(String),

    /// An offset date-time failed validation.
    InvalidOffsetDateTime(String),

    /// An unknown escape, or a unicode escape that is not a scalar value.
    InvalidEscape,

    /// A control codepoint appeared in a string or comment.
    UnexpectedControlCharacter(char),

    /// End of input was reached inside a string.
    UnterminatedString,

    /// Arrays and inline tables are nested too deeply.
    MaxDepthExceeded,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::InvalidEncoding => "invalid-encoding",
            Self::FileTooLarge => "file-too-large",
            Self::Wanted { .. } => "wanted",
            Self::Unexpected(..) => "unexpected",
            Self::MissingKey => "missing-key",
            Self::MissingEquals { .. } => "missing-equals",
            Self::UnspecifiedValue => "unspecified-value",
            Self::UnexpectedTrailingText(..) => "unexpected-trailing-text",
            Self::DuplicateKey { .. } => "duplicate-key",
            Self::CannotDefineSubKeyOfNonTable { .. } => "cannot-define-sub-key-of-non-table",
            Self::MultilineStringKey => "multiline-string-key",
            Self::InvalidNumber(..) => "invalid-number",
            Self::UnderscoreMustBeSurroundedByDigits => "underscore-must-be-surrounded-by-digits",
            Self::InvalidLocalDate(..) => "invalid-local-date",
            Self::InvalidLocalTime(..) => "invalid-local-time",
            Self::InvalidLocalDateTime(..) => "invalid-local-date-time",
            Self::InvalidOffsetDateTime(..) => "invalid-offset-date-time",
            Self::InvalidEscape => "invalid-escape",
            Self::UnexpectedControlCharacter(..) => "unexpected-control-character",
            Self::UnterminatedString => "unterminated-string",
            Self::MaxDepthExceeded => "max-depth-exceeded",
        };
        f.write_str(text)
    }
}

impl Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// Human readable form of a codepoint, or of end of input.
struct Found(Option<char>);

impl Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("EOF"),
            Some('\r') => f.write_str("CR"),
            Some('\n') => f.write_str("LF"),
            Some(c) if c.is_control() || c.is_whitespace() => {
                write!(f, "U+{:04X}", c as u32)
            }
            Some(c) => write!(f, "'{c}'"),
        }
    }
}

macro_rules! rtry {
    ($($tt:tt)*) => {
        if let Err(err) = $($tt)* {
            return Err(err);
        }
    };
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InvalidEncoding => f.write_str("input is not well-formed"),
            ErrorKind::FileTooLarge => f.write_str("file is too large (maximum 4Gi codepoints)"),
            ErrorKind::Wanted { expected, found } => {
                rtry!(Found(Some(*expected)).fmt(f));
                rtry!(f.write_str(" expected, found "));
                Found(*found).fmt(f)
            }
            ErrorKind::Unexpected(c) => {
                rtry!(f.write_str("unexpected "));
                Found(Some(*c)).fmt(f)
            }
            ErrorKind::MissingKey => f.write_str("key expected"),
            ErrorKind::MissingEquals { found } => {
                rtry!(f.write_str("'=' expected after key, found "));
                Found(*found).fmt(f)
            }
            ErrorKind::UnspecifiedValue => f.write_str("value expected after '='"),
            ErrorKind::UnexpectedTrailingText(text) => {
                rtry!(f.write_str("unexpected trailing text: `"));
                rtry!(f.write_str(text));
                f.write_str("`")
            }
            ErrorKind::DuplicateKey { key, .. } => {
                rtry!(f.write_str("duplicate key: `"));
                rtry!(f.write_str(key));
                f.write_str("`")
            }
            ErrorKind::CannotDefineSubKeyOfNonTable { key } => {
                rtry!(f.write_str("cannot define a sub-key of non-table `"));
                rtry!(f.write_str(key));
                f.write_str("`")
            }
            ErrorKind::MultilineStringKey => {
                f.write_str("multiline strings are not allowed for key")
            }
            ErrorKind::InvalidNumber(text) => {
                rtry!(f.write_str("invalid number: `"));
                rtry!(f.write_str(text));
                f.write_str("`")
            }
            ErrorKind::UnderscoreMustBeSurroundedByDigits => {
                f.write_str("underscore must be surrounded by digits")
            }
            ErrorKind::InvalidLocalDate(text) => {
                rtry!(f.write_str("invalid local date: `"));
                rtry!(f.write_str(text));
                f.write_str("`")
            }
            ErrorKind::InvalidLocalTime(text) => {
                rtry!(f.write_str("invalid local time: `"));
                rtry!(f.write_str(text));
                f.write_str("`")
            }
            ErrorKind::InvalidLocalDateTime(text) => {
                rtry!(f.write_str("invalid local date-time: `"));
                rtry!(f.write_str(text));
                f.write_str("`")
            }
            ErrorKind::InvalidOffsetDateTime(text) => {
                rtry!(f.write_str("invalid offset date-time: `"));
                rtry!(f.write_str(text));
                f.write_str("`")
            }
            ErrorKind::InvalidEscape => f.write_str("invalid escape sequence in string"),
            ErrorKind::UnexpectedControlCharacter(c) => {
                rtry!(f.write_str("unexpected control character "));
                Found(Some(*c)).fmt(f)
            }
            ErrorKind::UnterminatedString => f.write_str("unterminated string"),
            ErrorKind::MaxDepthExceeded => {
                f.write_str("arrays and inline tables are nested too deeply")
            }
        }
    }
}

#[cfg(feature = "reporting")]
#[cfg_attr(docsrs, doc(cfg(feature = "reporting")))]
impl Error {
    /// Converts this [`Error`] into a [`codespan_reporting::diagnostic::Diagnostic`].
    ///
    /// `source` must be the text that was parsed; it is needed to turn
    /// codepoint spans into the byte ranges codespan works with.
    pub fn to_diagnostic<FileId: Copy + PartialEq>(
        &self,
        fid: FileId,
        source: &str,
    ) -> codespan_reporting::diagnostic::Diagnostic<FileId> {
        use codespan_reporting::diagnostic::{Diagnostic, Label};

        let diag = Diagnostic::error()
            .with_code(self.kind.to_string())
            .with_message(self.to_string());
        let primary = Label::primary(fid, self.span.byte_range(source));

        match &self.kind {
            ErrorKind::DuplicateKey { first, .. } => diag.with_labels(vec![
                Label::secondary(fid, first.byte_range(source))
                    .with_message("first definition"),
                primary.with_message("duplicate key"),
            ]),
            ErrorKind::UnterminatedString => diag.with_labels(vec![
                primary.with_message("eof reached before string terminator"),
            ]),
            ErrorKind::UnexpectedTrailingText(_) => {
                diag.with_labels(vec![primary.with_message("expected end of line")])
            }
            ErrorKind::CannotDefineSubKeyOfNonTable { .. } => diag.with_labels(vec![
                primary.with_message("this value is not a table"),
            ]),
            _ => diag.with_labels(vec![primary]),
        }
    }
}
