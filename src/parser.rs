//! Recursive-descent TOML grammar.
//!
//! Every decision is made on the single codepoint of lookahead held by the
//! [`Scanner`]; nothing is ever pushed back. Numbers, dates and times share a
//! lexical prefix and are told apart while they are being read.

#[cfg(test)]
#[path = "./parser_tests.rs"]
mod tests;

use crate::builder::{DocumentBuilder, NodeId, Provenance};
use crate::decode::MalformedInput;
use crate::error::{Error, ErrorKind};
use crate::scanner::Scanner;
use crate::span::{Position, Span};
use crate::time::{Date, LocalDateTime, OffsetDateTime, Time};
use crate::value::{Key, Value};
use crate::{Array, Spanned, Table};
use tracing::trace;

/// Arrays and inline tables may nest this deep.
pub(crate) const MAX_RECURSION_DEPTH: u32 = 128;

#[inline]
fn is_bare_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[inline]
fn is_control(c: char) -> bool {
    c <= '\u{1f}' || c == '\u{7f}'
}

fn has_leading_zero(number: &str) -> bool {
    let digits = number.strip_prefix(['+', '-']).unwrap_or(number);
    let bytes = digits.as_bytes();
    bytes.len() > 1 && bytes[0] == b'0' && bytes[1].is_ascii_digit()
}

/// Parses a decimal float literal whose underscores were already removed.
/// Every `.` must sit between two digits.
fn parse_float(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b != b'.' {
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| bytes.get(j));
        let after = bytes.get(i + 1);
        if !before.is_some_and(u8::is_ascii_digit) || !after.is_some_and(u8::is_ascii_digit) {
            return None;
        }
    }
    text.parse::<f64>().ok()
}

pub(crate) struct Parser<I> {
    scanner: Scanner<I>,
    depth: u32,
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<char, MalformedInput>>,
{
    pub fn new(source: I) -> Result<Self, Error> {
        Ok(Parser {
            scanner: Scanner::new(source)?,
            depth: 0,
        })
    }

    /// Line and column of `offset`, valid for any offset already read.
    pub fn line_col(&self, offset: Position) -> (usize, usize) {
        self.scanner.line_col(offset)
    }

    fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.scanner.position())
    }

    pub fn parse_document(&mut self) -> Result<Table, Error> {
        let mut builder = DocumentBuilder::new(Provenance::HeaderExplicit);
        let mut active = builder.root();

        loop {
            self.scanner.skip_whitespace()?;
            let Some(c) = self.scanner.current() else {
                break;
            };
            if self.skip_line_end()? {
                continue;
            }
            match c {
                '[' => active = self.table_header(&mut builder)?,
                c if is_bare_key_char(c) || c == '"' || c == '\'' => {
                    let (prefix, last, value) = self.key_value()?;
                    self.scanner.skip_whitespace()?;
                    self.expect_line_end()?;
                    builder.insert_dotted(active, &prefix, last, value, Provenance::DottedImplicit)?;
                }
                c => return Err(self.scanner.error_here(ErrorKind::Unexpected(c))),
            }
        }

        Ok(builder.finish(Span::new(0, self.scanner.position())))
    }

    /// Parses `[a.b]` or `[[a.b]]` and returns the table that following
    /// key/value lines belong to.
    fn table_header(&mut self, builder: &mut DocumentBuilder) -> Result<NodeId, Error> {
        let start = self.scanner.position();
        self.scanner.expect('[')?;
        let is_array = self.scanner.eat('[')?;
        self.scanner.skip_whitespace()?;
        let (prefix, last) = self.keys()?;
        self.scanner.expect(']')?;
        if is_array {
            self.scanner.expect(']')?;
        }
        let span = self.span_from(start);
        self.scanner.skip_whitespace()?;
        self.expect_line_end()?;

        let mut table = builder.root();
        for key in &prefix {
            table = builder.get_or_create_sub_table(table, key, Provenance::HeaderImplicit, span)?;
        }
        let table = if is_array {
            builder.create_array_sub_table(table, &last, span)?
        } else {
            builder.get_or_create_sub_table(table, &last, Provenance::HeaderExplicit, span)?
        };
        trace!(key = %last, is_array, start = span.start, "active table changed");
        Ok(table)
    }

    // -- line endings ---------------------------------------------------------

    /// Consumes `\n` or `\r\n`. A `\r` without `\n` is an error.
    fn skip_newline(&mut self) -> Result<bool, Error> {
        match self.scanner.current() {
            Some('\n') => {
                self.scanner.advance()?;
                Ok(true)
            }
            Some('\r') => {
                let span = self.scanner.codepoint_span();
                self.scanner.advance()?;
                if self.scanner.eat('\n')? {
                    Ok(true)
                } else {
                    Err((ErrorKind::UnexpectedControlCharacter('\r'), span).into())
                }
            }
            _ => Ok(false),
        }
    }

    /// Consumes a newline, or a comment and its newline. Returns `true` at end
    /// of input and `false`, consuming nothing, before any other codepoint.
    fn skip_line_end(&mut self) -> Result<bool, Error> {
        if self.scanner.at_end() || self.skip_newline()? {
            return Ok(true);
        }
        if !self.scanner.at('#') {
            return Ok(false);
        }
        self.scanner.advance()?;
        loop {
            match self.scanner.current() {
                None => return Ok(true),
                Some('\n' | '\r') => {
                    self.skip_newline()?;
                    return Ok(true);
                }
                Some(c) if c != '\t' && is_control(c) => {
                    return Err((
                        ErrorKind::UnexpectedControlCharacter(c),
                        self.scanner.codepoint_span(),
                    )
                        .into());
                }
                Some(_) => self.scanner.advance()?,
            }
        }
    }

    /// Requires the line to end here, reporting anything else up to the
    /// comment or newline as trailing text.
    fn expect_line_end(&mut self) -> Result<(), Error> {
        if self.skip_line_end()? {
            return Ok(());
        }
        let start = self.scanner.position();
        let mut end = start;
        let mut text = String::new();
        let mut whitespace = String::new();
        while let Some(c) = self.scanner.current() {
            match c {
                '#' | '\n' | '\r' => break,
                ' ' | '\t' => self.scanner.consume_into(&mut whitespace)?,
                _ => {
                    text.push_str(&whitespace);
                    whitespace.clear();
                    self.scanner.consume_into(&mut text)?;
                    end = self.scanner.position();
                }
            }
        }
        Err((ErrorKind::UnexpectedTrailingText(text), Span::new(start, end)).into())
    }

    // -- keys -----------------------------------------------------------------

    /// Reads a dotted key, returning the leading segments and the last one.
    fn keys(&mut self) -> Result<(Vec<Key>, Key), Error> {
        let mut prefix = Vec::new();
        loop {
            let key = self.key()?;
            self.scanner.skip_whitespace()?;
            if !self.scanner.eat('.')? {
                return Ok((prefix, key));
            }
            self.scanner.skip_whitespace()?;
            prefix.push(key);
        }
    }

    fn key(&mut self) -> Result<Key, Error> {
        let start = self.scanner.position();
        let name = match self.scanner.current() {
            Some(quote @ ('"' | '\'')) => self.string(quote, true)?,
            _ => {
                let mut name = String::new();
                while self.scanner.current().is_some_and(is_bare_key_char) {
                    self.scanner.consume_into(&mut name)?;
                }
                if name.is_empty() {
                    return Err(self.scanner.error_here(ErrorKind::MissingKey));
                }
                name
            }
        };
        Ok(Key::new(name, self.span_from(start)))
    }

    fn key_value(&mut self) -> Result<(Vec<Key>, Key, Value), Error> {
        let (prefix, last) = self.keys()?;
        if !self.scanner.at('=') {
            return Err(self.scanner.error_here(ErrorKind::MissingEquals {
                found: self.scanner.current(),
            }));
        }
        self.scanner.advance()?;
        self.scanner.skip_whitespace()?;
        let value = self.value()?;
        Ok((prefix, last, value))
    }

    // -- values ---------------------------------------------------------------

    fn value(&mut self) -> Result<Value, Error> {
        let start = self.scanner.position();
        match self.scanner.current() {
            Some('t') => {
                self.scanner.expect_sequence("true")?;
                Ok(Value::Boolean(Spanned::with_span(true, self.span_from(start))))
            }
            Some('f') => {
                self.scanner.expect_sequence("false")?;
                Ok(Value::Boolean(Spanned::with_span(false, self.span_from(start))))
            }
            Some('n') => {
                self.scanner.expect_sequence("nan")?;
                Ok(Value::Float(Spanned::with_span(f64::NAN, self.span_from(start))))
            }
            Some('i') => {
                self.scanner.expect_sequence("inf")?;
                Ok(Value::Float(Spanned::with_span(f64::INFINITY, self.span_from(start))))
            }
            Some(c) if c.is_ascii_digit() || matches!(c, '+' | '-' | '_' | '.') => {
                self.number_or_date()
            }
            Some(quote @ ('"' | '\'')) => {
                let string = self.string(quote, false)?;
                Ok(Value::String(Spanned::with_span(string, self.span_from(start))))
            }
            Some(open @ ('[' | '{')) => {
                if self.depth >= MAX_RECURSION_DEPTH {
                    return Err((ErrorKind::MaxDepthExceeded, self.scanner.codepoint_span()).into());
                }
                self.depth += 1;
                let value = if open == '[' {
                    self.array()
                } else {
                    self.inline_table()
                };
                self.depth -= 1;
                value
            }
            _ => Err(self.scanner.error_here(ErrorKind::UnspecifiedValue)),
        }
    }

    fn array(&mut self) -> Result<Value, Error> {
        let start = self.scanner.position();
        self.scanner.expect('[')?;
        self.skip_array_whitespace()?;
        let mut values = Vec::new();
        while !self.scanner.at(']') {
            values.push(self.value()?);
            self.skip_array_whitespace()?;
            if !self.scanner.eat(',')? {
                break;
            }
            self.skip_array_whitespace()?;
        }
        self.scanner.expect(']')?;
        Ok(Value::Array(Array::from_values(self.span_from(start), values)))
    }

    /// Whitespace, newlines and comments are all allowed between array elements.
    fn skip_array_whitespace(&mut self) -> Result<(), Error> {
        loop {
            self.scanner.skip_whitespace()?;
            if self.scanner.at_end() || !self.skip_line_end()? {
                return Ok(());
            }
        }
    }

    fn inline_table(&mut self) -> Result<Value, Error> {
        let start = self.scanner.position();
        self.scanner.expect('{')?;
        self.scanner.skip_whitespace()?;

        let mut builder = DocumentBuilder::new(Provenance::Inline);
        let root = builder.root();
        let mut first = true;
        while !self.scanner.at('}') {
            if !first {
                self.scanner.expect(',')?;
                self.scanner.skip_whitespace()?;
            }
            first = false;
            let (prefix, last, value) = self.key_value()?;
            self.scanner.skip_whitespace()?;
            builder.insert_dotted(root, &prefix, last, value, Provenance::DottedExplicit)?;
        }
        self.scanner.expect('}')?;

        Ok(Value::Table(builder.finish(self.span_from(start))))
    }

    // -- numbers, dates and times ---------------------------------------------

    /// Skips an `_`, which must follow a digit of the current run in `text`
    /// (starting at byte `run_start`) and precede another digit.
    fn underscore(
        &mut self,
        text: &str,
        run_start: usize,
        is_digit: impl Fn(char) -> bool,
    ) -> Result<(), Error> {
        let span = self.scanner.codepoint_span();
        let after_digit = text.len() > run_start && text.chars().next_back().is_some_and(&is_digit);
        self.scanner.advance()?;
        if !after_digit || !self.scanner.current().is_some_and(&is_digit) {
            return Err((ErrorKind::UnderscoreMustBeSurroundedByDigits, span).into());
        }
        Ok(())
    }

    fn number_or_date(&mut self) -> Result<Value, Error> {
        let start = self.scanner.position();
        // underscores are checked and dropped as they are read
        let mut text = String::new();

        match self.scanner.current() {
            Some(sign @ ('+' | '-')) => {
                self.scanner.consume_into(&mut text)?;
                let negative = sign == '-';
                match self.scanner.current() {
                    Some('n') => {
                        self.scanner.expect_sequence("nan")?;
                        let nan = if negative { -f64::NAN } else { f64::NAN };
                        return Ok(Value::Float(Spanned::with_span(nan, self.span_from(start))));
                    }
                    Some('i') => {
                        self.scanner.expect_sequence("inf")?;
                        let inf = if negative {
                            f64::NEG_INFINITY
                        } else {
                            f64::INFINITY
                        };
                        return Ok(Value::Float(Spanned::with_span(inf, self.span_from(start))));
                    }
                    _ => {}
                }
            }
            Some('0') => {
                self.scanner.consume_into(&mut text)?;
                let radix = match self.scanner.current() {
                    Some('b') => 2,
                    Some('o') => 8,
                    Some('x') => 16,
                    _ => 10,
                };
                if radix != 10 {
                    return self.radix_integer(start, text, radix);
                }
            }
            _ => {}
        }

        let mut is_float = false;
        let mut underscored = false;
        loop {
            match self.scanner.current() {
                Some('e' | 'E') => {
                    self.scanner.consume_into(&mut text)?;
                    if matches!(self.scanner.current(), Some('+' | '-')) {
                        self.scanner.consume_into(&mut text)?;
                    }
                    is_float = true;
                }
                Some('_') => {
                    self.underscore(&text, 0, |c| c.is_ascii_digit())?;
                    underscored = true;
                }
                Some(c) if c.is_ascii_digit() => self.scanner.consume_into(&mut text)?,
                Some('.') => {
                    self.scanner.consume_into(&mut text)?;
                    is_float = true;
                }
                Some('-')
                    if !underscored
                        && text.len() == 4
                        && text.bytes().all(|b| b.is_ascii_digit()) =>
                {
                    return self.date(start, text);
                }
                Some(':') if !underscored && !is_float => return self.local_time(start, text),
                _ => break,
            }
        }

        let span = self.span_from(start);
        if has_leading_zero(&text) {
            return Err((ErrorKind::InvalidNumber(text), span).into());
        }
        if is_float {
            match parse_float(&text) {
                Some(value) => Ok(Value::Float(Spanned::with_span(value, span))),
                None => Err((ErrorKind::InvalidNumber(text), span).into()),
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => Ok(Value::Integer(Spanned::with_span(value, span))),
                Err(_) => Err((ErrorKind::InvalidNumber(text), span).into()),
            }
        }
    }

    /// Reads the digits of a `0b`, `0o` or `0x` integer; `text` holds the `0`.
    fn radix_integer(&mut self, start: Position, mut text: String, radix: u32) -> Result<Value, Error> {
        self.scanner.consume_into(&mut text)?;
        let prefix_len = text.len();
        let is_digit = |c: char| c.is_digit(radix);
        loop {
            match self.scanner.current() {
                Some('_') => self.underscore(&text, prefix_len, is_digit)?,
                Some(c) if is_digit(c) => self.scanner.consume_into(&mut text)?,
                _ => break,
            }
        }
        let span = self.span_from(start);
        match i64::from_str_radix(&text[prefix_len..], radix) {
            Ok(value) => Ok(Value::Integer(Spanned::with_span(value, span))),
            Err(_) => Err((ErrorKind::InvalidNumber(text), span).into()),
        }
    }

    /// Consumes at most two ASCII digits. Field widths are checked when the
    /// finished text is validated.
    fn two_digits(&mut self, text: &mut String) -> Result<(), Error> {
        for _ in 0..2 {
            if self.scanner.current().is_some_and(|c| c.is_ascii_digit()) {
                self.scanner.consume_into(text)?;
            }
        }
        Ok(())
    }

    /// Consumes `c` into `text` if it is next.
    fn eat_into(&mut self, c: char, text: &mut String) -> Result<bool, Error> {
        if self.scanner.eat(c)? {
            text.push(c);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Reads `MM:SS[.fraction]` after the hour and its colon. Returns `false`
    /// if the seconds are missing; the truncated text then fails validation.
    fn time_from_minutes(&mut self, text: &mut String) -> Result<bool, Error> {
        self.two_digits(text)?;
        if !self.eat_into(':', text)? {
            return Ok(false);
        }
        self.two_digits(text)?;
        if self.scanner.at('.') {
            self.scanner.consume_into(text)?;
            while self.scanner.current().is_some_and(|c| c.is_ascii_digit()) {
                self.scanner.consume_into(text)?;
            }
        }
        Ok(true)
    }

    /// Continues after `HH` at a `:`.
    fn local_time(&mut self, start: Position, mut text: String) -> Result<Value, Error> {
        self.scanner.consume_into(&mut text)?;
        self.time_from_minutes(&mut text)?;
        let span = self.span_from(start);
        match Time::parse(&text) {
            Some(time) => Ok(Value::LocalTime(Spanned::with_span(time, span))),
            None => Err((ErrorKind::InvalidLocalTime(text), span).into()),
        }
    }

    /// Continues after `YYYY` at a `-`.
    fn date(&mut self, start: Position, mut text: String) -> Result<Value, Error> {
        self.scanner.consume_into(&mut text)?;
        self.two_digits(&mut text)?;
        if !self.eat_into('-', &mut text)? {
            return local_date(text, self.span_from(start));
        }
        self.two_digits(&mut text)?;

        match self.scanner.current() {
            Some('T' | 't') => self.scanner.consume_into(&mut text)?,
            Some(' ') => {
                // either the date/time separator or whitespace after a date
                let end = self.scanner.position();
                self.scanner.advance()?;
                if self.scanner.current().is_some_and(|c| c.is_ascii_digit()) {
                    text.push(' ');
                } else {
                    return local_date(text, Span::new(start, end));
                }
            }
            _ => return local_date(text, self.span_from(start)),
        }

        self.two_digits(&mut text)?;
        let complete = self.eat_into(':', &mut text)? && self.time_from_minutes(&mut text)?;

        let has_offset = match self.scanner.current() {
            _ if !complete => false,
            Some('Z' | 'z') => {
                self.scanner.consume_into(&mut text)?;
                true
            }
            Some('+' | '-') => {
                self.scanner.consume_into(&mut text)?;
                self.two_digits(&mut text)?;
                if self.eat_into(':', &mut text)? {
                    self.two_digits(&mut text)?;
                }
                true
            }
            _ => false,
        };

        let span = self.span_from(start);
        if has_offset {
            match OffsetDateTime::parse(&text) {
                Some(value) => Ok(Value::OffsetDateTime(Spanned::with_span(value, span))),
                None => Err((ErrorKind::InvalidOffsetDateTime(text), span).into()),
            }
        } else {
            match LocalDateTime::parse(&text) {
                Some(value) => Ok(Value::LocalDateTime(Spanned::with_span(value, span))),
                None => Err((ErrorKind::InvalidLocalDateTime(text), span).into()),
            }
        }
    }

    // -- strings --------------------------------------------------------------

    /// Reads a basic (`"`) or literal (`'`) string in single- or multi-line
    /// form, starting at the opening quote.
    fn string(&mut self, quote: char, is_key: bool) -> Result<String, Error> {
        let basic = quote == '"';
        self.scanner.expect(quote)?;
        let mut out = String::new();
        let mut multiline = false;

        if self.scanner.at(quote) {
            self.scanner.advance()?;
            if !self.scanner.at(quote) {
                return Ok(out);
            }
            if is_key {
                return Err((ErrorKind::MultilineStringKey, self.scanner.codepoint_span()).into());
            }
            self.scanner.advance()?;
            multiline = true;
            self.skip_newline()?;
        }

        loop {
            match self.scanner.current() {
                None => return Err(self.scanner.error_here(ErrorKind::UnterminatedString)),
                Some(c) if c == quote => {
                    self.scanner.advance()?;
                    if !multiline {
                        return Ok(out);
                    }
                    let mut count = 1;
                    while count < 5 && self.scanner.at(quote) {
                        count += 1;
                        self.scanner.advance()?;
                    }
                    if count < 3 {
                        out.extend(std::iter::repeat_n(quote, count));
                    } else {
                        out.extend(std::iter::repeat_n(quote, count - 3));
                        return Ok(out);
                    }
                }
                Some('\\') if basic => self.escape(&mut out, multiline)?,
                Some('\r') if multiline => {
                    let span = self.scanner.codepoint_span();
                    self.scanner.advance()?;
                    if !self.scanner.eat('\n')? {
                        return Err((ErrorKind::UnexpectedControlCharacter('\r'), span).into());
                    }
                    out.push_str("\r\n");
                }
                Some(c) if is_control(c) && c != '\t' && !(multiline && c == '\n') => {
                    return Err((
                        ErrorKind::UnexpectedControlCharacter(c),
                        self.scanner.codepoint_span(),
                    )
                        .into());
                }
                Some(_) => self.scanner.consume_into(&mut out)?,
            }
        }
    }

    fn escape(&mut self, out: &mut String, multiline: bool) -> Result<(), Error> {
        self.scanner.expect('\\')?;
        let span = self.scanner.codepoint_span();
        let simple = match self.scanner.current() {
            Some('b') => Some('\u{8}'),
            Some('t') => Some('\t'),
            Some('n') => Some('\n'),
            Some('f') => Some('\u{c}'),
            Some('r') => Some('\r'),
            Some('"') => Some('"'),
            Some('\\') => Some('\\'),
            _ => None,
        };
        if let Some(c) = simple {
            out.push(c);
            return self.scanner.advance();
        }

        match self.scanner.current() {
            Some('u') => {
                self.scanner.advance()?;
                out.push(self.hex_escape(4)?);
                Ok(())
            }
            Some('U') => {
                self.scanner.advance()?;
                out.push(self.hex_escape(8)?);
                Ok(())
            }
            None => Err(self.scanner.error_here(ErrorKind::UnterminatedString)),
            // line-ending backslash: optional whitespace, then a newline
            Some(' ' | '\t' | '\n' | '\r') if multiline => loop {
                if self.skip_newline()? {
                    return self.skip_multiline_whitespace();
                }
                match self.scanner.current() {
                    Some(' ' | '\t') => self.scanner.advance()?,
                    None => return Err(self.scanner.error_here(ErrorKind::UnterminatedString)),
                    Some(_) => return Err((ErrorKind::InvalidEscape, span).into()),
                }
            },
            _ => Err((ErrorKind::InvalidEscape, span).into()),
        }
    }

    fn skip_multiline_whitespace(&mut self) -> Result<(), Error> {
        loop {
            if matches!(self.scanner.current(), Some(' ' | '\t')) {
                self.scanner.advance()?;
            } else if !self.skip_newline()? {
                return Ok(());
            }
        }
    }

    /// Reads exactly `digits` hex digits naming a Unicode scalar value.
    fn hex_escape(&mut self, digits: usize) -> Result<char, Error> {
        let start = self.scanner.position();
        let mut value: u32 = 0;
        for _ in 0..digits {
            let Some(digit) = self.scanner.current().and_then(|c| c.to_digit(16)) else {
                return Err((ErrorKind::InvalidEscape, self.scanner.codepoint_span()).into());
            };
            value = value * 16 + digit;
            self.scanner.advance()?;
        }
        match char::from_u32(value) {
            Some(c) => Ok(c),
            None => Err((ErrorKind::InvalidEscape, self.span_from(start)).into()),
        }
    }
}

fn local_date(text: String, span: Span) -> Result<Value, Error> {
    match Date::parse(&text) {
        Some(date) => Ok(Value::LocalDate(Spanned::with_span(date, span))),
        None => Err((ErrorKind::InvalidLocalDate(text), span).into()),
    }
}
