#![cfg_attr(docsrs, doc(cfg(feature = "serde")))]

//! Provides [`serde::Serialize`] support for the parsed tree.
//!
//! Spans are dropped. Tables serialize as maps in source order, arrays as
//! sequences, and dates and times as their RFC 3339 strings.

#[cfg(test)]
#[path = "./impl_serde_tests.rs"]
mod tests;

use crate::time::{Date, LocalDateTime, OffsetDateTime, Time};
use crate::{Array, Key, Spanned, Table, Value};
use serde::ser::{SerializeMap, SerializeSeq};

impl<T> serde::Serialize for Spanned<T>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl serde::Serialize for Key {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ser.serialize_str(&self.name)
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::String(s) => ser.serialize_str(&s.value),
            Value::Integer(i) => ser.serialize_i64(i.value),
            Value::Float(f) => ser.serialize_f64(f.value),
            Value::Boolean(b) => ser.serialize_bool(b.value),
            Value::LocalDate(d) => d.serialize(ser),
            Value::LocalDateTime(d) => d.serialize(ser),
            Value::LocalTime(t) => t.serialize(ser),
            Value::OffsetDateTime(d) => d.serialize(ser),
            Value::Array(arr) => arr.serialize(ser),
            Value::Table(tab) => tab.serialize(ser),
        }
    }
}

impl serde::Serialize for Array {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = ser.serialize_seq(Some(self.len()))?;
        for ele in self {
            seq.serialize_element(ele)?;
        }
        seq.end()
    }
}

impl serde::Serialize for Table {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = ser.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

macro_rules! serialize_as_display {
    ($($ty:ty),*) => {$(
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                ser.collect_str(self)
            }
        }
    )*};
}

serialize_as_display!(Date, Time, LocalDateTime, OffsetDateTime);
