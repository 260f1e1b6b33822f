//! Value type definitions for Tabula tables.
//!
//! This module defines the `Value` enum which represents any value that can be stored
//! in a table cell, plus the `Null` literal that can appear in expressions.

use crate::types::DataType;
use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::fmt;

/// A value that can be stored in a table cell.
#[derive(Clone, Debug)]
pub enum Value {
    /// Absent value. Never storable, only usable as a literal.
    Null,
    /// UTF-8 text
    Text(String),
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),
    /// 32-bit floating point
    Float32(f32),
    /// 64-bit floating point
    Float64(f64),
    /// Boolean value
    Boolean(bool),
    /// Single character
    Char(char),
}

impl Value {
    /// Returns the data type of this value, or None if it's Null.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Text(_) => Some(DataType::Text),
            Value::Int32(_) => Some(DataType::Int32),
            Value::Int64(_) => Some(DataType::Int64),
            Value::Float32(_) => Some(DataType::Float32),
            Value::Float64(_) => Some(DataType::Float64),
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Char(_) => Some(DataType::Char),
        }
    }

    /// Returns the type name used in error messages ("null" for Null).
    pub fn type_name(&self) -> &'static str {
        self.data_type().map_or("null", |dt| dt.name())
    }

    /// Returns true if this value is Null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns a reference to the string if this is Text, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns the i32 value if this is an Int32, None otherwise.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the i64 value if this is an Int64, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the f32 value if this is a Float32, None otherwise.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the f64 value if this is a Float64, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean value if this is a Boolean, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the character if this is a Char, None otherwise.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(v) => Some(*v),
            _ => None,
        }
    }

    /// Widens any numeric value to f64.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Int32(v) => Some(*v as f64),
            Value::Int64(v) => Some(*v as f64),
            Value::Float32(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Natural ordering between two values.
    ///
    /// Defined between values of the same kind, and between any two numeric
    /// values. Returns None when the values are not mutually ordered (Null,
    /// or two different non-numeric kinds).
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::Int32(a), Value::Int32(b)) => Some(a.cmp(b)),
            (Value::Int64(a), Value::Int64(b)) => Some(a.cmp(b)),
            (Value::Int32(a), Value::Int64(b)) => Some((*a as i64).cmp(b)),
            (Value::Int64(a), Value::Int32(b)) => Some(a.cmp(&(*b as i64))),
            (Value::Int64(a), Value::Float32(_) | Value::Float64(_)) => {
                other.to_f64().map(|b| cmp_i64_f64(*a, b))
            }
            (Value::Float32(_) | Value::Float64(_), Value::Int64(b)) => {
                self.to_f64().map(|a| cmp_i64_f64(*b, a).reverse())
            }
            _ => match (self.to_f64(), other.to_f64()) {
                (Some(a), Some(b)) => Some(cmp_f64(a, b)),
                _ => None,
            },
        }
    }
}

/// Total order over floats: NaN sorts after every other number.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact order between a long and a float, without widening the long.
fn cmp_i64_f64(a: i64, b: f64) -> Ordering {
    // 2^63, the first float above every i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if b.is_nan() || b >= LIMIT {
        return Ordering::Less;
    }
    if b < -LIMIT {
        return Ordering::Greater;
    }
    // In range: the cast truncates toward zero and is exact for integral b.
    let whole = b as i64;
    match a.cmp(&whole) {
        Ordering::Equal => cmp_f64(whole as f64, b),
        ordering => ordering,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Float32(a), Value::Float32(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::Float64(a), Value::Float64(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Text(v) => f.write_str(v),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            // Debug keeps the fractional part ("6000.0"), so the text reads back as a float
            Value::Float32(v) => write!(f, "{v:?}"),
            Value::Float64(v) => write!(f, "{v:?}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}
