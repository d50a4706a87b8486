use std::fmt;
use std::ops::Index;

use serde::{Serialize, Serializer};

/// The two members of the `SortType` enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// `kTime`
    Time,
    /// `kCost`
    Cost,
}

/// This type holds one converted command argument.
///
/// Values mirror what the generated C++ stores in a record member: dates and
/// instants keep the raw text their constructor would receive, durations are
/// minutes, and opaque types keep the token they were given.
#[derive(Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i32),
    Bool(bool),
    Char(char),
    Date(String),
    Instant(String),
    Duration(i32),
    Sort(SortOrder),
    Opaque(String),
    Array(Vec<Value>),
}

impl Value {
    /// A convenience method to extract the value out of an [Int](#variant.Int)
    /// or a [Duration](#variant.Duration).
    /// Returns `0` for other value kinds.
    pub fn as_int(&self) -> i32 {
        match *self {
            Value::Int(value) | Value::Duration(value) => value,
            _ => 0,
        }
    }

    /// A convenience method to extract the value out of a [Bool](#variant.Bool).
    /// Returns `false` for other value kinds.
    pub fn as_bool(&self) -> bool {
        match *self {
            Value::Bool(value) => value,
            _ => false,
        }
    }

    /// A convenience method to extract the value out of a [Char](#variant.Char).
    /// Returns `'\0'` for other value kinds.
    pub fn as_char(&self) -> char {
        match *self {
            Value::Char(value) => value,
            _ => '\0',
        }
    }

    /// A convenience method to extract the text of any textual value kind.
    /// Returns `""` for other value kinds.
    pub fn as_str(&self) -> &str {
        match *self {
            Value::String(ref value)
            | Value::Date(ref value)
            | Value::Instant(ref value)
            | Value::Opaque(ref value) => value.as_str(),
            _ => "",
        }
    }

    /// A convenience method to extract the elements of an [Array](#variant.Array).
    /// Returns an empty slice for other value kinds.
    pub fn as_array(&self) -> &[Value] {
        match *self {
            Value::Array(ref values) => values.as_slice(),
            _ => &[],
        }
    }

    /// Returns `None` for other value kinds.
    pub fn as_sort(&self) -> Option<SortOrder> {
        match *self {
            Value::Sort(order) => Some(order),
            _ => None,
        }
    }

    /// Number of elements of an [Array](#variant.Array), `0` otherwise.
    pub fn len(&self) -> usize {
        self.as_array().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Index<usize> for Value {
    type Output = Value;

    /// A convenience method that adds support for `self[index]` expressions.
    /// It will panic if this value isn't an [Array](#variant.Array) or if the
    /// provided index is out of bounds.
    fn index(&self, index: usize) -> &Value {
        match *self {
            Value::Array(ref values) => &values[index],
            _ => panic!("index {} into a non-array value", index),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match *self {
            Value::String(ref value) => value.fmt(f),
            Value::Int(value) => value.fmt(f),
            Value::Bool(value) => value.fmt(f),
            Value::Char(value) => value.fmt(f),
            Value::Date(ref value) => write!(f, "Date({:?})", value),
            Value::Instant(ref value) => write!(f, "Instant({:?})", value),
            Value::Duration(value) => write!(f, "Duration({})", value),
            Value::Sort(SortOrder::Time) => write!(f, "kTime"),
            Value::Sort(SortOrder::Cost) => write!(f, "kCost"),
            Value::Opaque(ref value) => value.fmt(f),
            Value::Array(ref values) => values.fmt(f),
        }
    }
}

/// Values serialize as the plain JSON a host would hand back to JavaScript.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Value::String(ref value)
            | Value::Date(ref value)
            | Value::Instant(ref value)
            | Value::Opaque(ref value) => serializer.serialize_str(value),
            Value::Int(value) | Value::Duration(value) => serializer.serialize_i32(value),
            Value::Bool(value) => serializer.serialize_bool(value),
            Value::Char(value) => serializer.serialize_char(value),
            Value::Sort(order) => order.serialize(serializer),
            Value::Array(ref values) => values.serialize(serializer),
        }
    }
}
