//! Scalar conversions shared by the argv parser and the bridge binder.
//!
//! These follow what the emitted C++ does with `from_token` and
//! `from_dynamic` expressions, so a record built here matches the record the
//! generated code would build from the same input.

use cmdgen_compiler::type_map::TRUTHY;
use cmdgen_compiler::FieldType;
use cmdgen_schema::{SortOrder, Value};
use serde_json::Value as Json;

use crate::error::BindError;

/// C `atoi`: leading whitespace, an optional sign, then as many digits as
/// follow. Anything unparsable yields `0`. Overflow wraps.
pub fn atoi(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mut value: i32 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.wrapping_mul(10).wrapping_add((digit - b'0') as i32);
    }
    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

fn first_char(text: &str) -> char {
    text.chars().next().unwrap_or('\0')
}

fn sort_order(text: &str) -> SortOrder {
    if first_char(text) == TRUTHY {
        SortOrder::Time
    } else {
        SortOrder::Cost
    }
}

/// Converts one argv token.
pub fn from_token(type_: &FieldType, token: &str) -> Value {
    match type_ {
        FieldType::String   => Value::String(token.to_string()),
        FieldType::Int      => Value::Int(atoi(token)),
        FieldType::Bool     => Value::Bool(first_char(token) == TRUTHY),
        FieldType::Char     => Value::Char(first_char(token)),
        FieldType::Date     => Value::Date(token.to_string()),
        FieldType::Instant  => Value::Instant(token.to_string()),
        FieldType::Duration => Value::Duration(atoi(token)),
        FieldType::SortType => Value::Sort(sort_order(token)),
        FieldType::Opaque(_) => Value::Opaque(token.to_string()),
    }
}

/// Name of the JavaScript kind a JSON value stands for.
pub fn kind_of(value: &Json) -> &'static str {
    match value {
        Json::Null      => "null",
        Json::Bool(_)   => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_)  => "array",
        Json::Object(_) => "object",
    }
}

/// `Int32Value`: truncate toward zero, then wrap modulo 2^32.
fn int32(number: &serde_json::Number) -> i32 {
    if let Some(value) = number.as_i64() {
        return value as i32;
    }
    match number.as_f64() {
        Some(value) if value.is_finite() => {
            let wrapped = value.trunc().rem_euclid(4_294_967_296.0);
            wrapped as u32 as i32
        }
        _ => 0,
    }
}

/// Converts one dynamic value. `field` names the member in errors.
pub fn from_dynamic<'a>(type_: &FieldType, field: &str, value: &'a Json) -> Result<Value, BindError> {
    let mismatch = |expected: &'static str| BindError::TypeMismatch {
        field: field.to_string(),
        expected,
        found: kind_of(value),
    };
    let string = |value: &'a Json| value.as_str().ok_or_else(|| mismatch("string"));
    let number = |value: &Json| match value {
        Json::Number(number) => Ok(int32(number)),
        _ => Err(mismatch("number")),
    };

    Ok(match type_ {
        FieldType::String   => Value::String(string(value)?.to_string()),
        FieldType::Int      => Value::Int(number(value)?),
        FieldType::Bool     => match value {
            Json::Bool(flag) => Value::Bool(*flag),
            _ => return Err(mismatch("boolean")),
        },
        FieldType::Char     => Value::Char(first_char(string(value)?)),
        FieldType::Date     => Value::Date(string(value)?.to_string()),
        FieldType::Instant  => Value::Instant(string(value)?.to_string()),
        FieldType::Duration => Value::Duration(number(value)?),
        FieldType::SortType => Value::Sort(sort_order(string(value)?)),
        FieldType::Opaque(_) => Value::Opaque(string(value)?.to_string()),
    })
}
