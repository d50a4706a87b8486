//! Per-target type tables.
//!
//! Each abstract `FieldType` maps to a declared type per target, to the C++
//! expression converting a raw argv token, and to the C++ expression
//! converting a Node-API value. Array and optional wrapping is applied by the
//! `*_field_type` helpers, never by `declared_type`.

use crate::types::{Field, FieldType};

/// First character that makes a token read as `true` (and as `kTime`).
pub const TRUTHY: char = 't';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Cpp,
    TypeScript,
}

pub fn declared_type(type_: &FieldType, target: Target) -> String {
    match target {
        Target::Cpp => match type_ {
            FieldType::String => "std::string".to_string(),
            other => other.name().to_string(),
        },
        Target::TypeScript => match type_ {
            FieldType::String | FieldType::Char => "string".to_string(),
            FieldType::Int  => "number".to_string(),
            FieldType::Bool => "boolean".to_string(),
            FieldType::Date => "DateString".to_string(),
            // Opaque values cross the bridge through CPP_STR, so they are
            // typed `string` rather than by their C++ name.
            FieldType::Opaque(_) => "string".to_string(),
            other => other.name().to_string(),
        },
    }
}

/// `Vector<T>` for arrays, `Optional<T>` for `?` fields, `T` otherwise.
pub fn cpp_field_type(field: &Field) -> String {
    let base = declared_type(&field.type_, Target::Cpp);
    if field.is_array {
        format!("Vector<{}>", base)
    } else if field.is_optional {
        format!("Optional<{}>", base)
    } else {
        base
    }
}

pub fn ts_field_type(field: &Field) -> String {
    let base = declared_type(&field.type_, Target::TypeScript);
    if field.is_array {
        format!("{}[]", base)
    } else {
        base
    }
}

/// Expression converting the C string `expr` (one argv token) into `type_`.
pub fn from_token(type_: &FieldType, expr: &str) -> String {
    match type_ {
        FieldType::Int      => format!("atoi({})", expr),
        FieldType::Bool     => format!("{}[0] == '{}'", expr, TRUTHY),
        FieldType::Char     => format!("*{}", expr),
        FieldType::SortType => format!("{}[0] == '{}' ? kTime : kCost", expr, TRUTHY),
        FieldType::Duration => format!("Duration(atoi({}))", expr),
        FieldType::Date | FieldType::Instant => format!("{}({})", type_.name(), expr),
        FieldType::String | FieldType::Opaque(_) => expr.to_string(),
    }
}

/// Expression converting the `Napi::Value` `expr` into `type_`.
/// Relies on the `CPP_STR`, `CPP_INT` and `CPP_BOOL` macros of the bridge file.
pub fn from_dynamic(type_: &FieldType, expr: &str) -> String {
    match type_ {
        FieldType::Int      => format!("CPP_INT({})", expr),
        FieldType::Bool     => format!("CPP_BOOL({})", expr),
        FieldType::Char     => format!("CPP_STR({})[0]", expr),
        FieldType::SortType => format!("CPP_STR({})[0] == '{}' ? kTime : kCost", expr, TRUTHY),
        FieldType::Duration => format!("Duration(CPP_INT({}))", expr),
        FieldType::Date | FieldType::Instant => {
            format!("{}(CPP_STR({}).data())", type_.name(), expr)
        }
        FieldType::String | FieldType::Opaque(_) => format!("CPP_STR({})", expr),
    }
}
