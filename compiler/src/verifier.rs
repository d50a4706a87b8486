use std::collections::HashMap;
use crate::{
    types::{FieldType, Schema},
    parser::IDENTIFIER,
    utils::{capitalize, quote},
    error::CmdgenError,
};

/// Names the generated header already declares.
pub const RESERVED_NAMES: [&str; 5] = [
    "Command", "ParseException", "SortType", "Response", "Exception",
];

pub const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor",
    "bool", "break", "case", "catch", "char", "char8_t", "char16_t", "char32_t",
    "class", "compl", "concept", "const", "consteval", "constexpr", "constinit",
    "const_cast", "continue", "co_await", "co_return", "co_yield", "decltype",
    "default", "delete", "do", "double", "dynamic_cast", "else", "enum",
    "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept",
    "not", "not_eq", "nullptr", "operator", "or", "or_eq", "private",
    "protected", "public", "register", "reinterpret_cast", "requires", "return",
    "short", "signed", "sizeof", "static", "static_assert", "static_cast",
    "struct", "switch", "template", "this", "thread_local", "throw", "true",
    "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

/// Words a JavaScript module cannot use as an exported function name.
pub const JS_RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "export", "extends", "false",
    "finally", "for", "function", "if", "implements", "import", "in",
    "instanceof", "interface", "let", "new", "null", "package", "private",
    "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Returns `Ok(())` if verification passed, or `Err(CmdgenError::VerifierError(_))` otherwise.
pub fn verify_schema(schema: &Schema, opaque_types: &[String]) -> Result<(), CmdgenError> {
    // 1) Declared opaque types must be plain identifiers distinct from the builtins
    for name in opaque_types {
        if !IDENTIFIER.is_match(name) {
            return Err(CmdgenError::VerifierError(format!(
                "The opaque type name {} is not an identifier",
                quote(name)
            )));
        }
        if FieldType::BUILTIN_NAMES.contains(&name.as_str()) {
            return Err(CmdgenError::VerifierError(format!(
                "The opaque type {} shadows a builtin type",
                quote(name)
            )));
        }
    }

    if schema.commands.is_empty() {
        return Err(CmdgenError::VerifierError(
            "The schema defines no commands".to_string(),
        ));
    }

    // 2) Record names must be unique and not reserved
    let mut records: HashMap<String, &str> = HashMap::new();
    for command in &schema.commands {
        let record = command.record_name();
        if let Some(previous) = records.get(&record) {
            return Err(CmdgenError::VerifierError(format!(
                "The commands {} and {} both map to the record {}",
                quote(previous),
                quote(&command.name),
                quote(&record)
            )));
        }
        if RESERVED_NAMES.contains(&record.as_str()) {
            return Err(CmdgenError::VerifierError(format!(
                "The record name {} of command {} is reserved",
                quote(&record),
                quote(&command.name)
            )));
        }
        let export = command.export_name();
        if JS_RESERVED_WORDS.contains(&export.as_str()) {
            return Err(CmdgenError::VerifierError(format!(
                "The export name {} of command {} is a JavaScript reserved word",
                quote(&export),
                quote(&command.name)
            )));
        }
        records.insert(record, &command.name);
    }

    // 3) Check fields inside each command
    for command in &schema.commands {
        let mut names: Vec<&str> = Vec::with_capacity(command.fields.len());
        // The parser's `seenX` locals capitalize the field name.
        let mut locals: HashMap<String, &str> = HashMap::new();
        for field in &command.fields {
            if names.contains(&field.name.as_str()) {
                return Err(CmdgenError::VerifierError(format!(
                    "The field {} is defined twice in command {}",
                    quote(&field.name),
                    quote(&command.name)
                )));
            }
            if CPP_KEYWORDS.contains(&field.name.as_str()) {
                return Err(CmdgenError::VerifierError(format!(
                    "The field name {} in command {} is a C++ keyword",
                    quote(&field.name),
                    quote(&command.name)
                )));
            }
            if let Some(other) = locals.get(&capitalize(&field.name)) {
                return Err(CmdgenError::VerifierError(format!(
                    "The fields {} and {} in command {} differ only in the case of their first letter",
                    quote(other),
                    quote(&field.name),
                    quote(&command.name)
                )));
            }
            if let FieldType::Opaque(ref ty) = field.type_ {
                if !opaque_types.iter().any(|t| t == ty) {
                    return Err(CmdgenError::VerifierError(format!(
                        "The type {} is not defined for field {}",
                        quote(ty),
                        quote(&field.name)
                    )));
                }
            }
            names.push(&field.name);
            locals.insert(capitalize(&field.name), &field.name);
        }
    }

    Ok(())
}
