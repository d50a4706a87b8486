use crate::{
    types::{Command, Field, FieldType, Schema},
    utils::quote,
    error::CmdgenError,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use tracing::debug;

lazy_static! {
    static ref FIELD_SPEC: Regex = Regex::new(
        r"^(?P<type>[A-Za-z_][A-Za-z0-9_]*) (?P<name>[A-Za-z][A-Za-z0-9]*)(?P<optional>\?)?(?P<array>\[\])?(?: = (?P<default>.+))?$"
    ).unwrap();
    pub static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Parses one field spec line, e.g. `int privilege?` or `SortType sort = kTime`.
///
/// `command` and `flag` only label the error; a line that does not match the
/// grammar exactly aborts the run with `CmdgenError::SpecSyntax`.
pub fn parse_field(command: &str, flag: &str, text: &str) -> Result<Field, CmdgenError> {
    let caps = FIELD_SPEC.captures(text).ok_or_else(|| CmdgenError::SpecSyntax {
        command: command.to_string(),
        flag:    flag.to_string(),
        text:    text.to_string(),
    })?;

    Ok(Field {
        flag:        flag.to_string(),
        name:        caps["name"].to_string(),
        type_:       FieldType::from_name(&caps["type"]),
        is_optional: caps.name("optional").is_some(),
        is_array:    caps.name("array").is_some(),
        default:     caps.name("default").map(|m| m.as_str().to_string()),
    })
}

/// Parses a YAML command schema into the normalized model.
///
/// The document is a mapping of command name to a mapping of flag to field
/// spec. A command without fields may map to `{}` or to nothing at all.
/// Mapping order is kept as written.
pub fn parse_schema(text: &str) -> Result<Schema, CmdgenError> {
    let root: Value = serde_yaml::from_str(text)?;
    let commands_map = match root {
        Value::Mapping(m) => m,
        Value::Null => Mapping::new(),
        other => {
            return Err(CmdgenError::SchemaError(format!(
                "Expected a mapping of commands but found {}",
                describe(&other)
            )))
        }
    };

    let mut commands = Vec::with_capacity(commands_map.len());
    for (key, value) in &commands_map {
        let name = key_text(key, "command name")?;
        if !IDENTIFIER.is_match(name) {
            return Err(CmdgenError::SchemaError(format!(
                "Invalid command name {}",
                quote(name)
            )));
        }

        let fields_map = match value {
            Value::Mapping(m) => m.clone(),
            Value::Null => Mapping::new(),
            other => {
                return Err(CmdgenError::SchemaError(format!(
                    "Expected a mapping of flags for command {} but found {}",
                    quote(name),
                    describe(other)
                )))
            }
        };

        let mut fields = Vec::with_capacity(fields_map.len());
        for (flag_key, spec) in &fields_map {
            let flag = key_text(flag_key, "flag")?;
            if flag.is_empty() || flag.chars().any(char::is_whitespace) {
                return Err(CmdgenError::SchemaError(format!(
                    "Invalid flag {} for command {}",
                    quote(flag),
                    quote(name)
                )));
            }
            let spec = match spec {
                Value::String(s) => s.as_str(),
                other => {
                    return Err(CmdgenError::SchemaError(format!(
                        "The spec for flag {} of command {} must be a string but found {}",
                        quote(flag),
                        quote(name),
                        describe(other)
                    )))
                }
            };
            fields.push(parse_field(name, flag, spec)?);
        }

        debug!(command = name, fields = fields.len(), "parsed command");
        commands.push(Command {
            name: name.to_string(),
            fields,
        });
    }

    Ok(Schema { commands })
}

fn key_text<'a>(key: &'a Value, what: &str) -> Result<&'a str, CmdgenError> {
    match key {
        Value::String(s) => Ok(s.as_str()),
        other => Err(CmdgenError::SchemaError(format!(
            "Expected a string {} but found {}",
            what,
            describe(other)
        ))),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null        => "null",
        Value::Bool(_)     => "a boolean",
        Value::Number(_)   => "a number",
        Value::String(_)   => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_)  => "a mapping",
        Value::Tagged(_)   => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_field() {
        let field = parse_field("login", "-u", "string username").unwrap();
        assert_eq!(field.flag, "-u");
        assert_eq!(field.name, "username");
        assert_eq!(field.type_, FieldType::String);
        assert!(!field.is_optional);
        assert!(!field.is_array);
        assert_eq!(field.default, None);
        assert!(field.is_required());
    }

    #[test]
    fn test_parse_modifiers() {
        let field = parse_field("add_user", "-g", "int privilege?").unwrap();
        assert_eq!(field.type_, FieldType::Int);
        assert!(field.is_optional);
        assert!(!field.is_array);

        let field = parse_field("add_train", "-p", "int prices[]").unwrap();
        assert!(field.is_array);
        assert!(!field.is_optional);

        let field = parse_field("x", "-a", "Date days?[]").unwrap();
        assert_eq!(field.type_, FieldType::Date);
        assert!(field.is_optional);
        assert!(field.is_array);
    }

    #[test]
    fn test_parse_default_is_verbatim() {
        let field = parse_field("query_ticket", "-p", "SortType sort = kTime").unwrap();
        assert_eq!(field.type_, FieldType::SortType);
        assert_eq!(field.default.as_deref(), Some("kTime"));
        assert!(!field.is_optional);
        assert!(field.may_be_absent());

        let field = parse_field("x", "-v", "string greeting = \"hello world\"").unwrap();
        assert_eq!(field.default.as_deref(), Some("\"hello world\""));
    }

    #[test]
    fn test_parse_unknown_type_is_opaque() {
        let field = parse_field("x", "-t", "Ticket ticket").unwrap();
        assert_eq!(field.type_, FieldType::Opaque("Ticket".into()));
    }

    #[test]
    fn test_reject_malformed_specs() {
        for text in [
            "string",
            "string  username",
            "string user-name",
            "string username[]?",
            "string username =",
            "string username=1",
            " string username",
            "string username extra",
            "",
        ] {
            let err = parse_field("login", "-u", text).unwrap_err();
            assert!(
                matches!(err, CmdgenError::SpecSyntax { .. }),
                "expected a SpecSyntax error for {:?} but got {:?}",
                text,
                err
            );
        }
    }

    #[test]
    fn test_parse_schema_keeps_order() {
        let input = r#"
zeta:
  -b: "int second"
  -a: "string first"
alpha: {}
middle:
"#;
        let schema = parse_schema(input).unwrap();
        let names: Vec<&str> = schema.commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "middle"]);

        let zeta = &schema.commands[0];
        assert_eq!(zeta.fields[0].flag, "-b");
        assert_eq!(zeta.fields[0].name, "second");
        assert_eq!(zeta.fields[1].flag, "-a");
        assert!(schema.commands[1].fields.is_empty());
        assert!(schema.commands[2].fields.is_empty());
    }

    #[test]
    fn test_parse_schema_reports_bad_spec_with_context() {
        let input = "login:\n  -u: \"string user name\"\n";
        match parse_schema(input).unwrap_err() {
            CmdgenError::SpecSyntax { command, flag, text } => {
                assert_eq!(command, "login");
                assert_eq!(flag, "-u");
                assert_eq!(text, "string user name");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_parse_schema_rejects_bad_shapes() {
        assert!(matches!(parse_schema("- login"), Err(CmdgenError::SchemaError(_))));
        assert!(matches!(parse_schema("login: 3"), Err(CmdgenError::SchemaError(_))));
        assert!(matches!(parse_schema("login:\n  -u: 3"), Err(CmdgenError::SchemaError(_))));
        assert!(matches!(parse_schema("\"log in\": {}"), Err(CmdgenError::SchemaError(_))));
        assert!(matches!(parse_schema("login:\n  \"-u x\": \"string u\""), Err(CmdgenError::SchemaError(_))));
        assert!(matches!(parse_schema("login: [unclosed"), Err(CmdgenError::Yaml(_))));
    }
}
