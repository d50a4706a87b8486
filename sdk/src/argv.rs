//! Reference implementation of the generated `parse` functions.

use std::collections::HashSet;

use cmdgen_compiler::gen_parser::ARRAY_SEPARATOR;
use cmdgen_compiler::{Field, FieldType, Schema};
use cmdgen_schema::{Record, Value};
use serde::Serialize;
use tracing::debug;

use crate::convert::from_token;
use crate::default_record;
use crate::error::ParseException;

/// A successfully parsed command line: the command it selected and its record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invocation {
    pub command: String,
    pub record:  Record,
}

/// Mirrors `parse(std::string &)`: splits on single spaces and delegates.
/// Runs of spaces produce no empty tokens.
pub fn parse_line(schema: &Schema, line: &str) -> Result<Invocation, ParseException> {
    let argv: Vec<&str> = line.split(' ').filter(|token| !token.is_empty()).collect();
    parse_argv(schema, &argv)
}

/// Mirrors `parse(const Vector<std::string_view> &)`.
pub fn parse_argv<S: AsRef<str>>(schema: &Schema, argv: &[S]) -> Result<Invocation, ParseException> {
    let name = match argv.first() {
        Some(name) => name.as_ref(),
        None => return Err(ParseException::Empty),
    };
    let command = schema
        .command(name)
        .ok_or_else(|| ParseException::UnknownCommand(name.to_string()))?;

    let mut record = default_record(command);
    if command.fields.is_empty() {
        return Ok(Invocation { command: command.name.clone(), record });
    }

    let mut seen = HashSet::new();
    let mut i = 1;
    while i < argv.len() {
        let flag = argv[i].as_ref();
        let field = command.field_by_flag(flag).ok_or_else(|| ParseException::UnknownFlag {
            command: command.name.clone(),
            flag:    flag.to_string(),
        })?;
        i += 1;
        let token = match argv.get(i) {
            Some(token) => token.as_ref(),
            None => {
                return Err(ParseException::MissingValue {
                    command: command.name.clone(),
                    flag:    flag.to_string(),
                })
            }
        };
        record.set(&field.name, convert(field, token));
        seen.insert(field.name.as_str());
        i += 1;
    }

    let missing: Vec<String> = command
        .required_fields()
        .filter(|field| !seen.contains(field.name.as_str()))
        .map(|field| field.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(ParseException::MissingFields { command: command.name.clone(), fields: missing });
    }

    debug!(command = %command.name, arguments = argv.len() - 1, "parsed command line");
    Ok(Invocation { command: command.name.clone(), record })
}

fn convert(field: &Field, token: &str) -> Value {
    if !field.is_array {
        return from_token(&field.type_, token);
    }
    let pieces = token.split(ARRAY_SEPARATOR).filter(|piece| !piece.is_empty());
    Value::Array(match field.type_ {
        FieldType::String => pieces.map(|piece| Value::String(piece.to_string())).collect(),
        ref other => pieces.map(|piece| from_token(other, piece)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdgen_compiler::{load_schema, GeneratorConfig};
    use cmdgen_schema::{SortOrder, Slot};

    fn schema() -> Schema {
        let text = "\
query_ticket:
  -s: string from
  -t: string to
  -d: Date date
  -p: SortType sort = kTime
buy_ticket:
  -u: string currentUser
  -n: int count
  -q: bool queue = false
exit: {}
";
        load_schema(text, &GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_line_defaults() {
        let schema = schema();
        let invocation = parse_line(&schema, "query_ticket  -s Shanghai -t Beijing -d 06-01").unwrap();
        assert_eq!(invocation.command, "query_ticket");
        assert_eq!(invocation.record.name, "QueryTicket");
        assert_eq!(invocation.record.value("from"), Some(&Value::String("Shanghai".to_string())));
        assert_eq!(invocation.record.value("date"), Some(&Value::Date("06-01".to_string())));
        assert_eq!(invocation.record.get("sort"), Some(&Slot::Default("kTime".to_string())));

        let invocation = parse_line(&schema, "query_ticket -s a -t b -d 06-02 -p cost").unwrap();
        assert_eq!(invocation.record.value("sort"), Some(&Value::Sort(SortOrder::Cost)));
    }

    #[test]
    fn test_zero_field_command_ignores_the_rest() {
        let schema = schema();
        let invocation = parse_argv(&schema, &["exit", "-x"]).unwrap();
        assert!(invocation.record.is_empty());
        assert_eq!(invocation.record.name, "Exit");
    }

    #[test]
    fn test_missing_fields_are_listed_in_order() {
        let schema = schema();
        let err = parse_argv(&schema, &["buy_ticket", "-q", "true"]).unwrap_err();
        assert_eq!(
            err,
            ParseException::MissingFields {
                command: "buy_ticket".to_string(),
                fields:  vec!["currentUser".to_string(), "count".to_string()],
            }
        );
    }
}
