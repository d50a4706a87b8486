//! Reference implementation of the generated Node-API bridge.
//!
//! Argument objects are JSON values standing in for the JavaScript objects a
//! host passes. Keys are record member names, the same names the declaration
//! file exposes.

use cmdgen_compiler::{Command, Field, Schema};
use cmdgen_schema::{Record, Value};
use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::argv::Invocation;
use crate::convert::{from_dynamic, kind_of};
use crate::default_record;
use crate::error::{BindError, BridgeError, HandlerError};

/// The per-command entry point that bridge calls are dispatched to, the
/// counterpart of the `run` overloads.
pub trait RunHandler {
    type Response;

    fn run(&mut self, invocation: &Invocation) -> Result<Self::Response, HandlerError>;
}

impl<R, F> RunHandler for F
where
    F: FnMut(&Invocation) -> Result<R, HandlerError>,
{
    type Response = R;

    fn run(&mut self, invocation: &Invocation) -> Result<R, HandlerError> {
        self(invocation)
    }
}

/// Builds the record of `command` from an options object.
pub fn bind_record(command: &Command, args: &Json) -> Result<Record, BindError> {
    let mut record = default_record(command);
    if command.fields.is_empty() {
        return Ok(record);
    }
    let args = match args {
        Json::Object(map) => map,
        other => return Err(BindError::NotAnObject(kind_of(other))),
    };
    for field in &command.fields {
        if let Some(value) = bind_field(field, args)? {
            record.set(&field.name, value);
        }
    }
    Ok(record)
}

fn bind_field(field: &Field, args: &Map<String, Json>) -> Result<Option<Value>, BindError> {
    let value = match args.get(&field.name) {
        Some(value) if !value.is_null() => value,
        _ if field.may_be_absent() => return Ok(None),
        _ => return Err(BindError::MissingField(field.name.clone())),
    };
    if !field.is_array {
        return from_dynamic(&field.type_, &field.name, value).map(Some);
    }
    match value {
        Json::Array(items) => items
            .iter()
            .map(|item| from_dynamic(&field.type_, &field.name, item))
            .collect::<Result<Vec<_>, _>>()
            .map(|items| Some(Value::Array(items))),
        other => Err(BindError::TypeMismatch {
            field:    field.name.clone(),
            expected: "array",
            found:    kind_of(other),
        }),
    }
}

/// Binds the options object of the function exported as `export_name`.
pub fn bind_object(schema: &Schema, export_name: &str, args: &Json) -> Result<Invocation, BridgeError> {
    let command = schema
        .command_by_export(export_name)
        .ok_or_else(|| BridgeError::UnknownExport(export_name.to_string()))?;
    let record = bind_record(command, args)?;
    Ok(Invocation { command: command.name.clone(), record })
}

/// The registration table of a generated module: every command under its
/// export name, dispatching to one handler.
pub struct Bridge<H: RunHandler> {
    schema:  Schema,
    handler: H,
}

impl<H: RunHandler> Bridge<H> {
    pub fn new(schema: Schema, handler: H) -> Self {
        Bridge { schema, handler }
    }

    /// Export names in registration order.
    pub fn exports(&self) -> Vec<String> {
        self.schema.commands.iter().map(Command::export_name).collect()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Calls the function exported as `name`. Handler failures surface as
    /// [BridgeError::Handler].
    pub fn call(&mut self, name: &str, args: &Json) -> Result<H::Response, BridgeError> {
        let invocation = bind_object(&self.schema, name, args)?;
        debug!(export = name, command = %invocation.command, "bridge call");
        let response = self.handler.run(&invocation)?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdgen_compiler::{load_schema, GeneratorConfig};
    use cmdgen_schema::Slot;
    use serde_json::json;

    fn schema() -> Schema {
        let text = "\
refund_ticket:
  -u: string currentUser
  -n: int index = 1
  -d: Date dates?[]
clean: {}
";
        load_schema(text, &GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn test_bind_record() {
        let schema = schema();
        let refund = schema.command("refund_ticket").unwrap();

        let record = bind_record(refund, &json!({ "currentUser": "alice", "dates": null })).unwrap();
        assert_eq!(record.value("currentUser"), Some(&Value::String("alice".to_string())));
        assert_eq!(record.get("index"), Some(&Slot::Default("1".to_string())));
        assert_eq!(record.value("dates"), Some(&Value::Array(vec![])));

        let record = bind_record(refund, &json!({ "currentUser": "bob", "dates": ["06-01", "06-02"] })).unwrap();
        assert_eq!(record.value("dates").map(Value::len), Some(2));
    }

    #[test]
    fn test_bind_errors() {
        let schema = schema();
        let refund = schema.command("refund_ticket").unwrap();
        assert_eq!(bind_record(refund, &json!("alice")), Err(BindError::NotAnObject("string")));
        assert_eq!(
            bind_record(refund, &json!({ "index": 2 })),
            Err(BindError::MissingField("currentUser".to_string()))
        );
        assert_eq!(
            bind_record(refund, &json!({ "currentUser": "a", "dates": "06-01" })),
            Err(BindError::TypeMismatch { field: "dates".to_string(), expected: "array", found: "string" })
        );
        // Commands without fields never look at their argument.
        assert!(bind_record(schema.command("clean").unwrap(), &Json::Null).is_ok());
    }

    #[test]
    fn test_closure_handler() {
        let mut bridge = Bridge::new(schema(), |invocation: &Invocation| -> Result<usize, HandlerError> {
            Ok(invocation.record.len())
        });
        assert_eq!(bridge.exports(), ["refundTicket", "clean"]);
        assert_eq!(bridge.call("refundTicket", &json!({ "currentUser": "a" })), Ok(3));
        assert_eq!(bridge.call("clean", &json!({})), Ok(0));
        assert_eq!(bridge.call("missing", &json!({})), Err(BridgeError::UnknownExport("missing".to_string())));
    }
}
