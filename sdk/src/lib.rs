//! cmdgen
//!
//! Runtime counterpart of the generated code. It parses argument vectors and
//! binds option objects the way the emitted `parse` functions and Node-API
//! bridge do, so their behavior can be exercised from Rust.
//!
//! - `parse_argv` / `parse_line`: the generated `parse` overloads
//! - `bind_object` and `Bridge`: the generated `nodeXxx` functions and `init`
//! - `Record` / `Value`: re-exported from cmdgen-schema

pub mod argv;
pub mod bridge;
pub mod convert;
pub mod error;

pub use argv::{parse_argv, parse_line, Invocation};
pub use bridge::{bind_object, bind_record, Bridge, RunHandler};
pub use error::{BindError, BridgeError, HandlerError, ParseException};

pub use cmdgen_compiler::{load_schema, CmdgenError, Command, Field, FieldType, GeneratorConfig, Schema};
pub use cmdgen_schema::{Record, Slot, SortOrder, Value};

/// A record as its constructor leaves it: arrays empty, defaulted members at
/// their initializer, everything else unset.
pub fn default_record(command: &Command) -> Record {
    let mut record = Record::new(command.record_name());
    for field in &command.fields {
        let slot = match (&field.default, field.is_array) {
            (Some(default), _) => Slot::Default(default.clone()),
            (None, true) => Slot::Set(Value::Array(Vec::new())),
            (None, false) => Slot::Unset,
        };
        record.declare(field.name.clone(), slot);
    }
    record
}
