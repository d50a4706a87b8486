use thiserror::Error;

/// Rejection of an argument vector, as the generated `parse` reports it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseException {
    #[error("Empty argument vector")]
    Empty,

    #[error("Unknown command {0:?}")]
    UnknownCommand(String),

    #[error("Unknown flag {flag:?} for command {command:?}")]
    UnknownFlag { command: String, flag: String },

    #[error("Flag {flag:?} of command {command:?} expects a value")]
    MissingValue { command: String, flag: String },

    #[error("Command {command:?} is missing mandatory fields: {}", fields.join(", "))]
    MissingFields { command: String, fields: Vec<String> },
}

/// Failure to read a record out of a dynamic argument object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("Expected an object of options, got {0}")]
    NotAnObject(&'static str),

    #[error("Missing required field {0:?}")]
    MissingField(String),

    #[error("Field {field:?} expects {expected}, got {found}")]
    TypeMismatch {
        field:    String,
        expected: &'static str,
        found:    &'static str,
    },
}

/// Error returned by a run handler. Carries the message the host shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        HandlerError(message.to_string())
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        HandlerError(message)
    }
}

/// The error a bridge call surfaces to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("No function is exported as {0:?}")]
    UnknownExport(String),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error("Error: {0}")]
    Handler(#[from] HandlerError),
}
