use thiserror::Error;

#[derive(Debug, Error)]
pub enum CmdgenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field specification line does not match
    /// `<type> <fieldName>[?][[]][ = <default>]`.
    #[error("Invalid field spec {text:?} for flag {flag:?} of command {command:?}")]
    SpecSyntax {
        command: String,
        flag:    String,
        text:    String,
    },

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Verifier error: {0}")]
    VerifierError(String),
}
