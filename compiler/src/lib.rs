//! cmdgen-compiler
//!
//! This crate implements:
//!  1) A YAML schema loader and the field spec parser
//!     (`<type> <fieldName>[?][[]][ = <default>]`),
//!  2) A schema verifier (colliding record names, reserved names, duplicate
//!     fields, undeclared opaque types, etc.),
//!  3) The per-target type tables (`type_map`),
//!  4) Code generation: the C++ record/union header, the dispatch header, the
//!     argv parser, the Node-API bridge and the TypeScript declarations,
//!  5) Error types (`CmdgenError`) and the generator configuration.

pub mod error;
pub mod types;
pub mod utils;
pub mod config;
pub mod parser;
pub mod verifier;
pub mod type_map;
pub mod gen_cpp;
pub mod gen_parser;
pub mod gen_node;
pub mod gen_dts;
pub mod compiler;

pub use compiler::{compile_schema, generate, load_schema, schema_to_json, Artifacts};
pub use config::GeneratorConfig;
pub use error::CmdgenError;
pub use types::{Command, Field, FieldType, Schema};
