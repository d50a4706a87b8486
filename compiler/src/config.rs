//! Generator configuration.
//!
//! Every key is optional; the defaults reproduce the layout of the ticket
//! system the generator was written for.
//!
//! ```yaml
//! namespace: ticket::command
//! parser_guard: TICKET_PARSER_H_
//! run_guard: TICKET_RUN_H_
//! response_module: ./response
//! source_dir: src
//! declaration_dir: .
//! includes:
//!   - ticket.h
//! opaque_types:
//!   - Ticket
//! files:
//!   header: parser.h
//!   run_header: run.h
//!   source: parser.cpp
//!   bridge: node.cpp
//!   declarations: index.d.ts
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CmdgenError;

/// File names of the five artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFiles {
    pub header:       String,
    pub run_header:   String,
    pub source:       String,
    pub bridge:       String,
    pub declarations: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            header:       "parser.h".to_string(),
            run_header:   "run.h".to_string(),
            source:       "parser.cpp".to_string(),
            bridge:       "node.cpp".to_string(),
            declarations: "index.d.ts".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// C++ namespace wrapping every generated declaration.
    pub namespace:       String,
    /// Include guard of the header.
    pub parser_guard:    String,
    /// Include guard of the dispatch header.
    pub run_guard:       String,
    /// Module the declaration file imports `Response` from.
    pub response_module: String,
    /// Directory (relative to the output root) receiving the C++ artifacts.
    pub source_dir:      String,
    /// Directory (relative to the output root) receiving the declaration file.
    pub declaration_dir: String,
    /// Extra headers included by the generated header, typically the ones
    /// defining the opaque types.
    pub includes:        Vec<String>,
    /// Type names passed through to C++ untouched.
    pub opaque_types:    Vec<String>,
    pub files:           OutputFiles,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace:       "ticket::command".to_string(),
            parser_guard:    "TICKET_PARSER_H_".to_string(),
            run_guard:       "TICKET_RUN_H_".to_string(),
            response_module: "./response".to_string(),
            source_dir:      "src".to_string(),
            declaration_dir: ".".to_string(),
            includes:        Vec::new(),
            opaque_types:    Vec::new(),
            files:           OutputFiles::default(),
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CmdgenError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Parses configuration from YAML text. An empty document yields the defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, CmdgenError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}
