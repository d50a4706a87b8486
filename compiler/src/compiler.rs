use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    config::GeneratorConfig,
    error::CmdgenError,
    gen_cpp::{generate_header, generate_run_header},
    gen_dts::generate_declarations,
    gen_node::generate_bridge,
    gen_parser::generate_parser_source,
    parser::parse_schema,
    types::Schema,
    verifier::verify_schema,
};

/// The five generated files, in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub header:       String,
    pub run_header:   String,
    pub source:       String,
    pub bridge:       String,
    pub declarations: String,
}

impl Artifacts {
    /// Relative output path and contents of each artifact, in a fixed order.
    pub fn files<'a>(&'a self, config: &GeneratorConfig) -> Vec<(PathBuf, &'a str)> {
        let src = Path::new(&config.source_dir);
        let decl = Path::new(&config.declaration_dir);
        vec![
            (src.join(&config.files.header),      self.header.as_str()),
            (src.join(&config.files.run_header),  self.run_header.as_str()),
            (src.join(&config.files.source),      self.source.as_str()),
            (src.join(&config.files.bridge),      self.bridge.as_str()),
            (decl.join(&config.files.declarations), self.declarations.as_str()),
        ]
    }

    /// Writes every artifact under `root`, creating directories as needed.
    /// Returns the written paths.
    pub fn write_to(&self, root: &Path, config: &GeneratorConfig) -> Result<Vec<PathBuf>, CmdgenError> {
        let mut written = Vec::with_capacity(5);
        for (relative, contents) in self.files(config) {
            let path = root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, contents)?;
            debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
            written.push(path);
        }
        Ok(written)
    }
}

/// Parses and verifies a YAML schema.
pub fn load_schema(text: &str, config: &GeneratorConfig) -> Result<Schema, CmdgenError> {
    let schema = parse_schema(text)?;
    verify_schema(&schema, &config.opaque_types)?;
    Ok(schema)
}

/// Runs every emitter over the same verified schema.
pub fn generate(schema: &Schema, config: &GeneratorConfig) -> Artifacts {
    let artifacts = Artifacts {
        header:       generate_header(schema, config),
        run_header:   generate_run_header(schema, config),
        source:       generate_parser_source(schema, config),
        bridge:       generate_bridge(schema, config),
        declarations: generate_declarations(schema, config),
    };
    info!(commands = schema.commands.len(), "generated artifacts");
    artifacts
}

/// Compile a textual schema into `(Schema, Artifacts)`.
/// Returns `Err(CmdgenError)` if parsing or verification fails; nothing is
/// generated in that case.
pub fn compile_schema(text: &str, config: &GeneratorConfig) -> Result<(Schema, Artifacts), CmdgenError> {
    let schema = load_schema(text, config)?;
    let artifacts = generate(&schema, config);
    Ok((schema, artifacts))
}

/// The normalized schema as pretty-printed JSON.
pub fn schema_to_json(schema: &Schema) -> Result<String, CmdgenError> {
    Ok(serde_json::to_string_pretty(schema)?)
}
