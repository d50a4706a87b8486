use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process;

use cmdgen::{bind_object, parse_argv};
use cmdgen_compiler::error::CmdgenError;
use cmdgen_compiler::{compile_schema, load_schema, schema_to_json, GeneratorConfig, Schema};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cmdgen")]
#[command(about = "Generate C++ parsers, Node-API bridges and TypeScript declarations from a command schema", long_about = None)]
struct Cli {
    /// Log more (repeat for trace output). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SchemaArgs {
    /// Input schema (`commands.yml`)
    #[arg(short, long)]
    input: PathBuf,

    /// Generator configuration (YAML); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the five generated files
    Generate {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Output root (defaults to the current directory)
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Parse and verify a schema without writing anything
    Check {
        #[command(flatten)]
        schema: SchemaArgs,
    },

    /// Print the normalized schema as JSON
    Dump {
        #[command(flatten)]
        schema: SchemaArgs,
    },

    /// Run an argument vector through the reference parser
    Parse {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Command name followed by flag/value pairs
        #[arg(last = true)]
        argv: Vec<String>,
    },

    /// Bind an options object the way the generated bridge does
    Bind {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Export name of the bridge function (e.g. `buyTicket`)
        #[arg(long = "command")]
        export: String,

        /// Options object as JSON
        #[arg(long)]
        json: String,
    },
}

impl SchemaArgs {
    fn config(&self) -> Result<GeneratorConfig, CmdgenError> {
        match &self.config {
            Some(path) => GeneratorConfig::load(path),
            None => Ok(GeneratorConfig::default()),
        }
    }

    fn text(&self) -> Result<String, CmdgenError> {
        Ok(fs::read_to_string(&self.input)?)
    }

    fn load(&self) -> Result<Schema, CmdgenError> {
        load_schema(&self.text()?, &self.config()?)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints `error` and exits with status 1.
fn fail(error: impl std::fmt::Display) -> ! {
    eprintln!("{}", error);
    process::exit(1)
}

fn main() -> Result<(), CmdgenError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Generate { schema, output } => {
            let config = schema.config()?;
            let (schema_model, artifacts) = compile_schema(&schema.text()?, &config)?;
            let written = artifacts.write_to(output, &config)?;
            for path in &written {
                println!("{}", path.display());
            }
            info!(
                input = %schema.input.display(),
                commands = schema_model.commands.len(),
                files = written.len(),
                "generated"
            );
            Ok(())
        }

        Commands::Check { schema } => {
            let schema_model = schema.load()?;
            println!("{}: {} commands OK", schema.input.display(), schema_model.commands.len());
            Ok(())
        }

        Commands::Dump { schema } => {
            let schema_model = schema.load()?;
            println!("{}", schema_to_json(&schema_model)?);
            Ok(())
        }

        Commands::Parse { schema, argv } => {
            let schema_model = schema.load()?;
            debug!(?argv, "parse");
            match parse_argv(&schema_model, argv.as_slice()) {
                Ok(invocation) => {
                    println!("{}", serde_json::to_string_pretty(&invocation)?);
                    Ok(())
                }
                Err(err) => fail(format!("ParseException: {}", err)),
            }
        }

        Commands::Bind { schema, export, json } => {
            let schema_model = schema.load()?;
            let args: serde_json::Value = serde_json::from_str(json)?;
            match bind_object(&schema_model, export, &args) {
                Ok(invocation) => {
                    println!("{}", serde_json::to_string_pretty(&invocation)?);
                    Ok(())
                }
                Err(err) => fail(err),
            }
        }
    }
}
