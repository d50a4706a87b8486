//! TypeScript declarations of the bridge functions.

use crate::{
    config::GeneratorConfig,
    type_map::ts_field_type,
    types::{Command, Schema},
    utils::{SourceBuilder, AUTOGEN_DISCLAIMER},
};

const PRIMITIVE_ALIASES: &str = r#"export type SortType = 'time' | 'cost'
export type Duration = number

type Numeral = '0' | '1' | '2' | '3' | '4' | '5' | '6' | '7' | '8' | '9'
type NumberSegment = `${Numeral}${Numeral}`
export type DateString = `${NumberSegment}-${NumberSegment}`
export type Instant = `${NumberSegment}:${NumberSegment}`"#;

pub fn generate_declarations(schema: &Schema, config: &GeneratorConfig) -> String {
    let mut b = SourceBuilder::new();

    b.line(AUTOGEN_DISCLAIMER).blank();
    b.line(format!("import {{ Response }} from '{}'", config.response_module)).blank();
    b.line(PRIMITIVE_ALIASES).blank();

    for command in schema.commands.iter().filter(|c| !c.fields.is_empty()) {
        generate_options_interface(&mut b, command);
        b.blank();
    }

    for command in &schema.commands {
        b.line(function_signature(command));
    }
    b.finish()
}

fn generate_options_interface(b: &mut SourceBuilder, command: &Command) {
    b.open(format!("interface {} {{", command.options_name()));
    for field in &command.fields {
        let marker = if field.may_be_absent() { "?" } else { "" };
        b.line(format!("{}{}: {}", field.name, marker, ts_field_type(field)));
    }
    b.close("}");
}

/// `export function addUser (options: AddUserOptions): Response`; the
/// parameter is left out for commands without fields.
pub fn function_signature(command: &Command) -> String {
    let params = if command.fields.is_empty() {
        String::new()
    } else {
        format!("options: {}", command.options_name())
    };
    format!("export function {} ({}): Response", command.export_name(), params)
}
