//! C++ declarations: the record/union header and the dispatch header.

use crate::{
    config::GeneratorConfig,
    type_map::cpp_field_type,
    types::{Command, Field, Schema},
    utils::{quote, SourceBuilder, AUTOGEN_DISCLAIMER},
};

const HEADER_INCLUDES: [&str; 5] = [
    "datetime.h",
    "exception.h",
    "optional.h",
    "variant.h",
    "result.h",
];

/// Generates the header holding one record per command, the `Command` union
/// and the two `parse` declarations.
pub fn generate_header(schema: &Schema, config: &GeneratorConfig) -> String {
    let mut b = SourceBuilder::new();
    let guard = &config.parser_guard;

    b.line(AUTOGEN_DISCLAIMER).blank();
    b.line(format!("#ifndef {}", guard));
    b.line(format!("#define {}", guard)).blank();
    b.line("#include <iostream>").blank();
    for include in HEADER_INCLUDES.iter().copied().chain(config.includes.iter().map(String::as_str)) {
        b.line(format!("#include {}", quote(include)));
    }
    b.blank();

    b.line("/// Classes and parsers for commands.");
    b.line(format!("namespace {} {{", config.namespace)).blank();
    b.line("enum SortType { kTime, kCost };").blank();

    for command in &schema.commands {
        generate_record(&mut b, command);
        b.blank();
    }

    generate_union(&mut b, schema);
    b.blank();

    b.line("/**");
    b.line(" * @brief parses the command stored in str.");
    b.line(" *");
    b.line(" * this function is autogenerated.");
    b.line(" */");
    b.line("auto parse (std::string &str)");
    b.line("  -> Result<Command, ParseException>;");
    b.line("auto parse (const Vector<std::string_view> &argv)");
    b.line("  -> Result<Command, ParseException>;").blank();

    b.line(format!("}} // namespace {}", config.namespace)).blank();
    b.line(format!("#endif // {}", guard));
    b.finish()
}

/// Declares the member for one field, with the default initializer appended
/// verbatim.
pub fn declare_member(field: &Field) -> String {
    match &field.default {
        Some(default) => format!("{} {} = {};", cpp_field_type(field), field.name, default),
        None => format!("{} {};", cpp_field_type(field), field.name),
    }
}

fn generate_record(b: &mut SourceBuilder, command: &Command) {
    let record = command.record_name();
    if command.fields.is_empty() {
        b.line(format!("struct {} {{}};", record));
        return;
    }
    b.open(format!("struct {} {{", record));
    for field in &command.fields {
        b.line(declare_member(field));
    }
    b.close("};");
}

fn generate_union(b: &mut SourceBuilder, schema: &Schema) {
    b.open("using Command = Variant<");
    let last = schema.commands.len().saturating_sub(1);
    for (i, command) in schema.commands.iter().enumerate() {
        let separator = if i == last { "" } else { "," };
        b.line(format!("{}{}", command.record_name(), separator));
    }
    b.close(">;");
}

/// Generates the dispatch header: one `run` overload per command, implemented
/// by the host project's handlers.
pub fn generate_run_header(schema: &Schema, config: &GeneratorConfig) -> String {
    let mut b = SourceBuilder::new();
    let guard = &config.run_guard;

    b.line(AUTOGEN_DISCLAIMER).blank();
    b.line(format!("#ifndef {}", guard));
    b.line(format!("#define {}", guard)).blank();
    b.line(format!("#include {}", quote(&config.files.header)));
    b.line("#include \"result.h\"");
    b.line("#include \"response.h\"").blank();
    b.line(format!("namespace {} {{", config.namespace)).blank();

    b.line("/**");
    b.line(" * @brief Visitor for the commands.");
    b.line(" *");
    b.line(" * The main function uses this visitor after parsing a");
    b.line(" * command, to actually dispatch it. Overloads of operator()");
    b.line(" * are callbacks of the commands.");
    b.line(" *");
    b.line(" * The implementations are in the corresponding source");
    b.line(" * files, not in run.cpp.");
    b.line(" */");
    for command in &schema.commands {
        b.line(format!(
            "auto run (const {} &cmd) -> Result<Response, Exception>;",
            command.record_name()
        ));
    }
    b.blank();

    b.line(format!("}} // namespace {}", config.namespace)).blank();
    b.line(format!("#endif // {}", guard));
    b.finish()
}
