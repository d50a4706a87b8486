//! The argv parser: `parse(std::string &)` and `parse(const Vector<std::string_view> &)`.
//!
//! The generated dispatcher compares `argv[0]` with each command name in
//! schema order, then runs a flag/value loop over the rest. Unknown commands,
//! unknown flags, flags without a value and missing mandatory fields all
//! return `ParseException`. A repeated flag overwrites the earlier value.

use crate::{
    config::GeneratorConfig,
    type_map::from_token,
    types::{Command, Field, FieldType, Schema},
    utils::{capitalize, quote, SourceBuilder, AUTOGEN_DISCLAIMER},
};

/// Separator of array values inside one argv token.
pub const ARRAY_SEPARATOR: char = '|';

const TOKEN: &str = "argv[i].data()";

pub fn generate_parser_source(schema: &Schema, config: &GeneratorConfig) -> String {
    let mut b = SourceBuilder::new();

    b.line(AUTOGEN_DISCLAIMER).blank();
    b.line(format!("#include {}", quote(&config.files.header))).blank();
    b.line("#include \"utility.h\"").blank();
    b.line(format!("namespace {} {{", config.namespace)).blank();

    b.line("auto parse (std::string &str)");
    b.open("  -> Result<Command, ParseException> {");
    b.line("auto argv = split(str, ' ');");
    b.line("return parse(argv);");
    b.close("}").blank();

    b.line("auto parse (const Vector<std::string_view> &argv)");
    b.open("  -> Result<Command, ParseException> {");
    b.open("if (argv.size() == 0) {");
    b.line("return ParseException();");
    b.close("}");
    b.line("auto &argv0 = argv[0];");
    for (i, command) in schema.commands.iter().enumerate() {
        let test = format!("argv0 == {}", quote(&command.name));
        if i == 0 {
            b.open(format!("if ({}) {{", test));
        } else {
            b.dedent().open(format!("}} else if ({}) {{", test));
        }
        generate_command_branch(&mut b, command);
    }
    b.dedent().open("} else {");
    b.line("return ParseException();");
    b.close("}");
    b.close("}").blank();

    b.line(format!("}} // namespace {}", config.namespace));
    b.finish()
}

/// Local flag recording that a mandatory field was supplied.
fn seen_flag(field: &Field) -> String {
    format!("seen{}", capitalize(&field.name))
}

fn generate_command_branch(b: &mut SourceBuilder, command: &Command) {
    let record = command.record_name();
    if command.fields.is_empty() {
        b.line(format!("return Command({}());", record));
        return;
    }

    b.line(format!("{} res;", record));
    let required: Vec<&Field> = command.required_fields().collect();
    for field in &required {
        b.line(format!("bool {} = false;", seen_flag(field)));
    }

    b.open("for (int i = 1; i < argv.size(); ++i) {");
    b.line("auto &arg = argv[i];");
    for (i, field) in command.fields.iter().enumerate() {
        let test = format!("arg == {}", quote(&field.flag));
        if i == 0 {
            b.open(format!("if ({}) {{", test));
        } else {
            b.dedent().open(format!("}} else if ({}) {{", test));
        }
        b.open("if (++i >= argv.size()) {");
        b.line("return ParseException();");
        b.close("}");
        if field.is_array {
            generate_array_assignment(b, field);
        } else {
            b.line(format!("res.{} = {};", field.name, from_token(&field.type_, TOKEN)));
        }
        if field.is_required() {
            b.line(format!("{} = true;", seen_flag(field)));
        }
    }
    b.dedent().open("} else {");
    b.line("return ParseException();");
    b.close("}");
    b.close("}");

    if !required.is_empty() {
        let missing: Vec<String> = required.iter().map(|f| format!("!{}", seen_flag(f))).collect();
        b.open(format!("if ({}) {{", missing.join(" || ")));
        b.line("return ParseException();");
        b.close("}");
    }
    b.line("return Command(res);");
}

fn generate_array_assignment(b: &mut SourceBuilder, field: &Field) {
    let separator = format!("'{}'", ARRAY_SEPARATOR);
    b.line(format!("std::string val = {};", TOKEN));
    if field.type_ == FieldType::String {
        b.line(format!("res.{} = copyStrings(split(val, {}));", field.name, separator));
        return;
    }
    b.line(format!("auto values = split(val, {});", separator));
    b.line(format!("res.{}.clear();", field.name));
    b.line(format!("res.{}.reserve(values.size());", field.name));
    b.open("for (auto &str : values) {");
    b.line(format!(
        "res.{}.push_back({});",
        field.name,
        from_token(&field.type_, "str.data()")
    ));
    b.close("}");
}
