//! Node-API bridge: one `nodeXxx` function per command plus the `init`
//! registration table.

use crate::{
    config::GeneratorConfig,
    type_map::from_dynamic,
    types::{Command, Field, Schema},
    utils::{quote, SourceBuilder, AUTOGEN_DISCLAIMER},
};

const BRIDGE_PRELUDE: &str = r#"inline auto isNullish (Napi::Value value) -> bool {
  return value.IsNull() || value.IsUndefined();
}

template <typename Cmd>
inline auto handleCommand (Napi::Env env, const Cmd &cmd)
  -> Napi::Value {
  try {
    auto resp = run(cmd);
    if (auto err = resp.error()) {
      auto error = Napi::Error::New(env, err->what());
      error.ThrowAsJavaScriptException();
      return {};
    }
    Napi::Value res;
    resp.result().visit([&env, &res] (const auto &resp) {
      res = response::toJsObject(env, resp);
    });

    return res;
  } catch (const Exception &e) {
    auto error = Napi::Error::New(env, e.what());
    error.ThrowAsJavaScriptException();
    return {};
  }
}

#define CPP_STR(x) ((x).As<Napi::String>().Utf8Value())
#define CPP_INT(x) ((x).As<Napi::Number>().Int32Value())
#define CPP_BOOL(x) ((x).As<Napi::Boolean>().Value())"#;

/// Name of the bridge function of `command` (`nodeAddUser`).
pub fn bridge_function_name(command: &Command) -> String {
    format!("node{}", command.record_name())
}

pub fn generate_bridge(schema: &Schema, config: &GeneratorConfig) -> String {
    let mut b = SourceBuilder::new();

    b.line(AUTOGEN_DISCLAIMER).blank();
    b.line("#ifndef BUILD_NODEJS");
    b.line("#error \"This file only works in Node builds\"");
    b.line("#endif // BUILD_NODEJS").blank();
    b.line("#include <napi.h>").blank();
    for include in ["exception.h", config.files.header.as_str(), "response.h", "result.h", config.files.run_header.as_str(), "vector.h"] {
        b.line(format!("#include {}", quote(include)));
    }
    b.blank();
    b.line(format!("namespace {} {{", config.namespace)).blank();
    b.line(BRIDGE_PRELUDE).blank();

    for command in &schema.commands {
        generate_command_bridge(&mut b, command);
        b.blank();
    }

    b.line("#undef CPP_STR");
    b.line("#undef CPP_INT");
    b.line("#undef CPP_BOOL").blank();

    b.line("auto init (Napi::Env env, Napi::Object exports)");
    b.open(" -> Napi::Object {");
    for command in &schema.commands {
        b.line(format!(
            "exports[{}] = Napi::Function::New(env, {});",
            quote(&command.export_name()),
            bridge_function_name(command)
        ));
    }
    b.line("return exports;");
    b.close("}").blank();

    b.line("NODE_API_MODULE(NODE_GYP_MODULE_NAME, init)").blank();
    b.line(format!("}} // namespace {}", config.namespace));
    b.finish()
}

fn generate_command_bridge(b: &mut SourceBuilder, command: &Command) {
    b.line(format!("auto {} (const Napi::CallbackInfo &info)", bridge_function_name(command)));
    b.open("  -> Napi::Value {");
    b.line(format!("{} cmd;", command.record_name()));
    if !command.fields.is_empty() {
        b.line("auto args = info[0].ToObject();");
        for field in &command.fields {
            generate_field_binding(b, field);
        }
    }
    b.line("return handleCommand(info.Env(), cmd);");
    b.close("}");
}

fn generate_field_binding(b: &mut SourceBuilder, field: &Field) {
    let value = format!("args.Get({})", quote(&field.name));

    if field.is_array {
        if field.may_be_absent() {
            b.open(format!("if (!isNullish({})) {{", value));
        } else {
            b.open("{");
        }
        b.line(format!("auto array = {}.As<Napi::Array>();", value));
        b.line(format!("cmd.{}.reserve(array.Length());", field.name));
        b.open("for (int i = 0; i < array.Length(); ++i) {");
        b.line(format!(
            "cmd.{}.push_back({});",
            field.name,
            from_dynamic(&field.type_, "array.Get(i)")
        ));
        b.close("}");
        b.close("}");
        return;
    }

    let assignment = format!("cmd.{} = {};", field.name, from_dynamic(&field.type_, &value));
    if field.may_be_absent() {
        b.line(format!("if (!isNullish({})) {}", value, assignment));
    } else {
        b.line(assignment);
    }
}
