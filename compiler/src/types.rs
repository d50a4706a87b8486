use std::fmt;

use serde::{Serialize, Serializer};

use crate::utils::{to_camel_case, to_pascal_case};

/// The closed type vocabulary of a field, plus explicitly declared
/// pass-through types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Int,
    Bool,
    Char,
    Date,
    Instant,
    Duration,
    SortType,
    /// A type assumed to exist in the C++ target. Only valid when listed in
    /// `GeneratorConfig::opaque_types`; the verifier rejects any other.
    Opaque(String),
}

impl FieldType {
    pub const BUILTIN_NAMES: [&'static str; 8] = [
        "string", "int", "bool", "char", "Date", "Instant", "Duration", "SortType",
    ];

    /// Resolves a type name as written in a field spec.
    pub fn from_name(name: &str) -> FieldType {
        match name {
            "string"   => FieldType::String,
            "int"      => FieldType::Int,
            "bool"     => FieldType::Bool,
            "char"     => FieldType::Char,
            "Date"     => FieldType::Date,
            "Instant"  => FieldType::Instant,
            "Duration" => FieldType::Duration,
            "SortType" => FieldType::SortType,
            other      => FieldType::Opaque(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FieldType::String   => "string",
            FieldType::Int      => "int",
            FieldType::Bool     => "bool",
            FieldType::Char     => "char",
            FieldType::Date     => "Date",
            FieldType::Instant  => "Instant",
            FieldType::Duration => "Duration",
            FieldType::SortType => "SortType",
            FieldType::Opaque(name) => name,
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, FieldType::Opaque(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One parsed field spec, addressed externally by `flag`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Key used on the command line (`-u`); independent of `name`.
    pub flag:        String,
    /// Member name in the record and key in bridge objects.
    pub name:        String,
    #[serde(rename = "type")]
    pub type_:       FieldType,
    pub is_optional: bool,
    pub is_array:    bool,
    /// Verbatim C++ initializer expression.
    pub default:     Option<String>,
}

impl Field {
    /// Optional and defaulted fields may be left out by callers.
    pub fn may_be_absent(&self) -> bool {
        self.is_optional || self.default.is_some()
    }

    pub fn is_required(&self) -> bool {
        !self.may_be_absent()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    pub name:   String,
    pub fields: Vec<Field>,
}

impl Command {
    /// `add_user` → `AddUser`
    pub fn record_name(&self) -> String {
        to_pascal_case(&self.name)
    }

    /// `add_user` → `addUser`, the name the bridge is registered under.
    pub fn export_name(&self) -> String {
        to_camel_case(&self.name)
    }

    /// `add_user` → `AddUserOptions`
    pub fn options_name(&self) -> String {
        format!("{}Options", self.record_name())
    }

    pub fn field_by_flag(&self, flag: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.flag == flag)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_required())
    }
}

/// Commands in schema order. The order drives every artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub commands: Vec<Command>,
}

impl Schema {
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn command_by_export(&self, export_name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.export_name() == export_name)
    }
}
