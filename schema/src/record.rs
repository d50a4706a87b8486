use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::Value;

/// State of one record member.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Never assigned and without an initializer (an empty `Optional`, or a
    /// required member that was not supplied).
    Unset,
    /// Holds its declared initializer, kept as the verbatim C++ expression.
    Default(String),
    Set(Value),
}

impl Slot {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Slot::Set(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Slot::Set(_))
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::Unset => serializer.serialize_none(),
            Slot::Default(expr) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("default", expr)?;
                map.end()
            }
            Slot::Set(value) => value.serialize(serializer),
        }
    }
}

/// The dynamic counterpart of one generated record: named members in
/// declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name:   String,
    fields: Vec<(String, Slot)>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Record {
            name:   name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a member. Declaring a name twice replaces the earlier slot.
    pub fn declare(&mut self, name: impl Into<String>, slot: Slot) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = slot,
            None => self.fields.push((name, slot)),
        }
    }

    /// Overwrites a declared member. Returns `false` if no member has that name.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => {
                *slot = Slot::Set(value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Slot> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, slot)| slot)
    }

    /// The assigned value of a member, if any.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(Slot::value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.fields.iter().map(|(n, slot)| (n.as_str(), slot))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Serializes as a JSON object of members, in declaration order.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, slot) in &self.fields {
            map.serialize_entry(name, slot)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SortOrder;

    fn query_ticket() -> Record {
        let mut record = Record::new("QueryTicket");
        record.declare("from", Slot::Unset);
        record.declare("sort", Slot::Default("kTime".to_owned()));
        record
    }

    #[test]
    fn record_set_and_get() {
        let mut record = query_ticket();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("sort"), Some(&Slot::Default("kTime".to_owned())));
        assert_eq!(record.value("sort"), None);

        assert!(record.set("sort", Value::Sort(SortOrder::Cost)));
        assert_eq!(record.value("sort"), Some(&Value::Sort(SortOrder::Cost)));
        assert!(!record.set("missing", Value::Int(1)));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn record_keeps_declaration_order() {
        let mut record = query_ticket();
        record.declare("date", Slot::Unset);
        record.declare("from", Slot::Set(Value::String("a".to_owned())));
        let names: Vec<&str> = record.fields().map(|(n, _)| n).collect();
        assert_eq!(names, ["from", "sort", "date"]);
    }

    #[test]
    fn record_json() {
        let mut record = query_ticket();
        record.set("from", Value::String("Shanghai".to_owned()));
        record.declare("date", Slot::Unset);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"from":"Shanghai","sort":{"default":"kTime"},"date":null}"#
        );
    }
}
