//! Runtime values for cmdgen command records.
//!
//! A [Record] is the dynamic twin of one generated C++ struct: it lists every
//! member of the command in declaration order together with its [Slot].
//!
//! ```
//! use cmdgen_schema::*;
//!
//! let mut record = Record::new("RefundTicket");
//! record.declare("currentUser", Slot::Unset);
//! record.declare("index", Slot::Default("1".to_owned()));
//!
//! record.set("currentUser", Value::String("alice".to_owned()));
//! assert_eq!(record.value("currentUser").map(Value::as_str), Some("alice"));
//! assert_eq!(record.get("index"), Some(&Slot::Default("1".to_owned())));
//! ```

pub mod record;
pub mod value;

pub use record::*;
pub use value::*;
