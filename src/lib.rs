//! Resolve D-Bus type signatures into C++ typenames for generated bindings.
//!
//! ```
//! use dbus_typename::SignatureParser;
//!
//! let mut parser = SignatureParser::new();
//! parser.set_object_path_typename("ObjectPathType");
//! assert_eq!(
//!     parser.parse("a{oa{sv}}").unwrap(),
//!     "std::map<ObjectPathType,std::map<std::string,chromeos::Any>>",
//! );
//! ```
pub mod cli;
pub mod codegen;
pub mod error;
pub mod ir;
pub mod logging;
pub mod lower;
pub mod path_de;
pub mod report;
pub mod scan;
pub mod signature;
pub mod typename;

pub use error::{ErrorKind, SignatureError};
pub use signature::{Parsed, SignatureParser, parse_signature};
pub use typename::{TypeCode, TypenameConfig};
