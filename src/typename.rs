//! Primitive type codes and the typename table they map to.
//!
//! Every entry is fixed except the object path, which code generators commonly
//! alias to their own wrapper type. The override lives in [`TypenameConfig`]
//! and is passed into each lookup rather than held globally.
use serde::Deserialize;

// ------------------------------- Defaults --------------------------------- //

pub const BOOLEAN_TYPENAME: &str = "bool";
pub const BYTE_TYPENAME: &str = "uint8_t";
pub const DOUBLE_TYPENAME: &str = "double";
pub const DEFAULT_OBJECT_PATH_TYPENAME: &str = "dbus::ObjectPath";
pub const SIGNED16_TYPENAME: &str = "int16_t";
pub const SIGNED32_TYPENAME: &str = "int32_t";
pub const SIGNED64_TYPENAME: &str = "int64_t";
pub const STRING_TYPENAME: &str = "std::string";
pub const UNIX_FD_TYPENAME: &str = "dbus::FileDescriptor";
pub const UNSIGNED16_TYPENAME: &str = "uint16_t";
pub const UNSIGNED32_TYPENAME: &str = "uint32_t";
pub const UNSIGNED64_TYPENAME: &str = "uint64_t";
pub const VARIANT_TYPENAME: &str = "chromeos::Any";

// Structural markers. These never appear in the table.
pub const ARRAY_CODE: char = 'a';
pub const DICT_ENTRY_BEGIN: char = '{';
pub const DICT_ENTRY_END: char = '}';

// ------------------------------- Type codes ------------------------------- //

/// A primitive (single character, non-container) signature code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeCode {
    Boolean,
    Byte,
    Double,
    ObjectPath,
    Int16,
    Int32,
    Int64,
    String,
    UnixFd,
    Uint16,
    Uint32,
    Uint64,
    Variant,
}

impl TypeCode {
    pub const ALL: [TypeCode; 13] = [
        TypeCode::Boolean,
        TypeCode::Byte,
        TypeCode::Double,
        TypeCode::ObjectPath,
        TypeCode::Int16,
        TypeCode::Int32,
        TypeCode::Int64,
        TypeCode::String,
        TypeCode::UnixFd,
        TypeCode::Uint16,
        TypeCode::Uint32,
        TypeCode::Uint64,
        TypeCode::Variant,
    ];

    /// `None` for structural markers and anything unknown.
    pub fn from_char(c: char) -> Option<Self> {
        let code = match c {
            'b' => TypeCode::Boolean,
            'y' => TypeCode::Byte,
            'd' => TypeCode::Double,
            'o' => TypeCode::ObjectPath,
            'n' => TypeCode::Int16,
            'i' => TypeCode::Int32,
            'x' => TypeCode::Int64,
            's' => TypeCode::String,
            'h' => TypeCode::UnixFd,
            'q' => TypeCode::Uint16,
            'u' => TypeCode::Uint32,
            't' => TypeCode::Uint64,
            'v' => TypeCode::Variant,
            _ => return None,
        };
        Some(code)
    }

    pub fn as_char(self) -> char {
        match self {
            TypeCode::Boolean => 'b',
            TypeCode::Byte => 'y',
            TypeCode::Double => 'd',
            TypeCode::ObjectPath => 'o',
            TypeCode::Int16 => 'n',
            TypeCode::Int32 => 'i',
            TypeCode::Int64 => 'x',
            TypeCode::String => 's',
            TypeCode::UnixFd => 'h',
            TypeCode::Uint16 => 'q',
            TypeCode::Uint32 => 'u',
            TypeCode::Uint64 => 't',
            TypeCode::Variant => 'v',
        }
    }

    /// Table entry before any configuration is applied.
    pub fn default_typename(self) -> &'static str {
        match self {
            TypeCode::Boolean => BOOLEAN_TYPENAME,
            TypeCode::Byte => BYTE_TYPENAME,
            TypeCode::Double => DOUBLE_TYPENAME,
            TypeCode::ObjectPath => DEFAULT_OBJECT_PATH_TYPENAME,
            TypeCode::Int16 => SIGNED16_TYPENAME,
            TypeCode::Int32 => SIGNED32_TYPENAME,
            TypeCode::Int64 => SIGNED64_TYPENAME,
            TypeCode::String => STRING_TYPENAME,
            TypeCode::UnixFd => UNIX_FD_TYPENAME,
            TypeCode::Uint16 => UNSIGNED16_TYPENAME,
            TypeCode::Uint32 => UNSIGNED32_TYPENAME,
            TypeCode::Uint64 => UNSIGNED64_TYPENAME,
            TypeCode::Variant => VARIANT_TYPENAME,
        }
    }
}

// ------------------------------ Configuration ----------------------------- //

/// Parser configuration. Loadable from JSON:
///
/// ```json
/// { "object_path": "ObjectPathType" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypenameConfig {
    #[serde(default)]
    pub object_path: Option<String>,
}

impl TypenameConfig {
    pub fn with_object_path(name: impl Into<String>) -> Self {
        Self { object_path: Some(name.into()) }
    }

    pub fn typename(&self, code: TypeCode) -> &str {
        match (code, self.object_path.as_deref()) {
            (TypeCode::ObjectPath, Some(name)) => name,
            _ => code.default_typename(),
        }
    }

    /// Table lookup by raw character.
    pub fn lookup(&self, c: char) -> Option<&str> {
        TypeCode::from_char(c).map(|code| self.typename(code))
    }
}

// ------------------------------- Tests ------------------------------------ //
