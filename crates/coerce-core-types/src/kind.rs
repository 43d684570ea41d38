//! Runtime kind tags and requested-type descriptors
//!
//! A [`ValueKind`] is the tag carried by a dynamic value at runtime. A
//! [`TypeDescriptor`] names the type a caller asked for; it is the key under
//! which converter overrides are registered.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every fixed-width numeric representation the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericKind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
}

impl NumericKind {
    pub const ALL: [NumericKind; 12] = [
        NumericKind::I8,
        NumericKind::I16,
        NumericKind::I32,
        NumericKind::I64,
        NumericKind::Isize,
        NumericKind::U8,
        NumericKind::U16,
        NumericKind::U32,
        NumericKind::U64,
        NumericKind::Usize,
        NumericKind::F32,
        NumericKind::F64,
    ];

    /// Short lowercase name (`i8`, `u64`, `f32`, ...)
    pub fn name(self) -> &'static str {
        match self {
            NumericKind::I8 => "i8",
            NumericKind::I16 => "i16",
            NumericKind::I32 => "i32",
            NumericKind::I64 => "i64",
            NumericKind::Isize => "isize",
            NumericKind::U8 => "u8",
            NumericKind::U16 => "u16",
            NumericKind::U32 => "u32",
            NumericKind::U64 => "u64",
            NumericKind::Usize => "usize",
            NumericKind::F32 => "f32",
            NumericKind::F64 => "f64",
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, NumericKind::F32 | NumericKind::F64)
    }

    pub fn is_signed_integer(self) -> bool {
        matches!(
            self,
            NumericKind::I8
                | NumericKind::I16
                | NumericKind::I32
                | NumericKind::I64
                | NumericKind::Isize
        )
    }

    pub fn is_unsigned_integer(self) -> bool {
        !self.is_float() && !self.is_signed_integer()
    }

    /// Inclusive integer range of this kind, `None` for floats
    ///
    /// The native widths follow the target's pointer width.
    pub fn int_bounds(self) -> Option<(i128, i128)> {
        let bounds = match self {
            NumericKind::I8 => (i8::MIN as i128, i8::MAX as i128),
            NumericKind::I16 => (i16::MIN as i128, i16::MAX as i128),
            NumericKind::I32 => (i32::MIN as i128, i32::MAX as i128),
            NumericKind::I64 => (i64::MIN as i128, i64::MAX as i128),
            NumericKind::Isize => (isize::MIN as i128, isize::MAX as i128),
            NumericKind::U8 => (0, u8::MAX as i128),
            NumericKind::U16 => (0, u16::MAX as i128),
            NumericKind::U32 => (0, u32::MAX as i128),
            NumericKind::U64 => (0, u64::MAX as i128),
            NumericKind::Usize => (0, usize::MAX as i128),
            NumericKind::F32 | NumericKind::F64 => return None,
        };
        Some(bounds)
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kinds a scalar conversion can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Bool,
    Text,
    Timestamp,
    Numeric(NumericKind),
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Bool => f.write_str("bool"),
            ScalarKind::Text => f.write_str("text"),
            ScalarKind::Timestamp => f.write_str("timestamp"),
            ScalarKind::Numeric(kind) => kind.fmt(f),
        }
    }
}

/// Runtime tag of a dynamic value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Null,
    Bool,
    Text,
    Numeric(NumericKind),
    Timestamp,
    Sequence,
    /// Anything outside the closed universe of supported kinds
    Opaque,
}

impl ValueKind {
    /// The scalar family this kind belongs to, if it is a scalar at all
    pub fn as_scalar(self) -> Option<ScalarKind> {
        match self {
            ValueKind::Bool => Some(ScalarKind::Bool),
            ValueKind::Text => Some(ScalarKind::Text),
            ValueKind::Timestamp => Some(ScalarKind::Timestamp),
            ValueKind::Numeric(kind) => Some(ScalarKind::Numeric(kind)),
            ValueKind::Null | ValueKind::Sequence | ValueKind::Opaque => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Null => f.write_str("null"),
            ValueKind::Bool => f.write_str("bool"),
            ValueKind::Text => f.write_str("text"),
            ValueKind::Numeric(kind) => kind.fmt(f),
            ValueKind::Timestamp => f.write_str("timestamp"),
            ValueKind::Sequence => f.write_str("sequence"),
            ValueKind::Opaque => f.write_str("opaque"),
        }
    }
}

impl From<ScalarKind> for ValueKind {
    fn from(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => ValueKind::Bool,
            ScalarKind::Text => ValueKind::Text,
            ScalarKind::Timestamp => ValueKind::Timestamp,
            ScalarKind::Numeric(kind) => ValueKind::Numeric(kind),
        }
    }
}

/// Descriptor of a requested result type
///
/// `Any` means "no coercion": values pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    Any,
    Scalar(ScalarKind),
    Sequence(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    pub fn numeric(kind: NumericKind) -> Self {
        TypeDescriptor::Scalar(ScalarKind::Numeric(kind))
    }

    pub fn sequence_of(element: TypeDescriptor) -> Self {
        TypeDescriptor::Sequence(Box::new(element))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Any => f.write_str("any"),
            TypeDescriptor::Scalar(kind) => kind.fmt(f),
            TypeDescriptor::Sequence(element) => write!(f, "[]{element}"),
        }
    }
}

impl From<ScalarKind> for TypeDescriptor {
    fn from(kind: ScalarKind) -> Self {
        TypeDescriptor::Scalar(kind)
    }
}

impl From<NumericKind> for TypeDescriptor {
    fn from(kind: NumericKind) -> Self {
        TypeDescriptor::numeric(kind)
    }
}
