use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use coerce_core_types::{NumericKind, TypeDescriptor, ValueKind};

use super::opaque::{JsonObject, OpaqueValue};

/// A value whose concrete representation is only known at runtime
///
/// The universe is closed: everything that is not one of the listed kinds is
/// carried as [`DynamicValue::Opaque`]. The engine only ever borrows a
/// `DynamicValue`; conversions never mutate their source.
#[derive(Debug, Clone)]
pub enum DynamicValue {
    Null,
    Bool(bool),
    Text(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Timestamp(DateTime<Utc>),
    /// Ordered, possibly heterogeneous, sequence
    Sequence(Vec<DynamicValue>),
    Opaque(Arc<dyn OpaqueValue>),
}

impl DynamicValue {
    /// Wrap a foreign value
    pub fn opaque(value: impl OpaqueValue + 'static) -> Self {
        DynamicValue::Opaque(Arc::new(value))
    }

    /// Runtime tag of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            DynamicValue::Null => ValueKind::Null,
            DynamicValue::Bool(_) => ValueKind::Bool,
            DynamicValue::Text(_) => ValueKind::Text,
            DynamicValue::I8(_) => ValueKind::Numeric(NumericKind::I8),
            DynamicValue::I16(_) => ValueKind::Numeric(NumericKind::I16),
            DynamicValue::I32(_) => ValueKind::Numeric(NumericKind::I32),
            DynamicValue::I64(_) => ValueKind::Numeric(NumericKind::I64),
            DynamicValue::Isize(_) => ValueKind::Numeric(NumericKind::Isize),
            DynamicValue::U8(_) => ValueKind::Numeric(NumericKind::U8),
            DynamicValue::U16(_) => ValueKind::Numeric(NumericKind::U16),
            DynamicValue::U32(_) => ValueKind::Numeric(NumericKind::U32),
            DynamicValue::U64(_) => ValueKind::Numeric(NumericKind::U64),
            DynamicValue::Usize(_) => ValueKind::Numeric(NumericKind::Usize),
            DynamicValue::F32(_) => ValueKind::Numeric(NumericKind::F32),
            DynamicValue::F64(_) => ValueKind::Numeric(NumericKind::F64),
            DynamicValue::Timestamp(_) => ValueKind::Timestamp,
            DynamicValue::Sequence(_) => ValueKind::Sequence,
            DynamicValue::Opaque(_) => ValueKind::Opaque,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DynamicValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DynamicValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[DynamicValue]> {
        match self {
            DynamicValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this value already has the shape `descriptor` names
    ///
    /// `Any` accepts everything; a sequence conforms when every element does.
    pub fn conforms_to(&self, descriptor: &TypeDescriptor) -> bool {
        match (descriptor, self) {
            (TypeDescriptor::Any, _) => true,
            (TypeDescriptor::Scalar(kind), value) => value.kind() == ValueKind::from(*kind),
            (TypeDescriptor::Sequence(element), DynamicValue::Sequence(items)) => {
                items.iter().all(|item| item.conforms_to(element))
            }
            (TypeDescriptor::Sequence(_), _) => false,
        }
    }
}

/// Canonical textual representation
///
/// Timestamps render as RFC 3339 in UTC, sequences as `[a, b, c]`, opaque
/// values through their textual capability or, lacking one, their debug form.
impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicValue::Null => f.write_str("null"),
            DynamicValue::Bool(v) => write!(f, "{v}"),
            DynamicValue::Text(v) => f.write_str(v),
            DynamicValue::I8(v) => write!(f, "{v}"),
            DynamicValue::I16(v) => write!(f, "{v}"),
            DynamicValue::I32(v) => write!(f, "{v}"),
            DynamicValue::I64(v) => write!(f, "{v}"),
            DynamicValue::Isize(v) => write!(f, "{v}"),
            DynamicValue::U8(v) => write!(f, "{v}"),
            DynamicValue::U16(v) => write!(f, "{v}"),
            DynamicValue::U32(v) => write!(f, "{v}"),
            DynamicValue::U64(v) => write!(f, "{v}"),
            DynamicValue::Usize(v) => write!(f, "{v}"),
            DynamicValue::F32(v) => write!(f, "{v}"),
            DynamicValue::F64(v) => write!(f, "{v}"),
            DynamicValue::Timestamp(v) => {
                f.write_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            DynamicValue::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            DynamicValue::Opaque(value) => match value.as_text() {
                Some(text) => f.write_str(&text),
                None => write!(f, "{value:?}"),
            },
        }
    }
}

/// Structural equality; opaque values are equal only to themselves
impl PartialEq for DynamicValue {
    fn eq(&self, other: &Self) -> bool {
        use DynamicValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Text(a), Text(b)) => a == b,
            (I8(a), I8(b)) => a == b,
            (I16(a), I16(b)) => a == b,
            (I32(a), I32(b)) => a == b,
            (I64(a), I64(b)) => a == b,
            (Isize(a), Isize(b)) => a == b,
            (U8(a), U8(b)) => a == b,
            (U16(a), U16(b)) => a == b,
            (U32(a), U32(b)) => a == b,
            (U64(a), U64(b)) => a == b,
            (Usize(a), Usize(b)) => a == b,
            (F32(a), F32(b)) => a == b,
            (F64(a), F64(b)) => a == b,
            (Timestamp(a), Timestamp(b)) => a == b,
            (Sequence(a), Sequence(b)) => a == b,
            (Opaque(a), Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for DynamicValue {
                fn from(value: $ty) -> Self {
                    DynamicValue::$variant(value)
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool,
    String => Text,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    DateTime<Utc> => Timestamp,
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        DynamicValue::Text(value.to_string())
    }
}

impl<T: Into<DynamicValue>> From<Vec<T>> for DynamicValue {
    fn from(items: Vec<T>) -> Self {
        DynamicValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<DynamicValue>> From<Option<T>> for DynamicValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DynamicValue::Null, Into::into)
    }
}

/// Decoded JSON ingest
///
/// Numbers keep the narrowest faithful representation: `I64` when the number
/// is an integer that fits, then `U64`, otherwise `F64`.
impl From<serde_json::Value> for DynamicValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DynamicValue::Null,
            serde_json::Value::Bool(b) => DynamicValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DynamicValue::I64(i)
                } else if let Some(u) = n.as_u64() {
                    DynamicValue::U64(u)
                } else {
                    DynamicValue::F64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => DynamicValue::Text(s),
            serde_json::Value::Array(items) => {
                DynamicValue::Sequence(items.into_iter().map(DynamicValue::from).collect())
            }
            serde_json::Value::Object(map) => DynamicValue::opaque(JsonObject(map)),
        }
    }
}
