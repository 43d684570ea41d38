//! Rust types that can be requested as conversion results
//!
//! [`Convertible`] ties a static Rust type to the [`TypeDescriptor`] it is
//! registered and dispatched under, and moves values in and out of
//! [`DynamicValue`].

use chrono::{DateTime, Utc};
use coerce_core_types::{NumericKind, ScalarKind, TypeDescriptor};

use crate::model::DynamicValue;

/// A type the engine can produce
pub trait Convertible: Sized + Send + 'static {
    /// Descriptor of the requested result type; the registry key for `Self`
    fn descriptor() -> TypeDescriptor;

    /// Shape this value asks for when used as a schema hint
    ///
    /// `None` means the hint lies outside the supported universe. Statically
    /// typed hints always answer with their own descriptor.
    fn hint_descriptor(&self) -> Option<TypeDescriptor> {
        Some(Self::descriptor())
    }

    fn into_dynamic(self) -> DynamicValue;

    /// Recover `Self`, handing the value back when its kind does not match
    fn from_dynamic(value: DynamicValue) -> Result<Self, DynamicValue>;
}

macro_rules! scalar_convertible {
    ($($ty:ty => $variant:ident, $kind:expr;)*) => {
        $(
            impl Convertible for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::Scalar($kind)
                }

                fn into_dynamic(self) -> DynamicValue {
                    DynamicValue::$variant(self)
                }

                fn from_dynamic(value: DynamicValue) -> Result<Self, DynamicValue> {
                    match value {
                        DynamicValue::$variant(v) => Ok(v),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

scalar_convertible! {
    bool => Bool, ScalarKind::Bool;
    String => Text, ScalarKind::Text;
    DateTime<Utc> => Timestamp, ScalarKind::Timestamp;
    i8 => I8, ScalarKind::Numeric(NumericKind::I8);
    i16 => I16, ScalarKind::Numeric(NumericKind::I16);
    i32 => I32, ScalarKind::Numeric(NumericKind::I32);
    i64 => I64, ScalarKind::Numeric(NumericKind::I64);
    isize => Isize, ScalarKind::Numeric(NumericKind::Isize);
    u8 => U8, ScalarKind::Numeric(NumericKind::U8);
    u16 => U16, ScalarKind::Numeric(NumericKind::U16);
    u32 => U32, ScalarKind::Numeric(NumericKind::U32);
    u64 => U64, ScalarKind::Numeric(NumericKind::U64);
    usize => Usize, ScalarKind::Numeric(NumericKind::Usize);
    f32 => F32, ScalarKind::Numeric(NumericKind::F32);
    f64 => F64, ScalarKind::Numeric(NumericKind::F64);
}

impl<T: Convertible> Convertible for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence_of(T::descriptor())
    }

    fn into_dynamic(self) -> DynamicValue {
        DynamicValue::Sequence(self.into_iter().map(Convertible::into_dynamic).collect())
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, DynamicValue> {
        match value {
            DynamicValue::Sequence(items) => items.into_iter().map(T::from_dynamic).collect(),
            other => Err(other),
        }
    }
}

/// The untyped result: no coercion is requested
///
/// As a hint its runtime tag picks the shape, so a typed sample value
/// coerces incoming values into its own kind. A sequence sample whose
/// elements all share one shape coerces elements into it; an empty or mixed
/// one, or one holding null or opaque elements, leaves elements as they are.
impl Convertible for DynamicValue {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Any
    }

    fn hint_descriptor(&self) -> Option<TypeDescriptor> {
        match self {
            DynamicValue::Null | DynamicValue::Opaque(_) => None,
            DynamicValue::Sequence(items) => {
                Some(TypeDescriptor::sequence_of(common_element_shape(items)))
            }
            other => other.kind().as_scalar().map(TypeDescriptor::Scalar),
        }
    }

    fn into_dynamic(self) -> DynamicValue {
        self
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, DynamicValue> {
        Ok(value)
    }
}

fn common_element_shape(items: &[DynamicValue]) -> TypeDescriptor {
    let mut shapes = items.iter().map(<DynamicValue as Convertible>::hint_descriptor);
    let Some(Some(first)) = shapes.next() else {
        return TypeDescriptor::Any;
    };
    if shapes.all(|shape| shape.as_ref() == Some(&first)) {
        first
    } else {
        TypeDescriptor::Any
    }
}
