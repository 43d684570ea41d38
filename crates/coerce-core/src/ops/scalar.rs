//! Per-kind scalar converters
//!
//! One converter per target kind. Numeric targets go through the canonical
//! 64-bit forms in [`numeric`](super::numeric) and are range-checked last, so
//! every failure names the width the caller asked for.

use chrono::{DateTime, Utc};
use coerce_core_types::{NumericKind, ScalarKind};
use tracing::trace;

use super::numeric::{fit_signed, fit_unsigned, parse_f64, parse_i64, parse_u64, Number};
use crate::dates::DateParser;
use crate::errors::{CoerceError, Result};
use crate::model::DynamicValue;
use crate::rules::is_date_shaped;

/// Coerce `value` into the scalar `kind`
///
/// # Errors
///
/// Propagates the failure of the per-kind converter.
pub fn convert(
    kind: ScalarKind,
    value: &DynamicValue,
    dates: &dyn DateParser,
) -> Result<DynamicValue> {
    trace!(target_kind = %kind, source_kind = %value.kind(), "scalar convert");
    match kind {
        ScalarKind::Text => Ok(DynamicValue::Text(to_text(value))),
        ScalarKind::Bool => to_bool(value).map(DynamicValue::Bool),
        ScalarKind::Timestamp => to_timestamp(value, dates).map(DynamicValue::Timestamp),
        ScalarKind::Numeric(numeric) => to_numeric(numeric, value),
    }
}

/// Coerce `value` into the numeric `kind`
///
/// # Errors
///
/// `Unsupported` for non-numeric, non-text sources; `Parse`, `Overflow` or
/// `NegativeToUnsigned` as described on the individual converters.
pub fn to_numeric(kind: NumericKind, value: &DynamicValue) -> Result<DynamicValue> {
    let converted = match kind {
        NumericKind::I8 => DynamicValue::I8(to_i8(value)?),
        NumericKind::I16 => DynamicValue::I16(to_i16(value)?),
        NumericKind::I32 => DynamicValue::I32(to_i32(value)?),
        NumericKind::I64 => DynamicValue::I64(to_i64(value)?),
        NumericKind::Isize => DynamicValue::Isize(to_isize(value)?),
        NumericKind::U8 => DynamicValue::U8(to_u8(value)?),
        NumericKind::U16 => DynamicValue::U16(to_u16(value)?),
        NumericKind::U32 => DynamicValue::U32(to_u32(value)?),
        NumericKind::U64 => DynamicValue::U64(to_u64(value)?),
        NumericKind::Usize => DynamicValue::Usize(to_usize(value)?),
        NumericKind::F32 => DynamicValue::F32(to_f32(value)?),
        NumericKind::F64 => DynamicValue::F64(to_f64(value)?),
    };
    Ok(converted)
}

/// Canonical textual form; never fails
///
/// A non-empty sequence made only of `U8` elements is a byte string and is
/// decoded as UTF-8 (invalid sequences are replaced).
pub fn to_text(value: &DynamicValue) -> String {
    match value {
        DynamicValue::Text(text) => text.clone(),
        DynamicValue::Sequence(items) if !items.is_empty() => match byte_string(items) {
            Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            None => value.to_string(),
        },
        other => other.to_string(),
    }
}

fn byte_string(items: &[DynamicValue]) -> Option<Vec<u8>> {
    items
        .iter()
        .map(|item| match item {
            DynamicValue::U8(b) => Some(*b),
            _ => None,
        })
        .collect()
}

/// Boolean passthrough, or case-insensitive `1 t true` / `0 f false`
///
/// # Errors
///
/// `Parse` for any other text, `Unsupported` for non-text sources.
pub fn to_bool(value: &DynamicValue) -> Result<bool> {
    match value {
        DynamicValue::Bool(b) => Ok(*b),
        DynamicValue::Text(text) => match text.to_ascii_lowercase().as_str() {
            "1" | "t" | "true" => Ok(true),
            "0" | "f" | "false" => Ok(false),
            _ => Err(CoerceError::parse(
                text.as_str(),
                ScalarKind::Bool,
                "not a boolean token",
            )),
        },
        other => Err(CoerceError::unsupported(other.kind(), ScalarKind::Bool)),
    }
}

/// Timestamp passthrough, or shape-checked text handed to `dates`
///
/// The parser is never invoked for text that fails the shape check.
///
/// # Errors
///
/// `InvalidDateTime` when the text is not date-shaped, the parser's `Parse`
/// error when it rejects shaped text, `Unsupported` for other sources.
pub fn to_timestamp(value: &DynamicValue, dates: &dyn DateParser) -> Result<DateTime<Utc>> {
    match value {
        DynamicValue::Timestamp(t) => Ok(*t),
        DynamicValue::Text(text) if is_date_shaped(text) => dates.parse(text),
        DynamicValue::Text(text) => Err(CoerceError::InvalidDateTime {
            input: text.clone(),
        }),
        other => Err(CoerceError::unsupported(other.kind(), ScalarKind::Timestamp)),
    }
}

/// # Errors
///
/// `Parse` for malformed text, `Overflow` for text beyond `f64` range.
pub fn to_f64(value: &DynamicValue) -> Result<f64> {
    float_source(value, NumericKind::F64)
}

/// # Errors
///
/// As [`to_f64`], plus `Overflow` when a finite magnitude exceeds
/// `f32::MAX`. Infinities and NaN carry over.
pub fn to_f32(value: &DynamicValue) -> Result<f32> {
    if let DynamicValue::F32(v) = value {
        return Ok(*v);
    }
    let wide = float_source(value, NumericKind::F32)?;
    if wide.is_finite() && wide.abs() > f64::from(f32::MAX) {
        return Err(CoerceError::overflow(wide, NumericKind::F32));
    }
    Ok(wide as f32)
}

fn float_source(value: &DynamicValue, target: NumericKind) -> Result<f64> {
    if let Some(number) = Number::of(value) {
        return Ok(number.to_f64());
    }
    match value {
        DynamicValue::Text(text) => parse_f64(text, target),
        other => Err(CoerceError::unsupported(other.kind(), target)),
    }
}

fn unsigned_source(value: &DynamicValue, target: NumericKind) -> Result<u64> {
    if let Some(number) = Number::of(value) {
        return number.to_u64(target);
    }
    match value {
        DynamicValue::Text(text) => parse_u64(text, target),
        other => Err(CoerceError::unsupported(other.kind(), target)),
    }
}

fn signed_source(value: &DynamicValue, target: NumericKind) -> Result<i64> {
    if let Some(number) = Number::of(value) {
        return number.to_i64(target);
    }
    match value {
        DynamicValue::Text(text) => parse_i64(text, target),
        other => Err(CoerceError::unsupported(other.kind(), target)),
    }
}

macro_rules! integer_converters {
    ($($name:ident => $ty:ty, $kind:expr, $source:ident, $fit:ident;)*) => {
        $(
            #[doc = concat!("Coerce into `", stringify!($ty), "`")]
            ///
            /// # Errors
            ///
            /// `Overflow` outside the width's range, `Parse` for malformed
            /// text, `Unsupported` for non-numeric sources.
            pub fn $name(value: &DynamicValue) -> Result<$ty> {
                let target = $kind;
                let canonical = $fit($source(value, target)?, target)?;
                <$ty>::try_from(canonical).map_err(|_| CoerceError::overflow(canonical, target))
            }
        )*
    };
}

integer_converters! {
    to_u8 => u8, NumericKind::U8, unsigned_source, fit_unsigned;
    to_u16 => u16, NumericKind::U16, unsigned_source, fit_unsigned;
    to_u32 => u32, NumericKind::U32, unsigned_source, fit_unsigned;
    to_u64 => u64, NumericKind::U64, unsigned_source, fit_unsigned;
    to_usize => usize, NumericKind::Usize, unsigned_source, fit_unsigned;
    to_i8 => i8, NumericKind::I8, signed_source, fit_signed;
    to_i16 => i16, NumericKind::I16, signed_source, fit_signed;
    to_i32 => i32, NumericKind::I32, signed_source, fit_signed;
    to_i64 => i64, NumericKind::I64, signed_source, fit_signed;
    to_isize => isize, NumericKind::Isize, signed_source, fit_signed;
}
