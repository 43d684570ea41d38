//! Canonical numeric normalization
//!
//! Every numeric source is first reduced to one of three 64-bit canonical
//! forms, then range-checked against the target width using the bounds table
//! on [`NumericKind`]. Widening never fails; only the final check produces
//! `Overflow` or `NegativeToUnsigned`.

use std::num::IntErrorKind;

use coerce_core_types::NumericKind;

use crate::errors::{CoerceError, Result};
use crate::model::DynamicValue;

/// 2^63 and 2^64 as floats; both are exactly representable
const I64_UPPER_EXCLUSIVE: f64 = 9_223_372_036_854_775_808.0;
const U64_UPPER_EXCLUSIVE: f64 = 18_446_744_073_709_551_616.0;

/// A numeric source reduced to its canonical representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl Number {
    /// Canonical form of a numeric value, `None` for every other kind
    pub(crate) fn of(value: &DynamicValue) -> Option<Number> {
        let number = match value {
            DynamicValue::I8(v) => Number::Signed(i64::from(*v)),
            DynamicValue::I16(v) => Number::Signed(i64::from(*v)),
            DynamicValue::I32(v) => Number::Signed(i64::from(*v)),
            DynamicValue::I64(v) => Number::Signed(*v),
            DynamicValue::Isize(v) => Number::Signed(*v as i64),
            DynamicValue::U8(v) => Number::Unsigned(u64::from(*v)),
            DynamicValue::U16(v) => Number::Unsigned(u64::from(*v)),
            DynamicValue::U32(v) => Number::Unsigned(u64::from(*v)),
            DynamicValue::U64(v) => Number::Unsigned(*v),
            DynamicValue::Usize(v) => Number::Unsigned(*v as u64),
            DynamicValue::F32(v) => Number::Float(f64::from(*v)),
            DynamicValue::F64(v) => Number::Float(*v),
            DynamicValue::Null
            | DynamicValue::Bool(_)
            | DynamicValue::Text(_)
            | DynamicValue::Timestamp(_)
            | DynamicValue::Sequence(_)
            | DynamicValue::Opaque(_) => return None,
        };
        Some(number)
    }

    pub(crate) fn to_f64(self) -> f64 {
        match self {
            Number::Signed(v) => v as f64,
            Number::Unsigned(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    /// Normalize to u64; `target` is only used to label failures
    pub(crate) fn to_u64(self, target: NumericKind) -> Result<u64> {
        match self {
            Number::Unsigned(v) => Ok(v),
            Number::Signed(v) if v < 0 => Err(CoerceError::negative_to_unsigned(v, target)),
            Number::Signed(v) => Ok(v as u64),
            Number::Float(v) if v < 0.0 => Err(CoerceError::negative_to_unsigned(v, target)),
            Number::Float(v) if !v.is_finite() || v >= U64_UPPER_EXCLUSIVE => {
                Err(CoerceError::overflow(v, target))
            }
            Number::Float(v) => Ok(v.trunc() as u64),
        }
    }

    /// Normalize to i64, truncating floats toward zero
    pub(crate) fn to_i64(self, target: NumericKind) -> Result<i64> {
        match self {
            Number::Signed(v) => Ok(v),
            Number::Unsigned(v) => i64::try_from(v).map_err(|_| CoerceError::overflow(v, target)),
            Number::Float(v)
                if !v.is_finite() || v >= I64_UPPER_EXCLUSIVE || v < -I64_UPPER_EXCLUSIVE =>
            {
                Err(CoerceError::overflow(v, target))
            }
            Number::Float(v) => Ok(v.trunc() as i64),
        }
    }
}

/// Range-check a canonical unsigned value against an integer kind
pub(crate) fn fit_unsigned(value: u64, target: NumericKind) -> Result<u64> {
    match target.int_bounds() {
        Some((_, max)) if i128::from(value) <= max => Ok(value),
        _ => Err(CoerceError::overflow(value, target)),
    }
}

/// Range-check a canonical signed value against an integer kind
pub(crate) fn fit_signed(value: i64, target: NumericKind) -> Result<i64> {
    match target.int_bounds() {
        Some((min, max)) if (min..=max).contains(&i128::from(value)) => Ok(value),
        _ => Err(CoerceError::overflow(value, target)),
    }
}

pub(crate) fn parse_u64(text: &str, target: NumericKind) -> Result<u64> {
    text.parse::<u64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => CoerceError::overflow(text, target),
        _ => CoerceError::parse(text, target, e),
    })
}

pub(crate) fn parse_i64(text: &str, target: NumericKind) -> Result<i64> {
    text.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            CoerceError::overflow(text, target)
        }
        _ => CoerceError::parse(text, target, e),
    })
}

/// Parse a float literal
///
/// Literals that round to infinity without spelling it out (`1e400`) are
/// out of range rather than malformed.
pub(crate) fn parse_f64(text: &str, target: NumericKind) -> Result<f64> {
    let parsed: f64 = text
        .parse()
        .map_err(|e| CoerceError::parse(text, target, e))?;
    if parsed.is_infinite() && !spells_infinity(text) {
        return Err(CoerceError::overflow(text, target));
    }
    Ok(parsed)
}

fn spells_infinity(text: &str) -> bool {
    text.trim_start_matches(['+', '-'])
        .get(..3)
        .is_some_and(|head| head.eq_ignore_ascii_case("inf"))
}
