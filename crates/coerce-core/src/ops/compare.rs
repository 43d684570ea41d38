use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use coerce_core_types::TypeDescriptor;
use tracing::trace;

use super::{dispatch, scalar};
use crate::converter::Converter;
use crate::convertible::Convertible;
use crate::errors::{CoerceError, Result};
use crate::model::DynamicValue;
use crate::rules::is_date_shaped;

/// Checked three-way comparison of two dynamic values
///
/// Date-shaped text on the left is compared chronologically against `b`
/// coerced to a timestamp. Otherwise `b` is coerced into `a`'s kind and the
/// two are ordered naturally: byte order for text, numeric order, `false <
/// true` for booleans. Floats that are unordered (NaN) compare equal.
///
/// # Errors
///
/// * `Unsupported` - `a` is null, a sequence, or opaque
/// * Any failure coercing `b` into `a`'s kind, or parsing `a` as a date
pub fn compare(converter: &Converter, a: &DynamicValue, b: &DynamicValue) -> Result<Ordering> {
    if let DynamicValue::Text(text) = a {
        if is_date_shaped(text) {
            trace!("comparing chronologically");
            let left = converter.date_parser().parse(text)?;
            let right = scalar::to_timestamp(b, converter.date_parser())?;
            return Ok(left.cmp(&right));
        }
    }

    let ordering = match a {
        DynamicValue::Text(x) => x.as_str().cmp(coerce::<String>(converter, b)?.as_str()),
        DynamicValue::Bool(x) => x.cmp(&coerce::<bool>(converter, b)?),
        DynamicValue::I8(x) => x.cmp(&coerce::<i8>(converter, b)?),
        DynamicValue::I16(x) => x.cmp(&coerce::<i16>(converter, b)?),
        DynamicValue::I32(x) => x.cmp(&coerce::<i32>(converter, b)?),
        DynamicValue::I64(x) => x.cmp(&coerce::<i64>(converter, b)?),
        DynamicValue::Isize(x) => x.cmp(&coerce::<isize>(converter, b)?),
        DynamicValue::U8(x) => x.cmp(&coerce::<u8>(converter, b)?),
        DynamicValue::U16(x) => x.cmp(&coerce::<u16>(converter, b)?),
        DynamicValue::U32(x) => x.cmp(&coerce::<u32>(converter, b)?),
        DynamicValue::U64(x) => x.cmp(&coerce::<u64>(converter, b)?),
        DynamicValue::Usize(x) => x.cmp(&coerce::<usize>(converter, b)?),
        DynamicValue::F32(x) => float_order(x.partial_cmp(&coerce::<f32>(converter, b)?)),
        DynamicValue::F64(x) => float_order(x.partial_cmp(&coerce::<f64>(converter, b)?)),
        DynamicValue::Timestamp(x) => x.cmp(&coerce::<DateTime<Utc>>(converter, b)?),
        DynamicValue::Null | DynamicValue::Sequence(_) | DynamicValue::Opaque(_) => {
            return Err(CoerceError::unsupported(a.kind(), TypeDescriptor::Any));
        }
    };
    Ok(ordering)
}

fn coerce<T: Convertible>(converter: &Converter, value: &DynamicValue) -> Result<T> {
    dispatch::to_type::<T>(converter, value)
}

fn float_order(ordering: Option<Ordering>) -> Ordering {
    ordering.unwrap_or(Ordering::Equal)
}
