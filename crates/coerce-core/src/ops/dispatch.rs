use coerce_core_types::TypeDescriptor;
use tracing::trace;

use super::{scalar, sequence};
use crate::converter::Converter;
use crate::convertible::Convertible;
use crate::errors::{CoerceError, Result};
use crate::model::DynamicValue;

/// Coerce `value` into the shape of `hint`
///
/// An override registered for `T` replaces dispatch entirely. Otherwise the
/// hint's runtime shape picks the converter family.
///
/// # Errors
///
/// * `Unsupported` - The hint is null or opaque, or the source kind cannot
///   reach the hinted kind
/// * Any failure of the selected converter or override
///
/// # Panics
///
/// Panics when a registered override returns a value of the wrong kind.
pub fn to<T: Convertible>(converter: &Converter, hint: &T, value: &DynamicValue) -> Result<T> {
    dispatch(converter, hint.hint_descriptor(), value)
}

/// Coerce `value` into `T` without a sample value
///
/// # Errors
///
/// As [`to`].
///
/// # Panics
///
/// As [`to`].
pub fn to_type<T: Convertible>(converter: &Converter, value: &DynamicValue) -> Result<T> {
    dispatch(converter, Some(T::descriptor()), value)
}

fn dispatch<T: Convertible>(
    converter: &Converter,
    shape: Option<TypeDescriptor>,
    value: &DynamicValue,
) -> Result<T> {
    let requested = T::descriptor();

    if let Some(convert) = converter.registry().lookup(&requested) {
        trace!(target_type = %requested, "registry override");
        let produced = convert(value)?;
        return match T::from_dynamic(produced) {
            Ok(converted) => Ok(converted),
            Err(other) => contract_violation(&requested, &other),
        };
    }

    let shape = shape.ok_or_else(|| CoerceError::unsupported(value.kind(), requested.clone()))?;
    let converted = convert_shape(converter, &shape, value)?;
    T::from_dynamic(converted).map_err(|other| CoerceError::unsupported(other.kind(), requested))
}

/// Coerce `value` into the shape named by `target`, honouring overrides
///
/// # Errors
///
/// As [`to`].
///
/// # Panics
///
/// Panics when an override for `target` returns a value that does not
/// conform to it.
pub fn convert_to(
    converter: &Converter,
    target: &TypeDescriptor,
    value: &DynamicValue,
) -> Result<DynamicValue> {
    if let Some(convert) = converter.registry().lookup(target) {
        let produced = convert(value)?;
        if !produced.conforms_to(target) {
            contract_violation(target, &produced);
        }
        return Ok(produced);
    }
    convert_shape(converter, target, value)
}

fn convert_shape(
    converter: &Converter,
    shape: &TypeDescriptor,
    value: &DynamicValue,
) -> Result<DynamicValue> {
    match shape {
        TypeDescriptor::Any => Ok(value.clone()),
        TypeDescriptor::Scalar(kind) => scalar::convert(*kind, value, converter.date_parser()),
        TypeDescriptor::Sequence(element) => {
            let items = value
                .as_sequence()
                .ok_or_else(|| CoerceError::unsupported(value.kind(), shape.clone()))?;
            if value.conforms_to(shape) {
                return Ok(value.clone());
            }
            sequence::convert_items(items, |item| convert_to(converter, element, item))
                .map(DynamicValue::Sequence)
        }
    }
}

fn contract_violation(requested: &TypeDescriptor, produced: &DynamicValue) -> ! {
    panic!(
        "converter override for {requested} produced a {} value",
        produced.kind()
    )
}
