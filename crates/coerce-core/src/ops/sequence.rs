use coerce_core_types::TypeDescriptor;
use tracing::debug;

use super::dispatch;
use crate::converter::Converter;
use crate::convertible::Convertible;
use crate::errors::{CoerceError, Result};
use crate::model::DynamicValue;

/// Coerce every element of a sequence into `U`
///
/// Elements are converted in index order. The first failure aborts the
/// whole conversion and is returned unchanged; later elements are never
/// looked at. A sequence whose elements all have `U`'s kind already is
/// returned as-is without consulting the registry.
///
/// # Errors
///
/// * `Unsupported` - `value` is not a sequence
/// * The first element failure
///
/// # Panics
///
/// Panics when an override registered for `U` returns a value of the wrong
/// kind.
pub fn to_sequence<U: Convertible>(converter: &Converter, value: &DynamicValue) -> Result<Vec<U>> {
    let element = U::descriptor();
    let items = value.as_sequence().ok_or_else(|| {
        CoerceError::unsupported(value.kind(), TypeDescriptor::sequence_of(element.clone()))
    })?;

    if items.iter().all(|item| item.conforms_to(&element)) {
        return items
            .iter()
            .cloned()
            .map(|item| {
                U::from_dynamic(item)
                    .map_err(|other| CoerceError::unsupported(other.kind(), element.clone()))
            })
            .collect();
    }

    convert_items(items, |item| dispatch::to_type::<U>(converter, item))
}

/// Fail-fast element-wise conversion
pub(crate) fn convert_items<U, F>(items: &[DynamicValue], mut convert: F) -> Result<Vec<U>>
where
    F: FnMut(&DynamicValue) -> Result<U>,
{
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            convert(item).map_err(|err| {
                debug!(index, error = %err, "sequence element failed");
                err
            })
        })
        .collect()
}
