//! The conversion entry point
//!
//! A [`Converter`] owns the override registry and the date parser that every
//! conversion and comparison runs against. It is `Send + Sync`; share one
//! behind an `Arc` to give a whole process the same overrides.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use coerce_core_types::TypeDescriptor;
use tracing::debug;

use crate::convertible::Convertible;
use crate::dates::{ChronoDateParser, DateParser};
use crate::errors::Result;
use crate::model::DynamicValue;
use crate::ops::{compare, dispatch, sequence};
use crate::registry::ConverterRegistry;
use crate::{log_op_end, log_op_error, log_op_start};

/// Coerces and compares dynamic values
///
/// # Example
///
/// ```
/// use coerce_core::{Converter, DynamicValue};
///
/// let converter = Converter::new();
/// let port: u16 = converter.to_type(&DynamicValue::from("8080")).unwrap();
/// assert_eq!(port, 8080);
///
/// let ids: Vec<i64> = converter
///     .to_sequence(&DynamicValue::from(vec!["1", "2", "3"]))
///     .unwrap();
/// assert_eq!(ids, vec![1, 2, 3]);
/// ```
pub struct Converter {
    registry: ConverterRegistry,
    dates: Arc<dyn DateParser>,
}

impl Converter {
    /// Converter with an empty registry and the chrono date parser
    pub fn new() -> Self {
        Self::with_date_parser(ChronoDateParser)
    }

    /// Converter that delegates date parsing to `parser`
    pub fn with_date_parser(parser: impl DateParser + 'static) -> Self {
        Self {
            registry: ConverterRegistry::new(),
            dates: Arc::new(parser),
        }
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    pub fn date_parser(&self) -> &dyn DateParser {
        self.dates.as_ref()
    }

    /// Coerce `value` into the kind of the sample `hint`
    ///
    /// # Errors
    ///
    /// See [`dispatch::to`].
    ///
    /// # Panics
    ///
    /// Panics when an override registered for `T` returns a value of the
    /// wrong kind.
    pub fn to<T: Convertible>(&self, hint: &T, value: &DynamicValue) -> Result<T> {
        debug!(source_kind = %value.kind(), target = %T::descriptor(), "to");
        dispatch::to(self, hint, value)
    }

    /// Coerce `value` into `T`
    ///
    /// # Errors
    ///
    /// See [`dispatch::to`].
    ///
    /// # Panics
    ///
    /// As [`Converter::to`].
    pub fn to_type<T: Convertible>(&self, value: &DynamicValue) -> Result<T> {
        debug!(source_kind = %value.kind(), target = %T::descriptor(), "to_type");
        dispatch::to_type(self, value)
    }

    /// Coerce `value` into the shape a runtime descriptor names
    ///
    /// Useful when the target type is itself data, e.g. read from a schema
    /// document.
    ///
    /// # Errors
    ///
    /// See [`dispatch::to`].
    ///
    /// # Panics
    ///
    /// Panics when an override for `target` returns a non-conforming value.
    pub fn convert_to(
        &self,
        target: &TypeDescriptor,
        value: &DynamicValue,
    ) -> Result<DynamicValue> {
        debug!(source_kind = %value.kind(), target = %target, "convert_to");
        dispatch::convert_to(self, target, value)
    }

    /// Coerce every element of a sequence into `U`, failing fast
    ///
    /// # Errors
    ///
    /// See [`sequence::to_sequence`].
    ///
    /// # Panics
    ///
    /// As [`Converter::to`].
    pub fn to_sequence<U: Convertible>(&self, value: &DynamicValue) -> Result<Vec<U>> {
        let target = U::descriptor();
        let len = value.as_sequence().map_or(0, <[DynamicValue]>::len);
        log_op_start!("to_sequence", target = target, len = len);
        let start = Instant::now();

        let converted = sequence::to_sequence::<U>(self, value).map_err(|e| {
            log_op_error!(
                "to_sequence",
                e.clone(),
                target = target,
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "to_sequence",
            target = target,
            duration_ms = start.elapsed().as_millis() as u64,
            len = converted.len()
        );

        Ok(converted)
    }

    /// Checked three-way comparison
    ///
    /// # Errors
    ///
    /// See [`compare::compare`].
    pub fn compare(&self, a: &DynamicValue, b: &DynamicValue) -> Result<Ordering> {
        let ordering = compare::compare(self, a, b)?;
        debug!(left_kind = %a.kind(), right_kind = %b.kind(), ?ordering, "compare");
        Ok(ordering)
    }

    /// Install the override for result type `T`
    ///
    /// The override replaces standard dispatch whenever `T` is requested,
    /// whatever the hint or source kind. The last registration wins.
    pub fn register<T, F>(&self, convert: F)
    where
        T: Convertible,
        F: Fn(&DynamicValue) -> Result<T> + Send + Sync + 'static,
    {
        self.register_descriptor(T::descriptor(), move |value: &DynamicValue| {
            convert(value).map(Convertible::into_dynamic)
        });
    }

    /// Install an untyped override for `descriptor`
    ///
    /// The override must produce values conforming to `descriptor`; a
    /// mismatch is a programming error and panics at conversion time.
    pub fn register_descriptor<F>(&self, descriptor: TypeDescriptor, convert: F)
    where
        F: Fn(&DynamicValue) -> Result<DynamicValue> + Send + Sync + 'static,
    {
        log_op_start!("register", target = descriptor);
        let start = Instant::now();
        let target = descriptor.to_string();

        let replaced = self.registry.insert(descriptor, Arc::new(convert));

        log_op_end!(
            "register",
            target = target,
            duration_ms = start.elapsed().as_millis() as u64,
            replaced = replaced
        );
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
