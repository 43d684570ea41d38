//! Coerce Core - runtime value coercion and comparison
//!
//! This crate turns values whose type is only known at runtime (decoded
//! JSON, CSV cells, schema-less records) into statically typed Rust values,
//! and orders pairs of such values. It includes:
//! - `DynamicValue`, a closed tagged union over the supported kinds
//! - Per-kind scalar converters with explicit overflow rules
//! - Fail-fast sequence conversion
//! - A registry of per-type converter overrides
//! - Checked three-way comparison with a date heuristic for text
//! - Structured error and logging facilities
//!
//! # Example
//!
//! ```
//! use std::cmp::Ordering;
//! use coerce_core::{Converter, DynamicValue};
//!
//! let converter = Converter::new();
//!
//! let ordering = converter
//!     .compare(
//!         &DynamicValue::from("2023-01-02T00:00:00Z"),
//!         &DynamicValue::from("2023-01-01T23:00:00-05:00"),
//!     )
//!     .unwrap();
//! assert_eq!(ordering, Ordering::Less);
//! ```

pub use coerce_core_types as types;

pub mod converter;
pub mod convertible;
pub mod dates;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod registry;
pub mod rules;

// Re-export commonly used types
pub use converter::Converter;
pub use convertible::Convertible;
pub use dates::{ChronoDateParser, DateParser};
pub use errors::{CoerceError, ExError, ExErrorKind, Result};
pub use model::{DynamicValue, JsonObject, OpaqueValue};
pub use registry::{ConvertFn, ConverterRegistry};
pub use rules::is_date_shaped;
pub use types::{NumericKind, ScalarKind, TypeDescriptor, ValueKind};
