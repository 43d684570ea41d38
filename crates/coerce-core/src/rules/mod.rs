//! Structural checks applied before fallible parsing

pub mod date_shape;

pub use date_shape::is_date_shaped;
