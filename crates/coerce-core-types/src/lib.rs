//! Core types shared across the coercion engine
//!
//! This crate provides the descriptors used by both the engine and its
//! callers:
//!
//! - **Kinds**: ValueKind, NumericKind, ScalarKind, TypeDescriptor
//! - **Schema constants**: Canonical field keys and event names for logging

pub mod kind;
pub mod schema;

pub use kind::{NumericKind, ScalarKind, TypeDescriptor, ValueKind};
