//! Canonical schema constants for structured logging
//!
//! These constants keep field and event names consistent between the
//! logging macros, the error facility, and test assertions.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Conversion context
pub const FIELD_TARGET: &str = "target";
pub const FIELD_SOURCE_KIND: &str = "source_kind";
pub const FIELD_INDEX: &str = "index";
pub const FIELD_LEN: &str = "len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
