//! Canonical conversion lifecycle macros
//!
//! Every lifecycle event names the target type it converts to, so events
//! for different targets can be told apart in a shared sink. Extra fields
//! follow the required ones.

/// Log the start of a conversion operation
///
/// # Example
///
/// ```
/// # use coerce_core::{log_op_start, TypeDescriptor};
/// let target = TypeDescriptor::Any;
/// log_op_start!("to_sequence", target = target);
/// log_op_start!("to_sequence", target = target, len = 3usize);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr, target = $target:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_START,
            target = %$target,
        );
    };
    ($op:expr, target = $target:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_START,
            target = %$target,
            $($field)*
        );
    };
}

/// Log the successful end of a conversion operation
///
/// # Example
///
/// ```
/// # use coerce_core::{log_op_end, NumericKind};
/// log_op_end!("to_sequence", target = NumericKind::U8, duration_ms = 42, len = 2usize);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, target = $target:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            target = %$target,
            duration_ms = $duration,
        );
    };
    ($op:expr, target = $target:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            target = %$target,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log a failed conversion operation
///
/// Accepts anything convertible into [`ExError`](crate::errors::ExError).
/// The error's code and kind are logged, plus the runtime kind of the
/// offending source value when the error carries one.
///
/// # Example
///
/// ```
/// # use coerce_core::log_op_error;
/// # use coerce_core::errors::CoerceError;
/// # use coerce_core::ScalarKind;
/// let err = CoerceError::InvalidDateTime { input: "hello".to_string() };
/// log_op_error!("compare", err, target = ScalarKind::Timestamp, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, target = $target:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END_ERROR,
            target = %$target,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            source_kind = ex_err.source_kind(),
        );
    }};
    ($op:expr, $err:expr, target = $target:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END_ERROR,
            target = %$target,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            source_kind = ex_err.source_kind(),
            $($field)*
        );
    }};
}
