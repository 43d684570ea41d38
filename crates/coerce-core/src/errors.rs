use coerce_core_types::{TypeDescriptor, ValueKind};
use thiserror::Error;

/// Result type alias using CoerceError
pub type Result<T> = std::result::Result<T, CoerceError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Source or target kind outside the supported universe
    Unsupported,
    /// Text failed to parse as the target primitive
    Parse,
    /// Numeric value outside the target width's range
    Overflow,
    /// Negative signed or float value requested as an unsigned target
    NegativeToUnsigned,
    /// Text failed the date/time shape check before any parse attempt
    InvalidDateTime,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Unsupported => "ERR_UNSUPPORTED",
            ExErrorKind::Parse => "ERR_PARSE",
            ExErrorKind::Overflow => "ERR_OVERFLOW",
            ExErrorKind::NegativeToUnsigned => "ERR_NEGATIVE_TO_UNSIGNED",
            ExErrorKind::InvalidDateTime => "ERR_INVALID_DATETIME",
        }
    }
}

/// Canonical structured error type
///
/// Flattens a [`CoerceError`] into classification fields for programmatic
/// handling and structured logging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    target: Option<String>,
    source_kind: Option<String>,
    input: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            target: None,
            source_kind: None,
            input: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the requested target type
    pub fn with_target(mut self, target: impl ToString) -> Self {
        self.target = Some(target.to_string());
        self
    }

    /// Add the runtime kind of the offending source value
    pub fn with_source_kind(mut self, kind: ValueKind) -> Self {
        self.source_kind = Some(kind.to_string());
        self
    }

    /// Add the offending input, rendered as text
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn source_kind(&self) -> Option<&str> {
        self.source_kind.as_deref()
    }

    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(target) = &self.target {
            write!(f, " (target: {})", target)?;
        }
        if let Some(source_kind) = &self.source_kind {
            write!(f, " (source_kind: {})", source_kind)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Failure taxonomy for every conversion and comparison
///
/// All failures are returned as values; none of them are fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoerceError {
    /// Source kind cannot be coerced into the requested type at all
    #[error("Unsupported conversion from {source_kind} to {target}")]
    Unsupported {
        source_kind: ValueKind,
        target: TypeDescriptor,
    },

    /// Text did not parse as the requested primitive
    #[error("Cannot parse {input:?} as {target}: {reason}")]
    Parse {
        input: String,
        target: TypeDescriptor,
        reason: String,
    },

    /// Value lies outside the representable range of the requested width
    #[error("Value {value} overflows {target}")]
    Overflow {
        value: String,
        target: TypeDescriptor,
    },

    /// Negative value requested as an unsigned integer
    #[error("Negative value {value} cannot be converted to {target}")]
    NegativeToUnsigned {
        value: String,
        target: TypeDescriptor,
    },

    /// Text does not look like any accepted date/time layout
    #[error("Invalid datetime: {input:?}")]
    InvalidDateTime { input: String },
}

impl CoerceError {
    pub fn unsupported(source_kind: ValueKind, target: impl Into<TypeDescriptor>) -> Self {
        CoerceError::Unsupported {
            source_kind,
            target: target.into(),
        }
    }

    pub fn parse(
        input: impl Into<String>,
        target: impl Into<TypeDescriptor>,
        reason: impl ToString,
    ) -> Self {
        CoerceError::Parse {
            input: input.into(),
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    pub fn overflow(value: impl ToString, target: impl Into<TypeDescriptor>) -> Self {
        CoerceError::Overflow {
            value: value.to_string(),
            target: target.into(),
        }
    }

    pub fn negative_to_unsigned(value: impl ToString, target: impl Into<TypeDescriptor>) -> Self {
        CoerceError::NegativeToUnsigned {
            value: value.to_string(),
            target: target.into(),
        }
    }

    /// Canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            CoerceError::Unsupported { .. } => ExErrorKind::Unsupported,
            CoerceError::Parse { .. } => ExErrorKind::Parse,
            CoerceError::Overflow { .. } => ExErrorKind::Overflow,
            CoerceError::NegativeToUnsigned { .. } => ExErrorKind::NegativeToUnsigned,
            CoerceError::InvalidDateTime { .. } => ExErrorKind::InvalidDateTime,
        }
    }
}

/// Conversion from CoerceError to ExError
impl From<CoerceError> for ExError {
    fn from(err: CoerceError) -> Self {
        let message = err.to_string();
        match err {
            CoerceError::Unsupported {
                source_kind,
                target,
            } => ExError::new(ExErrorKind::Unsupported)
                .with_source_kind(source_kind)
                .with_target(target)
                .with_message(message),

            CoerceError::Parse { input, target, .. } => ExError::new(ExErrorKind::Parse)
                .with_input(input)
                .with_target(target)
                .with_message(message),

            CoerceError::Overflow { value, target } => ExError::new(ExErrorKind::Overflow)
                .with_input(value)
                .with_target(target)
                .with_message(message),

            CoerceError::NegativeToUnsigned { value, target } => {
                ExError::new(ExErrorKind::NegativeToUnsigned)
                    .with_input(value)
                    .with_target(target)
                    .with_message(message)
            }

            CoerceError::InvalidDateTime { input } => ExError::new(ExErrorKind::InvalidDateTime)
                .with_input(input)
                .with_target(coerce_core_types::ScalarKind::Timestamp)
                .with_message(message),
        }
    }
}
