// Validation errors raised while decoding console and item descriptors

/// A single field of a descriptor failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("missing or malformed field `{0}`")]
    Invalid(&'static str),

    #[error("field `{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: i64 },

    #[error("descriptor is not an object")]
    NotAnObject,
}

impl FieldError {
    /// Name of the offending field, if the failure is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FieldError::Invalid(field) => Some(field),
            FieldError::Negative { field, .. } => Some(field),
            FieldError::NotAnObject => None,
        }
    }
}

/// Console-level decoding is all-or-nothing: any failure aborts construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsoleError {
    #[error("invalid console props: {0}")]
    InvalidConsoleProps(#[from] FieldError),
}

/// Item-level failures. These are recovered per descriptor by the console.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("invalid widget props: {0}")]
    InvalidWidgetProps(#[from] FieldError),

    #[error("unknown or unsupported widget type (tag {tag:?})")]
    UnknownOrUnsupportedVariant { tag: Option<i64> },
}
