//! Errors from typed Record getters

/// Why a typed getter could not produce a value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// The record has no such field.
    #[error("Field '{field}' not found in record")]
    Missing { field: String },

    /// The field holds a different kind of value.
    #[error("Field '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The field holds text that does not parse as the requested kind.
    #[error("Field '{field}' holds '{text}', which is not a valid {expected}")]
    Unparsable {
        field: String,
        expected: &'static str,
        text: String,
    },
}

impl FieldError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    pub fn unparsable(field: impl Into<String>, expected: &'static str, text: impl Into<String>) -> Self {
        Self::Unparsable {
            field: field.into(),
            expected,
            text: text.into(),
        }
    }

    /// The field the error is about.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::TypeMismatch { field, .. } | Self::Unparsable { field, .. } => field,
        }
    }
}
