//! Error types for table edit operations.

use std::fmt;

/// Boxed error returned by persistence callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result returned by `on_create`, `on_update` and `on_delete` callbacks.
pub type CallbackResult = Result<(), BoxError>;

/// The operation whose callback failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Create,
    Update,
    Delete,
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditAction::Create => "create",
            EditAction::Update => "update",
            EditAction::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by [`EditableTable`](crate::EditableTable) operations.
///
/// None of these leave the table mid-transition: by the time an error is
/// returned the editing slot already holds its final state.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// A write was addressed to a row that is not in the editing slot.
    #[error("Row '{row}' is not being edited")]
    NotEditing { row: String },

    /// A persistence callback rejected the row.
    #[error("{action} callback failed: {source}")]
    Callback {
        action: EditAction,
        #[source]
        source: BoxError,
    },
}

impl EditError {
    /// Creates a new off-target write error.
    pub fn not_editing(row: impl fmt::Display) -> Self {
        Self::NotEditing {
            row: row.to_string(),
        }
    }

    /// Wraps a callback failure.
    pub fn callback(action: EditAction, source: BoxError) -> Self {
        Self::Callback { action, source }
    }

    /// Returns the failed action if this is a callback error.
    pub fn action(&self) -> Option<EditAction> {
        match self {
            Self::Callback { action, .. } => Some(*action),
            _ => None,
        }
    }
}
