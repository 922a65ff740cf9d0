//! The table-wide editing slot.

use std::fmt;

use crate::row::{EditableRow, RowId};

/// Edit mode of the slot, or of a single row as seen through the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Nothing is being edited.
    #[default]
    View,
    /// An existing row is being edited.
    Update,
    /// A new row is being composed.
    Create,
}

impl EditMode {
    /// Returns `true` for `Update` and `Create`.
    pub fn is_editing(self) -> bool {
        !matches!(self, EditMode::View)
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditMode::View => "View",
            EditMode::Update => "Update",
            EditMode::Create => "Create",
        };
        f.pad(name)
    }
}

/// Record of which row, if any, is being edited and what its buffer holds.
///
/// In `View` mode there is neither a row id nor a buffer; in the other modes
/// there are always both. The constructors are the only way to build a slot,
/// so that pairing cannot be broken from outside.
#[derive(Debug, Clone, PartialEq)]
pub struct EditingSlot<T: EditableRow> {
    mode: EditMode,
    row_id: Option<RowId<T::Key>>,
    modified_row: Option<T>,
}

impl<T: EditableRow> Default for EditingSlot<T> {
    fn default() -> Self {
        Self::view()
    }
}

impl<T: EditableRow> EditingSlot<T> {
    /// The empty slot.
    pub fn view() -> Self {
        Self {
            mode: EditMode::View,
            row_id: None,
            modified_row: None,
        }
    }

    /// A slot editing the existing row `key`, seeded with `row`.
    pub fn update(key: T::Key, row: T) -> Self {
        Self {
            mode: EditMode::Update,
            row_id: Some(RowId::Existing(key)),
            modified_row: Some(row),
        }
    }

    /// A slot composing a new row from `template`.
    pub fn create(template: T) -> Self {
        Self {
            mode: EditMode::Create,
            row_id: Some(RowId::Creating),
            modified_row: Some(template),
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn row_id(&self) -> Option<&RowId<T::Key>> {
        self.row_id.as_ref()
    }

    pub fn modified_row(&self) -> Option<&T> {
        self.modified_row.as_ref()
    }

    pub fn is_view(&self) -> bool {
        self.mode == EditMode::View
    }

    /// Returns `true` if the slot is editing the row identified by `id`.
    pub fn targets(&self, id: &RowId<T::Key>) -> bool {
        self.row_id.as_ref() == Some(id)
    }

    pub(crate) fn modified_row_mut(&mut self) -> Option<&mut T> {
        self.modified_row.as_mut()
    }

    pub(crate) fn into_parts(self) -> (EditMode, Option<RowId<T::Key>>, Option<T>) {
        (self.mode, self.row_id, self.modified_row)
    }
}
