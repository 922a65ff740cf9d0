//! Per-row view of the editing slot.

use log::{debug, warn};

use crate::error::EditError;
use crate::row::{EditableRow, RowId};
use crate::slot::EditMode;
use crate::table::EditableTable;

/// Read/write accessor for one row of an [`EditableTable`].
///
/// A `RowEditor` pairs the row's identity with its last committed data. It
/// holds no edit state of its own: every call goes through the table's slot,
/// so accessors for different rows never disagree about which row is active.
pub struct RowEditor<'a, T: EditableRow> {
    table: &'a EditableTable<T>,
    id: RowId<T::Key>,
    original: T,
}

impl<'a, T: EditableRow> RowEditor<'a, T> {
    pub(crate) fn new(table: &'a EditableTable<T>, id: RowId<T::Key>, original: T) -> Self {
        Self {
            table,
            id,
            original,
        }
    }

    pub fn id(&self) -> &RowId<T::Key> {
        &self.id
    }

    /// The last committed data for this row.
    pub fn original(&self) -> &T {
        &self.original
    }

    /// This row's edit mode: the slot's mode if this row is in the slot,
    /// otherwise `View`.
    pub fn edit_mode(&self) -> EditMode {
        self.table.edit_mode_of(&self.id)
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode().is_editing()
    }

    /// The row's effective data: the edit buffer if this row is in the slot,
    /// otherwise the original. Always a complete row.
    pub fn modified_row_data(&self) -> T {
        self.table
            .buffer_of(&self.id)
            .unwrap_or_else(|| self.original.clone())
    }

    /// Merge `patch` into the edit buffer.
    ///
    /// If this row is not in the slot the patch is dropped and a warning is
    /// logged; the slot is left untouched.
    pub fn set_modified_row_data(&self, patch: T::Patch) {
        if self.table.patch_buffer(&self.id, patch).is_err() {
            self.table.report_off_target(&self.id);
        }
    }

    /// Like [`set_modified_row_data`](Self::set_modified_row_data), but an
    /// off-target write is returned as [`EditError::NotEditing`].
    pub fn try_set_modified_row_data(&self, patch: T::Patch) -> Result<(), EditError> {
        self.table.patch_buffer(&self.id, patch)
    }

    /// Put this row in the slot, seeding the buffer from the committed data.
    ///
    /// Any other edit in progress is discarded without calling `on_cancel`.
    /// The synthetic row is editable from the moment it is created, so this
    /// does nothing on it.
    pub fn start_edit(&self) {
        match &self.id {
            RowId::Existing(key) => self.table.begin_update(key.clone(), self.original.clone()),
            RowId::Creating => debug!(
                "Table {}: start_edit on the row being created has no effect",
                self.table.id()
            ),
        }
    }

    /// Abandon the current edit. Same as
    /// [`EditableTable::cancel_editing`].
    pub fn cancel_edit(&self) {
        self.table.cancel_editing();
    }

    /// Save the current edit and return to `View`.
    ///
    /// An update is passed to `on_update` as this row's original overlaid by
    /// the buffer; a new row is passed to `on_create` as the buffer alone.
    /// The slot is back in `View` whether or not a callback fired, and before
    /// a callback error is returned.
    ///
    /// Saving from a row that is not in the slot still saves the active edit,
    /// merged over the active row's own snapshot data.
    pub fn save_edit(&self) -> Result<(), EditError> {
        if self.table.edit_mode_of(&self.id).is_editing() {
            self.table.finish_edit(Some(&self.original))
        } else {
            if let Some(active) = self.table.active_row_id() {
                warn!(
                    "Table {}: save requested from row {} while row {} is being edited",
                    self.table.id(),
                    self.id,
                    active
                );
            }
            self.table.save_editing()
        }
    }

    /// Delete this row and return to `View`.
    ///
    /// `on_delete` receives the committed data, never the buffer. An edit of
    /// any other row is discarded without `on_cancel` or `on_update`. For the
    /// synthetic row the committed data is the template it was created from.
    pub fn delete(&self) -> Result<(), EditError> {
        self.table.delete_row(&self.id, self.original.clone())
    }
}
