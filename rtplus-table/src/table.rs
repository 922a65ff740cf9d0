//! Editable table - coordinates in-place create/update/delete over a row set.
//!
//! The table owns a single [`EditingSlot`]. At most one row is in edit mode
//! at any time, and starting an edit anywhere replaces whatever the slot held
//! before. The table performs no I/O: finished edits are handed to the
//! callbacks in [`EditableTableOptions`].
//!
//! Saves and deletes are committed before their callback runs, so
//! `on_create`, `on_update` and `on_delete` see the table already back in
//! `View`. `on_cancel` runs before the reset and still sees the abandoned
//! row. No lock is held while a callback executes, so any callback may start
//! a new edit itself.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, trace, warn};

use crate::error::{EditAction, EditError};
use crate::options::{EditableTableOptions, OffTargetPolicy, RowCallback};
use crate::row::{EditableRow, RowId};
use crate::row_editor::RowEditor;
use crate::slot::{EditMode, EditingSlot};
use crate::state::State;

/// Unique identifier for an EditableTable instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__editable_table_{}", self.0)
    }
}

/// Internal state for the EditableTable.
#[derive(Debug)]
struct TableInner<T: EditableRow> {
    /// The editing slot.
    slot: EditingSlot<T>,
    /// Template the synthetic row was created from (its "original").
    creating_template: Option<T>,
    /// Last snapshot supplied by the data source.
    rows: Vec<T>,
}

impl<T: EditableRow> Default for TableInner<T> {
    fn default() -> Self {
        Self {
            slot: EditingSlot::view(),
            creating_template: None,
            rows: Vec::new(),
        }
    }
}

/// A row-oriented table with a single table-wide editing slot.
///
/// Cloning the table is cheap and yields a handle to the same slot.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use rtplus_table::{EditMode, EditableRow, EditableTable, EditableTableOptions};
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// struct Team {
///     id: String,
///     name: String,
/// }
///
/// impl EditableRow for Team {
///     type Key = String;
///     type Patch = String;
///
///     fn key(&self) -> String {
///         self.id.clone()
///     }
///
///     fn apply_patch(&mut self, name: String) {
///         self.name = name;
///     }
/// }
///
/// let saved = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&saved);
/// let table = EditableTable::new(
///     EditableTableOptions::default().with_on_update(move |team: Team| {
///         sink.lock().unwrap().push(team);
///         Ok(())
///     }),
/// );
///
/// let alpha = Team { id: "a".into(), name: "Alpha".into() };
/// let row = table.row(&alpha);
/// row.start_edit();
/// row.set_modified_row_data("Alpha Team".into());
/// assert_eq!(row.edit_mode(), EditMode::Update);
///
/// row.save_edit().unwrap();
/// assert_eq!(table.edit_mode(), EditMode::View);
/// assert_eq!(saved.lock().unwrap()[0].name, "Alpha Team");
/// ```
pub struct EditableTable<T: EditableRow> {
    /// Unique identifier.
    id: TableId,
    /// Slot and row snapshot.
    inner: State<TableInner<T>>,
    /// Callbacks and settings.
    options: Arc<EditableTableOptions<T>>,
}

impl<T: EditableRow> Clone for EditableTable<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: self.inner.clone(),
            options: Arc::clone(&self.options),
        }
    }
}

impl<T: EditableRow + fmt::Debug> fmt::Debug for EditableTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableTable")
            .field("id", &self.id)
            .field("slot", &self.editing_slot())
            .field("options", &self.options)
            .finish()
    }
}

impl<T: EditableRow> EditableTable<T> {
    /// Create a table in `View` mode with no rows.
    pub fn new(options: EditableTableOptions<T>) -> Self {
        Self {
            id: TableId::new(),
            inner: State::new(TableInner::default()),
            options: Arc::new(options),
        }
    }

    /// Create a table with an initial row snapshot.
    pub fn with_rows(options: EditableTableOptions<T>, rows: Vec<T>) -> Self {
        let table = Self::new(options);
        table.inner.update(|inner| inner.rows = rows);
        table.inner.clear_dirty();
        table
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn options(&self) -> &EditableTableOptions<T> {
        &self.options
    }

    // -------------------------------------------------------------------------
    // Slot access
    // -------------------------------------------------------------------------

    /// Get a copy of the editing slot.
    pub fn editing_slot(&self) -> EditingSlot<T> {
        self.inner.with(|inner| inner.slot.clone())
    }

    /// The table-wide edit mode.
    pub fn edit_mode(&self) -> EditMode {
        self.inner.with(|inner| inner.slot.mode())
    }

    /// Identity of the row in the slot, if any.
    pub fn active_row_id(&self) -> Option<RowId<T::Key>> {
        self.inner.with(|inner| inner.slot.row_id().cloned())
    }

    /// Returns `true` if any row is being edited or created.
    pub fn is_editing(&self) -> bool {
        self.edit_mode().is_editing()
    }

    /// Edit mode of the row identified by `id`.
    pub fn edit_mode_of(&self, id: &RowId<T::Key>) -> EditMode {
        self.inner.with(|inner| {
            if inner.slot.targets(id) {
                inner.slot.mode()
            } else {
                EditMode::View
            }
        })
    }

    /// The edit buffer, if `id` is the row in the slot.
    pub(crate) fn buffer_of(&self, id: &RowId<T::Key>) -> Option<T> {
        self.inner.with(|inner| {
            if inner.slot.targets(id) {
                inner.slot.modified_row().cloned()
            } else {
                None
            }
        })
    }

    /// Check if the table has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.inner.is_dirty()
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.inner.clear_dirty();
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Replace the row snapshot.
    ///
    /// The editing slot is left alone, even if its row is no longer present.
    pub fn set_rows(&self, rows: Vec<T>) {
        self.inner.update(|inner| inner.rows = rows);
    }

    /// Get a copy of the row snapshot.
    pub fn rows(&self) -> Vec<T> {
        self.inner.with(|inner| inner.rows.clone())
    }

    pub fn row_count(&self) -> usize {
        self.inner.with(|inner| inner.rows.len())
    }

    /// Find a row in the snapshot by key.
    pub fn find(&self, key: &T::Key) -> Option<T> {
        self.inner
            .with(|inner| inner.rows.iter().find(|row| &row.key() == key).cloned())
    }

    /// Per-row accessor for `row`, which need not be in the snapshot.
    pub fn row(&self, row: &T) -> RowEditor<'_, T> {
        RowEditor::new(self, RowId::Existing(row.key()), row.clone())
    }

    /// Per-row accessor for the snapshot row with the given key.
    pub fn row_by_key(&self, key: &T::Key) -> Option<RowEditor<'_, T>> {
        self.find(key)
            .map(|row| RowEditor::new(self, RowId::Existing(key.clone()), row))
    }

    /// Per-row accessors for every row in the snapshot, in order.
    pub fn row_editors(&self) -> Vec<RowEditor<'_, T>> {
        self.rows()
            .into_iter()
            .map(|row| RowEditor::new(self, RowId::Existing(row.key()), row))
            .collect()
    }

    /// Per-row accessor for the synthetic row, while one is being created.
    pub fn creating_row(&self) -> Option<RowEditor<'_, T>> {
        let template = self.inner.with(|inner| {
            if inner.slot.mode() == EditMode::Create {
                inner.creating_template.clone()
            } else {
                None
            }
        })?;
        Some(RowEditor::new(self, RowId::Creating, template))
    }

    /// Effective data for every row as it should be displayed.
    ///
    /// The synthetic row, if any, comes first; the row in the slot shows its
    /// buffer; every other row shows its committed data.
    pub fn display_rows(&self) -> Vec<T> {
        self.inner.with(|inner| {
            let mut out = Vec::with_capacity(inner.rows.len() + 1);
            if inner.slot.mode() == EditMode::Create {
                out.extend(inner.slot.modified_row().cloned());
            }
            for row in &inner.rows {
                let id = RowId::Existing(row.key());
                match inner.slot.modified_row() {
                    Some(buffer) if inner.slot.targets(&id) => out.push(buffer.clone()),
                    _ => out.push(row.clone()),
                }
            }
            out
        })
    }

    // -------------------------------------------------------------------------
    // Table-level transitions
    // -------------------------------------------------------------------------

    /// Start composing a new row from the configured template.
    ///
    /// Any edit in progress is discarded without calling `on_cancel`.
    pub fn start_creating(&self) {
        let template = (self.options.create_empty_row)();
        let previous = self.inner.update(|inner| {
            inner.creating_template = Some(template.clone());
            std::mem::replace(&mut inner.slot, EditingSlot::create(template))
        });
        self.log_discarded(&previous, "start creating");
        debug!("Table {}: creating new row", self.id);
    }

    /// Abandon the current edit.
    ///
    /// `on_cancel` runs first, while the abandoned row is still in the slot,
    /// and fires even when nothing was being edited. The slot is then reset.
    pub fn cancel_editing(&self) {
        if let Some(on_cancel) = &self.options.on_cancel {
            on_cancel();
        }
        let previous = self.reset();
        match previous.row_id() {
            Some(id) => debug!("Table {}: cancelled edit of row {}", self.id, id),
            None => trace!("Table {}: cancel with nothing in edit", self.id),
        }
    }

    /// Save the edit in the slot, whichever row it belongs to.
    ///
    /// An update is merged over the snapshot row with the same key; if that
    /// row is no longer in the snapshot, the buffer is passed on as is.
    pub fn save_editing(&self) -> Result<(), EditError> {
        let original = self.inner.with(|inner| match inner.slot.row_id() {
            Some(RowId::Existing(key)) => {
                inner.rows.iter().find(|row| &row.key() == key).cloned()
            }
            _ => None,
        });
        self.finish_edit(original.as_ref())
    }

    // -------------------------------------------------------------------------
    // Transitions used by RowEditor
    // -------------------------------------------------------------------------

    /// Put `original` in the slot as an update.
    pub(crate) fn begin_update(&self, key: T::Key, original: T) {
        let previous = self.inner.update(|inner| {
            inner.creating_template = None;
            std::mem::replace(&mut inner.slot, EditingSlot::update(key.clone(), original))
        });
        self.log_discarded(&previous, "start editing");
        debug!("Table {}: editing row {}", self.id, key);
    }

    /// Merge `patch` into the buffer if `id` is the row in the slot.
    pub(crate) fn patch_buffer(
        &self,
        id: &RowId<T::Key>,
        patch: T::Patch,
    ) -> Result<(), EditError> {
        let patched = self.inner.update(|inner| {
            if !inner.slot.targets(id) {
                return false;
            }
            match inner.slot.modified_row_mut() {
                Some(buffer) => {
                    buffer.apply_patch(patch);
                    true
                }
                None => false,
            }
        });
        if !patched {
            return Err(EditError::not_editing(id));
        }
        trace!("Table {}: patched buffer of row {}", self.id, id);
        Ok(())
    }

    /// Report a write to a row that is not in the slot.
    pub(crate) fn report_off_target(&self, id: &RowId<T::Key>) {
        let active = self.active_row_id();
        match &active {
            Some(active) => warn!(
                "Table {}: ignoring write to row {} while row {} is being edited",
                self.id, id, active
            ),
            None => warn!(
                "Table {}: ignoring write to row {} while no row is being edited",
                self.id, id
            ),
        }
        debug_assert!(
            self.options.off_target_policy != OffTargetPolicy::DebugAssert,
            "write to row {} which is not in the editing slot",
            id
        );
    }

    /// Close the slot and hand a finished edit to `on_create` or `on_update`.
    pub(crate) fn finish_edit(&self, original: Option<&T>) -> Result<(), EditError> {
        let (mode, row_id, buffer) = self.reset().into_parts();
        let Some(buffer) = buffer else {
            trace!("Table {}: save with nothing in edit", self.id);
            return Ok(());
        };
        match mode {
            EditMode::Update => {
                let row = match original {
                    Some(original) => T::merge(original, &buffer),
                    None => buffer,
                };
                if let Some(id) = &row_id {
                    debug!("Table {}: saving row {}", self.id, id);
                }
                self.fire(EditAction::Update, self.options.on_update.as_ref(), row)
            }
            EditMode::Create => {
                debug!("Table {}: saving new row", self.id);
                self.fire(EditAction::Create, self.options.on_create.as_ref(), buffer)
            }
            EditMode::View => Ok(()),
        }
    }

    /// Close the slot and hand `original` to `on_delete`.
    pub(crate) fn delete_row(&self, id: &RowId<T::Key>, original: T) -> Result<(), EditError> {
        let previous = self.reset();
        if let Some(active) = previous.row_id() {
            if active != id {
                warn!(
                    "Table {}: deleting row {} discarded the unsaved edit of row {}",
                    self.id, id, active
                );
            }
        }
        debug!("Table {}: deleting row {}", self.id, id);
        self.fire(EditAction::Delete, self.options.on_delete.as_ref(), original)
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// Return the slot to `View`, yielding what it held.
    fn reset(&self) -> EditingSlot<T> {
        self.inner.update(|inner| {
            inner.creating_template = None;
            std::mem::take(&mut inner.slot)
        })
    }

    fn fire(
        &self,
        action: EditAction,
        callback: Option<&RowCallback<T>>,
        row: T,
    ) -> Result<(), EditError> {
        let Some(callback) = callback else {
            return Ok(());
        };
        callback(row).map_err(|source| {
            warn!("Table {}: {} callback failed: {}", self.id, action, source);
            EditError::callback(action, source)
        })
    }

    fn log_discarded(&self, previous: &EditingSlot<T>, reason: &str) {
        if let Some(id) = previous.row_id() {
            debug!(
                "Table {}: discarded unsaved edit of row {} to {}",
                self.id, id, reason
            );
        }
    }
}
