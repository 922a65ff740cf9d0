//! In-place row editing for RT+ data tables.
//!
//! An [`EditableTable`] coordinates create, update and delete edits over a
//! row collection through one table-wide [`EditingSlot`]. Rendering code asks
//! each row's [`RowEditor`] for its edit mode and effective data; persistence
//! is delegated to the callbacks in [`EditableTableOptions`].

pub mod error;
pub mod options;
pub mod row;
pub mod row_editor;
pub mod slot;
pub mod state;
pub mod table;

pub use error::{BoxError, CallbackResult, EditAction, EditError};
pub use options::{EditableTableOptions, OffTargetPolicy};
pub use row::{CREATING_ROW_ID, EditableRow, RowId};
pub use row_editor::RowEditor;
pub use slot::{EditMode, EditingSlot};
pub use state::State;
pub use table::{EditableTable, TableId};

pub mod prelude {
    pub use crate::error::{CallbackResult, EditError};
    pub use crate::options::{EditableTableOptions, OffTargetPolicy};
    pub use crate::row::{EditableRow, RowId};
    pub use crate::row_editor::RowEditor;
    pub use crate::slot::EditMode;
    pub use crate::table::EditableTable;
}
