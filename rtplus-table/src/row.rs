//! Row identity and the trait every editable row implements.

use std::fmt;
use std::hash::Hash;

/// Display form of [`RowId::Creating`].
pub const CREATING_ROW_ID: &str = "__creating__";

/// Trait for rows that can be edited in place in an [`EditableTable`].
///
/// # Example
///
/// ```
/// use rtplus_table::EditableRow;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Team {
///     id: u32,
///     name: String,
/// }
///
/// #[derive(Default)]
/// struct TeamPatch {
///     name: Option<String>,
/// }
///
/// impl EditableRow for Team {
///     type Key = u32;
///     type Patch = TeamPatch;
///
///     fn key(&self) -> u32 {
///         self.id
///     }
///
///     fn apply_patch(&mut self, patch: TeamPatch) {
///         if let Some(name) = patch.name {
///             self.name = name;
///         }
///     }
/// }
/// ```
///
/// [`EditableTable`]: crate::EditableTable
pub trait EditableRow: Clone + Send + Sync + 'static {
    /// The key type used to identify this row.
    type Key: Clone + Eq + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static;

    /// Partial update of this row.
    type Patch;

    /// Return a unique key for this row.
    ///
    /// Must be stable across refreshes of the row collection.
    fn key(&self) -> Self::Key;

    /// Shallow-merge `patch` into this row. Fields the patch does not carry
    /// keep their current value.
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Overlay an edit buffer onto the committed row it was seeded from.
    ///
    /// Struct rows always hold a complete value in the buffer, so the default
    /// returns `edited` as is. Field-map rows override this to keep original
    /// fields that are missing from the buffer.
    fn merge(_original: &Self, edited: &Self) -> Self {
        edited.clone()
    }
}

/// Identity of a row as seen by the editing slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowId<K> {
    /// The synthetic row being composed by `start_creating`.
    Creating,
    /// A row supplied by the data source.
    Existing(K),
}

impl<K> RowId<K> {
    /// Returns `true` for the synthetic creating row.
    pub fn is_creating(&self) -> bool {
        matches!(self, RowId::Creating)
    }

    /// Returns the data-source key, if this is an existing row.
    pub fn key(&self) -> Option<&K> {
        match self {
            RowId::Creating => None,
            RowId::Existing(key) => Some(key),
        }
    }
}

impl<K: fmt::Display> fmt::Display for RowId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Creating => f.write_str(CREATING_ROW_ID),
            RowId::Existing(key) => write!(f, "{}", key),
        }
    }
}
