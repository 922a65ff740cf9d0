//! Editable table configuration.

use std::fmt;
use std::sync::Arc;

use crate::error::CallbackResult;
use crate::row::EditableRow;

pub(crate) type RowFactory<T> = Arc<dyn Fn() -> T + Send + Sync>;
pub(crate) type RowCallback<T> = Arc<dyn Fn(T) -> CallbackResult + Send + Sync>;
pub(crate) type CancelCallback = Arc<dyn Fn() + Send + Sync>;

/// What to do when a row that is not being edited receives a buffer write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffTargetPolicy {
    /// Ignore the write and log a warning.
    #[default]
    Warn,
    /// Ignore the write, log a warning, and fail a `debug_assert!`.
    DebugAssert,
}

/// Callbacks and settings for an [`EditableTable`](crate::EditableTable).
///
/// Every callback is optional; a missing one does nothing. Persistence
/// callbacks return a [`CallbackResult`] so a rejected mutation is reported to
/// whoever triggered it.
///
/// # Example
///
/// ```
/// use rtplus_table::{EditableRow, EditableTableOptions, OffTargetPolicy};
///
/// #[derive(Clone, Debug, Default)]
/// struct Tag {
///     id: String,
///     label: String,
/// }
///
/// impl EditableRow for Tag {
///     type Key = String;
///     type Patch = String;
///
///     fn key(&self) -> String {
///         self.id.clone()
///     }
///
///     fn apply_patch(&mut self, label: String) {
///         self.label = label;
///     }
/// }
///
/// let options = EditableTableOptions::<Tag>::default()
///     .with_on_update(|tag| {
///         println!("saving {}", tag.label);
///         Ok(())
///     })
///     .with_off_target_policy(OffTargetPolicy::Warn);
/// ```
pub struct EditableTableOptions<T: EditableRow> {
    pub(crate) create_empty_row: RowFactory<T>,
    pub(crate) on_create: Option<RowCallback<T>>,
    pub(crate) on_update: Option<RowCallback<T>>,
    pub(crate) on_delete: Option<RowCallback<T>>,
    pub(crate) on_cancel: Option<CancelCallback>,
    pub(crate) off_target_policy: OffTargetPolicy,
}

impl<T: EditableRow> EditableTableOptions<T> {
    /// Creates options whose new rows are produced by `create_empty_row`.
    pub fn new(create_empty_row: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            create_empty_row: Arc::new(create_empty_row),
            on_create: None,
            on_update: None,
            on_delete: None,
            on_cancel: None,
            off_target_policy: OffTargetPolicy::default(),
        }
    }

    /// Sets the template factory for new rows.
    pub fn with_create_empty_row(mut self, f: impl Fn() -> T + Send + Sync + 'static) -> Self {
        self.create_empty_row = Arc::new(f);
        self
    }

    /// Called with the buffer when a new row is saved.
    pub fn with_on_create(mut self, f: impl Fn(T) -> CallbackResult + Send + Sync + 'static) -> Self {
        self.on_create = Some(Arc::new(f));
        self
    }

    /// Called with the original row overlaid by the buffer when an edit is saved.
    pub fn with_on_update(mut self, f: impl Fn(T) -> CallbackResult + Send + Sync + 'static) -> Self {
        self.on_update = Some(Arc::new(f));
        self
    }

    /// Called with the last committed row data when a row is deleted.
    pub fn with_on_delete(mut self, f: impl Fn(T) -> CallbackResult + Send + Sync + 'static) -> Self {
        self.on_delete = Some(Arc::new(f));
        self
    }

    /// Called whenever an edit is abandoned.
    pub fn with_on_cancel(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_cancel = Some(Arc::new(f));
        self
    }

    /// Sets how off-target buffer writes are reported.
    pub fn with_off_target_policy(mut self, policy: OffTargetPolicy) -> Self {
        self.off_target_policy = policy;
        self
    }

    pub fn off_target_policy(&self) -> OffTargetPolicy {
        self.off_target_policy
    }
}

impl<T: EditableRow + Default> Default for EditableTableOptions<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T: EditableRow> Clone for EditableTableOptions<T> {
    fn clone(&self) -> Self {
        Self {
            create_empty_row: Arc::clone(&self.create_empty_row),
            on_create: self.on_create.clone(),
            on_update: self.on_update.clone(),
            on_delete: self.on_delete.clone(),
            on_cancel: self.on_cancel.clone(),
            off_target_policy: self.off_target_policy,
        }
    }
}

impl<T: EditableRow> fmt::Debug for EditableTableOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableTableOptions")
            .field("on_create", &self.on_create.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_delete", &self.on_delete.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .field("off_target_policy", &self.off_target_policy)
            .finish()
    }
}
