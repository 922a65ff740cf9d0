//! Optimistic row cache
//!
//! Holds the rows a table displays and applies mutations before the remote
//! side has confirmed them. When the remote mutation fails the cache is put
//! back the way it was and the error is returned to the table operation that
//! triggered it.

use std::sync::Arc;

use log::{debug, warn};
use rtplus_table::{BoxError, CallbackResult, EditableRow, EditableTable, EditableTableOptions, State};

use crate::validate::Validate;

/// Remote persistence for one kind of row (an RPC mutation, for instance).
pub trait RowSink<T>: Send + Sync {
    fn create(&self, row: &T) -> Result<(), BoxError>;

    fn update(&self, row: &T) -> Result<(), BoxError>;

    fn delete(&self, row: &T) -> Result<(), BoxError>;
}

/// The cache contents before a mutation, for rolling it back.
///
/// Rolling back restores the whole row list as it was when the snapshot was
/// taken.
#[derive(Debug)]
pub struct Snapshot<T> {
    rows: State<Vec<T>>,
    previous: Vec<T>,
}

impl<T> Snapshot<T> {
    /// Restore the cache to this snapshot.
    pub fn rollback(self) {
        debug!("Rolling back optimistic cache to {} rows", self.previous.len());
        self.rows.set(self.previous);
    }
}

/// Ordered, keyed row list with snapshot/rollback.
///
/// Clones share the same rows.
///
/// # Example
///
/// ```
/// use rtplus_model::OptimisticCache;
/// use rtplus_model::model::Record;
///
/// let cache = OptimisticCache::new();
/// let snapshot = cache.insert(Record::new("team").set("name", "Alpha"));
/// assert_eq!(cache.len(), 1);
///
/// snapshot.rollback();
/// assert!(cache.is_empty());
/// ```
#[derive(Debug)]
pub struct OptimisticCache<T: EditableRow> {
    rows: State<Vec<T>>,
}

impl<T: EditableRow> Clone for OptimisticCache<T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
        }
    }
}

impl<T: EditableRow> Default for OptimisticCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: EditableRow> OptimisticCache<T> {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<T>) -> Self {
        Self {
            rows: State::new(rows),
        }
    }

    /// Get a copy of the cached rows, in order.
    pub fn rows(&self) -> Vec<T> {
        self.rows.get()
    }

    pub fn get(&self, key: &T::Key) -> Option<T> {
        self.rows
            .with(|rows| rows.iter().find(|row| &row.key() == key).cloned())
    }

    pub fn len(&self) -> usize {
        self.rows.with(|rows| rows.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if the rows have changed since the last check.
    pub fn is_dirty(&self) -> bool {
        self.rows.is_dirty()
    }

    pub fn clear_dirty(&self) {
        self.rows.clear_dirty();
    }

    /// Take a snapshot without changing anything.
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            rows: self.rows.clone(),
            previous: self.rows.get(),
        }
    }

    /// Replace all rows, e.g. after a refetch.
    pub fn reset(&self, rows: Vec<T>) {
        self.rows.set(rows);
    }

    /// Append `row`, or replace the row with the same key in place.
    pub fn insert(&self, row: T) -> Snapshot<T> {
        let snapshot = self.snapshot();
        let key = row.key();
        self.rows.update(|rows| match rows.iter_mut().find(|r| r.key() == key) {
            Some(existing) => *existing = row,
            None => rows.push(row),
        });
        snapshot
    }

    /// Replace the row with the same key. Unknown keys leave the cache as is.
    pub fn replace(&self, row: T) -> Snapshot<T> {
        let snapshot = self.snapshot();
        let key = row.key();
        let found = self.rows.update(|rows| match rows.iter_mut().find(|r| r.key() == key) {
            Some(existing) => {
                *existing = row;
                true
            }
            None => false,
        });
        if !found {
            debug!("Optimistic replace of unknown row {}", key);
        }
        snapshot
    }

    /// Remove the row with the given key.
    pub fn remove(&self, key: &T::Key) -> Snapshot<T> {
        let snapshot = self.snapshot();
        self.rows.update(|rows| rows.retain(|r| &r.key() != key));
        snapshot
    }

    /// Copy the cached rows into `table` as its row snapshot.
    pub fn sync_table(&self, table: &EditableTable<T>) {
        table.set_rows(self.rows());
    }

    /// Wire `on_create`, `on_update` and `on_delete` to this cache and `sink`.
    ///
    /// Each callback applies its change to the cache, then calls the sink.
    /// Deleting a row the cache never held, such as an unsaved draft, skips
    /// the sink. If the sink fails, the cache is rolled back and the sink's error becomes
    /// the result of the table operation. Other settings in `options` are
    /// kept.
    pub fn bind(
        &self,
        options: EditableTableOptions<T>,
        sink: Arc<dyn RowSink<T>>,
    ) -> EditableTableOptions<T> {
        self.bind_checked(options, sink, |_| Ok(()))
    }

    /// Like [`bind`](Self::bind), but new and updated rows must pass
    /// [`Validate`] before they reach the cache or the sink.
    pub fn bind_validated(
        &self,
        options: EditableTableOptions<T>,
        sink: Arc<dyn RowSink<T>>,
    ) -> EditableTableOptions<T>
    where
        T: Validate,
    {
        self.bind_checked(options, sink, |row| row.validate().map_err(Into::into))
    }

    fn bind_checked(
        &self,
        options: EditableTableOptions<T>,
        sink: Arc<dyn RowSink<T>>,
        check: fn(&T) -> CallbackResult,
    ) -> EditableTableOptions<T> {
        let (create_cache, create_sink) = (self.clone(), Arc::clone(&sink));
        let (update_cache, update_sink) = (self.clone(), Arc::clone(&sink));
        let (delete_cache, delete_sink) = (self.clone(), sink);

        options
            .with_on_create(move |row| {
                check(&row)?;
                let snapshot = create_cache.insert(row.clone());
                settle(snapshot, create_sink.create(&row), "create", &row)
            })
            .with_on_update(move |row| {
                check(&row)?;
                let snapshot = update_cache.replace(row.clone());
                settle(snapshot, update_sink.update(&row), "update", &row)
            })
            .with_on_delete(move |row| {
                if delete_cache.get(&row.key()).is_none() {
                    debug!("Delete of uncached row {} not sent", row.key());
                    return Ok(());
                }
                let snapshot = delete_cache.remove(&row.key());
                settle(snapshot, delete_sink.delete(&row), "delete", &row)
            })
    }
}

/// Keep the optimistic change on success, roll it back on failure.
fn settle<T: EditableRow>(
    snapshot: Snapshot<T>,
    result: Result<(), BoxError>,
    action: &str,
    row: &T,
) -> CallbackResult {
    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            warn!("Remote {} of row {} failed, rolling back: {}", action, row.key(), e);
            snapshot.rollback();
            Err(e)
        }
    }
}
