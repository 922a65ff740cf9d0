use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared state cell with interior mutability and a dirty flag.
///
/// `State<T>` wraps an `Arc<RwLock<T>>`, so cloning it is cheap and every
/// clone observes the same value. Each mutation raises the dirty flag, which
/// the host view polls to decide whether the table needs to be redrawn.
///
/// A poisoned lock is recovered rather than propagated: the value behind it
/// is plain data and stays consistent because every writer replaces it whole.
///
/// # Example
///
/// ```
/// use rtplus_table::State;
///
/// let count = State::new(1);
/// count.update(|v| *v += 1);
/// assert_eq!(count.get(), 2);
/// assert!(count.is_dirty());
/// ```
#[derive(Debug)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
    dirty: Arc<AtomicBool>,
}

impl<T> State<T> {
    /// Create a new state with the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, T> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, T> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.read_guard().clone()
    }

    /// Read the value through a closure without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.read_guard())
    }

    /// Set a new value
    pub fn set(&self, value: T) {
        *self.write_guard() = value;
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Set a new value and return the previous one.
    pub fn replace(&self, value: T) -> T {
        let previous = std::mem::replace(&mut *self.write_guard(), value);
        self.dirty.store(true, Ordering::SeqCst);
        previous
    }

    /// Update the value using a closure
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.write_guard());
        self.dirty.store(true, Ordering::SeqCst);
        result
    }

    /// Check if the state has been modified since last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_value() {
        let a = State::new(String::from("alpha"));
        let b = a.clone();
        b.set(String::from("beta"));
        assert_eq!(a.get(), "beta");
    }

    #[test]
    fn test_replace_returns_previous() {
        let state = State::new(3);
        assert_eq!(state.replace(7), 3);
        assert_eq!(state.get(), 7);
    }

    #[test]
    fn test_dirty_flag() {
        let state = State::new(0);
        assert!(!state.is_dirty());
        state.update(|v| *v = 1);
        assert!(state.is_dirty());
        state.clear_dirty();
        assert!(!state.is_dirty());
        let _ = state.with(|v| *v);
        assert!(!state.is_dirty());
    }
}
