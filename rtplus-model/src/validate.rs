//! Row validation run before an edit is saved.
//!
//! The editable table saves whatever is in its buffer. Checking that a row
//! is fit to persist is done here, by the caller, before `save_edit`.

use crate::error::ValidationErrors;

/// Checks a row before it is handed to persistence.
pub trait Validate {
    /// Returns every problem found, or `Ok(())`.
    fn validate(&self) -> Result<(), ValidationErrors>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Records a `required` error when `value` is blank.
pub(crate) fn require(errors: &mut ValidationErrors, field: &str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.add_with_code(field, format!("{} is required", label), "required");
    }
}
