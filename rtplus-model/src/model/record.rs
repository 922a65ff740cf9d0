//! Dynamic field-map row

use std::collections::HashMap;

use chrono::NaiveDate;
use rtplus_table::EditableRow;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Value;
use crate::error::FieldError;

/// A row whose columns are not known at compile time.
///
/// Records hold field values as a `HashMap<String, Value>`. Editing a record
/// in a table is a literal shallow merge: a [`FieldPatch`] overwrites the
/// fields it names, and saving overlays the edited fields onto the committed
/// ones.
///
/// # Example
///
/// ```
/// use rtplus_model::model::Record;
///
/// let record = Record::new("team")
///     .set("name", "Alpha")
///     .set("members", 12i64);
///
/// assert_eq!(record.get_string("name").unwrap(), Some("Alpha"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The kind of row (e.g. "team", "skill").
    pub(crate) entity_name: String,

    /// The unique identifier of the record; nil until the record is saved.
    pub(crate) id: Uuid,

    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new unsaved record for the given entity.
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self::with_id(entity_name, Uuid::nil())
    }

    /// Creates a new record with the given ID.
    pub fn with_id(entity_name: impl Into<String>, id: Uuid) -> Self {
        Self {
            entity_name: entity_name.into(),
            id,
            fields: HashMap::new(),
        }
    }

    // =========================================================================
    // Metadata accessors
    // =========================================================================

    /// Returns the entity name.
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Returns the record ID.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns `true` if the record has not been assigned an ID yet.
    pub fn is_new(&self) -> bool {
        self.id.is_nil()
    }

    /// Sets the record ID.
    pub fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets an f64 field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as f64)), // Allow widening
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a UUID field value. Strings holding a UUID are accepted.
    pub fn get_guid(&self, field: &str) -> Result<Option<Uuid>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Guid(g)) => Ok(Some(*g)),
            Some(Value::String(s)) => Uuid::parse_str(s)
                .map(Some)
                .map_err(|_| FieldError::unparsable(field, "guid", s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "guid", other.type_name())),
        }
    }

    /// Gets a date field value. `YYYY-MM-DD` strings are accepted.
    pub fn get_date(&self, field: &str) -> Result<Option<NaiveDate>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Date(d)) => Ok(Some(*d)),
            Some(Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| FieldError::unparsable(field, "date", s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "date", other.type_name())),
        }
    }
}

// =============================================================================
// Editing
// =============================================================================

/// Partial update of a [`Record`]: the fields to overwrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    fields: HashMap<String, Value>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl EditableRow for Record {
    type Key = Uuid;
    type Patch = FieldPatch;

    fn key(&self) -> Uuid {
        self.id
    }

    fn apply_patch(&mut self, patch: FieldPatch) {
        self.fields.extend(patch.fields);
    }

    fn merge(original: &Self, edited: &Self) -> Self {
        let mut merged = original.clone();
        merged
            .fields
            .extend(edited.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}
