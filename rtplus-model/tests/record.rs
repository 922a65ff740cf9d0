//! Tests for dynamic records in an editable table.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rtplus_model::error::FieldError;
use rtplus_model::model::{FieldPatch, Record, Value};
use rtplus_table::{EditMode, EditableTable, EditableTableOptions};
use uuid::Uuid;

fn team(name: &str) -> Record {
    Record::with_id("team", Uuid::new_v4())
        .set("a", 1i64)
        .set("b", 2i64)
        .set("name", name)
}

// ============================================================================
// Typed getters
// ============================================================================

#[test]
fn test_get_missing_field() {
    let record = Record::new("team");
    assert_eq!(
        record.get_string("name"),
        Err(FieldError::missing("name"))
    );
}

#[test]
fn test_get_null_field() {
    let record = Record::new("team").set("name", Value::Null);
    assert_eq!(record.get_string("name"), Ok(None));
}

#[test]
fn test_get_type_mismatch() {
    let record = Record::new("team").set("name", 5i64);
    let err = record.get_string("name").unwrap_err();
    assert_eq!(err, FieldError::type_mismatch("name", "string", "int"));
    assert!(err.to_string().contains("expected string, got int"));
}

#[test]
fn test_get_date_from_string() {
    let record = Record::new("session")
        .set("date", "2026-03-14")
        .set("bad", "14/03/2026");
    assert_eq!(
        record.get_date("date"),
        Ok(NaiveDate::from_ymd_opt(2026, 3, 14))
    );
    let err = record.get_date("bad").unwrap_err();
    assert_eq!(err, FieldError::unparsable("bad", "date", "14/03/2026"));
    assert_eq!(err.field(), "bad");
}

#[test]
fn test_get_float_widens_int() {
    let record = Record::new("skill").set("weight", 3i64);
    assert_eq!(record.get_float("weight"), Ok(Some(3.0)));
}

#[test]
fn test_new_record_is_new() {
    assert!(Record::new("team").is_new());
    assert!(!team("Alpha").is_new());
}

#[test]
fn test_serialize_fields_as_json_object() {
    let record = Record::with_id("team", Uuid::nil()).set("name", "Alpha");
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["fields"]["name"], "Alpha");
    assert_eq!(json["entity_name"], "team");
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_update_merges_fields() {
    let saved = Arc::new(Mutex::new(Vec::new()));
    let sink = saved.clone();
    let original = team("Alpha");
    let table = EditableTable::with_rows(
        EditableTableOptions::new(|| Record::new("team")).with_on_update(move |row| {
            sink.lock().unwrap().push(row);
            Ok(())
        }),
        vec![original.clone()],
    );

    let row = table.row(&original);
    row.start_edit();
    row.set_modified_row_data(FieldPatch::new().set("b", 3i64));
    row.save_edit().unwrap();

    let saved = saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].get_int("a"), Ok(Some(1)));
    assert_eq!(saved[0].get_int("b"), Ok(Some(3)));
    assert_eq!(saved[0].get_string("name"), Ok(Some("Alpha")));
    assert_eq!(saved[0].id(), original.id());
}

#[test]
fn test_create_passes_template_and_patch_only() {
    let created = Arc::new(Mutex::new(Vec::new()));
    let sink = created.clone();
    let table = EditableTable::with_rows(
        EditableTableOptions::new(|| Record::new("team").set("a", 0i64).set("b", 0i64))
            .with_on_create(move |row| {
                sink.lock().unwrap().push(row);
                Ok(())
            }),
        vec![team("Alpha")],
    );

    table.start_creating();
    let creating = table.creating_row().unwrap();
    creating.set_modified_row_data(FieldPatch::new().set("a", 5i64));
    creating.save_edit().unwrap();

    let created = created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].fields().len(), 2);
    assert_eq!(created[0].get_int("a"), Ok(Some(5)));
    assert_eq!(created[0].get_int("b"), Ok(Some(0)));
    assert!(created[0].is_new());
    assert_eq!(table.edit_mode(), EditMode::View);
}
