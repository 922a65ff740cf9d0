//! Property tests over random sequences of table operations.

use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use rtplus_table::{EditMode, EditableRow, EditableTable, EditableTableOptions, RowId};

#[derive(Clone, Debug, Default, PartialEq)]
struct Cell {
    id: u8,
    value: i32,
}

impl EditableRow for Cell {
    type Key = u8;
    type Patch = i32;

    fn key(&self) -> u8 {
        self.id
    }

    fn apply_patch(&mut self, value: i32) {
        self.value = value;
    }
}

#[derive(Debug, Clone)]
enum Op {
    StartEdit(u8),
    StartCreating,
    Patch(u8, i32),
    PatchCreating(i32),
    Save(u8),
    Cancel,
    Delete(u8),
}

const ROWS: u8 = 4;

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..ROWS).prop_map(Op::StartEdit),
        Just(Op::StartCreating),
        (0..ROWS, any::<i32>()).prop_map(|(i, v)| Op::Patch(i, v)),
        any::<i32>().prop_map(Op::PatchCreating),
        (0..ROWS).prop_map(Op::Save),
        Just(Op::Cancel),
        (0..ROWS).prop_map(Op::Delete),
    ]
}

fn table() -> (EditableTable<Cell>, Arc<Mutex<usize>>) {
    let callbacks = Arc::new(Mutex::new(0usize));
    let (c, u, d) = (callbacks.clone(), callbacks.clone(), callbacks.clone());
    let options = EditableTableOptions::<Cell>::default()
        .with_on_create(move |_| {
            *c.lock().unwrap() += 1;
            Ok(())
        })
        .with_on_update(move |_| {
            *u.lock().unwrap() += 1;
            Ok(())
        })
        .with_on_delete(move |_| {
            *d.lock().unwrap() += 1;
            Ok(())
        });
    let rows = (0..ROWS).map(|id| Cell { id, value: id as i32 }).collect();
    (EditableTable::with_rows(options, rows), callbacks)
}

fn apply(table: &EditableTable<Cell>, op: &Op) {
    match op {
        Op::StartEdit(i) => table.row_by_key(i).unwrap().start_edit(),
        Op::StartCreating => table.start_creating(),
        Op::Patch(i, v) => table.row_by_key(i).unwrap().set_modified_row_data(*v),
        Op::PatchCreating(v) => {
            if let Some(row) = table.creating_row() {
                row.set_modified_row_data(*v);
            }
        }
        Op::Save(i) => table.row_by_key(i).unwrap().save_edit().unwrap(),
        Op::Cancel => table.cancel_editing(),
        Op::Delete(i) => table.row_by_key(i).unwrap().delete().unwrap(),
    }
}

proptest! {
    #[test]
    fn prop_at_most_one_active_row(ops in prop::collection::vec(op(), 0..40)) {
        let (table, _) = table();
        for op in &ops {
            apply(&table, op);

            let mut active = table
                .row_editors()
                .iter()
                .filter(|row| row.edit_mode() != EditMode::View)
                .count();
            if table.creating_row().is_some() {
                active += 1;
            }
            prop_assert!(active <= 1);

            let slot = table.editing_slot();
            prop_assert_eq!(slot.is_view(), slot.row_id().is_none());
            prop_assert_eq!(slot.is_view(), slot.modified_row().is_none());
            prop_assert_eq!(active == 1, !slot.is_view());
        }
    }

    #[test]
    fn prop_off_target_write_changes_nothing(
        ops in prop::collection::vec(op(), 0..20),
        target in 0..ROWS,
        value in any::<i32>(),
    ) {
        let (table, callbacks) = table();
        for op in &ops {
            apply(&table, op);
        }
        let row = table.row_by_key(&target).unwrap();
        prop_assume!(table.active_row_id() != Some(RowId::Existing(target)));

        let before = table.editing_slot();
        let fired = *callbacks.lock().unwrap();
        row.set_modified_row_data(value);

        prop_assert_eq!(table.editing_slot(), before);
        prop_assert_eq!(row.modified_row_data(), row.original().clone());
        prop_assert_eq!(*callbacks.lock().unwrap(), fired);
    }

    #[test]
    fn prop_seeded_buffer_equals_original(target in 0..ROWS, ops in prop::collection::vec(op(), 0..20)) {
        let (table, _) = table();
        for op in &ops {
            apply(&table, op);
        }
        let row = table.row_by_key(&target).unwrap();
        row.start_edit();
        prop_assert_eq!(row.modified_row_data(), row.original().clone());
    }
}
