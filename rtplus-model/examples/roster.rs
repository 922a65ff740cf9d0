//! Roster Example
//!
//! Edits a small personnel roster through an editable table backed by the
//! optimistic cache. The "server" rejects every second mutation so the
//! rollback path shows up in the output and in `roster.log`.

use std::fs::File;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rtplus_model::model::{Person, PersonPatch, PersonStatus};
use rtplus_model::{OptimisticCache, RowSink};
use rtplus_table::{BoxError, EditableTable, EditableTableOptions, RowEditor};
use simplelog::{Config, LevelFilter, WriteLogger};

/// Pretend RPC endpoint that fails every other call.
#[derive(Default)]
struct AlternatingServer {
    calls: AtomicUsize,
}

impl AlternatingServer {
    fn call(&self, action: &str, row: &Person) -> Result<(), BoxError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n % 2 == 1 {
            return Err(format!("server refused to {} {}", action, row.display_name()).into());
        }
        println!("server: {} {}", action, row.display_name());
        Ok(())
    }
}

impl RowSink<Person> for AlternatingServer {
    fn create(&self, row: &Person) -> Result<(), BoxError> {
        self.call("create", row)
    }

    fn update(&self, row: &Person) -> Result<(), BoxError> {
        self.call("update", row)
    }

    fn delete(&self, row: &Person) -> Result<(), BoxError> {
        self.call("delete", row)
    }
}

fn sample_roster() -> Vec<Person> {
    [("Ana", "Reyes", "R1"), ("Ben", "Cole", "R2"), ("Cat", "Ngata", "R3")]
        .into_iter()
        .map(|(given, family, callsign)| Person {
            given_name: given.into(),
            family_name: family.into(),
            callsign: Some(callsign.into()),
            ..Person::draft()
        })
        .collect()
}

fn print_row(row: &RowEditor<'_, Person>) {
    let data = row.modified_row_data();
    println!(
        "  [{:>6}] {:<16} {:?}",
        row.edit_mode(),
        data.display_name(),
        data.status
    );
}

fn print_table(table: &EditableTable<Person>) {
    if let Some(row) = table.creating_row() {
        print_row(&row);
    }
    for row in table.row_editors() {
        print_row(&row);
    }
}

fn main() -> std::io::Result<()> {
    let log_file = File::create("roster.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let cache = OptimisticCache::with_rows(sample_roster());
    let server = Arc::new(AlternatingServer::default());
    let options = cache.bind_validated(
        EditableTableOptions::new(Person::draft).with_on_cancel(|| println!("edit cancelled")),
        server,
    );
    let table = EditableTable::with_rows(options, cache.rows());

    println!("Roster:");
    print_table(&table);

    // Mark Ben as a trainee: accepted.
    let ben = table.row_editors().remove(1);
    ben.start_edit();
    ben.set_modified_row_data(PersonPatch {
        status: Some(PersonStatus::Trainee),
        ..Default::default()
    });
    print_table(&table);
    if let Err(e) = ben.save_edit() {
        println!("save failed: {}", e);
    }
    cache.sync_table(&table);

    // Add a new member: refused by the server, so the cache rolls back.
    table.start_creating();
    if let Some(new_row) = table.creating_row() {
        new_row.set_modified_row_data(PersonPatch {
            given_name: Some("Dee".into()),
            family_name: Some("Marsh".into()),
            ..Default::default()
        });
    }
    print_table(&table);
    if let Err(e) = table.save_editing() {
        println!("save failed: {}", e);
    }
    cache.sync_table(&table);

    // Start editing Cat, then change our minds.
    let cat = table.row_editors().remove(2);
    cat.start_edit();
    cat.cancel_edit();

    println!("Final roster:");
    print_table(&table);
    Ok(())
}
