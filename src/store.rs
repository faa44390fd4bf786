//! In-memory mutations of the inventory. Callers validate their input before
//! reaching these helpers, so neither operation can fail.

use tracing::debug;

use crate::models::{Inventory, Record};

/// Build a record from already-validated fields and append it to the end of
/// the inventory.
pub fn append_record(inventory: &mut Inventory, id: i64, title: &str, artist: &str) {
    debug!(id, title, artist, "appending record");
    inventory.push(Record::new(id, title, artist));
}

/// Remove the first record carrying `id`. When several records share the id
/// only the earliest inserted one goes; a later call removes the next one.
/// Returns `false` and leaves the inventory untouched when nothing matches.
pub fn delete_record(inventory: &mut Inventory, id: i64) -> bool {
    match inventory.remove_first(id) {
        Some(record) => {
            debug!(id, title = %record.title, "deleted record");
            true
        }
        None => {
            debug!(id, "no record to delete");
            false
        }
    }
}
