//! Persistence of the inventory to a single SQLite file. The file is opened
//! for the duration of one load or save and closed again straight after.

mod connection;
mod error;
mod inventory;

pub use error::PersistenceError;
pub use inventory::{load_inventory, save_inventory, LoadOutcome};
