//! Menu-driven CD inventory tracker.
//!
//! The library holds the whole program so the binary stays a thin launcher
//! and tests can drive complete sessions: `store` mutates the in-memory
//! inventory, `db` moves it to and from disk, and `ui` runs the menu loop.
pub mod config;
pub mod db;
pub mod models;
pub mod store;
pub mod ui;

/// Session settings, chiefly the location of the inventory file.
pub use config::AppConfig;

/// Persistence entry points used by the session and by tests that inspect
/// what ended up on disk.
pub use db::{load_inventory, save_inventory, LoadOutcome, PersistenceError};

/// The two domain types every layer passes around.
pub use models::{Inventory, Record};

/// In-memory add and delete operations.
pub use store::{append_record, delete_record};

/// The session object, the console it talks through, and the menu loop.
pub use ui::{fatal_report, run_app, App, Console};
