//! Text front-end: the menu loop, prompts and inventory listing. All console
//! traffic goes through [`Console`] so sessions can be scripted in tests.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use forms::{InputError, MenuChoice};
pub use helpers::{fatal_report, surface_error};
pub use terminal::{run_app, Console, Tone};
