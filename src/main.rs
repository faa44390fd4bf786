//! Binary entry point: load the inventory file from the working directory
//! and run the menu loop on stdin/stdout until the user exits.
use std::io;
use std::process::ExitCode;

use cd_inventory::{fatal_report, run_app, App, AppConfig, Console};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "session aborted");
            eprintln!("{}", fatal_report(&err));
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let mut console = Console::stdio();
    let mut app = App::new(AppConfig::default());
    app.load_initial(&mut console)?;
    run_app(&mut app, &mut console)
}
