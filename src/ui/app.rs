use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::db::{load_inventory, save_inventory};
use crate::models::Inventory;
use crate::store::{append_record, delete_record};

use super::forms::{confirms_reload, confirms_save, parse_id, MenuChoice, RecordField, RecordForm};
use super::helpers::inventory_lines;
use super::terminal::{Console, Tone};

const FIRST_RUN_NOTICE: &str = "No previous file found. Created an empty file!";
const RELOAD_WARNING: &str =
    "WARNING: If you continue, all unsaved data will be lost and the Inventory re-loaded from file.";
const RELOAD_PROMPT: &str =
    "type 'yes' to continue and reload from file. otherwise reload will be canceled: ";
const RELOAD_CANCELED: &str =
    "canceling... Inventory data NOT reloaded. Press [ENTER] to continue to the menu.";
const SAVE_PROMPT: &str = "Save this inventory to file? [y/n] ";
const SAVE_CANCELED: &str =
    "The inventory was NOT saved to file. Press [ENTER] to return to the menu.";
const DELETE_PROMPT: &str = "Which ID would you like to delete? ";
const INVALID_INPUT: &str = "Invalid Input! Try again.";

/// Session state: the working inventory and where it is persisted. The app is
/// the only owner of both for the lifetime of the process.
pub struct App {
    config: AppConfig,
    inventory: Inventory,
}

impl App {
    /// Start with an empty inventory. Call [`App::load_initial`] to pull in
    /// the saved one.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            inventory: Inventory::new(),
        }
    }

    /// The working inventory, including unsaved changes.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// File the session loads from and saves to.
    pub fn data_file(&self) -> &Path {
        self.config.data_file()
    }

    /// Unconditional load performed once before the menu loop starts.
    pub fn load_initial<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        self.load_from_disk(console)
    }

    /// Run one menu operation. Returns `true` when the session should end.
    pub fn handle_choice<R: BufRead, W: Write>(
        &mut self,
        choice: MenuChoice,
        console: &mut Console<R, W>,
    ) -> Result<bool> {
        debug!(?choice, "handling menu choice");
        match choice {
            MenuChoice::Exit => return Ok(true),
            MenuChoice::Load => self.reload(console)?,
            MenuChoice::Add => self.add_record(console)?,
            MenuChoice::Display => self.show_inventory(console)?,
            MenuChoice::Delete => self.delete_record(console)?,
            MenuChoice::Save => self.save(console)?,
        }
        Ok(false)
    }

    fn load_from_disk<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let path = self.config.data_file();
        let outcome = load_inventory(path, &mut self.inventory)
            .with_context(|| format!("failed to load inventory from {}", path.display()))?;
        if outcome.created {
            console.styled_line(FIRST_RUN_NOTICE, Tone::Info)?;
        }
        info!(path = %path.display(), records = outcome.records, "inventory loaded");
        Ok(())
    }

    fn reload<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.styled_line(RELOAD_WARNING, Tone::Warning)?;
        let answer = console.prompt(RELOAD_PROMPT)?;
        if !confirms_reload(&answer) {
            return console.pause(RELOAD_CANCELED);
        }

        console.line("reloading...")?;
        self.load_from_disk(console)?;
        self.show_inventory(console)
    }

    fn add_record<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let mut form = RecordForm::default();
        for field in RecordField::ORDER {
            loop {
                let raw = console.prompt(field.prompt())?;
                if form.accept(field, &raw) {
                    break;
                }
                console.styled_line(INVALID_INPUT, Tone::Error)?;
            }
        }

        let (id, title, artist) = form
            .finish()
            .context("add form finished with a field left unanswered")?;
        append_record(&mut self.inventory, id, &title, &artist);
        self.show_inventory(console)
    }

    fn delete_record<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        self.show_inventory(console)?;
        let raw = console.prompt(DELETE_PROMPT)?;
        // No retry here: a malformed id ends the session.
        let id = parse_id(&raw)?;

        if delete_record(&mut self.inventory, id) {
            console.styled_line("The CD was removed", Tone::Info)?;
        } else {
            console.styled_line("Could not find this CD!", Tone::Warning)?;
        }
        console.blank()?;
        self.show_inventory(console)
    }

    fn save<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        self.show_inventory(console)?;
        let answer = console.prompt(SAVE_PROMPT)?;
        if !confirms_save(&answer) {
            return console.pause(SAVE_CANCELED);
        }

        let path = self.config.data_file();
        save_inventory(path, &self.inventory)
            .with_context(|| format!("failed to save inventory to {}", path.display()))?;
        console.styled_line(
            format!("Inventory saved to {}.", path.display()),
            Tone::Info,
        )
    }

    fn show_inventory<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        console.blank()?;
        for line in inventory_lines(&self.inventory) {
            console.line(line)?;
        }
        Ok(())
    }
}
