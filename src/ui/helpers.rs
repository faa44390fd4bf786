use anyhow::Error;

use crate::models::Inventory;

use super::forms::MenuChoice;

pub(crate) const MENU_PROMPT: &str = "Which operation would you like to perform? [l, a, i, d, s or x]: ";

const LISTING_HEADER: &str = "======= The Current Inventory: =======";
const LISTING_COLUMNS: &str = "ID\tCD Title (by: Artist)";
const LISTING_FOOTER: &str = "======================================";

/// Menu banner followed by one `[key] label` line per choice.
pub(crate) fn menu_lines() -> Vec<String> {
    let mut lines = vec!["------------Menu------------".to_string()];
    lines.extend(
        MenuChoice::ALL
            .into_iter()
            .map(|choice| format!("[{}] {}", choice.key(), choice.label())),
    );
    lines
}

/// Tabular listing of the inventory, one row per record in inventory order.
pub(crate) fn inventory_lines(inventory: &Inventory) -> Vec<String> {
    let mut lines = Vec::with_capacity(inventory.len() + 4);
    lines.push(LISTING_HEADER.to_string());
    lines.push(LISTING_COLUMNS.to_string());
    lines.push(String::new());
    lines.extend(inventory.iter().map(ToString::to_string));
    lines.push(LISTING_FOOTER.to_string());
    lines
}

/// One-line description of an error, every layer of its chain joined with
/// `: ` so the typed classification stays visible next to the root cause.
pub fn surface_error(err: &Error) -> String {
    format!("{err:#}")
}

/// The single line printed to stderr when the session aborts. Never carries a
/// backtrace or a multi-line cause list.
pub fn fatal_report(err: &Error) -> String {
    let message = surface_error(err).replace(['\r', '\n'], " ");
    format!("Error: {message}")
}
