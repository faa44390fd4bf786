use thiserror::Error;

/// The six operations offered by the main menu.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Load,
    Add,
    Display,
    Delete,
    Save,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::Load,
        MenuChoice::Add,
        MenuChoice::Display,
        MenuChoice::Delete,
        MenuChoice::Save,
        MenuChoice::Exit,
    ];

    /// Single-letter code typed at the menu prompt.
    pub fn key(self) -> char {
        match self {
            MenuChoice::Load => 'l',
            MenuChoice::Add => 'a',
            MenuChoice::Display => 'i',
            MenuChoice::Delete => 'd',
            MenuChoice::Save => 's',
            MenuChoice::Exit => 'x',
        }
    }

    /// Menu line describing the choice.
    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Load => "load Inventory from file",
            MenuChoice::Add => "Add CD",
            MenuChoice::Display => "Display Current Inventory",
            MenuChoice::Delete => "delete CD from Inventory",
            MenuChoice::Save => "Save Inventory to file",
            MenuChoice::Exit => "exit",
        }
    }

    /// Interpret raw menu input. Surrounding whitespace and case are ignored;
    /// anything other than one of the six codes yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        let mut chars = normalized.chars();
        let key = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::ALL.into_iter().find(|choice| choice.key() == key)
    }
}

/// Problems with console input that the session cannot recover from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a valid CD ID")]
    NotAnInteger(String),
    #[error("input ended before the prompt was answered")]
    Closed,
}

/// Parse a CD id, ignoring surrounding whitespace.
pub fn parse_id(raw: &str) -> Result<i64, InputError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| InputError::NotAnInteger(trimmed.to_string()))
}

/// Trim a free-text field, rejecting it when nothing is left.
pub fn parse_required(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Reloading throws away unsaved work, so only the full word `yes` (in any
/// case) confirms it. The answer is not trimmed.
pub fn confirms_reload(answer: &str) -> bool {
    answer.to_lowercase() == "yes"
}

/// Saving is confirmed with `y`, ignoring case and surrounding whitespace.
pub fn confirms_save(answer: &str) -> bool {
    answer.trim().to_lowercase() == "y"
}

/// Fields collected by the "Add CD" flow, in prompt order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RecordField {
    Id,
    Title,
    Artist,
}

impl RecordField {
    pub const ORDER: [RecordField; 3] =
        [RecordField::Id, RecordField::Title, RecordField::Artist];

    pub fn prompt(self) -> &'static str {
        match self {
            RecordField::Id => "Enter an ID: ",
            RecordField::Title => "What is the CD's title? ",
            RecordField::Artist => "What is the Artist's name? ",
        }
    }
}

/// Values accepted so far while adding a CD.
#[derive(Debug, Default, Clone)]
pub struct RecordForm {
    id: Option<i64>,
    title: Option<String>,
    artist: Option<String>,
}

impl RecordForm {
    /// Validate `raw` for `field` and keep it when valid. Returns `false` when
    /// the caller should ask again.
    pub fn accept(&mut self, field: RecordField, raw: &str) -> bool {
        match field {
            RecordField::Id => {
                self.id = parse_id(raw).ok();
                self.id.is_some()
            }
            RecordField::Title => {
                self.title = parse_required(raw);
                self.title.is_some()
            }
            RecordField::Artist => {
                self.artist = parse_required(raw);
                self.artist.is_some()
            }
        }
    }

    /// Typed values, once every field has been accepted.
    pub fn finish(self) -> Option<(i64, String, String)> {
        Some((self.id?, self.title?, self.artist?))
    }
}
