use std::path::{Path, PathBuf};

/// Name of the inventory file used when nothing else is configured. Relative
/// paths resolve against the working directory the program was started in.
pub const DEFAULT_DATA_FILE: &str = "CDInventory.dat";

/// Settings for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
}

impl AppConfig {
    pub fn with_data_file(path: impl Into<PathBuf>) -> Self {
        Self {
            data_file: path.into(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_data_file(DEFAULT_DATA_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_working_directory_file() {
        assert_eq!(AppConfig::default().data_file(), Path::new("CDInventory.dat"));
    }
}
