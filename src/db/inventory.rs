use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tracing::{debug, info, warn};

use crate::models::{Inventory, Record};

use super::connection::{classify_read_error, create_database, open_existing};
use super::error::PersistenceError;

/// What a load did besides filling the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    /// No file existed, so an empty one was written before reading.
    pub created: bool,
    pub records: usize,
}

/// Replace the contents of `inventory` with the records stored at `path`.
///
/// A missing file counts as a first run: an empty inventory file is written
/// and then read back like any other. Anything else that goes wrong is
/// returned to the caller and the in-memory inventory is left as it was.
pub fn load_inventory(
    path: &Path,
    inventory: &mut Inventory,
) -> Result<LoadOutcome, PersistenceError> {
    let exists = path
        .try_exists()
        .map_err(|source| PersistenceError::Access {
            path: path.to_path_buf(),
            source,
        })?;

    let created = !exists;
    if created {
        info!(path = %path.display(), "no inventory file found, creating an empty one");
        save_inventory(path, &Inventory::new())?;
    }

    let conn = open_existing(path)?;
    let records = fetch_records(&conn).map_err(|err| classify_read_error(err, path))?;
    debug!(path = %path.display(), count = records.len(), "loaded inventory");

    let count = records.len();
    inventory.replace(records);
    Ok(LoadOutcome {
        created,
        records: count,
    })
}

/// Write the whole inventory to `path`, overwriting what was there.
///
/// The records go into a sibling staging file first, which is then renamed
/// over the target, so a failed save never leaves a half-written inventory
/// behind.
pub fn save_inventory(path: &Path, inventory: &Inventory) -> Result<(), PersistenceError> {
    let staging = staging_path(path);
    remove_if_present(&staging)?;

    if let Err(err) = write_staging(&staging, inventory) {
        if let Err(cleanup) = fs::remove_file(&staging) {
            warn!(path = %staging.display(), error = %cleanup, "could not remove staging file");
        }
        return Err(err);
    }

    fs::rename(&staging, path).map_err(|source| PersistenceError::Replace {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), count = inventory.len(), "saved inventory");
    Ok(())
}

fn fetch_records(conn: &Connection) -> rusqlite::Result<Vec<Record>> {
    let mut stmt = conn.prepare("SELECT id, title, artist FROM records ORDER BY position")?;

    let records = stmt
        .query_map([], |row| {
            Ok(Record {
                id: row.get(0)?,
                title: row.get(1)?,
                artist: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

fn write_staging(staging: &Path, inventory: &Inventory) -> Result<(), PersistenceError> {
    let write_err = |source| PersistenceError::Write {
        path: staging.to_path_buf(),
        source,
    };

    let mut conn = create_database(staging)?;
    let tx = conn.transaction().map_err(write_err)?;
    {
        let mut stmt = tx
            .prepare("INSERT INTO records (position, id, title, artist) VALUES (?1, ?2, ?3, ?4)")
            .map_err(write_err)?;
        for (position, record) in inventory.iter().enumerate() {
            stmt.execute(params![
                position as i64,
                record.id,
                record.title,
                record.artist
            ])
            .map_err(write_err)?;
        }
    }
    tx.commit().map_err(write_err)?;
    conn.close().map_err(|(_, source)| write_err(source))
}

/// `CDInventory.dat` stages through `CDInventory.dat.tmp`.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn remove_if_present(path: &Path) -> Result<(), PersistenceError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(PersistenceError::Replace {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{append_record, delete_record};
    use tempfile::TempDir;

    fn sample() -> Inventory {
        Inventory::from(vec![
            Record::new(2, "Thriller", "Michael Jackson"),
            Record::new(1, "Abbey Road", "The Beatles"),
            Record::new(2, "Bad", "Michael Jackson"),
        ])
    }

    #[test]
    fn save_then_load_reproduces_order_and_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CDInventory.dat");

        save_inventory(&path, &sample()).unwrap();

        let mut loaded = Inventory::new();
        let outcome = load_inventory(&path, &mut loaded).unwrap();
        assert!(!outcome.created);
        assert_eq!(outcome.records, 3);
        assert_eq!(loaded, sample());
    }

    #[test]
    fn loading_missing_file_creates_empty_inventory_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh.dat");
        let mut inventory = Inventory::from(vec![Record::new(1, "stale", "data")]);

        let outcome = load_inventory(&path, &mut inventory).unwrap();

        assert!(outcome.created);
        assert!(inventory.is_empty());
        assert!(path.exists());

        let mut reread = Inventory::from(vec![Record::new(5, "X", "Y")]);
        let outcome = load_inventory(&path, &mut reread).unwrap();
        assert!(!outcome.created);
        assert!(reread.is_empty());
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inv.dat");

        save_inventory(&path, &sample()).unwrap();
        let mut inventory = sample();
        assert!(delete_record(&mut inventory, 2));
        append_record(&mut inventory, 8, "Blue Train", "John Coltrane");
        save_inventory(&path, &inventory).unwrap();

        let mut loaded = Inventory::new();
        load_inventory(&path, &mut loaded).unwrap();
        let ids: Vec<i64> = loaded.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 8]);
        assert_eq!(loaded.records()[1].title, "Bad");
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn garbage_file_is_reported_and_inventory_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("junk.dat");
        fs::write(&path, b"definitely not an inventory file, just some text bytes").unwrap();

        let mut inventory = sample();
        let err = load_inventory(&path, &mut inventory).unwrap_err();

        assert!(matches!(err, PersistenceError::Corrupt { .. }), "{err:?}");
        assert_eq!(inventory, sample());
    }

    #[test]
    fn foreign_sqlite_file_is_rejected_by_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("other.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute("CREATE TABLE songs (title TEXT)", []).unwrap();
        drop(conn);

        let err = load_inventory(&path, &mut Inventory::new()).unwrap_err();
        match err {
            PersistenceError::UnsupportedVersion { found, expected, .. } => {
                assert_eq!(found, 0);
                assert_eq!(expected, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn saving_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("inv.dat");

        let err = save_inventory(&path, &sample()).unwrap_err();
        assert!(
            matches!(
                err,
                PersistenceError::Open { .. } | PersistenceError::Write { .. }
            ),
            "{err:?}"
        );
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_an_open_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("locked.dat");
        save_inventory(&path, &sample()).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to root.
        if fs::File::open(&path).is_ok() {
            return;
        }

        let mut inventory = sample();
        let err = load_inventory(&path, &mut inventory).unwrap_err();
        assert!(matches!(err, PersistenceError::Open { .. }), "{err:?}");
        assert_eq!(inventory, sample());
    }

    #[test]
    fn staging_path_appends_suffix() {
        assert_eq!(
            staging_path(Path::new("dir/CDInventory.dat")),
            PathBuf::from("dir/CDInventory.dat.tmp")
        );
    }
}
