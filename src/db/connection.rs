use std::path::Path;

use rusqlite::{Connection, Error as SqlError, ErrorCode, OpenFlags};

use super::error::PersistenceError;

/// Value stored in `PRAGMA user_version`. Files written with another layout
/// are refused instead of being half-read.
pub(crate) const FORMAT_VERSION: i64 = 1;

/// `position` keeps insertion order; `id` is deliberately not unique.
const RECORDS_TABLE: &str = "CREATE TABLE records (
    position INTEGER PRIMARY KEY,
    id INTEGER NOT NULL,
    title TEXT NOT NULL,
    artist TEXT NOT NULL
)";

/// Create a brand new inventory database at `path` with the current schema.
/// The caller is expected to hand in a path that does not exist yet.
pub(crate) fn create_database(path: &Path) -> Result<Connection, PersistenceError> {
    let write_err = |source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    };

    let conn = Connection::open(path).map_err(|source| PersistenceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    conn.execute(RECORDS_TABLE, []).map_err(write_err)?;
    conn.execute_batch(&format!("PRAGMA user_version = {FORMAT_VERSION}"))
        .map_err(write_err)?;

    Ok(conn)
}

/// Open an existing inventory read-only and make sure it was written in the
/// format this build understands.
pub(crate) fn open_existing(path: &Path) -> Result<Connection, PersistenceError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| PersistenceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let found: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|err| classify_read_error(err, path))?;
    if found != FORMAT_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            path: path.to_path_buf(),
            found,
            expected: FORMAT_VERSION,
        });
    }

    Ok(conn)
}

/// Sort SQLite read failures into "could not get at the file" versus "the
/// bytes are not an inventory".
pub(crate) fn classify_read_error(err: SqlError, path: &Path) -> PersistenceError {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::CannotOpen | ErrorCode::PermissionDenied | ErrorCode::DatabaseBusy)
    ) {
        PersistenceError::Open {
            path: path.to_path_buf(),
            source: err,
        }
    } else {
        PersistenceError::Corrupt {
            path: path.to_path_buf(),
            source: err,
        }
    }
}
