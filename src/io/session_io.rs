//! Durable session storage.
//!
//! The session lives in `session.json` in the taskdeck config dir as a flat
//! object with exactly the keys `token`, `role`, `username`. Absence of the
//! file (or an unreadable one) means unauthenticated.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::session::Session;

const SESSION_FILE: &str = "session.json";

/// Error type for session persistence
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not serialize session: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Write atomically: a torn write must never corrupt a valid session.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Restore a prior session. Missing or malformed file means none.
pub fn read_session(config_dir: &Path) -> Option<Session> {
    let content = fs::read_to_string(config_dir.join(SESSION_FILE)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Persist the session (login transition).
pub fn write_session(config_dir: &Path, session: &Session) -> Result<(), StoreError> {
    let path = config_dir.join(SESSION_FILE);
    let content = serde_json::to_string_pretty(session)?;
    atomic_write(&path, content.as_bytes()).map_err(|e| StoreError::WriteError {
        path,
        source: e,
    })
}

/// Clear the stored session (logout transition). Clearing an already-absent
/// session is not an error.
pub fn clear_session(config_dir: &Path) -> Result<(), StoreError> {
    let path = config_dir.join(SESSION_FILE);
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::WriteError { path, source: e }),
    }
}
