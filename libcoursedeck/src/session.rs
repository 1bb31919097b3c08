//! Session cache for the authenticated-user record
//!
//! The product's analog of browser local storage: the login response
//! envelope persisted verbatim as a JSON file under the data directory.
//! The store is always injected explicitly; nothing in the library reads
//! it ambiently.

use std::path::{Path, PathBuf};

use crate::config::{resolve_session_path, Config};
use crate::error::{Result, SessionError};
use crate::types::UserInfo;

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Build a store at the configured session path.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(resolve_session_path(config)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached record. A missing file is `None`; a file that
    /// cannot be read or parsed is an error.
    pub fn load(&self) -> Result<Option<UserInfo>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(SessionError::Io)?;
        let info: UserInfo = serde_json::from_str(&content).map_err(SessionError::Malformed)?;
        Ok(Some(info))
    }

    /// Persist the record, creating parent directories as needed. The
    /// file may hold a token, so it is not group or world readable.
    pub fn store(&self, info: &UserInfo) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(SessionError::Io)?;
        }

        let content = serde_json::to_string_pretty(info).map_err(SessionError::Malformed)?;
        std::fs::write(&self.path, content).map_err(SessionError::Io)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, perms).map_err(SessionError::Io)?;
        }

        Ok(())
    }

    /// Forget the cached record. Clearing an empty cache is fine.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io(e).into()),
        }
    }

    /// The teacher identifier scoped requests need, or `None` when the
    /// cache is absent or unreadable. Callers treat `None` as a local
    /// precondition failure and never reach the network.
    pub fn teacher_id(&self) -> Option<String> {
        match self.load() {
            Ok(Some(info)) => Some(info.data.id),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "session cache unreadable, treating as signed out");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserRecord;
    use serde_json::Map;

    fn sample_info(id: &str) -> UserInfo {
        UserInfo {
            data: UserRecord {
                id: id.to_string(),
                name: "Ada".to_string(),
                email: "ada@example.org".to_string(),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    fn temp_store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));
        (dir, store)
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let (_dir, store) = temp_store();
        assert!(store.load().unwrap().is_none());
        assert_eq!(store.teacher_id(), None);
    }

    #[test]
    fn test_store_then_load_round_trip() {
        let (_dir, store) = temp_store();
        store.store(&sample_info("t42")).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.data.id, "t42");
        assert_eq!(store.teacher_id(), Some("t42".to_string()));
    }

    #[test]
    fn test_clear_removes_record() {
        let (_dir, store) = temp_store();
        store.store(&sample_info("t42")).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing again is not an error.
        store.clear().unwrap();
    }

    #[test]
    fn test_malformed_cache_reads_as_signed_out() {
        let (_dir, store) = temp_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().is_err());
        assert_eq!(store.teacher_id(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, store) = temp_store();
        store.store(&sample_info("t42")).unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
