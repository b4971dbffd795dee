//! Session state and durable storage

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The authenticated-user record mirrored to durable storage.
///
/// An empty token means logged out; the three fields are always set
/// together by login and cleared together by logout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: String,

    #[serde(default)]
    pub username: String,

    #[serde(default, rename = "userId")]
    pub user_id: String,
}

impl Session {
    /// Create a logged-in session
    pub fn new(token: String, username: String, user_id: String) -> Self {
        Self {
            token,
            username,
            user_id,
        }
    }

    /// Logged in iff the token is non-empty
    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }
}

/// Durable session storage backed by a TOML file.
///
/// The store owns the in-memory session and keeps the file in sync:
/// `commit` persists all fields, `clear` removes them and the file.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    current: Session,
}

impl SessionStore {
    /// Open the store, restoring the session from disk if present.
    /// A missing or unreadable file yields the empty (logged-out) session.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = fs::read_to_string(&path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default();
        Self { path, current }
    }

    /// The file backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current session
    pub fn session(&self) -> &Session {
        &self.current
    }

    /// Logged in iff the current session holds a token
    pub fn is_logged_in(&self) -> bool {
        self.current.is_logged_in()
    }

    /// Set all session fields and persist them
    pub fn commit(&mut self, session: Session) -> Result<()> {
        let content = toml::to_string(&session)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        self.current = session;
        tracing::debug!("Session persisted to {}", self.path.display());
        Ok(())
    }

    /// Clear all session fields and remove the file. Removing an already
    /// absent file is not an error.
    pub fn clear(&mut self) -> Result<()> {
        self.current = Session::default();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = SessionStore::open(dir.path().join("session.toml"));
        (dir, store)
    }

    #[test]
    fn test_empty_session_is_logged_out() {
        let (_dir, store) = temp_store();
        assert!(!store.is_logged_in());
        assert!(store.session().token.is_empty());
    }

    #[test]
    fn test_commit_and_restore() {
        let (dir, mut store) = temp_store();
        let session = Session::new("tok1".into(), "a".into(), "1".into());
        store.commit(session.clone()).expect("Failed to commit");
        assert!(store.is_logged_in());

        let reopened = SessionStore::open(dir.path().join("session.toml"));
        assert_eq!(reopened.session(), &session);
        assert!(reopened.is_logged_in());
    }

    #[test]
    fn test_storage_uses_original_key_names() {
        let (_dir, mut store) = temp_store();
        store
            .commit(Session::new("tok1".into(), "a".into(), "1".into()))
            .expect("Failed to commit");

        let content = fs::read_to_string(store.path()).expect("Failed to read session file");
        assert!(content.contains("token"));
        assert!(content.contains("username"));
        assert!(content.contains("userId"));
    }

    #[test]
    fn test_clear_removes_all_keys_and_file() {
        let (_dir, mut store) = temp_store();
        store
            .commit(Session::new("tok1".into(), "a".into(), "1".into()))
            .expect("Failed to commit");
        store.clear().expect("Failed to clear");

        assert!(!store.is_logged_in());
        assert_eq!(store.session(), &Session::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_clear_twice_is_not_an_error() {
        let (_dir, mut store) = temp_store();
        store.clear().expect("First clear failed");
        store.clear().expect("Second clear failed");
    }

    #[test]
    fn test_corrupt_file_yields_logged_out_session() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("session.toml");
        fs::write(&path, "not valid toml [[[").expect("Failed to write");

        let store = SessionStore::open(&path);
        assert!(!store.is_logged_in());
    }
}
