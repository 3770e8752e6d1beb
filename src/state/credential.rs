//! Durable storage for the bearer credential.
//!
//! ARCHITECTURE
//! ============
//! The credential is a single opaque token kept under one fixed key in a
//! small key/value store that outlives the process. Presence says nothing
//! about validity; the backend decides that on the next authenticated call.
//!
//! TRADE-OFFS
//! ==========
//! Store operations never fail at the call site. An unreadable or unwritable
//! store is logged and treated as "no credential", so logout and the 401
//! policy always complete. Other keys in the file are kept: a save never
//! writes over a file it could not read, and a file that is not a JSON
//! object is moved aside to `<name>.bak` first.

#[cfg(test)]
#[path = "credential_test.rs"]
mod credential_test;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};

/// Fixed storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Holder of at most one bearer credential.
pub trait CredentialStore: Send + Sync {
    /// Current credential, if any.
    fn load(&self) -> Option<String>;
    /// Persist `token`, replacing any previous credential.
    fn save(&self, token: &str);
    /// Forget the credential. Clearing an empty store is a no-op.
    fn clear(&self);
}

// =============================================================================
// IN-MEMORY
// =============================================================================

/// Process-local store, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_owned())) }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn clear(&self) {
        self.token.lock().unwrap_or_else(PoisonError::into_inner).take();
    }
}

// =============================================================================
// FILE-BACKED
// =============================================================================

enum Contents {
    Missing,
    Entries(Map<String, Value>),
    /// Present but could not be read; never overwritten.
    Unreadable,
    /// Readable but not a JSON object; moved aside before a save.
    Corrupt,
}

/// JSON object file holding client-local key/value pairs. The credential
/// sits under [`TOKEN_KEY`]; other keys are left untouched.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_contents(&self) -> Contents {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Contents::Missing,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "storage read failed");
                return Contents::Unreadable;
            }
        };
        if raw.trim().is_empty() {
            return Contents::Missing;
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Contents::Entries(map),
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "storage file is not a JSON object; ignoring");
                Contents::Corrupt
            }
        }
    }

    fn read_entries(&self) -> Option<Map<String, Value>> {
        match self.read_contents() {
            Contents::Entries(map) => Some(map),
            Contents::Missing | Contents::Unreadable | Contents::Corrupt => None,
        }
    }

    /// Sidecar that receives a corrupt storage file before it is replaced.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(ToOwned::to_owned).unwrap_or_default();
        name.push(".bak");
        self.path.with_file_name(name)
    }

    fn write_entries(&self, entries: &Map<String, Value>) {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "storage directory create failed");
                return;
            }
        }
        let rendered = match serde_json::to_string_pretty(entries) {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::warn!(error = %e, "storage encode failed");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, rendered) {
            tracing::warn!(path = %self.path.display(), error = %e, "storage write failed");
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<String> {
        self.read_entries()?
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(ToOwned::to_owned)
    }

    fn save(&self, token: &str) {
        let mut entries = match self.read_contents() {
            Contents::Entries(map) => map,
            Contents::Missing => Map::new(),
            Contents::Unreadable => {
                tracing::warn!(path = %self.path.display(), "storage unreadable; credential not saved");
                return;
            }
            Contents::Corrupt => {
                let backup = self.backup_path();
                if let Err(e) = std::fs::rename(&self.path, &backup) {
                    tracing::warn!(path = %self.path.display(), error = %e, "corrupt storage could not be moved aside; credential not saved");
                    return;
                }
                tracing::warn!(path = %self.path.display(), backup = %backup.display(), "replacing corrupt storage file");
                Map::new()
            }
        };
        entries.insert(TOKEN_KEY.to_owned(), Value::String(token.to_owned()));
        self.write_entries(&entries);
    }

    fn clear(&self) {
        let Some(mut entries) = self.read_entries() else {
            return;
        };
        if entries.remove(TOKEN_KEY).is_some() {
            self.write_entries(&entries);
        }
    }
}
