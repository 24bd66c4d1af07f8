//! Durable storage for the login credentials and token.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credentials file name inside the storage directory
const CREDENTIALS_FILE: &str = "credentials.json";

/// The persisted login record.
///
/// Username, password, and token travel as one document so the three
/// values are written together and removed together.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCredentials {
    username: String,
    password: String,
    token: String,
    saved_at: DateTime<Utc>,
}

/// Plain JSON-on-disk storage for the login credentials and token.
///
/// Values survive process restarts. Storage is unencrypted; the
/// storage directory must be private to the user.
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Persist the triple, replacing any previous record.
    pub fn save(&self, username: &str, password: &str, token: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .context("Failed to create credential storage directory")?;
        let record = StoredCredentials {
            username: username.to_string(),
            password: password.to_string(),
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        let contents = serde_json::to_string_pretty(&record)?;
        std::fs::write(self.path(), contents).context("Failed to write credentials file")?;
        Ok(())
    }

    /// The stored username, if any.
    pub fn username(&self) -> Option<String> {
        self.read().map(|record| record.username)
    }

    /// The stored password, if any.
    pub fn password(&self) -> Option<String> {
        self.read().map(|record| record.password)
    }

    /// The stored token, if any.
    pub fn token(&self) -> Option<String> {
        self.read().map(|record| record.token)
    }

    /// Remove the stored record. A missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove credentials file")?;
        }
        Ok(())
    }

    /// An unreadable or unparseable file reads as absent.
    fn read(&self) -> Option<StoredCredentials> {
        let contents = std::fs::read_to_string(self.path()).ok()?;
        serde_json::from_str(&contents).ok()
    }

    fn path(&self) -> PathBuf {
        self.dir.join(CREDENTIALS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().to_path_buf())
    }

    #[test]
    fn empty_store_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.username(), None);
        assert_eq!(store.password(), None);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn saved_values_survive_a_new_store_instance() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).save("bulma", "capsule", "token-1").unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.username().as_deref(), Some("bulma"));
        assert_eq!(reopened.password().as_deref(), Some("capsule"));
        assert_eq!(reopened.token().as_deref(), Some("token-1"));
    }

    #[test]
    fn save_replaces_the_previous_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save("bulma", "capsule", "token-1").unwrap();
        store.save("krillin", "senzu", "token-2").unwrap();

        assert_eq!(store.username().as_deref(), Some("krillin"));
        assert_eq!(store.token().as_deref(), Some("token-2"));
    }

    #[test]
    fn clear_removes_all_three_values() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save("bulma", "capsule", "token-1").unwrap();

        store.clear().unwrap();

        assert_eq!(store.username(), None);
        assert_eq!(store.password(), None);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn clear_on_an_empty_store_is_fine() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).clear().is_ok());
    }

    #[test]
    fn corrupt_file_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CREDENTIALS_FILE), "not json").unwrap();

        assert_eq!(store_in(&dir).token(), None);
    }
}
