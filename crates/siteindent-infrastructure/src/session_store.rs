//! Durable session storage.
//!
//! Both stores keep a flat string map with the `auth_token` and `user`
//! keys, the user record being its JSON serialization. The token and the
//! user are always written and cleared together.

use crate::paths::SiteIndentPaths;
use crate::storage::{AtomicFile, FileFormat, StorageError};
use async_trait::async_trait;
use siteindent_core::session::{AUTH_TOKEN_KEY, PersistedSession, SessionStore, USER_KEY};
use siteindent_core::user::User;
use siteindent_core::{Result, SiteIndentError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

type KeyValues = BTreeMap<String, String>;

fn decode(values: &KeyValues) -> Result<PersistedSession> {
    let token = values.get(AUTH_TOKEN_KEY).cloned();
    let user = match values.get(USER_KEY) {
        Some(raw) => Some(serde_json::from_str::<User>(raw)?),
        None => None,
    };
    Ok(PersistedSession { token, user })
}

fn encode(token: &str, user: &User) -> Result<KeyValues> {
    let mut values = KeyValues::new();
    values.insert(AUTH_TOKEN_KEY.to_string(), token.to_string());
    values.insert(USER_KEY.to_string(), serde_json::to_string(user)?);
    Ok(values)
}

/// Session store backed by a private JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    file: AtomicFile<KeyValues>,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path, FileFormat::Json).private(),
        }
    }

    /// Store at the default location, or below `base` when given.
    pub fn at_default_location(base: Option<&Path>) -> Result<Self> {
        let path = SiteIndentPaths::new(base)
            .session_file()
            .map_err(|e| SiteIndentError::config(e.to_string()))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    async fn run<R, F>(&self, op: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(AtomicFile<KeyValues>) -> std::result::Result<R, StorageError> + Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || op(file))
            .await
            .map_err(|e| SiteIndentError::internal(format!("Storage task failed: {}", e)))?
            .map_err(SiteIndentError::from)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<PersistedSession> {
        let values = self.run(|file| file.load()).await?.unwrap_or_default();
        decode(&values)
    }

    async fn save(&self, token: &str, user: &User) -> Result<()> {
        let values = encode(token, user)?;
        self.run(move |file| file.save(&values)).await?;
        tracing::debug!("[FileSessionStore] Session saved to {}", self.path().display());
        Ok(())
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.run(move |file| {
            file.update(KeyValues::new(), |values| {
                values.insert(USER_KEY.to_string(), raw);
            })
        })
        .await
    }

    async fn clear(&self) -> Result<()> {
        self.run(|file| file.remove()).await?;
        tracing::debug!("[FileSessionStore] Session cleared");
        Ok(())
    }
}

/// In-memory session store.
///
/// Clones share the same map, so a second manager built over a clone sees
/// what the first one persisted, as a restarted process would.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    values: Arc<Mutex<KeyValues>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`, for inspection.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.values.lock().await.get(key).cloned()
    }

    /// Overwrites a raw value, e.g. to simulate a corrupted entry.
    pub async fn put(&self, key: &str, value: impl Into<String>) {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.into());
    }

    pub async fn is_empty(&self) -> bool {
        self.values.lock().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<PersistedSession> {
        decode(&*self.values.lock().await)
    }

    async fn save(&self, token: &str, user: &User) -> Result<()> {
        let encoded = encode(token, user)?;
        *self.values.lock().await = encoded;
        Ok(())
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.values.lock().await.insert(USER_KEY.to_string(), raw);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.values.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteindent_core::user::Role;
    use tempfile::TempDir;

    fn engineer() -> User {
        User {
            id: "u-1".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            role: Role::SiteEngineer,
            site_id: Some("site-chembur".to_string()),
            site_name: Some("Chembur Site".to_string()),
        }
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::at_default_location(Some(temp_dir.path())).unwrap();

        assert!(store.load().await.unwrap().is_empty());

        store.save("tok-1", &engineer()).await.unwrap();
        let restored = store.load().await.unwrap();
        assert_eq!(restored.token.as_deref(), Some("tok-1"));
        assert_eq!(restored.user, Some(engineer()));

        // A second handle on the same file sees the same session
        let reopened = FileSessionStore::new(store.path().to_path_buf());
        assert_eq!(reopened.load().await.unwrap().user, Some(engineer()));
    }

    #[tokio::test]
    async fn test_file_store_keys_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::at_default_location(Some(temp_dir.path())).unwrap();
        store.save("tok-1", &engineer()).await.unwrap();

        let raw: KeyValues =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw.get(AUTH_TOKEN_KEY).map(String::as_str), Some("tok-1"));
        assert!(raw.get(USER_KEY).unwrap().contains("\"SITE_ENGINEER\""));

        store.clear().await.unwrap();
        assert!(!store.path().exists());
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_user_keeps_token() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::at_default_location(Some(temp_dir.path())).unwrap();
        store.save("tok-1", &engineer()).await.unwrap();

        let mut moved = engineer();
        moved.site_id = Some("site-thane".to_string());
        store.save_user(&moved).await.unwrap();

        let restored = store.load().await.unwrap();
        assert_eq!(restored.token.as_deref(), Some("tok-1"));
        assert_eq!(restored.user.unwrap().site_id.as_deref(), Some("site-thane"));
    }

    #[tokio::test]
    async fn test_corrupt_user_is_an_error() {
        let store = MemorySessionStore::new();
        store.put(AUTH_TOKEN_KEY, "tok").await;
        store.put(USER_KEY, "{not json").await;
        assert!(store.load().await.is_err());
    }

    #[tokio::test]
    async fn test_memory_store_clones_share_state() {
        let store = MemorySessionStore::new();
        let other = store.clone();
        store.save("tok-2", &engineer()).await.unwrap();

        assert_eq!(other.get(AUTH_TOKEN_KEY).await.as_deref(), Some("tok-2"));
        other.clear().await.unwrap();
        assert!(store.is_empty().await);
    }
}
