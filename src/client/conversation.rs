use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::client::error::ClientError;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ConversationStore trait — abstraction for testability (DIP)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Durable home of the single conversation id, so a restarted client
/// resumes the same server-side chat thread. Production writes to disk;
/// tests use the in-memory implementation.
pub trait ConversationStore: Send + Sync {
    fn save(&self, id: &str) -> Result<(), ClientError>;
    fn load(&self) -> Result<Option<String>, ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// FileConversationStore — XDG-compliant file storage
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Stores the id at `<config_dir>/journal/conversation_id`.
///
/// On Linux: `~/.config/journal/conversation_id`
pub struct FileConversationStore {
    path: PathBuf,
}

impl FileConversationStore {
    /// Platform-specific default location. Falls back to the current
    /// directory if no config dir can be determined.
    pub fn default_path() -> PathBuf {
        let base = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
            .unwrap_or_else(|_| PathBuf::from("."));

        base.join("journal").join("conversation_id")
    }

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Use the platform default path.
    pub fn with_default_path() -> Self {
        Self::new(Self::default_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationStore for FileConversationStore {
    fn save(&self, id: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, id.trim())?;
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, ClientError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let id = content.trim();
        if id.is_empty() {
            return Ok(None);
        }
        Ok(Some(id.to_string()))
    }

    fn clear(&self) -> Result<(), ClientError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// InMemoryConversationStore — for tests and ephemeral sessions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Default)]
pub struct InMemoryConversationStore {
    id: Mutex<Option<String>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn save(&self, id: &str) -> Result<(), ClientError> {
        *self.id.lock().unwrap() = Some(id.trim().to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self.id.lock().unwrap().clone())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.id.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(dir.path().join("journal").join("conversation_id"));

        assert!(store.load().unwrap().is_none());
        store.save("abc123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn file_store_trims_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conversation_id");
        std::fs::write(&path, "  abc123\n").unwrap();

        let store = FileConversationStore::new(path);
        assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn blank_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conversation_id");
        std::fs::write(&path, "\n").unwrap();

        let store = FileConversationStore::new(path);
        assert!(store.load().unwrap().is_none());
    }
}
