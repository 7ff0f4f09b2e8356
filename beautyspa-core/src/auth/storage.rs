use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use beautyspa_common::Error;
use beautyspa_common::traits::TokenStorage;

/// In-memory token storage. The default for tests and previews, where
/// nothing should outlive the process.
#[derive(Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn store(&self, token: &str) -> Result<(), Error> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

/// Token storage backed by a small dot-file, standing in for the platform
/// key-value store on targets that have a home directory.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.beautyspa_token`, when a home directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".beautyspa_token"))
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn store(&self, token: &str) -> Result<(), Error> {
        fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}
