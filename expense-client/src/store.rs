use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::ClientError;

/// Token pair persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// File-backed token storage.
///
/// The pair lives in a single JSON file. A missing or unreadable file
/// reads as logged out rather than an error, so a fresh machine and a
/// corrupted file both land the caller at the login step.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
    tokens: Option<StoredTokens>,
}

impl TokenStore {
    /// Open the store at `path`, loading any previously saved pair.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tokens = Self::load(&path);
        Self { path, tokens }
    }

    fn load(path: &Path) -> Option<StoredTokens> {
        let contents = fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// The currently held pair, if any.
    pub fn tokens(&self) -> Option<&StoredTokens> {
        self.tokens.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.refresh_token.as_str())
    }

    /// Persist a new pair, replacing any previous one.
    pub fn save(&mut self, tokens: StoredTokens) -> Result<(), ClientError> {
        let contents =
            serde_json::to_string_pretty(&tokens).map_err(|e| ClientError::Storage(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| ClientError::Storage(e.to_string()))?;
        self.tokens = Some(tokens);
        Ok(())
    }

    /// Drop the pair from memory and disk. Clearing an empty store is fine.
    pub fn clear(&mut self) -> Result<(), ClientError> {
        self.tokens = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(e.to_string())),
        }
    }
}
