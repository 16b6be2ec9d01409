use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::HistoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

/// File-backed chat transcript. Loading never fails: missing or corrupt
/// data degrades to an empty transcript.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Vec<ChatMessage> {
        match fs::read_to_string(&self.path) {
            Ok(json_str) => serde_json::from_str(&json_str).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    pub fn save(&self, history: &[ChatMessage]) -> Result<(), HistoryError> {
        let json_str = serde_json::to_string_pretty(history)?;
        fs::write(&self.path, json_str)?;
        Ok(())
    }
}
