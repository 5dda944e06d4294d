//! Character files.
//!
//! Characters are stored as JSON, wrapped in a versioned [`SavedCharacter`]
//! envelope. [`load_character`] also accepts a bare character object so
//! hand-written files work without the envelope.

use crate::world::Character;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current character file version.
const CHARACTER_SAVE_VERSION: u32 = 1;

/// A saved character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCharacter {
    /// Save format version for compatibility checking.
    pub version: u32,

    /// When the save was created, seconds since the Unix epoch.
    #[serde(default)]
    pub saved_at: String,

    pub character: Character,

    #[serde(default)]
    pub metadata: CharacterMetadata,
}

/// Summary written next to the character in a save file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterMetadata {
    pub name: String,
    pub class: String,
    pub level: u8,
}

impl SavedCharacter {
    pub fn new(character: Character) -> Self {
        let metadata = CharacterMetadata {
            name: character.name.clone(),
            class: character
                .class
                .as_ref()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            level: character.level,
        };

        Self {
            version: CHARACTER_SAVE_VERSION,
            saved_at: unix_now(),
            character,
            metadata,
        }
    }

    /// Save to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    fn check_version(&self) -> Result<(), PersistError> {
        if self.version != CHARACTER_SAVE_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: CHARACTER_SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

fn unix_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", now.as_secs())
}

/// Load a character from a save file or a bare character JSON object.
pub async fn load_character(path: impl AsRef<Path>) -> Result<Character, PersistError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).await?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    if value.get("version").is_some() {
        let saved: SavedCharacter = serde_json::from_value(value)?;
        saved.check_version()?;
        debug!(path = %path.display(), "loaded character save");
        Ok(saved.character)
    } else {
        debug!(path = %path.display(), "loaded bare character file");
        Ok(serde_json::from_value(value)?)
    }
}

/// Save a character in the versioned envelope.
pub async fn save_character(
    path: impl AsRef<Path>,
    character: &Character,
) -> Result<(), PersistError> {
    SavedCharacter::new(character.clone()).save_json(path).await
}
