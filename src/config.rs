use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::DeckError;

/// Raw folder record as supplied by the host. Every field is optional here;
/// validation happens at ingestion, never at parse time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFolder {
    pub id: Option<String>,
    pub name: Option<String>,
    pub parent_id: Option<String>,
    pub color: Option<String>,
}

/// Raw file record as supplied by the host.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFile {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub folder_id: Option<String>,
    pub description: Option<String>,
    pub size: Option<u64>,
}

/// Who is asking. Role tags are matched case-insensitively against the
/// allow-list; the explicit admin flag wins outright.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessDescriptor {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// The flat library config a host hands to the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryConfig {
    pub title: Option<String>,
    #[serde(default)]
    pub folders: Vec<RawFolder>,
    #[serde(default)]
    pub files: Vec<RawFile>,
    #[serde(default)]
    pub access: AccessDescriptor,
    #[serde(default)]
    pub design_mode: bool,
}

impl LibraryConfig {
    /// Load a library config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let text = fs::read_to_string(path).map_err(|source| DeckError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| DeckError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
