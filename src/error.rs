use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the library crate. Ingestion itself never fails — bad
/// records are dropped — so these cover the I/O edges only.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read library config {path:?}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse library config {path:?}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write preferences {path:?}")]
    PrefWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
