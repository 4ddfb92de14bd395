use std::path::{Path, PathBuf};

use sable_core::PackageName;
use serde::{Deserialize, Serialize};

use crate::{AcceptedConstructor, AcceptedType};

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("failed to read index snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    Json { message: String },
}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        // Snapshots are produced by other tools; keep only the position so a
        // hostile file cannot inject text into our logs.
        Self::Json {
            message: format!(
                "invalid index snapshot at line {} column {} ({:?})",
                err.line(),
                err.column(),
                err.classify()
            ),
        }
    }
}

/// Serializable contents of a [`crate::MemoryIndex`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSnapshot {
    pub types: Vec<AcceptedType>,
    pub constructors: Vec<AcceptedConstructor>,
    /// Packages with no types of their own (types imply their package).
    pub packages: Vec<PackageName>,
}

impl IndexSnapshot {
    pub fn from_json_str(text: &str) -> Result<Self, IndexError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let text = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json_str(&text)?;
        tracing::debug!(
            target: "sable.index",
            path = %path.display(),
            types = snapshot.types.len(),
            "loaded index snapshot"
        );
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, IndexError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
