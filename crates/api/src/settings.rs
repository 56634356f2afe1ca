//! Runtime settings, read from an optional JSON file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sortiment_catalog::CatalogSchema;
use sortiment_document::{DocumentConfig, DocumentError, GridLayout};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid document settings: {0}")]
    Document(#[from] DocumentError),
}

/// Every field is optional in the file; missing ones keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub schema: CatalogSchema,
    pub document: DocumentConfig,
    /// Largest accepted positive-list upload.
    pub max_upload_bytes: usize,
    /// Upper bound for one document generation.
    pub generation_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema: CatalogSchema::default(),
            document: DocumentConfig::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            generation_timeout_secs: DEFAULT_GENERATION_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check the document layout and barcode block up front, so a broken
    /// settings file fails at startup instead of on every PDF request.
    pub fn validate(&self) -> Result<(), SettingsError> {
        GridLayout::new(self.document.layout.clone()).map_err(DocumentError::from)?;
        self.document.barcode.validate().map_err(DocumentError::from)?;
        Ok(())
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Document settings stamped with today's date, unless the file pins one.
    pub fn document_for_today(&self) -> DocumentConfig {
        let config = self.document.clone();
        if config.generated_on.is_some() {
            return config;
        }
        config.with_generated_on(chrono::Local::now().date_naive())
    }
}
