use serde::Deserialize;
use std::path::PathBuf;

use crate::{
    errors::{AppError, AppResult},
    models::domain::UniversityRecord,
};

/// Read-only source of pre-populated university entries. The pipeline
/// consumes the catalog as an input list and never mutates it.
#[cfg_attr(test, mockall::automock)]
pub trait CatalogRepository: Send + Sync {
    fn load(&self) -> AppResult<Vec<UniversityRecord>>;
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    universities: Vec<UniversityRecord>,
}

/// Catalog backed by a `{"universities": [...]}` JSON file. A missing file
/// is an empty catalog, not an error.
pub struct JsonCatalogRepository {
    path: PathBuf,
}

impl JsonCatalogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogRepository for JsonCatalogRepository {
    fn load(&self) -> AppResult<Vec<UniversityRecord>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("catalog file {} not found, using empty catalog", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(AppError::InternalError(format!(
                    "failed to read catalog {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let catalog: CatalogFile = serde_json::from_str(&raw).map_err(|e| {
            AppError::InternalError(format!("malformed catalog {}: {}", self.path.display(), e))
        })?;
        Ok(catalog.universities)
    }
}
