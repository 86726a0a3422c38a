//! services/api/src/adapters/json_source.rs
//!
//! File-backed data sources. `JsonFileSource` implements the `CatalogSource`
//! port from the `core` crate; `load_seed` reads the creator-side seed files.

use async_trait::async_trait;
use learnhub_core::ports::{CatalogSource, PortError, PortResult};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Reads the course catalog from a JSON file on disk.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

//=========================================================================================
// `CatalogSource` Trait Implementation
//=========================================================================================

#[async_trait]
impl CatalogSource for JsonFileSource {
    async fn read_source(&self) -> PortResult<Vec<u8>> {
        tokio::fs::read(&self.path).await.map_err(|e| {
            PortError::Unexpected(format!("failed to read {}: {}", self.path.display(), e))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

//=========================================================================================
// Seed Data
//=========================================================================================

/// Reads a JSON array of records. A missing or unreadable file yields no records.
pub async fn load_seed<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("No seed data at {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    match serde_json::from_slice::<Vec<T>>(&bytes) {
        Ok(records) => {
            info!("Loaded {} record(s) from {}", records.len(), path.display());
            records
        }
        Err(e) => {
            warn!("Ignoring malformed seed data at {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnhub_core::domain::Student;
    use learnhub_core::Catalog;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn catalog_loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{ "id": "1", "title": "Intro", "price": 10, "videos": [
                { "id": "a", "title": "A", "description": "", "url": "https://v/a" } ] }]"#,
        )
        .unwrap();
        file.flush().unwrap();

        let catalog = Catalog::load(&JsonFileSource::new(file.path())).await;
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get_lesson("1", "a").unwrap().lesson.title, "A");
    }

    #[tokio::test]
    async fn missing_file_yields_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("courses.json"));
        assert!(matches!(
            source.read_source().await,
            Err(PortError::Unexpected(_))
        ));
        assert!(Catalog::load(&source).await.is_empty());
    }

    #[tokio::test]
    async fn seed_degrades_to_empty() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[{\"id\": 1}]").unwrap();
        file.flush().unwrap();

        let students: Vec<Student> = load_seed(file.path()).await;
        assert!(students.is_empty());
    }
}
