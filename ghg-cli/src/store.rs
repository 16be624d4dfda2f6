//! JSON file backing for the factor store

use anyhow::{Context, Result};
use ghg_engine_core::catalog::import::{InMemoryFactorStore, StoredFactor};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a store from `path`; a missing file is an empty store.
pub fn load(path: &Path) -> Result<InMemoryFactorStore> {
    if !path.exists() {
        debug!("Store file {} does not exist, starting empty", path.display());
        return Ok(InMemoryFactorStore::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read store file {}", path.display()))?;
    let records: Vec<StoredFactor> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse store file {}", path.display()))?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(InMemoryFactorStore::from_records(records))
}

/// Write every record of `store` to `path` as a JSON array ordered by id.
pub fn save(store: &InMemoryFactorStore, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&store.records())?;
    fs::write(path, json).with_context(|| format!("failed to write store file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghg_engine_core::{import_catalog, EmissionFactorCatalog};

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = load(&dir.path().join("factors.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factors.json");
        let mut store = InMemoryFactorStore::new();
        import_catalog(&mut store, &EmissionFactorCatalog::reference());

        save(&store, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.records(), store.records());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factors.json");
        fs::write(&path, "not json").unwrap();
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse store file"));
    }
}
