//! Bulk upsert of catalog factors into a backing store
//!
//! Each factor is imported on its own: a failed row is recorded in the report
//! and the remaining rows still go through.

use crate::catalog::EmissionFactorCatalog;
use crate::core_types::EmissionFactor;
use crate::error::EngineError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub type RecordId = u64;

/// Who owns a stored factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorType {
    /// Published reference factor, written by the importer
    System,
    /// Organisation-specific factor entered by users
    Custom,
}

/// Identity of a stored factor: (name, category, source, type)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorKey {
    pub name: String,
    pub category: String,
    pub source: String,
    pub factor_type: FactorType,
}

impl FactorKey {
    /// Key under which the importer stores a catalog factor
    pub fn system(factor: &EmissionFactor) -> Self {
        Self {
            name: factor.name.clone(),
            category: factor.category.clone(),
            source: factor.source.clone(),
            factor_type: FactorType::System,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record {0} does not exist")]
    MissingRecord(RecordId),
    #[error("store rejected write: {0}")]
    Rejected(String),
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Backing store the importer writes to
pub trait FactorStore {
    /// Look up the record holding `key`
    fn find(&self, key: &FactorKey) -> Result<Option<RecordId>, StoreError>;

    /// Create a record, returning its id
    fn insert(&mut self, key: FactorKey, factor: &EmissionFactor) -> Result<RecordId, StoreError>;

    /// Overwrite the factor held by an existing record
    fn update(&mut self, id: RecordId, factor: &EmissionFactor) -> Result<(), StoreError>;
}

/// A factor as held by a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFactor {
    pub id: RecordId,
    pub factor_type: FactorType,
    pub factor: EmissionFactor,
}

impl StoredFactor {
    pub fn key(&self) -> FactorKey {
        FactorKey {
            name: self.factor.name.clone(),
            category: self.factor.category.clone(),
            source: self.factor.source.clone(),
            factor_type: self.factor_type,
        }
    }
}

/// Hash-map backed store
#[derive(Debug, Default, Clone)]
pub struct InMemoryFactorStore {
    records: FxHashMap<RecordId, StoredFactor>,
    keys: FxHashMap<FactorKey, RecordId>,
    next_id: RecordId,
}

impl InMemoryFactorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from previously saved records
    pub fn from_records(records: Vec<StoredFactor>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.next_id = store.next_id.max(record.id + 1);
            store.keys.insert(record.key(), record.id);
            store.records.insert(record.id, record);
        }
        store
    }

    /// All records ordered by id
    pub fn records(&self) -> Vec<StoredFactor> {
        let mut records: Vec<_> = self.records.values().cloned().collect();
        records.sort_by_key(|r| r.id);
        records
    }

    pub fn get(&self, id: RecordId) -> Option<&StoredFactor> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FactorStore for InMemoryFactorStore {
    fn find(&self, key: &FactorKey) -> Result<Option<RecordId>, StoreError> {
        Ok(self.keys.get(key).copied())
    }

    fn insert(&mut self, key: FactorKey, factor: &EmissionFactor) -> Result<RecordId, StoreError> {
        if self.keys.contains_key(&key) {
            return Err(StoreError::Rejected(format!(
                "duplicate key for factor {:?}",
                key.name
            )));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.records.insert(
            id,
            StoredFactor {
                id,
                factor_type: key.factor_type,
                factor: factor.clone(),
            },
        );
        self.keys.insert(key, id);
        Ok(id)
    }

    fn update(&mut self, id: RecordId, factor: &EmissionFactor) -> Result<(), StoreError> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(StoreError::MissingRecord(id))?;
        record.factor = factor.clone();
        Ok(())
    }
}

/// What happened to one imported factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportAction {
    Inserted(RecordId),
    Updated(RecordId),
}

#[derive(Debug, Error)]
enum ImportError {
    #[error(transparent)]
    Invalid(#[from] EngineError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A factor that could not be imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFailure {
    pub factor_name: String,
    pub message: String,
}

/// Partial-success summary of an import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub success_count: usize,
    pub inserted: usize,
    pub updated: usize,
    pub errors: Vec<ImportFailure>,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Update the record keyed like `factor` if it exists, otherwise insert it.
pub fn upsert_factor<S: FactorStore + ?Sized>(
    store: &mut S,
    factor: &EmissionFactor,
) -> Result<ImportAction, StoreError> {
    let key = FactorKey::system(factor);
    match store.find(&key)? {
        Some(id) => store.update(id, factor).map(|()| ImportAction::Updated(id)),
        None => store.insert(key, factor).map(ImportAction::Inserted),
    }
}

/// Import a list of factors, collecting per-factor failures.
pub fn import_factors<S: FactorStore + ?Sized>(
    store: &mut S,
    factors: &[EmissionFactor],
) -> ImportReport {
    let report = factors
        .iter()
        .fold(ImportReport::default(), |mut report, factor| {
            let outcome = factor
                .validate()
                .map_err(ImportError::from)
                .and_then(|()| upsert_factor(store, factor).map_err(ImportError::from));

            match outcome {
                Ok(ImportAction::Inserted(id)) => {
                    debug!("Inserted factor {:?} as record {}", factor.name, id);
                    report.inserted += 1;
                    report.success_count += 1;
                }
                Ok(ImportAction::Updated(id)) => {
                    debug!("Updated factor {:?} in record {}", factor.name, id);
                    report.updated += 1;
                    report.success_count += 1;
                }
                Err(e) => {
                    warn!("Failed to import factor {:?}: {}", factor.name, e);
                    report.errors.push(ImportFailure {
                        factor_name: factor.name.clone(),
                        message: e.to_string(),
                    });
                }
            }
            report
        });

    info!(
        "Factor import finished: {} succeeded ({} inserted, {} updated), {} failed",
        report.success_count,
        report.inserted,
        report.updated,
        report.errors.len()
    );
    report
}

/// Import every factor of a catalog.
pub fn import_catalog<S: FactorStore + ?Sized>(
    store: &mut S,
    catalog: &EmissionFactorCatalog,
) -> ImportReport {
    import_factors(store, catalog.factors())
}
