//! Agriculture GHG Emission Engine
//!
//! A deterministic calculation core for agricultural greenhouse-gas inventories,
//! following the GHG Protocol Brasil methodology with IPCC 2006 Tier 1 factors.
//! Converts activity data (head of livestock, harvested area, nitrogen applied,
//! residue burned, limestone and urea applied) into raw CO2, CH4 and N2O masses
//! and fossil/biogenic CO2-equivalent totals.
//!
//! ## Pipeline
//! - Factor catalog: immutable, methodology-versioned table of emission factors
//! - Resolver: first factor (in catalog order) matching subcategory, species and system
//! - Validator: required activity fields present, numeric fields non-negative
//! - Calculator: per-subcategory formulas, then GWP weighting (AR4) and rounding
//! - Inventory: parallel batch over many records with per-subcategory totals
//! - Importer: partial-failure upsert of catalog factors into a backing store

// Core types and utilities
pub mod core_types;
pub mod error;

// Factor catalog and its import into stores
pub mod catalog;

// Calculation engine (organized in subfolders)
pub mod engine;
pub mod inventory;

// Re-export core types
pub use core_types::{ActivityData, ActivityField, EmissionFactor, Subcategory};
pub use core_types::{Fraction, Gas, Gwp, MassConversion, Methodology, Percent, Tonnes};
pub use error::EngineError;

// Re-export catalog types
pub use catalog::import::{import_catalog, FactorStore, ImportReport, InMemoryFactorStore};
pub use catalog::EmissionFactorCatalog;

// Re-export engine types
pub use engine::{CalculationDetails, EmissionEngine, EmissionResult, EngineConfig};
pub use inventory::{ActivityRecord, InventoryReport, RecordOutcome};
