//! Emission engine: resolver, validator and calculator over one catalog
//!
//! ```
//! use ghg_engine_core::{ActivityData, ActivityField, EmissionEngine};
//!
//! let engine = EmissionEngine::default();
//! let activity = ActivityData::new()
//!     .with(ActivityField::AnimalCount, 1000.0)
//!     .with_species("Bovinos de Leite");
//! let result = engine
//!     .calculate_emissions("Fermentação Entérica", &activity)
//!     .unwrap();
//! assert_eq!(*result.total_co2e, 3200.0);
//! ```

pub mod calculator;
pub mod config;
pub mod resolver;
pub mod result;
pub mod validator;

use crate::catalog::EmissionFactorCatalog;
use crate::core_types::{ActivityData, EmissionFactor, Subcategory};
use crate::error::EngineError;

pub use config::EngineConfig;
pub use result::{CalculationDetails, EmissionResult, GasContributions};

/// Pure, synchronous calculation engine
///
/// Holds no mutable state: identical inputs always give identical results, and
/// one engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct EmissionEngine {
    catalog: EmissionFactorCatalog,
    config: EngineConfig,
}

impl EmissionEngine {
    /// Engine over the reference catalog of `config.methodology_version`
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let catalog = EmissionFactorCatalog::for_methodology(&config.methodology_version)?;
        Ok(Self { catalog, config })
    }

    /// Engine over a caller-supplied catalog
    pub fn with_catalog(catalog: EmissionFactorCatalog, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &EmissionFactorCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// First catalog factor matching subcategory, species and system.
    pub fn resolve_factor(
        &self,
        subcategory: &str,
        species: Option<&str>,
        system: Option<&str>,
    ) -> Result<&EmissionFactor, EngineError> {
        resolver::resolve_str(&self.catalog, subcategory, species, system)
    }

    /// Check that `activity` carries what `subcategory` needs.
    pub fn validate_activity(
        &self,
        subcategory: &str,
        activity: &ActivityData,
    ) -> Result<(), EngineError> {
        let subcategory = subcategory.parse::<Subcategory>()?;
        validator::validate(subcategory, activity).map(|_| ())
    }

    /// Resolve a factor for `activity` and compute its emissions.
    pub fn calculate_emissions(
        &self,
        subcategory: &str,
        activity: &ActivityData,
    ) -> Result<EmissionResult, EngineError> {
        let subcategory = subcategory.parse::<Subcategory>()?;
        let factor = resolver::resolve(
            &self.catalog,
            subcategory,
            subcategory.qualifiers(activity),
        )?;
        calculator::calculate_with_factor(
            subcategory,
            factor,
            activity,
            self.catalog.methodology(),
            &self.config,
        )
    }
}

impl Default for EmissionEngine {
    fn default() -> Self {
        Self::with_catalog(EmissionFactorCatalog::reference(), EngineConfig::default())
    }
}
