//! Factor resolution
//!
//! Picks the first catalog factor, in declaration order, whose subcategory
//! matches and whose species/system restrictions admit the query. Order is
//! part of the contract: broad queries resolve to the first row of the
//! subcategory.

use crate::catalog::EmissionFactorCatalog;
use crate::core_types::activity::non_blank;
use crate::core_types::{EmissionFactor, Qualifiers, Subcategory};
use crate::error::EngineError;
use tracing::debug;

/// Resolve a factor for a typed subcategory.
pub fn resolve<'c>(
    catalog: &'c EmissionFactorCatalog,
    subcategory: Subcategory,
    qualifiers: Qualifiers<'_>,
) -> Result<&'c EmissionFactor, EngineError> {
    let factor = catalog
        .factors_for(subcategory)
        .find(|f| f.accepts_species(qualifiers.species) && f.accepts_system(qualifiers.system))
        .ok_or_else(|| EngineError::FactorNotFound(subcategory.label().to_string()))?;

    debug!(
        "Resolved {} (species={:?}, system={:?}) to {:?}",
        subcategory, qualifiers.species, qualifiers.system, factor.name
    );
    Ok(factor)
}

/// Resolve a factor from a free-text subcategory.
///
/// A subcategory string that names no branch resolves nothing and fails with
/// `FactorNotFound` carrying the caller's text.
pub fn resolve_str<'c>(
    catalog: &'c EmissionFactorCatalog,
    subcategory: &str,
    species: Option<&str>,
    system: Option<&str>,
) -> Result<&'c EmissionFactor, EngineError> {
    let parsed = subcategory
        .parse::<Subcategory>()
        .map_err(|_| EngineError::FactorNotFound(subcategory.to_string()))?;
    resolve(
        catalog,
        parsed,
        Qualifiers {
            species: non_blank(species),
            system: non_blank(system),
        },
    )
}
