//! Emission factor catalog
//!
//! A catalog is immutable once built. Rows keep their declaration order inside
//! each subcategory bucket so that factor resolution stays "first match wins"
//! without scanning unrelated subcategories.

pub mod agriculture;
pub mod import;

use crate::core_types::{EmissionFactor, Methodology, Subcategory};
use crate::error::EngineError;
use rustc_hash::FxHashMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EmissionFactorCatalog {
    methodology: Methodology,
    factors: Vec<EmissionFactor>,
    /// Subcategory → indices into `factors`, ascending
    index: FxHashMap<Subcategory, Vec<usize>>,
}

impl EmissionFactorCatalog {
    /// Build a catalog from caller-supplied factors (e.g. rows read back from a store).
    ///
    /// Every factor is validated and its subcategory label must name a known
    /// calculation branch.
    pub fn new(
        methodology: Methodology,
        factors: Vec<EmissionFactor>,
    ) -> Result<Self, EngineError> {
        let entries = factors
            .into_iter()
            .map(|factor| {
                factor.validate()?;
                let subcategory = factor.subcategory.parse::<Subcategory>().map_err(|_| {
                    EngineError::InvalidFactor {
                        name: factor.name.clone(),
                        reason: format!("unknown subcategory {:?}", factor.subcategory),
                    }
                })?;
                Ok((subcategory, factor))
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        Ok(Self::from_entries(methodology, entries))
    }

    /// Reference catalog of the current methodology (GHG Protocol Brasil 2025.0.1)
    pub fn reference() -> Self {
        Self::from_entries(
            Methodology::ghg_protocol_brasil_2025(),
            agriculture::reference_factors(),
        )
    }

    /// Reference catalog published for `version`
    pub fn for_methodology(version: &str) -> Result<Self, EngineError> {
        let version = version.trim();
        if version == Methodology::ghg_protocol_brasil_2025().version {
            Ok(Self::reference())
        } else {
            Err(EngineError::UnknownMethodology(version.to_string()))
        }
    }

    fn from_entries(methodology: Methodology, entries: Vec<(Subcategory, EmissionFactor)>) -> Self {
        let mut index: FxHashMap<Subcategory, Vec<usize>> = FxHashMap::default();
        let mut factors = Vec::with_capacity(entries.len());
        for (i, (subcategory, factor)) in entries.into_iter().enumerate() {
            index.entry(subcategory).or_default().push(i);
            factors.push(factor);
        }

        debug!(
            "Built emission factor catalog {} with {} factors across {} subcategories",
            methodology,
            factors.len(),
            index.len()
        );

        Self {
            methodology,
            factors,
            index,
        }
    }

    pub fn methodology(&self) -> &Methodology {
        &self.methodology
    }

    /// All factors in declaration order
    pub fn factors(&self) -> &[EmissionFactor] {
        &self.factors
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Factors of one subcategory, in declaration order
    pub fn factors_for(&self, subcategory: Subcategory) -> impl Iterator<Item = &EmissionFactor> {
        self.index
            .get(&subcategory)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&i| &self.factors[i])
    }
}

impl Default for EmissionFactorCatalog {
    fn default() -> Self {
        Self::reference()
    }
}
