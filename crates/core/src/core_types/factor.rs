use crate::core_types::gas::Gas;
use crate::core_types::units::Fraction;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Emission factor for one agricultural source
///
/// Gas factors are in mass of gas per activity unit (kg, except for the
/// carbonate sources whose CO2 factor is t CO2 per t applied). A `None`
/// factor means the source does not emit that gas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionFactor {
    // Identification
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub source: String,

    // Gas factors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ch4_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n2o_factor: Option<f64>,
    pub activity_unit: String,
    pub biogenic_fraction: Fraction, // Share of CO2 from recently-living biomass

    // Applicability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_species: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_systems: Option<Vec<String>>,

    /// Informational only, never used in computation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty_range: Option<String>,
}

impl EmissionFactor {
    /// Factor for one gas
    pub fn gas_factor(&self, gas: Gas) -> Option<f64> {
        match gas {
            Gas::Co2 => self.co2_factor,
            Gas::Ch4 => self.ch4_factor,
            Gas::N2o => self.n2o_factor,
        }
    }

    /// Check the invariants a published factor must hold.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.name.trim().is_empty() {
            return Err(self.invalid("name must not be empty"));
        }
        for gas in [Gas::Co2, Gas::Ch4, Gas::N2o] {
            if let Some(value) = self.gas_factor(gas) {
                if !value.is_finite() || value < 0.0 {
                    return Err(self.invalid(format!(
                        "{gas} factor must be finite and non-negative, got {value}"
                    )));
                }
            }
        }
        if Fraction::checked(*self.biogenic_fraction).is_none() {
            return Err(self.invalid(format!(
                "biogenic fraction must be within [0, 1], got {}",
                *self.biogenic_fraction
            )));
        }
        Ok(())
    }

    /// Does the species qualifier admit this factor?
    pub fn accepts_species(&self, species: Option<&str>) -> bool {
        qualifier_matches(self.applicable_species.as_deref(), species)
    }

    /// Does the system qualifier admit this factor?
    pub fn accepts_system(&self, system: Option<&str>) -> bool {
        qualifier_matches(self.applicable_systems.as_deref(), system)
    }

    fn invalid(&self, reason: impl Into<String>) -> EngineError {
        EngineError::InvalidFactor {
            name: self.name.clone(),
            reason: reason.into(),
        }
    }
}

/// Case-insensitive "contains" match between a restriction list and a query.
///
/// No query or no restriction always matches. Otherwise one applicable label
/// must be contained in the query, so "Bovinos" admits "Bovinos de Leite".
/// The query is never matched inside a label: "Ovinos" must not pick up
/// "Bovinos de Leite".
fn qualifier_matches(applicable: Option<&[String]>, query: Option<&str>) -> bool {
    let (Some(applicable), Some(query)) = (applicable, query) else {
        return true;
    };
    if applicable.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    applicable
        .iter()
        .any(|label| query.contains(&label.to_lowercase()))
}
